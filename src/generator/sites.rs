/*
sites.rs

Copyright 2025 Hervé Quatremain

This file is part of Nabla.

Nabla is free software: you can redistribute it and/or modify it under the
terms of the GNU General Public License as published by the Free Software
Foundation, either version 3 of the License, or (at your option) any later
version.

Nabla is distributed in the hope that it will be useful, but WITHOUT ANY
WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR
A PARTICULAR PURPOSE. See the GNU General Public License for more details.

You should have received a copy of the GNU General Public License along with
Nabla. If not, see <https://www.gnu.org/licenses/>.

SPDX-License-Identifier: GPL-3.0-or-later
*/

//! Scatter random sites over the playable area.

use log::debug;
use rand::Rng;

use super::GenerationError;
use super::diagram::Point;
use crate::config::DEFAULT_MAX_ATTEMPTS_PER_SITE;

/// [`SiteSampler`] object.
///
/// Sites are drawn uniformly in `[0, width) x [0, height)` by rejection sampling: a candidate is
/// kept only if it is farther than the minimum distance from every site already accepted.
pub struct SiteSampler {
    /// Width of the area.
    width: f64,

    /// Height of the area.
    height: f64,

    /// Number of draws allowed for each site.
    max_attempts_per_site: usize,

    /// Number of draws it took to generate the last list of sites.
    pub iteration: usize,
}

impl SiteSampler {
    /// Create the object.
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            max_attempts_per_site: DEFAULT_MAX_ATTEMPTS_PER_SITE,
            iteration: 0,
        }
    }

    /// Change the number of draws allowed for each site. At least one draw is always allowed.
    pub fn with_max_attempts(mut self, max_attempts_per_site: usize) -> Self {
        self.max_attempts_per_site = max_attempts_per_site.max(1);
        self
    }

    /// Generate and return `target_count` sites.
    ///
    /// # Errors
    ///
    /// Return [`GenerationError::GenerationFailed`] if a site cannot be placed within the
    /// allowed number of draws. This happens when `min_distance` is too large for the area and
    /// the number of sites. The caller can retry with relaxed parameters.
    pub fn generate<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        target_count: usize,
        min_distance: f64,
    ) -> Result<Vec<Point>, GenerationError> {
        self.iteration = 0;

        let mut sites: Vec<Point> = Vec::with_capacity(target_count);
        if target_count == 0 {
            return Ok(sites);
        }
        let usable = |side: f64| side > 0.0 && side.is_finite();
        if !(usable(self.width) && usable(self.height)) {
            debug!("Unusable area {}x{}: no site can be placed", self.width, self.height);
            return Err(GenerationError::GenerationFailed {
                placed: 0,
                requested: target_count,
            });
        }

        while sites.len() < target_count {
            let mut accepted: bool = false;
            for _ in 0..self.max_attempts_per_site {
                self.iteration += 1;
                let candidate: Point = Point::new(
                    rng.random_range(0.0..self.width),
                    rng.random_range(0.0..self.height),
                );
                if Self::is_far_enough(&sites, &candidate, min_distance) {
                    sites.push(candidate);
                    accepted = true;
                    break;
                }
            }
            if !accepted {
                debug!(
                    "Giving up after {} draws for site {}",
                    self.max_attempts_per_site,
                    sites.len()
                );
                return Err(GenerationError::GenerationFailed {
                    placed: sites.len(),
                    requested: target_count,
                });
            }
        }

        debug!(
            "Placed {} sites in {} draws",
            sites.len(),
            self.iteration
        );
        Ok(sites)
    }

    /// Whether the candidate is farther than `min_distance` from every site.
    ///
    /// The first site is always accepted, and so is any site when `min_distance` is not
    /// positive.
    fn is_far_enough(sites: &[Point], candidate: &Point, min_distance: f64) -> bool {
        min_distance <= 0.0 || sites.iter().all(|s| s.distance(candidate) > min_distance)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn zero_distance_always_terminates() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut sampler = SiteSampler::new(600.0, 300.0);
        let sites = sampler.generate(&mut rng, 5, 0.0).unwrap();
        assert_eq!(sites.len(), 5);
        assert_eq!(sampler.iteration, 5);
    }

    #[test]
    fn sites_are_inside_the_area() {
        let mut rng = StdRng::seed_from_u64(2);
        let mut sampler = SiteSampler::new(60.0, 30.0);
        for s in sampler.generate(&mut rng, 50, 0.0).unwrap() {
            assert!(s.x >= 0.0 && s.x < 60.0);
            assert!(s.y >= 0.0 && s.y < 30.0);
        }
    }

    #[test]
    fn sites_respect_the_minimum_distance() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut sampler = SiteSampler::new(600.0, 300.0);
        let sites = sampler.generate(&mut rng, 40, 20.0).unwrap();
        assert_eq!(sites.len(), 40);
        for (i, a) in sites.iter().enumerate() {
            for b in &sites[i + 1..] {
                assert!(a.distance(b) > 20.0);
            }
        }
    }

    #[test]
    fn impossible_distance_fails() {
        let mut rng = StdRng::seed_from_u64(4);
        let mut sampler = SiteSampler::new(10.0, 10.0).with_max_attempts(50);
        let err = sampler.generate(&mut rng, 3, 100.0).unwrap_err();
        assert_eq!(
            err,
            GenerationError::GenerationFailed {
                placed: 1,
                requested: 3
            }
        );
        // One draw for the first site, then 50 rejected draws for the second one
        assert_eq!(sampler.iteration, 51);
    }

    #[test]
    fn zero_attempts_still_places_the_first_site() {
        let mut rng = StdRng::seed_from_u64(6);
        let mut sampler = SiteSampler::new(600.0, 300.0).with_max_attempts(0);
        let sites = sampler.generate(&mut rng, 1, 20.0).unwrap();
        assert_eq!(sites.len(), 1);
        assert_eq!(sampler.iteration, 1);
    }

    #[test]
    fn infinite_area_fails() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut sampler = SiteSampler::new(f64::INFINITY, 10.0);
        assert!(sampler.generate(&mut rng, 2, 0.0).is_err());
        let mut sampler = SiteSampler::new(10.0, f64::NAN);
        assert!(sampler.generate(&mut rng, 2, 0.0).is_err());
    }

    #[test]
    fn empty_area_fails() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut sampler = SiteSampler::new(0.0, 10.0);
        assert!(sampler.generate(&mut rng, 1, 0.0).is_err());
        assert_eq!(sampler.generate(&mut rng, 0, 0.0).unwrap(), Vec::new());
    }

    #[test]
    fn same_seed_gives_same_sites() {
        let mut sampler = SiteSampler::new(600.0, 300.0);
        let a = sampler
            .generate(&mut StdRng::seed_from_u64(42), 10, 20.0)
            .unwrap();
        let b = sampler
            .generate(&mut StdRng::seed_from_u64(42), 10, 20.0)
            .unwrap();
        assert_eq!(a, b);
    }
}

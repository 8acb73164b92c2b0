/*
assembler.rs

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

//! Build [`Level`] objects from Voronoi diagrams.

use log::{debug, info, log_enabled, warn};
use rand::Rng;
use std::collections::BTreeSet;
use std::time::Instant;

use super::GenerationError;
use super::adjacency::AdjacencyGraph;
use super::boundary;
use super::cell_filter::CellFilter;
use super::voronoi::DelaunayVoronoi;
use super::diagram::{BoundingBox, Diagram, PlanarSubdivisionBuilder, Point};
use super::sites::SiteSampler;
use crate::config::{DEFAULT_BORDER_EPSILON, LevelParameters};
use crate::level::{Cell, Level};

/// Two sites closer than this are considered at the same position.
const SITE_EPSILON: f64 = 1e-9;

/// [`LevelAssembler`] object.
///
/// Keep the diagram cells that are away from the border, and convert them into level cells.
pub struct LevelAssembler {
    /// Width of the area.
    width: f64,

    /// Height of the area.
    height: f64,

    /// Tolerance for the border test.
    border_epsilon: f64,
}

impl LevelAssembler {
    /// Create the object.
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            border_epsilon: DEFAULT_BORDER_EPSILON,
        }
    }

    /// Change the tolerance for the border test.
    pub fn with_border_epsilon(mut self, border_epsilon: f64) -> Self {
        self.border_epsilon = border_epsilon;
        self
    }

    /// Build the level from the diagram.
    ///
    /// The cells of the level are sorted by their new identifier. The level can be empty if all
    /// the cells touch the border.
    ///
    /// # Errors
    ///
    /// The method returns an error if two sites are at the same position, if the neighbor
    /// relation is not symmetric, or if a cell polygon is degenerate.
    pub fn assemble(&self, diagram: &Diagram) -> Result<Level, GenerationError> {
        Self::check_sites(diagram)?;

        let new_ids: Vec<Option<usize>> = CellFilter::new(self.width, self.height)
            .with_epsilon(self.border_epsilon)
            .renumber(diagram);

        let graph: AdjacencyGraph = AdjacencyGraph::build(diagram, &new_ids);
        if log_enabled!(log::Level::Debug) {
            graph.debug();
        }
        graph.verify()?;
        let mut neighbours: Vec<BTreeSet<usize>> = graph.into_inner();

        let mut cells: Vec<Cell> = Vec::with_capacity(neighbours.len());
        for (cell, new_id) in diagram.cells.iter().zip(&new_ids) {
            let Some(id) = *new_id else {
                continue;
            };
            let vertices: Vec<Point> = boundary::validated_polygon(id, cell)?;
            cells.push(Cell {
                id,
                site: cell.site,
                vertices,
                neighbours: std::mem::take(&mut neighbours[id]),
                color: None,
            });
        }
        Ok(Level::new(self.width, self.height, cells))
    }

    /// Verify that no two diagram cells come from the same site.
    ///
    /// Such cells would overlap, or one of them would be empty, whatever the geometry engine.
    fn check_sites(diagram: &Diagram) -> Result<(), GenerationError> {
        for (b, cell) in diagram.cells.iter().enumerate() {
            if let Some(a) = diagram.cells[..b]
                .iter()
                .position(|c| c.site.distance(&cell.site) <= SITE_EPSILON)
            {
                return Err(GenerationError::CoincidentSites { a, b });
            }
        }
        Ok(())
    }
}

/// [`LevelGenerator`] object.
///
/// Run all the steps, from the random sites to the [`Level`] object.
pub struct LevelGenerator<B: PlanarSubdivisionBuilder = DelaunayVoronoi> {
    /// Generation parameters.
    parameters: LevelParameters,

    /// Geometry engine.
    builder: B,

    /// Number of attempts it took to generate the last level.
    pub attempts: usize,

    /// Total number of site draws for the last level.
    pub draws: usize,

    /// Duration in seconds it took to generate the last level.
    pub duration: f32,
}

impl LevelGenerator<DelaunayVoronoi> {
    /// Create the object with the default geometry engine.
    pub fn new(parameters: LevelParameters) -> Self {
        Self::with_builder(parameters, DelaunayVoronoi::new())
    }
}

impl<B: PlanarSubdivisionBuilder> LevelGenerator<B> {
    /// Create the object with the given geometry engine.
    pub fn with_builder(parameters: LevelParameters, builder: B) -> Self {
        Self {
            parameters,
            builder,
            attempts: 0,
            draws: 0,
            duration: 0.0,
        }
    }

    /// Return the generation parameters.
    pub fn parameters(&self) -> &LevelParameters {
        &self.parameters
    }

    /// Generate a level with the thread random generator.
    pub fn generate(&mut self) -> Result<Level, GenerationError> {
        self.generate_with(&mut rand::rng())
    }

    /// Generate a level with the given random generator.
    ///
    /// # Errors
    ///
    /// [`GenerationError::GenerationFailed`] is returned as soon as the sites cannot be placed.
    /// For the other errors, the generation starts over with new sites, up to
    /// [`LevelParameters::max_level_attempts`] times. The last error is then returned.
    pub fn generate_with<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
    ) -> Result<Level, GenerationError> {
        let start: Instant = Instant::now();
        self.attempts = 0;
        self.draws = 0;

        let res: Result<Level, GenerationError> = self.try_generate(rng);
        self.duration = start.elapsed().as_secs_f32();
        debug!(
            "Attempts = {}  Draws = {}  Duration = {}",
            self.attempts, self.draws, self.duration
        );
        res
    }

    fn try_generate<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<Level, GenerationError> {
        let p: &LevelParameters = &self.parameters;
        let mut sampler: SiteSampler =
            SiteSampler::new(p.width, p.height).with_max_attempts(p.max_attempts_per_site);
        let assembler: LevelAssembler =
            LevelAssembler::new(p.width, p.height).with_border_epsilon(p.border_epsilon);
        let bbox: BoundingBox = BoundingBox::from_size(p.width, p.height);
        let max_attempts: usize = p.max_level_attempts.max(1);
        let (num_sites, min_distance) = (p.num_sites, p.min_distance);

        let mut last_error: GenerationError = GenerationError::EmptyLevel;
        for attempt in 1..=max_attempts {
            self.attempts = attempt;

            let sites: Vec<Point> = sampler.generate(rng, num_sites, min_distance)?;
            self.draws += sampler.iteration;

            let diagram: Diagram = self.builder.compute(&sites, &bbox);
            match assembler.assemble(&diagram) {
                Ok(level) if !level.is_empty() => {
                    info!(
                        "Generated a level with {} cells from {} sites (attempt {attempt})",
                        level.len(),
                        sites.len()
                    );
                    return Ok(level);
                }
                Ok(_) => {
                    warn!("Attempt {attempt}: all the cells touch the border");
                    last_error = GenerationError::EmptyLevel;
                }
                Err(e) => {
                    warn!("Attempt {attempt}: {e}");
                    last_error = e;
                }
            }
        }
        Err(last_error)
    }
}

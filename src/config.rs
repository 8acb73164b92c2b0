/*
config.rs

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

//! Package constants and level generation parameters.
//!
//! The default values give a 600x300 stage split from 40 sites that are at least 20 units
//! apart.
//! The [`LevelParameters`] object can be loaded from a JSON file, for example:
//!
//! ```json
//! {
//!     "width": 800.0,
//!     "height": 400.0,
//!     "num_sites": 60
//! }
//! ```
//!
//! Missing fields take their default value.

use log::debug;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use thiserror::Error;

pub const PKGNAME: &str = env!("CARGO_PKG_NAME");
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const COPYRIGHT_NOTICE: &str = "Copyright 2025 Hervé Quatremain
License GPLv3+: GNU GPL version 3 or later <https://gnu.org/licenses/gpl.html>.
This is free software: you are free to change and redistribute it.
There is NO WARRANTY, to the extent permitted by law.";

/// Width of the playable area.
pub const DEFAULT_WIDTH: f64 = 600.0;

/// Height of the playable area.
pub const DEFAULT_HEIGHT: f64 = 300.0;

/// Number of sites to scatter over the area. Border cells are removed afterward, so the level
/// ends up with fewer cells.
pub const DEFAULT_NUM_SITES: usize = 40;

/// Minimum distance between two sites.
pub const DEFAULT_MIN_DISTANCE: f64 = 20.0;

/// Number of random draws for placing a single site before giving up.
pub const DEFAULT_MAX_ATTEMPTS_PER_SITE: usize = 10_000;

/// Number of complete level generations to try when the diagram is unusable.
pub const DEFAULT_MAX_LEVEL_ATTEMPTS: usize = 8;

/// Tolerance when comparing cell vertexes with the area border.
pub const DEFAULT_BORDER_EPSILON: f64 = 1e-9;

/// Type of errors.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParameterError {
    /// The width or the height is not a positive finite number.
    #[error("invalid area size {width}x{height}")]
    InvalidSize { width: f64, height: f64 },
}

/// Level generation parameters.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct LevelParameters {
    /// Width of the playable area.
    pub width: f64,

    /// Height of the playable area.
    pub height: f64,

    /// Number of sites (cells before border trimming).
    pub num_sites: usize,

    /// Minimum distance between sites. Zero or less disables the constraint.
    pub min_distance: f64,

    /// Maximum number of draws per site.
    pub max_attempts_per_site: usize,

    /// Maximum number of complete generations when the diagram is unusable.
    pub max_level_attempts: usize,

    /// Tolerance for the border test. Zero means exact comparison.
    pub border_epsilon: f64,
}

impl Default for LevelParameters {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            num_sites: DEFAULT_NUM_SITES,
            min_distance: DEFAULT_MIN_DISTANCE,
            max_attempts_per_site: DEFAULT_MAX_ATTEMPTS_PER_SITE,
            max_level_attempts: DEFAULT_MAX_LEVEL_ATTEMPTS,
            border_epsilon: DEFAULT_BORDER_EPSILON,
        }
    }
}

impl LevelParameters {
    /// Parse the parameters from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Load the parameters from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self, Box<dyn Error>> {
        debug!("Loading level parameters from {path:?}");
        let file: File = File::open(path)?;
        let reader: BufReader<File> = BufReader::new(file);
        let parameters: LevelParameters = serde_json::from_reader(reader)?;
        parameters.validate()?;
        Ok(parameters)
    }

    /// Verify that the area size is usable.
    pub fn validate(&self) -> Result<(), ParameterError> {
        let usable = |side: f64| side > 0.0 && side.is_finite();
        if usable(self.width) && usable(self.height) {
            Ok(())
        } else {
            Err(ParameterError::InvalidSize {
                width: self.width,
                height: self.height,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn missing_fields_take_default_values() {
        let p = LevelParameters::from_json(r#"{"num_sites": 12, "width": 100.0}"#).unwrap();
        assert_eq!(p.num_sites, 12);
        assert_eq!(p.width, 100.0);
        assert_eq!(p.height, DEFAULT_HEIGHT);
        assert_eq!(p.min_distance, DEFAULT_MIN_DISTANCE);
        assert_eq!(p.max_level_attempts, DEFAULT_MAX_LEVEL_ATTEMPTS);
    }

    #[test]
    fn empty_object_is_the_default() {
        assert_eq!(
            LevelParameters::from_json("{}").unwrap(),
            LevelParameters::default()
        );
    }

    #[test]
    fn wrong_type_is_rejected() {
        assert!(LevelParameters::from_json(r#"{"num_sites": "many"}"#).is_err());
    }

    #[test]
    fn load_from_file() {
        let mut path = std::env::temp_dir();
        path.push(format!("nabla-config-test-{}.json", std::process::id()));
        {
            let mut f = File::create(&path).unwrap();
            f.write_all(br#"{"height": 250.0, "min_distance": 0.0}"#)
                .unwrap();
        }
        let p = LevelParameters::from_file(&path).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(p.height, 250.0);
        assert_eq!(p.min_distance, 0.0);
        assert_eq!(p.width, DEFAULT_WIDTH);
    }

    #[test]
    fn unusable_sizes_are_rejected() {
        assert!(LevelParameters::default().validate().is_ok());
        for (width, height) in [(f64::INFINITY, 300.0), (600.0, f64::NAN), (0.0, 300.0)] {
            let p = LevelParameters {
                width,
                height,
                ..LevelParameters::default()
            };
            assert!(matches!(
                p.validate(),
                Err(ParameterError::InvalidSize { .. })
            ));
        }
    }

    #[test]
    fn missing_file_is_an_error() {
        let path = Path::new("/nonexistent/nabla/parameters.json");
        assert!(LevelParameters::from_file(path).is_err());
    }
}

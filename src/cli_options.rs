/*
cli_options.rs

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

//! Process command-line options.
//!
//! These options are intended for developers tuning the level generator.
//! The command generates levels and prints them, either as a short description or as JSON that
//! a renderer can load.
//!
//! # Examples
//!
//! Generate a level with a fixed seed:
//!
//! ```text
//! $ nabla -s 42
//! Level 1: 14 cells, 31 adjacent pairs
//!   0 (215.3, 112.8) 6 vertexes --> 1 3 4 7
//!   1 (251.0, 98.6) 5 vertexes --> 0 2 4
//! ...
//! ```
//!
//! Generate three larger levels as JSON, and print some statistics:
//!
//! ```text
//! $ nabla -W 800 -H 400 -n 60 -c 3 -f json --summary
//! ```

use clap::{Parser, ValueEnum};
use log::debug;
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::env;
use std::path::PathBuf;

use crate::config::{COPYRIGHT_NOTICE, LevelParameters};
use crate::generator::GenerationError;
use crate::generator::assembler::LevelGenerator;
use crate::level::Level;

/// Output format.
#[derive(ValueEnum, Debug, Copy, Clone, PartialEq, Eq)]
pub enum OutputFormat {
    /// One line per cell
    Summary,

    /// JSON array of levels
    Json,
}

/// Generate random Nabla levels for developers.
#[derive(Parser, Debug)]
#[command(about, long_about = None, version, long_version = COPYRIGHT_NOTICE)]
struct Args {
    /// Width of the playable area
    #[arg(short = 'W', long)]
    width: Option<f64>,

    /// Height of the playable area
    #[arg(short = 'H', long)]
    height: Option<f64>,

    /// Number of sites
    #[arg(short = 'n', long)]
    sites: Option<usize>,

    /// Minimum distance between two sites
    #[arg(short, long)]
    min_distance: Option<f64>,

    /// Seed for the random generator
    #[arg(short, long)]
    seed: Option<u64>,

    /// Number of levels to generate
    #[arg(short, long, default_value_t = 1)]
    count: usize,

    /// Output format
    #[arg(value_enum, short, long, default_value_t = OutputFormat::Summary)]
    format: OutputFormat,

    /// JSON file with the generation parameters
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print some statistics after generating the levels
    #[arg(long, default_value_t = false)]
    summary: bool,

    /// Enable debug messages
    #[arg(short, long, default_value_t = false)]
    debug: bool,
}

impl Args {
    /// Override the parameters with the options given on the command line.
    fn apply_overrides(&self, parameters: &mut LevelParameters) {
        if let Some(w) = self.width {
            parameters.width = w;
        }
        if let Some(h) = self.height {
            parameters.height = h;
        }
        if let Some(n) = self.sites {
            parameters.num_sites = n;
        }
        if let Some(d) = self.min_distance {
            parameters.min_distance = d;
        }
    }

    /// Build the generation parameters from the configuration file and the options.
    fn parameters(&self) -> Result<LevelParameters, Box<dyn std::error::Error>> {
        let mut parameters: LevelParameters = match &self.config {
            Some(path) => LevelParameters::from_file(path)?,
            None => LevelParameters::default(),
        };
        self.apply_overrides(&mut parameters);
        parameters.validate()?;
        Ok(parameters)
    }
}

/// Return a short description of the level: one line for the level, and one line per cell.
pub fn describe(level: &Level) -> String {
    let pairs: usize = level
        .cells()
        .iter()
        .map(|c| c.neighbours.len())
        .sum::<usize>()
        / 2;
    let mut s: String = format!("{} cells, {} adjacent pairs\n", level.len(), pairs);
    for cell in level.cells() {
        s.push_str(&format!(
            "{:>3} ({:.1}, {:.1}) {} vertexes -->",
            cell.id,
            cell.site.x,
            cell.site.y,
            cell.vertices.len()
        ));
        for n in &cell.neighbours {
            s.push_str(&format!(" {n}"));
        }
        s.push('\n');
    }
    s
}

/// Parse and process command-line options, and return the exit code.
pub fn parse() -> u8 {
    let args: Args = Args::parse();

    if args.debug {
        unsafe {
            env::set_var("RUST_LOG", "debug");
        }
    }
    env_logger::init();

    let parameters: LevelParameters = match args.parameters() {
        Ok(p) => p,
        Err(e) => {
            eprintln!("Error: invalid generation parameters: {e}");
            return 1;
        }
    };
    debug!("{parameters:?}");

    let mut rng: StdRng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };
    let mut generator: LevelGenerator = LevelGenerator::new(parameters);

    let mut levels: Vec<Level> = Vec::with_capacity(args.count);
    let mut total: f32 = 0.0;
    let mut max: f32 = 0.0;
    let mut attempts: usize = 0;
    let mut draws: usize = 0;
    for i in 0..args.count {
        debug!("Level {i}");

        let ret: Result<Level, GenerationError> = generator.generate_with(&mut rng);
        total += generator.duration;
        if generator.duration > max {
            max = generator.duration;
        }
        attempts += generator.attempts;
        draws += generator.draws;

        match ret {
            Ok(level) => {
                if args.format == OutputFormat::Summary {
                    print!("Level {}: {}", i + 1, describe(&level));
                }
                levels.push(level);
            }
            Err(e) => {
                eprintln!("Error: cannot generate level {}: {e}", i + 1);
                return 1;
            }
        }
    }

    if args.format == OutputFormat::Json {
        match serde_json::to_string_pretty(&levels) {
            Ok(s) => println!("{s}"),
            Err(e) => {
                eprintln!("Error: {e}");
                return 1;
            }
        }
    }

    // Print some stats
    if args.summary && args.count > 0 {
        eprintln!(
            "
        total time = {}s
      average time = {}s
          max time = {}s
  average attempts = {}
     average draws = {}",
            total,
            total / args.count as f32,
            max,
            attempts as f32 / args.count as f32,
            draws / args.count,
        );
    }
    0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn options_override_the_defaults() {
        let args = Args::try_parse_from(["nabla", "-W", "800", "-n", "12", "--min-distance", "5"])
            .unwrap();
        let p = args.parameters().unwrap();
        assert_eq!(p.width, 800.0);
        assert_eq!(p.height, LevelParameters::default().height);
        assert_eq!(p.num_sites, 12);
        assert_eq!(p.min_distance, 5.0);
        assert_eq!(args.count, 1);
        assert_eq!(args.format, OutputFormat::Summary);
    }

    #[test]
    fn json_format_and_seed() {
        let args = Args::try_parse_from(["nabla", "-f", "json", "-s", "7", "-c", "3"]).unwrap();
        assert_eq!(args.format, OutputFormat::Json);
        assert_eq!(args.seed, Some(7));
        assert_eq!(args.count, 3);
    }

    #[test]
    fn infinite_size_is_an_error() {
        let args = Args::try_parse_from(["nabla", "-W", "inf"]).unwrap();
        assert!(args.parameters().is_err());
        let args = Args::try_parse_from(["nabla", "-H", "0"]).unwrap();
        assert!(args.parameters().is_err());
    }

    #[test]
    fn missing_config_file_is_an_error() {
        let args = Args::try_parse_from(["nabla", "--config", "/nonexistent/nabla.json"]).unwrap();
        assert!(args.parameters().is_err());
    }

    #[test]
    fn describe_a_level() {
        let level = Level::from_graph(&[&[1], &[0, 2], &[1]]);
        let s = describe(&level);
        let lines: Vec<&str> = s.lines().collect();
        assert_eq!(lines[0], "3 cells, 2 adjacent pairs");
        assert_eq!(lines[2], "  1 (3.5, 1.5) 4 vertexes --> 0 2");
    }
}

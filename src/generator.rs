/*
generator.rs

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

//! Generate random map levels.
//!
//! A level is built in several steps:
//!
//! * [`sites::SiteSampler`] scatters random sites over the area, keeping a minimum distance
//!   between them.
//!   If a site cannot be placed after a number of draws, then the method returns an error.
//!
//! * An object implementing [`diagram::PlanarSubdivisionBuilder`] computes the Voronoi diagram
//!   of these sites: one cell per site, bounded by half-edges.
//!   The application uses [`voronoi::DelaunayVoronoi`].
//!
//! * [`cell_filter::CellFilter`] discards the cells that touch the border of the area, and
//!   gives the remaining cells new consecutive identifiers.
//!
//! * [`adjacency::AdjacencyGraph`] collects the neighbors of each remaining cell, and verifies
//!   that the relation is symmetric.
//!
//! * [`boundary`] converts the half-edges of each cell into a polygon.
//!
//! [`assembler::LevelAssembler`] runs the last three steps and returns a
//! [`crate::level::Level`] object.
//! [`assembler::LevelGenerator`] runs all the steps, and starts over with new sites when the
//! diagram is not usable.

pub mod adjacency;
pub mod assembler;
pub mod boundary;
pub mod cell_filter;
pub mod diagram;
pub mod sites;
pub mod voronoi;

use thiserror::Error;

/// Type of errors.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GenerationError {
    /// The sites could not be placed with the requested minimum distance.
    #[error("only {placed} of {requested} sites could be placed")]
    GenerationFailed { placed: usize, requested: usize },

    /// A cell polygon has less than three distinct vertexes.
    #[error("cell {cell} has only {vertices} distinct vertexes")]
    DegenerateDiagram { cell: usize, vertices: usize },

    /// Two sites are at the same position.
    #[error("sites {a} and {b} are at the same position")]
    CoincidentSites { a: usize, b: usize },

    /// A cell lists a neighbor that does not list it back.
    #[error("cell {b} is a neighbour of cell {a}, but not the other way around")]
    AsymmetricAdjacency { a: usize, b: usize },

    /// A cell lists itself as a neighbor.
    #[error("cell {cell} is its own neighbour")]
    SelfAdjacency { cell: usize },

    /// All the cells touch the border.
    #[error("no cell is away from the border")]
    EmptyLevel,
}

impl GenerationError {
    /// Whether generating the level again with new sites might succeed.
    ///
    /// When the sites cannot be placed, trying again with the same parameters is likely to fail
    /// again.
    pub fn is_retryable(&self) -> bool {
        !matches!(self, GenerationError::GenerationFailed { .. })
    }
}

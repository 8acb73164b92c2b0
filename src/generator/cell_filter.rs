/*
cell_filter.rs

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

//! Remove the cells that touch the border of the playable area.
//!
//! A cell is unusable when one of its edges has no site on one side (the edge is on the frame),
//! or when an edge endpoint is on the border of the area.
//! The remaining cells are fully inside the area and have a neighbor across each of their
//! edges.

use log::debug;

use super::diagram::{Diagram, DiagramCell, Point};
use crate::config::DEFAULT_BORDER_EPSILON;

/// [`CellFilter`] object.
pub struct CellFilter {
    /// Width of the area.
    width: f64,

    /// Height of the area.
    height: f64,

    /// Tolerance for comparing coordinates with the border.
    epsilon: f64,
}

impl CellFilter {
    /// Create the object.
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            epsilon: DEFAULT_BORDER_EPSILON,
        }
    }

    /// Change the tolerance for the border test. Zero means exact comparison.
    pub fn with_epsilon(mut self, epsilon: f64) -> Self {
        self.epsilon = epsilon.max(0.0);
        self
    }

    /// Whether the point is on the border of the area.
    pub fn on_border(&self, p: &Point) -> bool {
        p.x.abs() <= self.epsilon
            || p.y.abs() <= self.epsilon
            || (p.x - self.width).abs() <= self.epsilon
            || (p.y - self.height).abs() <= self.epsilon
    }

    /// Whether the cell is away from the border.
    pub fn is_usable(&self, diagram: &Diagram, cell: &DiagramCell) -> bool {
        if cell.halfedges.is_empty() {
            return false;
        }
        cell.halfedges.iter().all(|h| match diagram.edge(h) {
            Some(edge) => {
                !edge.on_frame() && !self.on_border(&edge.va) && !self.on_border(&edge.vb)
            }
            None => false,
        })
    }

    /// Assign dense identifiers to the usable cells.
    ///
    /// Return, for each cell of the diagram, its new identifier or [`None`] if the cell is
    /// discarded. Identifiers follow the order of the diagram cells.
    pub fn renumber(&self, diagram: &Diagram) -> Vec<Option<usize>> {
        let mut next_id: usize = 0;
        let new_ids: Vec<Option<usize>> = diagram
            .cells
            .iter()
            .map(|cell| {
                if self.is_usable(diagram, cell) {
                    next_id += 1;
                    Some(next_id - 1)
                } else {
                    None
                }
            })
            .collect();
        debug!(
            "Keeping {next_id} cells out of {} after border trimming",
            diagram.cells.len()
        );
        new_ids
    }
}

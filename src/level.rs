/*
level.rs

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

//! Level representation: the map cells, their polygons, and their neighbors.
//!
//! A [`Level`] is built once by the level generator (see [`crate::generator`]) and is not
//! modified afterward, except for the cell colors.
//! Only the game session ([`crate::game::Game`]) changes the colors.
//!
//! Cells are stored in a vector indexed by their identifier, and neighbors are stored as
//! identifiers, never as references to other cells.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use strum_macros::FromRepr;

use crate::generator::diagram::Point;

/// Number of colors available to the player.
pub const NUM_COLORS: u8 = 4;

/// Cell colors, in the order the player cycles through them.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq, Hash, Default, FromRepr)]
#[repr(u8)]
pub enum Color {
    #[default]
    Red,
    Yellow,
    Cyan,
    Green,
}

impl Color {
    /// Return the next color in the cycle. The last color wraps around to the first one.
    pub fn next(self) -> Self {
        Color::from_repr((self as u8 + 1) % NUM_COLORS).unwrap_or_default()
    }

    /// Color index, from 0 to 3.
    pub fn index(self) -> u8 {
        self as u8
    }
}

/// Map cell.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Cell {
    /// Identifier, between 0 and the number of cells minus one.
    pub id: usize,

    /// Site that generated the cell. The renderer uses it as the cell center.
    pub site: Point,

    /// Closed polygon. The last vertex connects back to the first one.
    pub vertices: Vec<Point>,

    /// Identifiers of the adjacent cells.
    pub neighbours: BTreeSet<usize>,

    /// Color that the player assigned to the cell, if any.
    pub color: Option<Color>,
}

/// Map of cells for one level.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct Level {
    /// Width of the playable area.
    pub width: f64,

    /// Height of the playable area.
    pub height: f64,

    /// Cells, indexed by their identifier.
    cells: Vec<Cell>,
}

impl Level {
    /// Create a [`Level`] object from cells already sorted by identifier.
    pub fn new(width: f64, height: f64, cells: Vec<Cell>) -> Self {
        Self {
            width,
            height,
            cells,
        }
    }

    /// Return the cells.
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Return the cell with the given identifier.
    pub fn get(&self, cell_id: usize) -> Option<&Cell> {
        self.cells.get(cell_id)
    }

    /// Number of cells.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Whether the level has no cell.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Return the color of the given cell.
    pub fn color(&self, cell_id: usize) -> Option<Color> {
        self.cells.get(cell_id).and_then(|c| c.color)
    }

    /// Set the color of the given cell and return the previous color.
    ///
    /// Return [`None`] if the cell does not exist.
    pub(crate) fn set_color(
        &mut self,
        cell_id: usize,
        color: Option<Color>,
    ) -> Option<Option<Color>> {
        self.cells
            .get_mut(cell_id)
            .map(|c| std::mem::replace(&mut c.color, color))
    }

    /// Remove the color from all the cells.
    pub(crate) fn clear_colors(&mut self) {
        for cell in &mut self.cells {
            cell.color = None;
        }
    }

    /// Build a level from neighbor lists, with a unit square for each cell.
    ///
    /// The squares are laid out in a row. They are only meant for exercising the game logic.
    #[cfg(test)]
    pub(crate) fn from_graph(lists: &[&[usize]]) -> Self {
        let cells: Vec<Cell> = lists
            .iter()
            .enumerate()
            .map(|(id, neighbours)| {
                let x: f64 = id as f64 * 2.0 + 1.0;
                Cell {
                    id,
                    site: Point::new(x + 0.5, 1.5),
                    vertices: vec![
                        Point::new(x, 1.0),
                        Point::new(x + 1.0, 1.0),
                        Point::new(x + 1.0, 2.0),
                        Point::new(x, 2.0),
                    ],
                    neighbours: neighbours.iter().copied().collect(),
                    color: None,
                }
            })
            .collect();
        Self::new(lists.len() as f64 * 2.0 + 1.0, 3.0, cells)
    }
}

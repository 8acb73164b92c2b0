/*
locator.rs

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

//! Find the cell under a point.

use crate::generator::diagram::Point;
use crate::level::Cell;

/// Whether the point is inside the polygon (even-odd rule).
///
/// Points exactly on a side might be reported either inside or outside.
pub fn point_in_polygon(point: &Point, vertices: &[Point]) -> bool {
    let (x, y) = (point.x, point.y);
    let mut inside: bool = false;
    let mut j: usize = vertices.len().wrapping_sub(1);

    for (i, vi) in vertices.iter().enumerate() {
        let vj: &Point = &vertices[j];
        if (vi.y > y) != (vj.y > y) && x < (vj.x - vi.x) * (y - vi.y) / (vj.y - vi.y) + vi.x {
            inside = !inside;
        }
        j = i;
    }
    inside
}

/// Return the identifier of the first cell that contains the point, or [`None`].
pub fn locate(point: &Point, cells: &[Cell]) -> Option<usize> {
    cells
        .iter()
        .find(|c| point_in_polygon(point, &c.vertices))
        .map(|c| c.id)
}

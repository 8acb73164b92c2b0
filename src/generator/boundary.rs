/*
boundary.rs

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

//! Convert the half-edge boundary of a cell into a polygon.
//!
//! The polygon is the start point of the first half-edge followed by the end point of every
//! half-edge, in the order the geometry engine returned them.
//! For a closed boundary, the last point is therefore the same as the first one.
//! The half-edges are not sorted: the engine must return them in boundary-walk order.

use super::GenerationError;
use super::diagram::{DiagramCell, Point};

/// Two vertexes closer than this are considered the same.
const EPSILON: f64 = 1e-9;

/// Return the polygon for the given cell, or an empty vector if the cell has no half-edge.
pub fn polygon(cell: &DiagramCell) -> Vec<Point> {
    let Some(first) = cell.halfedges.first() else {
        return Vec::new();
    };
    let mut vertices: Vec<Point> = Vec::with_capacity(cell.halfedges.len() + 1);
    vertices.push(first.start);
    vertices.extend(cell.halfedges.iter().map(|h| h.end));
    vertices
}

/// Number of distinct points in the list.
pub fn distinct_vertices(vertices: &[Point]) -> usize {
    let mut distinct: Vec<&Point> = Vec::with_capacity(vertices.len());
    for v in vertices {
        if !distinct.iter().any(|d| d.distance(v) <= EPSILON) {
            distinct.push(v);
        }
    }
    distinct.len()
}

/// Return the polygon for the given cell, after verifying that it has at least three distinct
/// vertexes.
///
/// `cell_id` is only used for reporting the error.
///
/// # Errors
///
/// Return [`GenerationError::DegenerateDiagram`] for a polygon with less than three distinct
/// vertexes.
pub fn validated_polygon(
    cell_id: usize,
    cell: &DiagramCell,
) -> Result<Vec<Point>, GenerationError> {
    let vertices: Vec<Point> = polygon(cell);
    let distinct: usize = distinct_vertices(&vertices);
    if distinct < 3 {
        return Err(GenerationError::DegenerateDiagram {
            cell: cell_id,
            vertices: distinct,
        });
    }
    Ok(vertices)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::diagram::HalfEdge;

    fn cell_from_points(points: &[(f64, f64)]) -> DiagramCell {
        let n = points.len();
        DiagramCell {
            site: Point::default(),
            halfedges: (0..n)
                .map(|k| HalfEdge {
                    edge: k,
                    start: Point::new(points[k].0, points[k].1),
                    end: Point::new(points[(k + 1) % n].0, points[(k + 1) % n].1),
                })
                .collect(),
        }
    }

    #[test]
    fn polygon_follows_the_halfedges() {
        let cell = cell_from_points(&[(1.0, 1.0), (4.0, 1.0), (4.0, 3.0)]);
        assert_eq!(
            polygon(&cell),
            vec![
                Point::new(1.0, 1.0),
                Point::new(4.0, 1.0),
                Point::new(4.0, 3.0),
                Point::new(1.0, 1.0),
            ]
        );
        assert_eq!(validated_polygon(0, &cell).unwrap().len(), 4);
    }

    #[test]
    fn stored_order_is_kept() {
        // Half-edges out of walk order are not reordered
        let mut cell = cell_from_points(&[(0.0, 0.0), (2.0, 0.0), (2.0, 2.0), (0.0, 2.0)]);
        cell.halfedges.swap(1, 2);
        let p = polygon(&cell);
        assert_eq!(p[1], Point::new(2.0, 0.0));
        assert_eq!(p[2], Point::new(0.0, 2.0));
        assert_eq!(p[3], Point::new(2.0, 2.0));
    }

    #[test]
    fn empty_cell_is_degenerate() {
        let cell = DiagramCell {
            site: Point::default(),
            halfedges: Vec::new(),
        };
        assert!(polygon(&cell).is_empty());
        assert_eq!(
            validated_polygon(3, &cell),
            Err(GenerationError::DegenerateDiagram {
                cell: 3,
                vertices: 0
            })
        );
    }

    #[test]
    fn flat_cell_is_degenerate() {
        let cell = cell_from_points(&[(1.0, 1.0), (2.0, 2.0)]);
        assert_eq!(
            validated_polygon(1, &cell),
            Err(GenerationError::DegenerateDiagram {
                cell: 1,
                vertices: 2
            })
        );
    }

    #[test]
    fn repeated_points_count_once() {
        let points = [
            Point::new(0.0, 0.0),
            Point::new(0.0, 0.0),
            Point::new(1.0, 0.0),
            Point::new(1.0, 1e-12),
        ];
        assert_eq!(distinct_vertices(&points), 2);
    }
}

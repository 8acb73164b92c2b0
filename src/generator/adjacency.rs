/*
adjacency.rs

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

//! Neighbor graph between the cells kept in the level.

use log::debug;
use std::collections::BTreeSet;

use super::GenerationError;
use super::diagram::Diagram;

/// Represent the adjacency graph of the level cells.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AdjacencyGraph {
    /// For each cell, indexed by its new identifier, the identifiers of the adjacent cells.
    neighbours: Vec<BTreeSet<usize>>,
}

impl AdjacencyGraph {
    /// Build the graph from the diagram.
    ///
    /// `new_ids` gives, for each diagram cell, its identifier in the level, or [`None`] if the
    /// cell has been discarded (see [`super::cell_filter::CellFilter::renumber`]).
    /// Only neighbors that are also kept in the level are recorded.
    pub fn build(diagram: &Diagram, new_ids: &[Option<usize>]) -> Self {
        let num_cells: usize = new_ids.iter().flatten().count();
        let mut neighbours: Vec<BTreeSet<usize>> = vec![BTreeSet::new(); num_cells];

        for (i, cell) in diagram.cells.iter().enumerate() {
            let Some(Some(id)) = new_ids.get(i) else {
                continue;
            };
            for halfedge in &cell.halfedges {
                let Some(other) = diagram.edge(halfedge).and_then(|e| e.opposite_site(i)) else {
                    continue;
                };
                if let Some(Some(other_id)) = new_ids.get(other) {
                    neighbours[*id].insert(*other_id);
                }
            }
        }
        Self { neighbours }
    }

    /// Build the graph from neighbor lists.
    pub fn from_lists(lists: &[&[usize]]) -> Self {
        Self {
            neighbours: lists.iter().map(|l| l.iter().copied().collect()).collect(),
        }
    }

    /// Number of cells in the graph.
    pub fn len(&self) -> usize {
        self.neighbours.len()
    }

    /// Whether the graph has no cell.
    pub fn is_empty(&self) -> bool {
        self.neighbours.is_empty()
    }

    /// Return the neighbors of the given cell.
    pub fn get(&self, cell_id: usize) -> Option<&BTreeSet<usize>> {
        self.neighbours.get(cell_id)
    }

    /// Verify that no cell is its own neighbor, and that the relation is symmetric.
    ///
    /// # Errors
    ///
    /// [`GenerationError::SelfAdjacency`] or [`GenerationError::AsymmetricAdjacency`] for the
    /// first offending cell.
    pub fn verify(&self) -> Result<(), GenerationError> {
        for (a, list) in self.neighbours.iter().enumerate() {
            for &b in list {
                if a == b {
                    return Err(GenerationError::SelfAdjacency { cell: a });
                }
                if !self.neighbours.get(b).is_some_and(|other| other.contains(&a)) {
                    return Err(GenerationError::AsymmetricAdjacency { a, b });
                }
            }
        }
        Ok(())
    }

    /// Consume the graph and return the neighbor sets.
    pub fn into_inner(self) -> Vec<BTreeSet<usize>> {
        self.neighbours
    }

    /// Print the graph.
    pub fn debug(&self) {
        let mut s: String = String::new();
        for (id, list) in self.neighbours.iter().enumerate() {
            s.clear();
            s.push_str(&format!("{id:>3} -->"));
            for n in list {
                s.push_str(&format!(" {n}"));
            }
            debug!("{s}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::cell_filter::tests::push_cell;
    use crate::generator::diagram::Point;

    /// Four triangles around the center of a square, with a ring of frame cells around them.
    /// Only the sides between the triangles matter: cells 0 to 3 are the triangles, and 4 stands
    /// for a discarded outer cell.
    fn pinwheel() -> Diagram {
        let c = Point::new(5.0, 5.0);
        let nw = Point::new(2.0, 2.0);
        let ne = Point::new(8.0, 2.0);
        let se = Point::new(8.0, 8.0);
        let sw = Point::new(2.0, 8.0);
        let mut d = Diagram::default();
        push_cell(&mut d, Point::new(5.0, 3.0), &[(nw, Some(4)), (ne, Some(1)), (c, Some(3))]);
        push_cell(&mut d, Point::new(7.0, 5.0), &[(ne, Some(4)), (se, Some(2)), (c, Some(0))]);
        push_cell(&mut d, Point::new(5.0, 7.0), &[(se, Some(4)), (sw, Some(3)), (c, Some(1))]);
        push_cell(&mut d, Point::new(3.0, 5.0), &[(sw, Some(4)), (nw, Some(0)), (c, Some(2))]);
        push_cell(
            &mut d,
            Point::new(0.5, 0.5),
            &[
                (Point::new(0.0, 0.0), None),
                (Point::new(1.0, 0.0), None),
                (Point::new(1.0, 1.0), None),
            ],
        );
        d
    }

    #[test]
    fn neighbours_of_kept_cells() {
        let d = pinwheel();
        let new_ids = [Some(0), Some(1), Some(2), Some(3), None];
        let graph = AdjacencyGraph::build(&d, &new_ids);

        assert_eq!(graph.len(), 4);
        assert_eq!(graph.get(0).unwrap(), &BTreeSet::from([1, 3]));
        assert_eq!(graph.get(1).unwrap(), &BTreeSet::from([0, 2]));
        assert_eq!(graph.get(2).unwrap(), &BTreeSet::from([1, 3]));
        assert_eq!(graph.get(3).unwrap(), &BTreeSet::from([0, 2]));
        assert!(graph.verify().is_ok());
    }

    #[test]
    fn discarded_cells_are_not_neighbours() {
        let d = pinwheel();
        // Drop cell 1: cells 2 and 3 are renumbered 1 and 2
        let new_ids = [Some(0), None, Some(1), Some(2), None];
        let graph = AdjacencyGraph::build(&d, &new_ids);

        assert_eq!(graph.len(), 3);
        assert_eq!(graph.get(0).unwrap(), &BTreeSet::from([2]));
        assert_eq!(graph.get(1).unwrap(), &BTreeSet::from([2]));
        assert_eq!(graph.get(2).unwrap(), &BTreeSet::from([0, 1]));
        assert!(graph.verify().is_ok());
    }

    #[test]
    fn asymmetric_graph_is_detected() {
        let graph = AdjacencyGraph::from_lists(&[&[1, 2], &[0], &[]]);
        assert_eq!(
            graph.verify(),
            Err(GenerationError::AsymmetricAdjacency { a: 0, b: 2 })
        );
    }

    #[test]
    fn neighbour_out_of_range_is_detected() {
        let graph = AdjacencyGraph::from_lists(&[&[5]]);
        assert_eq!(
            graph.verify(),
            Err(GenerationError::AsymmetricAdjacency { a: 0, b: 5 })
        );
    }

    #[test]
    fn self_neighbour_is_detected() {
        let graph = AdjacencyGraph::from_lists(&[&[0]]);
        assert_eq!(
            graph.verify(),
            Err(GenerationError::SelfAdjacency { cell: 0 })
        );
    }
}

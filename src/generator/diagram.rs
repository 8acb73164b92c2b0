/*
diagram.rs

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

//! Planar subdivision (Voronoi-style diagram) as produced by a geometry engine.
//!
//! The level generator does not compute the subdivision itself.
//! It asks an object implementing the [`PlanarSubdivisionBuilder`] trait for a [`Diagram`], and
//! then only reads the cells, their boundary half-edges, and the edges they belong to.
//! This way, tests can feed hand-built diagrams to the generator.
//! See [`crate::generator::voronoi::DelaunayVoronoi`] for the engine used by the application.

use serde::{Deserialize, Serialize};

/// Point in the level coordinate space.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, Default, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    /// Create a [`Point`] object.
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance between the two points.
    pub fn distance(&self, other: &Point) -> f64 {
        ((self.x - other.x) * (self.x - other.x) + (self.y - other.y) * (self.y - other.y)).sqrt()
    }
}

/// Rectangle that bounds the subdivision.
///
/// The field names follow the usual Voronoi library convention: `xl` and `xr` are the left and
/// right sides, `yt` and `yb` the top and bottom sides (the y axis points down).
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq)]
pub struct BoundingBox {
    pub xl: f64,
    pub xr: f64,
    pub yt: f64,
    pub yb: f64,
}

impl BoundingBox {
    /// Bounding box for an area of the given size, with its origin at `(0, 0)`.
    pub fn from_size(width: f64, height: f64) -> Self {
        Self {
            xl: 0.0,
            xr: width,
            yt: 0.0,
            yb: height,
        }
    }

    /// Area of the rectangle.
    pub fn area(&self) -> f64 {
        (self.xr - self.xl) * (self.yb - self.yt)
    }
}

/// Segment shared by at most two cells.
///
/// `left_site` and `right_site` are indexes into [`Diagram::cells`].
/// A side is [`None`] when the edge lies on the bounding box frame.
#[derive(Debug, Clone, PartialEq)]
pub struct Edge {
    pub left_site: Option<usize>,
    pub right_site: Option<usize>,
    pub va: Point,
    pub vb: Point,
}

impl Edge {
    /// Return the site on the other side of the edge, seen from the given site.
    ///
    /// Return [`None`] if the edge is on the frame, or if `site` is on neither side.
    pub fn opposite_site(&self, site: usize) -> Option<usize> {
        if self.left_site == Some(site) {
            self.right_site
        } else if self.right_site == Some(site) {
            self.left_site
        } else {
            None
        }
    }

    /// Whether one of the sides of the edge has no site.
    pub fn on_frame(&self) -> bool {
        self.left_site.is_none() || self.right_site.is_none()
    }
}

/// Directed boundary segment of a cell.
#[derive(Debug, Clone, PartialEq)]
pub struct HalfEdge {
    /// Index of the edge in [`Diagram::edges`].
    pub edge: usize,

    /// Where the boundary walk enters the segment.
    pub start: Point,

    /// Where the boundary walk leaves the segment.
    pub end: Point,
}

/// Cell of the diagram, one per input site.
#[derive(Debug, Clone, PartialEq)]
pub struct DiagramCell {
    pub site: Point,

    /// Boundary half-edges, in boundary-walk order.
    pub halfedges: Vec<HalfEdge>,
}

/// Result of a subdivision computation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Diagram {
    /// One cell per input site, in input order.
    pub cells: Vec<DiagramCell>,

    /// All the edges referenced by the cells' half-edges.
    pub edges: Vec<Edge>,
}

impl Diagram {
    /// Return the edge referenced by the given half-edge.
    pub fn edge(&self, halfedge: &HalfEdge) -> Option<&Edge> {
        self.edges.get(halfedge.edge)
    }
}

/// Geometry engine that partitions a bounding box into one cell per site.
///
/// Implementations must return one [`DiagramCell`] per site, in the order of `sites`, with
/// closed, non-overlapping boundaries. Two adjacent cells must reference each other's site on
/// the opposite sides of their shared [`Edge`].
pub trait PlanarSubdivisionBuilder {
    fn compute(&self, sites: &[Point], bbox: &BoundingBox) -> Diagram;
}

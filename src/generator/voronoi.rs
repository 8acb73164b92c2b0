/*
voronoi.rs

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


//! Voronoi diagram built on a Delaunay triangulation.
//!
//! The sites are inserted into a [`spade`] Delaunay triangulation. Two sites share a Voronoi
//! edge only if they are joined by a Delaunay edge, so the cell of a site is the bounding box
//! clipped by the perpendicular bisector with each of its Delaunay neighbors.
//! Clipping the box, instead of walking the Voronoi vertexes, also closes the unbounded cells
//! on the hull.
//!
//! While clipping, each side of the polygon remembers what produced it: the bounding frame or
//! the Delaunay edge to another site. That label becomes the site on the other side of the edge.

use log::warn;
use spade::handles::{FixedUndirectedEdgeHandle, FixedVertexHandle};
use spade::{DelaunayTriangulation, Point2, Triangulation};
use std::collections::HashMap;

use super::diagram::{
    BoundingBox, Diagram, DiagramCell, Edge, HalfEdge, PlanarSubdivisionBuilder, Point,
};

/// Polygon sides shorter than this are removed.
const EPSILON: f64 = 1e-9;

/// What is on the other side of a polygon side.
#[derive(Debug, Copy, Clone, PartialEq)]
enum Side {
    Frame,
    Delaunay {
        site: usize,
        edge: FixedUndirectedEdgeHandle,
    },
}

/// Polygon vertex, with the label of the side that starts at the vertex.
type LabeledVertex = (Point, Side);

/// Triangulation of the sites.
struct Triangulated {
    triangulation: DelaunayTriangulation<Point2<f64>>,

    /// For each site, its vertex in the triangulation, or [`None`] if the site could not be
    /// inserted or if an earlier site already has the same position.
    vertex_of: Vec<Option<FixedVertexHandle>>,

    /// Site that owns each vertex.
    site_of: HashMap<FixedVertexHandle, usize>,
}

impl Triangulated {
    fn new(sites: &[Point]) -> Self {
        let mut triangulation: DelaunayTriangulation<Point2<f64>> = DelaunayTriangulation::new();
        let mut vertex_of: Vec<Option<FixedVertexHandle>> = Vec::with_capacity(sites.len());
        let mut site_of: HashMap<FixedVertexHandle, usize> = HashMap::new();

        for (i, site) in sites.iter().enumerate() {
            match triangulation.insert(Point2::new(site.x, site.y)) {
                Ok(v) => {
                    // spade merges vertexes at the same position
                    if let Some(k) = site_of.get(&v) {
                        warn!("Site {i} is at the same position as site {k}");
                        vertex_of.push(None);
                    } else {
                        site_of.insert(v, i);
                        vertex_of.push(Some(v));
                    }
                }
                Err(e) => {
                    warn!("Cannot insert site {i} ({}, {}): {e:?}", site.x, site.y);
                    vertex_of.push(None);
                }
            }
        }
        Self {
            triangulation,
            vertex_of,
            site_of,
        }
    }

    /// Return the polygon of the cell for the site `i`.
    ///
    /// The polygon is empty for a site that is not in the triangulation.
    fn cell_polygon(&self, i: usize, sites: &[Point], bbox: &BoundingBox) -> Vec<LabeledVertex> {
        let Some(v) = self.vertex_of[i] else {
            return Vec::new();
        };
        let mut polygon: Vec<LabeledVertex> = vec![
            (Point::new(bbox.xl, bbox.yt), Side::Frame),
            (Point::new(bbox.xr, bbox.yt), Side::Frame),
            (Point::new(bbox.xr, bbox.yb), Side::Frame),
            (Point::new(bbox.xl, bbox.yb), Side::Frame),
        ];
        let si: Point = sites[i];

        for edge in self.triangulation.vertex(v).out_edges() {
            if polygon.is_empty() {
                break;
            }
            let Some(&j) = self.site_of.get(&edge.to().fix()) else {
                continue;
            };
            let sj: Point = sites[j];
            let dx: f64 = sj.x - si.x;
            let dy: f64 = sj.y - si.y;
            let mx: f64 = (si.x + sj.x) / 2.0;
            let my: f64 = (si.y + sj.y) / 2.0;

            // Negative on the side of site i
            let signed_distance = |p: &Point| (p.x - mx) * dx + (p.y - my) * dy;
            let side: Side = Side::Delaunay {
                site: j,
                edge: edge.as_undirected().fix(),
            };
            polygon = clip(&polygon, signed_distance, side);
        }
        collapse(&polygon)
    }
}

/// Sutherland-Hodgman clipping of a convex polygon against one half-plane.
///
/// Vertexes with `signed_distance(p) <= 0` are kept. The new side that the clipping line
/// creates is labelled with `side`.
fn clip<F>(polygon: &[LabeledVertex], signed_distance: F, side: Side) -> Vec<LabeledVertex>
where
    F: Fn(&Point) -> f64,
{
    let n: usize = polygon.len();
    let mut clipped: Vec<LabeledVertex> = Vec::with_capacity(n + 1);

    for k in 0..n {
        let (p, p_side) = polygon[k];
        let q: Point = polygon[(k + 1) % n].0;
        let fp: f64 = signed_distance(&p);
        let fq: f64 = signed_distance(&q);

        match (fp <= 0.0, fq <= 0.0) {
            (true, true) => clipped.push((p, p_side)),
            // Leaving the half-plane: the rest of the boundary follows the clipping line
            (true, false) => {
                clipped.push((p, p_side));
                clipped.push((intersection(&p, &q, fp, fq), side));
            }
            // Entering the half-plane: the side keeps its label
            (false, true) => clipped.push((intersection(&p, &q, fp, fq), p_side)),
            (false, false) => (),
        }
    }
    clipped
}

/// Point where the segment `pq` crosses the clipping line.
///
/// When `p` and `q` share a coordinate, the result has exactly that coordinate, which keeps
/// vertexes on the frame exactly on the frame.
fn intersection(p: &Point, q: &Point, fp: f64, fq: f64) -> Point {
    let t: f64 = fp / (fp - fq);
    Point::new(p.x + t * (q.x - p.x), p.y + t * (q.y - p.y))
}

/// Remove the zero-length sides.
fn collapse(polygon: &[LabeledVertex]) -> Vec<LabeledVertex> {
    let n: usize = polygon.len();
    polygon
        .iter()
        .enumerate()
        .filter(|(k, (p, _))| p.distance(&polygon[(k + 1) % n].0) > EPSILON)
        .map(|(_, v)| *v)
        .collect()
}

/// Geometry engine that computes the Voronoi diagram from a Delaunay triangulation.
///
/// A site at the same position as an earlier site gets a cell with no half-edge.
#[derive(Debug, Default, Clone, Copy)]
pub struct DelaunayVoronoi;

impl DelaunayVoronoi {
    /// Create the object.
    pub fn new() -> Self {
        Self
    }
}

impl PlanarSubdivisionBuilder for DelaunayVoronoi {
    fn compute(&self, sites: &[Point], bbox: &BoundingBox) -> Diagram {
        let triangulated: Triangulated = Triangulated::new(sites);
        let mut diagram: Diagram = Diagram {
            cells: Vec::with_capacity(sites.len()),
            edges: Vec::new(),
        };

        // One edge per Delaunay edge, created by the first cell that walks it
        let mut shared_edges: HashMap<FixedUndirectedEdgeHandle, usize> = HashMap::new();

        for (i, site) in sites.iter().enumerate() {
            let polygon: Vec<LabeledVertex> = triangulated.cell_polygon(i, sites, bbox);
            let n: usize = polygon.len();
            let mut halfedges: Vec<HalfEdge> = Vec::with_capacity(n);

            for k in 0..n {
                let (start, side) = polygon[k];
                let end: Point = polygon[(k + 1) % n].0;
                let edge: usize = match side {
                    Side::Frame => {
                        diagram.edges.push(Edge {
                            left_site: Some(i),
                            right_site: None,
                            va: start,
                            vb: end,
                        });
                        diagram.edges.len() - 1
                    }
                    Side::Delaunay { site: j, edge } => {
                        let edges: &mut Vec<Edge> = &mut diagram.edges;
                        *shared_edges.entry(edge).or_insert_with(|| {
                            edges.push(Edge {
                                left_site: Some(i),
                                right_site: Some(j),
                                va: start,
                                vb: end,
                            });
                            edges.len() - 1
                        })
                    }
                };
                halfedges.push(HalfEdge { edge, start, end });
            }

            diagram.cells.push(DiagramCell {
                site: *site,
                halfedges,
            });
        }
        diagram
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::sites::SiteSampler;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    /// Shoelace formula.
    fn area(cell: &DiagramCell) -> f64 {
        cell.halfedges
            .iter()
            .map(|h| h.start.x * h.end.y - h.end.x * h.start.y)
            .sum::<f64>()
            .abs()
            / 2.0
    }

    fn random_sites(seed: u64, count: usize) -> Vec<Point> {
        let mut rng = StdRng::seed_from_u64(seed);
        SiteSampler::new(600.0, 300.0)
            .generate(&mut rng, count, 20.0)
            .unwrap()
    }

    #[test]
    fn two_sites_split_the_box() {
        let sites = [Point::new(25.0, 50.0), Point::new(75.0, 50.0)];
        let bbox = BoundingBox::from_size(100.0, 100.0);
        let diagram = DelaunayVoronoi::new().compute(&sites, &bbox);

        assert_eq!(diagram.cells.len(), 2);
        assert_eq!(diagram.cells[0].halfedges.len(), 4);
        assert_eq!(diagram.cells[1].halfedges.len(), 4);
        // Three frame edges per cell and one shared edge
        assert_eq!(diagram.edges.len(), 7);
        assert_eq!(area(&diagram.cells[0]), 5000.0);
        assert_eq!(area(&diagram.cells[1]), 5000.0);

        let shared: Vec<&Edge> = diagram.edges.iter().filter(|e| !e.on_frame()).collect();
        assert_eq!(shared.len(), 1);
        assert_eq!(shared[0].left_site, Some(0));
        assert_eq!(shared[0].right_site, Some(1));
        assert_eq!(shared[0].va.x, 50.0);
        assert_eq!(shared[0].vb.x, 50.0);
    }

    #[test]
    fn single_site_gets_the_whole_box() {
        let diagram = DelaunayVoronoi::new()
            .compute(&[Point::new(3.0, 4.0)], &BoundingBox::from_size(10.0, 20.0));
        assert_eq!(diagram.cells.len(), 1);
        assert_eq!(diagram.cells[0].halfedges.len(), 4);
        assert!(diagram.edges.iter().all(|e| e.on_frame()));
        assert_eq!(area(&diagram.cells[0]), 200.0);
    }

    #[test]
    fn collinear_sites() {
        let sites = [
            Point::new(10.0, 5.0),
            Point::new(20.0, 5.0),
            Point::new(30.0, 5.0),
        ];
        let diagram = DelaunayVoronoi::new().compute(&sites, &BoundingBox::from_size(40.0, 10.0));
        let areas: Vec<f64> = diagram.cells.iter().map(area).collect();
        assert_eq!(areas, vec![150.0, 100.0, 150.0]);
        // Sites 0 and 2 are not Delaunay neighbors
        assert!(diagram.edges.iter().all(|e| e.opposite_site(0) != Some(2)));
    }

    #[test]
    fn duplicate_site_gets_no_cell() {
        let sites = [
            Point::new(25.0, 50.0),
            Point::new(75.0, 50.0),
            Point::new(25.0, 50.0),
        ];
        let bbox = BoundingBox::from_size(100.0, 100.0);
        let diagram = DelaunayVoronoi::new().compute(&sites, &bbox);

        assert_eq!(diagram.cells.len(), 3);
        assert!(diagram.cells[2].halfedges.is_empty());
        let total: f64 = diagram.cells.iter().map(area).sum();
        assert_eq!(total, bbox.area());
    }

    #[test]
    fn boundary_walk_is_closed() {
        let bbox = BoundingBox::from_size(600.0, 300.0);
        let diagram = DelaunayVoronoi::new().compute(&random_sites(7, 40), &bbox);

        for cell in &diagram.cells {
            let n = cell.halfedges.len();
            assert!(n >= 3);
            for k in 0..n {
                assert_eq!(cell.halfedges[k].end, cell.halfedges[(k + 1) % n].start);
            }
        }
    }

    #[test]
    fn cells_partition_the_box() {
        let bbox = BoundingBox::from_size(600.0, 300.0);
        let diagram = DelaunayVoronoi::new().compute(&random_sites(8, 40), &bbox);
        let total: f64 = diagram.cells.iter().map(area).sum();
        assert!((total - bbox.area()).abs() < 1e-6);
    }

    #[test]
    fn shared_edges_reference_both_cells() {
        let bbox = BoundingBox::from_size(600.0, 300.0);
        let diagram = DelaunayVoronoi::new().compute(&random_sites(9, 30), &bbox);

        for (i, cell) in diagram.cells.iter().enumerate() {
            for h in &cell.halfedges {
                let edge = &diagram.edges[h.edge];
                assert!(edge.left_site == Some(i) || edge.right_site == Some(i));
                if let Some(j) = edge.opposite_site(i) {
                    assert!(
                        diagram.cells[j]
                            .halfedges
                            .iter()
                            .any(|other| other.edge == h.edge)
                    );
                }
            }
        }
    }

    #[test]
    fn frame_vertexes_are_exact() {
        let sites = [
            Point::new(10.0, 10.0),
            Point::new(37.0, 13.0),
            Point::new(21.0, 41.0),
        ];
        let diagram = DelaunayVoronoi::new().compute(&sites, &BoundingBox::from_size(50.0, 50.0));
        for edge in diagram.edges.iter().filter(|e| e.on_frame()) {
            let on_vertical = edge.va.x == edge.vb.x && (edge.va.x == 0.0 || edge.va.x == 50.0);
            let on_horizontal = edge.va.y == edge.vb.y && (edge.va.y == 0.0 || edge.va.y == 50.0);
            assert!(on_vertical || on_horizontal);
        }
    }
}

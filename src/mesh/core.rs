// SPDX-License-Identifier: MIT
//
// Copyright (c) 2025 Alexandre Severino
//
// Permission is hereby granted, free of charge, to any person obtaining a copy
// of this software and associated documentation files (the "Software"), to deal
// in the Software without restriction, including without limitation the rights
// to use, copy, modify, merge, publish, distribute, sublicense, and/or sell
// copies of the Software, and to permit persons to whom the Software is
// furnished to do so, subject to the following conditions:
//
// The above copyright notice and this permission notice shall be included in
// all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
// IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
// FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
// AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
// LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
// OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE
// SOFTWARE.

use thiserror::Error;

use crate::geometry::Point2;
use crate::kernel::orient2d;
use crate::mesh::triangle::Triangle;

/// Triangle arena over sampled points.
#[derive(Debug, Clone, Default)]
pub struct Mesh {
    pub points: Vec<Point2>,
    pub values: Vec<f64>,
    pub triangles: Vec<Triangle>,
    /// Indices of triangles still flat (the repair worklist).
    pub flat_triangles: Vec<usize>,
    /// Threshold the long-edge masks were computed with.
    pub long_edge: f64,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum TopologyViolation {
    #[error("triangle {triangle} references missing vertex {vertex}")]
    MissingVertex { triangle: usize, vertex: usize },
    #[error("triangle {triangle} references missing neighbour {neighbor}")]
    MissingNeighbor { triangle: usize, neighbor: usize },
    #[error("triangle {triangle} lists {neighbor} but is not listed back exactly once")]
    OneSidedLink { triangle: usize, neighbor: usize },
    #[error("triangles {triangle} and {neighbor} are linked but share no edge")]
    EdgeMismatch { triangle: usize, neighbor: usize },
    #[error("triangle {triangle} is not counter-clockwise")]
    Orientation { triangle: usize },
    #[error("value list has {values} entries for {points} points")]
    ValueCount { points: usize, values: usize },
}

impl Mesh {
    #[inline]
    pub fn triangle_coords(&self, t: usize) -> [Point2; 3] {
        self.triangles[t].coords(&self.points)
    }

    #[inline]
    pub fn triangle_values(&self, t: usize) -> [f64; 3] {
        self.triangles[t].vertices.map(|v| self.values[v])
    }

    /// Share of triangles that are still flat.
    pub fn flat_fraction(&self) -> f64 {
        if self.triangles.is_empty() {
            return 0.0;
        }
        self.flat_triangles.len() as f64 / self.triangles.len() as f64
    }

    /// First long edge whose neighbour exists and is not flat.
    ///
    /// Returns `(neighbor, slot in t, slot in neighbor)`.
    pub fn sloped_neighbor(&self, t: usize) -> Option<(usize, usize, usize)> {
        let tri = &self.triangles[t];
        for i in 0..3 {
            if !tri.long_edges[i] {
                continue;
            }
            let Some(n) = tri.neighbors[i] else {
                continue;
            };
            let other = &self.triangles[n];
            if other.flat {
                continue;
            }
            if let Some(j) = other.slot_of_neighbor(t) {
                return Some((n, i, j));
            }
        }
        None
    }

    /// Checks mutual neighbour links, shared edges and orientation.
    pub fn check_topology(&self) -> Result<(), TopologyViolation> {
        if self.values.len() != self.points.len() {
            return Err(TopologyViolation::ValueCount {
                points: self.points.len(),
                values: self.values.len(),
            });
        }
        for (t, tri) in self.triangles.iter().enumerate() {
            for &v in &tri.vertices {
                if v >= self.points.len() {
                    return Err(TopologyViolation::MissingVertex {
                        triangle: t,
                        vertex: v,
                    });
                }
            }
            let [a, b, c] = self.triangle_coords(t);
            if !orient2d(&a, &b, &c).is_positive() {
                return Err(TopologyViolation::Orientation { triangle: t });
            }
            for i in 0..3 {
                let Some(n) = tri.neighbors[i] else {
                    continue;
                };
                let Some(other) = self.triangles.get(n) else {
                    return Err(TopologyViolation::MissingNeighbor {
                        triangle: t,
                        neighbor: n,
                    });
                };
                let back = other.neighbors.iter().filter(|&&x| x == Some(t)).count();
                if back != 1 {
                    return Err(TopologyViolation::OneSidedLink {
                        triangle: t,
                        neighbor: n,
                    });
                }
                let (u, v) = tri.edge(i);
                let j = other.slot_of_neighbor(t).unwrap_or(0);
                if other.edge(j) != (v, u) {
                    return Err(TopologyViolation::EdgeMismatch {
                        triangle: t,
                        neighbor: n,
                    });
                }
            }
        }
        Ok(())
    }
}

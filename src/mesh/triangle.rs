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

use crate::geometry::Point2;

/// Mesh triangle stored in an index arena.
///
/// Slot `i` of `neighbors` and `long_edges` refers to the edge opposite
/// vertex `i`, running from `vertices[(i + 1) % 3]` to `vertices[(i + 2) % 3]`.
#[derive(Debug, Clone, PartialEq)]
pub struct Triangle {
    pub vertices: [usize; 3],
    pub neighbors: [Option<usize>; 3],
    pub flat: bool,
    pub long_edges: [bool; 3],
}

impl Triangle {
    /// Triangle taken from a fresh triangulation, classified against the
    /// sampled values. A triangle is flat when its three values agree and at
    /// least one edge is longer than `long_edge`; triangles made only of
    /// contour steps sit inside a single fringe and are never flat.
    pub fn from_triangulation(
        vertices: [usize; 3],
        neighbors: [Option<usize>; 3],
        points: &[Point2],
        values: &[f64],
        long_edge: f64,
    ) -> Self {
        let long_edges = edge_mask(&vertices, points, long_edge);
        let [a, b, c] = vertices;
        let same = values[a] == values[b] && values[b] == values[c];
        Self {
            vertices,
            neighbors,
            flat: same && long_edges.iter().any(|&l| l),
            long_edges,
        }
    }

    /// Second half of a triangle being split. Starts as a copy of `parent`;
    /// the caller rewrites one vertex and the affected links. Split halves are
    /// never flat.
    pub fn split_from(parent: &Triangle) -> Self {
        Self {
            vertices: parent.vertices,
            neighbors: parent.neighbors,
            flat: false,
            long_edges: [true; 3],
        }
    }

    /// Endpoints of the edge opposite slot `i`.
    #[inline]
    pub fn edge(&self, i: usize) -> (usize, usize) {
        (self.vertices[(i + 1) % 3], self.vertices[(i + 2) % 3])
    }

    #[inline]
    pub fn slot_of_vertex(&self, v: usize) -> Option<usize> {
        self.vertices.iter().position(|&w| w == v)
    }

    #[inline]
    pub fn slot_of_neighbor(&self, t: usize) -> Option<usize> {
        self.neighbors.iter().position(|&n| n == Some(t))
    }

    /// Redirects the link pointing at `old` to `new`.
    pub fn replace_neighbor(&mut self, old: usize, new: usize) -> bool {
        match self.slot_of_neighbor(old) {
            Some(i) => {
                self.neighbors[i] = Some(new);
                true
            }
            None => false,
        }
    }

    pub fn refresh_long_edges(&mut self, points: &[Point2], long_edge: f64) {
        self.long_edges = edge_mask(&self.vertices, points, long_edge);
    }

    pub fn coords(&self, points: &[Point2]) -> [Point2; 3] {
        self.vertices.map(|v| points[v])
    }
}

fn edge_mask(vertices: &[usize; 3], points: &[Point2], long_edge: f64) -> [bool; 3] {
    std::array::from_fn(|i| {
        let a = &points[vertices[(i + 1) % 3]];
        let b = &points[vertices[(i + 2) % 3]];
        a.distance_to(b) > long_edge
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::CONTOUR_STEP;

    #[test]
    fn contour_only_triangle_is_not_flat() {
        let pts = [
            Point2::new(0.0, 0.0),
            Point2::new(1.0, 0.0),
            Point2::new(1.0, 1.0),
        ];
        let t = Triangle::from_triangulation([0, 1, 2], [None; 3], &pts, &[2.0; 3], CONTOUR_STEP);
        assert_eq!(t.long_edges, [false; 3]);
        assert!(!t.flat);
    }

    #[test]
    fn flat_needs_equal_values_and_a_long_edge() {
        let pts = [
            Point2::new(0.0, 0.0),
            Point2::new(5.0, 0.0),
            Point2::new(0.0, 1.0),
        ];
        let flat = Triangle::from_triangulation([0, 1, 2], [None; 3], &pts, &[1.0; 3], CONTOUR_STEP);
        assert!(flat.flat);
        assert_eq!(flat.long_edges, [true, false, true]);

        let sloped =
            Triangle::from_triangulation([0, 1, 2], [None; 3], &pts, &[1.0, 1.0, 2.0], CONTOUR_STEP);
        assert!(!sloped.flat);
    }

    #[test]
    fn split_half_copies_links() {
        let pts = [
            Point2::new(0.0, 0.0),
            Point2::new(5.0, 0.0),
            Point2::new(0.0, 5.0),
        ];
        let mut t =
            Triangle::from_triangulation([0, 1, 2], [Some(4), None, Some(7)], &pts, &[0.0; 3], 1.5);
        let half = Triangle::split_from(&t);
        assert_eq!(half.vertices, t.vertices);
        assert_eq!(half.neighbors, t.neighbors);
        assert!(!half.flat);
        assert!(t.replace_neighbor(7, 9));
        assert_eq!(t.slot_of_neighbor(9), Some(2));
        assert!(!t.replace_neighbor(3, 1));
    }
}

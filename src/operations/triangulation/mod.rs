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

use crate::error::Result;
use crate::geometry::Point2;

pub mod delaunay;

pub use delaunay::Delaunay;

pub trait Triangulate2D {
    fn triangulate(points: &[Point2], seed: u64) -> Result<Triangulation>;
}

/// Counter-clockwise triangles over caller-owned points.
/// `neighbors[t][i]` is the triangle across the edge opposite vertex `i`.
#[derive(Clone, Debug, Default)]
pub struct Triangulation {
    pub triangles: Vec<[usize; 3]>,
    pub neighbors: Vec<[Option<usize>; 3]>,
}

impl Triangulate2D for Delaunay<'_> {
    fn triangulate(points: &[Point2], seed: u64) -> Result<Triangulation> {
        Delaunay::build(points, seed)
    }
}

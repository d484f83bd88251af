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

use std::collections::HashMap;

use tracing::info;

use crate::config::MeshOptions;
use crate::error::{Error, Result};
use crate::geometry::Point2;
use crate::mesh::core::Mesh;
use crate::mesh::triangle::Triangle;
use crate::operations::triangulation::{Delaunay, Triangulate2D};
use crate::progress::{Progress, Silent};

impl Mesh {
    /// Triangulates labelled samples and classifies flat triangles.
    ///
    /// Samples must already exclude unlabelled points. Repeated coordinates
    /// keep the first value. Fewer than three distinct points, or points on a
    /// single line, are rejected.
    pub fn build(samples: &[(Point2, f64)], options: &MeshOptions) -> Result<Self> {
        Self::build_with_progress(samples, options, &mut Silent)
    }

    pub fn build_with_progress(
        samples: &[(Point2, f64)],
        options: &MeshOptions,
        progress: &mut dyn Progress,
    ) -> Result<Self> {
        progress.report("Performing Delaunay triangulation", Some(0.0));
        let mut seen: HashMap<(u64, u64), usize> = HashMap::with_capacity(samples.len());
        let mut points = Vec::with_capacity(samples.len());
        let mut values = Vec::with_capacity(samples.len());
        for &(p, v) in samples {
            if !p.is_finite() {
                continue;
            }
            seen.entry(p.bits()).or_insert_with(|| {
                points.push(p);
                values.push(v);
                points.len() - 1
            });
        }
        if points.len() < 3 {
            return Err(Error::TooFewPoints {
                found: points.len(),
            });
        }

        let triangulation = Delaunay::triangulate(&points, options.seed)?;
        progress.report("Building data structures", Some(5.0));

        let mut triangles = Vec::with_capacity(triangulation.triangles.len());
        let mut flat_triangles = Vec::new();
        for (idx, (&verts, &nbrs)) in triangulation
            .triangles
            .iter()
            .zip(&triangulation.neighbors)
            .enumerate()
        {
            let tri = Triangle::from_triangulation(verts, nbrs, &points, &values, options.long_edge);
            if tri.flat {
                flat_triangles.push(idx);
            }
            triangles.push(tri);
        }

        let mesh = Mesh {
            points,
            values,
            triangles,
            flat_triangles,
            long_edge: options.long_edge,
        };
        info!(
            points = mesh.points.len(),
            triangles = mesh.triangles.len(),
            flat = mesh.flat_triangles.len(),
            "flat triangles are {:.2} percent of the mesh",
            100.0 * mesh.flat_fraction()
        );
        Ok(mesh)
    }
}

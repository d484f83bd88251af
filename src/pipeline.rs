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

use tracing::{info, info_span};

use crate::config::{Method, ReconstructionConfig};
use crate::error::Result;
use crate::fringes::FringeRegistry;
use crate::image::{Field, Mask};
use crate::mesh::Mesh;
use crate::mesh_processing::{RasterReport, RepairReport};
use crate::progress::Progress;

/// Everything produced by one reconstruction run.
#[derive(Debug, Clone)]
pub struct Reconstruction {
    pub field: Field,
    pub mesh: Mesh,
    /// `None` when the method skips repair.
    pub repair: Option<RepairReport>,
    pub raster: RasterReport,
}

/// Meshes the labelled fringes of `registry`, repairs flat triangles and
/// interpolates a `shape` (rows, cols) phase field.
///
/// Pixels set in `exclusion` are left unfilled.
pub fn reconstruct(
    registry: &FringeRegistry,
    shape: (usize, usize),
    exclusion: Option<&Mask>,
    config: &ReconstructionConfig,
    progress: &mut dyn Progress,
) -> Result<Reconstruction> {
    let _span = info_span!("reconstruct", rows = shape.0, cols = shape.1).entered();
    if let Some(mask) = exclusion {
        mask.ensure_shape(shape)?;
    }

    let samples = registry.labelled_points();
    info!(
        fringes = registry.len(),
        labelled = registry.labelled_count(),
        samples = samples.len(),
        method = ?config.method,
        "starting reconstruction"
    );

    let mut mesh = Mesh::build_with_progress(&samples, &config.mesh, progress)?;
    let repair = match config.method {
        Method::Repaired => Some(mesh.repair(&config.repair, progress)),
        Method::Linear => None,
    };

    progress.report("Performing the interpolation", Some(70.0));
    let (field, raster) = mesh.rasterize(shape, exclusion, &config.raster)?;
    progress.report("Done", Some(100.0));

    Ok(Reconstruction {
        field,
        mesh,
        repair,
        raster,
    })
}

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

//! Phase maps from traced interference fringes.
//!
//! A binary fringe mask is split into ordered pixel curves, the operator's
//! fringe orders are attached to them, and the labelled pixels are
//! triangulated. Flat triangles (three vertices on one fringe, spanning a gap
//! between contour pixels) are removed by edge flips or midpoint insertion
//! before the mesh is interpolated into a dense field.

pub mod config;
pub mod error;
pub mod fringes;
pub mod geometry;
pub mod image;
pub mod kernel;
pub mod mesh;
pub mod mesh_processing;
pub mod numeric;
pub mod operations;
pub mod pipeline;
pub mod progress;

pub use config::{
    Backtrack, MeshOptions, Method, RasterOptions, ReconstructionConfig, RepairOptions,
    TraceOptions,
};
pub use error::{Error, Result};
pub use fringes::{
    Fringe, FringeRegistry, LabelDirection, label_along_line, trace_fringes, trace_with_phases,
};
pub use geometry::Point2;
pub use image::{Field, Grid, IndexMap, Mask};
pub use mesh::{Mesh, TopologyViolation, Triangle};
pub use mesh_processing::{RasterReport, RepairReport};
pub use pipeline::{Reconstruction, reconstruct};
pub use progress::{Progress, Recorder, Silent};

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

use serde::{Deserialize, Serialize};

use crate::geometry::CONTOUR_STEP;

/// Order in which deferred branch pixels are resumed while tracing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Backtrack {
    /// Most recently deferred branch first.
    #[default]
    Stack,
    /// Oldest deferred branch first; matches phase lists saved by earlier
    /// desktop releases.
    Queue,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TraceOptions {
    /// Curves with fewer points are dropped.
    pub min_length: usize,
    pub backtrack: Backtrack,
}

impl Default for TraceOptions {
    fn default() -> Self {
        Self {
            min_length: 5,
            backtrack: Backtrack::Stack,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MeshOptions {
    /// Edges longer than this are not part of a traced contour.
    pub long_edge: f64,
    /// Seed of the insertion-order shuffle.
    pub seed: u64,
}

impl Default for MeshOptions {
    fn default() -> Self {
        Self {
            long_edge: CONTOUR_STEP,
            seed: 0x5eed_f41e,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RepairOptions {
    /// Upper bound on worklist sweeps.
    pub max_passes: usize,
    /// Relative tolerance of the flip area comparison.
    pub area_tolerance: f64,
}

impl Default for RepairOptions {
    fn default() -> Self {
        Self {
            max_passes: 1000,
            area_tolerance: 1e-9,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RasterOptions {
    /// Decimal places kept in the third barycentric weight.
    pub weight_decimals: i32,
}

impl Default for RasterOptions {
    fn default() -> Self {
        Self {
            weight_decimals: 10,
        }
    }
}

/// Interpolation strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Method {
    /// Delaunay mesh with flat-triangle repair.
    #[default]
    Repaired,
    /// Plain linear interpolation on the Delaunay mesh.
    Linear,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ReconstructionConfig {
    pub method: Method,
    pub trace: TraceOptions,
    pub mesh: MeshOptions,
    pub repair: RepairOptions,
    pub raster: RasterOptions,
}

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

use tracing::{debug, info};

use crate::config::RasterOptions;
use crate::error::Result;
use crate::geometry::{BarycentricFrame, Point2, round_decimals};
use crate::image::{Field, Mask};
use crate::mesh::Mesh;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RasterReport {
    /// Pixels holding a value after the exclusion mask was applied.
    pub filled: usize,
    /// Covered pixels reset by the exclusion mask.
    pub excluded: usize,
    /// Zero-area triangles that were skipped.
    pub degenerate: usize,
}

impl Mesh {
    /// Interpolates the mesh into a fresh `rows x cols` field.
    pub fn rasterize(
        &self,
        shape: (usize, usize),
        exclusion: Option<&Mask>,
        options: &RasterOptions,
    ) -> Result<(Field, RasterReport)> {
        let mut field = Field::unfilled(shape.0, shape.1)?;
        let report = self.rasterize_into(&mut field, exclusion, options)?;
        Ok((field, report))
    }

    /// Writes barycentric interpolation of every triangle into `field`.
    ///
    /// A pixel is written once, by the first triangle containing it; pixels
    /// already holding a value are left alone. Pixels set in `exclusion` are
    /// reset to `NaN` afterwards.
    pub fn rasterize_into(
        &self,
        field: &mut Field,
        exclusion: Option<&Mask>,
        options: &RasterOptions,
    ) -> Result<RasterReport> {
        if let Some(mask) = exclusion {
            mask.ensure_shape(field.shape())?;
        }
        let (rows, cols) = field.shape();
        let mut report = RasterReport::default();

        for t in 0..self.triangles.len() {
            let [p0, p1, p2] = self.triangle_coords(t);
            let [v0, v1, v2] = self.triangle_values(t);
            let Some(frame) = BarycentricFrame::new(&p0, &p1, &p2) else {
                report.degenerate += 1;
                continue;
            };

            let xs = [p0.x, p1.x, p2.x];
            let ys = [p0.y, p1.y, p2.y];
            let Some((c_lo, c_hi)) = pixel_span(min3(xs), max3(xs), cols) else {
                continue;
            };
            let Some((r_lo, r_hi)) = pixel_span(min3(ys), max3(ys), rows) else {
                continue;
            };

            for r in r_lo..r_hi {
                for c in c_lo..c_hi {
                    if field.is_filled(r, c) {
                        continue;
                    }
                    let p = Point2::new(c as f64, r as f64);
                    let (w0, w1) = frame.weights(&p);
                    if w0 < 0.0 || w1 < 0.0 {
                        continue;
                    }
                    let w2 = round_decimals(1.0 - w0 - w1, options.weight_decimals);
                    if w2 < 0.0 {
                        continue;
                    }
                    field.set(r, c, w0 * v0 + w1 * v1 + w2 * v2);
                }
            }
        }

        if let Some(mask) = exclusion {
            for (cell, &excluded) in field.data_mut().iter_mut().zip(mask.data()) {
                if excluded && !cell.is_nan() {
                    *cell = f64::NAN;
                    report.excluded += 1;
                }
            }
        }
        report.filled = field.filled_count();
        if report.degenerate > 0 {
            debug!(count = report.degenerate, "skipped zero-area triangles");
        }
        info!(
            filled = report.filled,
            excluded = report.excluded,
            "rasterized {} triangles",
            self.triangles.len()
        );
        Ok(report)
    }
}

#[inline]
fn min3(v: [f64; 3]) -> f64 {
    v[0].min(v[1]).min(v[2])
}

#[inline]
fn max3(v: [f64; 3]) -> f64 {
    v[0].max(v[1]).max(v[2])
}

/// Half-open pixel range `floor(lo)..floor(hi) + 1`, clipped to `0..len`.
fn pixel_span(lo: f64, hi: f64, len: usize) -> Option<(usize, usize)> {
    if !lo.is_finite() || !hi.is_finite() {
        return None;
    }
    let start = lo.floor().max(0.0);
    let end = (hi.floor() + 1.0).min(len as f64);
    if end <= start {
        return None;
    }
    Some((start as usize, end as usize))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn span_is_clipped() {
        assert_eq!(pixel_span(-2.5, 3.2, 10), Some((0, 4)));
        assert_eq!(pixel_span(7.0, 12.0, 10), Some((7, 10)));
        assert_eq!(pixel_span(11.0, 12.0, 10), None);
        assert_eq!(pixel_span(-3.0, -1.5, 10), None);
    }
}

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
use tracing::debug;

use crate::fringes::registry::FringeRegistry;
use crate::geometry::Point2;
use crate::image::IndexMap;

/// What a labelling line does to the fringes it crosses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LabelDirection {
    /// Each crossed fringe is one order above the previous one.
    #[default]
    Increment,
    /// Each crossed fringe is one order below the previous one.
    Decrement,
    /// Crossed fringes lose their label.
    Unlabel,
}

impl LabelDirection {
    fn step(self) -> i32 {
        match self {
            LabelDirection::Increment => 1,
            LabelDirection::Decrement => -1,
            LabelDirection::Unlabel => 0,
        }
    }
}

/// Labels the fringes crossed by `polyline` (points in pixel coordinates,
/// `x` = column) and returns the indices of the fringes touched, in crossing
/// order.
///
/// The first fringe crossed keeps its phase, or gets `0` when unlabelled;
/// every following one is the previous phase plus the direction's step.
pub fn label_along_line(
    registry: &mut FringeRegistry,
    index_map: &IndexMap,
    polyline: &[Point2],
    direction: LabelDirection,
) -> Vec<usize> {
    let mut changed = Vec::new();
    let mut previous: Option<usize> = None;
    let mut phase: Option<i32> = None;

    for (row, col) in sample_polyline(polyline) {
        let Some(index) = probe(index_map, row, col) else {
            continue;
        };
        if previous == Some(index) {
            continue;
        }
        let Some(fringe) = registry.fringes.get_mut(index) else {
            continue;
        };

        match direction {
            LabelDirection::Unlabel => fringe.phase = None,
            _ => {
                let next = match phase {
                    Some(p) => p + direction.step(),
                    None => fringe.phase.unwrap_or(0),
                };
                fringe.phase = Some(next);
                phase = Some(next);
            }
        }
        changed.push(index);
        previous = Some(index);
    }

    if let Some(p) = phase {
        registry.extend_range(p);
    }
    debug!(?direction, crossed = changed.len(), ?phase, "labelled along line");
    changed
}

/// Pixels visited by a polyline: every segment is sampled at
/// `max(|dx|, |dy|) + 1` evenly spaced points, rounded half to even.
pub fn sample_polyline(polyline: &[Point2]) -> Vec<(i64, i64)> {
    let mut out = Vec::new();
    for pair in polyline.windows(2) {
        let (a, b) = (pair[0], pair[1]);
        let span = (b.x - a.x).abs().max((b.y - a.y).abs());
        if !span.is_finite() {
            continue;
        }
        let count = span as usize + 1;
        for k in 0..count {
            let (x, y) = if k + 1 == count && count > 1 {
                (b.x, b.y)
            } else {
                let t = if count > 1 {
                    k as f64 / (count - 1) as f64
                } else {
                    0.0
                };
                (a.x + (b.x - a.x) * t, a.y + (b.y - a.y) * t)
            };
            out.push((y.round_ties_even() as i64, x.round_ties_even() as i64));
        }
    }
    out
}

/// Fringe at `(row - 1, col)` or `(row, col)`, upper row first. Probing two
/// rows keeps diagonal lines from slipping between diagonal fringe pixels.
fn probe(index_map: &IndexMap, row: i64, col: i64) -> Option<usize> {
    [row - 1, row]
        .into_iter()
        .find_map(|r| index_map.get_signed(r, col).copied().flatten())
}

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

use std::collections::VecDeque;

use tracing::{debug, info};

use crate::config::{Backtrack, TraceOptions};
use crate::error::Result;
use crate::fringes::registry::FringeRegistry;
use crate::image::Mask;

/// Deferred branch pixels, resumed in the configured order.
struct Worklist {
    order: Backtrack,
    pending: VecDeque<usize>,
}

impl Worklist {
    fn new(order: Backtrack) -> Self {
        Self {
            order,
            pending: VecDeque::new(),
        }
    }

    #[inline]
    fn push(&mut self, idx: usize) {
        self.pending.push_back(idx);
    }

    #[inline]
    fn pop(&mut self) -> Option<usize> {
        match self.order {
            Backtrack::Stack => self.pending.pop_back(),
            Backtrack::Queue => self.pending.pop_front(),
        }
    }
}

/// Splits a fringe mask into ordered pixel curves, one per 8-connected
/// component. All fringes start unlabelled.
///
/// Seeds are taken in raster order and each curve follows the first free
/// neighbour in raster order; the other free neighbours are deferred and
/// marked visited at once. Curves shorter than `min_length` are dropped and
/// do not consume an index.
pub fn trace_fringes(mask: &Mask, options: &TraceOptions) -> FringeRegistry {
    let mut image = mask.padded(1, false);
    let cols = image.cols();
    let pixels = image.data_mut();

    let mut registry = FringeRegistry::new();
    let mut dropped = 0usize;
    let mut cursor = 0usize;
    let mut neighbours = Vec::with_capacity(8);
    let mut worklist = Worklist::new(options.backtrack);

    while cursor < pixels.len() {
        if !pixels[cursor] {
            cursor += 1;
            continue;
        }

        let mut point = cursor;
        pixels[point] = false;
        let mut curve = vec![unpad(point, cols)];
        free_neighbours(pixels, cols, point, &mut neighbours);

        while let Some((&next, rest)) = neighbours.split_first() {
            for &branch in rest {
                pixels[branch] = false;
                worklist.push(branch);
            }
            point = next;
            pixels[point] = false;
            curve.push(unpad(point, cols));
            free_neighbours(pixels, cols, point, &mut neighbours);

            if neighbours.is_empty() {
                if let Some(resumed) = worklist.pop() {
                    neighbours.push(resumed);
                }
            }
        }

        if curve.len() >= options.min_length {
            registry.push(curve);
        } else {
            dropped += 1;
        }
    }

    info!(
        fringes = registry.len(),
        dropped,
        min_length = options.min_length,
        "traced fringes"
    );
    registry
}

/// Traces `mask` and replays a saved phase list onto the result.
pub fn trace_with_phases(
    mask: &Mask,
    options: &TraceOptions,
    phases: &[Option<i32>],
) -> Result<FringeRegistry> {
    let mut registry = trace_fringes(mask, options);
    registry.apply_phases(phases)?;
    Ok(registry)
}

/// Set pixels around `idx` in raster order. The image is padded, so the
/// 3x3 window never leaves it.
fn free_neighbours(pixels: &[bool], cols: usize, idx: usize, out: &mut Vec<usize>) {
    out.clear();
    let top = idx - cols - 1;
    for dr in 0..3 {
        for dc in 0..3 {
            let n = top + dr * cols + dc;
            if n != idx && pixels[n] {
                out.push(n);
            }
        }
    }
    if out.len() > 1 {
        debug!(at = ?unpad(idx, cols), branches = out.len() - 1, "fringe branches");
    }
}

#[inline]
fn unpad(idx: usize, cols: usize) -> (usize, usize) {
    (idx / cols - 1, idx % cols - 1)
}

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

use tracing::debug;

use crate::error::{Error, Result};
use crate::geometry::Point2;
use crate::image::{Grid, IndexMap};

/// One traced fringe: an ordered pixel curve and its fringe order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fringe {
    /// Position in the registry, assigned in tracing order.
    pub index: usize,
    /// `(row, col)` pixels in traversal order.
    pub points: Vec<(usize, usize)>,
    /// `None` until the fringe is labelled.
    pub phase: Option<i32>,
}

impl Fringe {
    #[inline]
    pub fn is_labelled(&self) -> bool {
        self.phase.is_some()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Traced fringes plus the running range of assigned phases.
///
/// The range starts at `0..=0` and only ever widens.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FringeRegistry {
    pub fringes: Vec<Fringe>,
    pub min: i32,
    pub max: i32,
}

impl FringeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.fringes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fringes.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Fringe> {
        self.fringes.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Fringe> {
        self.fringes.iter()
    }

    /// Appends an unlabelled fringe and returns its index.
    pub fn push(&mut self, points: Vec<(usize, usize)>) -> usize {
        let index = self.fringes.len();
        self.fringes.push(Fringe {
            index,
            points,
            phase: None,
        });
        index
    }

    /// Sets the phase of one fringe, widening the range when labelled.
    /// Returns `false` for an unknown index.
    pub fn set_phase(&mut self, index: usize, phase: Option<i32>) -> bool {
        let Some(fringe) = self.fringes.get_mut(index) else {
            return false;
        };
        fringe.phase = phase;
        if let Some(p) = phase {
            self.extend_range(p);
        }
        true
    }

    #[inline]
    pub fn extend_range(&mut self, phase: i32) {
        self.min = self.min.min(phase);
        self.max = self.max.max(phase);
    }

    /// Phase of every fringe in index order, the form a project file stores.
    pub fn phases(&self) -> Vec<Option<i32>> {
        self.fringes.iter().map(|f| f.phase).collect()
    }

    /// Replays a saved phase list. The list must have one entry per fringe.
    pub fn apply_phases(&mut self, phases: &[Option<i32>]) -> Result<()> {
        if phases.len() != self.fringes.len() {
            return Err(Error::PhaseListMismatch {
                expected: self.fringes.len(),
                found: phases.len(),
            });
        }
        for (fringe, &phase) in self.fringes.iter_mut().zip(phases) {
            fringe.phase = phase;
        }
        for p in phases.iter().flatten() {
            self.extend_range(*p);
        }
        debug!(
            fringes = self.fringes.len(),
            labelled = self.labelled_count(),
            min = self.min,
            max = self.max,
            "applied saved phases"
        );
        Ok(())
    }

    pub fn labelled_count(&self) -> usize {
        self.fringes.iter().filter(|f| f.is_labelled()).count()
    }

    /// Fringe index of every traced pixel. Pixels outside the grid are
    /// ignored.
    pub fn index_map(&self, rows: usize, cols: usize) -> Result<IndexMap> {
        let mut map = Grid::new_fill(rows, cols, None)?;
        for fringe in &self.fringes {
            for &(r, c) in &fringe.points {
                map.set(r, c, Some(fringe.index));
            }
        }
        Ok(map)
    }

    /// Phase of every traced pixel, `None` off fringes or on unlabelled ones.
    pub fn phase_map(&self, rows: usize, cols: usize) -> Result<Grid<Option<i32>>> {
        let mut map = Grid::new_fill(rows, cols, None)?;
        for fringe in &self.fringes {
            for &(r, c) in &fringe.points {
                map.set(r, c, fringe.phase);
            }
        }
        Ok(map)
    }

    /// Pixels of labelled fringes as mesh samples, in raster order.
    pub fn labelled_points(&self) -> Vec<(Point2, f64)> {
        let mut pixels: Vec<(usize, usize, i32)> = self
            .fringes
            .iter()
            .filter_map(|f| f.phase.map(|p| (f, p)))
            .flat_map(|(f, p)| f.points.iter().map(move |&(r, c)| (r, c, p)))
            .collect();
        pixels.sort_unstable_by_key(|&(r, c, _)| (r, c));
        pixels
            .into_iter()
            .filter_map(|(r, c, p)| Some((Point2::from_pixel(r, c)?, f64::from(p))))
            .collect()
    }
}

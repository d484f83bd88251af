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

use crate::error::{Error, Result};

/// Dense row-major 2-D grid addressed as `(row, col)`.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid<T> {
    rows: usize,
    cols: usize,
    data: Vec<T>,
}

/// Boolean pixel mask, `true` marks a set pixel.
pub type Mask = Grid<bool>;

/// Interpolated phase field. `NaN` marks pixels outside the mesh.
pub type Field = Grid<f64>;

/// Per-pixel fringe index, `None` where no fringe passes.
pub type IndexMap = Grid<Option<usize>>;

impl<T> Grid<T> {
    pub fn from_vec(rows: usize, cols: usize, data: Vec<T>) -> Result<Self> {
        let expected = rows.checked_mul(cols).ok_or(Error::SizeMismatch {
            rows,
            cols,
            found: data.len(),
        })?;
        if data.len() != expected {
            return Err(Error::SizeMismatch {
                rows,
                cols,
                found: data.len(),
            });
        }
        Ok(Self { rows, cols, data })
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    #[inline]
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    pub fn data(&self) -> &[T] {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut [T] {
        &mut self.data
    }

    #[inline]
    pub fn get(&self, row: usize, col: usize) -> Option<&T> {
        if row >= self.rows || col >= self.cols {
            return None;
        }
        self.data.get(row * self.cols + col)
    }

    #[inline]
    pub fn get_mut(&mut self, row: usize, col: usize) -> Option<&mut T> {
        if row >= self.rows || col >= self.cols {
            return None;
        }
        self.data.get_mut(row * self.cols + col)
    }

    /// Signed lookup, `None` outside the grid.
    #[inline]
    pub fn get_signed(&self, row: i64, col: i64) -> Option<&T> {
        if row < 0 || col < 0 {
            return None;
        }
        self.get(row as usize, col as usize)
    }

    pub fn ensure_shape(&self, expected: (usize, usize)) -> Result<()> {
        if self.shape() != expected {
            return Err(Error::ShapeMismatch {
                expected,
                found: self.shape(),
            });
        }
        Ok(())
    }
}

impl<T: Clone> Grid<T> {
    pub fn new_fill(rows: usize, cols: usize, value: T) -> Result<Self> {
        let len = rows.checked_mul(cols).ok_or(Error::SizeMismatch {
            rows,
            cols,
            found: 0,
        })?;
        Ok(Self {
            rows,
            cols,
            data: vec![value; len],
        })
    }

    #[inline]
    pub fn set(&mut self, row: usize, col: usize, value: T) -> bool {
        match self.get_mut(row, col) {
            Some(cell) => {
                *cell = value;
                true
            }
            None => false,
        }
    }

    /// Copy surrounded by `pad` cells of `fill` on every side.
    pub fn padded(&self, pad: usize, fill: T) -> Self {
        let cols = self.cols + 2 * pad;
        let mut data = Vec::with_capacity(self.data.len());
        for _ in 0..pad {
            data.extend(std::iter::repeat_n(fill.clone(), cols));
        }
        for r in 0..self.rows {
            data.extend(std::iter::repeat_n(fill.clone(), pad));
            data.extend_from_slice(self.row(r));
            data.extend(std::iter::repeat_n(fill.clone(), pad));
        }
        for _ in 0..pad {
            data.extend(std::iter::repeat_n(fill.clone(), cols));
        }
        Self {
            rows: self.rows + 2 * pad,
            cols,
            data,
        }
    }

    fn row(&self, row: usize) -> &[T] {
        let start = row * self.cols;
        &self.data[start..start + self.cols]
    }
}

impl Mask {
    /// Builds a mask from text rows, `#` (or any of `set`) marks a set pixel.
    pub fn from_ascii(rows: &[&str], set: &[char]) -> Self {
        let cols = rows.iter().map(|r| r.chars().count()).max().unwrap_or(0);
        let mut data = Vec::new();
        for line in rows {
            let start = data.len();
            data.extend(line.chars().map(|ch| set.contains(&ch)));
            data.resize(start + cols, false);
        }
        Self {
            rows: rows.len(),
            cols,
            data,
        }
    }

    pub fn count_set(&self) -> usize {
        self.data.iter().filter(|&&b| b).count()
    }
}

impl Field {
    pub fn unfilled(rows: usize, cols: usize) -> Result<Self> {
        Self::new_fill(rows, cols, f64::NAN)
    }

    #[inline]
    pub fn is_filled(&self, row: usize, col: usize) -> bool {
        self.get(row, col).is_some_and(|v| !v.is_nan())
    }

    /// Value at `(row, col)`, `None` when out of bounds or unfilled.
    #[inline]
    pub fn value(&self, row: usize, col: usize) -> Option<f64> {
        self.get(row, col).copied().filter(|v| !v.is_nan())
    }

    pub fn filled_count(&self) -> usize {
        self.data.iter().filter(|v| !v.is_nan()).count()
    }

    /// `(min, max)` over filled pixels.
    pub fn value_range(&self) -> Option<(f64, f64)> {
        self.data
            .iter()
            .filter(|v| !v.is_nan())
            .fold(None, |acc, &v| match acc {
                None => Some((v, v)),
                Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn padding_keeps_content_in_place() {
        let m = Mask::from_ascii(&["#.", ".#"], &['#']);
        let p = m.padded(1, false);
        assert_eq!(p.shape(), (4, 4));
        assert_eq!(p.get(1, 1), Some(&true));
        assert_eq!(p.get(2, 2), Some(&true));
        assert_eq!(p.get(0, 0), Some(&false));
        assert_eq!(p.count_set(), 2);
    }

    #[test]
    fn padding_an_empty_row_grid() {
        let m = Mask::from_ascii(&["", ""], &['#']);
        let p = m.padded(1, true);
        assert_eq!(p.shape(), (4, 2));
        assert_eq!(p.count_set(), 8);
    }

    #[test]
    fn oversized_fill_is_rejected() {
        assert!(matches!(
            Mask::new_fill(usize::MAX, 2, false),
            Err(Error::SizeMismatch { rows: usize::MAX, cols: 2, .. })
        ));
        assert!(Field::unfilled(usize::MAX, usize::MAX).is_err());
    }

    #[test]
    fn from_vec_rejects_wrong_length() {
        assert!(matches!(
            Grid::from_vec(2, 3, vec![0u8; 5]),
            Err(Error::SizeMismatch { rows: 2, cols: 3, found: 5 })
        ));
    }

    #[test]
    fn field_range_ignores_unfilled() {
        let mut f = Field::unfilled(2, 2).unwrap();
        assert_eq!(f.value_range(), None);
        f.set(0, 1, 2.5);
        f.set(1, 0, -1.0);
        assert_eq!(f.value_range(), Some((-1.0, 2.5)));
        assert_eq!(f.filled_count(), 2);
        assert!(!f.is_filled(0, 0));
    }
}

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

use num_traits::Float;

use crate::geometry::Point2;

pub const EPS: f64 = 1e-10;

/// Longest edge a traced contour can produce between 8-connected pixels.
pub const CONTOUR_STEP: f64 = std::f64::consts::SQRT_2;

/// Rounds `x` to `decimals` places after the point.
#[inline]
pub fn round_decimals<F: Float>(x: F, decimals: i32) -> F {
    let Some(ten) = F::from(10.0) else {
        return x;
    };
    let scale = ten.powi(decimals);
    (x * scale).round() / scale
}

/// Unsigned area of the triangle `abc`.
#[inline]
pub fn triangle_area(a: &Point2, b: &Point2, c: &Point2) -> f64 {
    0.5 * ((b.x - a.x) * (c.y - a.y) - (b.y - a.y) * (c.x - a.x)).abs()
}

/// Precomputed barycentric frame of a triangle.
///
/// `weights(p)` returns `(w0, w1)`; the third weight is `1 - w0 - w1`.
/// Numerators are evaluated before the division so their sign is exact
/// for the half-integer coordinates the mesh produces.
#[derive(Debug, Clone, Copy)]
pub struct BarycentricFrame {
    c: Point2,
    a0: f64,
    a1: f64,
    a2: f64,
    a3: f64,
    div: f64,
}

impl BarycentricFrame {
    /// `None` for a degenerate triangle.
    pub fn new(v0: &Point2, v1: &Point2, v2: &Point2) -> Option<Self> {
        let a0 = v1.y - v2.y;
        let a1 = v2.x - v1.x;
        let a2 = v2.y - v0.y;
        let a3 = v0.x - v2.x;
        let div = a0 * (v0.x - v2.x) + a1 * (v0.y - v2.y);
        if div == 0.0 || !div.is_finite() {
            return None;
        }
        Some(Self {
            c: *v2,
            a0,
            a1,
            a2,
            a3,
            div,
        })
    }

    #[inline]
    pub fn numerators(&self, p: &Point2) -> (f64, f64) {
        let dx = p.x - self.c.x;
        let dy = p.y - self.c.y;
        (self.a0 * dx + self.a1 * dy, self.a2 * dx + self.a3 * dy)
    }

    #[inline]
    pub fn weights(&self, p: &Point2) -> (f64, f64) {
        let (n0, n1) = self.numerators(p);
        (n0 / self.div, n1 / self.div)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rounding_kills_float_noise() {
        let w = 1.0 - 0.7 - 0.3;
        assert!(w != 0.0);
        assert_eq!(round_decimals(w, 10), 0.0);
        assert_eq!(round_decimals(0.123456789049_f64, 10), 0.1234567890);
    }

    #[test]
    fn barycentric_reproduces_vertices() {
        let a = Point2::new(0.0, 0.0);
        let b = Point2::new(4.0, 0.0);
        let c = Point2::new(0.0, 2.0);
        let f = BarycentricFrame::new(&a, &b, &c).unwrap();
        assert_eq!(f.weights(&a), (1.0, 0.0));
        assert_eq!(f.weights(&b), (0.0, 1.0));
        assert_eq!(f.weights(&c), (0.0, 0.0));
        let (w0, w1) = f.weights(&Point2::new(1.0, 0.5));
        assert!((w0 - 0.5).abs() < EPS);
        assert!((w1 - 0.25).abs() < EPS);
    }

    #[test]
    fn degenerate_frame_is_rejected() {
        let a = Point2::new(0.0, 0.0);
        let b = Point2::new(1.0, 1.0);
        let c = Point2::new(2.0, 2.0);
        assert!(BarycentricFrame::new(&a, &b, &c).is_none());
        assert_eq!(triangle_area(&a, &b, &c), 0.0);
    }
}

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

use crate::geometry::Point2;
use crate::kernel::orientation::Sign;
use crate::numeric::ExactRational;

const HALF_EPSILON: f64 = f64::EPSILON * 0.5;
const CCW_ERRBOUND: f64 = (3.0 + 16.0 * HALF_EPSILON) * HALF_EPSILON;
const ICC_ERRBOUND: f64 = (10.0 + 96.0 * HALF_EPSILON) * HALF_EPSILON;

/// Orientation of `c` relative to the directed line `a -> b`.
/// Positive is counter-clockwise (left turn).
///
/// Evaluated in `f64` with a static error bound; undecided cases are
/// recomputed exactly.
pub fn orient2d(a: &Point2, b: &Point2, c: &Point2) -> Sign {
    let detleft = (a.x - c.x) * (b.y - c.y);
    let detright = (a.y - c.y) * (b.x - c.x);
    let det = detleft - detright;
    let errbound = CCW_ERRBOUND * (detleft.abs() + detright.abs());
    if det > errbound || -det > errbound {
        return Sign::of(det);
    }
    orient2d_exact(a, b, c)
}

fn orient2d_exact(a: &Point2, b: &Point2, c: &Point2) -> Sign {
    let Some([ax, ay, bx, by, cx, cy]) = exact_coords([a.x, a.y, b.x, b.y, c.x, c.y]) else {
        return Sign::Zero;
    };
    let left = &(&ax - &cx) * &(&by - &cy);
    let right = &(&ay - &cy) * &(&bx - &cx);
    (&left - &right).sign().into()
}

/// Positive when `d` lies strictly inside the circle through the
/// counter-clockwise triangle `abc`, zero when cocircular.
pub fn incircle(a: &Point2, b: &Point2, c: &Point2, d: &Point2) -> Sign {
    let adx = a.x - d.x;
    let ady = a.y - d.y;
    let bdx = b.x - d.x;
    let bdy = b.y - d.y;
    let cdx = c.x - d.x;
    let cdy = c.y - d.y;

    let bdxcdy = bdx * cdy;
    let cdxbdy = cdx * bdy;
    let alift = adx * adx + ady * ady;

    let cdxady = cdx * ady;
    let adxcdy = adx * cdy;
    let blift = bdx * bdx + bdy * bdy;

    let adxbdy = adx * bdy;
    let bdxady = bdx * ady;
    let clift = cdx * cdx + cdy * cdy;

    let det = alift * (bdxcdy - cdxbdy) + blift * (cdxady - adxcdy) + clift * (adxbdy - bdxady);
    let permanent = (bdxcdy.abs() + cdxbdy.abs()) * alift
        + (cdxady.abs() + adxcdy.abs()) * blift
        + (adxbdy.abs() + bdxady.abs()) * clift;
    let errbound = ICC_ERRBOUND * permanent;
    if det > errbound || -det > errbound {
        return Sign::of(det);
    }
    incircle_exact(a, b, c, d)
}

fn incircle_exact(a: &Point2, b: &Point2, c: &Point2, d: &Point2) -> Sign {
    let Some([ax, ay, bx, by, cx, cy, dx, dy]) =
        exact_coords([a.x, a.y, b.x, b.y, c.x, c.y, d.x, d.y])
    else {
        return Sign::Zero;
    };
    let adx = &ax - &dx;
    let ady = &ay - &dy;
    let bdx = &bx - &dx;
    let bdy = &by - &dy;
    let cdx = &cx - &dx;
    let cdy = &cy - &dy;

    let alift = &adx.square() + &ady.square();
    let blift = &bdx.square() + &bdy.square();
    let clift = &cdx.square() + &cdy.square();

    let a_term = &alift * &(&(&bdx * &cdy) - &(&cdx * &bdy));
    let b_term = &blift * &(&(&cdx * &ady) - &(&adx * &cdy));
    let c_term = &clift * &(&(&adx * &bdy) - &(&bdx * &ady));
    (&(&a_term + &b_term) + &c_term).sign().into()
}

fn exact_coords<const K: usize>(vals: [f64; K]) -> Option<[ExactRational; K]> {
    let mut out = Vec::with_capacity(K);
    for v in vals {
        out.push(ExactRational::from_f64(v)?);
    }
    out.try_into().ok()
}

/// For `p` collinear with `a` and `b`: true iff `p` lies strictly between them.
#[inline]
pub fn strictly_between(a: &Point2, b: &Point2, p: &Point2) -> bool {
    let ab = *b - *a;
    let ap = *p - *a;
    let t = ap.dot(&ab);
    t > 0.0 && t < ab.dot(&ab)
}

/// True when every point lies on one line.
pub fn all_collinear(points: &[Point2]) -> bool {
    let Some(first) = points.first() else {
        return true;
    };
    let Some(second) = points.iter().find(|p| *p != first) else {
        return true;
    };
    points.iter().all(|p| orient2d(first, second, p).is_zero())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn orient_near_degenerate_is_exact() {
        // Both determinants fall inside the f64 error bound.
        let a = Point2::new(0.5, 0.5);
        let b = Point2::new(12.0, 12.0);
        let c = Point2::new(24.0, 24.0);
        assert_eq!(orient2d(&a, &b, &c), Sign::Zero);

        let tiny = f64::EPSILON;
        let d = Point2::new(24.0, 24.0 + 24.0 * tiny);
        assert_eq!(orient2d(&a, &b, &d), Sign::Positive);
    }

    #[test]
    fn incircle_cocircular_grid_points() {
        let a = Point2::new(0.0, 0.0);
        let b = Point2::new(1.0, 0.0);
        let c = Point2::new(1.0, 1.0);
        assert_eq!(incircle(&a, &b, &c, &Point2::new(0.0, 1.0)), Sign::Zero);
        assert_eq!(incircle(&a, &b, &c, &Point2::new(0.5, 0.5)), Sign::Positive);
        assert_eq!(incircle(&a, &b, &c, &Point2::new(2.0, 2.0)), Sign::Negative);
    }

    #[test]
    fn between_is_strict() {
        let a = Point2::new(0.0, 0.0);
        let b = Point2::new(2.0, 0.0);
        assert!(strictly_between(&a, &b, &Point2::new(1.0, 0.0)));
        assert!(!strictly_between(&a, &b, &Point2::new(2.0, 0.0)));
        assert!(!strictly_between(&a, &b, &Point2::new(-1.0, 0.0)));
    }
}

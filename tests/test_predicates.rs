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

use fringe_mesh::geometry::Point2;
use fringe_mesh::kernel::{Sign, all_collinear, incircle, orient2d, strictly_between};

#[test]
fn test_orient2d() {
    let a = Point2::new(0.0, 0.0);
    let b = Point2::new(1.0, 0.0);
    assert_eq!(orient2d(&a, &b, &Point2::new(0.0, 1.0)), Sign::Positive);
    assert_eq!(orient2d(&a, &b, &Point2::new(0.0, -1.0)), Sign::Negative);
    assert_eq!(orient2d(&a, &b, &Point2::new(7.0, 0.0)), Sign::Zero);
}

#[test]
fn test_orient2d_tiny_offsets() {
    // Offsets far below the magnitude of the coordinates.
    let a = Point2::new(1e8, 1e8);
    let b = Point2::new(1e8 + 1.0, 1e8 + 1.0);
    let above = Point2::new(1e8 + 0.5, 1e8 + 0.5 + 1e-8);
    let on = Point2::new(1e8 + 0.5, 1e8 + 0.5);
    assert_eq!(orient2d(&a, &b, &above), Sign::Positive);
    assert_eq!(orient2d(&a, &b, &on), Sign::Zero);
}

#[test]
fn test_incircle() {
    let a = Point2::new(0.0, 0.0);
    let b = Point2::new(2.0, 0.0);
    let c = Point2::new(0.0, 2.0);
    assert!(incircle(&a, &b, &c, &Point2::new(1.0, 1.0)).is_positive());
    assert!(incircle(&a, &b, &c, &Point2::new(3.0, 3.0)).is_negative());
    // (2, 2) lies on the circle through the other three.
    assert!(incircle(&a, &b, &c, &Point2::new(2.0, 2.0)).is_zero());
}

#[test]
fn test_incircle_cocircular_pixels() {
    // Pixel-centre points on the circle of radius 5.
    let a = Point2::new(5.0, 0.0);
    let b = Point2::new(3.0, 4.0);
    let c = Point2::new(-4.0, 3.0);
    let d = Point2::new(0.0, -5.0);
    assert_eq!(incircle(&a, &b, &c, &d), Sign::Zero);
}

#[test]
fn test_collinear_helpers() {
    let a = Point2::new(0.0, 0.0);
    let b = Point2::new(2.0, 2.0);
    assert!(strictly_between(&a, &b, &Point2::new(1.0, 1.0)));
    assert!(!strictly_between(&a, &b, &Point2::new(3.0, 3.0)));
    assert!(!strictly_between(&a, &b, &a));

    assert!(all_collinear(&[a, b, Point2::new(-5.0, -5.0)]));
    assert!(all_collinear(&[a, a, a]));
    assert!(!all_collinear(&[a, b, Point2::new(1.0, 0.0)]));
}

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

// tests/test_rasterize.rs
use fringe_mesh::Error;
use fringe_mesh::config::{MeshOptions, RasterOptions};
use fringe_mesh::geometry::Point2;
use fringe_mesh::image::{Field, Mask};
use fringe_mesh::kernel::orient2d;
use fringe_mesh::mesh::Mesh;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn square_mesh() -> Mesh {
    // Value equals the column: a plane the interpolation must reproduce.
    let samples = [
        (Point2::new(0.0, 0.0), 0.0),
        (Point2::new(4.0, 0.0), 4.0),
        (Point2::new(4.0, 4.0), 4.0),
        (Point2::new(0.0, 4.0), 0.0),
    ];
    Mesh::build(&samples, &MeshOptions::default()).unwrap()
}

#[test]
fn test_plane_is_reproduced() {
    let mesh = square_mesh();
    let (field, report) = mesh
        .rasterize((6, 6), None, &RasterOptions::default())
        .unwrap();
    assert_eq!(report.filled, 25);
    assert_eq!(report.excluded, 0);
    for r in 0..5 {
        for c in 0..5 {
            let v = field.value(r, c).unwrap();
            assert!((v - c as f64).abs() < 1e-9, "({r}, {c}) = {v}");
        }
    }
    // Outside the hull keeps the sentinel.
    for i in 0..6 {
        assert!(field.value(5, i).is_none());
        assert!(field.value(i, 5).is_none());
    }
}

#[test]
fn test_exclusion_mask_resets_pixels() {
    let mesh = square_mesh();
    let mut exclusion = Mask::new_fill(5, 5, false).unwrap();
    exclusion.set(2, 2, true);
    exclusion.set(0, 4, true);
    let (field, report) = mesh
        .rasterize((5, 5), Some(&exclusion), &RasterOptions::default())
        .unwrap();
    assert_eq!(report.excluded, 2);
    assert_eq!(report.filled, 23);
    assert!(field.value(2, 2).is_none());
    assert!(field.value(0, 4).is_none());
    assert!(field.is_filled(2, 3));
}

#[test]
fn test_exclusion_shape_must_match() {
    let mesh = square_mesh();
    let exclusion = Mask::new_fill(4, 5, false).unwrap();
    let err = mesh
        .rasterize((5, 5), Some(&exclusion), &RasterOptions::default())
        .unwrap_err();
    assert_eq!(
        err,
        Error::ShapeMismatch {
            expected: (5, 5),
            found: (4, 5)
        }
    );
}

#[test]
fn test_field_is_clipped_to_the_grid() {
    let samples = [
        (Point2::new(-10.0, -10.0), 1.0),
        (Point2::new(30.0, -10.0), 1.0),
        (Point2::new(-10.0, 30.0), 3.0),
    ];
    let mesh = Mesh::build(&samples, &MeshOptions::default()).unwrap();
    let (field, report) = mesh
        .rasterize((4, 4), None, &RasterOptions::default())
        .unwrap();
    assert_eq!(report.filled, 16);
    let (lo, hi) = field.value_range().unwrap();
    assert!(lo >= 1.0 && hi <= 3.0);
}

#[test]
fn test_prefilled_pixels_are_kept() {
    let mesh = square_mesh();
    let mut field = Field::unfilled(5, 5).unwrap();
    field.set(1, 1, -7.0);
    mesh.rasterize_into(&mut field, None, &RasterOptions::default())
        .unwrap();
    assert_eq!(field.value(1, 1), Some(-7.0));
    assert_eq!(field.filled_count(), 25);
}

#[test]
fn test_coverage_matches_the_triangles() {
    let mut rng = StdRng::seed_from_u64(3);
    for _ in 0..4 {
        let samples: Vec<(Point2, f64)> = (0..40)
            .map(|_| {
                let x = rng.random_range(0..30) as f64;
                let y = rng.random_range(0..30) as f64;
                (Point2::new(x, y), rng.random_range(-3..4) as f64)
            })
            .collect();
        let mesh = Mesh::build(&samples, &MeshOptions::default()).unwrap();
        let (field, _) = mesh
            .rasterize((30, 30), None, &RasterOptions::default())
            .unwrap();

        for r in 0..30 {
            for c in 0..30 {
                let p = Point2::new(c as f64, r as f64);
                let mut strictly_inside = false;
                let mut touching = Vec::new();
                for t in 0..mesh.triangles.len() {
                    let [a, b, d] = mesh.triangle_coords(t);
                    let s = [orient2d(&a, &b, &p), orient2d(&b, &d, &p), orient2d(&d, &a, &p)];
                    if s.iter().all(|o| o.is_positive()) {
                        strictly_inside = true;
                    }
                    if s.iter().all(|o| !o.is_negative()) {
                        touching.push(t);
                    }
                }
                if strictly_inside {
                    assert!(field.is_filled(r, c), "pixel ({r}, {c}) left empty");
                }
                match field.value(r, c) {
                    None => assert!(touching.is_empty(), "pixel ({r}, {c}) missed"),
                    Some(v) => {
                        // The written value comes from one triangle touching the pixel.
                        let ok = touching.iter().any(|&t| {
                            let vals = mesh.triangle_values(t);
                            let lo = vals.iter().copied().fold(f64::INFINITY, f64::min);
                            let hi = vals.iter().copied().fold(f64::NEG_INFINITY, f64::max);
                            v >= lo - 1e-9 && v <= hi + 1e-9
                        });
                        assert!(ok, "pixel ({r}, {c}) = {v}");
                    }
                }
            }
        }
    }
}

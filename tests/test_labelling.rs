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

// tests/test_labelling.rs
use fringe_mesh::config::TraceOptions;
use fringe_mesh::fringes::{FringeRegistry, LabelDirection, label_along_line, trace_fringes};
use fringe_mesh::geometry::Point2;
use fringe_mesh::image::{IndexMap, Mask};

/// Three vertical fringes at columns 2, 5 and 8.
fn columns() -> (FringeRegistry, IndexMap) {
    let rows = vec!["..#..#..#.."; 10];
    let mask = Mask::from_ascii(&rows, &['#']);
    let reg = trace_fringes(&mask, &TraceOptions::default());
    let map = reg.index_map(mask.rows(), mask.cols()).unwrap();
    (reg, map)
}

fn line(x0: f64, y0: f64, x1: f64, y1: f64) -> Vec<Point2> {
    vec![Point2::new(x0, y0), Point2::new(x1, y1)]
}

#[test]
fn test_increment_counts_up_from_zero() {
    let (mut reg, map) = columns();
    assert_eq!(reg.len(), 3);
    let changed = label_along_line(&mut reg, &map, &line(0.0, 4.0, 10.0, 4.0), LabelDirection::Increment);
    assert_eq!(changed, vec![0, 1, 2]);
    assert_eq!(reg.phases(), vec![Some(0), Some(1), Some(2)]);
    assert_eq!((reg.min, reg.max), (0, 2));
}

#[test]
fn test_first_fringe_keeps_its_phase() {
    let (mut reg, map) = columns();
    reg.set_phase(2, Some(5));
    let changed = label_along_line(&mut reg, &map, &line(10.0, 6.0, 0.0, 6.0), LabelDirection::Decrement);
    assert_eq!(changed, vec![2, 1, 0]);
    assert_eq!(reg.phases(), vec![Some(3), Some(4), Some(5)]);
    assert_eq!((reg.min, reg.max), (0, 5));
}

#[test]
fn test_decrement_extends_the_minimum() {
    let (mut reg, map) = columns();
    label_along_line(&mut reg, &map, &line(0.0, 2.0, 10.0, 2.0), LabelDirection::Decrement);
    assert_eq!(reg.phases(), vec![Some(0), Some(-1), Some(-2)]);
    assert_eq!((reg.min, reg.max), (-2, 0));
}

#[test]
fn test_unlabel_clears_crossed_fringes() {
    let (mut reg, map) = columns();
    reg.apply_phases(&[Some(1), Some(2), Some(3)]).unwrap();
    let changed = label_along_line(&mut reg, &map, &line(3.0, 5.0, 10.0, 5.0), LabelDirection::Unlabel);
    assert_eq!(changed, vec![1, 2]);
    assert_eq!(reg.phases(), vec![Some(1), None, None]);
    // The range never shrinks.
    assert_eq!((reg.min, reg.max), (0, 3));
}

#[test]
fn test_line_along_a_fringe_hits_it_once() {
    let (mut reg, map) = columns();
    let changed = label_along_line(&mut reg, &map, &line(2.0, 0.0, 2.0, 9.0), LabelDirection::Increment);
    assert_eq!(changed, vec![0]);
    assert_eq!(reg.phases(), vec![Some(0), None, None]);
}

#[test]
fn test_line_missing_every_fringe_changes_nothing() {
    let (mut reg, map) = columns();
    let before = reg.clone();
    let changed = label_along_line(&mut reg, &map, &line(0.0, 0.0, 0.0, 9.0), LabelDirection::Increment);
    assert!(changed.is_empty());
    assert_eq!(reg, before);

    // Outside the image.
    let changed = label_along_line(&mut reg, &map, &line(-5.0, -5.0, 40.0, -5.0), LabelDirection::Increment);
    assert!(changed.is_empty());
}

#[test]
fn test_polyline_crosses_back() {
    let (mut reg, map) = columns();
    let path = vec![
        Point2::new(0.0, 3.0),
        Point2::new(6.0, 3.0),
        Point2::new(6.0, 7.0),
        Point2::new(0.0, 7.0),
    ];
    let changed = label_along_line(&mut reg, &map, &path, LabelDirection::Increment);
    // Recrossing fringe 1 right after it does not count; fringe 0 is hit again.
    assert_eq!(changed, vec![0, 1, 0]);
    assert_eq!(reg.phases(), vec![Some(2), Some(1), None]);
    assert_eq!(reg.max, 2);
}

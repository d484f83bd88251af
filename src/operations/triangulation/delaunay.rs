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

use std::collections::HashMap;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use tracing::{debug, trace};

use crate::error::{Error, Result};
use crate::geometry::Point2;
use crate::kernel::{all_collinear, incircle, orient2d, strictly_between};
use crate::operations::triangulation::Triangulation;

/// Vertex id of the point at infinity closing the convex hull.
const GHOST: usize = usize::MAX;

/// Incremental Bowyer-Watson triangulation.
///
/// The hull is closed by ghost triangles `(a, b, GHOST)` instead of a finite
/// super-triangle, so the output covers exactly the convex hull of the input.
/// Triangles are counter-clockwise; neighbour `i` lies across the edge
/// opposite vertex `i`.
pub struct Delaunay<'a> {
    points: &'a [Point2],
    verts: Vec<[usize; 3]>,
    nbrs: Vec<[usize; 3]>,
    alive: Vec<bool>,
    free: Vec<usize>,
    last: usize,
    rng: StdRng,
    marks: Vec<u32>,
    epoch: u32,
    duplicates: usize,
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Located {
    Seed(usize),
    Duplicate,
}

impl<'a> Delaunay<'a> {
    /// Triangulates `points`. Exact duplicates are skipped and stay
    /// unreferenced. Insertion order is a shuffle seeded with `seed`.
    pub fn build(points: &'a [Point2], seed: u64) -> Result<Triangulation> {
        let mut order: Vec<usize> = (0..points.len()).collect();
        let mut rng = StdRng::seed_from_u64(seed);
        order.shuffle(&mut rng);

        let Some((i0, i1, i2)) = initial_triangle(points, &order)? else {
            return Err(Error::Collinear {
                count: points.len(),
            });
        };

        let mut dt = Delaunay {
            points,
            verts: Vec::with_capacity(2 * points.len() + 4),
            nbrs: Vec::with_capacity(2 * points.len() + 4),
            alive: Vec::with_capacity(2 * points.len() + 4),
            free: Vec::new(),
            last: 0,
            rng,
            marks: Vec::new(),
            epoch: 0,
            duplicates: 0,
        };
        dt.seed_triangle(i0, i1, i2);

        for &pid in &order {
            if pid == i0 || pid == i1 || pid == i2 {
                continue;
            }
            dt.insert(pid)?;
        }

        let out = dt.finish();
        debug!(
            points = points.len(),
            triangles = out.triangles.len(),
            duplicates = dt.duplicates,
            "delaunay triangulation built"
        );
        Ok(out)
    }

    fn seed_triangle(&mut self, a: usize, b: usize, c: usize) {
        let (a, b, c) = if orient2d(&self.points[a], &self.points[b], &self.points[c]).is_positive()
        {
            (a, b, c)
        } else {
            (a, c, b)
        };
        let t = self.alloc([a, b, c]);
        let g0 = self.alloc([c, b, GHOST]);
        let g1 = self.alloc([a, c, GHOST]);
        let g2 = self.alloc([b, a, GHOST]);
        link_by_edges(&self.verts, &mut self.nbrs, &[t, g0, g1, g2]);
        self.last = t;
    }

    fn alloc(&mut self, v: [usize; 3]) -> usize {
        if let Some(idx) = self.free.pop() {
            self.verts[idx] = v;
            self.nbrs[idx] = [GHOST; 3];
            self.alive[idx] = true;
            idx
        } else {
            self.verts.push(v);
            self.nbrs.push([GHOST; 3]);
            self.alive.push(true);
            self.marks.push(0);
            self.verts.len() - 1
        }
    }

    #[inline]
    fn ghost_slot(&self, t: usize) -> Option<usize> {
        self.verts[t].iter().position(|&v| v == GHOST)
    }

    /// Whether triangle `t` must be removed when `p` is inserted.
    fn in_cavity(&self, t: usize, p: &Point2) -> bool {
        let v = self.verts[t];
        match self.ghost_slot(t) {
            None => incircle(&self.points[v[0]], &self.points[v[1]], &self.points[v[2]], p)
                .is_positive(),
            Some(k) => {
                let a = &self.points[v[(k + 1) % 3]];
                let b = &self.points[v[(k + 2) % 3]];
                let s = orient2d(a, b, p);
                s.is_positive() || (s.is_zero() && strictly_between(a, b, p))
            }
        }
    }

    /// Stochastic visibility walk from the last created triangle.
    fn locate(&mut self, p: &Point2) -> Located {
        let mut t = self.last;
        if let Some(k) = self.ghost_slot(t) {
            t = self.nbrs[t][k];
        }
        let max_steps = 4 * self.verts.len() + 16;
        for _ in 0..max_steps {
            let v = self.verts[t];
            let start = self.rng.random_range(0..3);
            let mut next = None;
            for off in 0..3 {
                let i = (start + off) % 3;
                let a = &self.points[v[(i + 1) % 3]];
                let b = &self.points[v[(i + 2) % 3]];
                if orient2d(a, b, p).is_negative() {
                    next = Some(self.nbrs[t][i]);
                    break;
                }
            }
            match next {
                None => {
                    if v.iter().any(|&q| self.points[q] == *p) {
                        return Located::Duplicate;
                    }
                    return Located::Seed(t);
                }
                Some(n) if self.ghost_slot(n).is_some() => return Located::Seed(n),
                Some(n) => t = n,
            }
        }
        // Exact predicates keep the walk finite on a Delaunay mesh; the scan
        // only guards against corrupted adjacency.
        self.locate_by_scan(p)
    }

    fn locate_by_scan(&self, p: &Point2) -> Located {
        for t in 0..self.verts.len() {
            if !self.alive[t] {
                continue;
            }
            let v = self.verts[t];
            if self.ghost_slot(t).is_none() && v.iter().any(|&q| self.points[q] == *p) {
                return Located::Duplicate;
            }
        }
        for t in 0..self.verts.len() {
            if self.alive[t] && self.in_cavity(t, p) {
                return Located::Seed(t);
            }
        }
        Located::Duplicate
    }

    fn insert(&mut self, pid: usize) -> Result<()> {
        let p = self.points[pid];
        let seed = match self.locate(&p) {
            Located::Duplicate => {
                self.duplicates += 1;
                trace!(pid, "duplicate point skipped");
                return Ok(());
            }
            Located::Seed(t) => t,
        };

        self.epoch = self.epoch.wrapping_add(2);
        if self.epoch == 0 {
            self.marks.iter_mut().for_each(|m| *m = 0);
            self.epoch = 2;
        }
        let bad = self.epoch;
        let good = self.epoch + 1;

        // Grow the cavity over the neighbour graph.
        let mut cavity = vec![seed];
        let mut stack = vec![seed];
        self.marks[seed] = bad;
        let mut boundary: Vec<(usize, usize, usize)> = Vec::new();
        while let Some(t) = stack.pop() {
            let v = self.verts[t];
            for i in 0..3 {
                let n = self.nbrs[t][i];
                let is_bad = if self.marks[n] == bad {
                    continue;
                } else if self.marks[n] == good {
                    false
                } else if self.in_cavity(n, &p) {
                    self.marks[n] = bad;
                    true
                } else {
                    self.marks[n] = good;
                    false
                };
                if is_bad {
                    cavity.push(n);
                    stack.push(n);
                } else {
                    boundary.push((v[(i + 1) % 3], v[(i + 2) % 3], n));
                }
            }
        }

        for &t in &cavity {
            self.alive[t] = false;
            self.free.push(t);
        }

        // Fan the cavity boundary around the new vertex.
        let mut by_start: HashMap<usize, usize> = HashMap::with_capacity(boundary.len());
        let mut by_end: HashMap<usize, usize> = HashMap::with_capacity(boundary.len());
        let mut created = Vec::with_capacity(boundary.len());
        for &(a, b, outside) in &boundary {
            let t = self.alloc([a, b, pid]);
            self.nbrs[t][2] = outside;
            if let Some(j) = self.verts[outside].iter().position(|&w| w != a && w != b) {
                self.nbrs[outside][j] = t;
            }
            by_start.insert(a, t);
            by_end.insert(b, t);
            created.push(t);
        }
        for &t in &created {
            let [a, b, _] = self.verts[t];
            let (Some(&after), Some(&before)) = (by_start.get(&b), by_end.get(&a)) else {
                return Err(Error::BrokenCavity { point: pid });
            };
            self.nbrs[t][0] = after;
            self.nbrs[t][1] = before;
        }
        if let Some(&t) = created.last() {
            self.last = t;
        }
        Ok(())
    }

    fn finish(&self) -> Triangulation {
        let mut remap = vec![usize::MAX; self.verts.len()];
        let mut triangles = Vec::new();
        for t in 0..self.verts.len() {
            if self.alive[t] && self.ghost_slot(t).is_none() {
                remap[t] = triangles.len();
                triangles.push(self.verts[t]);
            }
        }
        let mut neighbors = Vec::with_capacity(triangles.len());
        for t in 0..self.verts.len() {
            if remap[t] == usize::MAX {
                continue;
            }
            let mut row = [None; 3];
            for i in 0..3 {
                let n = self.nbrs[t][i];
                if n < remap.len() && remap[n] != usize::MAX {
                    row[i] = Some(remap[n]);
                }
            }
            neighbors.push(row);
        }
        Triangulation {
            triangles,
            neighbors,
        }
    }
}

/// Picks three non-collinear points, scanning in insertion order.
/// `Ok(None)` when every point lies on one line.
fn initial_triangle(points: &[Point2], order: &[usize]) -> Result<Option<(usize, usize, usize)>> {
    let Some(&i0) = order.first() else {
        return Err(Error::TooFewPoints { found: 0 });
    };
    let p0 = points[i0];
    let Some(&i1) = order.iter().find(|&&i| points[i] != p0) else {
        return Err(Error::TooFewPoints { found: 1 });
    };
    let p1 = points[i1];
    let i2 = order
        .iter()
        .copied()
        .find(|&i| !orient2d(&p0, &p1, &points[i]).is_zero());
    match i2 {
        Some(i2) => Ok(Some((i0, i1, i2))),
        None => {
            debug_assert!(all_collinear(points));
            if distinct_count(points) < 3 {
                return Err(Error::TooFewPoints {
                    found: distinct_count(points),
                });
            }
            Ok(None)
        }
    }
}

fn distinct_count(points: &[Point2]) -> usize {
    let mut keys: Vec<(u64, u64)> = points.iter().map(Point2::bits).collect();
    keys.sort_unstable();
    keys.dedup();
    keys.len()
}

/// Links triangles in `tris` that share a directed edge in opposite
/// directions.
fn link_by_edges(verts: &[[usize; 3]], nbrs: &mut [[usize; 3]], tris: &[usize]) {
    let mut edges: HashMap<(usize, usize), (usize, usize)> = HashMap::new();
    for &t in tris {
        let v = verts[t];
        for i in 0..3 {
            edges.insert((v[(i + 1) % 3], v[(i + 2) % 3]), (t, i));
        }
    }
    for &t in tris {
        let v = verts[t];
        for i in 0..3 {
            if let Some(&(n, _)) = edges.get(&(v[(i + 2) % 3], v[(i + 1) % 3])) {
                nbrs[t][i] = n;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pts(raw: &[(f64, f64)]) -> Vec<Point2> {
        raw.iter().map(|&(x, y)| Point2::new(x, y)).collect()
    }

    #[test]
    fn single_triangle() {
        let p = pts(&[(0.0, 0.0), (1.0, 0.0), (0.0, 1.0)]);
        let t = Delaunay::build(&p, 0).unwrap();
        assert_eq!(t.triangles.len(), 1);
        assert_eq!(t.neighbors[0], [None, None, None]);
    }

    #[test]
    fn square_gives_two_triangles() {
        let p = pts(&[(0.0, 0.0), (2.0, 0.0), (2.0, 2.0), (0.0, 2.0)]);
        let t = Delaunay::build(&p, 3).unwrap();
        assert_eq!(t.triangles.len(), 2);
        let shared = t.neighbors.iter().flatten().count();
        assert_eq!(shared, 2);
    }

    #[test]
    fn collinear_input_is_rejected() {
        let p = pts(&[(0.0, 0.0), (1.0, 1.0), (2.0, 2.0), (3.0, 3.0)]);
        assert!(matches!(
            Delaunay::build(&p, 0),
            Err(Error::Collinear { count: 4 })
        ));
    }

    #[test]
    fn duplicates_do_not_count() {
        let p = pts(&[(0.0, 0.0), (0.0, 0.0), (1.0, 0.0)]);
        assert!(matches!(
            Delaunay::build(&p, 0),
            Err(Error::TooFewPoints { found: 2 })
        ));
    }

    #[test]
    fn collinear_hull_points_are_kept() {
        // Five points along the bottom edge plus one apex.
        let p = pts(&[
            (0.0, 0.0),
            (1.0, 0.0),
            (2.0, 0.0),
            (3.0, 0.0),
            (4.0, 0.0),
            (2.0, 3.0),
        ]);
        let t = Delaunay::build(&p, 11).unwrap();
        assert_eq!(t.triangles.len(), 4);
        for tri in &t.triangles {
            assert!(orient2d(&p[tri[0]], &p[tri[1]], &p[tri[2]]).is_positive());
        }
    }
}

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

use tracing::{debug, info, trace};

use crate::config::RepairOptions;
use crate::geometry::triangle_area;
use crate::mesh::{Mesh, Triangle};
use crate::progress::Progress;

/// Outcome of a repair run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RepairReport {
    pub triangles_before: usize,
    pub triangles_after: usize,
    pub flat_before: usize,
    /// Flat triangles left without a sloped neighbour across a long edge.
    pub flat_after: usize,
    pub flips: usize,
    pub insertions: usize,
    pub passes: usize,
    /// The sweep loop stopped on `max_passes` instead of a quiet sweep.
    pub hit_pass_limit: bool,
}

impl RepairReport {
    pub fn flat_fraction_before(&self) -> f64 {
        fraction(self.flat_before, self.triangles_before)
    }

    pub fn flat_fraction_after(&self) -> f64 {
        fraction(self.flat_after, self.triangles_after)
    }
}

fn fraction(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64
    }
}

/// How a flat triangle was resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fix {
    Flip { neighbor: usize },
    Insert { point: usize },
}

impl Mesh {
    /// Removes flat triangles by diagonal flips or midpoint insertion until a
    /// sweep changes nothing.
    ///
    /// A flat triangle with no sloped neighbour across a long edge is
    /// deferred; if no later change gives it one, it stays flat. This is a
    /// heuristic: such triangles are left as is and interpolate to their
    /// common value.
    pub fn repair(&mut self, options: &RepairOptions, progress: &mut dyn Progress) -> RepairReport {
        let mut report = RepairReport {
            triangles_before: self.triangles.len(),
            flat_before: self.flat_triangles.len(),
            ..Default::default()
        };
        progress.report("Removing flat triangles", Some(15.0));
        let initial = self.flat_triangles.len();

        let mut changes = usize::from(initial > 0);
        while changes > 0 {
            if report.passes >= options.max_passes {
                report.hit_pass_limit = true;
                break;
            }
            changes = 0;
            let mut i = 0;
            while i < self.flat_triangles.len() {
                let t = self.flat_triangles[i];
                match self.fix_flat(t, options.area_tolerance) {
                    None => i += 1,
                    Some(fix) => {
                        match fix {
                            Fix::Flip { .. } => report.flips += 1,
                            Fix::Insert { .. } => report.insertions += 1,
                        }
                        trace!(triangle = t, ?fix, "flat triangle fixed");
                        self.flat_triangles.remove(i);
                        changes += 1;
                    }
                }
            }
            report.passes += 1;
            debug!(
                pass = report.passes,
                changes,
                remaining = self.flat_triangles.len(),
                "repair sweep"
            );
            let done = if initial == 0 {
                1.0
            } else {
                1.0 - self.flat_triangles.len() as f64 / initial as f64
            };
            progress.report("Removing flat triangles", Some(15.0 + 55.0 * done));
        }

        report.flat_after = self.flat_triangles.len();
        report.triangles_after = self.triangles.len();
        info!(
            flips = report.flips,
            insertions = report.insertions,
            passes = report.passes,
            unrepairable = report.flat_after,
            "flat triangles {:.2}% -> {:.2}%",
            100.0 * report.flat_fraction_before(),
            100.0 * report.flat_fraction_after()
        );
        report
    }

    /// Resolves one flat triangle, `None` when it has no sloped neighbour
    /// across a long edge.
    pub fn fix_flat(&mut self, t: usize, area_tolerance: f64) -> Option<Fix> {
        let (n, i, j) = self.sloped_neighbor(t)?;
        if self.flip_is_safe(t, n, i, j, area_tolerance) {
            self.flip_edge(t, n, i, j)
                .then_some(Fix::Flip { neighbor: n })
        } else {
            self.split_edge(t, n, i, j)
                .map(|point| Fix::Insert { point })
        }
    }

    /// The quad `t + n` is convex when both diagonal splits cover the same
    /// area and the alternate split has no degenerate half.
    fn flip_is_safe(&self, t: usize, n: usize, i: usize, j: usize, tolerance: f64) -> bool {
        let tri = &self.triangles[t];
        let a = self.points[tri.vertices[i]];
        let b = self.points[tri.vertices[(i + 1) % 3]];
        let c = self.points[tri.vertices[(i + 2) % 3]];
        let d = self.points[self.triangles[n].vertices[j]];

        let before = triangle_area(&a, &b, &c) + triangle_area(&d, &c, &b);
        let after1 = triangle_area(&a, &b, &d);
        let after2 = triangle_area(&a, &d, &c);
        let scale = before.max(1.0);
        let zero = tolerance * scale;
        ((after1 + after2) - before).abs() <= zero && after1 > zero && after2 > zero
    }

    /// Swaps the diagonal shared by `t` (edge slot `i`) and `n` (slot `j`).
    ///
    /// With `t = (a, b, c)` and apex `d` in `n`, `t` becomes `(a, d, c)` and
    /// `n` trades `c` for `a`. Returns `false` when the two triangles do not
    /// share that edge.
    pub fn flip_edge(&mut self, t: usize, n: usize, i: usize, j: usize) -> bool {
        let tv = self.triangles[t].vertices;
        let tn = self.triangles[t].neighbors;
        let (a, b, c) = (tv[i], tv[(i + 1) % 3], tv[(i + 2) % 3]);
        let nn = self.triangles[n].neighbors;
        let d = self.triangles[n].vertices[j];
        let (Some(jb), Some(jc)) = self.shared_slots(n, b, c) else {
            return false;
        };

        // Triangles across (a, b) and (c, d) change owner.
        let across_ab = tn[(i + 2) % 3];
        let across_cd = nn[jb];

        {
            let tri = &mut self.triangles[t];
            tri.vertices[(i + 1) % 3] = d;
            tri.neighbors[i] = across_cd;
            tri.neighbors[(i + 2) % 3] = Some(n);
            tri.flat = false;
        }
        {
            let tri = &mut self.triangles[n];
            tri.vertices[jc] = a;
            tri.neighbors[j] = across_ab;
            tri.neighbors[jb] = Some(t);
        }
        if let Some(x) = across_cd {
            self.triangles[x].replace_neighbor(n, t);
        }
        if let Some(x) = across_ab {
            self.triangles[x].replace_neighbor(t, n);
        }
        let long_edge = self.long_edge;
        self.triangles[t].refresh_long_edges(&self.points, long_edge);
        self.triangles[n].refresh_long_edges(&self.points, long_edge);
        true
    }

    /// Inserts the midpoint `m` of the edge shared by `t` (slot `i`) and `n`
    /// (slot `j`) and splits both triangles, returning the new point index.
    ///
    /// The value of `m` interpolates the two off-edge vertices, each weighted
    /// by the distance from `m` to the other one.
    pub fn split_edge(&mut self, t: usize, n: usize, i: usize, j: usize) -> Option<usize> {
        let tv = self.triangles[t].vertices;
        let (a, b, c) = (tv[i], tv[(i + 1) % 3], tv[(i + 2) % 3]);
        let d = self.triangles[n].vertices[j];
        let (Some(jb), Some(jc)) = self.shared_slots(n, b, c) else {
            return None;
        };

        let m_point = self.points[b].midpoint(&self.points[c]);
        let da = m_point.distance_to(&self.points[a]);
        let dd = m_point.distance_to(&self.points[d]);
        let value = if da + dd > 0.0 {
            (dd * self.values[a] + da * self.values[d]) / (da + dd)
        } else {
            0.5 * (self.values[a] + self.values[d])
        };
        let m = self.points.len();
        self.points.push(m_point);
        self.values.push(value);

        let t2 = self.triangles.len();
        let n2 = t2 + 1;
        let mut t_half = Triangle::split_from(&self.triangles[t]);
        let mut n_half = Triangle::split_from(&self.triangles[n]);
        let across_ab = t_half.neighbors[(i + 2) % 3];
        let across_bd = n_half.neighbors[jc];

        // t = (a, m, c), t2 = (a, b, m)
        {
            let tri = &mut self.triangles[t];
            tri.vertices[(i + 1) % 3] = m;
            tri.neighbors[(i + 2) % 3] = Some(t2);
            tri.flat = false;
        }
        t_half.vertices[(i + 2) % 3] = m;
        t_half.neighbors[i] = Some(n2);
        t_half.neighbors[(i + 1) % 3] = Some(t);

        // n = (d, m, c) and n2 = (d, b, m), in n's slot order
        {
            let tri = &mut self.triangles[n];
            tri.vertices[jb] = m;
            tri.neighbors[jc] = Some(n2);
        }
        n_half.vertices[jc] = m;
        n_half.neighbors[j] = Some(t2);
        n_half.neighbors[jb] = Some(n);

        self.triangles.push(t_half);
        self.triangles.push(n_half);
        if let Some(x) = across_ab {
            self.triangles[x].replace_neighbor(t, t2);
        }
        if let Some(x) = across_bd {
            self.triangles[x].replace_neighbor(n, n2);
        }

        let long_edge = self.long_edge;
        for k in [t, n, t2, n2] {
            self.triangles[k].refresh_long_edges(&self.points, long_edge);
        }
        Some(m)
    }

    #[inline]
    fn shared_slots(&self, n: usize, b: usize, c: usize) -> (Option<usize>, Option<usize>) {
        let tri = &self.triangles[n];
        (tri.slot_of_vertex(b), tri.slot_of_vertex(c))
    }
}

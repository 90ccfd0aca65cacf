use std::f64::consts::TAU;

use crate::geom::V2;

/// One acquisition sweep in raster pixel space.
///
/// `width` is the number of samples (a-scans) along the path.
#[derive(Clone, Debug, PartialEq)]
pub enum ScanPath {
    Line {
        start: V2,
        end: V2,
        width: usize,
    },
    Arc {
        start: V2,
        center: V2,
        clockwise: bool,
        width: usize,
    },
    Unknown,
}

impl ScanPath {
    pub fn width(&self) -> usize {
        match self {
            ScanPath::Line { width, .. } | ScanPath::Arc { width, .. } => *width,
            ScanPath::Unknown => 0,
        }
    }

    /// Builds the sampler for this path, or `None` when the path contributes no samples:
    /// unknown kind, fewer than 2 samples, or an arc whose start equals its center.
    pub fn sampler(&self) -> Option<PathSampler> {
        let width = self.width();
        if width < 2 {
            return None;
        }

        let curve = match *self {
            ScanPath::Line { start, end, .. } => {
                if !start.is_finite() || !end.is_finite() {
                    log::warn!("line scan with non-finite end points skipped");
                    return None;
                }
                Curve::Line { start, end }
            }
            ScanPath::Arc {
                start,
                center,
                clockwise,
                ..
            } => {
                let radius = start.dist(center);
                if !(radius > 0.0 && radius.is_finite()) {
                    log::warn!(
                        "arc scan with radius {radius} around ({}, {}) skipped",
                        center.x,
                        center.y
                    );
                    return None;
                }
                let ratio = ((start.x - center.x) / radius).clamp(-1.0, 1.0);
                Curve::Arc {
                    center,
                    radius,
                    null_angle: ratio.acos() / TAU,
                    rotation: if clockwise { 1.0 } else { -1.0 },
                }
            }
            ScanPath::Unknown => return None,
        };

        Some(PathSampler { curve, width })
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
enum Curve {
    Line {
        start: V2,
        end: V2,
    },
    Arc {
        center: V2,
        radius: f64,
        null_angle: f64,
        rotation: f64,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Dir {
    Fwd,
    Bwd,
}

/// Indexed evaluation of a path's samples. Always holds at least 2 samples.
#[derive(Clone, Debug, PartialEq)]
pub struct PathSampler {
    curve: Curve,
    width: usize,
}

impl PathSampler {
    /// Number of samples, at least 2.
    pub fn n_samples(&self) -> usize {
        self.width
    }

    /// Position of sample `i`, evaluated at `v = i / (width - 1)`.
    pub fn position(&self, i: usize) -> V2 {
        debug_assert!(i < self.width, "sample {i} outside 0..{}", self.width);
        let v = i as f64 / (self.width - 1) as f64;
        match self.curve {
            Curve::Line { start, end } => start.lerp(end, v),
            Curve::Arc {
                center,
                radius,
                null_angle,
                rotation,
            } => {
                let angle = (v + null_angle) * TAU * rotation;
                V2::new(
                    center.x + angle.cos() * radius,
                    center.y + angle.sin() * radius,
                )
            }
        }
    }

    /// Sequential traversal `0..width`.
    pub fn samples(&self) -> impl Iterator<Item = (usize, V2)> + '_ {
        (0..self.width).map(move |i| (i, self.position(i)))
    }

    /// Visits the samples after `start` in direction `dir` (excluding `start`) until
    /// `keep_going` returns false or the path ends.
    pub fn walk<F: FnMut(usize, V2) -> bool>(&self, start: usize, dir: Dir, mut keep_going: F) {
        let mut i = start;
        loop {
            i = match dir {
                Dir::Fwd if i + 1 < self.width => i + 1,
                Dir::Bwd if i > 0 => i - 1,
                _ => return,
            };
            if !keep_going(i, self.position(i)) {
                return;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_near(a: V2, b: V2) {
        assert!(a.dist(b) < 1e-9, "{a:?} != {b:?}");
    }

    #[test]
    fn line_samples_are_evenly_spaced_and_inclusive() {
        let path = ScanPath::Line {
            start: V2::new(0.0, 0.0),
            end: V2::new(9.0, 3.0),
            width: 4,
        };
        let sampler = path.sampler().unwrap();
        let pts: Vec<(usize, V2)> = sampler.samples().collect();
        assert_eq!(pts.len(), 4);
        assert_eq!(pts[0], (0, V2::new(0.0, 0.0)));
        assert_near(pts[1].1, V2::new(3.0, 1.0));
        assert_near(pts[3].1, V2::new(9.0, 3.0));
    }

    #[test]
    fn arc_starts_at_start_and_turns_by_rotation() {
        let center = V2::new(10.0, 10.0);
        let cw = ScanPath::Arc {
            start: V2::new(15.0, 10.0),
            center,
            clockwise: true,
            width: 5,
        }
        .sampler()
        .unwrap();
        assert_near(cw.position(0), V2::new(15.0, 10.0));
        assert_near(cw.position(1), V2::new(10.0, 15.0));
        assert_near(cw.position(2), V2::new(5.0, 10.0));
        assert_near(cw.position(4), V2::new(15.0, 10.0));

        let ccw = ScanPath::Arc {
            start: V2::new(15.0, 10.0),
            center,
            clockwise: false,
            width: 5,
        }
        .sampler()
        .unwrap();
        assert_near(ccw.position(1), V2::new(10.0, 5.0));
    }

    #[test]
    fn arc_samples_stay_on_the_circle() {
        let center = V2::new(20.0, 20.0);
        let sampler = ScanPath::Arc {
            start: V2::new(23.0, 24.0),
            center,
            clockwise: false,
            width: 64,
        }
        .sampler()
        .unwrap();
        for (_, p) in sampler.samples() {
            assert!((p.dist(center) - 5.0).abs() < 1e-9);
        }
    }

    #[test]
    fn degenerate_paths_have_no_sampler() {
        let one = ScanPath::Line {
            start: V2::new(0.0, 0.0),
            end: V2::new(4.0, 0.0),
            width: 1,
        };
        assert!(one.sampler().is_none());

        let zero_radius = ScanPath::Arc {
            start: V2::new(3.0, 3.0),
            center: V2::new(3.0, 3.0),
            clockwise: true,
            width: 32,
        };
        assert!(zero_radius.sampler().is_none());

        assert!(ScanPath::Unknown.sampler().is_none());
    }

    #[test]
    fn walk_stops_on_predicate_and_at_ends() {
        let sampler = ScanPath::Line {
            start: V2::new(0.0, 0.0),
            end: V2::new(5.0, 0.0),
            width: 6,
        }
        .sampler()
        .unwrap();

        let mut fwd = Vec::new();
        sampler.walk(2, Dir::Fwd, |i, _| {
            fwd.push(i);
            true
        });
        assert_eq!(fwd, vec![3, 4, 5]);

        let mut bwd = Vec::new();
        sampler.walk(2, Dir::Bwd, |i, _| {
            bwd.push(i);
            i > 1
        });
        assert_eq!(bwd, vec![1]);

        let mut none = Vec::new();
        sampler.walk(5, Dir::Fwd, |i, _| {
            none.push(i);
            true
        });
        assert!(none.is_empty());
    }
}

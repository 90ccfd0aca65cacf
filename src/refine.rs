use crate::geom::V2;
use crate::scan_path::{Dir, PathSampler};
use crate::wavefront::{Best2, Candidate};

/// A refined nearest point on one path: exact sample index and Euclidean distance.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PathHit {
    pub path_id: usize,
    pub sample_i: usize,
    pub distance: f64,
}

/// Local search for the sample nearest to `pos`, starting at `start_i`.
///
/// Walks outward in each direction independently, stopping at the first step that
/// does not decrease the distance. Returns the sample index and the squared distance.
pub fn nearest_sample(sampler: &PathSampler, pos: V2, start_i: usize) -> (usize, f64) {
    let start_i = start_i.min(sampler.n_samples() - 1);
    let start_d = sampler.position(start_i).dist_sq(pos);

    let mut min_i = start_i;
    let mut min_d = start_d;
    for dir in [Dir::Fwd, Dir::Bwd] {
        let mut prev_d = start_d;
        sampler.walk(start_i, dir, |i, p| {
            let d = p.dist_sq(pos);
            if d >= prev_d {
                return false;
            }
            prev_d = d;
            if d < min_d {
                min_d = d;
                min_i = i;
            }
            true
        });
    }

    (min_i, min_d)
}

/// Refines one coarse candidate, or discards it when its path id no longer
/// resolves to a sampled path.
pub fn refine_candidate(
    samplers: &[Option<PathSampler>],
    pos: V2,
    cand: &Candidate,
) -> Option<PathHit> {
    let sampler = samplers.get(cand.path_id)?.as_ref()?;
    let (sample_i, d_sq) = nearest_sample(sampler, pos, cand.sample_i);
    Some(PathHit {
        path_id: cand.path_id,
        sample_i,
        distance: d_sq.sqrt(),
    })
}

/// Refines both candidates of pixel `(x, y)`. Valid hits come first, ordered by
/// ascending distance; the earlier candidate stays first on a tie.
pub fn refine_pixel(
    samplers: &[Option<PathSampler>],
    x: usize,
    y: usize,
    best: &Best2,
) -> [Option<PathHit>; 2] {
    let pos = V2::new(x as f64, y as f64);
    let refined = best.slots.map(|slot| {
        slot.as_ref()
            .and_then(|cand| refine_candidate(samplers, pos, cand))
    });

    match refined {
        [Some(a), Some(b)] if b.distance < a.distance => [Some(b), Some(a)],
        [None, Some(b)] => [Some(b), None],
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scan_path::ScanPath;
    use crate::test_helpers::line;

    #[test]
    fn nearest_sample_walks_downhill_from_a_bad_guess() {
        let sampler = line(0.0, 0.0, 99.0, 0.0, 100).sampler().unwrap();
        let pos = V2::new(40.0, 3.0);

        assert_eq!(nearest_sample(&sampler, pos, 10), (40, 9.0));
        assert_eq!(nearest_sample(&sampler, pos, 90), (40, 9.0));
        assert_eq!(nearest_sample(&sampler, pos, 40), (40, 9.0));
    }

    #[test]
    fn nearest_sample_stops_at_path_ends() {
        let sampler = line(0.0, 0.0, 9.0, 0.0, 10).sampler().unwrap();
        assert_eq!(nearest_sample(&sampler, V2::new(20.0, 0.0), 3), (9, 121.0));
        assert_eq!(nearest_sample(&sampler, V2::new(-2.0, 0.0), 3), (0, 4.0));
        // Out-of-range start indices are clamped to the last sample.
        assert_eq!(nearest_sample(&sampler, V2::new(20.0, 0.0), 50), (9, 121.0));
    }

    #[test]
    fn nearest_sample_on_an_arc() {
        let sampler = ScanPath::Arc {
            start: V2::new(30.0, 20.0),
            center: V2::new(20.0, 20.0),
            clockwise: true,
            width: 361,
        }
        .sampler()
        .unwrap();

        // Straight below the center at 90 degrees (clockwise in raster y-down).
        let (i, d_sq) = nearest_sample(&sampler, V2::new(20.0, 33.0), 80);
        assert_eq!(i, 90);
        assert!((d_sq.sqrt() - 3.0).abs() < 1e-9);
    }

    #[test]
    fn unknown_path_ids_are_discarded() {
        let samplers = vec![line(0.0, 0.0, 9.0, 0.0, 10).sampler(), None];
        let pos = V2::new(3.0, 4.0);
        let mk = |path_id| Candidate {
            distance: 4,
            path_id,
            sample_i: 3,
        };
        assert!(refine_candidate(&samplers, pos, &mk(0)).is_some());
        assert!(refine_candidate(&samplers, pos, &mk(1)).is_none());
        assert!(refine_candidate(&samplers, pos, &mk(7)).is_none());
    }

    #[test]
    fn refine_pixel_reorders_and_compacts() {
        let samplers = vec![
            line(0.0, 0.0, 9.0, 0.0, 10).sampler(),
            line(0.0, 6.0, 9.0, 6.0, 10).sampler(),
        ];
        let mut best = Best2::default();
        // Coarse order says path 0 is closer; the exact distances disagree.
        best.offer(Candidate {
            distance: 4,
            path_id: 0,
            sample_i: 0,
        });
        best.offer(Candidate {
            distance: 5,
            path_id: 1,
            sample_i: 0,
        });
        let hits = refine_pixel(&samplers, 4, 4, &best);
        assert_eq!(hits[0].unwrap().path_id, 1);
        assert!((hits[0].unwrap().distance - 2.0).abs() < 1e-9);
        assert_eq!(hits[1].unwrap().path_id, 0);
        assert_eq!(hits[1].unwrap().sample_i, 4);

        let mut stale = Best2::default();
        stale.offer(Candidate {
            distance: 1,
            path_id: 9,
            sample_i: 0,
        });
        stale.offer(Candidate {
            distance: 2,
            path_id: 1,
            sample_i: 2,
        });
        let hits = refine_pixel(&samplers, 4, 4, &stale);
        assert_eq!(hits[0].unwrap().path_id, 1);
        assert!(hits[1].is_none());
    }
}

use crate::im::{Im, MASK_SET, MaskIm};
use crate::scan_path::PathSampler;
use crate::trail_map::TrailMap;

/// A path-sample reached by a wavefront: coarse L1 distance, path id and the sample
/// index carried along with the front.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Candidate {
    pub distance: u32,
    pub path_id: usize,
    pub sample_i: usize,
}

/// The two smallest candidates seen for one pixel, ascending. An empty slot counts
/// as infinitely far.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Best2 {
    pub slots: [Option<Candidate>; 2],
}

impl Best2 {
    /// Keeps `cand` if it is strictly closer than the current second slot.
    /// On equal distance the candidate seen first wins.
    pub fn offer(&mut self, cand: Candidate) -> bool {
        if let Some(second) = self.slots[1] {
            if second.distance <= cand.distance {
                return false;
            }
        }
        self.slots[1] = Some(cand);
        let swap = match self.slots[0] {
            None => true,
            Some(first) => cand.distance < first.distance,
        };
        if swap {
            self.slots.swap(0, 1);
        }
        true
    }

    pub fn is_empty(&self) -> bool {
        self.slots[0].is_none()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Candidate> {
        self.slots.iter().flatten()
    }
}

/// Coarse per-pixel top-2, the output of propagation.
pub type CoarseMap = Im<Best2, 1>;

/// Per-round view of a pixel, derived from the barrier mask and scratch.
#[cfg(test)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Status {
    FarAway,
    Accepted,
    Blocked,
}

/// Round-scoped pixel state, wiped at every round end.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
struct Scratch {
    accepted: bool,
    owner_sample_i: usize,
}

/// Multi-source bucketed BFS over the raster, one round per path.
///
/// Three explicit layers of state:
///  * `barrier` is permanent for the run: hull exterior plus every path's sample pixels.
///  * `best` persists across rounds and accumulates the top-2 candidates.
///  * `scratch` only lives for one round.
pub struct Wavefront {
    w: usize,
    h: usize,
    max_distance: u32,
    barrier: MaskIm,
    best: CoarseMap,
    scratch: Im<Scratch, 1>,
    trail: TrailMap<usize>,
}

impl Wavefront {
    pub fn new(w: usize, h: usize, max_distance: u32) -> Self {
        // An L1 front never travels farther than w + h; larger bounds grow on push.
        let reach = u32::try_from(w + h).unwrap_or(u32::MAX);
        Self {
            w,
            h,
            max_distance,
            barrier: MaskIm::new(w, h),
            best: CoarseMap::new(w, h),
            scratch: Im::new(w, h),
            trail: TrailMap::with_max_distance(max_distance.min(reach)),
        }
    }

    #[cfg(test)]
    fn status(&self, x: usize, y: usize) -> Status {
        let i = self.barrier.idx(x, y);
        if self.barrier.arr[i] != 0 {
            Status::Blocked
        } else if self.scratch.arr[i].accepted {
            Status::Accepted
        } else {
            Status::FarAway
        }
    }

    #[cfg(test)]
    fn best(&self) -> &CoarseMap {
        &self.best
    }

    pub fn into_coarse(self) -> CoarseMap {
        self.best
    }

    /// Permanently blocks every pixel set in `exterior`.
    pub fn block_exterior(&mut self, exterior: &MaskIm) {
        self.barrier.union_with(exterior);
    }

    /// Permanently blocks the sample pixels of a path without seeding it.
    pub fn mark_barrier(&mut self, sampler: &PathSampler) {
        for (_, p) in sampler.samples() {
            if let Some((x, y)) = p.to_pixel(self.w, self.h) {
                let i = self.barrier.idx(x, y);
                self.barrier.arr[i] = MASK_SET;
            }
        }
    }

    /// Seed, expand and close one propagation round for path `path_id`.
    pub fn run_round(&mut self, path_id: usize, sampler: &PathSampler) {
        self.seed(path_id, sampler);
        self.expand(path_id);
        self.end_round();
    }

    fn seed(&mut self, path_id: usize, sampler: &PathSampler) {
        for (sample_i, p) in sampler.samples() {
            let Some((x, y)) = p.to_pixel(self.w, self.h) else {
                continue;
            };
            let i = self.barrier.idx(x, y);
            self.barrier.arr[i] = MASK_SET;
            self.scratch.arr[i].owner_sample_i = sample_i;
            self.best.arr[i].offer(Candidate {
                distance: 0,
                path_id,
                sample_i,
            });
            self.trail.push(0, i);
        }
    }

    fn expand(&mut self, path_id: usize) {
        let w = self.w;
        let h = self.h;
        while let Some((dist, i)) = self.trail.pop() {
            let next_dist = dist + 1;
            if next_dist >= self.max_distance {
                // Buckets drain in order, nothing closer is left.
                break;
            }

            let owner = self.scratch.arr[i].owner_sample_i;
            let x = i % w;
            let y = i / w;
            if y > 0 {
                self.visit(i - w, next_dist, path_id, owner);
            }
            if y + 1 < h {
                self.visit(i + w, next_dist, path_id, owner);
            }
            if x > 0 {
                self.visit(i - 1, next_dist, path_id, owner);
            }
            if x + 1 < w {
                self.visit(i + 1, next_dist, path_id, owner);
            }
        }
    }

    #[inline]
    fn visit(&mut self, i: usize, dist: u32, path_id: usize, owner: usize) {
        if self.barrier.arr[i] != 0 || self.scratch.arr[i].accepted {
            return;
        }
        self.scratch.arr[i] = Scratch {
            accepted: true,
            owner_sample_i: owner,
        };
        self.best.arr[i].offer(Candidate {
            distance: dist,
            path_id,
            sample_i: owner,
        });
        self.trail.push(dist, i);
    }

    fn end_round(&mut self) {
        self.trail.clear();
        self.scratch.clear();
    }
}

/// Runs every propagation round and returns the coarse top-2 map.
///
/// All paths are marked as barriers before the first round, so no wavefront ever
/// crosses another path's samples regardless of round order.
pub fn propagate(
    samplers: &[Option<PathSampler>],
    w: usize,
    h: usize,
    max_distance: u32,
    exterior: Option<&MaskIm>,
) -> CoarseMap {
    let mut front = Wavefront::new(w, h, max_distance);
    if let Some(exterior) = exterior {
        front.block_exterior(exterior);
    }

    for sampler in samplers.iter().flatten() {
        front.mark_barrier(sampler);
    }

    for (path_id, sampler) in samplers.iter().enumerate() {
        if let Some(sampler) = sampler {
            front.run_round(path_id, sampler);
        }
    }

    front.into_coarse()
}

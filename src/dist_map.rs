use crate::im::{Im, Lum8Im, RGBAIm};
use crate::refine::{PathHit, refine_pixel};
use crate::region_mask::build_region_mask;
use crate::scan_path::PathSampler;
use crate::series::Series;
use crate::wavefront::{CoarseMap, propagate};

#[cfg(feature = "multithreading")]
use rayon::prelude::*;

/// The two nearest paths of one raster cell, nearest first.
///
/// `initialized` is false when the cell never received a candidate (outside the
/// hull, or farther than the propagation bound from every path). The second hit is
/// absent when only one candidate survived.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct OutputRecord {
    pub initialized: bool,
    pub hits: [Option<PathHit>; 2],
}

impl OutputRecord {
    pub fn nearest(&self) -> Option<&PathHit> {
        self.hits[0].as_ref()
    }

    pub fn second(&self) -> Option<&PathHit> {
        self.hits[1].as_ref()
    }

    /// Inverse-distance blend weights for the hits, summing to 1.
    ///
    /// A single hit gets weight 1; two hits at distance 0 split evenly.
    pub fn blend_weights(&self) -> Option<[(PathHit, f64); 2]> {
        let a = self.hits[0]?;
        let Some(b) = self.hits[1] else {
            return Some([(a, 1.0), (a, 0.0)]);
        };
        let sum = a.distance + b.distance;
        if sum <= 0.0 {
            return Some([(a, 0.5), (b, 0.5)]);
        }
        Some([(a, b.distance / sum), (b, a.distance / sum)])
    }
}

/// Per-pixel nearest-path records of a whole raster.
pub type PreCalcDataMatrix = Im<OutputRecord, 1>;

fn refine_row(
    samplers: &[Option<PathSampler>],
    coarse: &CoarseMap,
    y: usize,
    out_row: &mut [OutputRecord],
) {
    for (x, out) in out_row.iter_mut().enumerate() {
        let best = &coarse.arr[coarse.idx(x, y)];
        if best.is_empty() {
            continue;
        }
        let hits = refine_pixel(samplers, x, y, best);
        *out = OutputRecord {
            initialized: hits[0].is_some(),
            hits,
        };
    }
}

/// Turns the coarse top-2 map into exact per-pixel records.
pub fn refine_map(samplers: &[Option<PathSampler>], coarse: &CoarseMap) -> PreCalcDataMatrix {
    let mut matrix = PreCalcDataMatrix::new(coarse.w, coarse.h);
    if matrix.is_empty() {
        return matrix;
    }
    let w = matrix.w;

    #[cfg(feature = "multithreading")]
    matrix
        .arr
        .par_chunks_mut(w)
        .enumerate()
        .for_each(|(y, row)| refine_row(samplers, coarse, y, row));

    #[cfg(not(feature = "multithreading"))]
    matrix
        .arr
        .chunks_mut(w)
        .enumerate()
        .for_each(|(y, row)| refine_row(samplers, coarse, y, row));

    matrix
}

/// One full run: sample, mask, propagate, refine.
pub fn compute_distance_map(series: &Series) -> PreCalcDataMatrix {
    let (w, h) = (series.w, series.h);
    let config = &series.config;

    let samplers = series.samplers();
    let n_sampled = samplers.iter().flatten().count();
    log::debug!(
        "distance map {w}x{h}: {} paths, {} skipped",
        samplers.len(),
        samplers.len() - n_sampled
    );

    if w == 0 || h == 0 || n_sampled == 0 {
        return PreCalcDataMatrix::new(w, h);
    }

    let exterior = build_region_mask(&samplers, w, h, config);
    let coarse = propagate(&samplers, w, h, config.max_distance, exterior.as_ref());
    let matrix = refine_map(&samplers, &coarse);

    log::info!(
        "distance map {w}x{h}: {} of {} cells initialized",
        count_initialized(&matrix),
        w * h
    );
    matrix
}

pub fn count_initialized(matrix: &PreCalcDataMatrix) -> usize {
    matrix.arr.iter().filter(|r| r.initialized).count()
}

/// Nearest distance as grey levels, `0` at a path fading to `255` at
/// `max_distance`. Uninitialized cells are white.
pub fn distance_lum_im(matrix: &PreCalcDataMatrix, max_distance: f64) -> Lum8Im {
    let mut im = Lum8Im::new(matrix.w, matrix.h);
    for (dst, rec) in im.arr.iter_mut().zip(matrix.arr.iter()) {
        *dst = match rec.nearest() {
            Some(hit) if max_distance > 0.0 => {
                ((hit.distance / max_distance).clamp(0.0, 1.0) * 255.0).round() as u8
            }
            _ => 255,
        };
    }
    im
}

/// Nearest path id as a color per pixel, shaded darker with distance.
/// Uninitialized cells are transparent.
pub fn nearest_path_rgba_im(matrix: &PreCalcDataMatrix, max_distance: f64) -> RGBAIm {
    let mut im = RGBAIm::new(matrix.w, matrix.h);
    for (px, rec) in im.arr.chunks_exact_mut(4).zip(matrix.arr.iter()) {
        let Some(hit) = rec.nearest() else {
            continue;
        };
        let shade = if max_distance > 0.0 {
            1.0 - 0.75 * (hit.distance / max_distance).clamp(0.0, 1.0)
        } else {
            1.0
        };
        let [r, g, b] = path_color(hit.path_id);
        px[0] = (r as f64 * shade).round() as u8;
        px[1] = (g as f64 * shade).round() as u8;
        px[2] = (b as f64 * shade).round() as u8;
        px[3] = 255;
    }
    im
}

fn path_color(path_id: usize) -> [u8; 3] {
    const PALETTE: [[u8; 3]; 8] = [
        [230, 25, 75],
        [60, 180, 75],
        [255, 225, 25],
        [0, 130, 200],
        [245, 130, 48],
        [145, 30, 180],
        [70, 240, 240],
        [240, 50, 230],
    ];
    PALETTE[path_id % PALETTE.len()]
}

/// Owner of the current nearest-path matrix.
///
/// Every accepted series change rebuilds the matrix from scratch and replaces the
/// previous one; readers only ever see a finished matrix.
#[derive(Debug, Default)]
pub struct ScanDistanceMap {
    matrix: Option<PreCalcDataMatrix>,
}

impl ScanDistanceMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Recomputes for `series`. `None` leaves the current matrix untouched.
    pub fn create_data(&mut self, series: Option<&Series>) {
        let Some(series) = series else {
            log::debug!("no series, distance map kept");
            return;
        };
        self.matrix = Some(compute_distance_map(series));
    }

    pub fn matrix(&self) -> Option<&PreCalcDataMatrix> {
        self.matrix.as_ref()
    }

    pub fn record(&self, x: usize, y: usize) -> Option<&OutputRecord> {
        self.matrix.as_ref()?.get(x, y, 0)
    }
}

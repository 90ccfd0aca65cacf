use crate::geom::V2;
use crate::im::{MASK_SET, MaskIm};
use crate::scan_path::PathSampler;
use crate::series::MapConfig;

// Convex hull
// -----------------------------------------------------------------------------

fn cross(o: V2, a: V2, b: V2) -> f64 {
    (a.x - o.x) * (b.y - o.y) - (a.y - o.y) * (b.x - o.x)
}

/// Monotone-chain convex hull. Collinear and duplicate points are dropped, so a set
/// of points on one line yields its two end points.
pub fn convex_hull(points: &[V2]) -> Vec<V2> {
    let mut pts: Vec<V2> = points.iter().copied().filter(|p| p.is_finite()).collect();
    pts.sort_by(|a, b| a.x.total_cmp(&b.x).then(a.y.total_cmp(&b.y)));
    pts.dedup();

    if pts.len() < 3 {
        return pts;
    }

    let mut hull: Vec<V2> = Vec::with_capacity(pts.len() + 1);

    // Lower chain
    for &p in &pts {
        while hull.len() >= 2 && cross(hull[hull.len() - 2], hull[hull.len() - 1], p) <= 0.0 {
            hull.pop();
        }
        hull.push(p);
    }

    // Upper chain
    let lower_len = hull.len() + 1;
    for &p in pts.iter().rev().skip(1) {
        while hull.len() >= lower_len
            && cross(hull[hull.len() - 2], hull[hull.len() - 1], p) <= 0.0
        {
            hull.pop();
        }
        hull.push(p);
    }

    // The last point repeats the first.
    hull.pop();
    hull
}

// Scan-line exterior fill
// -----------------------------------------------------------------------------

fn intersection_x(lower: V2, upper: V2, y: f64) -> f64 {
    let frac = (y - lower.y) / (upper.y - lower.y);
    frac * (upper.x - lower.x) + lower.x
}

/// Column bound of a real-valued x, clamped to `0..=w`.
fn clamp_col(x: f64, w: usize) -> usize {
    if x <= 0.0 {
        0
    } else if x >= w as f64 {
        w
    } else {
        x as usize
    }
}

/// Marks every pixel outside the (dilated) convex polygon `hull`.
///
/// Each row keeps the columns from `x_min - margin_lo` up to (excluding)
/// `x_max + margin_hi`, where `x_min`/`x_max` are the row's two edge crossings.
/// An edge crosses row `y` when one end lies strictly above it and the other on
/// or below it, so a shared vertex is only counted once. Rows with fewer than two
/// crossings are marked entirely.
pub fn fill_hull_exterior(
    hull: &[V2],
    mask: &mut MaskIm,
    margin_lo: f64,
    margin_hi: f64,
) {
    let w = mask.w;
    if hull.is_empty() {
        mask.arr.fill(MASK_SET);
        return;
    }

    for y in 0..mask.h {
        let yf = y as f64;
        let mut crossings = [f64::INFINITY; 2];
        let mut n_crossings = 0;

        let mut last = hull[hull.len() - 1];
        for &act in hull {
            let edge = if last.y < yf && act.y >= yf {
                Some((last, act))
            } else if act.y < yf && last.y >= yf {
                Some((act, last))
            } else {
                None
            };
            if let Some((lower, upper)) = edge {
                crossings[n_crossings] = intersection_x(lower, upper, yf);
                n_crossings += 1;
                if n_crossings == 2 {
                    break;
                }
            }
            last = act;
        }

        let row = mask.row_mut(y);
        if n_crossings < 2 {
            row.fill(MASK_SET);
            continue;
        }

        let x_min = crossings[0].min(crossings[1]);
        let x_max = crossings[0].max(crossings[1]);
        let keep_l = clamp_col(x_min - margin_lo, w);
        let keep_r = clamp_col(x_max + margin_hi, w).max(keep_l);
        row[..keep_l].fill(MASK_SET);
        row[keep_r..].fill(MASK_SET);
    }
}

/// Exterior mask of the convex hull of every sample of every path.
///
/// Returns `None` (no masking) when the hull has fewer than
/// `config.min_hull_points` vertices.
pub fn build_region_mask(
    samplers: &[Option<PathSampler>],
    w: usize,
    h: usize,
    config: &MapConfig,
) -> Option<MaskIm> {
    let points: Vec<V2> = samplers
        .iter()
        .flatten()
        .flat_map(|sampler| sampler.samples().map(|(_, p)| p))
        .collect();

    let hull = convex_hull(&points);
    if hull.len() < config.min_hull_points {
        log::debug!(
            "convex hull has {} vertices, region masking skipped",
            hull.len()
        );
        return None;
    }

    let mut mask = MaskIm::new(w, h);
    fill_hull_exterior(&hull, &mut mask, config.hull_margin_lo, config.hull_margin_hi);
    log::debug!(
        "convex hull has {} vertices, {} exterior pixels",
        hull.len(),
        mask.count_set()
    );
    Some(mask)
}

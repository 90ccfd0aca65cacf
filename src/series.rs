use serde::Deserialize;

use crate::scan_path::{PathSampler, ScanPath};

/// Upper bound (exclusive) on the coarse L1 distance a wavefront may travel.
pub const DEFAULT_MAX_DISTANCE: u32 = 25;

/// Tunables of one distance-map computation.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct MapConfig {
    pub max_distance: u32,
    /// Columns kept left of the leftmost hull crossing of a row.
    pub hull_margin_lo: f64,
    /// Columns kept right of the rightmost hull crossing of a row.
    pub hull_margin_hi: f64,
    /// Hulls with fewer vertices skip exterior masking.
    pub min_hull_points: usize,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            max_distance: DEFAULT_MAX_DISTANCE,
            hull_margin_lo: 1.0,
            hull_margin_hi: 2.0,
            min_hull_points: 4,
        }
    }
}

/// A raster plus the ordered scan paths drawn across it, already in pixel space.
///
/// A path's id is its index in `paths`.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    pub w: usize,
    pub h: usize,
    pub paths: Vec<ScanPath>,
    pub config: MapConfig,
}

impl Series {
    pub fn new(w: usize, h: usize, paths: Vec<ScanPath>) -> Self {
        Self {
            w,
            h,
            paths,
            config: MapConfig::default(),
        }
    }

    pub fn with_config(mut self, config: MapConfig) -> Self {
        self.config = config;
        self
    }

    /// One entry per path id; `None` for paths that contribute no samples.
    pub fn samplers(&self) -> Vec<Option<PathSampler>> {
        self.paths.iter().map(ScanPath::sampler).collect()
    }
}

use serde::Deserialize;
use std::path::Path;

use crate::error::MapError;
use crate::geom::V2;
use crate::mat3::Mat3;
use crate::scan_path::ScanPath;
use crate::series::{MapConfig, Series};

/// JSON description of a series: raster size, native-to-pixel transform and the
/// scan paths in native coordinates.
#[derive(Debug, Clone, Deserialize)]
pub struct SeriesDesc {
    pub raster: RasterDesc,
    #[serde(default = "default_xform")]
    pub xform: Vec<f64>,
    #[serde(default)]
    pub config: MapConfig,
    #[serde(default)]
    pub scans: Vec<ScanDesc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct RasterDesc {
    pub w: usize,
    pub h: usize,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ScanDesc {
    pub kind: String,
    pub start: Option<[f64; 2]>,
    pub end: Option<[f64; 2]>,
    pub center: Option<[f64; 2]>,
    #[serde(default)]
    pub clockwise: bool,
    #[serde(default)]
    pub width: usize,
}

fn default_xform() -> Vec<f64> {
    vec![1.0, 0.0, 0.0, 1.0, 0.0, 0.0]
}

impl ScanDesc {
    /// Pixel-space path. Unknown kinds and missing geometry give `ScanPath::Unknown`,
    /// which keeps the path's id but contributes nothing.
    pub fn to_scan_path(&self, xform: &Mat3) -> ScanPath {
        let px = |p: [f64; 2]| xform.apply(V2::from(p));
        match (self.kind.as_str(), self.start, self.end, self.center) {
            ("line", Some(start), Some(end), _) => ScanPath::Line {
                start: px(start),
                end: px(end),
                width: self.width,
            },
            ("arc" | "circle", Some(start), _, Some(center)) => ScanPath::Arc {
                start: px(start),
                center: px(center),
                clockwise: self.clockwise,
                width: self.width,
            },
            ("line" | "arc" | "circle", ..) => {
                log::warn!("{} scan is missing geometry, ignored", self.kind);
                ScanPath::Unknown
            }
            _ => ScanPath::Unknown,
        }
    }
}

impl SeriesDesc {
    pub fn xform(&self) -> Mat3 {
        Mat3::from_affine_slice(&self.xform).unwrap_or_else(|| {
            log::warn!("xform needs 6 values, got {}; using identity", self.xform.len());
            Mat3::identity()
        })
    }

    pub fn to_series(&self) -> Series {
        let xform = self.xform();
        let paths = self.scans.iter().map(|s| s.to_scan_path(&xform)).collect();
        Series::new(self.raster.w, self.raster.h, paths)
            .with_config(self.config.clone())
    }
}

pub fn parse_series_json(json_text: &str) -> Result<SeriesDesc, serde_json::Error> {
    serde_json::from_str(json_text)
}

pub fn load_series_json<P: AsRef<Path>>(path: P) -> Result<SeriesDesc, MapError> {
    let text = std::fs::read_to_string(path)?;
    Ok(parse_series_json(&text)?)
}

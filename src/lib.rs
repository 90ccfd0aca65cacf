// Library crate root.
//
// The binary in src/main.rs is a thin CLI over these modules.

pub mod im;
pub mod geom;
pub mod mat3;
pub mod scan_path;
pub mod series;
pub mod region_mask;
pub mod trail_map;
pub mod wavefront;
pub mod refine;
pub mod dist_map;
pub mod desc;
pub mod error;
pub mod logger;

#[cfg(test)]
pub mod test_helpers;

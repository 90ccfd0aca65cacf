use clap::Parser;
use log::LevelFilter;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use scanmap::desc::load_series_json;
use scanmap::dist_map::{PreCalcDataMatrix, ScanDistanceMap, count_initialized};
#[cfg(feature = "im-io")]
use scanmap::dist_map::{distance_lum_im, nearest_path_rgba_im};
use scanmap::error::MapError;
use scanmap::logger;

/// Precompute the nearest scan paths of every raster pixel.
#[derive(Parser, Debug)]
#[command(
    name = "scanmap",
    about = "Nearest scan-path distance precomputation",
    long_about = "Reads a JSON series description (raster size, transform and scan paths)\n\
                  and computes, for every pixel, the two nearest paths with exact\n\
                  sample indices and distances.\n\n\
                  Example:\n  \
                  scanmap series.json --png distance.png -v"
)]
struct CliArgs {
    /// Series description (JSON).
    #[arg(value_name = "INPUT.json")]
    input: PathBuf,

    /// Write the nearest distance as a greyscale PNG.
    #[arg(long, value_name = "OUT.png")]
    png: Option<PathBuf>,

    /// Write the nearest path id as a color-coded PNG.
    #[arg(long, value_name = "OUT.png")]
    paths_png: Option<PathBuf>,

    /// Override the propagation bound in pixels.
    #[arg(long, value_name = "N")]
    max_distance: Option<u32>,

    /// Debug-level logging.
    #[arg(short, long)]
    verbose: bool,
}

fn run(args: &CliArgs) -> Result<(), MapError> {
    let desc = load_series_json(&args.input)?;
    let mut series = desc.to_series();
    if let Some(max_distance) = args.max_distance {
        series.config.max_distance = max_distance;
    }

    let mut map = ScanDistanceMap::new();
    map.create_data(Some(&series));
    let Some(matrix) = map.matrix() else {
        return Ok(());
    };

    let n_init = count_initialized(matrix);
    let (sum, n) = matrix
        .arr
        .iter()
        .filter_map(|r| r.nearest())
        .fold((0.0, 0usize), |(s, n), hit| (s + hit.distance, n + 1));
    let mean = if n > 0 { sum / n as f64 } else { 0.0 };
    log::info!(
        "{} of {} cells initialized, mean nearest distance {:.3}",
        n_init,
        matrix.w * matrix.h,
        mean
    );

    let max_distance = series.config.max_distance as f64;
    if let Some(path) = &args.png {
        write_png(matrix, max_distance, path, Raster::Distance)?;
    }
    if let Some(path) = &args.paths_png {
        write_png(matrix, max_distance, path, Raster::NearestPath)?;
    }
    Ok(())
}

#[derive(Clone, Copy, Debug)]
enum Raster {
    Distance,
    NearestPath,
}

#[cfg(feature = "im-io")]
fn write_png(
    matrix: &PreCalcDataMatrix,
    max_distance: f64,
    path: &Path,
    raster: Raster,
) -> Result<(), MapError> {
    match raster {
        Raster::Distance => distance_lum_im(matrix, max_distance).save_png(path)?,
        Raster::NearestPath => nearest_path_rgba_im(matrix, max_distance).save_png(path)?,
    }
    log::info!("wrote {}", path.display());
    Ok(())
}

#[cfg(not(feature = "im-io"))]
fn write_png(
    _matrix: &PreCalcDataMatrix,
    _max_distance: f64,
    path: &Path,
    _raster: Raster,
) -> Result<(), MapError> {
    log::warn!("built without im-io, {} not written", path.display());
    Ok(())
}

fn main() -> ExitCode {
    let args = CliArgs::parse();
    logger::init(if args.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    });

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

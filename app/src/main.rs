mod stats;

use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use chrono::Local;
use clap::Parser;
use env_logger::Builder;
use glob::glob;
use log::LevelFilter;
use rayon::iter::{IntoParallelRefIterator as _, ParallelIterator as _};
use thiserror::Error;

use depth_core::{
    settings::{DEFAULT_DEPTH_SCALE, DEFAULT_POINT_SIZE},
    ColorScheme, ExtractionError, ViewportSettings,
};
use depth_parser::parsers::{image::ImageParserProvider, DecodedImage, ParserProvider as _};
use depth_parser::ParseError;
use stats::ImageStats;

#[derive(Parser, Debug)]
#[command(
    name = "Depth to Point Cloud",
    about = "A tool for converting depth map images into 3D point clouds",
    author = "MIERUNE Inc.",
    version = "0.0.1"
)]
struct Cli {
    #[arg(short, long, required = true, num_args = 1.., value_name = "FILE")]
    input: Vec<String>,

    /// True-color image with the same dimensions as the depth map
    #[arg(short, long, value_name = "FILE")]
    color: Option<PathBuf>,

    #[arg(long, default_value_t = DEFAULT_DEPTH_SCALE, allow_negative_numbers = true)]
    depth_scale: f32,

    #[arg(long, default_value_t = DEFAULT_POINT_SIZE)]
    point_size: f32,

    #[arg(long, default_value_t = ColorScheme::Original)]
    color_scheme: ColorScheme,

    #[arg(long)]
    use_color_image: bool,

    /// Print per-image statistics as JSON to stdout
    #[arg(long)]
    json: bool,
}

impl Cli {
    fn settings(&self) -> ViewportSettings {
        ViewportSettings {
            point_size: self.point_size,
            depth_scale: self.depth_scale,
            color_scheme: self.color_scheme,
            use_color_image: self.use_color_image,
            ..Default::default()
        }
    }
}

#[derive(Debug, Error)]
enum AppError {
    #[error("no input files matched: {0:?}")]
    NoInputs(Vec<String>),

    #[error("invalid glob pattern '{pattern}': {source}")]
    Pattern {
        pattern: String,
        #[source]
        source: glob::PatternError,
    },

    #[error("a color image can only be applied to a single depth map, got {0} inputs")]
    ColorWithMultipleInputs(usize),

    #[error(
        "color image dimensions ({color_width}x{color_height}) must match the depth map ({depth_width}x{depth_height})"
    )]
    DimensionMismatch {
        depth_width: usize,
        depth_height: usize,
        color_width: usize,
        color_height: usize,
    },

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Extraction(#[from] ExtractionError),

    #[error("failed to serialize statistics: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{failed} of {total} images failed to process")]
    Failed { failed: usize, total: usize },
}

fn expand_globs(input_patterns: &[String]) -> Result<Vec<PathBuf>, AppError> {
    let mut paths = Vec::new();
    for pattern in input_patterns {
        if pattern.contains('*') || pattern.contains('?') || pattern.contains('[') {
            let entries = glob(pattern).map_err(|source| AppError::Pattern {
                pattern: pattern.clone(),
                source,
            })?;
            for entry in entries {
                match entry {
                    Ok(path) => paths.push(path),
                    Err(e) => log::warn!("skipping unreadable path: {}", e),
                }
            }
        } else {
            paths.push(PathBuf::from(pattern));
        }
    }

    if paths.is_empty() {
        return Err(AppError::NoInputs(input_patterns.to_vec()));
    }
    Ok(paths)
}

fn decode(path: &Path) -> Result<DecodedImage, ParseError> {
    let provider = ImageParserProvider {
        filename: path.to_path_buf(),
    };
    provider.get_parser().parse()
}

fn process_image(
    depth_path: &Path,
    color_path: Option<&Path>,
    settings: &ViewportSettings,
) -> Result<ImageStats, AppError> {
    let start = std::time::Instant::now();
    let depth = decode(depth_path)?;
    let mut cloud = depth.pixels.to_point_cloud(settings.depth_scale)?;

    if let Some(color_path) = color_path {
        let color = decode(color_path)?;
        if !depth.pixels.same_dimensions(&color.pixels) {
            return Err(AppError::DimensionMismatch {
                depth_width: depth.pixels.width(),
                depth_height: depth.pixels.height(),
                color_width: color.pixels.width(),
                color_height: color.pixels.height(),
            });
        }
        cloud.apply_color_overlay(color.pixels.to_color_overlay()?)?;
        log::info!("applied color overlay from {:?}", color_path);
    }

    if let Some(bounds) = cloud.full.bounding_volume() {
        log::debug!("bounds of {:?}: {:?}", depth_path, bounds);
    }

    let stats = ImageStats::new(&depth, &cloud, settings);
    log::info!(
        "{} ({}x{}, {}): {} points, {} preview points, {} buffers, in {:?}",
        stats.name,
        stats.width,
        stats.height,
        stats.size,
        stats.point_count,
        stats.preview_point_count,
        stats.buffer_size,
        start.elapsed()
    );

    Ok(stats)
}

fn run(args: Cli) -> Result<(), AppError> {
    let settings = args.settings();
    log::info!("input files: {:?}", args.input);
    log::info!("color image: {:?}", args.color);
    log::info!("settings: {:?}", settings);

    let input_files = expand_globs(&args.input)?;
    if args.color.is_some() && input_files.len() != 1 {
        return Err(AppError::ColorWithMultipleInputs(input_files.len()));
    }

    let start = std::time::Instant::now();
    let results: Vec<(PathBuf, Result<ImageStats, AppError>)> = input_files
        .par_iter()
        .map(|path| {
            let result = process_image(path, args.color.as_deref(), &settings);
            (path.clone(), result)
        })
        .collect();

    let total = results.len();
    let mut all_stats = Vec::with_capacity(total);
    for (path, result) in results {
        match result {
            Ok(stats) => all_stats.push(stats),
            Err(e) => log::error!("failed to process {:?}: {}", path, e),
        }
    }
    log::info!("Elapsed: {:?}", start.elapsed());

    if args.json {
        println!("{}", serde_json::to_string_pretty(&all_stats)?);
    }

    let failed = total - all_stats.len();
    if failed > 0 {
        return Err(AppError::Failed { failed, total });
    }
    Ok(())
}

fn main() -> ExitCode {
    Builder::new()
        .format(|buf, record| {
            writeln!(
                buf,
                "{} [{}] - {}",
                Local::now().format("%Y-%m-%d %H:%M:%S"),
                record.level(),
                record.args()
            )
        })
        .filter(None, LevelFilter::Info)
        .parse_default_env()
        .init();

    let args = Cli::parse();
    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

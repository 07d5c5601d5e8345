use std::time::{Duration, Instant};

use clap::{Args, Parser};
use indicatif::{ProgressBar, ProgressStyle};
use polycube_growth::{EmptyShapeError, Shape, ShapeError};
use rayon::prelude::*;
use tracing_subscriber::EnvFilter;

/// Used when `RUST_LOG` is unset: WARN for everything, INFO for this crate.
const DEFAULT_LOG_FILTER: &str = "warn,polycube_growth=info";

fn finish_bar(bar: &ProgressBar, duration: Duration, expansions: usize, seeds: usize) {
    let time = duration.as_micros();
    let secs = time / 1_000_000;
    let micros = time % 1_000_000;

    bar.finish_with_message(format!(
        "Done! Found {expansions} expansions of {seeds} seeds in {secs}.{micros:06} s"
    ));
}

pub fn make_bar(len: u64) -> ProgressBar {
    let bar = ProgressBar::new(len);

    let pos_width = format!("{len}").len();

    let template = format!(
        "[{{elapsed_precise}}] {{bar:40.cyan/blue}} {{pos:>{pos_width}}}/{{len}} {{msg}}"
    );

    if let Ok(style) = ProgressStyle::with_template(&template) {
        bar.set_style(style.progress_chars("#>-"));
    }

    bar
}

#[derive(Clone, Parser)]
pub enum Opts {
    /// Produce every shape that has one more cube than a seed shape
    Expand(ExpandOpts),
    /// Trim a shape to its bounding box
    Crop(CropOpts),
}

#[derive(Clone, Args)]
pub struct ExpandOpts {
    /// The seed shapes, each given as a whitespace separated
    /// list of `x,y,z` cells, e.g. "0,0,0 1,0,0".
    #[clap(required = true)]
    pub seeds: Vec<String>,

    /// Expand the seeds in parallel.
    #[clap(long, short = 'p')]
    pub parallel: bool,

    /// The amount of worker threads used with `--parallel`.
    ///
    /// Defaults to the amount of available CPUs.
    #[clap(long, short = 't')]
    pub threads: Option<usize>,

    /// Stop after producing this many expansions for each seed.
    #[clap(long, short = 'l')]
    pub limit: Option<usize>,

    /// Print every expansion.
    #[clap(long)]
    pub print: bool,
}

#[derive(Clone, Args)]
pub struct CropOpts {
    /// The shape to crop, given as a whitespace separated
    /// list of `x,y,z` cells.
    pub cells: String,
}

fn parse_cells(text: &str) -> Result<Shape, ShapeError> {
    let parse_cell = |cell: &str| -> Result<(usize, usize, usize), ShapeError> {
        let coords = cell
            .split(',')
            .map(|v| v.trim().parse::<usize>())
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| ShapeError::Parse(format!("invalid cell `{cell}`: {e}")))?;

        match coords[..] {
            [x, y, z] => Ok((x, y, z)),
            _ => Err(ShapeError::Parse(format!(
                "cell `{cell}` does not have three coordinates"
            ))),
        }
    };

    let cells = text
        .split_whitespace()
        .map(parse_cell)
        .collect::<Result<Vec<_>, _>>()?;

    Shape::from_cells(cells)
}

fn expansions(seed: &Shape, limit: Option<usize>) -> Result<Vec<Shape>, EmptyShapeError> {
    let limit = limit.unwrap_or(usize::MAX);
    Ok(seed.expand()?.take(limit).collect())
}

pub fn expand(opts: &ExpandOpts) {
    if opts.parallel {
        let threads = opts.threads.unwrap_or_else(num_cpus::get);

        if let Err(e) = rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build_global()
        {
            tracing::warn!("Could not configure {threads} worker threads: {e}");
        }
    }

    let seeds = match opts
        .seeds
        .iter()
        .map(|v| parse_cells(v))
        .collect::<Result<Vec<_>, _>>()
    {
        Ok(seeds) => seeds,
        Err(e) => {
            println!("Invalid seed. Error: {e}");
            std::process::exit(1);
        }
    };

    let bar = make_bar(seeds.len() as u64);
    bar.set_message("seeds expanded");

    let start = Instant::now();

    let expand_seed = |seed: &Shape| {
        let found = expansions(seed, opts.limit);
        bar.inc(1);
        found
    };

    let results: Vec<_> = if opts.parallel {
        seeds.par_iter().map(&expand_seed).collect()
    } else {
        seeds.iter().map(&expand_seed).collect()
    };

    let mut total = 0;

    for (idx, (seed, found)) in seeds.iter().zip(results).enumerate() {
        let found = match found {
            Ok(found) => found,
            Err(e) => {
                bar.abandon_with_message(format!("Seed {idx} Failed. Error: {e}"));
                std::process::exit(1);
            }
        };

        bar.println(format!(
            "Seed {idx} ({} cubes): {} expansions",
            seed.present_cubes(),
            found.len()
        ));

        if opts.print {
            for shape in &found {
                bar.println(format!("{shape}"));
            }
        }

        total += found.len();
    }

    finish_bar(&bar, start.elapsed(), total, seeds.len());
}

pub fn crop(opts: &CropOpts) {
    let cropped = parse_cells(&opts.cells)
        .and_then(|shape| shape.crop().map_err(ShapeError::from));

    match cropped {
        Ok(shape) => {
            let (d1, d2, d3) = shape.dims();
            println!("Cropped to {d1}x{d2}x{d3}:");
            println!("{shape}");
        }
        Err(e) => {
            println!("Failed to crop. Error: {e}");
            std::process::exit(1);
        }
    }
}

/// A `RUST_LOG` value, if set and valid, replaces the default filter entirely.
fn log_filter(rust_log: Option<&str>) -> EnvFilter {
    rust_log
        .filter(|v| !v.trim().is_empty())
        .and_then(|v| EnvFilter::try_new(v).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_LOG_FILTER))
}

fn init_tracing() {
    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();

    tracing_subscriber::fmt()
        .with_env_filter(log_filter(rust_log.as_deref()))
        .init();
}

fn main() {
    init_tracing();

    let opts = Opts::parse();

    match opts {
        Opts::Expand(e) => expand(&e),
        Opts::Crop(c) => crop(&c),
    }
}

#[test]
fn parses_cells() {
    let shape = parse_cells("0,0,0 1,0,0\t1,1,0").unwrap();

    assert_eq!(shape.dims(), (2, 2, 1));
    assert_eq!(shape.present_cubes(), 3);

    assert!(matches!(parse_cells("0,0"), Err(ShapeError::Parse(_))));
    assert!(matches!(parse_cells("0,a,0"), Err(ShapeError::Parse(_))));
    assert!(matches!(parse_cells(""), Err(ShapeError::Empty(_))));
}

#[test]
fn limits_expansions() {
    let seed = parse_cells("0,0,0").unwrap();

    assert_eq!(expansions(&seed, Some(4)).unwrap().len(), 4);
    assert_eq!(expansions(&seed, None).unwrap().len(), 6);
}

#[test]
fn rejects_oversized_cells() {
    assert!(matches!(
        parse_cells("18446744073709551615,0,0"),
        Err(ShapeError::TooLarge { .. })
    ));
}

#[test]
fn rust_log_overrides_default_filter() {
    use tracing_subscriber::filter::LevelFilter;

    assert_eq!(
        log_filter(Some("polycube_growth=trace")).max_level_hint(),
        Some(LevelFilter::TRACE)
    );
    assert_eq!(log_filter(Some("debug")).max_level_hint(), Some(LevelFilter::DEBUG));

    assert_eq!(log_filter(None).max_level_hint(), Some(LevelFilter::INFO));
    assert_eq!(log_filter(Some("")).max_level_hint(), Some(LevelFilter::INFO));
}

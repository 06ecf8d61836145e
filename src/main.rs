//! # trailcarve
//!
//! Command-line driver for the path generator. Builds one or more levels,
//! checks each against the route rules, prints them as rows of terrain codes
//! and optionally writes a PNG preview and/or the binary grid form.
//!
//! Run `trailcarve --help` for the flags. Set `RUST_LOG=debug` to watch the
//! walk backtrack.

use clap::{Parser, ValueEnum};
use env_logger::Env;
use log::{error, info};
use std::error::Error;
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use trailcarve::generator::{generate_levels, BacktrackStrategy, GeneratorConfig};
use trailcarve::validate;

const PNG_TILE_PX: u32 = 16;

/// Carve single-route levels across a square tile grid.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Side length of the grid (at least 3). Overrides the config file.
    #[arg(long)]
    size: Option<usize>,

    /// Base seed; level k uses seed + k. Random when omitted.
    #[arg(long)]
    seed: Option<u64>,

    /// JSON generator config.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Number of levels to generate.
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
    levels: u32,

    /// What the walk does at a dead end. Overrides the config file.
    #[arg(long, value_enum)]
    backtrack: Option<BacktrackArg>,

    /// Write a PNG preview. Numbered per level when more than one is made.
    #[arg(long)]
    png: Option<PathBuf>,

    /// Write the binary grid form. Numbered like `--png`.
    #[arg(long)]
    binary: Option<PathBuf>,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum BacktrackArg {
    /// Revert the dead-end branch; the route stays one thread.
    Retract,
    /// Keep the dead-end branch painted; junctions are possible.
    Jump,
}

impl From<BacktrackArg> for BacktrackStrategy {
    fn from(arg: BacktrackArg) -> Self {
        match arg {
            BacktrackArg::Retract => BacktrackStrategy::Retract,
            BacktrackArg::Jump => BacktrackStrategy::Jump,
        }
    }
}

/// Appends the level number to a file stem when more than one level is written.
fn level_path(path: &Path, level: usize, count: usize) -> PathBuf {
    if count == 1 {
        return path.to_path_buf();
    }
    let stem = path.file_stem().and_then(|s| s.to_str()).unwrap_or("level");
    let name = match path.extension().and_then(|e| e.to_str()) {
        Some(ext) => format!("{}_{}.{}", stem, level + 1, ext),
        None => format!("{}_{}", stem, level + 1),
    };
    path.with_file_name(name)
}

fn build_config(args: &Args) -> Result<GeneratorConfig, Box<dyn Error>> {
    let mut config = match &args.config {
        Some(path) => GeneratorConfig::from_json_file(path)?,
        None => GeneratorConfig::default(),
    };
    if let Some(size) = args.size {
        config.size = size;
    }
    if let Some(backtrack) = args.backtrack {
        config.backtrack = backtrack.into();
    }
    config.validate()?;
    Ok(config)
}

fn run(args: Args) -> Result<(), Box<dyn Error>> {
    let config = build_config(&args)?;
    let count = args.levels as usize;
    let seed = args.seed.unwrap_or_else(rand::random);
    info!("generating {} level(s), base seed {}", count, seed);

    for (level, result) in generate_levels(&config, count, seed).into_iter().enumerate() {
        let grid = result?;
        let report = validate::check(&grid);
        println!("Level {} (seed {}):", level + 1, seed.wrapping_add(level as u64));
        print!("{}", grid);
        if !report.is_valid() {
            println!("  validation: {:?}", report);
        }

        if let Some(path) = &args.png {
            let path = level_path(path, level, count);
            grid.save_png(&path, PNG_TILE_PX)?;
            info!("wrote {}", path.display());
        }
        if let Some(path) = &args.binary {
            let path = level_path(path, level, count);
            let mut writer = BufWriter::new(File::create(&path)?);
            grid.write_to(&mut writer)?;
            info!("wrote {}", path.display());
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    // Initialize logging.
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    match run(Args::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

// src/generator/procedural.rs

use crate::error::Result;
use crate::generator::{
    carve_path_with, create_grid_with_fill, pad_edges, BacktrackStrategy, GeneratorConfig,
    RandomSource,
};
use crate::grid::Grid;
use crate::validate;
use log::info;
use rand::rngs::StdRng;
use rand::SeedableRng;
use rayon::prelude::*;
use std::time::Instant;

/// Owns a config and a seeded generator, and remembers how the last level went.
pub struct PathGenerator {
    config: GeneratorConfig,
    rng: StdRng,
    stats: Option<GenerationStats>,
}

#[derive(Default, Debug, Clone)]
pub struct GenerationStats {
    pub generation_time: f64,
    pub start_row: usize,
    pub steps: usize,
    pub backtracks: usize,
    pub route_len: usize,
}

impl PathGenerator {
    pub fn new(config: GeneratorConfig) -> Result<Self> {
        config.validate()?;
        Ok(PathGenerator {
            config,
            rng: StdRng::from_os_rng(),
            stats: None,
        })
    }

    pub fn from_seed(config: GeneratorConfig, seed: u64) -> Result<Self> {
        config.validate()?;
        Ok(PathGenerator {
            config,
            rng: StdRng::seed_from_u64(seed),
            stats: None,
        })
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Stats for the most recent successful `generate` call.
    pub fn stats(&self) -> Option<&GenerationStats> {
        self.stats.as_ref()
    }

    /// Builds one complete level: fresh grid, carved route, padded edges.
    pub fn generate(&mut self) -> Result<Grid> {
        let started = Instant::now();
        let grid = build(&self.config, &mut self.rng, |stats| {
            self.stats = Some(GenerationStats {
                generation_time: started.elapsed().as_secs_f64(),
                ..stats
            });
        })?;
        Ok(grid)
    }
}

/// Fresh grid, carved and padded, using any random source.
pub fn generate<R: RandomSource + ?Sized>(config: &GeneratorConfig, rng: &mut R) -> Result<Grid> {
    config.validate()?;
    build(config, rng, |_| {})
}

pub fn generate_seeded(config: &GeneratorConfig, seed: u64) -> Result<Grid> {
    let mut rng = StdRng::seed_from_u64(seed);
    generate(config, &mut rng)
}

/// One independent level per index, seeded `base_seed + index`.
///
/// Levels are built in parallel; each one is still a single uninterrupted
/// carve, and the output order matches the level index.
pub fn generate_levels(
    config: &GeneratorConfig,
    count: usize,
    base_seed: u64,
) -> Vec<Result<Grid>> {
    (0..count)
        .into_par_iter()
        .map(|level| generate_seeded(config, base_seed.wrapping_add(level as u64)))
        .collect()
}

fn build<R, F>(config: &GeneratorConfig, rng: &mut R, on_done: F) -> Result<Grid>
where
    R: RandomSource + ?Sized,
    F: FnOnce(GenerationStats),
{
    let mut grid = create_grid_with_fill(config.size, config.fill)?;
    let carve = carve_path_with(&mut grid, rng, config)?;
    pad_edges(&mut grid);

    debug_assert!(
        route_is_sound(&grid, config.backtrack),
        "carved grid broke the route rules: {:?}",
        validate::check(&grid)
    );

    info!(
        "generated {0}x{0} grid: start row {1}, {2} steps, {3} backtracks, {4} path tiles",
        config.size, carve.start_row, carve.steps, carve.backtracks, carve.route_len
    );
    on_done(GenerationStats {
        generation_time: 0.0,
        start_row: carve.start_row,
        steps: carve.steps,
        backtracks: carve.backtracks,
        route_len: carve.route_len,
    });
    Ok(grid)
}

/// Whether a finished grid meets the rules its backtrack strategy promises.
fn route_is_sound(grid: &Grid, backtrack: BacktrackStrategy) -> bool {
    let report = validate::check(grid);
    match backtrack {
        BacktrackStrategy::Retract => report.is_valid(),
        BacktrackStrategy::Jump => report.is_valid_allowing_branches(),
    }
}

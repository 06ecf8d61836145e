// src/generator/mod.rs
mod carver;
mod config;
mod padding;
mod procedural;
mod random;

pub use carver::{CarveStats, Step};
pub use config::{BacktrackStrategy, GeneratorConfig, DEFAULT_SIZE, DEFAULT_STALL_FACTOR};
pub use padding::pad_edges;
pub use procedural::{generate, generate_levels, generate_seeded, GenerationStats, PathGenerator};
pub use random::{RandomSource, ScriptedSource};

use crate::error::{PathError, Result};
use crate::grid::{Grid, Terrain};
use carver::Carver;

/// Smallest grid the walk can run on: entrance column, one carved column, exit column.
pub const MIN_CARVE_SIZE: usize = 3;

/// A `size`×`size` grid filled with `Obstacle`.
pub fn create_grid(size: usize) -> Result<Grid> {
    Grid::new(size, Terrain::Obstacle)
}

pub fn create_grid_with_fill(size: usize, fill: Terrain) -> Result<Grid> {
    Grid::new(size, fill)
}

/// Carves a route into `grid` with the default policy (retracting backtrack,
/// default stall budget).
pub fn carve_path<R: RandomSource + ?Sized>(grid: &mut Grid, rng: &mut R) -> Result<CarveStats> {
    carve_path_with(grid, rng, &GeneratorConfig::default())
}

/// Carves a route into `grid`. The grid's own size is used; `config.size` is
/// ignored here.
pub fn carve_path_with<R: RandomSource + ?Sized>(
    grid: &mut Grid,
    rng: &mut R,
    config: &GeneratorConfig,
) -> Result<CarveStats> {
    let size = grid.size();
    if size < MIN_CARVE_SIZE {
        return Err(PathError::InvalidArgument(format!(
            "cannot carve a {0}x{0} grid, need at least {1}x{1}",
            size, MIN_CARVE_SIZE
        )));
    }
    if config.stall_factor == 0 {
        return Err(PathError::InvalidArgument(
            "stall_factor must be positive".to_string(),
        ));
    }

    let max_steps = config.stall_factor.saturating_mul(size).saturating_mul(size);
    let start_row = rng.next_in_range(0, size);
    Carver::start(grid, rng, config.backtrack, start_row).run(max_steps)
}

pub fn terrain_at(grid: &Grid, row: usize, col: usize) -> Result<Terrain> {
    grid.terrain_at(row, col)
}

pub fn count_path_neighbors(grid: &Grid, row: usize, col: usize) -> Result<usize> {
    grid.count_path_neighbors(row, col)
}

pub fn is_completing_square(grid: &Grid, row: usize, col: usize) -> Result<bool> {
    grid.is_completing_square(row, col)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validate;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn carved(size: usize, seed: u64, backtrack: BacktrackStrategy) -> Grid {
        let config = GeneratorConfig {
            size,
            backtrack,
            ..Default::default()
        };
        generate_seeded(&config, seed).unwrap()
    }

    #[test]
    fn test_create_grid_defaults_to_obstacle() {
        let grid = create_grid(6).unwrap();
        assert_eq!(grid.fill(), Terrain::Obstacle);
        assert!(grid.cells().iter().all(|&t| t == Terrain::Obstacle));
        assert!(matches!(create_grid(0), Err(PathError::InvalidArgument(_))));
    }

    #[test]
    fn test_carve_rejects_tiny_grids() {
        let mut rng = StdRng::seed_from_u64(0);
        for size in 1..MIN_CARVE_SIZE {
            let mut grid = create_grid(size).unwrap();
            assert!(matches!(
                carve_path(&mut grid, &mut rng),
                Err(PathError::InvalidArgument(_))
            ));
            // Nothing was painted.
            assert_eq!(grid.path_cells().count(), 0);
        }
    }

    #[test]
    fn test_carve_reaches_second_to_last_column() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut grid = create_grid(10).unwrap();
        let stats = carve_path(&mut grid, &mut rng).unwrap();
        assert!((0..10).any(|row| grid.get(row, 8) == Some(Terrain::Path)));
        assert!((0..10).all(|row| grid.get(row, 9) == Some(Terrain::Obstacle)));
        assert_eq!(grid.get(stats.start_row, 0), Some(Terrain::Path));
        assert_eq!(grid.get(stats.start_row, 1), Some(Terrain::Path));
    }

    #[test]
    fn test_edges_after_generation() {
        for seed in 0..20 {
            let grid = carved(7, seed, BacktrackStrategy::Retract);
            for row in 0..7 {
                assert_eq!(terrain_at(&grid, row, 0).unwrap(), Terrain::Edge);
                assert_eq!(terrain_at(&grid, row, 6).unwrap(), Terrain::Edge);
            }
        }
    }

    #[test]
    fn test_retract_routes_hold_every_invariant() {
        for size in [3, 4, 5, 8, 13, 21] {
            for seed in 0..25 {
                let grid = carved(size, seed, BacktrackStrategy::Retract);
                let report = validate::check(&grid);
                assert!(report.is_valid(), "size {} seed {}: {:?}", size, seed, report);
            }
        }
    }

    #[test]
    fn test_no_path_cell_exceeds_two_neighbors() {
        for seed in 0..25 {
            let grid = carved(12, seed, BacktrackStrategy::Retract);
            for (row, col) in grid.path_cells() {
                assert!(count_path_neighbors(&grid, row, col).unwrap() <= 2);
            }
        }
    }

    #[test]
    fn test_jump_routes_stay_connected_without_squares() {
        for size in [4, 8, 16] {
            for seed in 0..25 {
                let grid = carved(size, seed, BacktrackStrategy::Jump);
                let report = validate::check(&grid);
                assert!(
                    report.is_valid_allowing_branches(),
                    "size {} seed {}: {:?}",
                    size,
                    seed,
                    report
                );
            }
        }
    }

    #[test]
    fn test_carve_is_deterministic_per_seed() {
        for seed in [1, 2, 3, 42] {
            let mut a = create_grid(11).unwrap();
            let mut b = create_grid(11).unwrap();
            carve_path(&mut a, &mut StdRng::seed_from_u64(seed)).unwrap();
            carve_path(&mut b, &mut StdRng::seed_from_u64(seed)).unwrap();
            assert_eq!(a, b);
        }
    }

    #[test]
    fn test_pad_twice_matches_pad_once() {
        let mut grid = create_grid(9).unwrap();
        carve_path(&mut grid, &mut StdRng::seed_from_u64(5)).unwrap();
        pad_edges(&mut grid);
        let once = grid.clone();
        pad_edges(&mut grid);
        assert_eq!(grid, once);
    }

    #[test]
    fn test_query_wrappers_check_bounds() {
        let grid = create_grid(4).unwrap();
        assert!(terrain_at(&grid, 4, 0).is_err());
        assert!(count_path_neighbors(&grid, 0, 4).is_err());
        assert!(is_completing_square(&grid, 9, 9).is_err());
        assert!(!is_completing_square(&grid, 1, 1).unwrap());
    }

    #[test]
    fn test_zero_stall_factor_rejected() {
        let mut grid = create_grid(5).unwrap();
        let config = GeneratorConfig {
            stall_factor: 0,
            ..Default::default()
        };
        assert!(carve_path_with(&mut grid, &mut StdRng::seed_from_u64(0), &config).is_err());
    }
}

// src/lib.rs

pub mod error;
pub mod generator;
pub mod grid;
pub mod validate;

pub use error::{PathError, Result};
pub use generator::{
    carve_path, count_path_neighbors, create_grid, generate, generate_levels, generate_seeded,
    is_completing_square, pad_edges, terrain_at, BacktrackStrategy, GeneratorConfig, PathGenerator,
    RandomSource,
};
pub use grid::{Grid, Terrain};

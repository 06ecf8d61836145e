// src/grid/mod.rs
mod codec;
mod grid;
mod render;
mod terrain;

pub use codec::{MAGIC, MAX_STORED_SIZE};
pub use grid::Grid;
pub use terrain::Terrain;

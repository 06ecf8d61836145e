// src/generator/padding.rs

use crate::grid::{Grid, Terrain};

/// Stamps `Edge` over the first and last columns.
///
/// Runs after carving: the walk starts in column 0, and this overwrites
/// whatever it left there so both boundary columns are uniform. Calling it
/// again changes nothing.
pub fn pad_edges(grid: &mut Grid) {
    let last = grid.size() - 1;
    for row in 0..grid.size() {
        grid.set(row, 0, Terrain::Edge);
        grid.set(row, last, Terrain::Edge);
    }
}

// src/grid/grid.rs

use crate::error::{PathError, Result};
use crate::grid::Terrain;
use std::fmt;

/// Offsets for the four orthogonal neighbours: up, down, left, right.
const NEIGHBOR_OFFSETS: [(isize, isize); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

/// A square tile map, stored row-major.
///
/// The shape is fixed at construction. Cell values are only written by the
/// generator (carving and padding); once a level has been handed out it is
/// treated as read-only, which is why `set` is crate-private.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    size: usize,
    fill: Terrain,
    cells: Vec<Terrain>,
}

impl Grid {
    /// Allocates a `size`×`size` grid with every cell set to `fill`.
    pub fn new(size: usize, fill: Terrain) -> Result<Self> {
        if size == 0 {
            return Err(PathError::InvalidArgument(
                "grid size must be at least 1".to_string(),
            ));
        }
        if !fill.is_fill() {
            return Err(PathError::InvalidArgument(format!(
                "{:?} cannot be used as a fill terrain",
                fill
            )));
        }
        Ok(Grid {
            size,
            fill,
            cells: vec![fill; size * size],
        })
    }

    pub(crate) fn from_cells(size: usize, fill: Terrain, cells: Vec<Terrain>) -> Self {
        debug_assert_eq!(cells.len(), size * size);
        Grid { size, fill, cells }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn rows(&self) -> usize {
        self.size
    }

    pub fn cols(&self) -> usize {
        self.size
    }

    /// The terrain the grid was created with.
    pub fn fill(&self) -> Terrain {
        self.fill
    }

    pub fn cells(&self) -> &[Terrain] {
        &self.cells
    }

    pub fn row(&self, row: usize) -> Option<&[Terrain]> {
        if row >= self.size {
            return None;
        }
        let start = row * self.size;
        Some(&self.cells[start..start + self.size])
    }

    pub fn in_bounds(&self, row: usize, col: usize) -> bool {
        row < self.size && col < self.size
    }

    pub fn get(&self, row: usize, col: usize) -> Option<Terrain> {
        if self.in_bounds(row, col) {
            Some(self.cells[row * self.size + col])
        } else {
            None
        }
    }

    /// Read accessor for collaborators. Out-of-bounds coordinates are an error.
    pub fn terrain_at(&self, row: usize, col: usize) -> Result<Terrain> {
        self.get(row, col).ok_or_else(|| self.out_of_bounds(row, col))
    }

    pub(crate) fn set(&mut self, row: usize, col: usize, terrain: Terrain) {
        let size = self.size;
        self.cells[row * size + col] = terrain;
    }

    pub(crate) fn is_path(&self, row: usize, col: usize) -> bool {
        self.get(row, col) == Some(Terrain::Path)
    }

    /// In-bounds orthogonal neighbours of a cell.
    pub fn neighbors(&self, row: usize, col: usize) -> impl Iterator<Item = (usize, usize)> + '_ {
        NEIGHBOR_OFFSETS.iter().filter_map(move |&(dr, dc)| {
            let r = row.checked_add_signed(dr)?;
            let c = col.checked_add_signed(dc)?;
            self.in_bounds(r, c).then_some((r, c))
        })
    }

    /// Number of orthogonal neighbours currently classified `Path` (0..=4).
    pub fn count_path_neighbors(&self, row: usize, col: usize) -> Result<usize> {
        if !self.in_bounds(row, col) {
            return Err(self.out_of_bounds(row, col));
        }
        Ok(self.path_neighbors(row, col))
    }

    /// Whether painting (row, col) as `Path` would close any 2×2 window
    /// around it whose other three cells are already `Path`.
    pub fn is_completing_square(&self, row: usize, col: usize) -> Result<bool> {
        if !self.in_bounds(row, col) {
            return Err(self.out_of_bounds(row, col));
        }
        Ok(self.completes_square(row, col))
    }

    pub(crate) fn path_neighbors(&self, row: usize, col: usize) -> usize {
        self.neighbors(row, col)
            .filter(|&(r, c)| self.is_path(r, c))
            .count()
    }

    pub(crate) fn completes_square(&self, row: usize, col: usize) -> bool {
        // Each window is named by its top-left corner.
        for top in [row.checked_sub(1), Some(row)].into_iter().flatten() {
            for left in [col.checked_sub(1), Some(col)].into_iter().flatten() {
                if top + 1 >= self.size || left + 1 >= self.size {
                    continue;
                }
                let closed = [(top, left), (top, left + 1), (top + 1, left), (top + 1, left + 1)]
                    .iter()
                    .filter(|&&cell| cell != (row, col))
                    .all(|&(r, c)| self.is_path(r, c));
                if closed {
                    return true;
                }
            }
        }
        false
    }

    /// Column 0 is the entrance, the last column the exit.
    pub fn is_exit_column(&self, col: usize) -> bool {
        col + 1 == self.size
    }

    /// Coordinates of every `Path` cell, row-major.
    pub fn path_cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        let size = self.size;
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, t)| **t == Terrain::Path)
            .map(move |(i, _)| (i / size, i % size))
    }

    /// Rows of space-joined terrain codes, one line per row.
    pub fn dump(&self) -> String {
        self.to_string()
    }

    fn out_of_bounds(&self, row: usize, col: usize) -> PathError {
        PathError::InvalidArgument(format!(
            "cell ({}, {}) is outside a {}x{} grid",
            row, col, self.size, self.size
        ))
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.cells.chunks(self.size) {
            let line: Vec<String> = row.iter().map(|t| t.code().to_string()).collect();
            writeln!(f, "{}", line.join(" "))?;
        }
        Ok(())
    }
}

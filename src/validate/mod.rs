// src/validate/mod.rs
//! # Route Validation
//!
//! Checks a finished grid against the structural rules the carver is meant
//! to uphold:
//!
//! * both boundary columns are entirely `Edge`,
//! * no 2×2 block is entirely `Path`,
//! * no `Path` cell has more than two `Path` neighbours,
//! * the entrance column reaches a `Path` cell in the second-to-last column
//!   through walkable tiles.
//!
//! Connectivity is computed with a union-find over walkable cells.

use crate::grid::{Grid, Terrain};
use union_find::{QuickUnionUf, UnionBySize, UnionFind};

/// Everything wrong with a grid, cell by cell. An empty report means the
/// grid is a clean single route.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    /// Rows whose first or last cell is not `Edge`.
    pub missing_edges: Vec<usize>,
    /// Top-left corners of fully-`Path` 2×2 blocks.
    pub squares: Vec<(usize, usize)>,
    /// `Path` cells with three or more `Path` neighbours.
    pub junctions: Vec<(usize, usize)>,
    pub connected: bool,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.is_valid_allowing_branches() && self.junctions.is_empty()
    }

    /// Same as `is_valid` but tolerates junctions, which dead-end branches
    /// left by `BacktrackStrategy::Jump` produce.
    pub fn is_valid_allowing_branches(&self) -> bool {
        self.missing_edges.is_empty() && self.squares.is_empty() && self.connected
    }
}

pub fn check(grid: &Grid) -> ValidationReport {
    ValidationReport {
        missing_edges: missing_edges(grid),
        squares: full_squares(grid),
        junctions: junctions(grid),
        connected: entrance_reaches_exit(grid),
    }
}

fn missing_edges(grid: &Grid) -> Vec<usize> {
    let last = grid.size() - 1;
    (0..grid.size())
        .filter(|&row| {
            grid.get(row, 0) != Some(Terrain::Edge) || grid.get(row, last) != Some(Terrain::Edge)
        })
        .collect()
}

fn full_squares(grid: &Grid) -> Vec<(usize, usize)> {
    let mut squares = Vec::new();
    for top in 0..grid.size().saturating_sub(1) {
        for left in 0..grid.size().saturating_sub(1) {
            let block = [(top, left), (top, left + 1), (top + 1, left), (top + 1, left + 1)];
            if block.iter().all(|&(r, c)| grid.is_path(r, c)) {
                squares.push((top, left));
            }
        }
    }
    squares
}

fn junctions(grid: &Grid) -> Vec<(usize, usize)> {
    grid.path_cells()
        .filter(|&(r, c)| grid.path_neighbors(r, c) > 2)
        .collect()
}

/// True when some walkable cell in column 0 shares a component with a `Path`
/// cell in the column just before the exit.
fn entrance_reaches_exit(grid: &Grid) -> bool {
    let size = grid.size();
    if size < 3 {
        return false;
    }
    let index = |row: usize, col: usize| row * size + col;
    let walkable = |row: usize, col: usize| grid.get(row, col).is_some_and(Terrain::is_walkable);

    let mut uf = QuickUnionUf::<UnionBySize>::new(size * size);
    for row in 0..size {
        for col in 0..size {
            if !walkable(row, col) {
                continue;
            }
            if col + 1 < size && walkable(row, col + 1) {
                uf.union(index(row, col), index(row, col + 1));
            }
            if row + 1 < size && walkable(row + 1, col) {
                uf.union(index(row, col), index(row + 1, col));
            }
        }
    }

    let mut entrance_roots: Vec<usize> = (0..size)
        .filter(|&row| walkable(row, 0))
        .map(|row| uf.find(index(row, 0)))
        .collect();
    entrance_roots.sort_unstable();
    entrance_roots.dedup();

    let target_col = size - 2;
    (0..size)
        .filter(|&row| grid.is_path(row, target_col))
        .any(|row| entrance_roots.binary_search(&uf.find(index(row, target_col))).is_ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::pad_edges;

    fn grid_with_path(size: usize, cells: &[(usize, usize)]) -> Grid {
        let mut grid = Grid::new(size, Terrain::Obstacle).unwrap();
        for &(r, c) in cells {
            grid.set(r, c, Terrain::Path);
        }
        grid
    }

    #[test]
    fn test_straight_route_is_valid() {
        let mut grid = grid_with_path(5, &[(2, 0), (2, 1), (2, 2), (2, 3)]);
        pad_edges(&mut grid);
        let report = check(&grid);
        assert!(report.is_valid(), "{:?}", report);
    }

    #[test]
    fn test_unpadded_grid_reports_edges() {
        let grid = grid_with_path(4, &[(1, 0), (1, 1), (1, 2)]);
        let report = check(&grid);
        assert_eq!(report.missing_edges, vec![0, 1, 2, 3]);
        assert!(report.connected);
    }

    #[test]
    fn test_detects_square() {
        let mut grid = grid_with_path(5, &[(1, 1), (1, 2), (2, 1), (2, 2), (2, 3)]);
        pad_edges(&mut grid);
        let report = check(&grid);
        assert_eq!(report.squares, vec![(1, 1)]);
        assert!(!report.is_valid());
    }

    #[test]
    fn test_detects_junction() {
        let mut grid = grid_with_path(6, &[(2, 1), (2, 2), (2, 3), (2, 4), (1, 2), (3, 2)]);
        pad_edges(&mut grid);
        let report = check(&grid);
        assert_eq!(report.junctions, vec![(2, 2)]);
        assert!(!report.is_valid());
        assert!(report.is_valid_allowing_branches());
    }

    #[test]
    fn test_detects_broken_route() {
        let mut grid = grid_with_path(6, &[(1, 1), (1, 2), (3, 3), (3, 4)]);
        pad_edges(&mut grid);
        let report = check(&grid);
        assert!(!report.connected);
    }

    #[test]
    fn test_tiny_grid_never_connected() {
        let grid = Grid::new(2, Terrain::Open).unwrap();
        assert!(!check(&grid).connected);
    }
}

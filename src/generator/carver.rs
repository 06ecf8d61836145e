// src/generator/carver.rs
// The randomized walk that carves the route from column 0 towards the exit.

use crate::error::{PathError, Result};
use crate::generator::{BacktrackStrategy, RandomSource};
use crate::grid::{Grid, Terrain};
use log::{debug, trace, warn};

/// Outcome of a single iteration of the walk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Carved { row: usize, col: usize },
    Backtracked { row: usize, col: usize },
}

/// Counters for a finished carve.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CarveStats {
    pub start_row: usize,
    pub steps: usize,
    pub backtracks: usize,
    pub route_len: usize,
}

pub(crate) struct Carver<'a, R: RandomSource + ?Sized> {
    grid: &'a mut Grid,
    rng: &'a mut R,
    strategy: BacktrackStrategy,
    row: usize,
    col: usize,
    start_row: usize,
    /// Greatest column painted so far.
    max_col: usize,
    /// Distinct rows holding a `Path` cell in `max_col`.
    frontier_rows: Vec<usize>,
    /// Cells in carve order. Under `Retract` this is exactly the live route.
    trail: Vec<(usize, usize)>,
    steps: usize,
    backtracks: usize,
}

impl<'a, R: RandomSource + ?Sized> Carver<'a, R> {
    /// Paints the entrance cell in column 0 and the forced first step into
    /// column 1. The grid must be at least 3 wide.
    pub(crate) fn start(
        grid: &'a mut Grid,
        rng: &'a mut R,
        strategy: BacktrackStrategy,
        start_row: usize,
    ) -> Self {
        grid.set(start_row, 0, Terrain::Path);
        grid.set(start_row, 1, Terrain::Path);
        Carver {
            grid,
            rng,
            strategy,
            row: start_row,
            col: 1,
            start_row,
            max_col: 1,
            frontier_rows: vec![start_row],
            trail: vec![(start_row, 0), (start_row, 1)],
            steps: 0,
            backtracks: 0,
        }
    }

    #[cfg(test)]
    pub(crate) fn cursor(&self) -> (usize, usize) {
        (self.row, self.col)
    }

    #[cfg(test)]
    pub(crate) fn frontier(&self) -> (usize, &[usize]) {
        (self.max_col, &self.frontier_rows)
    }

    /// The walk stops once it stands in the column just before the exit.
    pub(crate) fn is_finished(&self) -> bool {
        self.col + 2 >= self.grid.size()
    }

    /// Moves the cursor may take right now, in the order right, up, down, left.
    pub(crate) fn candidates(&self) -> Vec<(usize, usize)> {
        let size = self.grid.size();
        let (row, col) = (self.row, self.col);

        let mut moves = Vec::with_capacity(4);
        if col + 2 < size {
            moves.push((row, col + 1));
        }
        if row > 0 {
            moves.push((row - 1, col));
        }
        if row + 1 < size {
            moves.push((row + 1, col));
        }
        // Never step back into the entrance column.
        if col > 1 {
            moves.push((row, col - 1));
        }

        moves.retain(|&(r, c)| self.accepts(r, c));
        moves
    }

    fn accepts(&self, row: usize, col: usize) -> bool {
        // The cursor itself is one neighbour; a second one would make a junction.
        !self.grid.is_path(row, col)
            && !self.grid.completes_square(row, col)
            && self.grid.path_neighbors(row, col) < 2
    }

    pub(crate) fn step(&mut self) -> Result<Step> {
        self.steps += 1;

        let moves = self.candidates();
        if moves.is_empty() {
            return self.backtrack();
        }

        let (row, col) = moves[self.rng.next_in_range(0, moves.len())];
        self.carve(row, col);
        Ok(Step::Carved { row, col })
    }

    fn carve(&mut self, row: usize, col: usize) {
        trace!("carve ({}, {})", row, col);
        self.grid.set(row, col, Terrain::Path);
        self.trail.push((row, col));
        self.row = row;
        self.col = col;

        if col > self.max_col {
            self.max_col = col;
            self.frontier_rows.clear();
            self.frontier_rows.push(row);
        } else if col == self.max_col && !self.frontier_rows.contains(&row) {
            self.frontier_rows.push(row);
        }
    }

    fn backtrack(&mut self) -> Result<Step> {
        self.backtracks += 1;
        self.prune_frontier();
        if self.frontier_rows.is_empty() {
            return Err(PathError::GenerationStalled {
                steps: self.steps,
                frontier: self.max_col,
            });
        }

        let pick = self.rng.next_in_range(0, self.frontier_rows.len());
        let row = self.frontier_rows[pick];
        let col = self.max_col;

        if self.strategy == BacktrackStrategy::Retract {
            self.retract_to(row, col);
        }

        debug!(
            "dead end at ({}, {}), resuming from frontier ({}, {})",
            self.row, self.col, row, col
        );
        self.row = row;
        self.col = col;
        Ok(Step::Backtracked { row, col })
    }

    /// Reverts every cell carved after (row, col) back to the fill terrain.
    fn retract_to(&mut self, row: usize, col: usize) {
        let Some(idx) = self.trail.iter().position(|&cell| cell == (row, col)) else {
            return;
        };
        let fill = self.grid.fill();
        for (r, c) in self.trail.drain(idx + 1..) {
            self.grid.set(r, c, fill);
        }
        self.prune_frontier();
    }

    /// Drops frontier rows whose cell is no longer `Path`.
    fn prune_frontier(&mut self) {
        let (grid, col) = (&*self.grid, self.max_col);
        self.frontier_rows.retain(|&r| grid.is_path(r, col));
    }

    /// Runs the walk to completion or until `max_steps` iterations have passed.
    pub(crate) fn run(mut self, max_steps: usize) -> Result<CarveStats> {
        while !self.is_finished() {
            if self.steps >= max_steps {
                warn!(
                    "carve stalled after {} steps ({} backtracks), frontier column {}",
                    self.steps, self.backtracks, self.max_col
                );
                return Err(PathError::GenerationStalled {
                    steps: self.steps,
                    frontier: self.max_col,
                });
            }
            self.step()?;
        }

        Ok(CarveStats {
            start_row: self.start_row,
            steps: self.steps,
            backtracks: self.backtracks,
            route_len: self.grid.path_cells().count(),
        })
    }
}

use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use itertools::iproduct;
use thiserror::Error;
use tracing::debug;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2025, day = 4, tags = ["grid", "simulation"])]
pub struct Solver;

/// A roll is reachable by the forklifts when fewer than this many of its
/// eight neighbours hold rolls.
const CROWDED: usize = 4;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FloorParseError {
    #[error("unexpected character '{ch}' at ({row}, {col}), expected '@' or '.'")]
    UnexpectedCell { row: usize, col: usize, ch: char },
    #[error("row {row} has {found} cells, expected {expected}")]
    Ragged {
        row: usize,
        expected: usize,
        found: usize,
    },
}

/// Warehouse floor; `true` cells hold a paper roll.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Floor {
    rows: usize,
    cols: usize,
    rolls: Vec<bool>,
}

impl Floor {
    fn parse(input: &str) -> Result<Self, FloorParseError> {
        let mut cols = None;
        let mut rolls = Vec::new();
        let lines = input.lines().map(str::trim).filter(|line| !line.is_empty());

        for (row, line) in lines.enumerate() {
            let width = line.chars().count();
            let expected = *cols.get_or_insert(width);
            if width != expected {
                return Err(FloorParseError::Ragged {
                    row,
                    expected,
                    found: width,
                });
            }
            for (col, ch) in line.chars().enumerate() {
                rolls.push(match ch {
                    '@' => true,
                    '.' => false,
                    _ => return Err(FloorParseError::UnexpectedCell { row, col, ch }),
                });
            }
        }

        let cols = cols.unwrap_or(0);
        let rows = if cols == 0 { 0 } else { rolls.len() / cols };
        Ok(Self { rows, cols, rolls })
    }

    pub fn roll_count(&self) -> usize {
        self.rolls.iter().filter(|&&roll| roll).count()
    }

    fn has_roll(&self, row: usize, col: usize) -> bool {
        row < self.rows && col < self.cols && self.rolls[row * self.cols + col]
    }

    fn neighbouring_rolls(&self, row: usize, col: usize) -> usize {
        iproduct!(-1isize..=1, -1isize..=1)
            .filter(|&offset| offset != (0, 0))
            .filter(|&(dr, dc)| {
                match (row.checked_add_signed(dr), col.checked_add_signed(dc)) {
                    (Some(r), Some(c)) => self.has_roll(r, c),
                    _ => false,
                }
            })
            .count()
    }

    /// Cell indices of the rolls a forklift can reach right now.
    pub fn accessible(&self) -> Vec<usize> {
        iproduct!(0..self.rows, 0..self.cols)
            .filter(|&(row, col)| {
                self.has_roll(row, col) && self.neighbouring_rolls(row, col) < CROWDED
            })
            .map(|(row, col)| row * self.cols + col)
            .collect()
    }

    /// Remove every accessible roll at once, repeating until none is left
    /// to reach. Returns how many were taken.
    pub fn clear_accessible(&mut self) -> usize {
        let mut removed = 0;
        for pass in 1.. {
            let reachable = self.accessible();
            if reachable.is_empty() {
                debug!(passes = pass - 1, removed, "no more reachable rolls");
                break;
            }
            removed += reachable.len();
            for idx in reachable {
                self.rolls[idx] = false;
            }
        }
        removed
    }
}

impl AocParser for Solver {
    type SharedData<'a> = Floor;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let floor = Floor::parse(input).map_err(|e| ParseError::InvalidFormat(e.to_string()))?;
        if floor.rolls.is_empty() {
            return Err(ParseError::MissingData("empty floor".to_string()));
        }
        Ok(floor)
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(shared.accessible().len().to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        // part one may run later against the same floor
        let mut floor = shared.clone();
        Ok(floor.clear_accessible().to_string())
    }
}

//! Christmas tree farm: which regions can hold all of their presents.

mod grid;
mod packing;

pub use grid::{Anchor, Board, Rotations, Shape, ShapeError};
pub use packing::{DEFAULT_BUDGET, PackingError, SearchBudget, pack, required_cells};

use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use thiserror::Error;
use tracing::debug;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2025, day = 12, tags = ["search", "backtracking"])]
pub struct Solver;

/// Region line `RxC: n0 n1 ...`, giving `R` rows and `C` columns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Region {
    pub rows: usize,
    pub cols: usize,
    /// Copies wanted of each shape, in shape order.
    pub counts: Vec<usize>,
}

#[derive(Debug)]
pub struct SharedData {
    shapes: Vec<Shape>,
    regions: Vec<Region>,
}

#[derive(Debug, Error)]
pub enum RegionParseError {
    #[error("expected '<rows>x<cols>: <counts>', got '{0}'")]
    WrongFormat(String),
    #[error("could not parse a number")]
    Number(#[from] std::num::ParseIntError),
    #[error("got {found} counts for {expected} shapes")]
    CountMismatch { found: usize, expected: usize },
}

impl Region {
    fn parse(line: &str, n_shapes: usize) -> Result<Self, RegionParseError> {
        let wrong_format = || RegionParseError::WrongFormat(line.to_string());
        let (size, counts) = line.split_once(':').ok_or_else(wrong_format)?;
        let (rows, cols) = size.trim().split_once('x').ok_or_else(wrong_format)?;

        let counts = counts
            .split_whitespace()
            .map(str::parse)
            .collect::<Result<Vec<usize>, _>>()?;
        if counts.len() != n_shapes {
            return Err(RegionParseError::CountMismatch {
                found: counts.len(),
                expected: n_shapes,
            });
        }

        let (rows, cols): (usize, usize) = (rows.parse()?, cols.parse()?);
        // the area must be addressable as one board
        rows.checked_mul(cols).ok_or_else(wrong_format)?;

        Ok(Self { rows, cols, counts })
    }

    /// Cells in the region. Parsed regions never saturate.
    pub fn area(&self) -> usize {
        self.rows.saturating_mul(self.cols)
    }

    /// Whether the presents fit, searching a fresh board.
    ///
    /// Regions whose presents need more cells than the area are rejected
    /// without searching.
    pub fn fits(
        &self,
        shapes: &[Shape],
        budget: &mut SearchBudget,
    ) -> Result<bool, PackingError> {
        let area = self.area();
        match required_cells(shapes, &self.counts) {
            Some(required) if required <= area => {}
            required => {
                debug!(?required, area, "region pruned by area");
                return Ok(false);
            }
        }

        let pieces: Vec<&Shape> = shapes
            .iter()
            .zip(&self.counts)
            .flat_map(|(shape, &count)| std::iter::repeat_n(shape, count))
            .collect();
        if pieces.is_empty() {
            return Ok(true);
        }
        let mut board = Board::new(self.rows, self.cols);
        pack(&mut board, &pieces, budget)
    }
}

/// Whether a section is a shape block rather than the region list.
fn is_region_line(line: &str) -> bool {
    line.split_once(':')
        .is_some_and(|(size, _)| size.contains('x'))
}

fn split_sections(input: &str) -> Vec<Vec<&str>> {
    let mut sections = Vec::new();
    let mut current = Vec::new();
    for line in input.lines().map(str::trim) {
        if line.is_empty() {
            if !current.is_empty() {
                sections.push(std::mem::take(&mut current));
            }
        } else {
            current.push(line);
        }
    }
    if !current.is_empty() {
        sections.push(current);
    }
    sections
}

impl AocParser for Solver {
    type SharedData<'a> = SharedData;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let mut sections = split_sections(input);
        let region_lines = match sections.pop() {
            Some(lines) if lines.first().is_some_and(|line| is_region_line(line)) => lines,
            _ => return Err(ParseError::MissingData("no region section".to_string())),
        };

        let shapes = sections
            .iter()
            .enumerate()
            .map(|(idx, block)| {
                // first line is the shape's label
                Shape::parse(block.iter().skip(1).copied())
                    .map_err(|e| ParseError::InvalidFormat(format!("(shape {idx}) {e}")))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let regions = region_lines
            .iter()
            .enumerate()
            .map(|(idx, line)| {
                Region::parse(line, shapes.len())
                    .map_err(|e| ParseError::InvalidFormat(format!("(region {}) {e}", idx + 1)))
            })
            .collect::<Result<Vec<_>, _>>()?;

        debug!(shapes = shapes.len(), regions = regions.len(), "parsed tree farm");
        Ok(SharedData { shapes, regions })
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let mut solved = 0usize;
        for (idx, region) in shared.regions.iter().enumerate() {
            let mut budget = SearchBudget::default();
            let fits = region.fits(&shared.shapes, &mut budget).map_err(|e| {
                debug!(region = idx + 1, "search budget exhausted");
                SolveError::failed(e)
            })?;
            debug!(
                region = idx + 1,
                rows = region.rows,
                cols = region.cols,
                fits,
                attempts = budget.spent(),
                "checked region"
            );
            solved += usize::from(fits);
        }
        Ok(solved.to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(_shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok("Merry Christmas!".to_string())
    }
}

use std::num::ParseIntError;

use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use itertools::Itertools;
use thiserror::Error;
use tracing::debug;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2025, day = 9, tags = ["geometry", "grid"])]
pub struct Solver;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tile {
    pub x: u32,
    pub y: u32,
}

#[derive(Debug, Error)]
pub enum TileParseError {
    #[error("expected '<x>,<y>', got '{0}'")]
    WrongFormat(String),
    #[error("could not parse a coordinate")]
    Coordinate(#[from] ParseIntError),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum LoopError {
    #[error("tiles {0:?} and {1:?} are not in the same row or column")]
    Diagonal(Tile, Tile),
}

impl Tile {
    fn parse(input: &str) -> Result<Self, TileParseError> {
        let (x, y) = input
            .split_once(',')
            .ok_or_else(|| TileParseError::WrongFormat(input.to_string()))?;
        Ok(Self {
            x: x.trim().parse()?,
            y: y.trim().parse()?,
        })
    }

    /// Tiles covered by the rectangle with `self` and `other` as opposite
    /// corners, edges included.
    pub fn area_with(&self, other: &Tile) -> u64 {
        let width = u64::from(self.x.abs_diff(other.x)) + 1;
        let height = u64::from(self.y.abs_diff(other.y)) + 1;
        width.saturating_mul(height)
    }
}

/// Sorted distinct coordinates of one axis, each mapped to a cell of a
/// compressed grid. Runs of skipped coordinates between two neighbours
/// share one gap cell; the first and last cells are padding.
#[derive(Debug)]
struct Axis {
    values: Vec<u32>,
    cells: Vec<usize>,
    len: usize,
}

impl Axis {
    fn new(values: impl Iterator<Item = u32>) -> Self {
        let values: Vec<u32> = values.sorted_unstable().dedup().collect();
        let mut cells = Vec::with_capacity(values.len());
        let mut next = 1;
        for (idx, &value) in values.iter().enumerate() {
            if idx > 0 && value - values[idx - 1] > 1 {
                next += 1;
            }
            cells.push(next);
            next += 1;
        }
        Self {
            values,
            cells,
            len: next + 1,
        }
    }

    fn cell(&self, value: u32) -> usize {
        // every looked up value is one of the tiles' coordinates
        self.values
            .binary_search(&value)
            .map_or(0, |idx| self.cells[idx])
    }
}

/// Compressed floor. Counts the cells outside the red and green loop so any
/// rectangle can be checked in constant time.
#[derive(Debug)]
struct Floor {
    xs: Axis,
    ys: Axis,
    /// `outside[y][x]`: cells outside the loop in `[0, y) x [0, x)`.
    outside: Vec<Vec<u32>>,
}

impl Floor {
    fn new(tiles: &[Tile]) -> Result<Self, LoopError> {
        let xs = Axis::new(tiles.iter().map(|t| t.x));
        let ys = Axis::new(tiles.iter().map(|t| t.y));
        let (width, height) = (xs.len, ys.len);

        let mut edge = vec![vec![false; width]; height];
        for (a, b) in tiles.iter().circular_tuple_windows() {
            if a.x != b.x && a.y != b.y {
                return Err(LoopError::Diagonal(*a, *b));
            }
            let (ax, bx) = (xs.cell(a.x), xs.cell(b.x));
            let (ay, by) = (ys.cell(a.y), ys.cell(b.y));
            for row in edge.iter_mut().take(ay.max(by) + 1).skip(ay.min(by)) {
                row[ax.min(bx)..=ax.max(bx)].fill(true);
            }
        }

        // the padding ring is always outside
        let mut is_outside = vec![vec![false; width]; height];
        let mut stack = vec![(0usize, 0usize)];
        is_outside[0][0] = true;
        while let Some((x, y)) = stack.pop() {
            let neighbours = [
                (x.wrapping_sub(1), y),
                (x + 1, y),
                (x, y.wrapping_sub(1)),
                (x, y + 1),
            ];
            for (nx, ny) in neighbours {
                if nx < width && ny < height && !edge[ny][nx] && !is_outside[ny][nx] {
                    is_outside[ny][nx] = true;
                    stack.push((nx, ny));
                }
            }
        }

        let mut outside = vec![vec![0u32; width + 1]; height + 1];
        for y in 0..height {
            for x in 0..width {
                outside[y + 1][x + 1] = u32::from(is_outside[y][x]) + outside[y][x + 1]
                    + outside[y + 1][x]
                    - outside[y][x];
            }
        }
        Ok(Self { xs, ys, outside })
    }

    /// Whether every tile of the rectangle is red or green.
    fn contains(&self, a: &Tile, b: &Tile) -> bool {
        let (ax, bx) = (self.xs.cell(a.x), self.xs.cell(b.x));
        let (ay, by) = (self.ys.cell(a.y), self.ys.cell(b.y));
        let (x0, x1) = (ax.min(bx), ax.max(bx) + 1);
        let (y0, y1) = (ay.min(by), ay.max(by) + 1);
        let o = &self.outside;
        o[y1][x1] + o[y0][x0] == o[y0][x1] + o[y1][x0]
    }
}

/// Red tiles in loop order.
#[derive(Debug)]
pub struct SharedData {
    tiles: Vec<Tile>,
}

impl SharedData {
    pub fn largest_rectangle(&self) -> u64 {
        self.tiles
            .iter()
            .tuple_combinations()
            .map(|(a, b)| a.area_with(b))
            .chain(self.tiles.first().map(|t| t.area_with(t)))
            .max()
            .unwrap_or(0)
    }

    /// Largest rectangle with red corners that stays on red or green tiles.
    pub fn largest_rectangle_inside(&self) -> Result<u64, LoopError> {
        let floor = Floor::new(&self.tiles)?;
        debug!(
            width = floor.xs.len,
            height = floor.ys.len,
            "compressed floor"
        );
        Ok(self
            .tiles
            .iter()
            .tuple_combinations()
            .filter(|(a, b)| floor.contains(a, b))
            .map(|(a, b)| a.area_with(b))
            .chain(self.tiles.first().map(|t| t.area_with(t)))
            .max()
            .unwrap_or(0))
    }
}

impl AocParser for Solver {
    type SharedData<'a> = SharedData;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let tiles = input
            .lines()
            .map(str::trim)
            .enumerate()
            .filter(|(_, line)| !line.is_empty())
            .map(|(line_idx, line)| {
                Tile::parse(line).map_err(|e| {
                    ParseError::InvalidFormat(format!("(line {}) {e}", line_idx + 1))
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        if tiles.is_empty() {
            return Err(ParseError::MissingData("no red tiles".to_string()));
        }
        Ok(SharedData { tiles })
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(shared.largest_rectangle().to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        shared
            .largest_rectangle_inside()
            .map(|area| area.to_string())
            .map_err(SolveError::failed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aoc_solver::Solver as _;

    const EXAMPLE: &str = "\
7,1
11,1
11,7
9,7
9,5
2,5
2,3
7,3
";

    #[test]
    fn test_example_part_one() {
        let mut shared = Solver::parse(EXAMPLE).unwrap();
        assert_eq!(Solver::solve_part(&mut shared, 1).unwrap(), "50");
    }

    #[test]
    fn test_example_part_two() {
        let mut shared = Solver::parse(EXAMPLE).unwrap();
        assert_eq!(Solver::solve_part(&mut shared, 2).unwrap(), "24");
    }

    #[test]
    fn test_axis_gap_cells() {
        let axis = Axis::new([7, 2, 8, 11, 7].into_iter());
        assert_eq!(axis.values, vec![2, 7, 8, 11]);
        // 2 | gap | 7 8 | gap | 11, between padding
        assert_eq!(axis.cells, vec![1, 3, 4, 6]);
        assert_eq!(axis.len, 8);
    }

    #[test]
    fn test_notch_is_excluded() {
        // U shape: the notch at x 3..=5, y 4..=6 is outside the loop
        let input = "0,0\n8,0\n8,6\n6,6\n6,3\n2,3\n2,6\n0,6";
        let shared = Solver::parse(input).unwrap();
        let floor = Floor::new(&shared.tiles).unwrap();
        assert!(floor.contains(&Tile { x: 0, y: 0 }, &Tile { x: 6, y: 3 }));
        assert!(!floor.contains(&Tile { x: 0, y: 0 }, &Tile { x: 6, y: 6 }));
        assert!(!floor.contains(&Tile { x: 0, y: 6 }, &Tile { x: 8, y: 0 }));
        assert_eq!(shared.largest_rectangle(), 9 * 7);
        assert_eq!(shared.largest_rectangle_inside(), Ok(7 * 4));
    }

    #[test]
    fn test_single_tile() {
        let mut shared = Solver::parse("4,4").unwrap();
        assert_eq!(Solver::solve_part(&mut shared, 1).unwrap(), "1");
        assert_eq!(Solver::solve_part(&mut shared, 2).unwrap(), "1");
    }

    #[test]
    fn test_diagonal_step_fails_part_two() {
        let mut shared = Solver::parse("0,0\n4,0\n6,3").unwrap();
        assert_eq!(Solver::solve_part(&mut shared, 1).unwrap(), "28");
        let err = Solver::solve_part(&mut shared, 2).unwrap_err();
        assert!(err.to_string().contains("same row or column"), "{err}");
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(
            Solver::parse("1,2\n3"),
            Err(ParseError::InvalidFormat(msg)) if msg.contains("line 2")
        ));
        assert!(Solver::parse("1,-2").is_err());
        assert!(matches!(Solver::parse(""), Err(ParseError::MissingData(_))));
    }
}

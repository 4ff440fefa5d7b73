//! Playground wiring: join junction boxes closest pair first.

use std::num::ParseIntError;

use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use itertools::Itertools;
use thiserror::Error;
use tracing::debug;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2025, day = 8, tags = ["graph", "union-find"])]
pub struct Solver;

/// Closest pairs wired up before the circuits are measured in part one.
pub const CONNECTIONS: usize = 1000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Point {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

#[derive(Debug, Error)]
pub enum PointParseError {
    #[error("expected '<x>,<y>,<z>', got '{0}'")]
    WrongFormat(String),
    #[error("could not parse a coordinate")]
    Coordinate(#[from] ParseIntError),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CircuitError {
    #[error("need at least {needed} circuits, found {found}")]
    TooFewCircuits { needed: usize, found: usize },
    #[error("the boxes already form a single circuit")]
    NothingToConnect,
}

impl Point {
    fn parse(input: &str) -> Result<Self, PointParseError> {
        let wrong_format = || PointParseError::WrongFormat(input.to_string());
        let (x, y, z) = input
            .split(',')
            .map(str::trim)
            .collect_tuple()
            .ok_or_else(wrong_format)?;
        Ok(Self {
            x: x.parse()?,
            y: y.parse()?,
            z: z.parse()?,
        })
    }

    /// Squared straight-line distance. Exact, so ties order the same way
    /// every run.
    pub fn distance_squared(&self, other: &Point) -> u128 {
        [
            self.x.abs_diff(other.x),
            self.y.abs_diff(other.y),
            self.z.abs_diff(other.z),
        ]
        .into_iter()
        .map(|d| u128::from(d).pow(2))
        .sum()
    }
}

/// Union-find over box indices, union by size with path halving.
#[derive(Debug, Clone)]
pub struct Circuits {
    parent: Vec<usize>,
    size: Vec<usize>,
    count: usize,
}

impl Circuits {
    pub fn new(boxes: usize) -> Self {
        Self {
            parent: (0..boxes).collect(),
            size: vec![1; boxes],
            count: boxes,
        }
    }

    pub fn find(&mut self, mut node: usize) -> usize {
        while self.parent[node] != node {
            self.parent[node] = self.parent[self.parent[node]];
            node = self.parent[node];
        }
        node
    }

    /// Wire `a` to `b`. Returns whether two circuits were merged.
    pub fn join(&mut self, a: usize, b: usize) -> bool {
        let (mut a, mut b) = (self.find(a), self.find(b));
        if a == b {
            return false;
        }
        if self.size[a] < self.size[b] {
            std::mem::swap(&mut a, &mut b);
        }
        self.parent[b] = a;
        self.size[a] += self.size[b];
        self.count -= 1;
        true
    }

    /// Number of separate circuits.
    pub fn count(&self) -> usize {
        self.count
    }

    /// Box count of every circuit, largest first.
    pub fn sizes(&self) -> Vec<usize> {
        let mut sizes: Vec<usize> = (0..self.parent.len())
            .filter(|&node| self.parent[node] == node)
            .map(|root| self.size[root])
            .collect();
        sizes.sort_unstable_by(|a, b| b.cmp(a));
        sizes
    }
}

#[derive(Debug)]
pub struct SharedData {
    boxes: Vec<Point>,
    /// Every pair of boxes, closest first.
    pairs: Vec<(usize, usize)>,
}

impl SharedData {
    fn new(boxes: Vec<Point>) -> Self {
        let mut pairs: Vec<(u128, usize, usize)> = (0..boxes.len())
            .tuple_combinations()
            .map(|(i, j)| (boxes[i].distance_squared(&boxes[j]), i, j))
            .collect();
        pairs.sort_unstable();
        let pairs = pairs.into_iter().map(|(_, i, j)| (i, j)).collect();
        Self { boxes, pairs }
    }

    /// Wire the `connections` closest pairs, counting pairs that were
    /// already in one circuit, and multiply the three largest circuits.
    pub fn largest_circuits_product(&self, connections: usize) -> Result<u64, CircuitError> {
        let mut circuits = Circuits::new(self.boxes.len());
        for &(i, j) in self.pairs.iter().take(connections) {
            circuits.join(i, j);
        }

        let sizes = circuits.sizes();
        match sizes[..] {
            [a, b, c, ..] => Ok([a, b, c].into_iter().map(|s| s as u64).product()),
            _ => Err(CircuitError::TooFewCircuits {
                needed: 3,
                found: sizes.len(),
            }),
        }
    }

    /// Keep wiring closest pairs until one circuit remains and return the
    /// pair that closed it.
    pub fn last_connection(&self) -> Result<(Point, Point), CircuitError> {
        let mut circuits = Circuits::new(self.boxes.len());
        let mut last = None;
        for &(i, j) in &self.pairs {
            if circuits.count() == 1 {
                break;
            }
            if circuits.join(i, j) {
                last = Some((self.boxes[i], self.boxes[j]));
            }
        }
        last.ok_or(CircuitError::NothingToConnect)
    }
}

impl AocParser for Solver {
    type SharedData<'a> = SharedData;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let boxes = input
            .lines()
            .map(str::trim)
            .enumerate()
            .filter(|(_, line)| !line.is_empty())
            .map(|(line_idx, line)| {
                Point::parse(line).map_err(|e| {
                    ParseError::InvalidFormat(format!("(line {}) {e}", line_idx + 1))
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        if boxes.is_empty() {
            return Err(ParseError::MissingData("no junction boxes".to_string()));
        }

        let shared = SharedData::new(boxes);
        debug!(
            boxes = shared.boxes.len(),
            pairs = shared.pairs.len(),
            "sorted box pairs"
        );
        Ok(shared)
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        shared
            .largest_circuits_product(CONNECTIONS)
            .map(|product| product.to_string())
            .map_err(SolveError::failed)
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let (a, b) = shared.last_connection().map_err(SolveError::failed)?;
        Ok((i64::from(a.x) * i64::from(b.x)).to_string())
    }
}

use std::collections::BTreeSet;
use std::num::ParseIntError;

use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use thiserror::Error;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2025, day = 2, tags = ["math", "strings"])]
pub struct Solver;

/// Inclusive id range `start-end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IdRange {
    pub start: u64,
    pub end: u64,
}

#[derive(Debug)]
pub struct SharedData {
    ranges: Vec<IdRange>,
}

#[derive(Debug, Error)]
pub enum IdRangeParseError {
    #[error("expected '<number>-<number>', got '{0}'")]
    WrongFormat(String),
    #[error("could not parse '{0}' as an id")]
    Id(String, #[source] ParseIntError),
    #[error("range {0}-{1} ends before it starts")]
    Reversed(u64, u64),
}

#[derive(Debug, Error)]
#[error("sum of invalid ids does not fit in 64 bits")]
pub struct SumOverflow;

/// How often a digit block must repeat for an id to be invalid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Repeats {
    Twice,
    AtLeastTwice,
}

impl Repeats {
    fn allows(self, times: u32) -> bool {
        match self {
            Repeats::Twice => times == 2,
            Repeats::AtLeastTwice => times >= 2,
        }
    }
}

impl IdRange {
    fn parse(input: &str) -> Result<Self, IdRangeParseError> {
        let (start, end) = input
            .split_once('-')
            .ok_or_else(|| IdRangeParseError::WrongFormat(input.to_string()))?;
        let id = |s: &str| {
            s.trim()
                .parse::<u64>()
                .map_err(|e| IdRangeParseError::Id(s.to_string(), e))
        };
        let (start, end) = (id(start)?, id(end)?);
        if start > end {
            return Err(IdRangeParseError::Reversed(start, end));
        }
        Ok(Self { start, end })
    }

    /// Ids in the range made of one digit block repeated as `repeats` allows.
    ///
    /// Built from the block rather than by scanning, so wide ranges stay
    /// cheap. An id with several block lengths (`222222`) appears once.
    pub fn invalid_ids(&self, repeats: Repeats) -> BTreeSet<u64> {
        let mut ids = BTreeSet::new();
        for digits in digit_count(self.start)..=digit_count(self.end) {
            for block in 1..=digits / 2 {
                let times = digits / block;
                if digits % block != 0 || !repeats.allows(times) {
                    continue;
                }
                // `block` digits repeated `times` times is `seed * repunit`
                let repunit: u128 = (0..times).map(|i| 10u128.pow(block * i)).sum();
                let lowest_seed = 10u128.pow(block - 1);
                let highest_seed = 10u128.pow(block) - 1;

                let first = u128::from(self.start).div_ceil(repunit).max(lowest_seed);
                let last = (u128::from(self.end) / repunit).min(highest_seed);
                ids.extend(
                    (first..=last).filter_map(|seed| u64::try_from(seed * repunit).ok()),
                );
            }
        }
        ids
    }
}

fn digit_count(id: u64) -> u32 {
    id.checked_ilog10().map_or(1, |log| log + 1)
}

impl AocParser for Solver {
    type SharedData<'a> = SharedData;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let ranges = input
            .split(',')
            .map(str::trim)
            .filter(|range| !range.is_empty())
            .enumerate()
            .map(|(idx, range)| {
                IdRange::parse(range)
                    .map_err(|e| ParseError::InvalidFormat(format!("(range {}) {e}", idx + 1)))
            })
            .collect::<Result<Vec<_>, _>>()?;

        if ranges.is_empty() {
            return Err(ParseError::MissingData("no id ranges".to_string()));
        }
        Ok(SharedData { ranges })
    }
}

fn sum_invalid_ids(ranges: &[IdRange], repeats: Repeats) -> Result<u64, SumOverflow> {
    ranges
        .iter()
        .flat_map(|range| range.invalid_ids(repeats))
        .try_fold(0u64, |sum, id| sum.checked_add(id).ok_or(SumOverflow))
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let sum = sum_invalid_ids(&shared.ranges, Repeats::Twice).map_err(SolveError::failed)?;
        Ok(sum.to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let sum =
            sum_invalid_ids(&shared.ranges, Repeats::AtLeastTwice).map_err(SolveError::failed)?;
        Ok(sum.to_string())
    }
}

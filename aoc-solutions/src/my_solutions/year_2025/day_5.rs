//! Cafeteria inventory: which ingredient ids fall into a fresh range.

use std::num::ParseIntError;

use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use thiserror::Error;
use tracing::debug;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2025, day = 5, tags = ["intervals", "sorting"])]
pub struct Solver;

/// Inclusive range of fresh ingredient ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct FreshRange {
    pub start: u64,
    pub end: u64,
}

#[derive(Debug, Error)]
pub enum FreshRangeParseError {
    #[error("expected '<number>-<number>', got '{0}'")]
    WrongFormat(String),
    #[error("could not parse '{0}' as an id")]
    Id(String, #[source] ParseIntError),
    #[error("range {0}-{1} ends before it starts")]
    Reversed(u64, u64),
}

impl FreshRange {
    fn parse(input: &str) -> Result<Self, FreshRangeParseError> {
        let (start, end) = input
            .split_once('-')
            .ok_or_else(|| FreshRangeParseError::WrongFormat(input.to_string()))?;
        let id = |s: &str| {
            s.parse::<u64>()
                .map_err(|e| FreshRangeParseError::Id(s.to_string(), e))
        };
        let (start, end) = (id(start)?, id(end)?);
        if start > end {
            return Err(FreshRangeParseError::Reversed(start, end));
        }
        Ok(Self { start, end })
    }

    /// Number of ids in the range. Can exceed `u64::MAX` by one.
    pub fn id_count(&self) -> u128 {
        u128::from(self.end - self.start) + 1
    }
}

/// Sort `ranges` and fuse the ones that overlap or touch. The result is
/// sorted and pairwise disjoint.
pub fn merge_ranges(mut ranges: Vec<FreshRange>) -> Vec<FreshRange> {
    ranges.sort_unstable();
    let mut merged: Vec<FreshRange> = Vec::with_capacity(ranges.len());
    for range in ranges {
        match merged.last_mut() {
            Some(last) if range.start <= last.end.saturating_add(1) => {
                last.end = last.end.max(range.end);
            }
            _ => merged.push(range),
        }
    }
    merged
}

#[derive(Debug)]
pub struct SharedData {
    /// Disjoint and sorted by start.
    fresh: Vec<FreshRange>,
    ingredients: Vec<u64>,
}

impl SharedData {
    pub fn is_fresh(&self, id: u64) -> bool {
        let idx = self.fresh.partition_point(|range| range.end < id);
        self.fresh.get(idx).is_some_and(|range| range.start <= id)
    }
}

impl AocParser for Solver {
    type SharedData<'a> = SharedData;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let mut lines = input.lines().map(str::trim).enumerate();

        let mut ranges = Vec::new();
        for (line_idx, line) in lines.by_ref() {
            if line.is_empty() {
                break;
            }
            let range = FreshRange::parse(line).map_err(|e| {
                ParseError::InvalidFormat(format!("(line {}) {e}", line_idx + 1))
            })?;
            ranges.push(range);
        }
        if ranges.is_empty() {
            return Err(ParseError::MissingData("no fresh ranges".to_string()));
        }

        let ingredients = lines
            .filter(|(_, line)| !line.is_empty())
            .map(|(line_idx, line)| {
                line.parse::<u64>().map_err(|e| {
                    ParseError::InvalidFormat(format!("(line {}) '{line}': {e}", line_idx + 1))
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let fresh = merge_ranges(ranges);
        debug!(
            ranges = fresh.len(),
            ingredients = ingredients.len(),
            "parsed inventory"
        );
        Ok(SharedData { fresh, ingredients })
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let fresh = shared
            .ingredients
            .iter()
            .filter(|&&id| shared.is_fresh(id))
            .count();
        Ok(fresh.to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let ids: u128 = shared.fresh.iter().map(FreshRange::id_count).sum();
        Ok(ids.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aoc_solver::Solver as _;
    use proptest::prelude::*;

    const EXAMPLE: &str = "\
3-5
10-14
16-20
12-18

1
5
8
11
17
32
";

    fn range(start: u64, end: u64) -> FreshRange {
        FreshRange { start, end }
    }

    #[test]
    fn test_example_part_one() {
        let mut shared = Solver::parse(EXAMPLE).unwrap();
        assert_eq!(Solver::solve_part(&mut shared, 1).unwrap(), "3");
    }

    #[test]
    fn test_example_part_two() {
        let mut shared = Solver::parse(EXAMPLE).unwrap();
        assert_eq!(Solver::solve_part(&mut shared, 2).unwrap(), "14");
    }

    #[test]
    fn test_merge_ranges() {
        let merged = merge_ranges(vec![range(10, 14), range(3, 5), range(16, 20), range(12, 18)]);
        assert_eq!(merged, vec![range(3, 5), range(10, 20)]);

        // touching ranges fuse, gaps do not
        let merged = merge_ranges(vec![range(1, 2), range(3, 4), range(6, 6)]);
        assert_eq!(merged, vec![range(1, 4), range(6, 6)]);

        let merged = merge_ranges(vec![range(1, 10), range(2, 3)]);
        assert_eq!(merged, vec![range(1, 10)]);
    }

    #[test]
    fn test_full_id_space() {
        let mut shared = Solver::parse("0-18446744073709551615\n\n0\n").unwrap();
        assert_eq!(Solver::solve_part(&mut shared, 1).unwrap(), "1");
        assert_eq!(Solver::solve_part(&mut shared, 2).unwrap(), "18446744073709551616");
    }

    #[test]
    fn test_no_ingredients() {
        let mut shared = Solver::parse("1-3\n").unwrap();
        assert_eq!(Solver::solve_part(&mut shared, 1).unwrap(), "0");
        assert_eq!(Solver::solve_part(&mut shared, 2).unwrap(), "3");
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(
            Solver::parse("1-3\n5\n\n4"),
            Err(ParseError::InvalidFormat(msg)) if msg.contains("line 2")
        ));
        assert!(matches!(
            Solver::parse("5-3\n\n4"),
            Err(ParseError::InvalidFormat(msg)) if msg.contains("ends before")
        ));
        assert!(matches!(
            Solver::parse("1-3\n\nfour"),
            Err(ParseError::InvalidFormat(msg)) if msg.contains("line 3")
        ));
        assert!(matches!(Solver::parse("\n4\n"), Err(ParseError::MissingData(_))));
    }

    proptest! {
        #[test]
        fn prop_merged_ranges_keep_membership(
            bounds in prop::collection::vec((0u64..60, 0u64..8), 1..8),
            id in 0u64..70,
        ) {
            let ranges: Vec<_> = bounds.iter().map(|&(s, len)| range(s, s + len)).collect();
            let in_any = ranges.iter().any(|r| (r.start..=r.end).contains(&id));

            let shared = SharedData { fresh: merge_ranges(ranges), ingredients: vec![] };
            prop_assert_eq!(shared.is_fresh(id), in_any);
            for pair in shared.fresh.windows(2) {
                prop_assert!(pair[0].end + 1 < pair[1].start);
            }
        }
    }
}

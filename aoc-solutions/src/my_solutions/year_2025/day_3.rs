use anyhow::anyhow;
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use thiserror::Error;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2025, day = 3, tags = ["greedy", "strings"])]
pub struct Solver;

/// Digits per battery bank, in input order.
#[derive(Debug)]
pub struct SharedData {
    banks: Vec<Vec<u8>>,
}

#[derive(Debug, Error)]
pub enum JoltageError {
    #[error("bank on line {line} has {len} batteries, need at least {digits}")]
    BankTooShort {
        line: usize,
        len: usize,
        digits: usize,
    },
}

impl AocParser for Solver {
    type SharedData<'a> = SharedData;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        input
            .trim()
            .lines()
            .map(str::trim)
            .enumerate()
            .map(|(line_idx, line)| {
                line.bytes()
                    .map(|b| match b {
                        b'0'..=b'9' => Ok(b - b'0'),
                        _ => Err(anyhow!("(line {}) '{}' is not a digit", line_idx + 1, b as char)),
                    })
                    .collect::<Result<Vec<_>, _>>()
            })
            .collect::<Result<Vec<_>, _>>()
            .map(|banks| SharedData { banks })
            .map_err(|e| ParseError::InvalidFormat(e.to_string()))
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        total_joltage(&shared.banks, 2).map(|total| total.to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        total_joltage(&shared.banks, 12).map(|total| total.to_string())
    }
}

fn total_joltage(banks: &[Vec<u8>], digits: usize) -> Result<u64, SolveError> {
    banks
        .iter()
        .enumerate()
        .map(|(line_idx, bank)| {
            max_joltage(bank, digits).ok_or_else(|| {
                SolveError::failed(JoltageError::BankTooShort {
                    line: line_idx + 1,
                    len: bank.len(),
                    digits,
                })
            })
        })
        .sum()
}

/// Largest number formed by picking `digits` batteries from `bank` without
/// reordering them. `None` if the bank is too short.
///
/// Each pick takes the leftmost maximum of the window that still leaves
/// enough batteries for the remaining picks.
pub fn max_joltage(bank: &[u8], digits: usize) -> Option<u64> {
    if digits == 0 || bank.len() < digits {
        return None;
    }

    let mut start = 0;
    let mut joltage = 0u64;
    for remaining in (0..digits).rev() {
        let window = &bank[start..bank.len() - remaining];
        // max_by_key keeps the last maximum, so scan backwards to get the leftmost
        let (offset, &digit) = window.iter().enumerate().rev().max_by_key(|&(_, d)| *d)?;
        joltage = joltage * 10 + u64::from(digit);
        start += offset + 1;
    }
    Some(joltage)
}

#[cfg(test)]
mod tests {
    use super::*;
    use aoc_solver::Solver as _;
    use proptest::prelude::*;

    const EXAMPLE: &str = "\
987654321111111
811111111111119
234234234234278
818181911112111
";

    fn digits(s: &str) -> Vec<u8> {
        s.bytes().map(|b| b - b'0').collect()
    }

    #[test]
    fn test_example_part_one() {
        let mut shared = Solver::parse(EXAMPLE).unwrap();
        assert_eq!(Solver::solve_part(&mut shared, 1).unwrap(), "357");
    }

    #[test]
    fn test_example_part_two() {
        let mut shared = Solver::parse(EXAMPLE).unwrap();
        assert_eq!(Solver::solve_part(&mut shared, 2).unwrap(), "3121910778619");
    }

    #[test]
    fn test_max_joltage_per_bank() {
        assert_eq!(max_joltage(&digits("987654321111111"), 2), Some(98));
        assert_eq!(max_joltage(&digits("811111111111119"), 2), Some(89));
        assert_eq!(max_joltage(&digits("234234234234278"), 12), Some(434234234278));
        assert_eq!(max_joltage(&digits("818181911112111"), 12), Some(888911112111));
    }

    #[test]
    fn test_leftmost_maximum_is_chosen() {
        // taking the second 9 first would leave only the 8
        assert_eq!(max_joltage(&digits("998"), 2), Some(99));
        assert_eq!(max_joltage(&digits("9891"), 3), Some(991));
        assert_eq!(max_joltage(&digits("99"), 2), Some(99));
    }

    #[test]
    fn test_short_bank() {
        assert_eq!(max_joltage(&digits("5"), 2), None);
        assert_eq!(max_joltage(&digits("12"), 0), None);

        let mut shared = Solver::parse("12345\n9").unwrap();
        let err = Solver::solve_part(&mut shared, 1).unwrap_err();
        assert!(err.to_string().contains("line 2"));
    }

    #[test]
    fn test_rejects_non_digits() {
        let err = Solver::parse("123\n12a4").unwrap_err();
        assert!(matches!(err, ParseError::InvalidFormat(msg) if msg.contains("line 2")));
    }

    /// Brute force: best subsequence of length `k` over all index choices.
    fn brute_force(bank: &[u8], k: usize) -> u64 {
        fn go(bank: &[u8], k: usize, acc: u64) -> u64 {
            if k == 0 {
                return acc;
            }
            (0..=bank.len() - k)
                .map(|i| go(&bank[i + 1..], k - 1, acc * 10 + u64::from(bank[i])))
                .max()
                .unwrap_or(acc)
        }
        go(bank, k, 0)
    }

    proptest! {
        #[test]
        fn prop_greedy_matches_brute_force(
            bank in prop::collection::vec(1u8..=9, 1..10),
            k in 1usize..4,
        ) {
            prop_assume!(bank.len() >= k);
            prop_assert_eq!(max_joltage(&bank, k), Some(brute_force(&bank, k)));
        }
    }
}

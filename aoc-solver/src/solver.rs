//! Core solver traits

use crate::error::{ParseError, SolveError};

/// Parses raw puzzle input into the data every part works on.
///
/// # Example
///
/// ```
/// use aoc_solver::{AocParser, ParseError};
///
/// struct Banks;
///
/// impl AocParser for Banks {
///     type SharedData<'a> = Vec<&'a str>;
///
///     fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
///         let banks: Vec<_> = input.lines().map(str::trim).collect();
///         if banks.iter().any(|b| !b.bytes().all(|c| c.is_ascii_digit())) {
///             return Err(ParseError::InvalidFormat("banks hold digits only".into()));
///         }
///         Ok(banks)
///     }
/// }
///
/// assert_eq!(Banks::parse("12\n34").unwrap(), vec!["12", "34"]);
/// ```
pub trait AocParser {
    /// Parsed input plus whatever intermediate results the parts want to share.
    ///
    /// Either owned data or data borrowing from the input (`&'a str`) works.
    type SharedData<'a>;

    /// Parse the input string into the shared data structure.
    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError>;
}

/// Solves part `N` of a puzzle.
///
/// The part number is a const generic, so a solver that forgets a part fails
/// to compile once `#[derive(AocSolver)]` dispatches to it.
///
/// # Example
///
/// ```
/// use aoc_solver::{AocParser, PartSolver, ParseError, SolveError};
///
/// struct Banks;
///
/// impl AocParser for Banks {
///     type SharedData<'a> = Vec<u32>;
///
///     fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
///         input
///             .lines()
///             .map(|l| l.parse().map_err(|_| ParseError::InvalidFormat(l.to_string())))
///             .collect()
///     }
/// }
///
/// impl PartSolver<1> for Banks {
///     fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
///         Ok(shared.iter().max().copied().unwrap_or_default().to_string())
///     }
/// }
///
/// let mut shared = Banks::parse("98\n89").unwrap();
/// assert_eq!(<Banks as PartSolver<1>>::solve(&mut shared).unwrap(), "98");
/// ```
pub trait PartSolver<const N: u8>: AocParser {
    /// Solve this part of the puzzle against the shared data.
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError>;
}

/// Core trait that every registered solver implements.
///
/// Usually generated by `#[derive(AocSolver)]`, which forwards each part to
/// the matching [`PartSolver`] implementation. Hand-written implementations
/// must return [`SolveError::PartNotImplemented`] for unknown parts.
pub trait Solver: AocParser {
    /// Number of parts this solver implements
    const PARTS: u8;

    /// Solve a specific part of the problem
    ///
    /// # Returns
    /// * `Ok(String)` - The answer for this part
    /// * `Err(SolveError::PartNotImplemented)` - The part is not implemented
    /// * `Err(SolveError::SolveFailed)` - An error occurred while solving
    fn solve_part(shared: &mut Self::SharedData<'_>, part: u8) -> Result<String, SolveError>;
}

/// Range-checked entry point used by solver instances.
pub trait SolverExt: Solver {
    /// Solve `part`, rejecting 0 and anything above [`Solver::PARTS`]
    /// before the solver sees it.
    fn solve_part_checked_range(
        shared: &mut Self::SharedData<'_>,
        part: u8,
    ) -> Result<String, SolveError> {
        if (1..=Self::PARTS).contains(&part) {
            Self::solve_part(shared, part)
        } else {
            Err(SolveError::PartOutOfRange(part))
        }
    }
}

impl<T: Solver + ?Sized> SolverExt for T {}

//! Errors raised while registering, parsing and solving

use thiserror::Error;

/// Input rejected by a solver's parser
#[derive(Debug, Clone, Error)]
pub enum ParseError {
    #[error("Invalid format: {0}")]
    InvalidFormat(String),
    /// A section or value the puzzle needs is absent
    #[error("Missing data: {0}")]
    MissingData(String),
    #[error("Parse error: {0}")]
    Other(String),
}

/// Failure of a single part
#[derive(Debug, Error)]
pub enum SolveError {
    /// Dispatch found no `PartSolver` for this part
    #[error("Part {0} is not implemented")]
    PartNotImplemented(u8),
    /// The requested part number is out of range (exceeds the solver's parts)
    #[error("Part {0} is out of range")]
    PartOutOfRange(u8),
    /// The part ran and failed; use [`SolveError::failed`] to build one
    #[error("Solve failed: {0}")]
    SolveFailed(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl SolveError {
    /// Wrap any error type as a `SolveFailed`
    pub fn failed<E>(error: E) -> Self
    where
        E: Into<Box<dyn std::error::Error + Send + Sync>>,
    {
        SolveError::SolveFailed(error.into())
    }
}

/// Anything that stops a registry lookup from producing an answer
#[derive(Debug, Error)]
pub enum SolverError {
    #[error("Solver not found for year {0} day {1}")]
    NotFound(u16, u8),
    /// Year or day lies outside the supported storage range
    #[error("Year {0} day {1} is outside the supported range")]
    InvalidYearDay(u16, u8),
    #[error("Parse error: {0}")]
    ParseError(#[from] ParseError),
    #[error("Solve error: {0}")]
    SolveError(#[from] SolveError),
}

/// Rejected registration
#[derive(Debug, Clone, Error)]
pub enum RegistrationError {
    /// The year/day slot is already taken
    #[error("Duplicate solver registration for year {0} day {1}")]
    DuplicateSolver(u16, u8),
    /// Year or day lies outside the supported storage range
    #[error("Cannot register year {0} day {1}: outside the supported range")]
    InvalidYearDay(u16, u8),
}

//! Advent of Code Solver Library
//!
//! A small, type-safe framework for running Advent of Code puzzle solvers.
//! Each puzzle parses its input once into shared data and then answers one
//! or more parts against that data.
//!
//! # Overview
//!
//! This library provides:
//! - [`AocParser`] / [`PartSolver`] / [`Solver`] traits for defining solvers
//! - Timed, type-erased solver instances ([`DynSolver`])
//! - A registry keyed by (year, day) with plugin-based auto registration
//!
//! # Quick Example
//!
//! ```
//! use aoc_solver::{
//!     AocParser, AocSolver, ParseError, PartSolver, RegisterableSolver, SolveError,
//!     SolverRegistryBuilder,
//! };
//!
//! #[derive(AocSolver)]
//! #[aoc_solver(max_parts = 2)]
//! struct Depths;
//!
//! impl AocParser for Depths {
//!     type SharedData<'a> = Vec<i32>;
//!
//!     fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
//!         input
//!             .lines()
//!             .map(|l| l.parse().map_err(|_| ParseError::InvalidFormat(l.to_string())))
//!             .collect()
//!     }
//! }
//!
//! impl PartSolver<1> for Depths {
//!     fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
//!         Ok(shared.iter().sum::<i32>().to_string())
//!     }
//! }
//!
//! impl PartSolver<2> for Depths {
//!     fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
//!         Ok(shared.iter().max().copied().unwrap_or_default().to_string())
//!     }
//! }
//!
//! let registry = Depths
//!     .register_with(SolverRegistryBuilder::new(), 2025, 1)
//!     .unwrap()
//!     .build();
//!
//! let mut solver = registry.create_solver(2025, 1, "1\n2\n3").unwrap();
//! assert_eq!(solver.solve(1).unwrap().answer, "6");
//! assert_eq!(solver.solve(2).unwrap().answer, "3");
//! ```
//!
//! # Plugins
//!
//! `#[derive(AutoRegisterSolver)]` submits a [`SolverPlugin`] through
//! `inventory`, so linking a solutions crate is enough for
//! [`SolverRegistryBuilder::register_all_plugins`] to find its solvers:
//!
//! ```ignore
//! #[derive(AocSolver, AutoRegisterSolver)]
//! #[aoc_solver(max_parts = 2)]
//! #[aoc(year = 2025, day = 12, tags = ["search"])]
//! pub struct Solver;
//! ```

mod error;
mod instance;
mod registry;
mod solver;

pub use error::{ParseError, RegistrationError, SolveError, SolverError};
pub use instance::{DynSolver, SolveResult, SolverInstance};
pub use registry::{
    FactoryInfo, RegisterableSolver, SolverFactory, SolverFactoryStorage, SolverPlugin,
    SolverRegistry, SolverRegistryBuilder,
};
pub use solver::{AocParser, PartSolver, Solver, SolverExt};

// Re-export inventory for use by the derive macro
pub use inventory;

pub use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

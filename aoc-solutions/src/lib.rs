//! Advent of Code puzzle solutions with automatic registration
//!
//! Each solution derives `AocSolver` and `AutoRegisterSolver`, so linking
//! this crate is enough for the runner to discover it.

pub mod utils;

#[cfg(feature = "my-solutions")]
pub mod my_solutions;

//! Dynamic Programming Cache with Lazy Evaluation
//!
//! Memoization for recursive computations whose values depend on other
//! values in a directed acyclic graph (DAG). Each index is computed at most
//! once; dependencies are resolved on first request.
//!
//! A cache is an ordinary value owned by the caller. Create one per
//! top-level computation and drop it afterwards; nothing is kept
//! process-wide.
//!
//! # Warning: Cycle Behavior
//!
//! **The cache does NOT detect cycles.** A cyclic dependency graph recurses
//! until the stack overflows. Check for cycles before building the cache.
//!
//! # Example
//!
//! ```rust
//! use aoc_solutions::utils::dp_cache::{DpCache, DpProblem, HashMapBackend};
//!
//! /// Monotone lattice paths from (0, 0) to (r, c).
//! struct GridPaths;
//!
//! impl DpProblem<(usize, usize), u64> for GridPaths {
//!     fn deps(&self, pos: &(usize, usize)) -> Vec<(usize, usize)> {
//!         let (r, c) = *pos;
//!         match (r, c) {
//!             (0, 0) => vec![],
//!             (0, c) => vec![(0, c - 1)],
//!             (r, 0) => vec![(r - 1, 0)],
//!             (r, c) => vec![(r - 1, c), (r, c - 1)],
//!         }
//!     }
//!     fn compute(&self, _pos: &(usize, usize), deps: Vec<u64>) -> u64 {
//!         if deps.is_empty() { 1 } else { deps.iter().sum() }
//!     }
//! }
//!
//! let cache = DpCache::with_problem(HashMapBackend::new(), GridPaths);
//! assert_eq!(cache.get(&(4, 4)), 70);
//! ```

mod backend;
mod cache;
mod problem;

pub use backend::{Backend, HashMapBackend};
pub use cache::DpCache;
pub use problem::DpProblem;

#[cfg(test)]
mod tests;

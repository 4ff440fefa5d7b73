//! Single-threaded DP cache implementation.

use std::cell::RefCell;
use std::marker::PhantomData;

use super::backend::Backend;
use super::problem::DpProblem;

/// A dynamic programming cache with lazy evaluation and dependency resolution.
///
/// # Type Parameters
///
/// - `I`: Index type (must implement `Clone`)
/// - `K`: Value type (must implement `Clone`)
/// - `B`: Backend storage type (must implement `Backend<I, K>`)
/// - `P`: Problem type (must implement `DpProblem<I, K>`)
///
/// # Warning: No Cycle Detection
///
/// Cyclic dependencies recurse without bound. **Users MUST ensure
/// dependencies form a DAG.**
///
/// # Example
///
/// ```rust
/// use aoc_solutions::utils::dp_cache::{DpCache, DpProblem, HashMapBackend};
///
/// struct Factorial;
///
/// impl DpProblem<u64, u64> for Factorial {
///     fn deps(&self, n: &u64) -> Vec<u64> {
///         if *n == 0 { vec![] } else { vec![n - 1] }
///     }
///     fn compute(&self, n: &u64, deps: Vec<u64>) -> u64 {
///         if *n == 0 { 1 } else { n * deps[0] }
///     }
/// }
///
/// let cache = DpCache::with_problem(HashMapBackend::new(), Factorial);
/// assert_eq!(cache.get(&5), 120);
/// ```
pub struct DpCache<I, K, B, P>
where
    B: Backend<I, K>,
    P: DpProblem<I, K>,
{
    backend: RefCell<B>,
    problem: P,
    _phantom: PhantomData<(I, K)>,
}

impl<I, K, B, P> DpCache<I, K, B, P>
where
    I: Clone,
    K: Clone,
    B: Backend<I, K>,
    P: DpProblem<I, K>,
{
    /// Creates a new DpCache with the given backend and problem definition.
    pub fn with_problem(backend: B, problem: P) -> Self {
        Self {
            backend: RefCell::new(backend),
            problem,
            _phantom: PhantomData,
        }
    }

    /// Retrieves the value for the given index, computing it if necessary.
    ///
    /// Dependencies are resolved recursively before `compute` runs; no
    /// borrow of the backend is held while recursing.
    pub fn get(&self, index: &I) -> K {
        if let Some(value) = self.backend.borrow().get(index) {
            return value.clone();
        }

        let deps = self.problem.deps(index);
        let dep_values: Vec<K> = deps.into_iter().map(|dep| self.get(&dep)).collect();

        self.backend
            .borrow_mut()
            .get_or_insert(index.clone(), || self.problem.compute(index, dep_values))
            .clone()
    }

    /// Consumes the cache, returning its backend.
    pub fn into_backend(self) -> B {
        self.backend.into_inner()
    }
}

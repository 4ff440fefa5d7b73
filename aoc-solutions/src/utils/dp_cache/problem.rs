//! Trait-based DP problem definition.

/// Dependency structure and computation of a DP problem.
///
/// # Type Parameters
///
/// - `I`: Index type for the DP cache
/// - `K`: Value type stored in the cache
pub trait DpProblem<I, K> {
    /// Returns the indices that this index depends on.
    ///
    /// For base cases, return an empty vector.
    fn deps(&self, index: &I) -> Vec<I>;

    /// Computes the value for the given index using resolved dependency values.
    ///
    /// `deps` holds the values for the indices returned by `deps()`, in the
    /// same order.
    fn compute(&self, index: &I, deps: Vec<K>) -> K;
}

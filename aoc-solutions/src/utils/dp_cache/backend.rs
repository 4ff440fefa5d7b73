//! Storage backends for the DP cache.

use std::collections::HashMap;
use std::hash::Hash;

/// A storage backend for the DP cache.
///
/// # Contract
///
/// - `get` returns `None` until a value was inserted for the index
/// - `get_or_insert` never overwrites: an existing value is returned and
///   `compute` is not called
pub trait Backend<I, K> {
    /// Returns the cached value for `index`, if any.
    fn get(&self, index: &I) -> Option<&K>;

    /// Returns the cached value for `index`, computing and storing it first
    /// if it is missing.
    fn get_or_insert<F>(&mut self, index: I, compute: F) -> &K
    where
        F: FnOnce() -> K;
}

/// A HashMap-based backend for arbitrary hashable indices.
///
/// Suitable for sparse or composite index types such as `(node, target)`.
#[derive(Debug)]
pub struct HashMapBackend<I, K> {
    data: HashMap<I, K>,
}

impl<I, K> HashMapBackend<I, K> {
    /// Creates a new empty HashMapBackend.
    pub fn new() -> Self {
        Self {
            data: HashMap::new(),
        }
    }

    /// Number of cached values.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether nothing has been cached yet.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

impl<I, K> Default for HashMapBackend<I, K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<I: Hash + Eq, K> Backend<I, K> for HashMapBackend<I, K> {
    fn get(&self, index: &I) -> Option<&K> {
        self.data.get(index)
    }

    fn get_or_insert<F>(&mut self, index: I, compute: F) -> &K
    where
        F: FnOnce() -> K,
    {
        self.data.entry(index).or_insert_with(compute)
    }
}

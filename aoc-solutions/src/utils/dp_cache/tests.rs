//! Tests for the DP cache module.

use std::cell::Cell;
use std::rc::Rc;

use super::*;

/// Simple problem with no dependencies for testing
struct NoDeps;

impl DpProblem<usize, i32> for NoDeps {
    fn deps(&self, _n: &usize) -> Vec<usize> {
        vec![]
    }

    fn compute(&self, n: &usize, _deps: Vec<i32>) -> i32 {
        (*n as i32) * 2
    }
}

struct Fibonacci;

impl DpProblem<usize, u64> for Fibonacci {
    fn deps(&self, n: &usize) -> Vec<usize> {
        if *n <= 1 { vec![] } else { vec![n - 1, n - 2] }
    }

    fn compute(&self, n: &usize, deps: Vec<u64>) -> u64 {
        if *n <= 1 { *n as u64 } else { deps[0] + deps[1] }
    }
}

#[test]
fn test_single_value_without_dependencies() {
    let cache = DpCache::with_problem(HashMapBackend::new(), NoDeps);

    assert_eq!(cache.get(&5), 10);
    assert_eq!(cache.get(&0), 0);
    assert_eq!(cache.get(&100), 200);
}

#[test]
fn test_fibonacci_linear_dependency_chain() {
    let cache = DpCache::with_problem(HashMapBackend::new(), Fibonacci);

    assert_eq!(cache.get(&0), 0);
    assert_eq!(cache.get(&1), 1);
    assert_eq!(cache.get(&10), 55);
    assert_eq!(cache.get(&90), 2_880_067_194_370_816_120);

    // every index from 0 to 90 cached exactly once
    assert_eq!(cache.into_backend().len(), 91);
}

#[test]
fn test_diamond_dependency_memoization() {
    // A(0) depends on B(1) and C(2), both depend on D(3)
    struct Diamond {
        count: Rc<Cell<i32>>,
    }

    impl DpProblem<usize, i32> for Diamond {
        fn deps(&self, n: &usize) -> Vec<usize> {
            match *n {
                0 => vec![1, 2],
                1 | 2 => vec![3],
                _ => vec![],
            }
        }

        fn compute(&self, n: &usize, deps: Vec<i32>) -> i32 {
            self.count.set(self.count.get() + 1);
            match *n {
                0 => deps[0] + deps[1],
                1 => deps[0] * 2,
                2 => deps[0] * 3,
                _ => 10,
            }
        }
    }

    let compute_count = Rc::new(Cell::new(0));
    let cache = DpCache::with_problem(
        HashMapBackend::new(),
        Diamond {
            count: compute_count.clone(),
        },
    );

    // D=10, B=20, C=30, A=50
    assert_eq!(cache.get(&0), 50);
    assert_eq!(compute_count.get(), 4);

    let _ = cache.get(&0);
    assert_eq!(compute_count.get(), 4);
}

#[test]
fn test_composite_keys() {
    // Paths in a tiny DAG keyed by (node, target)
    struct Reach<'a> {
        edges: &'a [&'a [usize]],
    }

    impl DpProblem<(usize, usize), u64> for Reach<'_> {
        fn deps(&self, &(node, target): &(usize, usize)) -> Vec<(usize, usize)> {
            if node == target {
                return vec![];
            }
            self.edges[node].iter().map(|&next| (next, target)).collect()
        }

        fn compute(&self, &(node, target): &(usize, usize), deps: Vec<u64>) -> u64 {
            if node == target { 1 } else { deps.iter().sum() }
        }
    }

    let edges: &[&[usize]] = &[&[1, 2], &[3], &[3], &[]];
    let cache = DpCache::with_problem(HashMapBackend::new(), Reach { edges });

    assert_eq!(cache.get(&(0, 3)), 2);
    assert_eq!(cache.get(&(1, 3)), 1);
    assert_eq!(cache.get(&(3, 0)), 0);
}

#[test]
fn test_hashmap_backend_get_or_insert() {
    let mut backend: HashMapBackend<String, i32> = HashMapBackend::new();
    assert!(backend.is_empty());

    assert_eq!(*backend.get_or_insert("key1".to_string(), || 42), 42);
    // existing value wins, closure not used
    assert_eq!(*backend.get_or_insert("key1".to_string(), || 999), 42);

    assert_eq!(backend.get(&"key1".to_string()), Some(&42));
    assert_eq!(backend.get(&"key2".to_string()), None);

    assert_eq!(*backend.get_or_insert("key2".to_string(), || 100), 100);
    assert_eq!(backend.get(&"key1".to_string()), Some(&42));
    assert_eq!(backend.len(), 2);
}

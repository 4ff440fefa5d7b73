//! Shared helpers for solutions

pub mod dp_cache;

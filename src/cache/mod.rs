//! Caching utilities for loaded search indexes.
//!
//! This module provides a generic time-based cache with TTL support.

pub mod timed_cache;

pub use timed_cache::TimedCache;

//! Cache backend implementations.
//!
//! This module provides concrete implementations of the cache trait
//! defined in `cachemgmt_core::cache`. The cache is process-local: with
//! several service instances behind a load balancer, each instance holds
//! and invalidates its own copy.

pub mod memory;

pub use memory::MemoryCache;

//! Functional core for the cachemgmt service.
//!
//! Pure domain types, validation, cache key naming, invalidation planning and
//! the trait seams (`Cache`, repositories, event handlers) that the service
//! crate implements. Nothing in here performs I/O.

pub mod cache;
pub mod directory;
pub mod events;
pub mod storage;

//! santia-storage
//!
//! The document store. A thin S3 wrapper that keeps one JSON object per
//! document, plus an in-memory store for tests and local runs.

pub mod client;
pub mod error;
pub mod memory;
pub mod objects;
pub mod store;

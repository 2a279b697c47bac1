//! santia-core
//!
//! Pure domain types, input validation, and collection naming for the
//! Santia intake service. No AWS SDK dependency: this is the shared
//! vocabulary of the backend and the TypeScript bindings of the frontend.

pub mod collections;
pub mod email;
pub mod error;
pub mod models;
pub mod timestamp;

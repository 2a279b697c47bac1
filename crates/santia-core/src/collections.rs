//! Collection names and object key conventions.
//!
//! Pure string functions, no AWS SDK dependency. These define the
//! canonical layout of documents in the Santia bucket.

pub const STATUS_CHECKS: &str = "status_checks";

pub const INTAKES: &str = "intakes";

/// Upper bound on documents returned by a single list operation.
pub const LIST_LIMIT: usize = 1000;

pub fn prefix(collection: &str) -> String {
    format!("{collection}/")
}

pub fn document(collection: &str, internal_id: &str) -> String {
    format!("{collection}/{internal_id}.json")
}

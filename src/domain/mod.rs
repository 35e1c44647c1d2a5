//! Domain layer: rows, documents and the row/header length policy.

pub mod error;
pub mod model;
pub mod traits;

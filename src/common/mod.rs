//! Shared error handling and failure reporting.

pub mod error;
pub mod reporter;
pub mod result;

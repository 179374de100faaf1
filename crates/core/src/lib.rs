//! Shared domain types, errors, and conversation access rules.

pub mod access;
pub mod error;
pub mod status;
pub mod types;

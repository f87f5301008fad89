//! Core types shared across cuemap facilities
//!
//! This crate provides foundational types used by both error handling
//! and logging facilities:
//!
//! - **Correlation types**: RunId for tagging every log line of one reconciliation run
//! - **Schema constants**: Canonical field keys and event names

pub mod correlation;
pub mod schema;

pub use correlation::RunId;

//! Loyalty-points scoring service for purchase receipts.
//!
//! Receipts are validated, scored by a fixed rule set, and the resulting points are kept in
//! an in-memory store under a randomly generated identifier.

pub mod config;
pub mod error;
pub mod receipts;
pub mod telemetry;

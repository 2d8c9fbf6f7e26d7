//! Receipt intake, validation, scoring, and lookup.

pub mod domain;
pub mod points;
pub mod router;
pub mod service;
pub mod store;
pub mod validation;

#[cfg(test)]
mod tests;

pub use domain::{Item, PointsView, ProcessedReceipt, Receipt, ReceiptId};
pub use points::{calculate_points, PointsBreakdown, PointsEngine, PointsRule, RuleContribution};
pub use router::receipt_router;
pub use service::{ReceiptService, ReceiptServiceError};
pub use store::{
    EntropyError, IdGenerator, InMemoryReceiptStore, OsRandomIds, ReceiptStore, StoreError,
};
pub use validation::{validate_receipt, ValidationError};

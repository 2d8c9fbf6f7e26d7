use std::sync::Arc;

use super::domain::{Receipt, ReceiptId};
use super::points::{PointsBreakdown, PointsEngine};
use super::store::{ReceiptStore, StoreError};
use super::validation::{validate_receipt, ValidationError};

/// Service composing the validator, points engine, and store.
pub struct ReceiptService<S> {
    store: Arc<S>,
    engine: PointsEngine,
}

impl<S> ReceiptService<S>
where
    S: ReceiptStore + 'static,
{
    pub fn new(store: Arc<S>) -> Self {
        Self {
            store,
            engine: PointsEngine::new(),
        }
    }

    /// Validate and score a receipt without storing anything.
    pub fn score(&self, receipt: &Receipt) -> Result<PointsBreakdown, ReceiptServiceError> {
        validate_receipt(receipt)?;
        Ok(self.engine.score(receipt))
    }

    /// Validate, score, and store a receipt, returning its new identifier.
    pub fn process(&self, receipt: &Receipt) -> Result<ReceiptId, ReceiptServiceError> {
        let breakdown = self.score(receipt)?;
        tracing::debug!(components = ?breakdown.components, "receipt scored");

        let id = self.store.put(breakdown.total)?;
        tracing::info!(%id, points = breakdown.total, "processed receipt");
        Ok(id)
    }

    /// Points previously stored under `id`.
    pub fn points(&self, id: &ReceiptId) -> Result<u64, ReceiptServiceError> {
        self.store
            .get(id)?
            .ok_or_else(|| ReceiptServiceError::NotFound(id.clone()))
    }
}

/// Error raised by the receipt service.
#[derive(Debug, thiserror::Error)]
pub enum ReceiptServiceError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("Receipt not found")]
    NotFound(ReceiptId),
    #[error(transparent)]
    Store(#[from] StoreError),
}

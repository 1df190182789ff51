//! # Inventory Operations

use tracing::{debug, info};

use crate::dto::DeductionRequest;
use crate::error::ApiError;
use crate::PosService;
use bakery_core::Deduction;

impl PosService {
    /// Applies a batch of stock deductions, all-or-nothing.
    ///
    /// The whole batch succeeds or the whole batch rolls back; on failure
    /// the error names the first entry that could not be satisfied and no
    /// stock has changed. Callers pass one entry per line they are
    /// fulfilling; the same item may appear more than once.
    pub async fn deduct_stock(&self, batch: Vec<DeductionRequest>) -> Result<(), ApiError> {
        debug!(entries = batch.len(), "deduct_stock");

        if batch.is_empty() {
            return Err(ApiError::validation("Deduction batch is empty"));
        }

        let deductions: Vec<Deduction> = batch
            .iter()
            .map(|d| Deduction {
                item_id: d.item_id,
                quantity: d.quantity,
            })
            .collect();

        self.db().items().apply_deductions(&deductions).await?;

        info!(entries = deductions.len(), "Stock deducted");
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

//! Application-facing ledger facade.
//!
//! Composes the pure ledger folds with an injected movement store. All state
//! flows through the store handle; there is no module-level collection and
//! no cached balance anywhere.

use stockbook_core::ArticleId;
use stockbook_ledger::{current_balance, stock_report, Movement, MovementDraft, StockReportRow};

use crate::movement_store::{MovementFilter, MovementStore, MovementStoreError};

/// Stock ledger service over an injected store.
///
/// Balances and reports are recomputed from the full movement history on
/// every call (linear in the number of matching movements) and reflect a
/// snapshot of the log, not a live value.
#[derive(Debug)]
pub struct StockLedger<S> {
    store: S,
}

impl<S> StockLedger<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn into_inner(self) -> S {
        self.store
    }
}

impl<S> StockLedger<S>
where
    S: MovementStore,
{
    /// Append one movement to the log.
    pub fn record(&self, draft: MovementDraft) -> Result<Movement, MovementStoreError> {
        let movement = self.store.append(draft)?;
        tracing::info!(
            movement_id = %movement.id,
            article_id = %movement.article_id,
            kind = %movement.kind,
            quantity = movement.quantity,
            "stock movement recorded"
        );
        Ok(movement)
    }

    /// Movements matching `filter`, in insertion order.
    pub fn movements(&self, filter: &MovementFilter) -> Result<Vec<Movement>, MovementStoreError> {
        self.store.query(filter)
    }

    /// Current stock of one article, derived by replaying its full history.
    pub fn current_stock(&self, article_id: ArticleId) -> Result<i64, MovementStoreError> {
        let history = self.store.query(&MovementFilter::for_article(article_id))?;
        Ok(current_balance(&history))
    }

    /// One article's movements, newest first. Records sharing a timestamp
    /// keep their insertion order (stable sort).
    pub fn article_history(
        &self,
        article_id: ArticleId,
    ) -> Result<Vec<Movement>, MovementStoreError> {
        let mut history = self.store.query(&MovementFilter::for_article(article_id))?;
        history.sort_by(|a, b| b.recorded_at.cmp(&a.recorded_at));
        Ok(history)
    }

    /// Per-article aggregation over the filtered movement set.
    pub fn stock_report(
        &self,
        filter: &MovementFilter,
    ) -> Result<Vec<StockReportRow>, MovementStoreError> {
        let movements = self.store.query(filter)?;
        Ok(stock_report(&movements))
    }
}

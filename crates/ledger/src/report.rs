//! Per-article aggregation over a filtered movement set.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use stockbook_core::ArticleId;

use crate::movement::{Movement, MovementKind};

/// One report row: flow totals and balances for a single article.
///
/// Rows are built fresh per report request and never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockReportRow {
    pub article_id: ArticleId,
    /// Sum of `entree` quantities in the aggregated set.
    pub entries: i64,
    /// Sum of `sortie` quantities.
    pub exits: i64,
    /// Sum of `ajustement` quantities.
    pub adjustments: i64,
    /// Always 0: the aggregation carries no balance from before the
    /// aggregated window, so windowed closing balances are relative to the
    /// window rather than absolute stock levels.
    pub opening_balance: i64,
    pub closing_balance: i64,
}

impl StockReportRow {
    fn empty(article_id: ArticleId) -> Self {
        Self {
            article_id,
            entries: 0,
            exits: 0,
            adjustments: 0,
            opening_balance: 0,
            closing_balance: 0,
        }
    }
}

/// Aggregate movements into per-article rows.
///
/// Groups by `article_id`; the first movement seen for an article decides
/// its row's position in the output. `inventaire` movements establish group
/// membership but are reconciliation markers, so they contribute to no flow
/// column. Articles absent from the input produce no row.
pub fn stock_report<'a, I>(movements: I) -> Vec<StockReportRow>
where
    I: IntoIterator<Item = &'a Movement>,
{
    let mut rows: Vec<StockReportRow> = Vec::new();
    let mut index: HashMap<ArticleId, usize> = HashMap::new();

    for movement in movements {
        let slot = *index.entry(movement.article_id).or_insert_with(|| {
            rows.push(StockReportRow::empty(movement.article_id));
            rows.len() - 1
        });
        let row = &mut rows[slot];

        match movement.kind {
            MovementKind::Entry => row.entries += movement.quantity,
            MovementKind::Exit => row.exits += movement.quantity,
            MovementKind::Adjustment => row.adjustments += movement.quantity,
            MovementKind::Inventory => {}
        }
    }

    for row in &mut rows {
        row.closing_balance = row.opening_balance + row.entries - row.exits + row.adjustments;
    }

    rows
}

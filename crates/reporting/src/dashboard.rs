//! Dashboard headline figures.

use serde::{Deserialize, Serialize};

use stockbook_catalog::Article;
use stockbook_core::ArticleId;

/// Aggregate statistics over the whole catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardSummary {
    /// Number of distinct catalog entries.
    pub article_count: usize,
    /// Sum of derived balances across all articles.
    pub total_units: i64,
    /// Articles whose derived balance is at or under their alert threshold.
    pub low_stock_count: usize,
    /// Sum of balance × sale price over priced articles, in the smallest
    /// currency unit. Unpriced articles contribute nothing.
    pub stock_value: i128,
}

/// Compute dashboard figures for a catalog snapshot.
///
/// `stock_of` supplies the derived balance per article; callers back it with
/// the movement ledger. Balances may be negative (overdraw), in which case
/// they lower `total_units` and `stock_value` accordingly.
pub fn dashboard_summary<F>(articles: &[Article], stock_of: F) -> DashboardSummary
where
    F: Fn(ArticleId) -> i64,
{
    let mut summary = DashboardSummary {
        article_count: articles.len(),
        total_units: 0,
        low_stock_count: 0,
        stock_value: 0,
    };

    for article in articles {
        let stock = stock_of(article.id_typed());
        summary.total_units += stock;
        if article.is_below_threshold(stock) {
            summary.low_stock_count += 1;
        }
        if let Some(price) = article.pricing().sale_price {
            summary.stock_value += i128::from(stock) * i128::from(price);
        }
    }

    summary
}

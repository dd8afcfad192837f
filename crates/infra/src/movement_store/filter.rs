//! Movement query filter.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use stockbook_core::{ArticleId, SupplierId, UserId};
use stockbook_ledger::{Movement, MovementKind};

/// Filter criteria for movement queries.
///
/// Set fields combine with an implicit AND; unset fields are ignored (an
/// empty filter matches everything, it never means "match nothing"). The
/// time bounds select `recorded_after <= recorded_at < recorded_before`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovementFilter {
    pub article_id: Option<ArticleId>,
    pub kind: Option<MovementKind>,
    pub actor_id: Option<UserId>,
    pub supplier_id: Option<SupplierId>,
    pub reference: Option<String>,
    pub recorded_after: Option<DateTime<Utc>>,
    pub recorded_before: Option<DateTime<Utc>>,
}

impl MovementFilter {
    /// Filter matching every movement.
    pub fn all() -> Self {
        Self::default()
    }

    /// Filter matching one article's history.
    pub fn for_article(article_id: ArticleId) -> Self {
        Self {
            article_id: Some(article_id),
            ..Self::default()
        }
    }

    /// The single predicate every store implementation applies.
    pub fn matches(&self, movement: &Movement) -> bool {
        if let Some(article_id) = self.article_id {
            if movement.article_id != article_id {
                return false;
            }
        }
        if let Some(kind) = self.kind {
            if movement.kind != kind {
                return false;
            }
        }
        if let Some(actor_id) = self.actor_id {
            if movement.actor_id != actor_id {
                return false;
            }
        }
        if let Some(supplier_id) = self.supplier_id {
            if movement.supplier_id != Some(supplier_id) {
                return false;
            }
        }
        if let Some(reference) = &self.reference {
            if movement.reference.as_deref() != Some(reference.as_str()) {
                return false;
            }
        }
        if let Some(after) = self.recorded_after {
            if movement.recorded_at < after {
                return false;
            }
        }
        if let Some(before) = self.recorded_before {
            if movement.recorded_at >= before {
                return false;
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use stockbook_core::MovementId;
    use stockbook_ledger::MovementDraft;

    fn movement(article_id: ArticleId, kind: MovementKind) -> Movement {
        MovementDraft::new(article_id, kind, 1, UserId::new())
            .assign(MovementId::new(), Utc::now())
    }

    #[test]
    fn empty_filter_matches_everything() {
        let m = movement(ArticleId::new(), MovementKind::Entry);
        assert!(MovementFilter::all().matches(&m));
    }

    #[test]
    fn set_fields_combine_with_and() {
        let article_id = ArticleId::new();
        let m = movement(article_id, MovementKind::Entry);

        let mut filter = MovementFilter::for_article(article_id);
        assert!(filter.matches(&m));

        filter.kind = Some(MovementKind::Exit);
        assert!(!filter.matches(&m));
    }

    #[test]
    fn supplier_filter_skips_movements_without_supplier() {
        let m = movement(ArticleId::new(), MovementKind::Entry);
        let filter = MovementFilter {
            supplier_id: Some(SupplierId::new()),
            ..MovementFilter::default()
        };
        assert!(!filter.matches(&m));
    }

    #[test]
    fn time_bounds_are_half_open() {
        let m = movement(ArticleId::new(), MovementKind::Entry);

        let at_lower = MovementFilter {
            recorded_after: Some(m.recorded_at),
            ..MovementFilter::default()
        };
        assert!(at_lower.matches(&m));

        let at_upper = MovementFilter {
            recorded_before: Some(m.recorded_at),
            ..MovementFilter::default()
        };
        assert!(!at_upper.matches(&m));

        let window = MovementFilter {
            recorded_after: Some(m.recorded_at - Duration::hours(1)),
            recorded_before: Some(m.recorded_at + Duration::hours(1)),
            ..MovementFilter::default()
        };
        assert!(window.matches(&m));
    }
}

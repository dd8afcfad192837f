use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use stockbook_core::{ArticleId, DomainError, DomainResult, Entity, SupplierId};

/// Stock level at or below which an article is flagged, when the draft does
/// not set one explicitly.
pub const DEFAULT_ALERT_THRESHOLD: i64 = 5;

/// Purchase/sale pricing metadata, in the smallest currency unit.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricingInfo {
    pub purchase_price: Option<u64>,
    pub sale_price: Option<u64>,
    /// ISO currency code (e.g. "EUR", "USD").
    pub currency: Option<String>,
}

/// Catalog entry: the metadata side of a stock item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Article {
    id: ArticleId,
    /// Short human-facing reference (SKU-like).
    reference: String,
    name: String,
    description: Option<String>,
    category: Option<String>,
    pricing: PricingInfo,
    /// Stock level at or below which the article is considered low.
    alert_threshold: i64,
    supplier_id: Option<SupplierId>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Input for creating an article.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArticleDraft {
    pub reference: String,
    pub name: String,
    pub description: Option<String>,
    pub category: Option<String>,
    pub pricing: PricingInfo,
    pub alert_threshold: Option<i64>,
    pub supplier_id: Option<SupplierId>,
}

/// Partial update; `None` fields keep their current value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArticleUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub pricing: Option<PricingInfo>,
    pub alert_threshold: Option<i64>,
    pub supplier_id: Option<Option<SupplierId>>,
}

impl Article {
    /// Validate a draft and create the article.
    pub fn create(id: ArticleId, draft: ArticleDraft, now: DateTime<Utc>) -> DomainResult<Self> {
        if draft.reference.trim().is_empty() {
            return Err(DomainError::validation("reference cannot be empty"));
        }
        if draft.name.trim().is_empty() {
            return Err(DomainError::validation("name cannot be empty"));
        }
        let alert_threshold = draft.alert_threshold.unwrap_or(DEFAULT_ALERT_THRESHOLD);
        if alert_threshold < 0 {
            return Err(DomainError::validation("alert threshold cannot be negative"));
        }

        Ok(Self {
            id,
            reference: draft.reference,
            name: draft.name,
            description: draft.description,
            category: draft.category,
            pricing: draft.pricing,
            alert_threshold,
            supplier_id: draft.supplier_id,
            created_at: now,
            updated_at: now,
        })
    }

    /// Apply a partial update; bumps `updated_at`.
    pub fn update(&mut self, update: ArticleUpdate, now: DateTime<Utc>) -> DomainResult<()> {
        if let Some(name) = &update.name {
            if name.trim().is_empty() {
                return Err(DomainError::validation("name cannot be empty"));
            }
        }
        if let Some(threshold) = update.alert_threshold {
            if threshold < 0 {
                return Err(DomainError::validation("alert threshold cannot be negative"));
            }
        }

        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(description) = update.description {
            self.description = Some(description);
        }
        if let Some(category) = update.category {
            self.category = Some(category);
        }
        if let Some(pricing) = update.pricing {
            self.pricing = pricing;
        }
        if let Some(threshold) = update.alert_threshold {
            self.alert_threshold = threshold;
        }
        if let Some(supplier_id) = update.supplier_id {
            self.supplier_id = supplier_id;
        }
        self.updated_at = now;
        Ok(())
    }

    pub fn id_typed(&self) -> ArticleId {
        self.id
    }

    pub fn reference(&self) -> &str {
        &self.reference
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    pub fn pricing(&self) -> &PricingInfo {
        &self.pricing
    }

    pub fn alert_threshold(&self) -> i64 {
        self.alert_threshold
    }

    pub fn supplier_id(&self) -> Option<SupplierId> {
        self.supplier_id
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Whether a derived stock level should raise a low-stock alert.
    pub fn is_below_threshold(&self, stock: i64) -> bool {
        stock <= self.alert_threshold
    }
}

impl Entity for Article {
    type Id = ArticleId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_draft() -> ArticleDraft {
        ArticleDraft {
            reference: "REF-001".to_string(),
            name: "Croquettes 10kg".to_string(),
            ..ArticleDraft::default()
        }
    }

    #[test]
    fn create_applies_the_default_threshold() {
        let article = Article::create(ArticleId::new(), test_draft(), Utc::now()).unwrap();
        assert_eq!(article.alert_threshold(), DEFAULT_ALERT_THRESHOLD);
    }

    #[test]
    fn empty_name_is_rejected() {
        let draft = ArticleDraft {
            name: "   ".to_string(),
            ..test_draft()
        };
        let err = Article::create(ArticleId::new(), draft, Utc::now()).unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[test]
    fn empty_reference_is_rejected() {
        let draft = ArticleDraft {
            reference: String::new(),
            ..test_draft()
        };
        let err = Article::create(ArticleId::new(), draft, Utc::now()).unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[test]
    fn update_bumps_updated_at_and_keeps_unset_fields() {
        let created = Utc::now();
        let mut article = Article::create(ArticleId::new(), test_draft(), created).unwrap();

        let later = created + chrono::Duration::seconds(60);
        article
            .update(
                ArticleUpdate {
                    name: Some("Croquettes 15kg".to_string()),
                    ..ArticleUpdate::default()
                },
                later,
            )
            .unwrap();

        assert_eq!(article.name(), "Croquettes 15kg");
        assert_eq!(article.reference(), "REF-001");
        assert_eq!(article.created_at(), created);
        assert_eq!(article.updated_at(), later);
    }

    #[test]
    fn threshold_flags_low_stock_inclusively() {
        let draft = ArticleDraft {
            alert_threshold: Some(3),
            ..test_draft()
        };
        let article = Article::create(ArticleId::new(), draft, Utc::now()).unwrap();

        assert!(article.is_below_threshold(3));
        assert!(article.is_below_threshold(0));
        assert!(article.is_below_threshold(-1));
        assert!(!article.is_below_threshold(4));
    }

    #[test]
    fn supplier_link_can_be_cleared() {
        let draft = ArticleDraft {
            supplier_id: Some(SupplierId::new()),
            ..test_draft()
        };
        let mut article = Article::create(ArticleId::new(), draft, Utc::now()).unwrap();
        assert!(article.supplier_id().is_some());

        article
            .update(
                ArticleUpdate {
                    supplier_id: Some(None),
                    ..ArticleUpdate::default()
                },
                Utc::now(),
            )
            .unwrap();
        assert!(article.supplier_id().is_none());
    }
}

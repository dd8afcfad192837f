use core::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use stockbook_core::{ArticleId, DomainError, DomainResult, MovementId, SupplierId, UserId};

/// Kind of a stock movement.
///
/// The kind — never the sign of `quantity` — decides the direction of the
/// effect on the derived balance. Serialized tokens match the persisted log
/// schema (`entree`, `sortie`, `ajustement`, `inventaire`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MovementKind {
    /// Stock received; adds `quantity` to the balance.
    #[serde(rename = "entree")]
    Entry,

    /// Stock issued; subtracts `quantity` from the balance.
    #[serde(rename = "sortie")]
    Exit,

    /// Manual correction. Strictly additive: a downward correction must be
    /// recorded as an `Exit` instead.
    #[serde(rename = "ajustement")]
    Adjustment,

    /// Stock-take reconciliation entry. Additive like `Entry`; it does not
    /// reset or override the prior accumulated balance.
    #[serde(rename = "inventaire")]
    Inventory,
}

impl MovementKind {
    /// The persisted token for this kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            MovementKind::Entry => "entree",
            MovementKind::Exit => "sortie",
            MovementKind::Adjustment => "ajustement",
            MovementKind::Inventory => "inventaire",
        }
    }

    /// Signed effect of a movement of this kind on the running balance.
    pub fn signed_effect(&self, quantity: i64) -> i64 {
        match self {
            MovementKind::Entry | MovementKind::Adjustment | MovementKind::Inventory => quantity,
            MovementKind::Exit => -quantity,
        }
    }
}

impl core::fmt::Display for MovementKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MovementKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "entree" => Ok(MovementKind::Entry),
            "sortie" => Ok(MovementKind::Exit),
            "ajustement" => Ok(MovementKind::Adjustment),
            "inventaire" => Ok(MovementKind::Inventory),
            other => Err(DomainError::validation(format!(
                "unrecognized movement kind: {other:?}"
            ))),
        }
    }
}

/// A recorded stock movement (immutable once appended).
///
/// Serialized shape, one record per movement:
///
/// ```json
/// { "id": "...", "articleId": "...", "type": "entree", "quantite": 10,
///   "date": "2024-01-01T00:00:00Z", "utilisateurId": "...",
///   "reference": "PO-123", "fournisseurId": "...", "notes": "..." }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Movement {
    pub id: MovementId,

    /// Catalog reference. Opaque here: existence is not validated.
    #[serde(rename = "articleId")]
    pub article_id: ArticleId,

    #[serde(rename = "type")]
    pub kind: MovementKind,

    /// Non-negative magnitude; direction comes from `kind`.
    #[serde(rename = "quantite")]
    pub quantity: i64,

    /// Assigned by the store at append time. Non-decreasing in insertion
    /// order only; backdated records may be out of wall-clock order.
    #[serde(rename = "date")]
    pub recorded_at: DateTime<Utc>,

    #[serde(rename = "utilisateurId")]
    pub actor_id: UserId,

    /// Free-text correlation id (e.g. a purchase-order number).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,

    #[serde(rename = "fournisseurId", default, skip_serializing_if = "Option::is_none")]
    pub supplier_id: Option<SupplierId>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl Movement {
    /// Signed contribution of this movement to its article's balance.
    pub fn signed_delta(&self) -> i64 {
        self.kind.signed_effect(self.quantity)
    }
}

/// Append input: a movement that has not been stored yet.
///
/// `id` and `recorded_at` are optional; the store assigns them at append
/// time when unset. Callers may pre-assign `id` so that a retried append
/// stays idempotent, or `recorded_at` to backdate a record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovementDraft {
    pub id: Option<MovementId>,
    pub article_id: ArticleId,
    pub kind: MovementKind,
    pub quantity: i64,
    pub recorded_at: Option<DateTime<Utc>>,
    pub actor_id: UserId,
    pub reference: Option<String>,
    pub supplier_id: Option<SupplierId>,
    pub notes: Option<String>,
}

impl MovementDraft {
    pub fn new(article_id: ArticleId, kind: MovementKind, quantity: i64, actor_id: UserId) -> Self {
        Self {
            id: None,
            article_id,
            kind,
            quantity,
            recorded_at: None,
            actor_id,
            reference: None,
            supplier_id: None,
            notes: None,
        }
    }

    /// Deterministic input validation. A draft that fails here must never be
    /// partially applied.
    pub fn validate(&self) -> DomainResult<()> {
        if self.quantity < 0 {
            return Err(DomainError::validation(format!(
                "quantity cannot be negative (got {})",
                self.quantity
            )));
        }
        Ok(())
    }

    /// Finalize the draft into a stored movement, preferring caller-supplied
    /// `id`/`recorded_at` over the store-assigned fallbacks.
    pub fn assign(self, id: MovementId, recorded_at: DateTime<Utc>) -> Movement {
        Movement {
            id: self.id.unwrap_or(id),
            article_id: self.article_id,
            kind: self.kind,
            quantity: self.quantity,
            recorded_at: self.recorded_at.unwrap_or(recorded_at),
            actor_id: self.actor_id,
            reference: self.reference,
            supplier_id: self.supplier_id,
            notes: self.notes,
        }
    }
}

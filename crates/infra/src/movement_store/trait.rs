use std::sync::Arc;

use thiserror::Error;

use stockbook_core::DomainError;
use stockbook_ledger::{Movement, MovementDraft};

use super::filter::MovementFilter;

/// Movement store operation error.
///
/// Two families, surfaced to callers unmodified:
///
/// - **Validation**: the input was rejected deterministically; nothing was
///   written.
/// - **Storage** (`Unavailable`, `Corrupted`): the persistence layer itself
///   failed. A corrupted log must be distinguishable from an empty one, so
///   reads raise `Corrupted` instead of coalescing to an empty sequence.
#[derive(Debug, Error)]
pub enum MovementStoreError {
    /// Malformed movement input (negative quantity). Never partially applied.
    #[error(transparent)]
    Validation(#[from] DomainError),

    /// Underlying persistence could not be reached or written (IO failure,
    /// poisoned lock).
    #[error("storage unavailable: {0}")]
    Unavailable(String),

    /// A stored payload could not be decoded. Reads fail closed rather than
    /// masking data loss as "no movements yet".
    #[error("stored movement log is corrupted: {0}")]
    Corrupted(String),
}

/// Append-only store for the stock-movement log.
///
/// ## Append semantics
///
/// `append()`:
/// - validates the draft (a rejected draft is never partially applied)
/// - assigns `id` (UUIDv7) and `recorded_at` (now) when the draft leaves
///   them unset
/// - persists the record atomically: a failed append is never visible to a
///   subsequent `query`
/// - never overwrites or reorders prior records
/// - is idempotent for drafts with a pre-assigned `id`: re-appending an id
///   that is already in the log returns the stored record unchanged, so
///   callers can retry a failed append without duplicating it
///
/// ## Query semantics
///
/// `query()` returns every movement matched by the filter, in insertion
/// order, as a point-in-time snapshot. No match is an empty vector, never
/// an error. Queries must not mutate state.
///
/// ## Concurrency
///
/// Appends for the same article are not serialized against each other
/// beyond the store's single-write atomicity; two concurrent appends may be
/// persisted in either order, and a balance computed between them may be
/// stale by the time it is displayed.
pub trait MovementStore: Send + Sync {
    /// Append one movement to the log.
    fn append(&self, draft: MovementDraft) -> Result<Movement, MovementStoreError>;

    /// Return all movements matching `filter`, in insertion order.
    fn query(&self, filter: &MovementFilter) -> Result<Vec<Movement>, MovementStoreError>;
}

impl<S> MovementStore for Arc<S>
where
    S: MovementStore + ?Sized,
{
    fn append(&self, draft: MovementDraft) -> Result<Movement, MovementStoreError> {
        (**self).append(draft)
    }

    fn query(&self, filter: &MovementFilter) -> Result<Vec<Movement>, MovementStoreError> {
        (**self).query(filter)
    }
}

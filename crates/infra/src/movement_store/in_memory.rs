use std::sync::RwLock;

use chrono::Utc;

use stockbook_core::MovementId;
use stockbook_ledger::{Movement, MovementDraft};

use super::filter::MovementFilter;
use super::r#trait::{MovementStore, MovementStoreError};

/// In-memory append-only movement log.
///
/// Intended for tests/dev and process-local state. Not optimized for
/// performance; queries scan the whole log.
#[derive(Debug, Default)]
pub struct InMemoryMovementStore {
    log: RwLock<Vec<Movement>>,
}

impl InMemoryMovementStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl MovementStore for InMemoryMovementStore {
    fn append(&self, draft: MovementDraft) -> Result<Movement, MovementStoreError> {
        draft.validate()?;

        let mut log = self
            .log
            .write()
            .map_err(|_| MovementStoreError::Unavailable("lock poisoned".to_string()))?;

        // Idempotent retry: a pre-assigned id already in the log wins.
        if let Some(id) = draft.id {
            if let Some(existing) = log.iter().find(|m| m.id == id) {
                return Ok(existing.clone());
            }
        }

        let movement = draft.assign(MovementId::new(), Utc::now());
        log.push(movement.clone());
        Ok(movement)
    }

    fn query(&self, filter: &MovementFilter) -> Result<Vec<Movement>, MovementStoreError> {
        let log = self
            .log
            .read()
            .map_err(|_| MovementStoreError::Unavailable("lock poisoned".to_string()))?;

        Ok(log.iter().filter(|m| filter.matches(m)).cloned().collect())
    }
}

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use chrono::Utc;

use stockbook_core::MovementId;
use stockbook_ledger::{Movement, MovementDraft};

use super::filter::MovementFilter;
use super::r#trait::{MovementStore, MovementStoreError};

/// File-backed append-only movement log.
///
/// The whole log lives in one JSON array on disk. A missing file is the
/// empty log ("no data yet"); an unparsable file raises `Corrupted` so a
/// storage-read failure is never mistaken for an empty history.
///
/// Appends serialize behind a mutex and replace the file atomically (write
/// to a sibling temp file, then rename), so a failed append leaves no
/// partial write visible to subsequent queries. Queries read a
/// point-in-time snapshot of the file; a balance computed from one may be
/// stale by the time it is displayed.
#[derive(Debug)]
pub struct JsonFileMovementStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonFileMovementStore {
    /// Create a handle for the log at `path`. No IO happens until the first
    /// append or query.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<Vec<Movement>, MovementStoreError> {
        match fs::read(&self.path) {
            Ok(bytes) => serde_json::from_slice(&bytes).map_err(|e| {
                MovementStoreError::Corrupted(format!("{}: {e}", self.path.display()))
            }),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(Vec::new()),
            Err(e) => Err(MovementStoreError::Unavailable(format!(
                "{}: {e}",
                self.path.display()
            ))),
        }
    }

    fn persist(&self, log: &[Movement]) -> Result<(), MovementStoreError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| {
                    MovementStoreError::Unavailable(format!("{}: {e}", parent.display()))
                })?;
            }
        }

        let bytes = serde_json::to_vec(log)
            .map_err(|e| MovementStoreError::Unavailable(e.to_string()))?;

        // Atomic replace: the log on disk is always a complete array.
        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, bytes)
            .map_err(|e| MovementStoreError::Unavailable(format!("{}: {e}", tmp.display())))?;
        fs::rename(&tmp, &self.path).map_err(|e| {
            MovementStoreError::Unavailable(format!("{}: {e}", self.path.display()))
        })?;

        Ok(())
    }
}

impl MovementStore for JsonFileMovementStore {
    fn append(&self, draft: MovementDraft) -> Result<Movement, MovementStoreError> {
        draft.validate()?;

        let _guard = self
            .write_lock
            .lock()
            .map_err(|_| MovementStoreError::Unavailable("lock poisoned".to_string()))?;

        let mut log = self.load()?;

        // Idempotent retry: a pre-assigned id already in the log wins.
        if let Some(id) = draft.id {
            if let Some(existing) = log.iter().find(|m| m.id == id) {
                return Ok(existing.clone());
            }
        }

        let movement = draft.assign(MovementId::new(), Utc::now());
        log.push(movement.clone());
        self.persist(&log)?;

        Ok(movement)
    }

    fn query(&self, filter: &MovementFilter) -> Result<Vec<Movement>, MovementStoreError> {
        Ok(self
            .load()?
            .into_iter()
            .filter(|m| filter.matches(m))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stockbook_core::{ArticleId, UserId};
    use stockbook_ledger::MovementKind;
    use uuid::Uuid;

    fn temp_log_path() -> PathBuf {
        std::env::temp_dir().join(format!("stockbook-test-{}.json", Uuid::now_v7()))
    }

    fn draft(article_id: ArticleId, kind: MovementKind, quantity: i64) -> MovementDraft {
        MovementDraft::new(article_id, kind, quantity, UserId::new())
    }

    struct Cleanup(PathBuf);
    impl Drop for Cleanup {
        fn drop(&mut self) {
            let _ = fs::remove_file(&self.0);
        }
    }

    #[test]
    fn missing_file_is_an_empty_log() {
        let path = temp_log_path();
        let store = JsonFileMovementStore::new(&path);
        assert!(store.query(&MovementFilter::all()).unwrap().is_empty());
    }

    #[test]
    fn appends_survive_reopening_the_store() {
        let path = temp_log_path();
        let _cleanup = Cleanup(path.clone());

        let article_id = ArticleId::new();
        let stored = JsonFileMovementStore::new(&path)
            .append(draft(article_id, MovementKind::Entry, 10))
            .unwrap();

        let reopened = JsonFileMovementStore::new(&path);
        let log = reopened.query(&MovementFilter::all()).unwrap();
        assert_eq!(log, vec![stored]);
    }

    #[test]
    fn corrupted_payload_fails_closed() {
        let path = temp_log_path();
        let _cleanup = Cleanup(path.clone());
        fs::write(&path, b"{ not json ]").unwrap();

        let store = JsonFileMovementStore::new(&path);
        let err = store.query(&MovementFilter::all()).unwrap_err();
        assert!(matches!(err, MovementStoreError::Corrupted(_)));

        // Appends refuse to clobber a corrupted log as well.
        let err = store
            .append(draft(ArticleId::new(), MovementKind::Entry, 1))
            .unwrap_err();
        assert!(matches!(err, MovementStoreError::Corrupted(_)));
    }

    #[test]
    fn rejected_append_leaves_the_file_unchanged() {
        let path = temp_log_path();
        let _cleanup = Cleanup(path.clone());

        let store = JsonFileMovementStore::new(&path);
        store
            .append(draft(ArticleId::new(), MovementKind::Entry, 5))
            .unwrap();
        let before = fs::read(&path).unwrap();

        let err = store
            .append(draft(ArticleId::new(), MovementKind::Exit, -1))
            .unwrap_err();
        assert!(matches!(err, MovementStoreError::Validation(_)));
        assert_eq!(fs::read(&path).unwrap(), before);
    }

    #[test]
    fn re_appending_a_pre_assigned_id_stores_one_record() {
        let path = temp_log_path();
        let _cleanup = Cleanup(path.clone());
        let store = JsonFileMovementStore::new(&path);

        let mut retried = draft(ArticleId::new(), MovementKind::Entry, 4);
        retried.id = Some(MovementId::new());

        let first = store.append(retried.clone()).unwrap();
        let second = store.append(retried).unwrap();

        assert_eq!(first, second);
        assert_eq!(store.query(&MovementFilter::all()).unwrap().len(), 1);
    }

    #[test]
    fn persisted_records_use_the_wire_schema() {
        let path = temp_log_path();
        let _cleanup = Cleanup(path.clone());

        JsonFileMovementStore::new(&path)
            .append(draft(ArticleId::new(), MovementKind::Exit, 2))
            .unwrap();

        let raw: serde_json::Value =
            serde_json::from_slice(&fs::read(&path).unwrap()).unwrap();
        assert_eq!(raw[0]["type"], "sortie");
        assert_eq!(raw[0]["quantite"], 2);
        assert!(raw[0].get("utilisateurId").is_some());
    }
}

//! In-process record store.
//!
//! Selected with a `memory://` connection string. Documents live for the
//! lifetime of the process; ordering and schema rules match the `PostgreSQL`
//! backend.

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};
use uuid::Uuid;

use form_intake_core::{ConnectionState, RecordKind};

use super::{StoreError, schema};
use crate::models::Document;

#[derive(Debug)]
struct StoredDocument {
    created_at: DateTime<Utc>,
    document: Document,
}

/// One collection: documents in insertion order plus an id index.
#[derive(Debug, Default)]
struct Collection {
    ids: HashSet<Uuid>,
    documents: Vec<StoredDocument>,
}

#[derive(Debug, Default)]
struct Inner {
    collections: Mutex<HashMap<RecordKind, Collection>>,
    closed: AtomicBool,
}

/// In-memory document store. Clones share the same documents.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    inner: Arc<Inner>,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// `Connected` until [`MemoryStore::close`] is called.
    #[must_use]
    pub fn connection_state(&self) -> ConnectionState {
        if self.inner.closed.load(Ordering::Acquire) {
            ConnectionState::Disconnected
        } else {
            ConnectionState::Connected
        }
    }

    pub(super) fn insert(
        &self,
        kind: RecordKind,
        id: Uuid,
        created_at: DateTime<Utc>,
        document: &Document,
    ) -> Result<(), StoreError> {
        self.ensure_open()?;
        schema::validate(kind, document)?;

        let mut collections = self
            .inner
            .collections
            .lock()
            .map_err(|_| StoreError::Unknown("memory store lock poisoned".to_string()))?;
        let collection = collections.entry(kind).or_default();

        if !collection.ids.insert(id) {
            return Err(StoreError::Unknown(format!(
                "duplicate key: {kind} {id} already exists"
            )));
        }

        collection.documents.push(StoredDocument {
            created_at,
            document: document.clone(),
        });
        Ok(())
    }

    pub(super) fn list(&self, kind: RecordKind) -> Result<Vec<Document>, StoreError> {
        self.ensure_open()?;

        let collections = self
            .inner
            .collections
            .lock()
            .map_err(|_| StoreError::Unknown("memory store lock poisoned".to_string()))?;
        let Some(collection) = collections.get(&kind) else {
            return Ok(Vec::new());
        };

        // Newest first; later inserts win ties on created_at.
        let mut ordered: Vec<&StoredDocument> = collection.documents.iter().rev().collect();
        ordered.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        Ok(ordered
            .into_iter()
            .map(|stored| stored.document.clone())
            .collect())
    }

    pub(super) fn close(&self) {
        self.inner.closed.store(true, Ordering::Release);
    }

    fn ensure_open(&self) -> Result<(), StoreError> {
        if self.inner.closed.load(Ordering::Acquire) {
            return Err(StoreError::Connectivity(
                "memory store connection is closed".to_string(),
            ));
        }
        Ok(())
    }
}

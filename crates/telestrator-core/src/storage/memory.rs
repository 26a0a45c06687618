//! In-memory storage implementation.

use super::{BoxFuture, Storage, StorageError, StorageResult};
use crate::snapshot::SessionSnapshot;
use std::collections::HashMap;
use std::sync::RwLock;

/// In-memory storage for testing and ephemeral use.
#[derive(Default)]
pub struct MemoryStorage {
    sessions: RwLock<HashMap<String, SessionSnapshot>>,
}

impl MemoryStorage {
    /// Create a new empty memory storage.
    pub fn new() -> Self {
        Self::default()
    }
}

impl Storage for MemoryStorage {
    fn save(&self, id: &str, snapshot: &SessionSnapshot) -> BoxFuture<'_, StorageResult<()>> {
        let id = id.to_string();
        let snapshot = snapshot.clone();
        Box::pin(async move {
            let mut sessions = self
                .sessions
                .write()
                .map_err(|e| StorageError::Other(format!("Lock error: {}", e)))?;
            sessions.insert(id, snapshot);
            Ok(())
        })
    }

    fn load(&self, id: &str) -> BoxFuture<'_, StorageResult<SessionSnapshot>> {
        let id = id.to_string();
        Box::pin(async move {
            let sessions = self
                .sessions
                .read()
                .map_err(|e| StorageError::Other(format!("Lock error: {}", e)))?;
            sessions
                .get(&id)
                .cloned()
                .ok_or_else(|| StorageError::NotFound(id))
        })
    }

    fn delete(&self, id: &str) -> BoxFuture<'_, StorageResult<()>> {
        let id = id.to_string();
        Box::pin(async move {
            let mut sessions = self
                .sessions
                .write()
                .map_err(|e| StorageError::Other(format!("Lock error: {}", e)))?;
            sessions.remove(&id);
            Ok(())
        })
    }

    fn list(&self) -> BoxFuture<'_, StorageResult<Vec<String>>> {
        Box::pin(async move {
            let sessions = self
                .sessions
                .read()
                .map_err(|e| StorageError::Other(format!("Lock error: {}", e)))?;
            Ok(sessions.keys().cloned().collect())
        })
    }

    fn exists(&self, id: &str) -> BoxFuture<'_, StorageResult<bool>> {
        let id = id.to_string();
        Box::pin(async move {
            let sessions = self
                .sessions
                .read()
                .map_err(|e| StorageError::Other(format!("Lock error: {}", e)))?;
            Ok(sessions.contains_key(&id))
        })
    }
}

//! In-memory store for tests and throwaway servers.

use super::{validate_key, DocumentStore, StoreError};
use std::collections::BTreeMap;
use std::sync::RwLock;

#[derive(Debug, Default)]
pub struct MemoryStore {
    documents: RwLock<BTreeMap<String, Vec<u8>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl DocumentStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        validate_key(key)?;
        let g = self.documents.read().map_err(|_| StoreError::Poisoned)?;
        Ok(g.get(key).cloned())
    }

    fn put(&self, key: &str, document: &[u8]) -> Result<(), StoreError> {
        validate_key(key)?;
        let mut g = self.documents.write().map_err(|_| StoreError::Poisoned)?;
        g.insert(key.to_string(), document.to_vec());
        Ok(())
    }

    fn list_keys(&self, prefix: &str) -> Result<Vec<String>, StoreError> {
        let g = self.documents.read().map_err(|_| StoreError::Poisoned)?;
        Ok(g.keys().filter(|k| k.starts_with(prefix)).cloned().collect())
    }
}

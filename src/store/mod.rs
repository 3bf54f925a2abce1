//! Document persistence: a key to JSON-bytes store behind the `DocumentStore` trait,
//! and typed access to the tournament and player documents on top of it.

mod documents;
mod file;
mod memory;

pub use documents::Documents;
pub use file::FileStore;
pub use memory::MemoryStore;

/// Errors from the storage backend or from (de)serializing a document.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("storage I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed document: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid storage key {0:?}")]
    InvalidKey(String),
    #[error("storage lock poisoned")]
    Poisoned,
}

/// Whole-document storage. Every `put` replaces the previous document for that key.
///
/// Keys are `/`-separated paths of ASCII letters, digits, `-` and `_`.
pub trait DocumentStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError>;

    fn put(&self, key: &str, document: &[u8]) -> Result<(), StoreError>;

    /// Keys starting with `prefix`, sorted.
    fn list_keys(&self, prefix: &str) -> Result<Vec<String>, StoreError>;
}

impl<S: DocumentStore + ?Sized> DocumentStore for Box<S> {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        (**self).get(key)
    }

    fn put(&self, key: &str, document: &[u8]) -> Result<(), StoreError> {
        (**self).put(key, document)
    }

    fn list_keys(&self, prefix: &str) -> Result<Vec<String>, StoreError> {
        (**self).list_keys(prefix)
    }
}

pub(crate) fn validate_key(key: &str) -> Result<(), StoreError> {
    let valid = key.split('/').all(|segment| {
        !segment.is_empty()
            && segment
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    });
    if valid {
        Ok(())
    } else {
        Err(StoreError::InvalidKey(key.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::validate_key;

    #[test]
    fn keys_cannot_escape_the_store() {
        assert!(validate_key("players").is_ok());
        assert!(validate_key("tournaments/spring-open").is_ok());
        assert!(validate_key("tournaments/../players").is_err());
        assert!(validate_key("/abs").is_err());
        assert!(validate_key("tournaments/").is_err());
        assert!(validate_key("a.json").is_err());
    }
}

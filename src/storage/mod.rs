//! Object storage for uploaded payment screenshots.

use axum::{async_trait, body::Bytes};

pub mod local;

/// Where an object ended up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredObject {
    pub key: String,
    /// Public reference to the object (a URL path), which is what gets
    /// recorded against the registration.
    pub reference: String,
}

#[derive(thiserror::Error, Debug)]
pub enum StorageError {
    #[error("an object already exists at {0}")]
    AlreadyExists(String),
    #[error("invalid object key {0:?}")]
    InvalidKey(String),
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
    #[error("object storage unavailable: {0}")]
    Unavailable(String),
}

/// Upload one blob by key and get a reference back.
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Stores `bytes` at `key`. Never overwrites: if `key` is already taken
    /// this fails with [`StorageError::AlreadyExists`].
    async fn put(
        &self,
        key: &str,
        bytes: Bytes,
        content_type: &str,
    ) -> Result<StoredObject, StorageError>;
}

/// Keys are `/`-separated segments of ASCII letters, digits, `-`, `_` and
/// `.`; no segment may be empty, `.` or `..`.
pub fn validate_key(key: &str) -> Result<(), StorageError> {
    let ok = !key.is_empty()
        && key.split('/').all(|segment| {
            !segment.is_empty()
                && segment != "."
                && segment != ".."
                && segment.chars().all(|c| {
                    c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.')
                })
        });

    match ok {
        true => Ok(()),
        false => Err(StorageError::InvalidKey(key.to_string())),
    }
}

#[cfg(test)]
#[test]
fn test_validate_key() {
    assert!(validate_key("payments/0192-1757000000000.png").is_ok());
    assert!(validate_key("").is_err());
    assert!(validate_key("/payments/x.png").is_err());
    assert!(validate_key("payments/../x.png").is_err());
    assert!(validate_key("payments//x.png").is_err());
    assert!(validate_key("payments/x y.png").is_err());
}

//! File-backed settings store: one pretty-printed JSON document per identity.

use std::path::{Path, PathBuf};

use crewpay_core::identity::Identity;

pub mod models;
pub mod repositories;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Errors from the settings store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Store I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A document exists but cannot be parsed.
    #[error("Profile {key} is corrupt: {reason}")]
    Corrupt { key: String, reason: String },

    #[error("Profile {0} already exists")]
    AlreadyExists(String),

    /// An account write was attempted without a registered document.
    #[error("Account {0} is not registered")]
    UnknownAccount(String),
}

/// Handle on the data directory. Cheap to clone.
#[derive(Debug, Clone)]
pub struct ProfileStore {
    root: PathBuf,
}

impl ProfileStore {
    /// Open (and create if needed) the data directory.
    pub async fn open(root: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let root = root.into();
        tokio::fs::create_dir_all(&root).await?;
        tracing::debug!(root = %root.display(), "Profile store opened");
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of the document belonging to `identity`.
    pub fn document_path(&self, identity: &Identity) -> PathBuf {
        self.root.join(format!("{}.json", identity.storage_key()))
    }
}

/// Check the data directory still exists and is writable.
pub async fn health_check(store: &ProfileStore) -> Result<(), StoreError> {
    let metadata = tokio::fs::metadata(store.root()).await?;
    if !metadata.is_dir() || metadata.permissions().readonly() {
        return Err(StoreError::Io(std::io::Error::new(
            std::io::ErrorKind::PermissionDenied,
            format!("{} is not a writable directory", store.root().display()),
        )));
    }
    Ok(())
}

//! Repository for per-identity profile documents.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crewpay_core::identity::Identity;
use crewpay_core::settings::SalarySettings;
use tokio::io::AsyncWriteExt;
use uuid::Uuid;

use crate::models::ProfileDocument;
use crate::{ProfileStore, StoreError};

/// Load/save operations over profile documents.
///
/// Writes are whole-document overwrites (last write wins). There is no
/// locking: an identity is assumed to have a single, non-concurrent user.
pub struct ProfileRepo;

impl ProfileRepo {
    /// Whether a document exists for `identity`.
    pub async fn exists(store: &ProfileStore, identity: &Identity) -> Result<bool, StoreError> {
        Ok(tokio::fs::try_exists(store.document_path(identity)).await?)
    }

    /// Read the full document for `identity`.
    ///
    /// Returns `Ok(None)` when no document exists and
    /// [`StoreError::Corrupt`] when one exists but does not parse.
    pub async fn find(
        store: &ProfileStore,
        identity: &Identity,
    ) -> Result<Option<ProfileDocument>, StoreError> {
        let path = store.document_path(identity);
        let contents = match tokio::fs::read_to_string(&path).await {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        serde_json::from_str::<ProfileDocument>(&contents)
            .map(Some)
            .map_err(|e| StoreError::Corrupt {
                key: identity.storage_key(),
                reason: e.to_string(),
            })
    }

    /// Load the settings for `identity`.
    ///
    /// Never fails: unknown identities, unreadable or corrupt documents and
    /// records that do not validate all yield the default settings.
    pub async fn load(store: &ProfileStore, identity: &Identity) -> SalarySettings {
        match Self::find(store, identity).await {
            Ok(Some(document)) => match document.settings.validate() {
                Ok(()) => document.settings,
                Err(e) => {
                    tracing::warn!(%identity, error = %e, "Stored settings invalid, using defaults");
                    SalarySettings::default()
                }
            },
            Ok(None) => {
                tracing::debug!(%identity, "No stored settings, using defaults");
                SalarySettings::default()
            }
            Err(e) => {
                tracing::warn!(%identity, error = %e, "Failed to read settings, using defaults");
                SalarySettings::default()
            }
        }
    }

    /// Overwrite the settings for `identity`.
    ///
    /// An account's credential is carried over from its existing document;
    /// saving for an account that was never registered is an error. Device
    /// documents are created on demand.
    pub async fn save(
        store: &ProfileStore,
        identity: &Identity,
        settings: &SalarySettings,
    ) -> Result<(), StoreError> {
        let pin_hash = match Self::find(store, identity).await {
            Ok(Some(existing)) => existing.pin_hash,
            Ok(None) if identity.is_account() => {
                return Err(StoreError::UnknownAccount(identity.storage_key()));
            }
            Ok(None) => None,
            Err(e) if identity.is_account() => return Err(e),
            Err(e) => {
                tracing::warn!(%identity, error = %e, "Replacing unreadable device profile");
                None
            }
        };

        let document = ProfileDocument::new(identity, pin_hash, settings.clone());
        Self::write(store, identity, &document).await?;

        tracing::debug!(%identity, "Settings saved");
        Ok(())
    }

    /// Register an account with default settings.
    ///
    /// Fails with [`StoreError::AlreadyExists`] if a document is already
    /// present, even if another request created it a moment ago. The
    /// document is fully written before it becomes visible under its name.
    pub async fn create_account(
        store: &ProfileStore,
        identity: &Identity,
        pin_hash: String,
    ) -> Result<ProfileDocument, StoreError> {
        let document = ProfileDocument::new(identity, Some(pin_hash), SalarySettings::default());
        let path = store.document_path(identity);
        let tmp_path = temp_path(&path);

        write_synced(&tmp_path, &serde_json::to_vec_pretty(&document)?).await?;

        // Linking fails if the target exists, unlike rename.
        let linked = tokio::fs::hard_link(&tmp_path, &path).await;
        if let Err(e) = tokio::fs::remove_file(&tmp_path).await {
            tracing::warn!(path = %tmp_path.display(), error = %e, "Failed to remove temporary file");
        }
        match linked {
            Ok(()) => {}
            Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                return Err(StoreError::AlreadyExists(identity.storage_key()));
            }
            Err(e) => return Err(e.into()),
        }

        tracing::info!(%identity, "Account created");
        Ok(document)
    }

    /// Load a device's settings, writing a default document on first visit.
    pub async fn ensure_device(
        store: &ProfileStore,
        identity: &Identity,
    ) -> Result<SalarySettings, StoreError> {
        if Self::exists(store, identity).await? {
            return Ok(Self::load(store, identity).await);
        }

        let settings = SalarySettings::default();
        Self::save(store, identity, &settings).await?;
        tracing::info!(%identity, "Device profile created");
        Ok(settings)
    }

    // ---- private helpers ----

    /// Write via a temporary sibling and rename so readers never observe a
    /// half-written document.
    async fn write(
        store: &ProfileStore,
        identity: &Identity,
        document: &ProfileDocument,
    ) -> Result<(), StoreError> {
        let path = store.document_path(identity);
        let tmp_path = temp_path(&path);

        write_synced(&tmp_path, &serde_json::to_vec_pretty(document)?).await?;
        if let Err(e) = tokio::fs::rename(&tmp_path, &path).await {
            let _ = tokio::fs::remove_file(&tmp_path).await;
            return Err(e.into());
        }
        Ok(())
    }
}

/// Unique sibling of `path`, so concurrent writers never share a temp file.
fn temp_path(path: &Path) -> PathBuf {
    path.with_extension(format!("json.{}.tmp", Uuid::new_v4().simple()))
}

/// Create `path` and flush `bytes` to disk. A failed write removes the file.
async fn write_synced(path: &Path, bytes: &[u8]) -> Result<(), StoreError> {
    let result = async {
        let mut file = tokio::fs::File::create(path).await?;
        file.write_all(bytes).await?;
        file.sync_all().await
    }
    .await;

    if let Err(e) = result {
        let _ = tokio::fs::remove_file(path).await;
        return Err(e.into());
    }
    Ok(())
}

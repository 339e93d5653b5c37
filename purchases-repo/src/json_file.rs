//! JSON flat-file store adapter.
//!
//! The whole collection lives in a single file holding a JSON array. Every
//! append reads the array, pushes the new record and rewrites the file
//! through a sibling temporary file, so readers only ever see a complete
//! snapshot.
//!
//! There is no locking: two processes appending at the same time can lose
//! one of the writes.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::io::AsyncWriteExt;
use tracing::debug;

use purchases_types::{StoreError, Transaction, TransactionId, TransactionStore};

const EMPTY_STORE: &[u8] = b"[]";

// ─────────────────────────────────────────────────────────────────────────────
// JSON File Store
// ─────────────────────────────────────────────────────────────────────────────

/// Transaction store backed by a JSON file.
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Creates a store for the given file. Nothing is touched on disk until first use.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self.path.clone().into_os_string();
        name.push(".tmp");
        PathBuf::from(name)
    }

    fn read_error(&self, source: std::io::Error) -> StoreError {
        StoreError::Read {
            path: self.path.clone(),
            source,
        }
    }

    fn write_error(&self, source: std::io::Error) -> StoreError {
        StoreError::Write {
            path: self.path.clone(),
            source,
        }
    }

    /// Loads the full collection, creating an empty store file if there is none.
    async fn read_transactions(&self) -> Result<Vec<Transaction>, StoreError> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "store file missing, creating empty store");
                self.write_bytes(EMPTY_STORE).await?;
                return Ok(Vec::new());
            }
            Err(e) => return Err(self.read_error(e)),
        };

        let transactions: Vec<Transaction> =
            serde_json::from_slice(&bytes).map_err(|source| StoreError::Corrupt {
                path: self.path.clone(),
                source,
            })?;

        debug!(
            path = %self.path.display(),
            count = transactions.len(),
            "loaded transactions"
        );
        Ok(transactions)
    }

    /// Replaces the full collection.
    async fn write_transactions(&self, transactions: &[Transaction]) -> Result<(), StoreError> {
        let bytes =
            serde_json::to_vec(transactions).map_err(|e| self.write_error(e.into()))?;
        self.write_bytes(&bytes).await?;

        debug!(
            path = %self.path.display(),
            count = transactions.len(),
            "wrote transactions"
        );
        Ok(())
    }

    /// Writes and syncs a temporary file, then renames it over the store file.
    async fn write_bytes(&self, bytes: &[u8]) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent)
                    .await
                    .map_err(|e| self.write_error(e))?;
            }
        }

        let temp = self.temp_path();
        // The data must be on disk before the rename makes it visible.
        let written = match write_synced(&temp, bytes).await {
            Ok(()) => tokio::fs::rename(&temp, &self.path).await,
            Err(e) => Err(e),
        };

        if let Err(e) = written {
            let _ = tokio::fs::remove_file(&temp).await;
            return Err(self.write_error(e));
        }
        Ok(())
    }
}

async fn write_synced(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    let mut file = tokio::fs::File::create(path).await?;
    file.write_all(bytes).await?;
    file.sync_all().await
}

// ─────────────────────────────────────────────────────────────────────────────
// Store implementation
// ─────────────────────────────────────────────────────────────────────────────

#[async_trait]
impl TransactionStore for JsonFileStore {
    async fn reset(&self) -> Result<(), StoreError> {
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => {
                debug!(path = %self.path.display(), "store reset");
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(self.write_error(e)),
        }
    }

    async fn append(&self, transaction: &Transaction) -> Result<(), StoreError> {
        let mut transactions = self.read_transactions().await?;
        transactions.push(transaction.clone());
        self.write_transactions(&transactions).await
    }

    async fn find_by_id(&self, id: TransactionId) -> Result<Option<Transaction>, StoreError> {
        Ok(self
            .read_transactions()
            .await?
            .into_iter()
            .find(|t| t.id == id))
    }
}

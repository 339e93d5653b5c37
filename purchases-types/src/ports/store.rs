//! Transaction store port trait.
//!
//! The JSON file adapter implements this; tests plug in an in-memory one.

use crate::domain::{Transaction, TransactionId};
use crate::error::StoreError;

/// Durable container of transactions: append, look up by id, wipe.
///
/// Stored transactions are never modified or removed one by one; the only
/// mutations are appending a new record and resetting the whole store.
#[async_trait::async_trait]
pub trait TransactionStore: Send + Sync + 'static {
    /// Discards every stored transaction. A store that was never written is left as is.
    async fn reset(&self) -> Result<(), StoreError>;

    /// Adds a transaction, keeping everything stored before it.
    ///
    /// On error the previously stored collection must remain intact.
    async fn append(&self, transaction: &Transaction) -> Result<(), StoreError>;

    /// Gets a transaction by ID, `None` if no such transaction was stored.
    async fn find_by_id(&self, id: TransactionId) -> Result<Option<Transaction>, StoreError>;
}

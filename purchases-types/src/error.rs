//! Error types for the purchase ledger.

use std::path::PathBuf;

use rust_decimal::Decimal;

use crate::domain::TransactionId;
use crate::ports::ExchangeError;

/// Store-level errors (the backing file could not be read or written).
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Can not read transactions from {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Can not write transactions to {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Transaction store {} is corrupt: {source}", .path.display())]
    Corrupt {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// Application-level errors returned by the purchase service.
///
/// `Persistence` and `RateLookup` are infrastructure failures; every other
/// variant is an expected outcome of the caller's input.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Can not find the purchase with id {0}.")]
    TransactionNotFound(TransactionId),

    #[error("The purchase cannot be converted to the target currency.")]
    ConversionUnavailable { currency: String },

    #[error("The amount {0} is too large to be stored with two decimal places.")]
    AmountOutOfRange(Decimal),

    #[error("The purchase with id {id} is too large to be converted to {currency}.")]
    ConversionOutOfRange { id: TransactionId, currency: String },

    #[error(transparent)]
    Persistence(#[from] StoreError),

    #[error(transparent)]
    RateLookup(#[from] ExchangeError),
}

impl AppError {
    /// True for outcomes the user caused or can act on, as opposed to I/O failures.
    pub fn is_domain(&self) -> bool {
        matches!(
            self,
            AppError::TransactionNotFound(_)
                | AppError::ConversionUnavailable { .. }
                | AppError::AmountOutOfRange(_)
                | AppError::ConversionOutOfRange { .. }
        )
    }
}

//! Transaction domain model.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a Transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TransactionId(Uuid);

impl TransactionId {
    /// Creates a new random TransactionId.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for TransactionId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for TransactionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for TransactionId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

/// A recorded purchase.
///
/// Transactions are immutable once stored. The amount always carries two
/// fractional digits and is written to JSON as a number with those digits
/// intact (`15.80`, not `15.8`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    /// Unique identifier
    pub id: TransactionId,
    /// Purchase amount in the reference currency
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub amount: Decimal,
    /// Calendar date of the purchase
    pub date: NaiveDate,
    /// Free-text description, at most 50 characters
    pub description: String,
}

/// A stored transaction joined with the exchange rate used to convert it.
///
/// Never persisted; built fresh on every retrieval.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConvertedTransaction {
    pub id: TransactionId,
    pub date: NaiveDate,
    pub description: String,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub amount: Decimal,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub exchange_rate: Decimal,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub converted_amount: Decimal,
}

impl ConvertedTransaction {
    /// Combines a stored transaction with the rate and the already rounded result.
    pub fn new(transaction: Transaction, exchange_rate: Decimal, converted_amount: Decimal) -> Self {
        Self {
            id: transaction.id,
            date: transaction.date,
            description: transaction.description,
            amount: transaction.amount,
            exchange_rate,
            converted_amount,
        }
    }
}

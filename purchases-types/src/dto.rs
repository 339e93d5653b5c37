//! Request objects handed to the application service by inbound adapters.
//!
//! Values arrive already parsed and typed; validation of raw input is the
//! inbound adapter's job.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::TransactionId;

/// Request to record a new purchase.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreTransactionRequest {
    /// Purchase amount; rounded to cents on store
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub amount: Decimal,
    /// Purchase date
    pub date: NaiveDate,
    /// Free-text description; truncated to 50 characters on store
    pub description: String,
}

/// Request to read a purchase back converted to another currency.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetrieveTransactionRequest {
    pub id: TransactionId,
    /// Currency name as the exchange-rate source knows it (e.g. `Canada-Dollar`)
    pub currency: String,
}

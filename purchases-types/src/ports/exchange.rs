//! Exchange rate provider port.
//!
//! This trait defines the interface for exchange rate services.
//! Implementations can be HTTP clients, static tables, mocks, etc.

use chrono::{Months, NaiveDate};
use rust_decimal::Decimal;

/// Boxed cause kept on lookup failures for diagnostics.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// How far back before the purchase date a quotation may be.
pub const LOOKBACK_MONTHS: u32 = 6;

/// Error type for exchange rate operations.
///
/// "No rate in the window" is not an error; providers report it as `Ok(None)`.
#[derive(Debug, thiserror::Error)]
pub enum ExchangeError {
    #[error("Failed to fetch exchange rate: {0}")]
    Transport(#[source] BoxError),

    #[error("Exchange rate service responded with status {status}")]
    Status { status: u16 },

    #[error("Failed to parse exchange rate response: {0}")]
    InvalidResponse(#[source] BoxError),
}

/// Port trait for exchange rate providers.
#[async_trait::async_trait]
pub trait ExchangeRateProvider: Send + Sync {
    /// Get the rate for `currency` in effect on `date`.
    ///
    /// Returns how many units of `currency` equal one unit of the reference
    /// currency, taken from the most recent quotation inside
    /// [`lookback_window`]`(date)`, or `None` when the window holds no quotation.
    async fn get_rate(
        &self,
        currency: &str,
        date: NaiveDate,
    ) -> Result<Option<Decimal>, ExchangeError>;
}

/// Inclusive range of record dates a quotation for `date` may come from.
///
/// Month subtraction clamps to the end of shorter months, so `2023-08-31`
/// looks back to `2023-02-28`.
pub fn lookback_window(date: NaiveDate) -> (NaiveDate, NaiveDate) {
    let start = date
        .checked_sub_months(Months::new(LOOKBACK_MONTHS))
        .unwrap_or(NaiveDate::MIN);
    (start, date)
}

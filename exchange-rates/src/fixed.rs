//! In-memory table of quotations.
//!
//! Applies the same selection as the Treasury query: same currency, record
//! date inside the lookback window, newest record wins.

use async_trait::async_trait;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use purchases_types::{ExchangeError, ExchangeRateProvider, lookback_window};

/// A single published rate, named after the Treasury dataset fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quotation {
    pub country_currency_desc: String,
    pub record_date: NaiveDate,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub exchange_rate: Decimal,
}

/// Exchange rate provider answering from a fixed set of quotations.
#[derive(Debug, Clone, Default)]
pub struct StaticRates {
    quotations: Vec<Quotation>,
}

impl StaticRates {
    pub fn new(quotations: Vec<Quotation>) -> Self {
        Self { quotations }
    }

    /// Adds one quotation.
    pub fn with_quotation(
        mut self,
        currency: impl Into<String>,
        record_date: NaiveDate,
        exchange_rate: Decimal,
    ) -> Self {
        self.quotations.push(Quotation {
            country_currency_desc: currency.into(),
            record_date,
            exchange_rate,
        });
        self
    }

    /// Parses a JSON array of quotations.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        Ok(Self::new(serde_json::from_str(json)?))
    }

    pub fn quotations(&self) -> &[Quotation] {
        &self.quotations
    }

    fn lookup(&self, currency: &str, date: NaiveDate) -> Option<Decimal> {
        let (start, end) = lookback_window(date);
        self.quotations
            .iter()
            .filter(|q| q.country_currency_desc == currency)
            .filter(|q| q.record_date >= start && q.record_date <= end)
            .max_by_key(|q| q.record_date)
            .map(|q| q.exchange_rate)
    }
}

#[async_trait]
impl ExchangeRateProvider for StaticRates {
    async fn get_rate(
        &self,
        currency: &str,
        date: NaiveDate,
    ) -> Result<Option<Decimal>, ExchangeError> {
        Ok(self.lookup(currency, date))
    }
}

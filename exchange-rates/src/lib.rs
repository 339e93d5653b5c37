//! Historical exchange rate providers.
//!
//! Every provider answers the same question: how many units of a currency
//! equal one unit of the reference currency, according to the most recent
//! quotation recorded no later than a given date and no earlier than six
//! months before it.
//!
//! - [`TreasuryRatesClient`] asks the Treasury Fiscal Data "rates of exchange" API.
//! - [`StaticRates`] answers from an in-memory table of quotations, for offline
//!   runs and tests.
//! - [`Rates`] picks one of the two at runtime.
//!
//! # Example
//! ```no_run
//! use exchange_rates::TreasuryRatesClient;
//! use purchases_types::ExchangeRateProvider;
//!
//! # async fn run() -> Result<(), purchases_types::ExchangeError> {
//! let client = TreasuryRatesClient::default();
//! let date = chrono::NaiveDate::from_ymd_opt(2023, 8, 17).unwrap();
//! match client.get_rate("Canada-Dollar", date).await? {
//!     Some(rate) => println!("1 USD = {} CAD", rate),
//!     None => println!("no quotation in the last six months"),
//! }
//! # Ok(())
//! # }
//! ```

mod fixed;
mod treasury;

use async_trait::async_trait;
use chrono::NaiveDate;
use rust_decimal::Decimal;

use purchases_types::{ExchangeError, ExchangeRateProvider};

pub use fixed::{Quotation, StaticRates};
pub use treasury::{DEFAULT_BASE_URL, TreasuryRatesClient};

/// Runtime choice between the live API and a static table.
pub enum Rates {
    Treasury(TreasuryRatesClient),
    Static(StaticRates),
}

#[async_trait]
impl ExchangeRateProvider for Rates {
    async fn get_rate(
        &self,
        currency: &str,
        date: NaiveDate,
    ) -> Result<Option<Decimal>, ExchangeError> {
        match self {
            Rates::Treasury(inner) => inner.get_rate(currency, date).await,
            Rates::Static(inner) => inner.get_rate(currency, date).await,
        }
    }
}

impl From<TreasuryRatesClient> for Rates {
    fn from(client: TreasuryRatesClient) -> Self {
        Rates::Treasury(client)
    }
}

impl From<StaticRates> for Rates {
    fn from(rates: StaticRates) -> Self {
        Rates::Static(rates)
    }
}

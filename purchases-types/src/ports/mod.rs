//! Port traits (interfaces for adapters).
//!
//! These are the contracts that adapters must implement.
//! The application layer depends on these traits, not concrete implementations.

mod exchange;
mod store;

pub use exchange::{BoxError, ExchangeError, ExchangeRateProvider, LOOKBACK_MONTHS, lookback_window};
pub use store::TransactionStore;

//! # Purchases Types
//!
//! Domain types and port traits for the purchase ledger.
//! This crate has ZERO external IO dependencies - only data structures,
//! business rules, and trait definitions.
//!
//! ## Architecture
//!
//! This crate represents the **innermost core** of the hexagonal architecture:
//! - `domain/` - Pure domain types (Transaction, ConvertedTransaction, amount rules)
//! - `ports/` - Trait definitions that adapters must implement
//! - `dto/` - Request objects handed over by inbound adapters
//! - `error/` - Store and application error types

pub mod domain;
pub mod dto;
pub mod error;
pub mod ports;

// Re-export commonly used types
pub use domain::{ConvertedTransaction, Transaction, TransactionId};
pub use dto::*;
pub use error::{AppError, StoreError};
pub use ports::{
    ExchangeError, ExchangeRateProvider, LOOKBACK_MONTHS, TransactionStore, lookback_window,
};

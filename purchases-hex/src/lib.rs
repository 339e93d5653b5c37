//! # Purchases Hex
//!
//! Application service layer and inbound command adapter for the purchase ledger.
//!
//! ## Architecture
//!
//! - `service/` - Application service (joins the store and the rate provider)
//! - `inbound/` - Command adapter (typed commands in, renderable output back)
//!
//! The service is generic over `S: TransactionStore` and `P: ExchangeRateProvider`,
//! allowing different adapters to be injected.

pub mod inbound;
pub mod service;


pub use service::PurchaseService;

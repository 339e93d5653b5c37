//! # Purchases Repository
//!
//! Concrete store implementations (adapters) for the purchase ledger.
//! This crate provides the flat-file adapter that implements the `TransactionStore` port.

pub mod json_file;


pub use json_file::JsonFileStore;

//! Domain models for the purchase ledger.

pub mod money;
pub mod transaction;

pub use money::{AMOUNT_SCALE, MAX_DESCRIPTION_LENGTH, round_to_cents, truncate_description};
pub use transaction::{ConvertedTransaction, Transaction, TransactionId};

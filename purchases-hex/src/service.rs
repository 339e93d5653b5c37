//! Purchase Application Service
//!
//! Orchestrates domain operations through the store and exchange rate ports.
//! Contains NO infrastructure logic - pure business orchestration.

use tracing::{debug, info, warn};

use purchases_types::domain::{round_to_cents, truncate_description};
use purchases_types::{
    AppError, ConvertedTransaction, ExchangeRateProvider, RetrieveTransactionRequest,
    StoreTransactionRequest, Transaction, TransactionId, TransactionStore,
};

/// Application service for purchase operations.
///
/// Generic over both ports - the adapters are injected at compile time.
/// Every call works on the store's current snapshot; nothing is cached
/// between calls.
pub struct PurchaseService<S: TransactionStore, P: ExchangeRateProvider> {
    store: S,
    rates: P,
}

impl<S: TransactionStore, P: ExchangeRateProvider> PurchaseService<S, P> {
    /// Creates a new purchase service with the given adapters.
    pub fn new(store: S, rates: P) -> Self {
        Self { store, rates }
    }

    /// Returns a reference to the underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Returns a reference to the underlying rate provider.
    pub fn rates(&self) -> &P {
        &self.rates
    }

    /// Discards every stored purchase.
    pub async fn reset(&self) -> Result<(), AppError> {
        self.store.reset().await?;
        info!("transaction store reset");
        Ok(())
    }

    /// Records a purchase.
    ///
    /// The description is cut to 50 characters and the amount rounded
    /// half-up to cents before a fresh id is assigned and the record stored.
    /// Amounts too large to carry cents are rejected without touching the store.
    pub async fn store_transaction(
        &self,
        req: StoreTransactionRequest,
    ) -> Result<Transaction, AppError> {
        let amount = round_to_cents(req.amount).ok_or(AppError::AmountOutOfRange(req.amount))?;
        let transaction = Transaction {
            id: TransactionId::new(),
            amount,
            date: req.date,
            description: truncate_description(&req.description),
        };

        self.store.append(&transaction).await?;

        info!(id = %transaction.id, amount = %transaction.amount, date = %transaction.date, "stored transaction");
        Ok(transaction)
    }

    /// Reads a purchase back, converted with the rate in effect on its date.
    pub async fn retrieve_transaction(
        &self,
        req: RetrieveTransactionRequest,
    ) -> Result<ConvertedTransaction, AppError> {
        let transaction = self
            .store
            .find_by_id(req.id)
            .await?
            .ok_or(AppError::TransactionNotFound(req.id))?;

        let Some(rate) = self.rates.get_rate(&req.currency, transaction.date).await? else {
            warn!(id = %req.id, currency = %req.currency, date = %transaction.date, "no exchange rate in lookback window");
            return Err(AppError::ConversionUnavailable {
                currency: req.currency,
            });
        };

        let Some(converted_amount) = transaction
            .amount
            .checked_mul(rate)
            .and_then(round_to_cents)
        else {
            warn!(id = %req.id, currency = %req.currency, %rate, "converted amount out of range");
            return Err(AppError::ConversionOutOfRange {
                id: req.id,
                currency: req.currency,
            });
        };

        debug!(id = %req.id, currency = %req.currency, %rate, %converted_amount, "converted transaction");

        Ok(ConvertedTransaction::new(transaction, rate, converted_amount))
    }
}

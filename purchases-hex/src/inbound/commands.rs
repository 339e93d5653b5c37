//! Command dispatch.

use purchases_types::{
    AppError, ConvertedTransaction, ExchangeRateProvider, RetrieveTransactionRequest,
    StoreTransactionRequest, TransactionId, TransactionStore,
};

use crate::PurchaseService;

/// One user request, already parsed into typed values.
#[derive(Debug, Clone)]
pub enum Command {
    /// Wipe the store
    Reset,
    /// Record a purchase
    Store(StoreTransactionRequest),
    /// Read a purchase back in another currency
    Retrieve(RetrieveTransactionRequest),
}

/// What a successful command hands back to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandOutput {
    Done,
    Stored(TransactionId),
    Converted(ConvertedTransaction),
}

impl CommandOutput {
    /// Renders the output as a single line of JSON.
    pub fn to_json(&self) -> serde_json::Result<String> {
        match self {
            CommandOutput::Done => serde_json::to_string("Done"),
            CommandOutput::Stored(id) => serde_json::to_string(id),
            CommandOutput::Converted(tx) => serde_json::to_string(tx),
        }
    }
}

/// Runs a command against the service.
#[tracing::instrument(skip(service))]
pub async fn execute<S, P>(
    service: &PurchaseService<S, P>,
    command: Command,
) -> Result<CommandOutput, AppError>
where
    S: TransactionStore,
    P: ExchangeRateProvider,
{
    match command {
        Command::Reset => {
            service.reset().await?;
            Ok(CommandOutput::Done)
        }
        Command::Store(req) => {
            let tx = service.store_transaction(req).await?;
            Ok(CommandOutput::Stored(tx.id))
        }
        Command::Retrieve(req) => {
            let converted = service.retrieve_transaction(req).await?;
            Ok(CommandOutput::Converted(converted))
        }
    }
}

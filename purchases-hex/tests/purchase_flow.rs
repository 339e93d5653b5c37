//! End-to-end tests of the command flow over the JSON file store.
//!
//! Rates come from a static table so the tests stay offline.

use chrono::NaiveDate;
use exchange_rates::StaticRates;
use purchases_hex::PurchaseService;
use purchases_hex::inbound::{Command, CommandOutput, execute};
use purchases_repo::JsonFileStore;
use purchases_types::{
    AppError, RetrieveTransactionRequest, StoreTransactionRequest, TransactionId,
};
use rust_decimal_macros::dec;
use tempfile::TempDir;

fn date(s: &str) -> NaiveDate {
    s.parse().unwrap()
}

/// Helper to create a service over a fresh store file.
fn create_service() -> (TempDir, PurchaseService<JsonFileStore, StaticRates>) {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonFileStore::new(dir.path().join("storage.json"));
    let rates = StaticRates::default()
        .with_quotation("Canada-Dollar", date("2023-03-31"), dec!(99.101))
        .with_quotation("Canada-Dollar", date("2023-06-30"), dec!(1.254));
    (dir, PurchaseService::new(store, rates))
}

fn store_command(amount: rust_decimal::Decimal, on: &str, description: &str) -> Command {
    Command::Store(StoreTransactionRequest {
        amount,
        date: date(on),
        description: description.to_string(),
    })
}

fn retrieve_command(id: TransactionId, currency: &str) -> Command {
    Command::Retrieve(RetrieveTransactionRequest {
        id,
        currency: currency.to_string(),
    })
}

async fn store(
    service: &PurchaseService<JsonFileStore, StaticRates>,
    command: Command,
) -> TransactionId {
    match execute(service, command).await.unwrap() {
        CommandOutput::Stored(id) => id,
        other => panic!("unexpected output: {:?}", other),
    }
}

#[tokio::test]
async fn test_store_then_retrieve_round_trips_fields() {
    let (_dir, service) = create_service();

    let id = store(
        &service,
        store_command(dec!(12.6449), "2023-08-17", "Coffee beans"),
    )
    .await;

    let output = execute(&service, retrieve_command(id, "Canada-Dollar"))
        .await
        .unwrap();

    let converted = match output {
        CommandOutput::Converted(converted) => converted,
        other => panic!("unexpected output: {:?}", other),
    };
    assert_eq!(converted.id, id);
    assert_eq!(converted.date, date("2023-08-17"));
    assert_eq!(converted.description, "Coffee beans");
    assert_eq!(converted.amount, dec!(12.64));
    assert_eq!(converted.exchange_rate, dec!(1.254));
    assert_eq!(converted.converted_amount, dec!(15.85));
}

#[tokio::test]
async fn test_store_file_keeps_cents() {
    let (dir, service) = create_service();

    store(&service, store_command(dec!(15.8), "2023-08-17", "Lunch")).await;

    let content = tokio::fs::read_to_string(dir.path().join("storage.json"))
        .await
        .unwrap();
    assert!(content.contains(r#""amount":15.80"#), "{}", content);
}

#[tokio::test]
async fn test_retrieve_unknown_id_fails() {
    let (_dir, service) = create_service();
    let id = TransactionId::new();

    let err = execute(&service, retrieve_command(id, "Canada-Dollar"))
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::TransactionNotFound(_)));
    assert!(err.to_string().contains(&id.to_string()));
}

#[tokio::test]
async fn test_retrieve_outside_rate_window_fails() {
    let (_dir, service) = create_service();
    let id = store(&service, store_command(dec!(5), "2025-01-10", "Too late")).await;

    let err = execute(&service, retrieve_command(id, "Canada-Dollar"))
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::ConversionUnavailable { .. }));
}

#[tokio::test]
async fn test_reset_forgets_every_stored_purchase() {
    let (_dir, service) = create_service();
    let first = store(&service, store_command(dec!(1), "2023-08-17", "First")).await;
    let second = store(&service, store_command(dec!(2), "2023-08-18", "Second")).await;

    let output = execute(&service, Command::Reset).await.unwrap();
    assert_eq!(output, CommandOutput::Done);

    for id in [first, second] {
        let err = execute(&service, retrieve_command(id, "Canada-Dollar"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::TransactionNotFound(_)));
    }
}

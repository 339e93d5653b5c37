//! Treasury Fiscal Data "rates of exchange" client.

use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::Client;
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::debug;

use purchases_types::{ExchangeError, ExchangeRateProvider, lookback_window};

/// Public endpoint of the Treasury reporting rates of exchange dataset.
pub const DEFAULT_BASE_URL: &str = "https://api.fiscaldata.treasury.gov/services/api/fiscal_service/v1/accounting/od/rates_of_exchange";

#[derive(Debug, Deserialize)]
struct RatesResponse {
    data: Vec<RateRecord>,
}

#[derive(Debug, Deserialize)]
struct RateRecord {
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    exchange_rate: Decimal,
}

/// Exchange rate provider backed by the Treasury API.
///
/// One unauthenticated GET per lookup, no retries and no caching.
pub struct TreasuryRatesClient {
    base_url: String,
    http: Client,
}

impl TreasuryRatesClient {
    /// Creates a client against the given base URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http: Client::new(),
        }
    }

    /// Returns the base URL requests are sent to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Query selecting the newest quotation for `currency` inside the lookback window.
    fn query(currency: &str, date: NaiveDate) -> Vec<(&'static str, String)> {
        let (start, end) = lookback_window(date);
        vec![
            ("fields", "record_date,exchange_rate".to_string()),
            (
                "filter",
                format!(
                    "country_currency_desc:eq:{},record_date:gte:{},record_date:lte:{}",
                    currency, start, end
                ),
            ),
            ("sort", "-record_date".to_string()),
            ("page[number]", "1".to_string()),
            ("page[size]", "1".to_string()),
        ]
    }
}

impl Default for TreasuryRatesClient {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

#[async_trait]
impl ExchangeRateProvider for TreasuryRatesClient {
    async fn get_rate(
        &self,
        currency: &str,
        date: NaiveDate,
    ) -> Result<Option<Decimal>, ExchangeError> {
        debug!(currency, %date, url = %self.base_url, "requesting exchange rate");

        let resp = self
            .http
            .get(&self.base_url)
            .query(&Self::query(currency, date))
            .send()
            .await
            .map_err(|e| ExchangeError::Transport(Box::new(e)))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(ExchangeError::Status {
                status: status.as_u16(),
            });
        }

        let body = resp
            .text()
            .await
            .map_err(|e| ExchangeError::Transport(Box::new(e)))?;
        let parsed: RatesResponse = serde_json::from_str(&body)
            .map_err(|e| ExchangeError::InvalidResponse(Box::new(e)))?;

        let rate = parsed.data.into_iter().next().map(|r| r.exchange_rate);
        debug!(currency, %date, ?rate, "exchange rate lookup finished");
        Ok(rate)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};

    use axum::Router;
    use axum::extract::{Query, State};
    use axum::http::StatusCode;
    use axum::routing::get;
    use rust_decimal_macros::dec;

    use super::*;

    /// Canned upstream that remembers the query strings it was sent.
    struct FakeTreasury {
        status: StatusCode,
        body: &'static str,
        requests: Mutex<Vec<HashMap<String, String>>>,
    }

    async fn respond(
        State(fake): State<Arc<FakeTreasury>>,
        Query(params): Query<HashMap<String, String>>,
    ) -> (StatusCode, &'static str) {
        fake.requests.lock().unwrap().push(params);
        (fake.status, fake.body)
    }

    async fn spawn_fake(status: StatusCode, body: &'static str) -> (String, Arc<FakeTreasury>) {
        let fake = Arc::new(FakeTreasury {
            status,
            body,
            requests: Mutex::new(Vec::new()),
        });
        let app = Router::new()
            .route("/", get(respond))
            .with_state(fake.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        (format!("http://{}", addr), fake)
    }

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    #[test]
    fn test_default_points_at_treasury() {
        let client = TreasuryRatesClient::default();
        assert_eq!(client.base_url(), DEFAULT_BASE_URL);
    }

    #[test]
    fn test_trailing_slash_is_trimmed() {
        let client = TreasuryRatesClient::new("http://localhost:8011/");
        assert_eq!(client.base_url(), "http://localhost:8011");
    }

    #[tokio::test]
    async fn test_requests_window_and_returns_first_rate() {
        let (url, fake) = spawn_fake(
            StatusCode::OK,
            r#"{ "data": [{ "exchange_rate": 12.345 }, { "exchange_rate": 99.101 }] }"#,
        )
        .await;
        let client = TreasuryRatesClient::new(url);

        let rate = client
            .get_rate("test_currency", date("2023-08-17"))
            .await
            .unwrap();

        assert_eq!(rate, Some(dec!(12.345)));

        let requests = fake.requests.lock().unwrap();
        assert_eq!(requests.len(), 1);
        let params = &requests[0];
        assert_eq!(params["fields"], "record_date,exchange_rate");
        assert_eq!(
            params["filter"],
            "country_currency_desc:eq:test_currency,record_date:gte:2023-02-17,record_date:lte:2023-08-17"
        );
        assert_eq!(params["sort"], "-record_date");
        assert_eq!(params["page[number]"], "1");
        assert_eq!(params["page[size]"], "1");
    }

    #[tokio::test]
    async fn test_accepts_rates_encoded_as_strings() {
        let (url, _fake) = spawn_fake(
            StatusCode::OK,
            r#"{"data":[{"record_date":"2023-06-30","exchange_rate":"1.325"}],"meta":{"count":1}}"#,
        )
        .await;
        let client = TreasuryRatesClient::new(url);

        let rate = client
            .get_rate("Canada-Dollar", date("2023-08-17"))
            .await
            .unwrap();

        assert_eq!(rate, Some(dec!(1.325)));
    }

    #[tokio::test]
    async fn test_empty_data_means_no_rate() {
        let (url, _fake) = spawn_fake(StatusCode::OK, r#"{ "data": [] }"#).await;
        let client = TreasuryRatesClient::new(url);

        let rate = client
            .get_rate("test_currency", date("2023-08-17"))
            .await
            .unwrap();

        assert_eq!(rate, None);
    }

    #[tokio::test]
    async fn test_unparseable_response_is_an_error() {
        let (url, _fake) = spawn_fake(StatusCode::OK, r#"{ "key": "value" }"#).await;
        let client = TreasuryRatesClient::new(url);

        let result = client.get_rate("test_currency", date("2023-08-17")).await;

        assert!(matches!(result, Err(ExchangeError::InvalidResponse(_))));
    }

    #[tokio::test]
    async fn test_error_status_is_an_error() {
        let (url, _fake) = spawn_fake(StatusCode::INTERNAL_SERVER_ERROR, "boom").await;
        let client = TreasuryRatesClient::new(url);

        let result = client.get_rate("test_currency", date("2023-08-17")).await;

        assert!(matches!(result, Err(ExchangeError::Status { status: 500 })));
    }

    #[tokio::test]
    async fn test_unreachable_server_is_a_transport_error() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        let client = TreasuryRatesClient::new(format!("http://{}", addr));

        let result = client.get_rate("test_currency", date("2023-08-17")).await;

        assert!(matches!(result, Err(ExchangeError::Transport(_))));
    }
}

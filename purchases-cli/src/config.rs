//! Configuration loading from environment.

use std::env;
use std::path::PathBuf;

use exchange_rates::DEFAULT_BASE_URL;

const DEFAULT_STORAGE_PATH: &str = "storage.json";

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// JSON file holding the stored purchases
    pub storage_path: PathBuf,
    /// Base URL of the Treasury rates of exchange endpoint
    pub rates_url: String,
    /// Optional JSON file of quotations used instead of the live API
    pub rates_file: Option<PathBuf>,
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// - `PURCHASES_STORAGE_PATH` (default `storage.json`)
    /// - `EXCHANGE_RATES_URL` (default: the Treasury Fiscal Data endpoint)
    /// - `EXCHANGE_RATES_FILE` (unset: use the live API)
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_vars(|key| env::var(key).ok())
    }

    fn from_vars(var: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let storage_path = var("PURCHASES_STORAGE_PATH")
            .unwrap_or_else(|| DEFAULT_STORAGE_PATH.to_string())
            .into();

        let rates_url = var("EXCHANGE_RATES_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        if rates_url.trim().is_empty() {
            anyhow::bail!("EXCHANGE_RATES_URL must not be empty");
        }

        let rates_file = var("EXCHANGE_RATES_FILE")
            .filter(|s| !s.is_empty())
            .map(PathBuf::from);

        Ok(Self {
            storage_path,
            rates_url,
            rates_file,
        })
    }

    /// Applies values given on the command line over the environment ones.
    pub fn with_overrides(
        mut self,
        storage_path: Option<PathBuf>,
        rates_url: Option<String>,
        rates_file: Option<PathBuf>,
    ) -> Self {
        if let Some(path) = storage_path {
            self.storage_path = path;
        }
        if let Some(url) = rates_url {
            self.rates_url = url;
        }
        if rates_file.is_some() {
            self.rates_file = rates_file;
        }
        self
    }
}

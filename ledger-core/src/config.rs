//! Configuration management
//!
//! Settings live in `settings.json` inside the ledger directory:
//! ```json
//! {
//!   "account": { "currency": "USD", "feePercentage": "0.005", "maxDailyDebits": 3 }
//! }
//! ```
//! Fields this crate does not manage are preserved when saving.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::adapters::SystemClock;
use crate::domain::Currency;
use crate::services::{DailyDebitLimitPolicy, PercentageTransactionFeeCalculator};

pub const SETTINGS_FILE: &str = "settings.json";
pub const DEFAULT_CURRENCY: &str = "USD";
pub const DEFAULT_MAX_DAILY_DEBITS: u32 = 3;

/// Default fee: half a percent
pub fn default_fee_percentage() -> Decimal {
    Decimal::new(5, 3)
}

/// Raw settings.json structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SettingsFile {
    #[serde(default)]
    account: AccountSettings,
    #[serde(flatten)]
    other: HashMap<String, serde_json::Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AccountSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    currency: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    fee_percentage: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    max_daily_debits: Option<u32>,
    #[serde(flatten)]
    other: HashMap<String, serde_json::Value>,
}

/// Effective ledger configuration
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    pub currency: String,
    pub fee_percentage: Decimal,
    pub max_daily_debits: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            currency: DEFAULT_CURRENCY.to_string(),
            fee_percentage: default_fee_percentage(),
            max_daily_debits: DEFAULT_MAX_DAILY_DEBITS,
        }
    }
}

impl Config {
    /// Load config from the ledger directory
    ///
    /// Each value can be overridden with an environment variable:
    /// `LEDGER_CURRENCY`, `LEDGER_FEE_PERCENTAGE`, `LEDGER_MAX_DAILY_DEBITS`.
    pub fn load(ledger_dir: &Path) -> Result<Self> {
        Self::load_with_env(ledger_dir, |key| std::env::var(key).ok())
    }

    /// Load config using `env` to look up overrides
    pub fn load_with_env(ledger_dir: &Path, env: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let raw = read_settings(ledger_dir)?;
        let defaults = Self::default();

        let currency = env("LEDGER_CURRENCY")
            .or(raw.account.currency)
            .unwrap_or(defaults.currency);

        let fee_percentage = match env("LEDGER_FEE_PERCENTAGE") {
            Some(value) => value
                .trim()
                .parse::<Decimal>()
                .with_context(|| format!("Invalid LEDGER_FEE_PERCENTAGE: {}", value))?,
            None => raw.account.fee_percentage.unwrap_or(defaults.fee_percentage),
        };

        let max_daily_debits = match env("LEDGER_MAX_DAILY_DEBITS") {
            Some(value) => value
                .trim()
                .parse::<u32>()
                .with_context(|| format!("Invalid LEDGER_MAX_DAILY_DEBITS: {}", value))?,
            None => raw.account.max_daily_debits.unwrap_or(defaults.max_daily_debits),
        };

        Ok(Self {
            currency,
            fee_percentage,
            max_daily_debits,
        })
    }

    /// Save config to the ledger directory
    /// Preserves other settings that this crate doesn't manage
    pub fn save(&self, ledger_dir: &Path) -> Result<()> {
        let mut settings = read_settings(ledger_dir)?;

        settings.account.currency = Some(self.currency.clone());
        settings.account.fee_percentage = Some(self.fee_percentage);
        settings.account.max_daily_debits = Some(self.max_daily_debits);

        let content = serde_json::to_string_pretty(&settings)?;
        std::fs::write(ledger_dir.join(SETTINGS_FILE), content)
            .context("Failed to write settings file")?;
        Ok(())
    }

    /// Check every value through the domain constructors
    pub fn validate(&self) -> crate::Result<()> {
        self.currency()?;
        self.fee_calculator()?;
        DailyDebitLimitPolicy::new(self.max_daily_debits, Arc::new(SystemClock))?;
        Ok(())
    }

    pub fn currency(&self) -> crate::Result<Currency> {
        Currency::from_code(&self.currency)
    }

    pub fn fee_calculator(&self) -> crate::Result<PercentageTransactionFeeCalculator> {
        PercentageTransactionFeeCalculator::new(self.fee_percentage)
    }
}

fn read_settings(ledger_dir: &Path) -> Result<SettingsFile> {
    let settings_path = ledger_dir.join(SETTINGS_FILE);
    if !settings_path.exists() {
        return Ok(SettingsFile::default());
    }
    let content = std::fs::read_to_string(&settings_path)
        .with_context(|| format!("Failed to read {}", settings_path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse {}", settings_path.display()))
}

//! Currency domain model

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::result::{Error, Result};

/// A three-letter currency code, normalized to uppercase
///
/// Normalization only happens at construction, so two currencies built
/// from "usd" and "USD" compare equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Currency {
    code: String,
}

impl Currency {
    /// Create a currency from its code
    ///
    /// The length check runs on the raw input, before uppercasing.
    pub fn from_code(code: &str) -> Result<Self> {
        if code.chars().count() != 3 {
            return Err(Error::InvalidCurrencyCode(code.to_string()));
        }
        Ok(Self {
            code: code.to_uppercase(),
        })
    }

    /// The normalized code
    pub fn code(&self) -> &str {
        &self.code
    }
}

impl FromStr for Currency {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_code(s)
    }
}

impl TryFrom<String> for Currency {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        Self::from_code(&value)
    }
}

impl From<Currency> for String {
    fn from(currency: Currency) -> Self {
        currency.code
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.code)
    }
}

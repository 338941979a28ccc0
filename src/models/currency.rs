// SPDX-FileCopyrightText: 2025 Joost van der Laan <joost@fashionunited.com>
//
// SPDX-License-Identifier: AGPL-3.0-only

use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::warn;

use crate::error::{AppError, Result};

/// A currency as stored in the `currency` table.
///
/// `exchange_rate` is the rate that turns one unit of this currency into the
/// base currency (EUR).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Currency {
    pub id: i64,
    pub code: String,
    pub name: String,
    pub exchange_rate: f64,
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.code, self.name)
    }
}

/// Insert payload for a currency that has not been given an id yet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewCurrency {
    pub code: String,
    pub name: String,
    pub exchange_rate: f64,
}

impl NewCurrency {
    pub fn new(code: impl Into<String>, name: impl Into<String>, exchange_rate: f64) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
            exchange_rate,
        }
    }

    /// Build a payload from the raw text of the add-currency form.
    ///
    /// The code is trimmed and upper-cased, the name trimmed, and the rate
    /// parsed and checked to be positive.
    pub fn parse(code: &str, name: &str, exchange_rate: &str) -> Result<Self> {
        let code = code.trim().to_uppercase();
        let name = name.trim().to_string();

        if code.is_empty() || name.is_empty() {
            return Err(AppError::validation("Currency code and name are required"));
        }

        let exchange_rate: f64 = exchange_rate
            .trim()
            .parse()
            .map_err(|_| AppError::invalid_input("Please enter a valid exchange rate"))?;

        let currency = Self {
            code,
            name,
            exchange_rate,
        };
        currency.validate()?;
        Ok(currency)
    }

    /// Copy with the code trimmed and upper-cased and the name trimmed.
    pub fn normalized(&self) -> Self {
        Self {
            code: self.code.trim().to_uppercase(),
            name: self.name.trim().to_string(),
            exchange_rate: self.exchange_rate,
        }
    }

    /// Check the domain constraints the `currency` table relies on.
    pub fn validate(&self) -> Result<()> {
        if self.code.trim().is_empty() || self.name.trim().is_empty() {
            return Err(AppError::validation("Currency code and name are required"));
        }

        if !self.exchange_rate.is_finite() || self.exchange_rate <= 0.0 {
            return Err(AppError::validation(
                "Exchange rate must be greater than zero",
            ));
        }

        if !is_conventional_code(&self.code) {
            warn!(code = %self.code, "Currency code is not a 3-letter uppercase code");
        }

        Ok(())
    }
}

fn is_conventional_code(code: &str) -> bool {
    code.len() == 3 && code.chars().all(|c| c.is_ascii_uppercase())
}

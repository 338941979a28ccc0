// SPDX-FileCopyrightText: 2025 Joost van der Laan <joost@fashionunited.com>
//
// SPDX-License-Identifier: AGPL-3.0-only

use serde::Serialize;
use std::fmt;
use tracing::debug;

use crate::error::{AppError, Result};
use crate::models::Currency;

/// Outcome of a conversion, ready to be shown to the user.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Conversion {
    pub amount: f64,
    pub from_code: String,
    pub result: f64,
    pub to_code: String,
}

impl fmt::Display for Conversion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:.2} {} = {:.2} {}",
            self.amount, self.from_code, self.result, self.to_code
        )
    }
}

/// Parse the amount typed by the user.
pub fn parse_amount(text: &str) -> Result<f64> {
    let text = text.trim();
    if text.is_empty() {
        return Err(AppError::invalid_input("Please enter an amount"));
    }

    let amount: f64 = text
        .parse()
        .map_err(|_| AppError::invalid_input("Please enter a valid number"))?;

    if !amount.is_finite() || amount < 0.0 {
        return Err(AppError::invalid_input(
            "Amount must be a non-negative number",
        ));
    }

    Ok(amount)
}

/// Convert an amount from one currency to another through the base currency.
///
/// The amount is first divided by the source rate to get the base amount,
/// which is then multiplied by the target rate.
pub fn convert(amount: f64, from: &Currency, to: &Currency) -> Result<f64> {
    if !amount.is_finite() || amount < 0.0 {
        return Err(AppError::invalid_input(
            "Amount must be a non-negative number",
        ));
    }

    for currency in [from, to] {
        if !(currency.exchange_rate > 0.0 && currency.exchange_rate.is_finite()) {
            return Err(AppError::arithmetic(format!(
                "exchange rate of {} must be positive, got {}",
                currency.code, currency.exchange_rate
            )));
        }
    }

    let amount_in_base = amount / from.exchange_rate;
    let result = amount_in_base * to.exchange_rate;

    if !result.is_finite() {
        return Err(AppError::arithmetic(format!(
            "converting {} {} to {} overflowed",
            amount, from.code, to.code
        )));
    }

    debug!(
        amount,
        from = %from.code,
        to = %to.code,
        amount_in_base,
        result,
        "Converted amount"
    );
    Ok(result)
}

/// Run a conversion and package it for display.
pub fn convert_to_display(amount: f64, from: &Currency, to: &Currency) -> Result<Conversion> {
    let result = convert(amount, from, to)?;
    Ok(Conversion {
        amount,
        from_code: from.code.clone(),
        result,
        to_code: to.code.clone(),
    })
}

/// Round half away from zero to two decimal places.
pub fn round_to_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

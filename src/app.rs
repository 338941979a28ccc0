// SPDX-FileCopyrightText: 2025 Joost van der Laan <joost@fashionunited.com>
//
// SPDX-License-Identifier: AGPL-3.0-only

//! The request/result boundary a front end drives.
//!
//! `CurrencyConverter` keeps the list of currencies the UI shows in its two
//! selection lists. The list is only replaced by an explicit `refresh`, which
//! also happens after every successful `add_currency`.

use tracing::{debug, info};

use crate::converter::{self, Conversion};
use crate::currencies::CurrencyStore;
use crate::error::{AppError, Result};
use crate::models::{Currency, NewCurrency};

pub struct CurrencyConverter {
    store: CurrencyStore,
    currencies: Vec<Currency>,
}

impl CurrencyConverter {
    /// Build the converter and fill its list from the store.
    pub async fn load(store: CurrencyStore) -> Result<Self> {
        let mut app = Self {
            store,
            currencies: Vec::new(),
        };
        app.refresh().await?;
        Ok(app)
    }

    pub async fn refresh(&mut self) -> Result<()> {
        self.currencies = self.store.list_all().await?;
        debug!(count = self.currencies.len(), "Refreshed currency list");
        Ok(())
    }

    pub fn currencies(&self) -> &[Currency] {
        &self.currencies
    }

    /// The currency preselected in both lists: the first one, if any.
    pub fn default_selection(&self) -> Option<&Currency> {
        self.currencies.first()
    }

    /// Look up a listed currency by code.
    pub fn selected(&self, code: &str) -> Option<&Currency> {
        let code = code.trim();
        self.currencies
            .iter()
            .find(|c| c.code.eq_ignore_ascii_case(code))
    }

    /// Convert the user's amount between the two selected currencies.
    pub fn convert(
        &self,
        amount_text: &str,
        from_code: Option<&str>,
        to_code: Option<&str>,
    ) -> Result<Conversion> {
        if amount_text.trim().is_empty() {
            return Err(AppError::invalid_input("Please enter an amount"));
        }

        let (from, to) = match (
            from_code.and_then(|code| self.selected(code)),
            to_code.and_then(|code| self.selected(code)),
        ) {
            (Some(from), Some(to)) => (from, to),
            _ => {
                return Err(AppError::missing_selection(
                    "Please select both currencies",
                ))
            }
        };

        let amount = converter::parse_amount(amount_text)?;
        converter::convert_to_display(amount, from, to)
    }

    /// Validate the add-currency form, store the currency and reload the list.
    pub async fn add_currency(
        &mut self,
        code_text: &str,
        name_text: &str,
        rate_text: &str,
    ) -> Result<Currency> {
        let new_currency = NewCurrency::parse(code_text, name_text, rate_text)?;
        let stored = self.store.insert(&new_currency).await?;
        info!(code = %stored.code, "Added currency");

        self.refresh().await?;
        Ok(stored)
    }

    pub fn store(&self) -> &CurrencyStore {
        &self.store
    }
}

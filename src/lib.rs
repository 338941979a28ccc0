// SPDX-FileCopyrightText: 2025 Joost van der Laan <joost@fashionunited.com>
//
// SPDX-License-Identifier: AGPL-3.0-only

pub mod app;
pub mod config;
pub mod converter;
pub mod currencies;
pub mod db;
pub mod error;
pub mod export;
pub mod log;
pub mod models;

pub use app::CurrencyConverter;
pub use currencies::CurrencyStore;
pub use error::{AppError, Result};
pub use models::{Currency, NewCurrency};

/// Insert the given currencies, skipping codes that are already stored.
///
/// Returns the number of currencies actually inserted.
pub async fn seed_currencies(store: &CurrencyStore, seeds: &[NewCurrency]) -> Result<usize> {
    let mut inserted = 0;
    for seed in seeds {
        if store.find_by_code(&seed.code).await?.is_some() {
            tracing::debug!(code = %seed.code, "Currency already present, skipping");
            continue;
        }
        store.insert(seed).await?;
        inserted += 1;
    }
    Ok(inserted)
}

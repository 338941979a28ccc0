// SPDX-FileCopyrightText: 2025 Joost van der Laan <joost@fashionunited.com>
//
// SPDX-License-Identifier: AGPL-3.0-only

use chrono::Local;
use csv::Writer;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::currencies::CurrencyStore;
use crate::error::Result;

/// Export all currencies to a timestamped CSV file in `output_dir`
pub async fn export_currencies_csv(store: &CurrencyStore, output_dir: &Path) -> Result<PathBuf> {
    // Create output directory if it doesn't exist
    fs::create_dir_all(output_dir)?;

    let currencies = store.list_all().await?;

    let timestamp = Local::now().format("%Y%m%d_%H%M%S");
    let csv_path = output_dir.join(format!("currencies_{}.csv", timestamp));
    let mut writer = Writer::from_path(&csv_path)?;

    // Write header
    writer.write_record(["Id", "Code", "Name", "Exchange Rate"])?;

    for currency in &currencies {
        writer.write_record([
            currency.id.to_string().as_str(),
            currency.code.as_str(),
            currency.name.as_str(),
            currency.exchange_rate.to_string().as_str(),
        ])?;
    }

    writer.flush()?;
    info!(count = currencies.len(), path = %csv_path.display(), "Exported currencies");

    Ok(csv_path)
}

// SPDX-FileCopyrightText: 2025 Joost van der Laan <joost@fashionunited.com>
//
// SPDX-License-Identifier: AGPL-3.0-only

use sqlx::query::Query;
use sqlx::sqlite::{SqliteArguments, SqlitePool, SqliteRow};
use sqlx::{Row, Sqlite};
use tracing::{debug, info, warn};

use crate::error::{AppError, Result};
use crate::models::{Currency, NewCurrency};

/// Map a `currency` row to its record.
pub fn currency_from_row(row: &SqliteRow) -> std::result::Result<Currency, sqlx::Error> {
    Ok(Currency {
        id: row.try_get("id")?,
        code: row.try_get("code")?,
        name: row.try_get("name")?,
        exchange_rate: row.try_get("exchange_rate")?,
    })
}

/// Bind the columns of a new currency, in `(code, name, exchange_rate)` order.
pub fn bind_new_currency<'q>(
    query: Query<'q, Sqlite, SqliteArguments<'q>>,
    currency: &'q NewCurrency,
) -> Query<'q, Sqlite, SqliteArguments<'q>> {
    query
        .bind(currency.code.as_str())
        .bind(currency.name.as_str())
        .bind(currency.exchange_rate)
}

/// Persistence gateway for the `currency` table.
#[derive(Clone)]
pub struct CurrencyStore {
    pool: SqlitePool,
}

impl CurrencyStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// List all currencies in the database, in insertion order
    pub async fn list_all(&self) -> Result<Vec<Currency>> {
        let rows = sqlx::query(
            r#"
            SELECT id, code, name, exchange_rate
            FROM currency
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        let currencies = rows
            .iter()
            .map(currency_from_row)
            .collect::<std::result::Result<Vec<_>, _>>()?;
        debug!(count = currencies.len(), "Listed currencies");

        Ok(currencies)
    }

    /// Get a currency from the database by its code
    pub async fn find_by_code(&self, code: &str) -> Result<Option<Currency>> {
        let row = sqlx::query(
            r#"
            SELECT id, code, name, exchange_rate
            FROM currency
            WHERE code = ?
            "#,
        )
        .bind(code)
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref()
            .map(currency_from_row)
            .transpose()
            .map_err(AppError::from)
    }

    /// Insert a currency into the database.
    ///
    /// The code is stored trimmed and upper-cased. Runs in its own
    /// transaction; nothing is left behind when it fails.
    pub async fn insert(&self, currency: &NewCurrency) -> Result<Currency> {
        let currency = &currency.normalized();
        currency.validate()?;

        let mut tx = self.pool.begin().await?;

        let query = sqlx::query(
            r#"
            INSERT INTO currency (code, name, exchange_rate)
            VALUES (?, ?, ?)
            "#,
        );
        let outcome = bind_new_currency(query, currency).execute(&mut *tx).await;

        match outcome {
            Ok(done) => {
                tx.commit().await?;
                let stored = Currency {
                    id: done.last_insert_rowid(),
                    code: currency.code.clone(),
                    name: currency.name.clone(),
                    exchange_rate: currency.exchange_rate,
                };
                info!(id = stored.id, code = %stored.code, "Inserted currency");
                Ok(stored)
            }
            Err(e) => {
                if let Err(rollback) = tx.rollback().await {
                    warn!(error = %rollback, "Rollback after failed insert did not complete");
                }
                Err(map_insert_error(e, currency))
            }
        }
    }
}

fn map_insert_error(error: sqlx::Error, currency: &NewCurrency) -> AppError {
    if let sqlx::Error::Database(db_error) = &error {
        if db_error.is_unique_violation() {
            return AppError::DuplicateKey {
                code: currency.code.clone(),
            };
        }
        if db_error.is_check_violation() {
            return AppError::validation("Exchange rate must be greater than zero");
        }
    }
    AppError::ConnectionError(error)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db;
    use approx::assert_relative_eq;

    async fn test_store() -> Result<CurrencyStore> {
        Ok(CurrencyStore::new(db::create_test_pool().await?))
    }

    #[tokio::test]
    async fn test_list_all_on_empty_table() -> Result<()> {
        let store = test_store().await?;
        let currencies = store.list_all().await?;
        assert!(currencies.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_insert_then_list_contains_record_once() -> Result<()> {
        let store = test_store().await?;

        let inserted = store
            .insert(&NewCurrency::new("USD", "US Dollar", 1.10))
            .await?;
        assert!(inserted.id > 0);

        let currencies = store.list_all().await?;
        let matches: Vec<_> = currencies.iter().filter(|c| c.code == "USD").collect();
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0], &inserted);
        assert_relative_eq!(matches[0].exchange_rate, 1.10, epsilon = 1e-12);

        Ok(())
    }

    #[tokio::test]
    async fn test_list_all_keeps_insertion_order() -> Result<()> {
        let store = test_store().await?;

        let currencies_data = [
            ("USD", "US Dollar", 1.10),
            ("EUR", "Euro", 1.0),
            ("GBP", "British Pound", 0.85),
            ("CHF", "Swiss Franc", 0.96),
        ];
        for (code, name, rate) in currencies_data {
            store.insert(&NewCurrency::new(code, name, rate)).await?;
        }

        let codes: Vec<String> = store
            .list_all()
            .await?
            .into_iter()
            .map(|c| c.code)
            .collect();
        assert_eq!(codes, vec!["USD", "EUR", "GBP", "CHF"]);

        Ok(())
    }

    #[tokio::test]
    async fn test_ids_are_unique() -> Result<()> {
        let store = test_store().await?;
        let a = store.insert(&NewCurrency::new("AAA", "First", 1.0)).await?;
        let b = store.insert(&NewCurrency::new("BBB", "Second", 2.0)).await?;
        assert_ne!(a.id, b.id);
        Ok(())
    }

    #[tokio::test]
    async fn test_duplicate_code_is_rejected() -> Result<()> {
        let store = test_store().await?;
        store
            .insert(&NewCurrency::new("USD", "US Dollar", 1.10))
            .await?;
        let before = store.list_all().await?;

        let err = store
            .insert(&NewCurrency::new("USD", "Another Dollar", 1.20))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::DuplicateKey { ref code } if code == "USD"));

        let after = store.list_all().await?;
        assert_eq!(before, after);

        // The store is still usable after the rolled back insert
        store.insert(&NewCurrency::new("EUR", "Euro", 1.0)).await?;
        assert_eq!(store.list_all().await?.len(), 2);

        Ok(())
    }

    #[tokio::test]
    async fn test_codes_are_unique_regardless_of_case() -> Result<()> {
        let store = test_store().await?;

        let seeded = seed_usd_lowercase(&store).await?;
        assert_eq!(seeded.code, "USD");

        let err = store
            .insert(&NewCurrency::new("USD", "US Dollar", 1.2))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::DuplicateKey { ref code } if code == "USD"));

        let codes: Vec<String> = store.list_all().await?.into_iter().map(|c| c.code).collect();
        assert_eq!(codes, vec!["USD"]);

        assert_eq!(store.find_by_code("usd").await?, Some(seeded));
        Ok(())
    }

    async fn seed_usd_lowercase(store: &CurrencyStore) -> Result<Currency> {
        crate::seed_currencies(store, &[NewCurrency::new("usd", "US Dollar", 1.1)]).await?;
        Ok(store.find_by_code("USD").await?.expect("seeded currency"))
    }

    #[tokio::test]
    async fn test_non_positive_rate_is_rejected() -> Result<()> {
        let store = test_store().await?;

        for rate in [0.0, -1.0, f64::NAN] {
            let err = store
                .insert(&NewCurrency::new("BAD", "Bad Currency", rate))
                .await
                .unwrap_err();
            assert!(matches!(err, AppError::ValidationError { .. }));
        }

        let err = store
            .insert(&NewCurrency::new("BAD", "", 1.0))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::ValidationError { .. }));

        assert!(store.list_all().await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_check_constraint_backs_up_validation() -> Result<()> {
        let store = test_store().await?;
        let err = sqlx::query("INSERT INTO currency (code, name, exchange_rate) VALUES ('BAD', 'Bad', 0)")
            .execute(&store.pool)
            .await
            .unwrap_err();
        let mapped = map_insert_error(err, &NewCurrency::new("BAD", "Bad", 0.0));
        assert!(matches!(mapped, AppError::ValidationError { .. }));
        Ok(())
    }

    #[tokio::test]
    async fn test_find_by_code() -> Result<()> {
        let store = test_store().await?;
        let inserted = store.insert(&NewCurrency::new("JPY", "Japanese Yen", 162.5)).await?;

        let found = store.find_by_code("JPY").await?;
        assert_eq!(found, Some(inserted));

        let missing = store.find_by_code("NON").await?;
        assert!(missing.is_none());

        Ok(())
    }

    #[tokio::test]
    async fn test_closed_pool_is_connection_error() -> Result<()> {
        let pool = db::create_test_pool().await?;
        let store = CurrencyStore::new(pool.clone());
        pool.close().await;

        assert!(matches!(
            store.list_all().await,
            Err(AppError::ConnectionError(_))
        ));
        assert!(matches!(
            store.find_by_code("USD").await,
            Err(AppError::ConnectionError(_))
        ));
        assert!(matches!(
            store.insert(&NewCurrency::new("USD", "US Dollar", 1.1)).await,
            Err(AppError::ConnectionError(_))
        ));

        Ok(())
    }
}

// SPDX-FileCopyrightText: 2025 Joost van der Laan <joost@fashionunited.com>
//
// SPDX-License-Identifier: AGPL-3.0-only

use thiserror::Error;

/// Everything that can go wrong between the UI boundary and the database.
///
/// The `Display` text of each variant is what gets shown to the user.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("{message}")]
    InvalidInput { message: String },

    #[error("{message}")]
    MissingSelection { message: String },

    #[error("{message}")]
    ValidationError { message: String },

    #[error("Currency with code {code} already exists")]
    DuplicateKey { code: String },

    #[error("Failed to connect to the database. Please check your database connection. ({0})")]
    ConnectionError(#[from] sqlx::Error),

    #[error("Database migration failed: {0}")]
    MigrationError(#[from] sqlx::migrate::MigrateError),

    #[error("Arithmetic error: {message}")]
    Arithmetic { message: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),
}

impl AppError {
    pub fn invalid_input(message: impl Into<String>) -> Self {
        AppError::InvalidInput {
            message: message.into(),
        }
    }

    pub fn missing_selection(message: impl Into<String>) -> Self {
        AppError::MissingSelection {
            message: message.into(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        AppError::ValidationError {
            message: message.into(),
        }
    }

    pub fn arithmetic(message: impl Into<String>) -> Self {
        AppError::Arithmetic {
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, AppError>;

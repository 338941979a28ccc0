// SPDX-FileCopyrightText: 2025 Joost van der Laan <joost@fashionunited.com>
//
// SPDX-License-Identifier: AGPL-3.0-only

use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::models::NewCurrency;

pub const DEFAULT_DATABASE_URL: &str = "sqlite://currencies.db";

#[derive(Debug, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_database_url")]
    pub database_url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    /// Currencies inserted by the `seed` command
    #[serde(default = "default_currencies")]
    pub currencies: Vec<NewCurrency>,
}

fn default_database_url() -> String {
    DEFAULT_DATABASE_URL.to_string()
}

fn default_max_connections() -> u32 {
    1
}

fn default_currencies() -> Vec<NewCurrency> {
    vec![NewCurrency::new("EUR", "Euro", 1.0)]
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_url: default_database_url(),
            max_connections: default_max_connections(),
            currencies: default_currencies(),
        }
    }
}

impl Config {
    /// Apply the database URL overrides: the environment beats the file and
    /// the command line beats both.
    pub fn override_database_url(&mut self, env_url: Option<String>, cli_url: Option<String>) {
        if let Some(url) = env_url {
            debug!("Using DATABASE_URL from environment");
            self.database_url = url;
        }
        if let Some(url) = cli_url {
            debug!("Using database URL from the command line");
            self.database_url = url;
        }
    }
}

fn get_config_path() -> PathBuf {
    PathBuf::from("config.toml")
}

/// Load the configuration.
///
/// An explicit path must exist. Without one, `config.toml` in the working
/// directory is used when present and the defaults otherwise. `DATABASE_URL`
/// in the environment overrides the file, and `cli_database_url` overrides both.
pub fn load_config(path: Option<&Path>, cli_database_url: Option<String>) -> anyhow::Result<Config> {
    let mut config = match path {
        Some(path) => read_config(path)?,
        None => {
            let default_path = get_config_path();
            if default_path.exists() {
                read_config(&default_path)?
            } else {
                debug!("No config.toml found, using defaults");
                Config::default()
            }
        }
    };

    config.override_database_url(env::var("DATABASE_URL").ok(), cli_database_url);
    Ok(config)
}

fn read_config(path: &Path) -> anyhow::Result<Config> {
    let config_str = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    let config: Config = toml::from_str(&config_str)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
    debug!(path = %path.display(), "Loaded config");
    Ok(config)
}

pub fn save_config(config: &Config, path: &Path) -> anyhow::Result<()> {
    let config_str = toml::to_string_pretty(config)?;
    fs::write(path, config_str)
        .with_context(|| format!("Failed to write config file: {}", path.display()))?;
    Ok(())
}

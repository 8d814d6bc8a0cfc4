mod basic;
mod cors;
mod database;

pub use basic::BasicConfig;
pub use cors::CorsConfig;
pub use database::DatabaseConfig;

use crate::error::FoodpilotError;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Application configuration managed by Figment.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    /// Core server configuration (see `basic` table in config.toml).
    #[serde(default)]
    pub basic: BasicConfig,

    /// Embedded database settings (see `database` table in config.toml).
    #[serde(default)]
    pub database: DatabaseConfig,

    /// Cross-origin policy (see `cors` table in config.toml).
    #[serde(default)]
    pub cors: CorsConfig,
}

const DEFAULT_CONFIG_FILE: &str = "config.toml";
const ENV_PREFIX: &str = "FOODPILOT_";

impl Config {
    /// Builds a Figment that merges defaults, an optional config TOML file and
    /// `FOODPILOT_`-prefixed environment variables (`__` separates tables, e.g.
    /// `FOODPILOT_DATABASE__PATH`).
    pub fn figment() -> Figment {
        let figment = Figment::new().merge(Serialized::defaults(Config::default()));
        let figment = if PathBuf::from(DEFAULT_CONFIG_FILE).is_file() {
            figment.merge(Toml::file(DEFAULT_CONFIG_FILE))
        } else {
            figment
        };
        figment.merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    /// Loads configuration from all sources.
    pub fn load() -> Result<Self, FoodpilotError> {
        Self::from_figment(Self::figment())
    }

    pub fn from_figment(figment: Figment) -> Result<Self, FoodpilotError> {
        Ok(figment.extract()?)
    }
}

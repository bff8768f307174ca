//! Configuration management for the Branch Sales Ledger
//!
//! Supports hierarchical configuration loading:
//! 1. Default values in code
//! 2. Configuration files (development.toml, production.toml)
//! 3. Environment variable overrides with LEDGER_ prefix

use config::{ConfigError, Environment, File};
use serde::Deserialize;
use shared::ScopeKind;

/// Main application configuration
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Current environment (development, production)
    pub environment: String,

    /// Server configuration
    pub server: ServerConfig,

    /// Database configuration
    pub database: DatabaseConfig,

    /// Period report configuration
    pub reports: ReportsConfig,

    /// Aggregation query defaults and limits
    pub reporting: ReportingConfig,

    /// Log output configuration
    pub log: LogConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    /// Server port
    pub port: u16,

    /// Server host
    pub host: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    /// PostgreSQL connection URL
    pub url: String,

    /// Maximum number of connections in the pool
    pub max_connections: u32,

    /// Minimum number of connections in the pool
    pub min_connections: u32,

    /// Seconds to wait for a pooled connection
    pub acquire_timeout_secs: u64,

    /// Apply embedded migrations at startup outside development
    pub run_migrations: bool,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ReportsConfig {
    /// Entity that period reports are keyed against
    pub scope: ScopeKind,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ReportingConfig {
    /// Default `min` for the low-stock query
    pub low_stock_threshold: i32,

    /// Default ranking size for top products
    pub default_top: u32,

    /// Largest ranking size a caller may request
    pub max_top: u32,

    /// Default trailing window in days
    pub default_window_days: u32,

    /// Longest trailing window a caller may request
    pub max_window_days: u32,
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct LogConfig {
    pub format: LogFormat,
}

impl Config {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let environment =
            std::env::var("LEDGER_ENVIRONMENT").unwrap_or_else(|_| "development".into());

        let config = Self::defaults(config::Config::builder(), &environment)?
            // Load environment-specific config file
            .add_source(File::with_name(&format!("config/{}", environment)).required(false))
            // Override with environment variables (LEDGER_ prefix)
            .add_source(
                Environment::with_prefix("LEDGER")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }

    /// Code defaults only, with the given database URL
    pub fn with_database_url(url: &str) -> Result<Self, ConfigError> {
        Self::defaults(config::Config::builder(), "test")?
            .set_override("database.url", url)?
            .build()?
            .try_deserialize()
    }

    fn defaults(
        builder: config::ConfigBuilder<config::builder::DefaultState>,
        environment: &str,
    ) -> Result<config::ConfigBuilder<config::builder::DefaultState>, ConfigError> {
        builder
            .set_default("environment", environment)?
            .set_default("server.port", 3000)?
            .set_default("server.host", "0.0.0.0")?
            .set_default("database.max_connections", 10)?
            .set_default("database.min_connections", 2)?
            .set_default("database.acquire_timeout_secs", 30)?
            .set_default("database.run_migrations", false)?
            .set_default("reports.scope", "region")?
            .set_default("reporting.low_stock_threshold", 10)?
            .set_default("reporting.default_top", 10)?
            .set_default("reporting.max_top", 100)?
            .set_default("reporting.default_window_days", 30)?
            .set_default("reporting.max_window_days", 366)?
            .set_default("log.format", "pretty")
    }

    /// Migrations run in development or when explicitly enabled
    pub fn should_run_migrations(&self) -> bool {
        self.environment == "development" || self.database.run_migrations
    }
}

//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.tabledit/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::core::schema::Schema;

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct TableditConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub table: TableConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GeneralConfig {
    pub schema: Option<Schema>,
    pub log_file: Option<String>,
    pub log_level: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct DatabaseConfig {
    /// Full connection string; wins over the individual fields below.
    pub url: Option<String>,
    pub host: Option<String>,
    pub port: Option<u16>,
    pub user: Option<String>,
    pub password: Option<String>,
    pub dbname: Option<String>,
    pub sslmode: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct TableConfig {
    /// Visible table rows; also the PageUp/PageDown step.
    pub height: Option<u16>,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_HOST: &str = "localhost";
pub const DEFAULT_PORT: u16 = 5432;
pub const DEFAULT_USER: &str = "postgres";
pub const DEFAULT_DBNAME: &str = "postgres";
pub const DEFAULT_SSLMODE: &str = "disable";
pub const DEFAULT_TABLE_HEIGHT: u16 = 7;
pub const DEFAULT_LOG_FILE: &str = "tabledit.log";
pub const DEFAULT_LOG_LEVEL: &str = "info";

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedConfig {
    pub schema: Schema,
    /// libpq-style connection string handed to the Postgres client.
    pub connection_string: String,
    pub table_height: u16,
    pub log_file: String,
    pub log_level: String,
}

/// Values taken from the command line. `None` = flag not given.
#[derive(Debug, Default)]
pub struct CliOverrides<'a> {
    pub schema: Option<Schema>,
    pub database_url: Option<&'a str>,
    pub log_level: Option<&'a str>,
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("config parse error: {0}")]
    Parse(#[from] toml::de::Error),
}

// ============================================================================
// Loading
// ============================================================================

/// Returns the path to `~/.tabledit/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".tabledit").join("config.toml"))
}

/// Load config from `~/.tabledit/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `TableditConfig::default()`. If it exists but is malformed,
/// returns `ConfigError::Parse`.
pub fn load_config() -> Result<TableditConfig, ConfigError> {
    match config_path() {
        Some(path) => load_config_from(&path),
        None => {
            warn!("Could not determine home directory, using default config");
            Ok(TableditConfig::default())
        }
    }
}

/// Load config from an explicit path, generating a default file if missing.
pub fn load_config_from(path: &Path) -> Result<TableditConfig, ConfigError> {
    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(path);
        return Ok(TableditConfig::default());
    }

    let contents = fs::read_to_string(path)?;
    let config: TableditConfig = toml::from_str(&contents)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", redacted(&config));
    Ok(config)
}

/// Debug view of the config with the password masked.
fn redacted(config: &TableditConfig) -> String {
    let db = &config.database;
    format!(
        "general={:?} table={:?} database.url_set={} host={:?} port={:?} user={:?} dbname={:?} password_set={}",
        config.general,
        config.table,
        db.url.is_some(),
        db.host,
        db.port,
        db.user,
        db.dbname,
        db.password.is_some()
    )
}

const DEFAULT_CONFIG: &str = r#"# tabledit configuration
# All settings are optional; defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [general]
# schema = "todo"                  # "todo" (priority,task,due) or "records" (name,age)
# log_file = "tabledit.log"
# log_level = "info"               # "error", "warn", "info", "debug", "trace"

# [database]
# url = "postgresql://postgres@localhost/postgres"   # Or set DATABASE_URL
# host = "localhost"
# port = 5432
# user = "postgres"
# password = "secret"
# dbname = "postgres"
# sslmode = "disable"

# [table]
# height = 7                       # Visible rows; also the PageUp/PageDown step
"#;

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &Path) {
    if let Some(parent) = path.parent()
        && let Err(e) = fs::create_dir_all(parent)
    {
        warn!("Failed to create config directory: {}", e);
        return;
    }
    if let Err(e) = fs::write(path, DEFAULT_CONFIG) {
        warn!("Failed to write default config: {}", e);
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
pub fn resolve(config: &TableditConfig, cli: &CliOverrides<'_>) -> ResolvedConfig {
    resolve_with_env(config, cli, |key| std::env::var(key).ok())
}

fn resolve_with_env(
    config: &TableditConfig,
    cli: &CliOverrides<'_>,
    env: impl Fn(&str) -> Option<String>,
) -> ResolvedConfig {
    // Schema: CLI → env → config → default
    let schema = cli
        .schema
        .or_else(|| {
            env("TABLEDIT_SCHEMA").and_then(|s| match s.to_ascii_lowercase().as_str() {
                "records" => Some(Schema::Records),
                "todo" => Some(Schema::Todo),
                other => {
                    warn!("Ignoring unknown TABLEDIT_SCHEMA {:?}", other);
                    None
                }
            })
        })
        .or(config.general.schema)
        .unwrap_or_default();

    // Connection: CLI → env → config url → config fields
    let connection_string = cli
        .database_url
        .map(str::to_string)
        .or_else(|| env("DATABASE_URL"))
        .or_else(|| config.database.url.clone())
        .unwrap_or_else(|| connection_from_fields(&config.database));

    let log_level = cli
        .log_level
        .map(str::to_string)
        .or_else(|| env("TABLEDIT_LOG_LEVEL"))
        .or_else(|| config.general.log_level.clone())
        .unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string());

    ResolvedConfig {
        schema,
        connection_string,
        table_height: config
            .table
            .height
            .unwrap_or(DEFAULT_TABLE_HEIGHT)
            .max(1),
        log_file: config
            .general
            .log_file
            .clone()
            .unwrap_or_else(|| DEFAULT_LOG_FILE.to_string()),
        log_level,
    }
}

/// Build a `key=value` connection string, quoting values that need it.
fn connection_from_fields(db: &DatabaseConfig) -> String {
    let mut parts = vec![
        format!("host={}", quote(db.host.as_deref().unwrap_or(DEFAULT_HOST))),
        format!("port={}", db.port.unwrap_or(DEFAULT_PORT)),
        format!("user={}", quote(db.user.as_deref().unwrap_or(DEFAULT_USER))),
        format!("dbname={}", quote(db.dbname.as_deref().unwrap_or(DEFAULT_DBNAME))),
        format!("sslmode={}", quote(db.sslmode.as_deref().unwrap_or(DEFAULT_SSLMODE))),
    ];
    if let Some(password) = &db.password {
        parts.push(format!("password={}", quote(password)));
    }
    parts.join(" ")
}

fn quote(value: &str) -> String {
    if !value.is_empty() && !value.contains([' ', '\'', '\\']) {
        return value.to_string();
    }
    let escaped = value.replace('\\', "\\\\").replace('\'', "\\'");
    format!("'{escaped}'")
}

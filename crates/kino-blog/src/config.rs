//! Configuration loading from file and environment variables.

use kino_db::DbRuntimeSettings;
use serde::Deserialize;
use thiserror::Error;

/// Top-level configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Database settings.
    #[serde(default)]
    pub database: DatabaseConfig,

    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Work performed once the database is open.
    #[serde(default)]
    pub startup: StartupConfig,
}

/// Database configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// Path to the SQLite database file.
    #[serde(default = "default_db_path")]
    pub path: String,

    /// Busy timeout for SQLite connections, in milliseconds.
    #[serde(default = "default_busy_timeout_ms")]
    pub busy_timeout_ms: u64,

    /// Maximum number of pooled connections.
    #[serde(default = "default_pool_max_size")]
    pub pool_max_size: u32,
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "kino_blog=debug,info").
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Whether to output logs in JSON format.
    #[serde(default)]
    pub json: bool,
}

/// Optional startup jobs.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StartupConfig {
    /// Insert the demo dataset when the database is empty.
    #[serde(default)]
    pub seed: bool,

    /// Run the tag-assignment job after startup.
    #[serde(default)]
    pub assign_tags: bool,
}

fn default_db_path() -> String {
    "kino-blog.db".to_string()
}

fn default_busy_timeout_ms() -> u64 {
    DbRuntimeSettings::default().busy_timeout_ms
}

fn default_pool_max_size() -> u32 {
    DbRuntimeSettings::default().pool_max_size
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_db_path(),
            busy_timeout_ms: default_busy_timeout_ms(),
            pool_max_size: default_pool_max_size(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

impl DatabaseConfig {
    /// Pool tunables derived from this section.
    pub fn runtime_settings(&self) -> DbRuntimeSettings {
        DbRuntimeSettings {
            busy_timeout_ms: self.busy_timeout_ms,
            pool_max_size: self.pool_max_size,
        }
    }
}

/// Errors that can occur when loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read the configuration file.
    #[error("failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    /// Failed to parse the configuration file.
    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Loads configuration from a TOML file, falling back to defaults.
///
/// Environment variable overrides:
/// - `KINO_DB_PATH` overrides `database.path`
/// - `KINO_LOG_LEVEL` overrides `logging.level`
/// - `KINO_LOG_JSON` overrides `logging.json` (set to "true" to enable)
/// - `KINO_SEED` overrides `startup.seed`
/// - `KINO_ASSIGN_TAGS` overrides `startup.assign_tags`
///
/// # Errors
///
/// Returns `ConfigError` if the file exists but cannot be read or parsed.
pub fn load_config(path: Option<&str>) -> Result<Config, ConfigError> {
    let mut config = match path {
        Some(p) => match std::fs::read_to_string(p) {
            Ok(contents) => parse_config(&contents)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Config::default(),
            Err(e) => return Err(ConfigError::FileRead(e)),
        },
        None => Config::default(),
    };

    apply_env_overrides(&mut config, |key| std::env::var(key).ok());

    Ok(config)
}

fn parse_config(contents: &str) -> Result<Config, ConfigError> {
    Ok(toml::from_str(contents)?)
}

fn apply_env_overrides(config: &mut Config, var: impl Fn(&str) -> Option<String>) {
    if let Some(db_path) = var("KINO_DB_PATH") {
        config.database.path = db_path;
    }
    if let Some(level) = var("KINO_LOG_LEVEL") {
        config.logging.level = level;
    }
    if let Some(json) = var("KINO_LOG_JSON") {
        config.logging.json = is_truthy(&json);
    }
    if let Some(seed) = var("KINO_SEED") {
        config.startup.seed = is_truthy(&seed);
    }
    if let Some(assign) = var("KINO_ASSIGN_TAGS") {
        config.startup.assign_tags = is_truthy(&assign);
    }
}

fn is_truthy(value: &str) -> bool {
    value == "true" || value == "1"
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn defaults_when_file_missing() {
        let dir = tempfile::tempdir().expect("should create temp dir");
        let missing = dir.path().join("absent.toml");
        let config = load_config(missing.to_str()).expect("missing file means defaults");

        assert_eq!(config.database.path, "kino-blog.db");
        assert_eq!(config.database.busy_timeout_ms, 5_000);
        assert_eq!(config.logging.level, "info");
        assert!(!config.logging.json);
        assert!(!config.startup.seed);
        assert!(!config.startup.assign_tags);
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let config = parse_config(
            r#"
            [database]
            path = "/tmp/blog.db"

            [startup]
            seed = true
            "#,
        )
        .expect("config should parse");

        assert_eq!(config.database.path, "/tmp/blog.db");
        assert_eq!(config.database.pool_max_size, 4);
        assert!(config.startup.seed);
        assert!(!config.startup.assign_tags);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn invalid_toml_is_a_parse_error() {
        let err = parse_config("[database\npath = 1").expect_err("should fail to parse");
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn env_overrides_take_precedence() {
        let vars: HashMap<&str, &str> = [
            ("KINO_DB_PATH", "override.db"),
            ("KINO_LOG_LEVEL", "debug"),
            ("KINO_LOG_JSON", "1"),
            ("KINO_SEED", "true"),
            ("KINO_ASSIGN_TAGS", "no"),
        ]
        .into_iter()
        .collect();

        let mut config = Config::default();
        config.startup.assign_tags = true;
        apply_env_overrides(&mut config, |key| vars.get(key).map(|v| v.to_string()));

        assert_eq!(config.database.path, "override.db");
        assert_eq!(config.logging.level, "debug");
        assert!(config.logging.json);
        assert!(config.startup.seed);
        assert!(!config.startup.assign_tags);
    }

    #[test]
    fn runtime_settings_follow_database_section() {
        let config = parse_config("[database]\nbusy_timeout_ms = 250\npool_max_size = 2")
            .expect("config should parse");
        assert_eq!(
            config.database.runtime_settings(),
            DbRuntimeSettings {
                busy_timeout_ms: 250,
                pool_max_size: 2,
            }
        );
    }
}

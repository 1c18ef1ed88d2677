//! Environment-backed configuration for the server and the client.
//!
//! All values are optional and fall back to defaults suitable for local
//! development. Parsing goes through a lookup closure so callers (and tests)
//! decide where values come from; [`ServerConfig::from_env`] and
//! [`ClientConfig::from_env`] read the process environment.

use axum::http::HeaderValue;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

/// Errors raised while reading configuration values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// A variable holds a value that cannot be parsed.
    #[error("invalid value '{value}' for {key}: {reason}")]
    InvalidValue {
        /// Variable name.
        key: &'static str,
        /// Rejected raw value.
        value: String,
        /// Why the value was rejected.
        reason: String,
    },
}

impl ConfigError {
    fn invalid(key: &'static str, value: &str, reason: impl fmt::Display) -> Self {
        Self::InvalidValue {
            key,
            value: value.to_owned(),
            reason: reason.to_string(),
        }
    }
}

/// Where the server keeps task rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StorageMode {
    /// `PostgreSQL` through a pooled Diesel connection.
    #[default]
    Postgres,
    /// Process-local storage; rows are lost on restart.
    Memory,
}

impl FromStr for StorageMode {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "postgres" | "postgresql" => Ok(Self::Postgres),
            "memory" | "in_memory" => Ok(Self::Memory),
            other => Err(format!("unknown storage mode '{other}', expected postgres or memory")),
        }
    }
}

/// Cross-origin policy for browser clients.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum AllowedOrigin {
    /// Any origin may call the API.
    #[default]
    Any,
    /// Only the given origin may call the API.
    Exact(HeaderValue),
}

impl FromStr for AllowedOrigin {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let trimmed = raw.trim();
        if trimmed == "*" {
            return Ok(Self::Any);
        }
        HeaderValue::from_str(trimmed)
            .map(Self::Exact)
            .map_err(|err| err.to_string())
    }
}

/// Connection settings for the `PostgreSQL` store.
#[derive(Clone, PartialEq, Eq)]
pub struct DatabaseConfig {
    /// Server host name.
    pub host: String,
    /// Server port.
    pub port: u16,
    /// Login role.
    pub user: String,
    /// Login password.
    pub password: String,
    /// Database holding the task table.
    pub name: String,
    /// Maximum number of pooled connections.
    pub pool_size: u32,
}

impl DatabaseConfig {
    /// Database used to create the task database when it is missing.
    pub const MAINTENANCE_DATABASE: &'static str = "postgres";

    /// Returns a libpq connection string for the task database.
    #[must_use]
    pub fn connection_string(&self) -> String {
        self.connection_string_for(&self.name)
    }

    /// Returns a libpq connection string for the maintenance database.
    #[must_use]
    pub fn maintenance_connection_string(&self) -> String {
        self.connection_string_for(Self::MAINTENANCE_DATABASE)
    }

    fn connection_string_for(&self, database: &str) -> String {
        format!(
            "host={} port={} user={} password={} dbname={}",
            quote_conninfo(&self.host),
            self.port,
            quote_conninfo(&self.user),
            quote_conninfo(&self.password),
            quote_conninfo(database),
        )
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            host: "localhost".to_owned(),
            port: 5432,
            user: "postgres".to_owned(),
            password: "postgres".to_owned(),
            name: "task_db".to_owned(),
            pool_size: 10,
        }
    }
}

impl fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DatabaseConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("user", &self.user)
            .field("password", &"<redacted>")
            .field("name", &self.name)
            .field("pool_size", &self.pool_size)
            .finish()
    }
}

/// Quotes a libpq keyword value so spaces, quotes, and backslashes survive.
fn quote_conninfo(value: &str) -> String {
    let mut quoted = String::with_capacity(value.len() + 2);
    quoted.push('\'');
    for ch in value.chars() {
        if ch == '\'' || ch == '\\' {
            quoted.push('\\');
        }
        quoted.push(ch);
    }
    quoted.push('\'');
    quoted
}

/// Server process configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Storage backend.
    pub storage: StorageMode,
    /// Database settings, used when `storage` is [`StorageMode::Postgres`].
    pub database: DatabaseConfig,
    /// TCP port the API listens on.
    pub port: u16,
    /// Cross-origin policy.
    pub cors_origin: AllowedOrigin,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            storage: StorageMode::default(),
            database: DatabaseConfig::default(),
            port: 5000,
            cors_origin: AllowedOrigin::default(),
        }
    }
}

impl ServerConfig {
    /// Reads the configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] when a variable is present but
    /// malformed.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads the configuration through `lookup`.
    ///
    /// Empty and whitespace-only values count as absent.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] when a variable is present but
    /// malformed.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let lookup_value = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_owned())
                .filter(|value| !value.is_empty())
        };

        let database = DatabaseConfig {
            host: lookup_value("DB_HOST").unwrap_or(defaults.database.host),
            port: parse_or("DB_PORT", lookup_value("DB_PORT"), defaults.database.port)?,
            user: lookup_value("DB_USER").unwrap_or(defaults.database.user),
            password: lookup("DB_PASSWORD").unwrap_or(defaults.database.password),
            name: lookup_value("DB_NAME").unwrap_or(defaults.database.name),
            pool_size: parse_positive(
                "DB_POOL_SIZE",
                lookup_value("DB_POOL_SIZE"),
                defaults.database.pool_size,
            )?,
        };

        Ok(Self {
            storage: parse_or("STORAGE_MODE", lookup_value("STORAGE_MODE"), defaults.storage)?,
            database,
            port: parse_or("PORT", lookup_value("PORT"), defaults.port)?,
            cors_origin: parse_or(
                "CORS_ORIGIN",
                lookup_value("CORS_ORIGIN"),
                defaults.cors_origin,
            )?,
        })
    }
}

/// Client configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base URL of the task API, without a trailing slash.
    pub base_url: String,
    /// Upper bound on each request, including reading the response body.
    pub timeout: Duration,
}

impl ClientConfig {
    /// Default per-request timeout.
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(8);

    /// Reads the configuration from the process environment.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads the configuration through `lookup`.
    #[must_use]
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let base_url = lookup("TASKBOARD_API_BASE_URL")
            .map(|value| value.trim().trim_end_matches('/').to_owned())
            .filter(|value| !value.is_empty())
            .unwrap_or_else(|| Self::default().base_url);
        Self {
            base_url,
            timeout: Self::DEFAULT_TIMEOUT,
        }
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5000".to_owned(),
            timeout: Self::DEFAULT_TIMEOUT,
        }
    }
}

fn parse_or<T>(key: &'static str, raw: Option<String>, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    raw.map_or(Ok(default), |value| {
        value
            .parse::<T>()
            .map_err(|err| ConfigError::invalid(key, &value, err))
    })
}

fn parse_positive(key: &'static str, raw: Option<String>, default: u32) -> Result<u32, ConfigError> {
    let parsed = parse_or(key, raw, default)?;
    if parsed == 0 {
        return Err(ConfigError::invalid(key, "0", "must be greater than zero"));
    }
    Ok(parsed)
}

#[cfg(test)]
mod tests {
    use super::{AllowedOrigin, ClientConfig, ConfigError, ServerConfig, StorageMode};
    use rstest::rstest;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let values: HashMap<String, String> = pairs
            .iter()
            .map(|(key, value)| ((*key).to_owned(), (*value).to_owned()))
            .collect();
        move |key| values.get(key).cloned()
    }

    #[rstest]
    fn server_config_defaults_when_environment_is_empty() {
        let config = ServerConfig::from_lookup(lookup_from(&[])).expect("defaults are valid");

        assert_eq!(config, ServerConfig::default());
        assert_eq!(config.port, 5000);
        assert_eq!(config.storage, StorageMode::Postgres);
        assert_eq!(config.cors_origin, AllowedOrigin::Any);
        assert_eq!(config.database.name, "task_db");
        assert_eq!(config.database.pool_size, 10);
    }

    #[rstest]
    fn server_config_reads_every_variable() {
        let config = ServerConfig::from_lookup(lookup_from(&[
            ("STORAGE_MODE", "memory"),
            ("DB_HOST", "db.internal"),
            ("DB_PORT", "6543"),
            ("DB_USER", "tasks"),
            ("DB_PASSWORD", "s3cret"),
            ("DB_NAME", "tasks_prod"),
            ("DB_POOL_SIZE", "4"),
            ("PORT", "8080"),
            ("CORS_ORIGIN", "https://tasks.example.com"),
        ]))
        .expect("valid configuration");

        assert_eq!(config.storage, StorageMode::Memory);
        assert_eq!(config.database.host, "db.internal");
        assert_eq!(config.database.port, 6543);
        assert_eq!(config.database.user, "tasks");
        assert_eq!(config.database.password, "s3cret");
        assert_eq!(config.database.name, "tasks_prod");
        assert_eq!(config.database.pool_size, 4);
        assert_eq!(config.port, 8080);
        assert!(matches!(config.cors_origin, AllowedOrigin::Exact(ref origin)
            if origin == "https://tasks.example.com"));
    }

    #[rstest]
    #[case("PORT", "eighty")]
    #[case("DB_PORT", "70000")]
    #[case("DB_POOL_SIZE", "0")]
    #[case("STORAGE_MODE", "redis")]
    fn server_config_rejects_malformed_values(#[case] key: &str, #[case] value: &str) {
        let result = ServerConfig::from_lookup(lookup_from(&[(key, value)]));

        assert!(matches!(
            result,
            Err(ConfigError::InvalidValue { key: rejected, .. }) if rejected == key
        ));
    }

    #[rstest]
    fn blank_values_fall_back_to_defaults() {
        let config = ServerConfig::from_lookup(lookup_from(&[("PORT", "   "), ("DB_HOST", "")]))
            .expect("blank values are ignored");

        assert_eq!(config.port, 5000);
        assert_eq!(config.database.host, "localhost");
    }

    #[rstest]
    fn connection_string_quotes_values() {
        let mut config = ServerConfig::default();
        config.database.password = "it's a \\secret".to_owned();

        let conninfo = config.database.connection_string();

        assert_eq!(
            conninfo,
            "host='localhost' port=5432 user='postgres' password='it\\'s a \\\\secret' dbname='task_db'"
        );
        assert!(config.database.maintenance_connection_string().ends_with("dbname='postgres'"));
    }

    #[rstest]
    fn database_debug_output_redacts_password() {
        let rendered = format!("{:?}", ServerConfig::default().database);

        assert!(rendered.contains("<redacted>"));
        assert!(!rendered.contains("password: \"postgres\""));
    }

    #[rstest]
    fn client_config_trims_trailing_slash() {
        let config = ClientConfig::from_lookup(lookup_from(&[(
            "TASKBOARD_API_BASE_URL",
            "http://tasks.local:9000/",
        )]));

        assert_eq!(config.base_url, "http://tasks.local:9000");
        assert_eq!(config.timeout, ClientConfig::DEFAULT_TIMEOUT);
    }

    #[rstest]
    fn client_config_defaults_to_local_server() {
        assert_eq!(
            ClientConfig::from_lookup(lookup_from(&[])),
            ClientConfig::default()
        );
    }
}

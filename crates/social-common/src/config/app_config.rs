//! Application configuration structs
//!
//! Loads configuration from environment variables (and a `.env` file when
//! present).

use serde::Deserialize;
use std::env;
use std::str::FromStr;
use std::time::Duration;

/// Main application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub app: AppSettings,
    pub database: DatabaseConfig,
    pub store: StoreConfig,
}

/// General application settings
#[derive(Debug, Clone, Deserialize)]
pub struct AppSettings {
    #[serde(default = "default_app_name")]
    pub name: String,
    #[serde(default = "default_env")]
    pub env: Environment,
}

/// Environment type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
}

impl Environment {
    #[must_use]
    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }

    #[must_use]
    pub fn is_development(&self) -> bool {
        matches!(self, Self::Development)
    }
}

impl FromStr for Environment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "production" => Ok(Self::Production),
            "staging" => Ok(Self::Staging),
            "development" => Ok(Self::Development),
            other => Err(format!("unknown environment `{other}`")),
        }
    }
}

/// Database connection pool configuration
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
    #[serde(default = "default_acquire_timeout_secs")]
    pub acquire_timeout_secs: u64,
    #[serde(default = "default_idle_timeout_secs")]
    pub idle_timeout_secs: u64,
    #[serde(default = "default_max_lifetime_secs")]
    pub max_lifetime_secs: u64,
}

impl DatabaseConfig {
    /// Config for `url` with default pool sizing
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            max_connections: default_max_connections(),
            min_connections: default_min_connections(),
            acquire_timeout_secs: default_acquire_timeout_secs(),
            idle_timeout_secs: default_idle_timeout_secs(),
            max_lifetime_secs: default_max_lifetime_secs(),
        }
    }

    #[must_use]
    pub fn acquire_timeout(&self) -> Duration {
        Duration::from_secs(self.acquire_timeout_secs)
    }

    #[must_use]
    pub fn idle_timeout(&self) -> Duration {
        Duration::from_secs(self.idle_timeout_secs)
    }

    #[must_use]
    pub fn max_lifetime(&self) -> Duration {
        Duration::from_secs(self.max_lifetime_secs)
    }
}

/// Transaction isolation level requested for multi-step workflows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IsolationLevel {
    ReadCommitted,
    RepeatableRead,
    Serializable,
}

impl IsolationLevel {
    /// SQL keyword form, e.g. `REPEATABLE READ`
    #[must_use]
    pub fn as_sql(&self) -> &'static str {
        match self {
            Self::ReadCommitted => "READ COMMITTED",
            Self::RepeatableRead => "REPEATABLE READ",
            Self::Serializable => "SERIALIZABLE",
        }
    }
}

impl FromStr for IsolationLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace(' ', "_").as_str() {
            "read_committed" => Ok(Self::ReadCommitted),
            "repeatable_read" => Ok(Self::RepeatableRead),
            "serializable" => Ok(Self::Serializable),
            other => Err(format!("unknown isolation level `{other}`")),
        }
    }
}

/// Repository behaviour configuration
#[derive(Debug, Clone, Deserialize)]
pub struct StoreConfig {
    /// Deadline for every repository call
    #[serde(default = "default_query_timeout_secs")]
    pub query_timeout_secs: u64,
    /// Lifetime of a freshly issued invitation
    #[serde(default = "default_invitation_ttl_hours")]
    pub invitation_ttl_hours: u64,
    /// `None` keeps the store's default isolation
    #[serde(default)]
    pub isolation_level: Option<IsolationLevel>,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            query_timeout_secs: default_query_timeout_secs(),
            invitation_ttl_hours: default_invitation_ttl_hours(),
            isolation_level: None,
        }
    }
}

impl StoreConfig {
    #[must_use]
    pub fn query_timeout(&self) -> Duration {
        Duration::from_secs(self.query_timeout_secs)
    }

    /// Saturates for hour counts beyond `u64` seconds; the env loader
    /// rejects those up front
    #[must_use]
    pub fn invitation_ttl(&self) -> Duration {
        Duration::from_secs(self.invitation_ttl_hours.saturating_mul(SECS_PER_HOUR))
    }
}

const SECS_PER_HOUR: u64 = 3600;

fn parse_ttl_hours<F>(lookup: &F) -> Result<u64, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let hours =
        parse_var(lookup, "INVITATION_TTL_HOURS")?.unwrap_or_else(default_invitation_ttl_hours);
    hours.checked_mul(SECS_PER_HOUR).map(|_| hours).ok_or_else(|| {
        ConfigError::InvalidValue("INVITATION_TTL_HOURS", format!("{hours} hours is out of range"))
    })
}

// Default value functions
fn default_app_name() -> String {
    "social-store".to_string()
}

fn default_env() -> Environment {
    Environment::Development
}

fn default_max_connections() -> u32 {
    30
}

fn default_min_connections() -> u32 {
    1
}

fn default_acquire_timeout_secs() -> u64 {
    10
}

fn default_idle_timeout_secs() -> u64 {
    900 // 15 minutes
}

fn default_max_lifetime_secs() -> u64 {
    1800
}

fn default_query_timeout_secs() -> u64 {
    5
}

fn default_invitation_ttl_hours() -> u64 {
    72 // 3 days
}

/// Parse an optional variable, rejecting values that are present but malformed
fn parse_var<T, F>(lookup: &F, key: &'static str) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        None => Ok(None),
        Some(raw) if raw.trim().is_empty() => Ok(None),
        Some(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|e: T::Err| ConfigError::InvalidValue(key, e.to_string())),
    }
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    /// Returns an error if required environment variables are missing or
    /// a variable holds a malformed value
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup
    ///
    /// # Errors
    /// Same as [`AppConfig::from_env`]
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        Ok(Self {
            app: AppSettings {
                name: lookup("APP_NAME").unwrap_or_else(default_app_name),
                env: parse_var(&lookup, "APP_ENV")?.unwrap_or_else(default_env),
            },
            database: DatabaseConfig {
                url: lookup("DATABASE_URL").ok_or(ConfigError::MissingVar("DATABASE_URL"))?,
                max_connections: parse_var(&lookup, "DATABASE_MAX_CONNECTIONS")?
                    .unwrap_or_else(default_max_connections),
                min_connections: parse_var(&lookup, "DATABASE_MIN_CONNECTIONS")?
                    .unwrap_or_else(default_min_connections),
                acquire_timeout_secs: parse_var(&lookup, "DATABASE_ACQUIRE_TIMEOUT_SECS")?
                    .unwrap_or_else(default_acquire_timeout_secs),
                idle_timeout_secs: parse_var(&lookup, "DATABASE_IDLE_TIMEOUT_SECS")?
                    .unwrap_or_else(default_idle_timeout_secs),
                max_lifetime_secs: parse_var(&lookup, "DATABASE_MAX_LIFETIME_SECS")?
                    .unwrap_or_else(default_max_lifetime_secs),
            },
            store: StoreConfig {
                query_timeout_secs: parse_var(&lookup, "STORE_QUERY_TIMEOUT_SECS")?
                    .unwrap_or_else(default_query_timeout_secs),
                invitation_ttl_hours: parse_ttl_hours(&lookup)?,
                isolation_level: parse_var(&lookup, "STORE_ISOLATION_LEVEL")?,
            },
        })
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingVar(&'static str),

    #[error("Invalid value for {0}: {1}")]
    InvalidValue(&'static str, String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_environment_is_production() {
        assert!(!Environment::Development.is_production());
        assert!(!Environment::Staging.is_production());
        assert!(Environment::Production.is_production());
    }

    #[test]
    fn test_environment_is_development() {
        assert!(Environment::Development.is_development());
        assert!(!Environment::Staging.is_development());
        assert!(!Environment::Production.is_development());
    }

    #[test]
    fn test_defaults_when_only_url_set() {
        let config =
            AppConfig::from_lookup(lookup_from(&[("DATABASE_URL", "postgres://localhost/social")]))
                .unwrap();

        assert_eq!(config.app.name, "social-store");
        assert_eq!(config.app.env, Environment::Development);
        assert_eq!(config.database.max_connections, 30);
        assert_eq!(config.store.query_timeout(), Duration::from_secs(5));
        assert_eq!(config.store.invitation_ttl(), Duration::from_secs(72 * 3600));
        assert_eq!(config.store.isolation_level, None);
    }

    #[test]
    fn test_missing_database_url() {
        let err = AppConfig::from_lookup(lookup_from(&[])).unwrap_err();
        assert!(matches!(err, ConfigError::MissingVar("DATABASE_URL")));
    }

    #[test]
    fn test_overrides() {
        let config = AppConfig::from_lookup(lookup_from(&[
            ("DATABASE_URL", "postgres://db/social"),
            ("APP_ENV", "Production"),
            ("STORE_QUERY_TIMEOUT_SECS", "2"),
            ("INVITATION_TTL_HOURS", "1"),
            ("STORE_ISOLATION_LEVEL", "serializable"),
        ]))
        .unwrap();

        assert!(config.app.env.is_production());
        assert_eq!(config.store.query_timeout(), Duration::from_secs(2));
        assert_eq!(config.store.invitation_ttl(), Duration::from_secs(3600));
        assert_eq!(config.store.isolation_level, Some(IsolationLevel::Serializable));
    }

    #[test]
    fn test_malformed_value_is_rejected() {
        let err = AppConfig::from_lookup(lookup_from(&[
            ("DATABASE_URL", "postgres://db/social"),
            ("STORE_QUERY_TIMEOUT_SECS", "soon"),
        ]))
        .unwrap_err();

        assert!(matches!(
            err,
            ConfigError::InvalidValue("STORE_QUERY_TIMEOUT_SECS", _)
        ));
    }

    #[test]
    fn test_invitation_ttl_overflow_is_rejected() {
        let huge = (u64::MAX / 3600 + 1).to_string();
        let err = AppConfig::from_lookup(lookup_from(&[
            ("DATABASE_URL", "postgres://db/social"),
            ("INVITATION_TTL_HOURS", huge.as_str()),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue("INVITATION_TTL_HOURS", _)));

        let store = StoreConfig {
            invitation_ttl_hours: u64::MAX,
            ..StoreConfig::default()
        };
        assert_eq!(store.invitation_ttl(), Duration::from_secs(u64::MAX));
    }

    #[test]
    fn test_isolation_level_sql() {
        assert_eq!(
            "repeatable read".parse::<IsolationLevel>().unwrap().as_sql(),
            "REPEATABLE READ"
        );
        assert!("chaotic".parse::<IsolationLevel>().is_err());
    }
}

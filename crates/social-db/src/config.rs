//! Per-repository settings injected at construction

use std::time::Duration;

use social_common::{IsolationLevel, StoreConfig};

/// Settings shared by every PostgreSQL repository
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RepositoryConfig {
    /// Deadline applied to each repository call, workflows included
    pub query_timeout: Duration,
    /// Isolation for multi-step workflows; `None` keeps the server default
    pub isolation_level: Option<IsolationLevel>,
}

impl Default for RepositoryConfig {
    fn default() -> Self {
        Self::from(&StoreConfig::default())
    }
}

impl From<&StoreConfig> for RepositoryConfig {
    fn from(config: &StoreConfig) -> Self {
        Self {
            query_timeout: config.query_timeout(),
            isolation_level: config.isolation_level,
        }
    }
}

impl RepositoryConfig {
    /// Override the per-call deadline
    pub fn with_query_timeout(mut self, timeout: Duration) -> Self {
        self.query_timeout = timeout;
        self
    }

    /// Override the workflow isolation level
    pub fn with_isolation_level(mut self, level: IsolationLevel) -> Self {
        self.isolation_level = Some(level);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_follows_store_config() {
        let config = RepositoryConfig::default();
        assert_eq!(config.query_timeout, Duration::from_secs(5));
        assert_eq!(config.isolation_level, None);
    }

    #[test]
    fn test_overrides() {
        let config = RepositoryConfig::default()
            .with_query_timeout(Duration::from_millis(250))
            .with_isolation_level(IsolationLevel::Serializable);
        assert_eq!(config.query_timeout, Duration::from_millis(250));
        assert_eq!(config.isolation_level, Some(IsolationLevel::Serializable));
    }
}

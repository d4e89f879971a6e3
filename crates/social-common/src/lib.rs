//! # social-common
//!
//! Shared utilities: configuration, password hashing, and telemetry.

pub mod auth;
pub mod config;
pub mod telemetry;

// Re-export commonly used types at crate root
pub use auth::{hash_password, validate_password_strength, verify_password, PasswordService};
pub use config::{
    AppConfig, AppSettings, ConfigError, DatabaseConfig, Environment, IsolationLevel, StoreConfig,
};
pub use telemetry::{
    init_tracing, init_tracing_with_config, try_init_tracing_with_config, TracingConfig,
    TracingError,
};

//! Configuration for the registration service.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::fmt;
use std::time::Duration;

/// Service configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Registration database configuration
    #[serde(default)]
    pub database: DatabaseConfig,

    /// Session cookie and feedback configuration
    #[serde(default)]
    pub session: SessionConfig,

    /// Logging configuration
    #[serde(default)]
    pub log: LogConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Server listen address
    #[serde(default = "default_listen_addr")]
    pub listen_addr: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// Connection URL understood by the sqlx `any` driver (MySQL or SQLite)
    #[serde(default = "default_database_url")]
    pub url: String,
}

#[derive(Clone, Deserialize)]
pub struct SessionConfig {
    /// HMAC key for session cookies. A random key is generated when unset.
    #[serde(default)]
    pub secret: Option<String>,

    /// Name of the session cookie
    #[serde(default = "default_cookie_name")]
    pub cookie_name: String,

    /// How long unread feedback (and the cookie) stays valid
    #[serde(default = "default_session_ttl", with = "humantime_serde")]
    pub ttl: Duration,

    /// How often expired feedback is purged
    #[serde(default = "default_cleanup_interval", with = "humantime_serde")]
    pub cleanup_interval: Duration,
}

impl fmt::Debug for SessionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionConfig")
            .field("secret", &self.secret.as_ref().map(|_| "[REDACTED]"))
            .field("cookie_name", &self.cookie_name)
            .field("ttl", &self.ttl)
            .field("cleanup_interval", &self.cleanup_interval)
            .finish()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    /// Log level
    #[serde(default = "default_log_level")]
    pub level: String,
}

// Default implementations
impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_addr: default_listen_addr(),
            port: default_port(),
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: default_database_url(),
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            secret: None,
            cookie_name: default_cookie_name(),
            ttl: default_session_ttl(),
            cleanup_interval: default_cleanup_interval(),
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

// Default value functions
fn default_listen_addr() -> String {
    "0.0.0.0".into()
}

fn default_port() -> u16 {
    8080
}

fn default_database_url() -> String {
    "sqlite://registration.db?mode=rwc".into()
}

fn default_cookie_name() -> String {
    "storefront_session".into()
}

fn default_session_ttl() -> Duration {
    Duration::from_secs(600)
}

fn default_cleanup_interval() -> Duration {
    Duration::from_secs(60)
}

fn default_log_level() -> String {
    "info".into()
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Nested keys use `__` as separator, e.g. `DATABASE__URL` or `SESSION__TTL=15m`.
    pub fn load() -> Result<Self> {
        // Load .env file if present
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .separator("__")
                    .try_parsing(false),
            )
            .build()
            .context("Failed to build configuration")?;

        config
            .try_deserialize()
            .context("Failed to deserialize configuration")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let session = SessionConfig::default();
        assert!(session.secret.is_none());
        assert_eq!(session.cookie_name, "storefront_session");
        assert_eq!(session.ttl, Duration::from_secs(600));

        let server = ServerConfig::default();
        assert_eq!(server.port, 8080);

        assert!(DatabaseConfig::default().url.starts_with("sqlite:"));
        assert_eq!(LogConfig::default().level, "info");
    }

    #[test]
    fn test_session_debug_redacts_secret() {
        let session = SessionConfig {
            secret: Some("hunter2-hunter2".into()),
            ..SessionConfig::default()
        };

        let rendered = format!("{:?}", session);
        assert!(!rendered.contains("hunter2"));
        assert!(rendered.contains("[REDACTED]"));
    }

    #[test]
    fn test_deserialize_humantime_ttl() {
        let config = config::Config::builder()
            .set_override("session.ttl", "15m")
            .unwrap()
            .set_override("server.port", 9000)
            .unwrap()
            .build()
            .unwrap();

        let config: Config = config.try_deserialize().unwrap();
        assert_eq!(config.session.ttl, Duration::from_secs(900));
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.database.url, default_database_url());
    }
}

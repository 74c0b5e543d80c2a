#![deny(unsafe_code)]

//! Configuration loading and validation for banstat.
//!
//! Loads TOML configuration files and validates them against expected
//! schemas. Provides the [`AppConfig`] type as the central configuration
//! structure. Every field has a serde default, so an empty (or absent)
//! config file yields a fully usable configuration.

use std::path::Path;

use serde::{Deserialize, Serialize};

/// Errors that can occur during configuration loading and validation.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("validation error: {0}")]
    Validation(String),
}

/// Top-level application configuration.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// HTTP server configuration.
    #[serde(default)]
    pub server: ServerConfig,

    /// Control-tool invocation configuration.
    #[serde(default)]
    pub fail2ban: Fail2banConfig,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Configuration for the HTTP listener.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Address the API listens on.
    #[serde(default = "default_listen_addr")]
    pub listen_addr: String,

    /// Port the API listens on.
    #[serde(default = "default_listen_port")]
    pub listen_port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_addr: default_listen_addr(),
            listen_port: default_listen_port(),
        }
    }
}

fn default_listen_addr() -> String {
    "127.0.0.1".to_string()
}

fn default_listen_port() -> u16 {
    9100
}

/// Configuration for the `fail2ban-client` invocation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Fail2banConfig {
    /// Control-tool binary, resolved via PATH unless absolute.
    #[serde(default = "default_fail2ban_binary")]
    pub binary: String,

    /// Wall-clock deadline per invocation, in seconds.
    #[serde(default = "default_fail2ban_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for Fail2banConfig {
    fn default() -> Self {
        Self {
            binary: default_fail2ban_binary(),
            timeout_secs: default_fail2ban_timeout_secs(),
        }
    }
}

fn default_fail2ban_binary() -> String {
    "fail2ban-client".to_string()
}

fn default_fail2ban_timeout_secs() -> u64 {
    5
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g. "info", "debug", "trace").
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

impl AppConfig {
    /// Load configuration from a TOML file at the given path using async I/O.
    pub async fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = tokio::fs::read_to_string(path).await?;
        let config: AppConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse configuration from a TOML string.
    pub fn parse(s: &str) -> Result<Self, ConfigError> {
        let config: AppConfig = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.listen_port == 0 {
            return Err(ConfigError::Validation(
                "server.listen_port must be non-zero".to_string(),
            ));
        }
        if self.server.listen_addr.is_empty() {
            return Err(ConfigError::Validation(
                "server.listen_addr must not be empty".to_string(),
            ));
        }
        if self.fail2ban.binary.is_empty() {
            return Err(ConfigError::Validation(
                "fail2ban.binary must not be empty".to_string(),
            ));
        }
        if self.fail2ban.timeout_secs == 0 {
            return Err(ConfigError::Validation(
                "fail2ban.timeout_secs must be non-zero".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.server.listen_addr, "127.0.0.1");
        assert_eq!(config.server.listen_port, 9100);
        assert_eq!(config.fail2ban.binary, "fail2ban-client");
        assert_eq!(config.fail2ban.timeout_secs, 5);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_parse_minimal_toml() {
        let config = AppConfig::parse("").unwrap();
        assert_eq!(config.server.listen_port, 9100);
        assert_eq!(config.fail2ban.binary, "fail2ban-client");
    }

    #[test]
    fn test_parse_full_toml() {
        let toml = r#"
            [server]
            listen_addr = "0.0.0.0"
            listen_port = 8080

            [fail2ban]
            binary = "/usr/local/bin/fail2ban-client"
            timeout_secs = 30

            [logging]
            level = "debug"
        "#;
        let config = AppConfig::parse(toml).unwrap();
        assert_eq!(config.server.listen_addr, "0.0.0.0");
        assert_eq!(config.server.listen_port, 8080);
        assert_eq!(config.fail2ban.binary, "/usr/local/bin/fail2ban-client");
        assert_eq!(config.fail2ban.timeout_secs, 30);
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn test_validation_rejects_zero_port() {
        let toml = r#"
            [server]
            listen_port = 0
        "#;
        assert!(AppConfig::parse(toml).is_err());
    }

    #[test]
    fn test_validation_rejects_empty_addr() {
        let toml = r#"
            [server]
            listen_addr = ""
        "#;
        assert!(AppConfig::parse(toml).is_err());
    }

    #[test]
    fn test_validation_rejects_empty_binary() {
        let toml = r#"
            [fail2ban]
            binary = ""
        "#;
        assert!(AppConfig::parse(toml).is_err());
    }

    #[test]
    fn test_validation_rejects_zero_timeout() {
        let toml = r#"
            [fail2ban]
            timeout_secs = 0
        "#;
        assert!(AppConfig::parse(toml).is_err());
    }

    #[tokio::test]
    async fn test_load_from_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("banstat.toml");
        tokio::fs::write(&path, b"[server]\nlisten_port = 4242\n")
            .await
            .unwrap();

        let config = AppConfig::load(&path).await.unwrap();
        assert_eq!(config.server.listen_port, 4242);
    }

    #[tokio::test]
    async fn test_load_nonexistent_file() {
        let result = AppConfig::load(Path::new("/nonexistent/banstat.toml")).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_load_invalid_toml_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("bad.toml");
        tokio::fs::write(&path, b"not valid toml [[[").await.unwrap();

        assert!(AppConfig::load(&path).await.is_err());
    }

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::Validation("bad value".to_string());
        assert_eq!(err.to_string(), "validation error: bad value");
    }
}

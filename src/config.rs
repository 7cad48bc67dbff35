use serde::{Deserialize, Serialize};
use std::env;

use crate::error::{AppError, AppResult};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub database: DatabaseConfig,
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub app: AppInfoConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// File receiving one pipe-delimited line per request
    pub access_log_path: String,
    /// First field of every access line
    pub source_tag: String,
}

/// Labels for the `app_version` gauge
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppInfoConfig {
    pub version: String,
    pub environment: String,
}

impl Config {
    pub fn from_env() -> AppResult<Self> {
        Ok(Self {
            database: DatabaseConfig {
                url: var_or("DATABASE_URL", "sqlite:comments.db"),
            },
            server: ServerConfig {
                host: var_or("SERVER_HOST", "0.0.0.0"),
                port: var_or("SERVER_PORT", "5000").parse().map_err(|e| {
                    AppError::Configuration(format!("SERVER_PORT is not a valid port: {}", e))
                })?,
            },
            logging: LoggingConfig {
                access_log_path: var_or("ACCESS_LOG_PATH", "app-log/app.log"),
                source_tag: var_or("LOG_SOURCE_TAG", "game-night"),
            },
            app: AppInfoConfig {
                version: var_or("APP_VERSION", "v0.1.2"),
                environment: var_or("APP_CONFIG", "staging"),
            },
        })
    }

    pub fn server_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: DatabaseConfig {
                url: "sqlite::memory:".to_string(),
            },
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 5000,
            },
            logging: LoggingConfig {
                access_log_path: "app-log/app.log".to_string(),
                source_tag: "game-night".to_string(),
            },
            app: AppInfoConfig {
                version: "v0.1.2".to_string(),
                environment: "staging".to_string(),
            },
        }
    }
}

fn var_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_address() {
        let mut config = Config::default();
        config.server.host = "0.0.0.0".to_string();
        config.server.port = 8080;
        assert_eq!(config.server_address(), "0.0.0.0:8080");
    }

    #[test]
    fn test_default_targets_in_memory_store() {
        let config = Config::default();
        assert_eq!(config.database.url, "sqlite::memory:");
        assert_eq!(config.app.version, "v0.1.2");
        assert_eq!(config.app.environment, "staging");
    }
}

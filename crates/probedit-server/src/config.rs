//! Configuration file parsing for the server.
//!
//! Loads settings from TOML files: bind address, database location and an
//! optional seed problem for empty databases.

use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

/// Environment variable overriding `database_path`
pub const DATABASE_ENV_VAR: &str = "PROBEDIT_DATABASE";

/// Server configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read config file
    #[error("Failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    /// Failed to parse TOML
    #[error("Failed to parse config TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// Missing required field
    #[error("Missing required configuration field: {0}")]
    MissingField(String),
}

/// Server configuration loaded from TOML
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Bind address (e.g., "127.0.0.1")
    #[serde(default = "default_bind_address")]
    pub bind_address: String,

    /// Bind port (e.g., 3000)
    #[serde(default = "default_bind_port")]
    pub bind_port: u16,

    /// SQLite database file (":memory:" for a throwaway database)
    pub database_path: String,

    /// Source text inserted as the first problem when the database is empty
    #[serde(default)]
    pub seed_problem: Option<String>,
}

fn default_bind_address() -> String {
    "127.0.0.1".to_string()
}

fn default_bind_port() -> u16 {
    3000
}

impl ServerConfig {
    /// Load configuration from a TOML file
    ///
    /// `PROBEDIT_DATABASE`, when set, replaces `database_path`.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let config: ServerConfig = toml::from_str(&contents)?;

        config
            .with_database_override(std::env::var(DATABASE_ENV_VAR).ok())
            .validated()
    }

    /// Configuration used when no file is given
    pub fn default_config() -> Self {
        ServerConfig {
            bind_address: default_bind_address(),
            bind_port: default_bind_port(),
            database_path: "probedit.db".to_string(),
            seed_problem: None,
        }
        .with_database_override(std::env::var(DATABASE_ENV_VAR).ok())
    }

    /// Replace the database path when an override is present and non-empty
    pub fn with_database_override(mut self, database_path: Option<String>) -> Self {
        if let Some(path) = database_path.filter(|p| !p.is_empty()) {
            self.database_path = path;
        }
        self
    }

    fn validated(self) -> Result<Self, ConfigError> {
        if self.database_path.is_empty() {
            return Err(ConfigError::MissingField("database_path".to_string()));
        }
        Ok(self)
    }

    /// Get the full bind address (address:port)
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.bind_address, self.bind_port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bind_addr() {
        let config = ServerConfig {
            bind_address: "0.0.0.0".to_string(),
            bind_port: 8080,
            database_path: "x.db".to_string(),
            seed_problem: None,
        };
        assert_eq!(config.bind_addr(), "0.0.0.0:8080");
    }

    #[test]
    fn test_parse_toml() {
        let toml = r#"
            bind_address = "0.0.0.0"
            bind_port = 9000
            database_path = "/var/lib/probedit/problems.db"
            seed_problem = '\int_0^1 x^2 \, dx'
        "#;

        let config: ServerConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.bind_address, "0.0.0.0");
        assert_eq!(config.bind_port, 9000);
        assert_eq!(config.database_path, "/var/lib/probedit/problems.db");
        assert_eq!(config.seed_problem.as_deref(), Some(r"\int_0^1 x^2 \, dx"));
    }

    #[test]
    fn test_defaults() {
        let config: ServerConfig = toml::from_str(r#"database_path = "p.db""#).unwrap();
        assert_eq!(config.bind_address, "127.0.0.1");
        assert_eq!(config.bind_port, 3000);
        assert!(config.seed_problem.is_none());
    }

    #[test]
    fn test_database_path_required() {
        let result: Result<ServerConfig, _> = toml::from_str(r#"bind_port = 1"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_empty_database_path_rejected() {
        // An empty override leaves the empty value in place
        let config: ServerConfig = toml::from_str(r#"database_path = """#).unwrap();
        assert!(matches!(
            config.with_database_override(Some(String::new())).validated(),
            Err(ConfigError::MissingField(_))
        ));
    }

    #[test]
    fn test_database_override() {
        let config: ServerConfig = toml::from_str(r#"database_path = "file.db""#).unwrap();

        let unchanged = config.clone().with_database_override(None);
        assert_eq!(unchanged.database_path, "file.db");

        let replaced = config.with_database_override(Some("env.db".to_string()));
        assert_eq!(replaced.database_path, "env.db");
    }

    #[test]
    fn test_missing_file() {
        let result = ServerConfig::from_file("/definitely/not/here.toml");
        assert!(matches!(result, Err(ConfigError::FileRead(_))));
    }
}

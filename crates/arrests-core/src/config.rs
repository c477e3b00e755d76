//! Dashboard configuration.
//!
//! Loaded from a TOML file that holds either a `[neo4j]` section or the
//! flat `neo4j_uri` / `neo4j_user` / `neo4j_password` secrets layout.
//! Command line flags and environment variables are applied on top with
//! [`DashboardConfig::with_overrides`].

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default unit-of-work timeout for a dashboard query.
pub const DEFAULT_QUERY_TIMEOUT: Duration = Duration::from_secs(5);

/// Configuration errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Missing Neo4j credential: {0}")]
    MissingCredential(&'static str),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Result type for configuration loading.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Configuration for connecting to Neo4j.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphConfig {
    pub uri: String,
    pub user: String,
    pub password: String,
    pub database: String,
    pub query_timeout_secs: u64,
    pub connect_timeout_secs: u64,
    pub max_connections: usize,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            uri: "neo4j://localhost:7687".to_string(),
            user: "neo4j".to_string(),
            password: String::new(),
            database: "neo4j".to_string(),
            query_timeout_secs: DEFAULT_QUERY_TIMEOUT.as_secs(),
            connect_timeout_secs: 10,
            max_connections: 4,
        }
    }
}

impl GraphConfig {
    pub fn query_timeout(&self) -> Duration {
        Duration::from_secs(self.query_timeout_secs)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }
}

/// Presentation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardSettings {
    /// Render failed queries as an error banner. Off by default: a failed
    /// panel looks exactly like an empty one.
    pub show_errors: bool,
}

impl Default for DashboardSettings {
    fn default() -> Self {
        Self { show_errors: false }
    }
}

/// Complete dashboard configuration.
#[derive(Debug, Clone, Default)]
pub struct DashboardConfig {
    pub neo4j: GraphConfig,
    pub dashboard: DashboardSettings,
}

/// On-disk layout, accepting both the sectioned and the flat secrets form.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ConfigFile {
    neo4j: Option<GraphConfig>,
    dashboard: DashboardSettings,
    neo4j_uri: Option<String>,
    neo4j_user: Option<String>,
    neo4j_password: Option<String>,
}

impl DashboardConfig {
    /// Parse a TOML document. Flat secrets win over the `[neo4j]` section.
    pub fn from_toml_str(content: &str) -> ConfigResult<Self> {
        let file: ConfigFile = toml::from_str(content)?;

        let mut neo4j = file.neo4j.unwrap_or_default();
        if let Some(uri) = file.neo4j_uri {
            neo4j.uri = uri;
        }
        if let Some(user) = file.neo4j_user {
            neo4j.user = user;
        }
        if let Some(password) = file.neo4j_password {
            neo4j.password = password;
        }

        Ok(Self {
            neo4j,
            dashboard: file.dashboard,
        })
    }

    /// Load a config file from disk.
    pub fn load(path: &Path) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&content)?;
        tracing::debug!(path = %path.display(), uri = %config.neo4j.uri, "Loaded config file");
        Ok(config)
    }

    /// Apply command line / environment overrides.
    pub fn with_overrides(
        mut self,
        uri: Option<String>,
        user: Option<String>,
        password: Option<String>,
    ) -> Self {
        if let Some(uri) = uri {
            self.neo4j.uri = uri;
        }
        if let Some(user) = user {
            self.neo4j.user = user;
        }
        if let Some(password) = password {
            self.neo4j.password = password;
        }
        self
    }

    /// Check that the configuration can be used to connect.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.neo4j.uri.trim().is_empty() {
            return Err(ConfigError::MissingCredential("uri"));
        }
        if self.neo4j.user.trim().is_empty() {
            return Err(ConfigError::MissingCredential("user"));
        }
        if self.neo4j.password.is_empty() {
            return Err(ConfigError::MissingCredential("password"));
        }
        if self.neo4j.query_timeout_secs == 0 {
            return Err(ConfigError::Invalid(
                "query_timeout_secs must be greater than zero".to_string(),
            ));
        }
        if self.neo4j.connect_timeout_secs == 0 {
            return Err(ConfigError::Invalid(
                "connect_timeout_secs must be greater than zero".to_string(),
            ));
        }
        if self.neo4j.max_connections == 0 {
            return Err(ConfigError::Invalid(
                "max_connections must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sectioned_config() {
        let input = r#"
            [neo4j]
            uri = "neo4j+s://abc.databases.neo4j.io"
            user = "reader"
            password = "secret"
            query_timeout_secs = 8

            [dashboard]
            show_errors = true
        "#;
        let config = DashboardConfig::from_toml_str(input).unwrap();
        assert_eq!(config.neo4j.uri, "neo4j+s://abc.databases.neo4j.io");
        assert_eq!(config.neo4j.user, "reader");
        assert_eq!(config.neo4j.query_timeout(), Duration::from_secs(8));
        assert_eq!(config.neo4j.database, "neo4j");
        assert!(config.dashboard.show_errors);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_flat_secrets_layout() {
        let input = r#"
            neo4j_uri = "neo4j://db.internal"
            neo4j_user = "neo4j"
            neo4j_password = "pw"
        "#;
        let config = DashboardConfig::from_toml_str(input).unwrap();
        assert_eq!(config.neo4j.uri, "neo4j://db.internal");
        assert_eq!(config.neo4j.password, "pw");
        assert_eq!(config.neo4j.query_timeout(), DEFAULT_QUERY_TIMEOUT);
        assert!(!config.dashboard.show_errors);
    }

    #[test]
    fn test_error_banner_is_opt_in() {
        assert!(!DashboardSettings::default().show_errors);

        let config = DashboardConfig::from_toml_str("[dashboard]\nshow_errors = true\n").unwrap();
        assert!(config.dashboard.show_errors);
    }

    #[test]
    fn test_flat_secrets_override_section() {
        let input = r#"
            neo4j_password = "from-secrets"

            [neo4j]
            password = "from-section"
        "#;
        let config = DashboardConfig::from_toml_str(input).unwrap();
        assert_eq!(config.neo4j.password, "from-secrets");
    }

    #[test]
    fn test_overrides_and_validation() {
        let config = DashboardConfig::default();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::MissingCredential("password"))
        ));

        let config = config.with_overrides(None, Some("analyst".to_string()), Some("pw".to_string()));
        assert_eq!(config.neo4j.user, "analyst");
        assert_eq!(config.neo4j.uri, "neo4j://localhost:7687");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let input = r#"
            [neo4j]
            password = "pw"
            query_timeout_secs = 0
        "#;
        let config = DashboardConfig::from_toml_str(input).unwrap();
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_zero_connect_timeout_rejected() {
        let input = r#"
            [neo4j]
            password = "pw"
            connect_timeout_secs = 0
        "#;
        let config = DashboardConfig::from_toml_str(input).unwrap();
        match config.validate() {
            Err(ConfigError::Invalid(msg)) => assert!(msg.contains("connect_timeout_secs")),
            other => panic!("expected invalid config, got {:?}", other),
        }
    }

    #[test]
    fn test_invalid_toml() {
        let result = DashboardConfig::from_toml_str("neo4j = [");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }
}

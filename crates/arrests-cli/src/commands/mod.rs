//! CLI command definitions and handlers.

use anyhow::{Context, Result};
use arrests_core::DashboardConfig;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

pub mod check;
pub mod serve;

/// Config file read from the working directory when `--config` is not given.
const DEFAULT_CONFIG_FILE: &str = "arrests.toml";

/// NYPD Arrests - Neo4j dashboard
#[derive(Parser)]
#[command(name = "arrests")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to the config/secrets TOML file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Neo4j connection URI
    #[arg(long, global = true, env = "NEO4J_URI")]
    pub neo4j_uri: Option<String>,

    /// Neo4j user name
    #[arg(long, global = true, env = "NEO4J_USER")]
    pub neo4j_user: Option<String>,

    /// Neo4j password
    #[arg(long, global = true, env = "NEO4J_PASSWORD", hide_env_values = true)]
    pub neo4j_password: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the dashboard web server
    Serve(serve::ServeArgs),

    /// Check connectivity, graph counts and GDS projections
    Check,
}

impl Cli {
    pub async fn execute(self) -> Result<()> {
        let config = load_config(self.config.as_deref())?.with_overrides(
            self.neo4j_uri,
            self.neo4j_user,
            self.neo4j_password,
        );
        config.validate().context("Invalid Neo4j configuration")?;

        if self.verbose {
            tracing::info!(
                uri = %config.neo4j.uri,
                user = %config.neo4j.user,
                database = %config.neo4j.database,
                "Using Neo4j configuration"
            );
        }

        match self.command {
            Commands::Serve(args) => serve::execute(args, config).await,
            Commands::Check => check::execute(config).await,
        }
    }
}

/// Load the explicit config file, or `arrests.toml` when present, or defaults.
fn load_config(path: Option<&Path>) -> Result<DashboardConfig> {
    match path {
        Some(path) => DashboardConfig::load(path)
            .with_context(|| format!("Failed to load config from {}", path.display())),
        None => {
            let default = Path::new(DEFAULT_CONFIG_FILE);
            if default.exists() {
                DashboardConfig::load(default)
                    .with_context(|| format!("Failed to load {}", DEFAULT_CONFIG_FILE))
            } else {
                Ok(DashboardConfig::default())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_serve_flags() {
        let cli = Cli::try_parse_from([
            "arrests",
            "--neo4j-uri",
            "bolt://db:7687",
            "serve",
            "--port",
            "9000",
            "--log",
        ])
        .unwrap();
        assert_eq!(cli.neo4j_uri.as_deref(), Some("bolt://db:7687"));
        match cli.command {
            Commands::Serve(args) => {
                assert_eq!(args.port, 9000);
                assert!(args.log);
            }
            Commands::Check => panic!("expected serve"),
        }
    }

    #[test]
    fn test_parse_check_with_config() {
        let cli = Cli::try_parse_from(["arrests", "check", "--config", "secrets.toml"]).unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("secrets.toml")));
        assert!(matches!(cli.command, Commands::Check));
    }

    #[test]
    fn test_missing_config_file_is_an_error() {
        let err = load_config(Some(Path::new("/nonexistent/arrests.toml"))).unwrap_err();
        assert!(err.to_string().contains("Failed to load config"));
    }
}

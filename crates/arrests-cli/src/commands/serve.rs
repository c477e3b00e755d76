//! Web server command.

use anyhow::{bail, Result};
use arrests_core::DashboardConfig;
use arrests_graph::ArrestRepository;
use arrests_web::state::AppState;
use clap::Args;
use colored::Colorize;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Args)]
pub struct ServeArgs {
    /// Port to listen on
    #[arg(long, default_value = "8501")]
    pub port: u16,

    /// Host to bind to
    #[arg(long, default_value = "127.0.0.1")]
    pub host: String,

    /// Also write logs to a file
    #[arg(long)]
    pub log: bool,

    /// Log file path (defaults to ./logs/serve.log)
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

pub async fn execute(args: ServeArgs, config: DashboardConfig) -> Result<()> {
    let repo = ArrestRepository::connect(&config.neo4j).await;
    if !repo.is_connected().await {
        bail!(
            "Could not connect to Neo4j at {}. Check the URI and credentials.",
            config.neo4j.uri
        );
    }

    println!();
    println!("  {} {}", "NYPD Arrests".cyan().bold(), "Dashboard".bold());
    println!();
    println!("  {}  {}", "Neo4j".green(), config.neo4j.uri);
    println!(
        "  {}  http://{}:{}",
        "Dashboard".green(),
        args.host,
        args.port
    );
    println!(
        "  {}       http://{}:{}/api",
        "API".green(),
        args.host,
        args.port
    );
    if config.dashboard.show_errors {
        println!("  {}", "Query errors shown as banners (show_errors = true)".yellow());
    }
    println!();
    println!("  {}", "Ctrl+C to stop".dimmed());
    println!();

    let state = AppState::new(Arc::new(repo), config.dashboard);
    arrests_web::run_server(state, &args.host, args.port).await?;

    Ok(())
}

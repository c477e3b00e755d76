//! Connectivity and environment check.

use anyhow::{Context, Result};
use arrests_core::{DashboardConfig, QueryResult};
use arrests_graph::{ArrestRepository, Projection};
use colored::Colorize;
use std::future::Future;
use std::time::{Duration, Instant};

use crate::output::{self, CheckLine, CheckStatus};

pub async fn execute(config: DashboardConfig) -> Result<()> {
    println!("{} {}", "Checking".bold(), config.neo4j.uri.cyan());
    println!("{}", "─".repeat(56));

    let started = Instant::now();
    let repo = ArrestRepository::try_connect(&config.neo4j)
        .await
        .with_context(|| format!("Could not connect to {}", config.neo4j.uri))?;
    output::print_check(&CheckLine {
        label: "Connection".to_string(),
        status: CheckStatus::Ok("established".to_string()),
        elapsed: started.elapsed(),
    });

    let mut failures = 0;
    let mut report = |line: CheckLine| {
        if matches!(line.status, CheckStatus::Failed(_)) {
            failures += 1;
        }
        output::print_check(&line);
    };

    report(timed("Total nodes", repo.total_nodes(), |n| n.to_string()).await);
    report(timed("Total relationships", repo.num_relationships(), |n| n.to_string()).await);
    report(timed("Isolated nodes", repo.isolated_nodes(), |n| n.to_string()).await);
    report(timed("Distinct crimes", repo.num_crimes(), |n| n.to_string()).await);

    for projection in Projection::ALL {
        let label = format!("Projection '{}'", projection.name());
        let mut line = timed(label, repo.projection_exists(projection), |exists| {
            let state = if *exists { "exists" } else { "missing" };
            state.to_string()
        })
        .await;
        if matches!(&line.status, CheckStatus::Ok(v) if v == "missing") {
            line.status = CheckStatus::Warning("missing".to_string());
        }
        report(line);
    }

    repo.close().await;

    println!("{}", "─".repeat(56));
    if failures == 0 {
        println!("{}", "All checks passed.".green().bold());
    } else {
        println!("{}", format!("{} check(s) failed.", failures).red().bold());
        anyhow::bail!("{} check(s) failed", failures);
    }

    Ok(())
}

/// Run one facade call and record how long it took.
async fn timed<T, F>(
    label: impl Into<String>,
    call: F,
    describe: impl FnOnce(&T) -> String,
) -> CheckLine
where
    F: Future<Output = QueryResult<T>>,
{
    let started = Instant::now();
    let result = call.await;
    let elapsed: Duration = started.elapsed();
    let status = match result {
        Ok(value) => CheckStatus::Ok(describe(&value)),
        Err(e) => CheckStatus::Failed(e.to_string()),
    };
    CheckLine {
        label: label.into(),
        status,
        elapsed,
    }
}

//! Console front end: one question per line, answered against the same
//! pipeline the HTTP server uses.

use anyhow::Context;
use jira_helper::api::AppState;
use jira_helper::{AppConfig, Query};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(EnvFilter::from_default_env())
        .finish();
    tracing::subscriber::set_global_default(subscriber).context("setting default subscriber failed")?;

    let config = AppConfig::from_env()?;
    let state = AppState::from_config(&config);
    tracing::info!(
        "Console ready (live store: {}, generative backend: {})",
        state.store.is_live(),
        state.resolver.has_remote()
    );

    println!("Ask about your tasks. Type 'help' for ideas, 'quit' to exit.");
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if matches!(line, "quit" | "exit") {
            break;
        }

        let tasks = state.store.snapshot().await;
        let result = state.resolver.answer(&Query::new(line), &tasks).await;
        state.history.write().await.record(line, result.clone());

        println!("\n{}\n", result.text);
        if let Some(chart) = result.chart_recommendation {
            println!("[chart: {}, tasks: {}]", chart.as_str(), result.task_count);
        }
        if !result.suggested_actions.is_empty() {
            println!("Next: {}\n", result.suggested_actions.join(" | "));
        }
    }

    tracing::info!("Console closed after {} queries", state.history.read().await.len());
    Ok(())
}

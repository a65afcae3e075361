//! Comments command - walks user -> blog -> post -> comments for each user

use std::sync::Arc;

use clap::Args;
use serde_json::{Value, json};
use tokio::signal;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, instrument};

use crate::config::AppConfig;
use crate::domain::{ChainReport, CommentsChainBuilder, StatusPolicy};
use crate::infrastructure::{HttpClient, logging};

/// Arguments for the comments command
#[derive(Args, Clone, Debug)]
pub struct CommentsArgs {
    /// Username to start from; repeat to run several independent chains
    #[arg(short, long = "username", required = true)]
    pub usernames: Vec<String>,

    /// Title of the post whose comments are fetched
    #[arg(short, long)]
    pub title: String,

    /// Base URL of the blog API (overrides config)
    #[arg(long)]
    pub base_url: Option<String>,

    /// Accept any 2xx status, not only 200
    #[arg(long)]
    pub any_success: bool,

    /// Include per-step timings in the output
    #[arg(long)]
    pub trace: bool,
}

/// Run the comments chain(s) and print the outcomes as JSON
pub async fn run(args: CommentsArgs) -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let mut config = AppConfig::load()?;
    apply_overrides(&mut config, &args);
    logging::init_logging(&config.logging)?;

    let client = HttpClient::new(&config.api)?;
    let builder = CommentsChainBuilder::new(Arc::new(client), &config.routes)?
        .with_status_policy(config.api.status_policy);

    let cancel = CancellationToken::new();
    let watcher = tokio::spawn(cancel_on_ctrl_c(cancel.clone()));

    info!(
        users = args.usernames.len(),
        title = %args.title,
        base_url = %config.api.base_url,
        "Resolving comment chains"
    );

    let runs = args
        .usernames
        .iter()
        .map(|username| resolve_user(&builder, username, &args.title, &cancel));

    let reports = futures::future::try_join_all(runs).await?;
    watcher.abort();

    let failures = reports.iter().filter(|(_, r)| !r.result.is_success()).count();
    let output = reports
        .iter()
        .map(|(username, report)| render(username, report, args.trace))
        .collect::<Result<Vec<_>, _>>()?;

    println!("{}", serde_json::to_string_pretty(&output)?);

    if failures > 0 {
        error!("{} of {} chains failed", failures, reports.len());
        anyhow::bail!("{} of {} chains failed", failures, reports.len());
    }

    Ok(())
}

/// One chain per user, traced under its own span
#[instrument(name = "chain", skip(builder, cancel))]
async fn resolve_user<'a>(
    builder: &CommentsChainBuilder,
    username: &'a str,
    title: &str,
    cancel: &CancellationToken,
) -> anyhow::Result<(&'a str, ChainReport)> {
    let chain = builder.build(title)?;
    let report = chain
        .execute(Value::String(username.to_string()), cancel)
        .await;

    Ok((username, report))
}

fn apply_overrides(config: &mut AppConfig, args: &CommentsArgs) {
    if let Some(base_url) = &args.base_url {
        config.api.base_url = base_url.clone();
    }

    if args.any_success {
        config.api.status_policy = StatusPolicy::AnySuccess;
    }
}

fn render(username: &str, report: &ChainReport, trace: bool) -> serde_json::Result<Value> {
    let outcome = if trace {
        serde_json::to_value(report)?
    } else {
        serde_json::to_value(&report.result)?
    };

    Ok(json!({ "username": username, "outcome": outcome }))
}

async fn cancel_on_ctrl_c(cancel: CancellationToken) {
    if signal::ctrl_c().await.is_ok() {
        info!("Received Ctrl+C, cancelling remaining steps");
        cancel.cancel();
    }
}

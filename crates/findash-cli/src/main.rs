//! findash: terminal financial dashboard.
//!
//! Usage:
//!   findash --ticker AAPL
//!   findash --ticker MSFT --quarterly --metric netIncome --metric freeCashFlow
//!   findash --query '?ticker=NVDA' --range 0:3
//!   findash --ticker AAPL --offline --seed 7 --interactive

use anyhow::Context;
use clap::Parser;
use findash::Dashboard;
use std::io;

mod commands;
mod config;
mod terminal;

use config::Args;
use terminal::TerminalRenderer;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "findash=info,findash_api=warn".into()),
        )
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    let loader = args.loader();
    tracing::debug!(?loader, "Loader configured");

    let renderer = TerminalRenderer::new(io::stdout()).with_color(args.color);
    let mut dashboard = Dashboard::new(renderer)
        .with_metrics(args.metric_selection())
        .with_granularity(args.granularity());
    if let Some(range) = args.range {
        dashboard = dashboard.with_range(range.min, range.max);
    }

    let today = chrono::Local::now().date_naive();
    dashboard
        .open(&args.query(), &loader, today)
        .await
        .context("could not open dashboard")?;

    if args.interactive {
        let mut out = io::stdout();
        commands::run(&mut dashboard, io::stdin().lock(), &mut out)
            .context("interactive session failed")?;
    }

    dashboard.teardown();
    tracing::debug!(
        live_charts = dashboard.renderer().live_charts(),
        "Dashboard closed"
    );
    if let Some(e) = dashboard.renderer_mut().take_error() {
        return Err(e).context("could not write to stdout");
    }
    Ok(())
}

//! Attachment Quiz Daemon - serves the attachment style quiz over HTTP.

use anyhow::{Context, Result};
use attachment_common::{Factor, QuestionBank};
use attachmentd::config::Config;
use attachmentd::server::{self, AppState};
use attachmentd::store;
use clap::Parser;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, reload, EnvFilter};

#[derive(Parser, Debug)]
#[command(name = "attachmentd", version, about = "Attachment style quiz backend")]
struct Args {
    /// Path to config.toml (defaults to /etc/attachment-quiz/config.toml)
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Logging starts before config so load errors and fallbacks are visible.
    // RUST_LOG wins; otherwise the configured level replaces "info" below.
    let env_filter = EnvFilter::try_from_default_env().ok();
    let level_from_env = env_filter.is_some();
    let (filter, filter_handle) =
        reload::Layer::new(env_filter.unwrap_or_else(|| EnvFilter::new("info")));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer())
        .init();

    info!("[BOOT] Attachment quiz daemon v{} starting...", env!("CARGO_PKG_VERSION"));

    let config = Config::load(args.config.as_deref()).context("Failed to load configuration")?;
    if !level_from_env {
        filter_handle
            .reload(EnvFilter::new(&config.logging.level))
            .context("Failed to apply configured log level")?;
    }

    let bank = QuestionBank::ecr_r();
    info!(
        "[BOOT] Question bank ready ({} items: {} {}, {} {})",
        bank.len(),
        bank.count_for(Factor::Anxiety),
        Factor::Anxiety.as_str(),
        bank.count_for(Factor::Avoidance),
        Factor::Avoidance.as_str(),
    );

    let store = store::open_configured(config.storage.database_path.as_deref());
    let state = AppState::new(bank, store);

    server::run(state, &config.server).await
}

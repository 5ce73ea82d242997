//! Homebuy CLI - home purchase checklist for Texas buyers.
//!
//! Tracks one purchase from pre-offer through closing: tasks, deadlines,
//! contacts, documents and filled forms.

use anyhow::Result;
use clap::Parser;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod config;
mod context;
mod output;

use commands::Cli;

/// Initialize tracing, optionally mirroring everything into `log_file`.
///
/// The returned guard flushes the file writer on drop and must live
/// until the process exits.
fn init_tracing(log_file: Option<&std::path::Path>, verbose: bool) -> Option<WorkerGuard> {
    let default_filter = if verbose {
        "homebuy=debug,homebuy_core=debug,homebuy_store=debug"
    } else {
        "homebuy=info,homebuy_core=info,homebuy_store=warn"
    };
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| default_filter.into());

    // Logs go to stderr; stdout is command output.
    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false);

    if let Some(path) = log_file {
        if let Some(parent) = path.parent() {
            let _ = std::fs::create_dir_all(parent);
        }
        let dir = path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| std::path::Path::new("."));
        let file_name = path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| "homebuy.log".into());

        let appender = tracing_appender::rolling::never(dir, file_name);
        let (writer, guard) = tracing_appender::non_blocking(appender);

        tracing_subscriber::registry()
            .with(env_filter)
            .with(stderr_layer)
            .with(
                tracing_subscriber::fmt::layer()
                    .with_writer(writer)
                    .with_ansi(false),
            )
            .init();
        Some(guard)
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(stderr_layer)
            .init();
        None
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let _guard = init_tracing(cli.log.as_deref(), cli.verbose);

    cli.execute().await
}

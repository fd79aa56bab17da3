//! fsgate — sandboxed filesystem tool provider
//!
//! Serves filesystem tools over stdio JSON-RPC. Every path argument is
//! confined to the allow-list of directories given on the command line:
//!
//! ```text
//! fsgate /srv/data /home/user/project
//! ```

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use fsgate::allowlist::AllowList;
use fsgate::dispatch::Dispatcher;
use fsgate::server;

#[derive(Parser, Debug)]
#[command(
    name = "fsgate",
    version,
    about = "Sandboxed filesystem tool provider over stdio JSON-RPC"
)]
struct Args {
    /// Directories the server is allowed to access; everything else is denied
    #[arg(value_name = "DIR")]
    allowed_directories: Vec<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // stdout carries JSON-RPC frames; logs go to stderr
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();

    let args = Args::parse();

    let allow = Arc::new(
        AllowList::new(args.allowed_directories).context("invalid allowed directory")?,
    );
    for root in allow.roots() {
        info!("Allowed directory: {}", root.display());
    }
    if allow.roots().is_empty() {
        info!("No allowed directories given; every filesystem operation will be denied");
    }

    let dispatcher = Arc::new(Dispatcher::new(allow));
    info!(
        "fsgate v{} serving {} tools on stdio",
        env!("CARGO_PKG_VERSION"),
        dispatcher.registry().tool_count()
    );

    server::serve(dispatcher).await
}

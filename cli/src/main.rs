use anyhow::Result;
use clap::Parser;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

mod command;
mod render;
mod repl;
mod transport;

use repl::{Repl, StderrAlerts};
use todo_core::{ClientConfig, TodoController, DEFAULT_API_BASE_URL};
use transport::UreqTransport;

/// Terminal client for the todo service
#[derive(Parser)]
#[command(name = "todo")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Base URL of the todo service
    #[arg(long, env = "TODO_API_BASE_URL", default_value = DEFAULT_API_BASE_URL)]
    api_base_url: String,

    /// Route to open with, e.g. `#/?filter=active`
    #[arg(long, default_value = "#/")]
    route: String,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let config = ClientConfig::new(&cli.api_base_url);
    info!(api_base_url = %config.api_base_url, "starting");

    let controller = TodoController::new(config, UreqTransport::new(), StderrAlerts);
    let stdin = std::io::stdin();
    Repl::new(controller).run(&cli.route, stdin.lock(), std::io::stdout())
}

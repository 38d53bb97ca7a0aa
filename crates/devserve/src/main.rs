//! devserve CLI - static file development server with live reload.
//!
//! Serves a directory over HTTP and reloads connected browser tabs when
//! files under it change.

mod error;
mod output;
mod serve;

use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use output::Output;

/// devserve - serve a directory, reload on change.
#[derive(Parser)]
#[command(name = "devserve", version, about)]
struct Cli {
    /// Directory to serve (default: current directory).
    #[arg(default_value = ".")]
    root: PathBuf,

    /// Host address to bind to.
    #[arg(long, env = "HOST", default_value = "127.0.0.1")]
    host: String,

    /// Port to listen on.
    #[arg(short, long, env = "PORT", default_value_t = 5173)]
    port: u16,

    /// Disable live reload.
    #[arg(long)]
    no_live_reload: bool,
}

fn main() {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let output = Output::new();

    let rt = tokio::runtime::Runtime::new().expect("Failed to create tokio runtime");
    if let Err(err) = rt.block_on(serve::execute(cli)) {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}

//! Server startup from CLI arguments.

use devserve_server::{ServerConfig, run_server};

use crate::Cli;
use crate::error::CliError;
use crate::output::Output;

/// Start the server from parsed CLI arguments.
///
/// # Errors
///
/// Returns an error if the root directory cannot be resolved or the server
/// fails to start.
pub(crate) async fn execute(cli: Cli) -> Result<(), CliError> {
    let output = Output::new();

    output.info(&format!(
        "Serving {} at http://{}:{}",
        cli.root.display(),
        cli.host,
        cli.port
    ));
    if cli.no_live_reload {
        output.info("Live reload: disabled");
    } else {
        output.info("Live reload: enabled");
    }

    let config = ServerConfig {
        host: cli.host,
        port: cli.port,
        root: cli.root,
        live_reload_enabled: !cli.no_live_reload,
    };

    run_server(config)
        .await
        .map_err(|e| CliError::Server(e.to_string()))?;

    Ok(())
}

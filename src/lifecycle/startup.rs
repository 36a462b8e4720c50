//! Startup orchestration.
//!
//! Order: configuration, logging, process metrics, listener, server. Any
//! startup error is fatal; a failing probe never is.

use tokio::net::TcpListener;

use crate::config::{resolve_config, CliArgs};
use crate::http::HttpServer;
use crate::lifecycle::shutdown::{Shutdown, SHUTDOWN_GRACE};
use crate::lifecycle::signals::wait_for_signal;
use crate::observability::{init_logging, init_metrics};
use crate::resilience::RetryPolicy;

/// Run the exporter until a termination signal arrives.
pub async fn run(args: CliArgs) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let (config, config_path) = resolve_config(&args)?;
    init_logging(&config.log)?;

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "statuspage-exporter starting");
    match &config_path {
        Some(path) => tracing::info!(path = %path.display(), "Using config file"),
        None => tracing::info!("No config file found, using defaults"),
    }

    let retry = RetryPolicy::from_config(&config.client);
    tracing::info!(
        http_port = config.http_port,
        client_timeout = ?config.client.timeout(),
        retry_count = config.client.retry_count,
        worst_case_probe = ?retry.worst_case_latency(config.client.timeout()),
        "Configuration loaded"
    );

    let metrics = init_metrics()?;

    let listener = TcpListener::bind(config.listen_address()).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    let server = HttpServer::new(config, Some(metrics))?;
    let mut server_task = tokio::spawn(server.run(listener, shutdown.subscribe()));

    tokio::select! {
        signal = wait_for_signal() => {
            let signal = signal?;
            tracing::info!(signal, "Received shutdown signal, waiting for in-flight probes");
        }
        res = &mut server_task => {
            res??;
            return Ok(());
        }
    }

    shutdown.trigger();
    match tokio::time::timeout(SHUTDOWN_GRACE, server_task).await {
        Ok(res) => res??,
        Err(_) => tracing::warn!(grace = ?SHUTDOWN_GRACE, "In-flight requests did not finish in time"),
    }

    tracing::info!("Shutdown complete");
    Ok(())
}

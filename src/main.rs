use clap::Parser;
use std::path::Path;
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::prelude::*;

use e2e_dashboard::config::{CliArgs, DashboardConfig};
use e2e_dashboard::state::DashboardState;
use e2e_dashboard::{runner, server, store};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = CliArgs::parse();
    let config = DashboardConfig::from_args(args);

    // Initialize tracing; the guard flushes the file sink on exit
    let (file_layer, _log_guard) = match &config.log_file {
        Some(path) => {
            let dir = path.parent().unwrap_or_else(|| Path::new("."));
            let file_name = path
                .file_name()
                .map(|n| n.to_os_string())
                .unwrap_or_else(|| "e2e-dashboard.log".into());
            let appender = tracing_appender::rolling::never(dir, file_name);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(writer);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "e2e_dashboard=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .with(file_layer)
        .init();

    info!("Starting e2e-dashboard v{}", env!("CARGO_PKG_VERSION"));
    info!("Project dir: {:?}", config.project_dir);
    info!("Data dir: {:?} ({:?} store)", config.data_dir, config.store);
    info!("Headed: {}", config.headed);

    if !config.project_dir.exists() {
        error!("Project directory does not exist: {:?}", config.project_dir);
        std::process::exit(1);
    }

    let kv = store::open_store(&config)?;
    let runner = runner::build_runner(&config)?;
    match &config.remote_bridge {
        Some(bridge) => info!("Forwarding runs to {}", bridge),
        None => info!("Runner: {}", runner.label()),
    }

    let port = config.port;
    let state = Arc::new(DashboardState::new(config, kv, runner)?);

    let router = server::build_router(state);
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", port)).await?;
    info!("Dashboard listening on http://0.0.0.0:{}", port);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Dashboard shutting down");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to install Ctrl+C handler: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Received shutdown signal");
}

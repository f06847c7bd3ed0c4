#![warn(clippy::all, clippy::pedantic)]

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use actix_web::{App, HttpServer, web};
use clap::Parser;
use tracing::info;

mod error;
mod routes;

use error::AppError;
use logger::init_tracing;
use vigil::MonitorService;
use vigil::config::Config;
use vigil::persistence::SnapshotFile;

/// URL health-check monitoring server
#[derive(Debug, Parser)]
#[command(name = "vigil-server", version, about)]
struct Args {
    /// Path to the TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[actix_web::main]
async fn main() -> Result<(), AppError> {
    init_tracing();

    let args = Args::parse();
    let config = Config::from_config(args.config.as_deref())?;
    info!("{config}");

    let service = MonitorService::new(
        SnapshotFile::new(&config.storage.data_file),
        Duration::from_millis(config.monitoring.probe_timeout_ms),
        config.storage.persist_probes,
    )?;

    let restored = service.resume().await;
    info!("Resumed monitoring for {restored} persisted health checks");

    let addr: SocketAddr = format!("{}:{}", config.server.bind, config.server.port).parse()?;
    run_server(addr, web::Data::new(service)).await
}

async fn run_server(addr: SocketAddr, service: web::Data<MonitorService>) -> Result<(), AppError> {
    let app_data = service.clone();
    let server = HttpServer::new(move || App::new().app_data(app_data.clone()).configure(routes::routes))
        .disable_signals()
        .bind(addr)?
        .run();

    let handle = server.handle();
    tokio::spawn(async move {
        shutdown_signal().await;
        info!("Shutdown signal received, stopping server");
        handle.stop(true).await;
    });

    info!("Listening on {addr}");
    server.await?;

    // The final snapshot must land before exit.
    service.shutdown().await;

    Ok(())
}

/// Resolves on SIGINT or, on unix, SIGTERM.
async fn shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{SignalKind, signal};

        let mut term = match signal(SignalKind::terminate()) {
            Ok(term) => term,
            Err(e) => {
                tracing::warn!("Failed to install SIGTERM handler: {e}");
                let _ = tokio::signal::ctrl_c().await;
                return;
            }
        };

        tokio::select! {
            _ = tokio::signal::ctrl_c() => {}
            _ = term.recv() => {}
        }
    }

    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }
}

//! Nova Relay Daemon
//!
//! Standalone relay process bridging the assistant backend's SSE stream to
//! chat clients. Clients POST conversations to `/api/chat` and read
//! newline-delimited JSON.
//!
//! # Usage
//!
//! ```bash
//! # Start with defaults (listen on 127.0.0.1:3000, backend on localhost:8000)
//! nova-relay
//!
//! # Custom addresses
//! nova-relay --listen 0.0.0.0:3100 --backend http://ai.internal:8000
//!
//! # With verbose logging
//! RUST_LOG=debug nova-relay
//! ```
//!
//! # Environment Variables
//!
//! - `NOVA_RELAY_ADDR`: listen address (flag `--listen` wins)
//! - `NOVA_BACKEND_URL`: backend base URL (flag `--backend` wins)
//! - `RUST_LOG`: log level (trace, debug, info, warn, error)
//!
//! # Files
//!
//! - PID file: `$XDG_RUNTIME_DIR/nova/relay.pid` (or `/tmp/nova-$UID/relay.pid`)
//!
//! # Signals
//!
//! - SIGTERM/SIGINT: graceful shutdown (removes the PID file)

use std::fs;
use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tokio::signal;
use tracing::{error, info, warn};

use nova_core::config::load_config;
use nova_relay::server::{build_router, RelayState};

/// Chat relay daemon for the Nova assistant
#[derive(Debug, Parser)]
#[command(name = "nova-relay", version, about)]
struct Args {
    /// Address to listen on
    #[arg(long, env = "NOVA_RELAY_ADDR")]
    listen: Option<String>,

    /// Base URL of the assistant backend
    #[arg(long, env = "NOVA_BACKEND_URL")]
    backend: Option<String>,
}

/// Get the default PID file path
///
/// Uses `XDG_RUNTIME_DIR` if available, otherwise `/tmp/nova-$UID/`
fn default_pid_path() -> PathBuf {
    if let Ok(runtime_dir) = std::env::var("XDG_RUNTIME_DIR") {
        PathBuf::from(runtime_dir).join("nova").join("relay.pid")
    } else {
        let uid = unsafe { libc::getuid() };
        PathBuf::from(format!("/tmp/nova-{uid}/relay.pid"))
    }
}

/// Write the PID file
fn write_pid_file(path: &PathBuf) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let pid = std::process::id();
    let mut file = fs::File::create(path)?;
    writeln!(file, "{pid}")?;

    info!(pid = pid, path = ?path, "PID file created");
    Ok(())
}

/// Remove the PID file
fn remove_pid_file(path: &PathBuf) {
    if path.exists() {
        if let Err(e) = fs::remove_file(path) {
            warn!(error = %e, path = ?path, "Failed to remove PID file");
        } else {
            info!(path = ?path, "PID file removed");
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("nova_relay=info".parse()?)
                .add_directive("nova_core=info".parse()?),
        )
        .with_target(true)
        .init();

    info!("Starting Nova relay");
    info!("PID: {}", std::process::id());

    let args = Args::parse();
    let mut config = load_config()?;
    if let Some(listen) = args.listen {
        config.relay.listen_addr = listen;
    }
    if let Some(backend) = args.backend {
        config.backend.base_url = backend;
    }

    let pid_path = default_pid_path();
    if let Err(e) = write_pid_file(&pid_path) {
        error!(error = %e, "Failed to write PID file");
        return Err(anyhow::anyhow!(
            "Failed to write PID file at {:?}: {}. Check directory permissions.",
            pid_path,
            e
        ));
    }

    let state = Arc::new(RelayState::new(config.backend.base_url.clone()));
    let router = build_router(state);

    let listener = tokio::net::TcpListener::bind(&config.relay.listen_addr)
        .await
        .map_err(|e| {
            error!(error = %e, addr = %config.relay.listen_addr, "Failed to bind");
            remove_pid_file(&pid_path);
            anyhow::anyhow!(
                "Failed to bind {}: {}. Check if another relay is running.",
                config.relay.listen_addr,
                e
            )
        })?;

    info!(
        addr = %config.relay.listen_addr,
        backend = %config.backend.base_url,
        "Listening for chat requests"
    );

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| {
            remove_pid_file(&pid_path);
            anyhow::anyhow!("Server error: {e}")
        })?;

    remove_pid_file(&pid_path);
    info!("Nova relay stopped cleanly");
    Ok(())
}

/// Resolve when a shutdown signal arrives
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            info!("Received Ctrl+C, shutting down");
        }
        () = terminate => {
            info!("Received SIGTERM, shutting down");
        }
    }
}

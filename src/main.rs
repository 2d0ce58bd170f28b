//! ws-ping
//!
//! Connects to a local WebSocket server, greets it with "Ping" and prints
//! every message the server sends back.

mod client;

use clap::Parser;
use tokio::signal;
use tracing::{debug, info, Level};
use tracing_subscriber::FmtSubscriber;

use client::{ClientConfig, ClientSession, StdoutSink, DEFAULT_ADDRESS};

/// Minimal WebSocket client
///
/// Sends "Ping" once connected and prints the server's replies
#[derive(Parser, Debug)]
#[command(name = "ws-ping")]
#[command(version, about, long_about = None)]
struct Args {
    /// WebSocket endpoint to connect to
    #[arg(long, default_value = DEFAULT_ADDRESS)]
    address: String,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let log_level = if args.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };

    // Stdout belongs to the session's log sink
    FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();

    debug!("ws-ping v{}", env!("CARGO_PKG_VERSION"));

    let config = ClientConfig::new(args.address);
    let mut session = ClientSession::new(config, StdoutSink)?;

    tokio::select! {
        outcome = session.run() => {
            debug!("Session ended: {:?}", outcome?);
        }
        _ = shutdown_signal() => {
            info!("Interrupted, exiting");
        }
    }

    Ok(())
}

/// Wait for shutdown signal (SIGTERM or SIGINT)
async fn shutdown_signal() {
    let ctrl_c = async {
        if signal::ctrl_c().await.is_err() {
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(_) => std::future::pending::<()>().await,
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            debug!("Received SIGINT (Ctrl+C)");
        }
        _ = terminate => {
            debug!("Received SIGTERM");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_args_default_address() {
        let args = Args::parse_from(["ws-ping"]);
        assert_eq!(args.address, "ws://127.0.0.1:8080");
        assert!(!args.verbose);
    }

    #[test]
    fn test_args_override() {
        let args = Args::parse_from(["ws-ping", "--address", "ws://localhost:9000/chat", "-v"]);
        assert_eq!(args.address, "ws://localhost:9000/chat");
        assert!(args.verbose);
    }
}

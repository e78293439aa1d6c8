// Server loop module
// Accepts connections for one server until shutdown is requested

use std::sync::atomic::AtomicUsize;
use std::sync::Arc;
use std::time::Duration;
use hyper_util::server::graceful::GracefulShutdown;
use tokio::net::TcpListener;

use super::connection::accept_connection;
use super::signal::SignalHandler;
use crate::config;
use crate::handler::ServerKind;
use crate::logger;

/// How long in-flight connections may run after shutdown is requested
const SHUTDOWN_GRACE: Duration = Duration::from_secs(5);

/// Configuration for server loop behavior
pub struct ServerLoopConfig {
    pub kind: ServerKind,
    /// Shared SIGINT/SIGTERM state
    pub signals: Arc<SignalHandler>,
}

/// Accept loop shared by the demo and web servers
///
/// Returns once shutdown is signalled and the connections it accepted have
/// finished. Idle keep-alive connections are closed, in-flight requests get
/// up to `SHUTDOWN_GRACE` to complete.
pub async fn start_server_loop(
    listener: TcpListener,
    state: Arc<config::AppState>,
    active_connections: Arc<AtomicUsize>,
    config: ServerLoopConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    let prefix = config.kind.log_prefix();
    let graceful = GracefulShutdown::new();

    let shutdown = config.signals.wait_for_shutdown();
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            // Shutdown wins when both are ready
            biased;

            () = &mut shutdown => {
                logger::log_shutdown(prefix);
                break;
            }

            accept_result = listener.accept() => {
                match accept_result {
                    Ok((stream, peer_addr)) => {
                        accept_connection(
                            stream,
                            peer_addr,
                            &state,
                            &active_connections,
                            &graceful,
                            config.kind,
                        );
                    }
                    Err(e) => {
                        logger::log_error(&format!("{prefix} Failed to accept connection: {e}"));
                    }
                }
            }
        }
    }

    drop(listener);
    if tokio::time::timeout(SHUTDOWN_GRACE, graceful.shutdown())
        .await
        .is_err()
    {
        logger::log_warning(&format!(
            "{prefix} Shutdown grace period elapsed with connections still open"
        ));
    }
    Ok(())
}

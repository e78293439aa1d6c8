// Connection handling module
// Accepts a single TCP connection and serves it on its own task

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper_util::rt::TokioIo;
use hyper_util::server::graceful::GracefulShutdown;

use crate::config;
use crate::handler::{self, ServerKind};
use crate::logger;

/// Accept and process a connection, checking limits and logging.
///
/// # Arguments
///
/// * `stream` - The TCP stream to handle
/// * `peer_addr` - The peer's socket address
/// * `state` - Shared application state
/// * `conn_counter` - Active connection counter of this server
/// * `graceful` - Shutdown watcher of this server
/// * `kind` - Which server accepted the connection
pub fn accept_connection(
    stream: tokio::net::TcpStream,
    peer_addr: std::net::SocketAddr,
    state: &Arc<config::AppState>,
    conn_counter: &Arc<AtomicUsize>,
    graceful: &GracefulShutdown,
    kind: ServerKind,
) {
    // Increment first, then check, so two accepts cannot both slip under the cap
    let prev_count = conn_counter.fetch_add(1, Ordering::SeqCst);

    if let Some(max_conn) = state.config.performance.max_connections {
        if prev_count >= usize::try_from(max_conn).unwrap_or(usize::MAX) {
            conn_counter.fetch_sub(1, Ordering::SeqCst);
            logger::log_warning(&format!(
                "{} Max connections reached: {prev_count}/{max_conn}. Connection rejected.",
                kind.log_prefix()
            ));
            drop(stream);
            return;
        }
    }

    if state.access_log() {
        logger::log_connection_accepted(kind.log_prefix(), &peer_addr);
    }

    handle_connection(
        stream,
        peer_addr,
        state,
        Arc::clone(conn_counter),
        graceful,
        kind,
    );
}

/// Handle a single connection in a spawned task.
///
/// Requests on one connection are served in order by hyper's HTTP/1.1
/// connection with keep-alive. The whole connection is bounded by
/// `max(read_timeout, write_timeout)`. The connection is registered with
/// `graceful` so shutdown closes it once idle. The counter is released when
/// the connection ends.
fn handle_connection(
    stream: tokio::net::TcpStream,
    peer_addr: std::net::SocketAddr,
    state: &Arc<config::AppState>,
    conn_counter: Arc<AtomicUsize>,
    graceful: &GracefulShutdown,
    kind: ServerKind,
) {
    let io = TokioIo::new(stream);

    let performance = &state.config.performance;
    let keep_alive = performance.keep_alive_timeout > 0;
    let timeout_duration = std::time::Duration::from_secs(std::cmp::max(
        performance.read_timeout,
        performance.write_timeout,
    ));

    let mut builder = http1::Builder::new();
    builder.keep_alive(keep_alive);

    let service_state = Arc::clone(state);
    let conn = builder.serve_connection(
        io,
        service_fn(move |req| {
            handler::handle_request(req, peer_addr, Arc::clone(&service_state), kind)
        }),
    );
    let conn = graceful.watch(conn);

    tokio::task::spawn_local(async move {
        match tokio::time::timeout(timeout_duration, conn).await {
            Ok(Ok(())) => {}
            Ok(Err(err)) => logger::log_connection_error(&err),
            Err(_) => {
                logger::log_warning(&format!(
                    "{} Connection from {peer_addr} timed out after {} seconds",
                    kind.log_prefix(),
                    timeout_duration.as_secs(),
                ));
            }
        }

        conn_counter.fetch_sub(1, Ordering::SeqCst);
    });
}

// Server module entry
// Listener creation, accept loops, connection handling and shutdown signals

pub mod connection;
pub mod listener;
pub mod preempt;
pub mod signal;

// Rust 不允许 loop 作为模块名（关键字），改用 server_loop
#[path = "loop.rs"]
pub mod server_loop;

// Re-export commonly used types
pub use listener::create_listener;
pub use preempt::{free_port, PreemptOutcome};
pub use server_loop::{start_server_loop, ServerLoopConfig};
pub use signal::{start_signal_handler, SignalHandler};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{AppState, Config};
    use crate::handler::ServerKind;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::time::{Duration, Instant};
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpStream;

    fn test_state() -> Arc<AppState> {
        let mut cfg = Config::load_from("does-not-exist/affiliate").unwrap();
        cfg.logging.access_log = false;
        Arc::new(AppState::new(&cfg))
    }

    async fn raw_exchange(addr: std::net::SocketAddr, request: &str) -> String {
        let mut stream = TcpStream::connect(addr).await.unwrap();
        stream.write_all(request.as_bytes()).await.unwrap();
        let mut buf = Vec::new();
        stream.read_to_end(&mut buf).await.unwrap();
        String::from_utf8_lossy(&buf).into_owned()
    }

    /// Read exactly one response off a keep-alive connection
    async fn read_one_response(stream: &mut TcpStream) -> String {
        let mut received = Vec::new();
        let mut chunk = [0u8; 1024];
        loop {
            let text = String::from_utf8_lossy(&received).into_owned();
            if let Some(header_end) = text.find("\r\n\r\n") {
                let content_length = text[..header_end]
                    .lines()
                    .find_map(|line| {
                        let (name, value) = line.split_once(':')?;
                        name.eq_ignore_ascii_case("content-length")
                            .then(|| value.trim().parse::<usize>().ok())
                            .flatten()
                    })
                    .unwrap_or(0);
                if received.len() >= header_end + 4 + content_length {
                    return text;
                }
            }
            let n = stream.read(&mut chunk).await.unwrap();
            assert_ne!(n, 0, "connection closed before the response completed");
            received.extend_from_slice(&chunk[..n]);
        }
    }

    #[tokio::test]
    async fn test_serves_over_tcp_and_shuts_down() {
        let state = test_state();
        let signals = Arc::new(SignalHandler::new());

        let listener = create_listener("127.0.0.1:0".parse().unwrap()).unwrap();
        let addr = listener.local_addr().unwrap();

        let local = tokio::task::LocalSet::new();
        local
            .run_until(async {
                let server = tokio::task::spawn_local(start_server_loop(
                    listener,
                    state,
                    Arc::new(AtomicUsize::new(0)),
                    ServerLoopConfig {
                        kind: ServerKind::Demo,
                        signals: Arc::clone(&signals),
                    },
                ));

                let redirect = raw_exchange(
                    addr,
                    "GET /go/tesla02 HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n",
                )
                .await;
                assert!(redirect.starts_with("HTTP/1.1 302"));
                assert!(redirect.to_ascii_lowercase().contains("location: https://tesla.com/models"));

                let body = r#"{"name": broken"#;
                let post = raw_exchange(
                    addr,
                    &format!(
                        "POST /api/links HTTP/1.1\r\nHost: localhost\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                        body.len()
                    ),
                )
                .await;
                assert!(post.starts_with("HTTP/1.1 200"));
                assert!(post.contains("Demo mode - request processed"));

                signals.request_shutdown();
                let result = server.await.unwrap();
                assert!(result.is_ok());
            })
            .await;
    }

    #[tokio::test]
    async fn test_shutdown_before_loop_starts_is_honoured() {
        let signals = Arc::new(SignalHandler::new());
        signals.request_shutdown();

        let listener = create_listener("127.0.0.1:0".parse().unwrap()).unwrap();
        let local = tokio::task::LocalSet::new();
        let result = local
            .run_until(tokio::time::timeout(
                Duration::from_secs(2),
                start_server_loop(
                    listener,
                    test_state(),
                    Arc::new(AtomicUsize::new(0)),
                    ServerLoopConfig {
                        kind: ServerKind::Web,
                        signals,
                    },
                ),
            ))
            .await;
        assert!(matches!(result, Ok(Ok(()))));
    }

    #[tokio::test]
    async fn test_idle_keep_alive_connection_does_not_hold_shutdown() {
        let signals = Arc::new(SignalHandler::new());
        let listener = create_listener("127.0.0.1:0".parse().unwrap()).unwrap();
        let addr = listener.local_addr().unwrap();
        let connections = Arc::new(AtomicUsize::new(0));

        let local = tokio::task::LocalSet::new();
        local
            .run_until(async {
                let server = tokio::task::spawn_local(start_server_loop(
                    listener,
                    test_state(),
                    Arc::clone(&connections),
                    ServerLoopConfig {
                        kind: ServerKind::Demo,
                        signals: Arc::clone(&signals),
                    },
                ));

                // One complete request, then leave the connection open and idle
                let mut stream = TcpStream::connect(addr).await.unwrap();
                stream
                    .write_all(b"GET /api/anything HTTP/1.1\r\nHost: localhost\r\n\r\n")
                    .await
                    .unwrap();
                let response = read_one_response(&mut stream).await;
                assert!(response.starts_with("HTTP/1.1 200"));
                assert_eq!(connections.load(Ordering::SeqCst), 1);

                let started = Instant::now();
                signals.request_shutdown();
                let result = tokio::time::timeout(Duration::from_secs(3), server)
                    .await
                    .expect("idle connection held shutdown")
                    .unwrap();
                assert!(result.is_ok());
                assert!(started.elapsed() < Duration::from_secs(3));

                // The server side closed the idle connection
                let mut chunk = [0u8; 64];
                let n = tokio::time::timeout(Duration::from_secs(1), stream.read(&mut chunk))
                    .await
                    .unwrap()
                    .unwrap_or(0);
                assert_eq!(n, 0);
            })
            .await;
    }
}

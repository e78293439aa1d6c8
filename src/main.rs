use std::sync::atomic::AtomicUsize;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;

mod config;
mod fixtures;
mod handler;
mod http;
mod logger;
mod server;

use handler::ServerKind;

const PORT_RELEASE_DELAY: Duration = Duration::from_millis(200);

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Optional config file path (without extension), default "config"
    let config_path = std::env::args().nth(1).unwrap_or_else(|| "config".to_string());
    let cfg = config::Config::load_from(&config_path)?;
    logger::init(&cfg)?;

    // 创建 Tokio 运行时，根据 workers 配置设置线程数
    let mut runtime_builder = tokio::runtime::Builder::new_multi_thread();
    runtime_builder.enable_all();
    if let Some(workers) = cfg.server.workers {
        runtime_builder.worker_threads(workers);
    }
    let runtime = runtime_builder.build()?;

    runtime.block_on(async_main(cfg))
}

async fn async_main(cfg: config::Config) -> Result<(), Box<dyn std::error::Error>> {
    if !cfg.demo.enabled && !cfg.web.enabled {
        return Err("both the demo and the web server are disabled".into());
    }

    logger::log_startup(&cfg);

    let state = Arc::new(config::AppState::new(&cfg));
    let signals = Arc::new(server::SignalHandler::new());
    server::start_signal_handler(Arc::clone(&signals))?;

    let demo_listener = if cfg.demo.enabled {
        let addr = cfg.get_demo_socket_addr()?;
        let listener = server::create_listener(addr)?;
        logger::log_demo_server_start(&addr);
        Some(listener)
    } else {
        logger::log_server_disabled("Demo");
        None
    };

    let web_listener = if cfg.web.enabled {
        let addr = cfg.get_web_socket_addr()?;
        if cfg.web.free_port_on_start
            && server::free_port(addr.port()).await == server::PreemptOutcome::Freed
        {
            // Give the killed process a moment to release the socket
            tokio::time::sleep(PORT_RELEASE_DELAY).await;
        }
        let listener = server::create_listener(addr)?;
        logger::log_web_server_start(&addr, &cfg.web.public_dir);
        Some(listener)
    } else {
        logger::log_server_disabled("Web");
        None
    };

    // Use LocalSet for spawn_local support
    let local = tokio::task::LocalSet::new();
    local
        .run_until(run_servers(demo_listener, web_listener, state, signals))
        .await
}

async fn run_servers(
    demo_listener: Option<TcpListener>,
    web_listener: Option<TcpListener>,
    state: Arc<config::AppState>,
    signals: Arc<server::SignalHandler>,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut servers = Vec::new();

    for (listener, kind) in [
        (demo_listener, ServerKind::Demo),
        (web_listener, ServerKind::Web),
    ] {
        let Some(listener) = listener else {
            continue;
        };
        let task = tokio::task::spawn_local(server::start_server_loop(
            listener,
            Arc::clone(&state),
            Arc::new(AtomicUsize::new(0)),
            server::ServerLoopConfig {
                kind,
                signals: Arc::clone(&signals),
            },
        ));
        servers.push((kind, task));
    }

    for (kind, task) in servers {
        match task.await {
            Ok(Ok(())) => {}
            Ok(Err(e)) => {
                logger::log_error(&format!("{} Server loop failed: {e}", kind.log_prefix()));
            }
            Err(e) => {
                logger::log_error(&format!("{} Server task aborted: {e}", kind.log_prefix()));
            }
        }
    }

    logger::log_info("All servers stopped");
    Ok(())
}

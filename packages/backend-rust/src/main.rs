use std::net::SocketAddr;
use std::sync::Arc;

use lingua_backend_rust::config::Config;
use lingua_backend_rust::logging;
use lingua_backend_rust::seed;
use lingua_backend_rust::state::AppState;
use lingua_backend_rust::store::{MemoryStore, PlanStore};
use lingua_backend_rust::workers::WorkerManager;

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();
    let _log_guard = logging::init_tracing();
    let config = Config::from_env();

    let store = Arc::new(MemoryStore::new());
    if let Ok(path) = std::env::var("SEED_FILE") {
        if let Err(err) = seed::load_seed_file(&store, &path) {
            tracing::warn!(error = %err, path, "seed fixture not loaded");
        }
    }

    let worker_manager =
        match WorkerManager::new(store.clone() as Arc<dyn PlanStore>, config.policy.clone()).await
        {
            Ok(manager) => {
                if let Err(err) = manager.start().await {
                    tracing::error!(error = %err, "failed to start workers");
                }
                Some(manager)
            }
            Err(err) => {
                tracing::warn!(error = %err, "worker manager not initialized");
                None
            }
        };

    let state = AppState::with_memory_store(store, config.policy.clone());
    let app = lingua_backend_rust::create_app(state);

    let addr = config.bind_addr();
    tracing::info!(%addr, "practice engine listening");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("bind listener failed");

    let server = axum::serve(listener, app.into_make_service_with_connect_info::<SocketAddr>())
        .with_graceful_shutdown(shutdown_signal());

    if let Err(err) = server.await {
        tracing::error!(error = %err, "server error");
    }

    if let Some(ref manager) = worker_manager {
        manager.stop().await;
    }

    tracing::info!("graceful shutdown complete");
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        let mut sigterm =
            signal(SignalKind::terminate()).expect("failed to install SIGTERM handler");
        sigterm.recv().await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}

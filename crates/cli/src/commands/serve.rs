use std::sync::Arc;

use anyhow::Result;
use namebook_core::AppConfig;
use namebook_http::{AppState, create_router};
use namebook_service::NameService;
use namebook_storage::StorageBackend;
use tokio::signal;

use crate::connect;

pub(crate) async fn run(config: &AppConfig, port: Option<u16>, host: &str) -> Result<()> {
    let pg = connect(config).await?;
    let storage = Arc::new(StorageBackend::Postgres(pg.clone()));
    let name_service = Arc::new(NameService::new(storage));
    let state = Arc::new(AppState { name_service });

    let router = create_router(state);
    let addr = format!("{host}:{}", port.unwrap_or(config.port));
    tracing::info!("Starting HTTP server on {}", addr);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, router).with_graceful_shutdown(shutdown_signal()).await?;

    pg.close().await;
    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::warn!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
        tracing::info!("Received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                tracing::info!("Received terminate signal, shutting down");
            },
            Err(e) => {
                tracing::warn!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            },
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
}

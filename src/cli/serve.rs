use std::path::PathBuf;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use crate::api;
use crate::cli::commands::ServeArgs;
use crate::config;
use crate::errors::FuzzgateError;
use crate::modules::ModuleRegistry;

pub async fn handle_serve(args: ServeArgs) -> Result<(), FuzzgateError> {
    let path = args.config.as_ref().map(PathBuf::from);
    let mut config = config::load_config(path.as_deref()).await?;
    if let Some(host) = args.host {
        config.server.host = host;
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }
    if let Some(db) = args.db {
        config.server.db = db;
    }

    info!(
        host = %config.server.host,
        port = config.server.port,
        db = %config.server.db,
        deployment = %config.fuzzer.deployment_type,
        "Starting API server"
    );

    let (state, modules) = api::create_app(&config, &ModuleRegistry::builtin())?;
    let app = api::build_router(state, modules);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Listening on {}", addr);

    let shutdown = CancellationToken::new();
    let signal = shutdown.clone();
    tokio::spawn(async move {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "Failed to listen for shutdown signal");
            return;
        }
        info!("Shutdown signal received");
        signal.cancel();
    });

    axum::serve(listener, app)
        .with_graceful_shutdown(async move { shutdown.cancelled().await })
        .await
        .map_err(|e| FuzzgateError::Internal(format!("Server error: {}", e)))?;

    info!("Server stopped");
    Ok(())
}

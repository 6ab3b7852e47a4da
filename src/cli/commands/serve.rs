use anyhow::Context;
use tracing::info;

use super::admin::{provision_admin, Provisioned};
use crate::database;
use crate::routes;
use crate::state::AppState;

pub async fn handle(port: Option<u16>) -> anyhow::Result<()> {
    let mut config = super::load_config()?;
    if let Some(port) = port {
        config.server.port = port;
    }
    info!("Starting Restaurant API in {:?} mode", config.environment);

    let store = database::connect(&config.database)
        .await
        .context("failed to open the store")?;
    if let Some(seed) = &config.bootstrap_admin {
        match provision_admin(store.as_ref(), &seed.email, &seed.password, "", "")
            .await
            .context("failed to create bootstrap admin")?
        {
            Provisioned::Created => {}
            Provisioned::AlreadyExists => info!("Bootstrap admin {} already exists", seed.email),
        }
    }

    let state = AppState::from_config(&config, store);
    let app = routes::app(state, routes::cors_layer(&config.server));

    let bind_addr = format!("0.0.0.0:{}", config.server.port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;

    info!("Restaurant API listening on http://{}", bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("Shut down cleanly");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}

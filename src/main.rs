// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Coach-Gate Server
//!
//! Serves the coaching marketplace page bundle behind the access gate.

use coach_gate::{
    config::{Config, ProfileBackend},
    db::ProfileStore,
    AppState,
};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize structured JSON logging for GCP
    init_logging();

    // Load configuration from environment
    let config = Config::from_env()?;
    tracing::info!(
        port = config.port,
        questionnaire_host = %config.questionnaire_host,
        admin_override = config.admin_email.is_some(),
        "Starting Coach-Gate"
    );

    let store = match config.profile_backend {
        ProfileBackend::Firestore => ProfileStore::new(&config.gcp_project_id).await?,
        ProfileBackend::Memory => {
            tracing::warn!("Using in-memory profile store; every session is unprovisioned");
            ProfileStore::new_in_memory()
        }
    };

    tracing::info!(site_dir = %config.site_dir, "Serving page bundle");

    // Build shared state
    let state = Arc::new(AppState::new(config.clone(), store));

    // Build router
    let app = coach_gate::routes::create_router(state);

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(address = %addr, "Server listening");

    axum::serve(listener, app).await?;
    Ok(())
}

/// Initialize structured JSON logging (GCP-compliant).
fn init_logging() {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("coach_gate=debug,info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(format)
        .init();
}

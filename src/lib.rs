//! # Forge - Mock Data Forge
//!
//! Forge lets a user build a record schema (field name to type and
//! constraints) and ask a generation service for a batch of synthetic
//! records matching it.
//!
//! ## Features
//!
//! - **Schema editing**: insertion-ordered schema store with synthesized,
//!   collision-free field names and copy-on-write snapshots
//! - **Generation client**: request orchestration with an explicit
//!   `Idle -> Submitting -> Succeeded | Failed` state machine
//! - **Generation service**: `POST /api/generate` backed by fake data
//! - **CLI**: serve, generate locally, or request from a remote service
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use forge::adapters::generation_client::HttpGenerationClient;
//! use forge::adapters::session::ForgeSession;
//! use forge::config::Settings;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let settings = Settings::new()?;
//!     let client = Arc::new(HttpGenerationClient::from_settings(&settings.client));
//!
//!     let mut session = ForgeSession::new(client);
//!     session.add_field();
//!     session.generate().await?;
//!     println!("{}", session.render_output().unwrap_or_default());
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! - **Domain**: schema model and the generation request contract
//! - **Adapters**: editor bindings, orchestration, HTTP client and service
//! - **Config**: configuration management

pub mod adapters;
pub mod cli;
pub mod commands;
pub mod config;
pub mod domain;

use crate::adapters::generate_handler::{self, GenerateState};
use crate::adapters::health_handler::HealthHandler;
use crate::adapters::record_generator::RecordGenerator;
use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

/// Creates the Axum router for the generation service.
///
/// # Routes
///
/// * `GET /` - health check
/// * `POST /api/generate` - generate records for a schema
pub fn create_app(generator: Arc<RecordGenerator>) -> Router {
    let health_handler = Arc::new(HealthHandler::new());

    let api_router = Router::new()
        .route("/generate", post(generate_handler::generate_records))
        .with_state(GenerateState { generator });

    Router::new()
        .route("/", get({
            let handler = health_handler.clone();
            move || {
                let h = handler.clone();
                async move { h.health().await }
            }
        }))
        .nest("/api", api_router)
        .layer(
            tower_http::cors::CorsLayer::new()
                .allow_origin(tower_http::cors::Any)
                .allow_methods(tower_http::cors::Any)
                .allow_headers(tower_http::cors::Any),
        )
}

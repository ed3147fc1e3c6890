#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Actix-Web API server for justice graph backlog estimates.
//!
//! Loads the pending-cases dataset once at startup and answers
//! `POST /predict/district-backlog` from the shared, read-only index.
//! A missing or unreadable dataset does not stop the server: it starts
//! with an empty index and every estimate reports no data.

mod handlers;

use std::path::PathBuf;
use std::sync::Arc;

use actix_web::{App, HttpResponse, HttpServer, error, middleware, web};
use justice_graph_backlog::{BacklogEstimator, DEFAULT_DATA_PATH, DatasetIndex};
use justice_graph_server_models::ApiError;

/// Environment variable naming the pending-cases dataset.
pub const DATA_PATH_ENV: &str = "JUSTICE_GRAPH_DATA_PATH";

/// Shared application state.
pub struct AppState {
    /// Estimator over the dataset loaded at startup.
    pub estimator: BacklogEstimator,
}

impl AppState {
    /// Wraps `index` for sharing across workers.
    #[must_use]
    pub fn shared(index: DatasetIndex) -> web::Data<Self> {
        web::Data::new(Self {
            estimator: BacklogEstimator::new(Arc::new(index)),
        })
    }
}

/// Where to find the dataset and where to listen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Path to the pending-cases CSV.
    pub data_path: PathBuf,
    /// Address to bind.
    pub bind_addr: String,
    /// Port to bind.
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from(DEFAULT_DATA_PATH),
            bind_addr: "127.0.0.1".to_string(),
            port: 8080,
        }
    }
}

impl ServerConfig {
    /// Reads `JUSTICE_GRAPH_DATA_PATH`, `BIND_ADDR`, and `PORT`, falling
    /// back to the defaults for anything unset or unparsable.
    #[must_use]
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            data_path: std::env::var(DATA_PATH_ENV).map_or(defaults.data_path, PathBuf::from),
            bind_addr: std::env::var("BIND_ADDR").unwrap_or(defaults.bind_addr),
            port: std::env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(defaults.port),
        }
    }
}

/// Registers the API routes and the JSON body error handler.
pub fn configure(cfg: &mut web::ServiceConfig) {
    let json_config = web::JsonConfig::default().error_handler(|err, _req| {
        let body = ApiError::new(format!("Invalid request body: {err}"));
        error::InternalError::from_response(err, HttpResponse::BadRequest().json(body)).into()
    });

    cfg.app_data(json_config)
        .route("/", web::get().to(handlers::home))
        .route("/api/health", web::get().to(handlers::health))
        .route(
            "/predict/district-backlog",
            web::post().to(handlers::district_backlog),
        );
}

/// Starts the justice graph API server.
///
/// Loads the dataset named by `config`, then serves until the process is
/// stopped. The caller provides the async runtime (e.g. via
/// `#[actix_web::main]`).
///
/// # Errors
///
/// Returns an `std::io::Result` error if the HTTP server fails to bind or
/// encounters a runtime error.
#[allow(clippy::future_not_send)]
pub async fn run_server(config: ServerConfig) -> std::io::Result<()> {
    log::info!(
        "Loading pending-cases dataset from {}...",
        config.data_path.display()
    );
    let index = DatasetIndex::load_or_empty(&config.data_path);
    if index.is_empty() {
        log::warn!("Dataset index is empty; every estimate will report no data");
    }

    let state = AppState::shared(index);

    log::info!("Starting server on {}:{}", config.bind_addr, config.port);

    HttpServer::new(move || {
        App::new()
            .wrap(middleware::Logger::default())
            .app_data(state.clone())
            .configure(configure)
    })
    .bind((config.bind_addr, config.port))?
    .run()
    .await
}

use anyhow::Result;
use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::{
    extract::State,
    middleware,
    response::{Html, IntoResponse},
    routing::get,
    Json, Router,
};
use serde::Serialize;
use tower_http::services::ServeDir;
use tracing::{error, info};

use crate::environment::EnvironmentProfile;
use crate::extractor::ExtractorClient;

use super::download::make_download_routes;
use super::inflight::InflightRegistry;
use super::search::make_api_routes;
use super::{log_requests, metrics, state::ServerState, ServerConfig};

/// Fallback home page served when no frontend directory is configured.
const INDEX_HTML: &str = include_str!("../../static/index.html");

#[derive(Serialize)]
struct StatusResponse {
    platform: String,
    termux: bool,
    ffmpeg_location: String,
    downloads_dir: bool,
    uptime: String,
}

fn format_uptime(duration: Duration) -> String {
    let total_seconds = duration.as_secs();

    let days = total_seconds / 86_400;
    let hours = (total_seconds % 86_400) / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;

    format!("{}d {:02}:{:02}:{:02}", days, hours, minutes, seconds)
}

async fn home() -> impl IntoResponse {
    Html(INDEX_HTML)
}

async fn status(State(state): State<ServerState>) -> impl IntoResponse {
    Json(StatusResponse {
        platform: state.environment.platform.clone(),
        termux: state.environment.termux,
        ffmpeg_location: state.environment.ffmpeg_location.display().to_string(),
        downloads_dir: state.config.downloads_dir.exists(),
        uptime: format_uptime(state.start_time.elapsed()),
    })
}

pub fn make_app(
    config: ServerConfig,
    environment: EnvironmentProfile,
    extractor: Arc<ExtractorClient>,
) -> Router {
    let state = ServerState {
        config: config.clone(),
        start_time: Instant::now(),
        environment,
        extractor,
        inflight: Arc::new(InflightRegistry::new()),
    };

    let home_router: Router = match config.frontend_dir_path {
        Some(frontend_path) => {
            let static_files_service =
                ServeDir::new(frontend_path).append_index_html_on_directories(true);
            Router::new().fallback_service(static_files_service)
        }
        None => Router::new().route("/", get(home)),
    };

    let status_router: Router = Router::new()
        .route("/status", get(status))
        .with_state(state.clone());

    home_router
        .nest("/api", make_api_routes(state.clone()))
        .merge(make_download_routes(state.clone()))
        .merge(status_router)
        .layer(middleware::from_fn_with_state(state, log_requests))
}

pub async fn run_server(
    config: ServerConfig,
    environment: EnvironmentProfile,
    extractor: Arc<ExtractorClient>,
    host: String,
    metrics_port: u16,
) -> Result<()> {
    metrics::init_metrics();

    let port = config.port;
    let app = make_app(config, environment, extractor);

    let metrics_app: Router = Router::new().route("/metrics", get(metrics::metrics_handler));
    let metrics_listener =
        tokio::net::TcpListener::bind(format!("127.0.0.1:{}", metrics_port)).await?;
    tokio::spawn(async move {
        if let Err(err) = axum::serve(metrics_listener, metrics_app).await {
            error!("Metrics server failed: {}", err);
        }
    });

    let listener = tokio::net::TcpListener::bind(format!("{}:{}", host, port)).await?;
    info!("Listening on {}:{}", host, port);

    Ok(axum::serve(listener, app).await?)
}

//! Download-and-transcode routes.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use std::time::Instant;
use tracing::{error, info};

use crate::extractor::TargetFormat;

use super::metrics::record_download;
use super::state::ServerState;
use super::stream_file::stream_artifact;

async fn handle_download(state: &ServerState, video_id: &str, target: TargetFormat) -> Response {
    // Serialize concurrent requests for the same video so they cannot race
    // on the same output file.
    let _guard = state.inflight.acquire(video_id).await;

    let start = Instant::now();
    match state.extractor.download_and_transcode(video_id, target).await {
        Ok(artifact) => {
            record_download(target, true, start.elapsed());
            info!("Serving {}", artifact.file_path.display());
            stream_artifact(&artifact).await
        }
        Err(err) => {
            record_download(target, false, start.elapsed());
            error!("Download failed for {}: {}", video_id, err);
            (StatusCode::INTERNAL_SERVER_ERROR, format!("Error: {}", err)).into_response()
        }
    }
}

async fn download_flac(
    State(state): State<ServerState>,
    Path(video_id): Path<String>,
) -> Response {
    handle_download(&state, &video_id, TargetFormat::Flac).await
}

async fn download_mp3(State(state): State<ServerState>, Path(video_id): Path<String>) -> Response {
    handle_download(&state, &video_id, TargetFormat::Mp3).await
}

pub fn make_download_routes(state: ServerState) -> Router {
    Router::new()
        .route("/download/{video_id}", get(download_flac))
        .route("/download-mp3/{video_id}", get(download_mp3))
        .with_state(state)
}

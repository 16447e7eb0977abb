//! Search API routes

use axum::{
    extract::{Query, State},
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;
use tracing::warn;

use super::metrics::record_search;
use super::state::{GuardedExtractor, ServerState};

/// Fixed result cap for the search endpoint.
pub const SEARCH_RESULT_LIMIT: usize = 4;

#[derive(Deserialize)]
struct SearchParams {
    #[serde(default)]
    query: String,
}

async fn api_search(
    State(extractor): State<GuardedExtractor>,
    Query(params): Query<SearchParams>,
) -> impl IntoResponse {
    match extractor.search(&params.query, SEARCH_RESULT_LIMIT).await {
        Ok(results) => {
            record_search(true);
            Json(results).into_response()
        }
        Err(err) => {
            warn!("Search failed for {:?}: {}", params.query, err);
            record_search(false);
            // Failures keep a 200 status; clients inspect the payload shape.
            Json(json!({"error": "search failed"})).into_response()
        }
    }
}

pub fn make_api_routes(state: ServerState) -> Router {
    Router::new()
        .route("/search", get(api_search))
        .with_state(state)
}

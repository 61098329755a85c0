//! REST API endpoint handlers for the Observer server.
//!
//! All handlers read the published run from the shared [`AppState`].
//!
//! # Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `GET` | `/api/health` | Liveness plus the published run id |
//! | `GET` | `/api/simulation` | Render feed JSON |
//! | `GET` | `/api/state` | Final state YAML (`?download=true` for an attachment) |

use std::sync::Arc;

use axum::Json;
use axum::extract::{Query, State};
use axum::http::{HeaderMap, HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Response};
use biome_store::{Download, encode_document};

use crate::error::ObserverError;
use crate::state::AppState;

/// Query parameters for the `GET /api/state` endpoint.
#[derive(Debug, Default, serde::Deserialize)]
pub struct StateQuery {
    /// Serve the document as an `output.yaml` attachment.
    pub download: Option<bool>,
}

// ---------------------------------------------------------------------------
// GET /api/health
// ---------------------------------------------------------------------------

/// Report liveness and which run, if any, is being served.
pub async fn health(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let published = state
        .run
        .read()
        .await
        .as_ref()
        .map(|r| (r.run_id, r.completed_at));
    Json(serde_json::json!({
        "status": "ok",
        "run_id": published.map(|(run_id, _)| run_id),
        "completed_at": published.map(|(_, completed_at)| completed_at),
    }))
}

// ---------------------------------------------------------------------------
// GET /api/simulation
// ---------------------------------------------------------------------------

/// Return the render feed (`{life, cells}`) of the published run.
pub async fn get_simulation(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, ObserverError> {
    let feed = state
        .run
        .read()
        .await
        .as_ref()
        .map(|r| r.feed.clone())
        .ok_or_else(|| ObserverError::NotFound("no simulation has been published".to_owned()))?;
    Ok(Json(feed))
}

// ---------------------------------------------------------------------------
// GET /api/state
// ---------------------------------------------------------------------------

/// Return the final state of the published run as YAML.
///
/// # Query Parameters
///
/// - `download`: when `true`, adds a `Content-Disposition` attachment
///   header naming `output.yaml`.
pub async fn get_state(
    State(state): State<Arc<AppState>>,
    Query(query): Query<StateQuery>,
) -> Result<Response, ObserverError> {
    let final_state = state
        .run
        .read()
        .await
        .as_ref()
        .map(|r| r.final_state.clone())
        .ok_or_else(|| ObserverError::NotFound("no final state has been published".to_owned()))?;

    let download = Download::yaml(encode_document(&final_state)?.into_bytes());
    let mut headers = HeaderMap::new();
    headers.insert(header::CONTENT_TYPE, header_value(&download.content_type)?);
    if query.download.unwrap_or(false) {
        headers.insert(
            header::CONTENT_DISPOSITION,
            header_value(&download.content_disposition)?,
        );
    }

    Ok((StatusCode::OK, headers, download.body).into_response())
}

fn header_value(value: &str) -> Result<HeaderValue, ObserverError> {
    HeaderValue::from_str(value)
        .map_err(|e| ObserverError::Internal(format!("bad header {value:?}: {e}")))
}

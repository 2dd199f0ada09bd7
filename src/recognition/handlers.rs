use axum::{
    extract::{DefaultBodyLimit, Multipart, State},
    http::StatusCode,
    routing::post,
    Json, Router,
};
use bytes::Bytes;
use tracing::{instrument, warn};

use super::dto::{AnalyzeBytesRequest, AnalyzeResponse};
use super::service;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/analyze", post(analyze_multipart))
        .route("/analyze/bytes", post(analyze_bytes))
        .layer(DefaultBodyLimit::max(20 * 1024 * 1024)) // 20MB
}

/// POST /analyze (multipart, field `file`)
#[instrument(skip(state, mp))]
pub async fn analyze_multipart(
    State(state): State<AppState>,
    mut mp: Multipart,
) -> Result<Json<AnalyzeResponse>, (StatusCode, String)> {
    let mut image: Option<Bytes> = None;
    while let Ok(Some(field)) = mp.next_field().await {
        let name = field.name().map(|s| s.to_string());
        if name.as_deref() == Some("file") || name.as_deref() == Some("image") {
            image = Some(field.bytes().await.map_err(internal)?);
            break;
        }
    }
    let Some(image) = image else {
        return Err((StatusCode::BAD_REQUEST, "file is required".into()));
    };

    Ok(Json(run_analysis(&state, image).await))
}

/// POST /analyze/bytes { image: [...] }
#[instrument(skip(state, body))]
pub async fn analyze_bytes(
    State(state): State<AppState>,
    Json(body): Json<AnalyzeBytesRequest>,
) -> Result<Json<AnalyzeResponse>, (StatusCode, String)> {
    if body.image.is_empty() {
        return Err((StatusCode::BAD_REQUEST, "image must be non-empty".into()));
    }
    let image = Bytes::from(body.image.into_vec());
    Ok(Json(run_analysis(&state, image).await))
}

async fn run_analysis(state: &AppState, image: Bytes) -> AnalyzeResponse {
    match service::analyze(state, image).await {
        Ok(record) => AnalyzeResponse {
            record,
            fallback: false,
        },
        Err(e) => {
            warn!(error = %e, "recognition failed, serving fallback record");
            AnalyzeResponse {
                record: service::fallback_record(),
                fallback: true,
            }
        }
    }
}

fn internal<E: std::error::Error>(e: E) -> (StatusCode, String) {
    (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
}

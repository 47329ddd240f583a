use std::sync::Arc;

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::Json;

use crate::job::{JobRunner, JobSlot, TranscribeRequest};

pub struct AppState {
    pub slot: JobSlot,
    pub runner: Arc<dyn JobRunner>,
    pub secret: Option<String>,
}

pub type SharedState = Arc<AppState>;

/// GET /health: liveness, always 200 while the process is up.
pub async fn health(State(state): State<SharedState>) -> Json<serde_json::Value> {
    let job_state = if state.slot.is_busy() {
        "processing"
    } else {
        "idle"
    };
    Json(serde_json::json!({ "status": "ok", "state": job_state }))
}

/// POST /transcribe: accept one job and run the pipeline on a blocking
/// worker. At most one job is in flight; a concurrent request is rejected
/// with 409. There is no queue; callers poll or retry.
pub async fn transcribe(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Json(request): Json<TranscribeRequest>,
) -> (StatusCode, Json<serde_json::Value>) {
    if let Some(expected) = &state.secret {
        let provided = headers
            .get("x-webhook-secret")
            .and_then(|v| v.to_str().ok());
        if provided != Some(expected.as_str()) {
            return (
                StatusCode::UNAUTHORIZED,
                Json(serde_json::json!({ "status": "unauthorized" })),
            );
        }
    }

    let guard = match state.slot.try_acquire() {
        Some(guard) => guard,
        None => {
            return (
                StatusCode::CONFLICT,
                Json(serde_json::json!({
                    "status": "busy",
                    "error": "a transcription job is already running"
                })),
            );
        }
    };

    let file_count = request.audio_files.len();
    let runner = Arc::clone(&state.runner);
    tokio::task::spawn_blocking(move || {
        let _guard = guard;
        match runner.run(&request) {
            Ok(summary) => log::info!(
                "job done: {} transcribed, {} skipped, {} failed",
                summary.transcribed,
                summary.skipped,
                summary.failed
            ),
            Err(e) => log::error!("job failed: {e}"),
        }
    });

    (
        StatusCode::OK,
        Json(serde_json::json!({ "status": "accepted", "files": file_count })),
    )
}

//! Webhook bridge: accepts a transcription job over HTTP and runs the
//! batch pipeline on the repository working tree it owns.
//!
//! `GET /health` reports liveness and the current job state.
//! `POST /transcribe` accepts `{repository_url, audio_files, commit, pusher}`
//! while idle and rejects with 409 while a job is in flight.

use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;

mod config;
mod job;
mod routes;

use config::ServerConfig;
use job::{JobSlot, PipelineJobRunner};
use routes::AppState;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    env_logger::init();

    let config = ServerConfig::from_env();
    log::info!(
        "voicescribe-server on {} (repo {}, backend {})",
        config.bind,
        config.repo_dir.display(),
        config.backend
    );

    let state = Arc::new(AppState {
        slot: JobSlot::new(),
        runner: Arc::new(PipelineJobRunner::new(config.clone())),
        secret: config.secret.clone(),
    });

    let app = Router::new()
        .route("/health", get(routes::health))
        .route("/transcribe", post(routes::transcribe))
        .with_state(state);

    let listener = tokio::net::TcpListener::bind(&config.bind).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

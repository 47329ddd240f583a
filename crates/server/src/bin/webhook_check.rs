//! Companion checker for the webhook bridge.
//!
//! Usage:
//!   webhook-check [BASE_URL] [--secret SECRET]
//!
//! Performs a health GET and a sample transcribe POST against the server
//! (default http://127.0.0.1:8787) and prints both responses. Exits 2 when
//! the server is unreachable, 1 when a response is outside 2xx.

use std::process;
use std::time::Duration;

fn main() {
    let mut args = std::env::args().skip(1);
    let mut base_url = "http://127.0.0.1:8787".to_string();
    let mut secret: Option<String> = None;

    while let Some(a) = args.next() {
        match a.as_str() {
            "--secret" => secret = args.next(),
            other => base_url = other.trim_end_matches('/').to_string(),
        }
    }

    let client = match reqwest::blocking::Client::builder()
        .timeout(Duration::from_secs(10))
        .build()
    {
        Ok(c) => c,
        Err(e) => {
            eprintln!("failed to build HTTP client: {e}");
            process::exit(2);
        }
    };

    // 1. Health endpoint
    let health_url = format!("{base_url}/health");
    let response = match client.get(&health_url).send() {
        Ok(r) => r,
        Err(e) => {
            eprintln!("webhook unreachable at {health_url}: {e}");
            process::exit(2);
        }
    };
    let status = response.status();
    let body = response.text().unwrap_or_default();
    println!("GET /health -> {status}: {body}");
    if !status.is_success() {
        process::exit(1);
    }

    // 2. Transcribe endpoint with a sample payload
    let payload = serde_json::json!({
        "repository_url": "https://example.com/voice-notes.git",
        "audio_files": [],
        "commit": "HEAD",
        "pusher": "webhook-check",
    });

    let mut request = client.post(format!("{base_url}/transcribe")).json(&payload);
    if let Some(secret) = &secret {
        request = request.header("x-webhook-secret", secret);
    }

    let response = match request.send() {
        Ok(r) => r,
        Err(e) => {
            eprintln!("webhook unreachable at {base_url}/transcribe: {e}");
            process::exit(2);
        }
    };
    let status = response.status();
    let body = response.text().unwrap_or_default();
    println!("POST /transcribe -> {status}: {body}");
    if !status.is_success() {
        process::exit(1);
    }

    println!("webhook bridge OK");
}

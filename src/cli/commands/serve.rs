//! HTTP API server for integration with other systems.
//!
//! Exposes the shift extraction logic over REST.

use crate::cli::{preflight, Output};
use crate::config::{Prompts, Settings};
use crate::llm::OllamaClient;
use crate::schedule::{Shift, ShiftExtractor};
use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tower_http::cors::{Any, CorsLayer};
use tracing::{error, info};

/// Shared application state.
struct AppState {
    extractor: ShiftExtractor,
}

/// Run the HTTP API server.
pub async fn run_serve(
    host: Option<String>,
    port: Option<u16>,
    settings: Settings,
) -> anyhow::Result<()> {
    if let Err(e) = preflight::check(&settings) {
        Output::error(&format!("{}", e));
        Output::info("Run 'vakt doctor' for detailed diagnostics.");
        return Err(e.into());
    }

    let host = host.unwrap_or_else(|| settings.server.host.clone());
    let port = port.unwrap_or(settings.server.port);

    let client = OllamaClient::with_timeout(
        &settings.llm.endpoint,
        &settings.llm.model,
        settings.llm.extract_temperature,
        Duration::from_secs(settings.llm.timeout_seconds),
    )?;

    let prompts = Prompts::load(
        settings.prompts.custom_dir.as_deref(),
        Some(&settings.prompts.variables),
    )?;

    let state = Arc::new(AppState {
        extractor: ShiftExtractor::new(Arc::new(client), prompts),
    });

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = Router::new()
        .route("/", get(health))
        .route("/schedule", post(schedule))
        .layer(cors)
        .with_state(state);

    let addr = format!("{}:{}", host, port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    Output::header("Vakt API Server");
    println!();
    Output::success(&format!("Listening on http://{}", addr));
    println!();
    println!("Endpoints:");
    Output::kv("Health", "GET  /");
    Output::kv("Schedule", "POST /schedule");
    println!();
    Output::info("Press Ctrl+C to stop the server.");

    axum::serve(listener, app).await?;

    Ok(())
}

// === Request/Response Types ===

#[derive(Deserialize)]
struct ScheduleRequest {
    /// Natural-language scheduling request
    query: String,
    /// Identifier for the requesting user
    user_id: String,
}

#[derive(Serialize)]
struct ScheduleResponse {
    status: String,
    response: String,
    user_id: String,
    /// The extracted shift, or null when extraction failed.
    shift_data: Option<Shift>,
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    service: &'static str,
    version: &'static str,
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

// === Handlers ===

async fn health() -> impl IntoResponse {
    Json(HealthResponse {
        status: "online",
        service: "Vakt Scheduling API",
        version: env!("CARGO_PKG_VERSION"),
    })
}

async fn schedule(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ScheduleRequest>,
) -> impl IntoResponse {
    info!("Schedule request from {}: '{}'", req.user_id, req.query);

    match state.extractor.extract(&req.query).await {
        Ok(Some(shift)) => {
            let response = format!("Got it! I've logged your shift for {}.", shift);
            Json(ScheduleResponse {
                status: "success".to_string(),
                response,
                user_id: req.user_id,
                shift_data: Some(shift),
            })
            .into_response()
        }
        Ok(None) => {
            let response = "My apologies, I couldn't understand the shift details. \
                Could you please try again? For example: 'Schedule me for Tuesday 10am to 4pm'."
                .to_string();
            Json(ScheduleResponse {
                status: "success".to_string(),
                response,
                user_id: req.user_id,
                shift_data: None,
            })
            .into_response()
        }
        Err(e) => {
            error!("Extraction failed for {}: {}", req.user_id, e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: e.to_string(),
                }),
            )
                .into_response()
        }
    }
}

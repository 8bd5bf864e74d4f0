//! HTTP API for PDF analysis and SCORM export.
//!
//! Endpoints:
//! - POST /api/analyze-pdf - multipart upload (`pdf_file` + `query`), returns
//!   the extracted text and the model's answer
//! - POST /api/download-scorm - JSON (`response` + `scorm_type`), returns a
//!   SCORM zip as an attachment
//! - GET /health - status probe

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use axum::{
    extract::{DefaultBodyLimit, Multipart, State},
    http::{header, StatusCode},
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use tower_http::cors::CorsLayer;
use tower_http::limit::RequestBodyLimitLayer;

use crate::ai::{self, AiError};
use crate::config::Config;
use crate::extract;
use crate::scorm::{PackageBuilder, PackageFormat};

/// Upload cap for the multipart body (PDFs plus form overhead).
const MAX_UPLOAD_BYTES: usize = 25 * 1024 * 1024;

/// Client-facing name of every downloaded archive; the server-side file
/// keeps its unique per-request name until it is read and deleted.
const DOWNLOAD_NAME: &str = "scorm_package.zip";

// ============================================================================
// AppState
// ============================================================================

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    builder: Arc<PackageBuilder>,
    start_time: Instant,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let builder = PackageBuilder::new(&config.output_dir, &config.branding_path);
        Self {
            config: Arc::new(config),
            builder: Arc::new(builder),
            start_time: Instant::now(),
        }
    }
}

// ============================================================================
// Error type
// ============================================================================

/// Error payload rendered as `{"error": ...}` with a status code. The body
/// is a plain message for input errors and a structured object for
/// completion-service failures, so callers can always tell an answer from a
/// failure.
pub struct AppError(StatusCode, serde_json::Value);

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        (self.0, Json(serde_json::json!({ "error": self.1 }))).into_response()
    }
}

impl From<AiError> for AppError {
    fn from(err: AiError) -> Self {
        tracing::warn!(provider = %err.provider, model = %err.model, "completion call failed: {}", err);
        let value = serde_json::to_value(&err)
            .unwrap_or_else(|_| serde_json::Value::String(err.message.clone()));
        AppError(StatusCode::BAD_GATEWAY, value)
    }
}

fn bad_request(msg: impl Into<String>) -> AppError {
    AppError(StatusCode::BAD_REQUEST, serde_json::Value::String(msg.into()))
}

fn internal(err: impl std::fmt::Display) -> AppError {
    tracing::error!("request failed: {}", err);
    AppError(
        StatusCode::INTERNAL_SERVER_ERROR,
        serde_json::Value::String(format!("Error: {}", err)),
    )
}

// ============================================================================
// Request / Response types
// ============================================================================

#[derive(Serialize)]
struct AnalyzeResponse {
    pdf_text: String,
    response: String,
}

#[derive(Deserialize)]
struct DownloadScormRequest {
    #[serde(default)]
    response: String,
    #[serde(default)]
    scorm_type: String,
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
    uptime_secs: u64,
    time: chrono::DateTime<chrono::Utc>,
}

// ============================================================================
// Handlers
// ============================================================================

async fn analyze_pdf_handler(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<AnalyzeResponse>, AppError> {
    let mut pdf_bytes: Option<Vec<u8>> = None;
    let mut query: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| bad_request(format!("Invalid multipart payload: {}", e)))?
    {
        let name = field.name().map(str::to_owned);
        match name.as_deref() {
            Some("pdf_file") => {
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| bad_request(format!("Failed to read upload: {}", e)))?;
                pdf_bytes = Some(bytes.to_vec());
            }
            Some("query") => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| bad_request(format!("Failed to read query: {}", e)))?;
                query = Some(text);
            }
            _ => {}
        }
    }

    let pdf_bytes = pdf_bytes.ok_or_else(|| bad_request("No PDF uploaded."))?;
    let query = query.unwrap_or_default();
    let query = query.trim();
    if query.is_empty() {
        return Err(bad_request("Query is required."));
    }

    let pdf_text = extract::extract_text(&pdf_bytes).map_err(internal)?;
    tracing::debug!(chars = pdf_text.len(), "extracted PDF text");

    let answer = ai::openai::ask(&state.config.api_key, &state.config.model, &pdf_text, query)
        .await?;

    Ok(Json(AnalyzeResponse {
        pdf_text,
        response: answer,
    }))
}

async fn download_scorm_handler(
    State(state): State<AppState>,
    Json(req): Json<DownloadScormRequest>,
) -> Result<impl IntoResponse, AppError> {
    // Selector validation happens before any file I/O
    let format = PackageFormat::from_str(&req.scorm_type)
        .ok_or_else(|| bad_request("Invalid SCORM type selected."))?;

    let archive_path: PathBuf = state
        .builder
        .build(&req.response, format)
        .map_err(internal)?;

    let bytes = tokio::fs::read(&archive_path).await.map_err(internal)?;
    if let Err(e) = tokio::fs::remove_file(&archive_path).await {
        tracing::warn!(
            archive = %archive_path.display(),
            "failed to remove served archive: {}",
            e
        );
    }

    Ok((
        [
            (header::CONTENT_TYPE, "application/zip".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", DOWNLOAD_NAME),
            ),
        ],
        bytes,
    ))
}

async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        uptime_secs: state.start_time.elapsed().as_secs(),
        time: chrono::Utc::now(),
    })
}

// ============================================================================
// Router
// ============================================================================

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/analyze-pdf", post(analyze_pdf_handler))
        .route("/api/download-scorm", post(download_scorm_handler))
        .route("/health", get(health_handler))
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .layer(RequestBodyLimitLayer::new(MAX_UPLOAD_BYTES))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

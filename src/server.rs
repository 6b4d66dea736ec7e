//! HTTP surface: `POST /process` plus permissive CORS.
//!
//! The handler reads the two multipart fields, hands the bytes to
//! [`process_upload`] on the blocking pool, and maps the outcome to a JSON
//! body. Recognized client mistakes get a `{"error": ...}` body; anything
//! else is logged and answered with a plain 500.

use crate::config::ServiceConfig;
use crate::imaging::{ImageBackend, ProcessError, ProcessedImages, RustBackend, process_upload};
use axum::body::Bytes;
use axum::extract::multipart::MultipartError;
use axum::extract::{DefaultBodyLimit, Multipart, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Json, Router};
use serde_json::json;
use std::sync::Arc;
use std::time::Instant;
use thiserror::Error;
use tokio::task::JoinError;
use tower_http::cors::{Any, CorsLayer};
use tracing::{error, info};

/// Errors surfaced by the `/process` handler.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error(transparent)]
    Process(#[from] ProcessError),
    #[error("Missing form field `{0}`")]
    MissingField(&'static str),
    #[error(transparent)]
    Multipart(#[from] MultipartError),
    #[error("worker task failed: {0}")]
    Worker(#[from] JoinError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Process(ProcessError::InvalidImage(_) | ProcessError::UnknownOperation) => {
                json_error(StatusCode::BAD_REQUEST, &self)
            }
            ApiError::MissingField(_) => json_error(StatusCode::UNPROCESSABLE_ENTITY, &self),
            ApiError::Multipart(ref e) => json_error(e.status(), &self),
            ApiError::Process(ProcessError::Backend(_)) | ApiError::Worker(_) => {
                error!("/process error {:?}", self);
                (StatusCode::INTERNAL_SERVER_ERROR, "internal server error").into_response()
            }
        }
    }
}

fn json_error(status: StatusCode, err: &ApiError) -> Response {
    (status, Json(json!({ "error": err.to_string() }))).into_response()
}

/// Build the application router around a backend.
pub fn router_with_backend<B>(config: &ServiceConfig, backend: B) -> Router
where
    B: ImageBackend + 'static,
{
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/process", post(handle_process::<B>))
        .layer(DefaultBodyLimit::max(config.limits.max_upload_bytes))
        .layer(cors)
        .with_state(Arc::new(backend))
}

/// Build the application router with the production backend.
pub fn router(config: &ServiceConfig) -> Router {
    router_with_backend(config, RustBackend::new())
}

async fn handle_process<B>(
    State(backend): State<Arc<B>>,
    mut multipart: Multipart,
) -> Result<Json<ProcessedImages>, ApiError>
where
    B: ImageBackend + 'static,
{
    let mut file: Option<Bytes> = None;
    let mut operation: Option<String> = None;

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().map(str::to_owned);
        match name.as_deref() {
            Some("file") => file = Some(field.bytes().await?),
            Some("operation") => operation = Some(field.text().await?),
            _ => (),
        }
    }

    let file = file.ok_or(ApiError::MissingField("file"))?;
    let operation = operation.ok_or(ApiError::MissingField("operation"))?;

    let started = Instant::now();
    let upload_len = file.len();
    let result = tokio::task::spawn_blocking({
        let operation = operation.clone();
        move || process_upload(backend.as_ref(), &file, &operation)
    })
    .await?;

    match &result {
        Ok(_) => info!(
            operation = %operation,
            bytes = upload_len,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "/process ok"
        ),
        Err(e) => info!(operation = %operation, bytes = upload_len, "/process failed: {:?}", e),
    }

    Ok(Json(result?))
}

/// Bind the configured address and serve until Ctrl-C.
pub async fn serve(config: &ServiceConfig) -> std::io::Result<()> {
    let listener = tokio::net::TcpListener::bind(config.bind_address()).await?;
    info!("imgop listening on {}", listener.local_addr()?);
    axum::serve(listener, router(config))
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!("imgop stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("failed to listen for shutdown signal {:?}", e);
    }
}

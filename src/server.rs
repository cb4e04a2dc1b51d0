//! HTTP host for the pipeline.
//!
//! - `POST /binarize`  raw image body -> `image/png` binarized image
//! - `POST /histogram` raw image body -> `image/png` intensity histogram chart
//! - `GET  /health`    JSON liveness probe

use axum::{
    Json, Router,
    body::Bytes,
    extract::DefaultBodyLimit,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde::Serialize;
use thiserror::Error;
use tracing::{error, info, warn};

use crate::config::ServerConfig;
use crate::error::{PipelineError, Result};
use crate::pipeline;

/// Errors that stop the server.
#[derive(Error, Debug)]
pub enum ServerError {
    /// The listener couldn't bind.
    #[error("failed to bind to {addr}: {source}")]
    Bind {
        /// Requested `host:port`.
        addr: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// The accept loop failed.
    #[error("server error: {0}")]
    Serve(#[from] std::io::Error),
}

#[derive(Debug, Serialize)]
struct HealthInfo {
    status: &'static str,
    service: &'static str,
}

/// Build the application router.
pub fn router(config: &ServerConfig) -> Router {
    Router::new()
        .route("/binarize", post(binarize_handler))
        .route("/histogram", post(histogram_handler))
        .route("/health", get(health_handler))
        .layer(DefaultBodyLimit::max(config.max_upload_bytes))
}

/// Bind and serve until Ctrl-C.
pub async fn serve(config: &ServerConfig) -> std::result::Result<(), ServerError> {
    let addr = format!("{}:{}", config.bind_address, config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|source| ServerError::Bind {
            addr: addr.clone(),
            source,
        })?;

    info!("EcliPixel server listening on {}", addr);
    info!("Binarize endpoint: http://{}/binarize", addr);
    info!("Histogram endpoint: http://{}/histogram", addr);
    info!("Health endpoint: http://{}/health", addr);

    axum::serve(listener, router(config))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for Ctrl-C: {}", e);
        std::future::pending::<()>().await;
    }
}

async fn binarize_handler(body: Bytes) -> Response {
    run_pipeline("binarize", body, pipeline::binarize).await
}

async fn histogram_handler(body: Bytes) -> Response {
    run_pipeline("histogram", body, pipeline::histogram).await
}

async fn health_handler() -> Json<HealthInfo> {
    Json(HealthInfo {
        status: "ok",
        service: "eclipixel",
    })
}

async fn run_pipeline(
    name: &'static str,
    body: Bytes,
    op: fn(&[u8]) -> Result<Vec<u8>>,
) -> Response {
    let input_bytes = body.len();
    match tokio::task::spawn_blocking(move || op(&body)).await {
        Ok(Ok(png)) => {
            info!(operation = name, input_bytes, output_bytes = png.len(), "request served");
            ([(header::CONTENT_TYPE, "image/png")], png).into_response()
        }
        Ok(Err(e)) => {
            warn!(operation = name, input_bytes, "request failed: {}", e);
            (status_for(&e), e.to_string()).into_response()
        }
        Err(e) => {
            error!(operation = name, "pipeline task panicked: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "internal error".to_string()).into_response()
        }
    }
}

/// HTTP status reported for each pipeline failure
pub fn status_for(err: &PipelineError) -> StatusCode {
    match err {
        PipelineError::Decode(_) => StatusCode::UNPROCESSABLE_ENTITY,
        PipelineError::InvalidInput(_) | PipelineError::Encode(_) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

/// Errors surfaced at the handler boundary. Everything below the transport
/// layer is caught here; callers always receive a JSON body with a `status`
/// marker.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("{0}")]
    Validation(String),

    #[error("Error processing model generation: {0:#}")]
    Generation(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Generation(e) => {
                tracing::error!("Model generation failed: {:?}", e);
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let body = Json(json!({
            "message": self.to_string(),
            "status": "error",
        }));

        (status, body).into_response()
    }
}

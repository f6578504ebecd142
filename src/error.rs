use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::error;

/// Errors surfaced by the translation endpoint
#[derive(Debug, Error)]
pub enum TranslateError {
    #[error("Invalid request body: {0}")]
    InvalidBody(String),

    #[error("Missing field: {0}")]
    MissingField(&'static str),

    #[error("Input text is empty")]
    EmptyInput,

    #[error("Word not in vocabulary: {0}")]
    UnknownWord(String),

    #[error("Translation service error: {0}")]
    Upstream(String),

    #[error("Model error: {0}")]
    Model(#[from] anyhow::Error),
}

impl TranslateError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            TranslateError::InvalidBody(_)
            | TranslateError::MissingField(_)
            | TranslateError::EmptyInput
            | TranslateError::UnknownWord(_) => StatusCode::BAD_REQUEST,
            TranslateError::Upstream(_) => StatusCode::BAD_GATEWAY,
            TranslateError::Model(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<reqwest::Error> for TranslateError {
    fn from(err: reqwest::Error) -> Self {
        TranslateError::Upstream(err.to_string())
    }
}

impl IntoResponse for TranslateError {
    fn into_response(self) -> Response {
        let message = self.to_string();
        error!("Error occurred: {}", message);
        (self.status_code(), Json(json!({ "error": message }))).into_response()
    }
}

use axum::{body::Bytes, extract::State, Json};
use serde_json::{json, Value};
use tracing::{info, info_span, Instrument};
use uuid::Uuid;

use crate::error::TranslateError;
use crate::state::AppState;
use crate::translate::TranslateResponse;

/// `POST /translate`. The body is parsed as JSON whatever its content type.
pub async fn translate(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<TranslateResponse>, TranslateError> {
    let request_id = Uuid::new_v4();
    handle_translate(state, body)
        .instrument(info_span!("translate", request_id = %request_id))
        .await
}

async fn handle_translate(
    state: AppState,
    body: Bytes,
) -> Result<Json<TranslateResponse>, TranslateError> {
    info!("Translation request received.");

    let data: Value =
        serde_json::from_slice(&body).map_err(|e| TranslateError::InvalidBody(e.to_string()))?;
    info!("Received data: {}", data);

    let input_text = data
        .get("input_text")
        .and_then(Value::as_str)
        .ok_or(TranslateError::MissingField("input_text"))?;

    let translation = state.translator.translate(input_text).await?;
    info!(
        "Translated text: {} (engine: {:?})",
        translation.text, translation.engine
    );

    let response = TranslateResponse {
        translated_text: translation.text,
    };
    info!("Sending response data: {:?}", response);
    Ok(Json(response))
}

/// `GET /api/health`
pub async fn health_check(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "model": state.translator.model_name(),
        "fallback": state.translator.fallback_provider(),
        "target_lang": state.config.fallback_config.target_lang,
        "started_at": state.started_at.to_rfc3339(),
    }))
}

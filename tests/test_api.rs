use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use ndarray::Array2;
use serde_json::{json, Value};
use tower::ServiceExt;

use celita_backend::config::{Config, FallbackConfig, ModelConfig, ServerConfig};
use celita_backend::routes::create_app;
use celita_backend::state::AppState;
use celita_backend::translate::{FallbackTranslator, Seq2SeqModel, TranslationService, WordTokenizer};
use celita_backend::TranslateError;

const MAX_LEN: usize = 8;

/// Always predicts "salamat kaayo end"
struct FixedModel;

impl Seq2SeqModel for FixedModel {
    fn predict(&self, _enc: &[i64], _dec: &[i64]) -> anyhow::Result<Array2<f32>> {
        let mut out = Array2::zeros((MAX_LEN, 7));
        out[[0, 5]] = 1.0;
        out[[1, 6]] = 1.0;
        out[[2, 2]] = 1.0;
        Ok(out)
    }

    fn name(&self) -> &str {
        "fixed"
    }
}

struct UppercaseFallback;

#[async_trait]
impl FallbackTranslator for UppercaseFallback {
    async fn translate(&self, text: &str, target_lang: &str) -> Result<String, TranslateError> {
        Ok(format!("{}:{}", target_lang, text.to_uppercase()))
    }

    fn provider(&self) -> &str {
        "uppercase"
    }
}

struct DownFallback;

#[async_trait]
impl FallbackTranslator for DownFallback {
    async fn translate(&self, _text: &str, _target_lang: &str) -> Result<String, TranslateError> {
        Err(TranslateError::Upstream("connection refused".into()))
    }

    fn provider(&self) -> &str {
        "down"
    }
}

fn app_with(fallback: Arc<dyn FallbackTranslator>) -> Router {
    let words = [
        ("start", 1),
        ("end", 2),
        ("thank", 3),
        ("you", 4),
        ("salamat", 5),
        ("kaayo", 6),
    ];
    let tokenizer = WordTokenizer::new(words.iter().map(|(w, i)| (w.to_string(), *i)).collect());

    let mut model_config = ModelConfig::new("model.onnx", "tokenizer.json");
    model_config.max_len = MAX_LEN;
    model_config.max_output_length = MAX_LEN;
    model_config.seed = Some(3);

    let config = Config {
        server_config: ServerConfig::default(),
        model_config: model_config.clone(),
        fallback_config: FallbackConfig::default(),
    };

    let translator = TranslationService::new(
        Arc::new(FixedModel),
        Arc::new(tokenizer),
        fallback,
        &model_config,
        "ceb",
    );
    create_app(AppState::with_translator(config, translator))
}

async fn post(app: Router, uri: &str, body: &str) -> (StatusCode, Value) {
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn sentence_is_translated_by_model() {
    let app = app_with(Arc::new(UppercaseFallback));
    let (status, body) = post(app, "/translate", r#"{"input_text": "Thank you"}"#).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"translated_text": "salamat kaayo"}));
}

#[tokio::test]
async fn single_word_goes_to_fallback() {
    let app = app_with(Arc::new(UppercaseFallback));
    let (status, body) = post(app, "/translate/", r#"{"input_text": "Hello!"}"#).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["translated_text"], "ceb:HELLO");
}

#[tokio::test]
async fn out_of_vocabulary_sentence_goes_to_fallback() {
    let app = app_with(Arc::new(UppercaseFallback));
    let (status, body) = post(app, "/translate", r#"{"input_text": "Thank you @bob"}"#).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["translated_text"], "ceb:THANK YOU ");
}

#[tokio::test]
async fn malformed_json_is_bad_request() {
    let app = app_with(Arc::new(UppercaseFallback));
    let (status, body) = post(app, "/translate", "not json").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().starts_with("Invalid request body"));
}

#[tokio::test]
async fn missing_input_text_is_bad_request() {
    let app = app_with(Arc::new(UppercaseFallback));
    let (status, body) = post(app, "/translate", r#"{"text": "hi there"}"#).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Missing field: input_text");
}

#[tokio::test]
async fn fallback_outage_is_bad_gateway() {
    let app = app_with(Arc::new(DownFallback));
    let (status, body) = post(app, "/translate", r#"{"input_text": "hello"}"#).await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert!(body["error"].as_str().unwrap().contains("connection refused"));
}

#[tokio::test]
async fn get_on_translate_is_not_allowed() {
    let app = app_with(Arc::new(UppercaseFallback));
    let response = app
        .oneshot(Request::builder().uri("/translate").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn health_reports_backends() {
    let app = app_with(Arc::new(UppercaseFallback));
    let response = app
        .oneshot(Request::builder().uri("/api/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["status"], "ok");
    assert_eq!(body["model"], "fixed");
    assert_eq!(body["fallback"], "uppercase");
    assert_eq!(body["target_lang"], "ceb");
}

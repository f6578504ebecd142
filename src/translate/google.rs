use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use tracing::{debug, info};

use super::interface::FallbackTranslator;
use crate::config::FallbackConfig;
use crate::error::TranslateError;

/// Client for the public Google Translate `translate_a/single` endpoint
#[derive(Debug, Clone)]
pub struct GoogleTranslateClient {
    client: Client,
    base_url: String,
    source_lang: String,
}

impl GoogleTranslateClient {
    pub fn new(config: &FallbackConfig) -> anyhow::Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        info!(
            "Initialized GoogleTranslateClient: base_url={}, source_lang={}",
            config.base_url, config.source_lang
        );
        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            source_lang: config.source_lang.clone(),
        })
    }
}

/// Concatenate the translated segments of a `translate_a/single` response:
/// `[[["seg1", "src1", ...], ["seg2", "src2", ...]], ...]`
fn parse_segments(body: &Value) -> Result<String, TranslateError> {
    let segments = body
        .get(0)
        .and_then(Value::as_array)
        .ok_or_else(|| TranslateError::Upstream("Unexpected response shape".to_string()))?;

    Ok(segments
        .iter()
        .filter_map(|seg| seg.get(0).and_then(Value::as_str))
        .collect())
}

#[async_trait]
impl FallbackTranslator for GoogleTranslateClient {
    async fn translate(&self, text: &str, target_lang: &str) -> Result<String, TranslateError> {
        let text = text.trim();
        if text.is_empty() {
            return Ok(String::new());
        }

        let url = format!("{}/translate_a/single", self.base_url);
        let response = self
            .client
            .get(&url)
            .query(&[
                ("client", "gtx"),
                ("sl", self.source_lang.as_str()),
                ("tl", target_lang),
                ("dt", "t"),
                ("q", text),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(TranslateError::Upstream(format!(
                "Translate request failed with status {}",
                status
            )));
        }

        let body: Value = response.json().await?;
        let translated = parse_segments(&body)?;
        debug!("Fallback translated '{}' -> '{}'", text, translated);
        Ok(translated)
    }

    fn provider(&self) -> &str {
        "google"
    }
}

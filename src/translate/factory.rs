use std::sync::Arc;

use anyhow::Result;
use tracing::info;

use super::cache::CachedFallback;
use super::google::GoogleTranslateClient;
use super::interface::FallbackTranslator;
use crate::config::FallbackConfig;

/// Factory for fallback translation providers
pub struct FallbackFactory;

impl FallbackFactory {
    /// Create the provider named in `config.provider`, wrapped in a result
    /// cache unless `cache_capacity` is zero
    pub fn create(config: &FallbackConfig) -> Result<Arc<dyn FallbackTranslator>> {
        info!("Initializing fallback translator: {}", config.provider);

        let provider: Arc<dyn FallbackTranslator> = match config.provider.as_str() {
            "google" | "google_translate" => Arc::new(GoogleTranslateClient::new(config)?),
            other => anyhow::bail!("Unsupported fallback provider: {}", other),
        };

        if config.cache_capacity == 0 {
            return Ok(provider);
        }
        Ok(Arc::new(CachedFallback::new(provider, config.cache_capacity)))
    }
}

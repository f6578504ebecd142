use std::sync::Arc;

use async_trait::async_trait;
use dashmap::DashMap;
use tracing::debug;

use super::interface::FallbackTranslator;
use crate::error::TranslateError;

/// Memoises fallback translations keyed by `(target_lang, text)`.
///
/// Once `capacity` entries are stored, new results are returned but not
/// cached.
pub struct CachedFallback {
    inner: Arc<dyn FallbackTranslator>,
    entries: DashMap<(String, String), String>,
    capacity: usize,
}

impl CachedFallback {
    pub fn new(inner: Arc<dyn FallbackTranslator>, capacity: usize) -> Self {
        Self {
            inner,
            entries: DashMap::new(),
            capacity,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[async_trait]
impl FallbackTranslator for CachedFallback {
    async fn translate(&self, text: &str, target_lang: &str) -> Result<String, TranslateError> {
        let key = (target_lang.to_string(), text.to_string());
        if let Some(hit) = self.entries.get(&key) {
            debug!("Fallback cache hit for '{}'", text);
            return Ok(hit.value().clone());
        }

        let translated = self.inner.translate(text, target_lang).await?;
        if self.entries.len() < self.capacity {
            self.entries.insert(key, translated.clone());
        }
        Ok(translated)
    }

    fn provider(&self) -> &str {
        self.inner.provider()
    }
}

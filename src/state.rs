use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::info;

use crate::config::Config;
use crate::translate::factory::FallbackFactory;
use crate::translate::model::ModelFactory;
use crate::translate::{TranslationService, WordTokenizer};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub translator: Arc<TranslationService>,
    pub started_at: DateTime<Utc>,
}

impl AppState {
    /// Load the tokenizer and model and build the fallback client
    pub async fn new(config: Config) -> anyhow::Result<Self> {
        let model_config = config.model_config.clone();
        let (model, tokenizer) = tokio::task::spawn_blocking(move || {
            let tokenizer = WordTokenizer::from_file(&model_config.tokenizer_path)?;
            let model = ModelFactory::create(&model_config)?;
            anyhow::Ok((model, tokenizer))
        })
        .await??;

        let fallback = FallbackFactory::create(&config.fallback_config)?;

        let translator = TranslationService::new(
            model,
            Arc::new(tokenizer),
            fallback,
            &config.model_config,
            config.fallback_config.target_lang.clone(),
        );
        info!(
            "Translation service ready: model={}, fallback={}",
            translator.model_name(),
            translator.fallback_provider()
        );

        Ok(Self::with_translator(config, translator))
    }

    pub fn with_translator(config: Config, translator: TranslationService) -> Self {
        Self {
            config: Arc::new(config),
            translator: Arc::new(translator),
            started_at: Utc::now(),
        }
    }
}

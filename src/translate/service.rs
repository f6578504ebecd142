use std::sync::Arc;

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{info, warn};

use super::decoder::Decoder;
use super::interface::{Engine, FallbackTranslator, Translation};
use super::model::Seq2SeqModel;
use super::tokenizer::WordTokenizer;
use crate::config::ModelConfig;
use crate::error::TranslateError;
use crate::utils::text_preprocessor::process_input;

/// Routes input to the seq2seq model or the fallback translator.
///
/// Single words always go to the fallback. Longer input goes to the model
/// unless one of its words is missing from the vocabulary.
#[derive(Clone)]
pub struct TranslationService {
    model: Arc<dyn Seq2SeqModel>,
    tokenizer: Arc<WordTokenizer>,
    fallback: Arc<dyn FallbackTranslator>,
    decoder: Decoder,
    target_lang: String,
    seed: Option<u64>,
}

impl TranslationService {
    pub fn new(
        model: Arc<dyn Seq2SeqModel>,
        tokenizer: Arc<WordTokenizer>,
        fallback: Arc<dyn FallbackTranslator>,
        model_config: &ModelConfig,
        target_lang: impl Into<String>,
    ) -> Self {
        Self {
            model,
            tokenizer,
            fallback,
            decoder: Decoder::from_config(model_config),
            target_lang: target_lang.into(),
            seed: model_config.seed,
        }
    }

    pub fn model_name(&self) -> &str {
        self.model.name()
    }

    pub fn fallback_provider(&self) -> &str {
        self.fallback.provider()
    }

    pub async fn translate(&self, input_text: &str) -> Result<Translation, TranslateError> {
        let word_count = input_text.split_whitespace().count();
        if word_count == 0 {
            return Err(TranslateError::EmptyInput);
        }

        if word_count == 1 {
            return self.translate_with_fallback(input_text).await;
        }

        let encoded = match self.tokenizer.encode(input_text, self.decoder.max_len) {
            Ok(encoded) => encoded,
            Err(TranslateError::UnknownWord(word)) => {
                warn!(
                    "Tokenization error for input: {} (unknown word '{}'). Falling back.",
                    input_text, word
                );
                return self.translate_with_fallback(input_text).await;
            }
            Err(e) => return Err(e),
        };

        self.translate_with_model(encoded).await
    }

    async fn translate_with_fallback(&self, input_text: &str) -> Result<Translation, TranslateError> {
        let cleaned = process_input(input_text);
        let text = self.fallback.translate(&cleaned, &self.target_lang).await?;
        Ok(Translation {
            text,
            engine: Engine::Fallback,
        })
    }

    async fn translate_with_model(&self, encoded: Vec<i64>) -> Result<Translation, TranslateError> {
        let model = self.model.clone();
        let tokenizer = self.tokenizer.clone();
        let decoder = self.decoder.clone();
        let seed = self.seed;

        let text = tokio::task::spawn_blocking(move || {
            let mut rng = match seed {
                Some(seed) => StdRng::seed_from_u64(seed),
                None => StdRng::from_entropy(),
            };
            decoder.decode(model.as_ref(), &tokenizer, &encoded, &mut rng)
        })
        .await
        .map_err(|e| TranslateError::Model(anyhow::anyhow!("Decoding task failed: {}", e)))??;

        info!("Model produced {} words", text.split_whitespace().count());
        Ok(Translation {
            text,
            engine: Engine::Model,
        })
    }
}

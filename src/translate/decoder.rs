use anyhow::{Context, Result};
use rand::Rng;
use tracing::debug;

use super::model::Seq2SeqModel;
use super::sampling::{apply_temperature, argmax, sample_index};
use super::tokenizer::WordTokenizer;
use crate::config::{DecodeStrategy, ModelConfig};

/// Autoregressive decoding loop over a [`Seq2SeqModel`]
#[derive(Debug, Clone)]
pub struct Decoder {
    pub max_len: usize,
    pub max_output_length: usize,
    pub temperature: f32,
    pub strategy: DecodeStrategy,
    pub start_token: String,
    pub end_token: String,
}

impl Decoder {
    pub fn from_config(config: &ModelConfig) -> Self {
        Self {
            max_len: config.max_len,
            max_output_length: config.max_output_length,
            temperature: config.temperature,
            strategy: config.strategy,
            start_token: config.start_token.clone(),
            end_token: config.end_token.clone(),
        }
    }

    /// Decode a translation for an already-encoded source sentence.
    ///
    /// The target buffer starts with the start token. Each step reads the
    /// distribution at the current position, picks a token and writes it to
    /// the next slot. Decoding stops at the end token, at a token with no
    /// word (padding), once more than `max_len` words are produced, or when
    /// the target buffer is full.
    pub fn decode<R: Rng + ?Sized>(
        &self,
        model: &dyn Seq2SeqModel,
        tokenizer: &WordTokenizer,
        encoder_input: &[i64],
        rng: &mut R,
    ) -> Result<String> {
        let start = tokenizer
            .index_of(&self.start_token)
            .with_context(|| format!("Start token '{}' not in vocabulary", self.start_token))?;

        let mut target = vec![0i64; self.max_len];
        target[0] = start;

        let mut words: Vec<&str> = Vec::new();

        for step in 0..self.max_output_length.min(self.max_len) {
            let predicted = model.predict(encoder_input, &target)?;
            if step >= predicted.nrows() {
                anyhow::bail!(
                    "Model returned {} positions, decoder needs position {}",
                    predicted.nrows(),
                    step
                );
            }
            let probs = predicted.row(step).to_vec();

            let index = match self.strategy {
                DecodeStrategy::Greedy => argmax(&probs),
                DecodeStrategy::Sample => {
                    sample_index(&apply_temperature(&probs, self.temperature), rng)
                }
            } as i64;

            let word = match tokenizer.word_for(index) {
                Some(word) => word,
                None => {
                    debug!("Step {}: token {} has no word, stopping", step, index);
                    break;
                }
            };

            if word == self.end_token || words.len() > self.max_len {
                break;
            }

            words.push(word);

            if step + 1 >= self.max_len {
                break;
            }
            target[step + 1] = index;
        }

        debug!("Decoded {} words", words.len());
        Ok(words.join(" "))
    }
}

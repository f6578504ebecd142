use std::collections::HashMap;
use std::path::Path;

use anyhow::{Context, Result};
use serde_json::Value;
use tracing::info;

use crate::error::TranslateError;
use crate::utils::file_utils::load_text_file_with_guess_encoding;

/// Word-level vocabulary exported from a Keras `Tokenizer`.
///
/// Index 0 is reserved for padding and never maps to a word.
#[derive(Debug, Clone)]
pub struct WordTokenizer {
    word_index: HashMap<String, i64>,
    index_word: HashMap<i64, String>,
}

impl WordTokenizer {
    pub fn new(word_index: HashMap<String, i64>) -> Self {
        let index_word = word_index
            .iter()
            .map(|(word, &idx)| (idx, word.clone()))
            .collect();
        Self {
            word_index,
            index_word,
        }
    }

    /// Load a vocabulary from either a plain `{"word": index}` JSON object
    /// or the document produced by Keras `Tokenizer.to_json()`
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = load_text_file_with_guess_encoding(path)?;
        let value: Value = serde_json::from_str(&content)
            .with_context(|| format!("Tokenizer file is not JSON: {}", path.display()))?;

        let tokenizer = Self::from_json(value)?;
        info!(
            "Loaded tokenizer from {} ({} words)",
            path.display(),
            tokenizer.word_index.len()
        );
        Ok(tokenizer)
    }

    pub fn from_json(value: Value) -> Result<Self> {
        let word_index = match value.pointer("/config/word_index") {
            // Keras serialises the nested maps as JSON strings
            Some(Value::String(raw)) => serde_json::from_str(raw)
                .context("Invalid word_index string in Keras tokenizer config")?,
            Some(nested) => serde_json::from_value(nested.clone())
                .context("Invalid word_index object in Keras tokenizer config")?,
            None => serde_json::from_value(value).context("Tokenizer JSON is not a word index")?,
        };
        Ok(Self::new(word_index))
    }

    /// Lowercase, split on whitespace and map every word to its index, then
    /// pad with trailing zeros to `max_len`. Longer inputs keep their last
    /// `max_len` tokens.
    pub fn encode(&self, sentence: &str, max_len: usize) -> Result<Vec<i64>, TranslateError> {
        let mut tokens = sentence
            .to_lowercase()
            .split_whitespace()
            .map(|word| {
                self.word_index
                    .get(word)
                    .copied()
                    .ok_or_else(|| TranslateError::UnknownWord(word.to_string()))
            })
            .collect::<Result<Vec<_>, _>>()?;

        if tokens.len() > max_len {
            tokens.drain(..tokens.len() - max_len);
        }
        tokens.resize(max_len, 0);
        Ok(tokens)
    }

    pub fn index_of(&self, word: &str) -> Option<i64> {
        self.word_index.get(word).copied()
    }

    pub fn word_for(&self, index: i64) -> Option<&str> {
        self.index_word.get(&index).map(String::as_str)
    }

    /// Size of the output layer: highest index plus the padding slot
    pub fn vocab_size(&self) -> usize {
        self.index_word
            .keys()
            .max()
            .map(|&max| max as usize + 1)
            .unwrap_or(1)
    }

    pub fn len(&self) -> usize {
        self.word_index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.word_index.is_empty()
    }
}

use std::path::{Path, PathBuf};

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::utils::file_utils::{load_text_file_with_guess_encoding, substitute_env_vars};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server_config: ServerConfig,
    pub model_config: ModelConfig,
    #[serde(default)]
    pub fallback_config: FallbackConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8000
}

/// How the decoder picks the next token from a predicted distribution
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum DecodeStrategy {
    #[default]
    Sample,
    Greedy,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelConfig {
    pub model_path: String,
    pub tokenizer_path: String,
    #[serde(default = "default_max_len")]
    pub max_len: usize,
    #[serde(default = "default_max_len")]
    pub max_output_length: usize,
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    #[serde(default)]
    pub strategy: DecodeStrategy,
    #[serde(default = "default_start_token")]
    pub start_token: String,
    #[serde(default = "default_end_token")]
    pub end_token: String,
    #[serde(default = "default_encoder_input_name")]
    pub encoder_input_name: String,
    #[serde(default = "default_decoder_input_name")]
    pub decoder_input_name: String,
    #[serde(default = "default_num_threads")]
    pub num_threads: usize,
    /// Fixed RNG seed; each request reseeds so sampling is reproducible
    #[serde(default)]
    pub seed: Option<u64>,
}

fn default_max_len() -> usize {
    50
}

fn default_temperature() -> f32 {
    0.7
}

fn default_start_token() -> String {
    "start".to_string()
}

fn default_end_token() -> String {
    "end".to_string()
}

fn default_encoder_input_name() -> String {
    "encoder_input".to_string()
}

fn default_decoder_input_name() -> String {
    "decoder_input".to_string()
}

fn default_num_threads() -> usize {
    1
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FallbackConfig {
    #[serde(default = "default_provider")]
    pub provider: String,
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_source_lang")]
    pub source_lang: String,
    #[serde(default = "default_target_lang")]
    pub target_lang: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_cache_capacity")]
    pub cache_capacity: usize,
}

fn default_provider() -> String {
    "google".to_string()
}

fn default_base_url() -> String {
    "https://translate.googleapis.com".to_string()
}

fn default_source_lang() -> String {
    "auto".to_string()
}

fn default_target_lang() -> String {
    "ceb".to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_cache_capacity() -> usize {
    1024
}

impl Config {
    /// Load configuration from a YAML or JSON file, substituting `${VAR}`
    /// placeholders from the environment
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = load_text_file_with_guess_encoding(path)?;
        let content = substitute_env_vars(&content);

        let path_lower = path.to_string_lossy().to_lowercase();
        let config: Config = if path_lower.ends_with(".json") {
            serde_json::from_str(&content)?
        } else {
            serde_yaml::from_str(&content)?
        };

        config.validate()?;
        Ok(config)
    }

    /// Try each candidate path in order and return the first config that loads
    pub fn load_first(candidates: &[PathBuf]) -> Result<(Self, PathBuf)> {
        for path in candidates {
            match Config::load(path) {
                Ok(cfg) => return Ok((cfg, path.clone())),
                Err(e) => {
                    tracing::debug!("Failed to load config from {}: {}", path.display(), e);
                }
            }
        }

        Err(anyhow::anyhow!(
            "Could not find config file. Tried: {:?}",
            candidates
        ))
    }

    /// Default search order: `CONFIG_PATH`, then `conf.yaml` / `conf.json`
    /// in the working directory and next to the executable
    pub fn candidate_paths() -> Vec<PathBuf> {
        let exe_dir = std::env::current_exe()
            .ok()
            .and_then(|p| p.parent().map(|p| p.to_path_buf()))
            .unwrap_or_else(|| PathBuf::from("."));

        vec![
            std::env::var("CONFIG_PATH").ok().map(PathBuf::from),
            Some(PathBuf::from("conf.yaml")),
            Some(PathBuf::from("conf.json")),
            Some(exe_dir.join("conf.yaml")),
            Some(exe_dir.join("conf.json")),
        ]
        .into_iter()
        .flatten()
        .collect()
    }

    pub fn validate(&self) -> Result<()> {
        let model = &self.model_config;
        if model.temperature.is_nan() || model.temperature <= 0.0 {
            anyhow::bail!("temperature must be positive, got {}", model.temperature);
        }
        if model.max_len == 0 {
            anyhow::bail!("max_len must be at least 1");
        }
        if model.max_output_length == 0 {
            anyhow::bail!("max_output_length must be at least 1");
        }
        if model.start_token == model.end_token {
            anyhow::bail!("start_token and end_token must differ");
        }
        Ok(())
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Default for FallbackConfig {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            base_url: default_base_url(),
            source_lang: default_source_lang(),
            target_lang: default_target_lang(),
            timeout_secs: default_timeout_secs(),
            cache_capacity: default_cache_capacity(),
        }
    }
}

impl ModelConfig {
    pub fn new(model_path: impl Into<String>, tokenizer_path: impl Into<String>) -> Self {
        Self {
            model_path: model_path.into(),
            tokenizer_path: tokenizer_path.into(),
            max_len: default_max_len(),
            max_output_length: default_max_len(),
            temperature: default_temperature(),
            strategy: DecodeStrategy::default(),
            start_token: default_start_token(),
            end_token: default_end_token(),
            encoder_input_name: default_encoder_input_name(),
            decoder_input_name: default_decoder_input_name(),
            num_threads: default_num_threads(),
            seed: None,
        }
    }
}

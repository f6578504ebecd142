use std::path::Path;
use std::sync::Arc;

use anyhow::Result;
use ndarray::Array2;
use tracing::info;

use crate::config::ModelConfig;

/// Encoder-decoder translation model.
///
/// `predict` runs one forward pass and returns the output distribution for
/// every decoder position, shaped `(max_len, vocab_size)`.
pub trait Seq2SeqModel: Send + Sync {
    fn predict(&self, encoder_input: &[i64], decoder_input: &[i64]) -> Result<Array2<f32>>;

    fn name(&self) -> &str;
}

#[cfg(feature = "onnx")]
pub use onnx::OnnxSeq2SeqModel;

#[cfg(feature = "onnx")]
mod onnx {
    use anyhow::{Context, Result};
    use ndarray::{Array2, Axis, Ix2};
    use ort::session::builder::GraphOptimizationLevel;
    use ort::session::Session;
    use ort::value::Tensor;
    use std::path::Path;
    use tracing::info;

    use super::Seq2SeqModel;
    use crate::config::ModelConfig;

    /// Keras seq2seq model exported to ONNX
    pub struct OnnxSeq2SeqModel {
        session: Session,
        model_name: String,
        encoder_input_name: String,
        decoder_input_name: String,
    }

    impl OnnxSeq2SeqModel {
        pub fn load(config: &ModelConfig) -> Result<Self> {
            let model_path = Path::new(&config.model_path);
            let model_name = model_path
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or("unknown")
                .to_string();

            info!(
                "Loading ONNX model: {} ({} threads)",
                model_name, config.num_threads
            );

            let session = Session::builder()?
                .with_optimization_level(GraphOptimizationLevel::Level3)?
                .with_intra_threads(config.num_threads)?
                .commit_from_file(model_path)
                .with_context(|| format!("Failed to load model: {}", model_path.display()))?;

            Ok(Self {
                session,
                model_name,
                encoder_input_name: config.encoder_input_name.clone(),
                decoder_input_name: config.decoder_input_name.clone(),
            })
        }
    }

    fn to_input(tokens: &[i64]) -> Result<Tensor<f32>> {
        let values: Vec<f32> = tokens.iter().map(|&t| t as f32).collect();
        let array = Array2::from_shape_vec((1, tokens.len()), values)?;
        Ok(Tensor::from_array(array)?)
    }

    impl Seq2SeqModel for OnnxSeq2SeqModel {
        fn predict(&self, encoder_input: &[i64], decoder_input: &[i64]) -> Result<Array2<f32>> {
            let encoder = to_input(encoder_input)?;
            let decoder = to_input(decoder_input)?;

            let outputs = self.session.run(ort::inputs![
                self.encoder_input_name.as_str() => encoder,
                self.decoder_input_name.as_str() => decoder,
            ]?)?;

            let view = outputs[0].try_extract_tensor::<f32>()?;
            let view = if view.ndim() == 3 {
                view.index_axis_move(Axis(0), 0)
            } else {
                view
            };
            let probs = view
                .into_dimensionality::<Ix2>()
                .context("Model output is not (batch, seq, vocab)")?;
            Ok(probs.to_owned())
        }

        fn name(&self) -> &str {
            &self.model_name
        }
    }
}

/// Builds the configured model backend
pub struct ModelFactory;

impl ModelFactory {
    pub fn create(config: &ModelConfig) -> Result<Arc<dyn Seq2SeqModel>> {
        if !Path::new(&config.model_path).exists() {
            anyhow::bail!("Model file not found: {}", config.model_path);
        }
        info!("Initializing model: {}", config.model_path);
        Self::create_backend(config)
    }

    #[cfg(feature = "onnx")]
    fn create_backend(config: &ModelConfig) -> Result<Arc<dyn Seq2SeqModel>> {
        Ok(Arc::new(OnnxSeq2SeqModel::load(config)?))
    }

    #[cfg(not(feature = "onnx"))]
    fn create_backend(_config: &ModelConfig) -> Result<Arc<dyn Seq2SeqModel>> {
        anyhow::bail!("No model backend available: built without the `onnx` feature")
    }
}

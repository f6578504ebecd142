pub mod cache;
pub mod decoder;
pub mod factory;
pub mod google;
pub mod interface;
pub mod model;
pub mod sampling;
pub mod service;
pub mod tokenizer;

pub use interface::{Engine, FallbackTranslator, TranslateResponse, Translation};
pub use model::Seq2SeqModel;
pub use service::TranslationService;
pub use tokenizer::WordTokenizer;

pub mod file_utils;
pub mod text_preprocessor;

pub mod config;
pub mod error;
pub mod handlers;
pub mod routes;
pub mod state;
pub mod translate;
pub mod utils;

pub use config::Config;
pub use error::TranslateError;
pub use state::AppState;

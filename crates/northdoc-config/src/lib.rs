pub mod config;
pub mod document;
pub mod error;
pub mod templates;

pub use config::Config;
pub use document::{DocumentConfig, TextDirection};
pub use error::ConfigError;

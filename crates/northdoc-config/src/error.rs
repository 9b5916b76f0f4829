use std::{
  io,
  path::{Path, PathBuf},
};

use thiserror::Error;

/// Error type for northdoc-config operations
#[derive(Debug, Error)]
pub enum ConfigError {
  #[error("Configuration error: {0}")]
  Config(String),

  #[error("Template error: {0}")]
  Template(String),

  #[error("Failed to {action} {}: {source}", path.display())]
  Io {
    action: &'static str,
    path:   PathBuf,
    source: io::Error,
  },

  #[error("JSON error: {0}")]
  Json(#[from] serde_json::Error),

  #[error("TOML error: {0}")]
  Toml(#[from] toml::de::Error),

  #[error("YAML error: {0}")]
  Yaml(#[from] serde_yaml::Error),
}

impl ConfigError {
  /// Wrap an I/O error with what was being done and to which path.
  pub fn io(
    action: &'static str,
    path: &Path,
  ) -> impl FnOnce(io::Error) -> Self {
    let path = path.to_path_buf();
    move |source| Self::Io { action, path, source }
  }
}

use std::{io, path::PathBuf};

use northdoc_config::ConfigError;
use northdoc_markup::MarkupError;
use thiserror::Error;

/// Top-level error type for the northdoc crate.
#[derive(Debug, Error)]
pub enum NorthdocError {
  #[error(transparent)]
  Config(#[from] ConfigError),

  #[error("Failed to build {}: {source}", path.display())]
  Markup {
    path:   PathBuf,
    #[source]
    source: MarkupError,
  },

  #[error("Template error: {0}")]
  Template(String),

  #[error("Failed to {action} {}: {source}", path.display())]
  Io {
    action: &'static str,
    path:   PathBuf,
    #[source]
    source: io::Error,
  },

  #[error("No configured document writes {0}.html")]
  UnknownDocument(String),

  #[error("{failed} of {total} documents failed to build")]
  Incomplete { failed: usize, total: usize },
}

impl NorthdocError {
  pub(crate) fn io(
    action: &'static str,
    path: impl Into<PathBuf>,
  ) -> impl FnOnce(io::Error) -> Self {
    let path = path.into();
    move |source| Self::Io {
      action,
      path,
      source,
    }
  }
}

impl From<tera::Error> for NorthdocError {
  fn from(e: tera::Error) -> Self {
    // Tera keeps the useful part of the message in the source chain.
    let mut message = e.to_string();
    let mut source = std::error::Error::source(&e);
    while let Some(cause) = source {
      message.push_str(": ");
      message.push_str(&cause.to_string());
      source = cause.source();
    }
    Self::Template(message)
  }
}

//! Error types for markup processing.

/// Result type for markup operations.
pub type MarkupResult<T> = Result<T, MarkupError>;

/// Errors that abort the build of a single document.
///
/// Link corrections are never reported through this type; they are returned
/// as [`crate::LinkCorrection`] records and logged.
#[derive(Debug, thiserror::Error)]
pub enum MarkupError {
  #[error("Markdown rendering failed: {0}")]
  Render(String),

  #[error("Heading `{fragment}` at byte {offset} has no closing </{tag}>")]
  MalformedHeading {
    tag:      String,
    fragment: String,
    offset:   usize,
  },

  #[error("Heading `{fragment}` at byte {offset} has no id attribute")]
  MissingHeadingId {
    tag:      String,
    fragment: String,
    offset:   usize,
  },

  #[error("Table-of-contents heading \"{title}\" appears more than once")]
  DuplicateToc { title: String },

  #[error("Table-of-contents heading not found (expected a level 1 heading \"{title}\")")]
  TocNotFound { title: String },

  #[error("Navigation block <{tag}> is never closed")]
  UnclosedNavigation { tag: String },
}

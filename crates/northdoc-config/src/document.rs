use std::{fmt, path::PathBuf};

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};

/// Writing direction of a page, emitted as the `dir` attribute of `<html>`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextDirection {
  #[default]
  Ltr,
  Rtl,
  Auto,
}

impl TextDirection {
  #[must_use]
  pub const fn as_str(self) -> &'static str {
    match self {
      Self::Ltr => "ltr",
      Self::Rtl => "rtl",
      Self::Auto => "auto",
    }
  }
}

impl fmt::Display for TextDirection {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

/// One markdown document to build into a page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentConfig {
  /// Markdown source, relative to the configured source directory.
  #[serde(default)]
  pub source: PathBuf,

  /// Output file name without the `.html` extension.
  pub file: String,

  /// Text of the level 1 heading holding the in-document table of contents.
  pub toc: String,

  /// Language code for the `lang` attribute.
  #[serde(default = "default_lang")]
  pub lang: String,

  #[serde(default)]
  pub dir: TextDirection,
}

fn default_lang() -> String {
  "en".to_string()
}

impl DocumentConfig {
  #[must_use]
  pub fn new(
    source: impl Into<PathBuf>,
    file: impl Into<String>,
    toc: impl Into<String>,
  ) -> Self {
    Self {
      source: source.into(),
      file:   file.into(),
      toc:    toc.into(),
      lang:   default_lang(),
      dir:    TextDirection::default(),
    }
  }

  /// File name of the generated page.
  #[must_use]
  pub fn output_file_name(&self) -> String {
    format!("{}.html", self.file)
  }
}

/// Documents are written either as a list, or as a mapping from source path
/// to settings:
///
/// ```yaml
/// docs:
///   README.md:
///     file: index
///     toc: Table of Contents
/// ```
#[derive(Deserialize)]
#[serde(untagged)]
enum DocumentList {
  List(Vec<DocumentConfig>),
  Map(IndexMap<PathBuf, DocumentConfig>),
}

/// Deserialize `docs` from either of its two accepted shapes.
///
/// # Errors
///
/// Returns the deserializer's error if the value is neither shape.
pub fn deserialize_docs<'de, D>(
  deserializer: D,
) -> Result<Vec<DocumentConfig>, D::Error>
where
  D: Deserializer<'de>,
{
  Ok(match DocumentList::deserialize(deserializer)? {
    DocumentList::List(docs) => docs,
    DocumentList::Map(docs) => {
      docs
        .into_iter()
        .map(|(source, mut doc)| {
          doc.source = source;
          doc
        })
        .collect()
    },
  })
}

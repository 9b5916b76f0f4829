use std::fmt;

/// Error type for template operations.
#[derive(Debug)]
pub enum TemplateError {
  /// Indicates that the requested configuration format is not supported.
  /// Contains the name of the unsupported format.
  UnsupportedFormat(String),
}

impl fmt::Display for TemplateError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::UnsupportedFormat(format) => {
        write!(f, "Unsupported config format: {format}")
      },
    }
  }
}

impl std::error::Error for TemplateError {}

/// Default configuration in TOML, commented so that a new user can find their
/// way around.
pub const DEFAULT_TOML_TEMPLATE: &str = r#"# northdoc configuration

# Directory the document sources below are relative to
source_dir = "docs"

# Directory generated pages are written to
output_dir = "build"

# Page template; the embedded template is used when unset.
# Run `northdoc export-templates` to get a copy to start from.
# template_path = "templates/main.html"

# Record level 3 headings as a third navigation level
subsections = false

# Fail when a document has no table-of-contents heading
require_toc = true

# Point near-miss #anchor links at the closest heading id
repair_links = true

# Rewrite code block classes to language-* (lang-html becomes language-markup)
normalize_code_classes = true

# One entry per page
[[docs]]
# Markdown source, relative to source_dir
source = "README.md"
# Output file name, without .html
file = "index"
# Text of the level 1 heading holding the table of contents
toc = "Table of Contents"
# Language code and text direction (ltr, rtl or auto)
lang = "en"
dir = "ltr"
"#;

/// Default configuration in JSON.
pub const DEFAULT_JSON_TEMPLATE: &str = r#"{
  "source_dir": "docs",
  "output_dir": "build",
  "subsections": false,
  "require_toc": true,
  "repair_links": true,
  "normalize_code_classes": true,
  "docs": [
    {
      "source": "README.md",
      "file": "index",
      "toc": "Table of Contents",
      "lang": "en",
      "dir": "ltr"
    }
  ]
}
"#;

/// Default configuration in YAML. Documents use the mapping form, keyed by
/// source path.
pub const DEFAULT_YAML_TEMPLATE: &str = r#"# northdoc configuration

# Directory the document sources below are relative to
source_dir: docs

# Directory generated pages are written to
output_dir: build

# Page template; the embedded template is used when unset.
# template_path: templates/main.html

# Record level 3 headings as a third navigation level
subsections: false

# Fail when a document has no table-of-contents heading
require_toc: true

# Point near-miss #anchor links at the closest heading id
repair_links: true

# Rewrite code block classes to language-*
normalize_code_classes: true

# Source path (relative to source_dir) to page settings
docs:
  README.md:
    file: index
    toc: Table of Contents
    lang: en
    dir: ltr
"#;

/// Get the correct configuration template based on the requested format.
///
/// # Errors
///
/// Returns an error if the requested format is not supported.
pub fn get_template(format: &str) -> Result<&'static str, TemplateError> {
  match format.to_lowercase().as_str() {
    "toml" => Ok(DEFAULT_TOML_TEMPLATE),
    "json" => Ok(DEFAULT_JSON_TEMPLATE),
    "yaml" | "yml" => Ok(DEFAULT_YAML_TEMPLATE),
    _ => Err(TemplateError::UnsupportedFormat(format.to_string())),
  }
}

#[cfg(test)]
mod tests {
  #![allow(clippy::unwrap_used, reason = "Fine in tests")]

  use super::*;
  use crate::Config;

  #[test]
  fn test_templates_parse_to_same_config() {
    let from_toml: Config = toml::from_str(DEFAULT_TOML_TEMPLATE).unwrap();
    let from_json: Config = serde_json::from_str(DEFAULT_JSON_TEMPLATE).unwrap();
    let from_yaml: Config = serde_yaml::from_str(DEFAULT_YAML_TEMPLATE).unwrap();

    assert_eq!(from_toml, from_json);
    assert_eq!(from_toml, from_yaml);
    assert_eq!(from_toml.docs.len(), 1);
    assert_eq!(from_toml.docs[0].toc, "Table of Contents");
  }

  #[test]
  fn test_unsupported_format() {
    assert!(get_template("YML").is_ok());
    assert!(matches!(
      get_template("ini"),
      Err(TemplateError::UnsupportedFormat(format)) if format == "ini"
    ));
  }
}

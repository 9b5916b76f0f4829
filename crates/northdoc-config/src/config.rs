use std::{
  collections::HashSet,
  fs,
  path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};

use crate::{
  document::{DocumentConfig, deserialize_docs},
  error::ConfigError,
};

/// File names searched for, in order, by [`Config::find_config_file`].
pub const CONFIG_FILE_NAMES: [&str; 7] = [
  "northdoc.toml",
  "northdoc.json",
  "northdoc.yml",
  "northdoc.yaml",
  ".northdoc.toml",
  "config.yml",
  "config.yaml",
];

/// Configuration for the northdoc page builder.
///
/// Fields are loaded from a TOML, JSON or YAML file; missing fields take their
/// defaults. A few fields can be overridden from the command line with
/// [`Config::merge_with_cli`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
  /// Directory document sources are relative to.
  pub source_dir: PathBuf,

  /// Directory generated pages are written to.
  pub output_dir: PathBuf,

  /// Custom page template (optional).
  #[serde(skip_serializing_if = "Option::is_none")]
  pub template_path: Option<PathBuf>,

  /// Record level 3 headings as a third navigation level.
  pub subsections: bool,

  /// Treat a document without a table-of-contents heading as an error.
  pub require_toc: bool,

  /// Repair near-miss anchor links.
  pub repair_links: bool,

  /// Rewrite code block classes to the `language-*` convention.
  pub normalize_code_classes: bool,

  /// Documents to build, in order.
  #[serde(deserialize_with = "deserialize_docs")]
  pub docs: Vec<DocumentConfig>,
}

impl Default for Config {
  fn default() -> Self {
    Self {
      source_dir:             PathBuf::from("."),
      output_dir:             PathBuf::from("build"),
      template_path:          None,
      subsections:            false,
      require_toc:            true,
      repair_links:           true,
      normalize_code_classes: true,
      docs:                   Vec::new(),
    }
  }
}

impl Config {
  /// Load configuration from a file, picking the format from its extension.
  ///
  /// # Arguments
  ///
  /// * `path` - Path to the configuration file.
  ///
  /// # Errors
  ///
  /// Returns an error if the file cannot be read or parsed, or if the format is
  /// unsupported.
  pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|e| {
      ConfigError::Config(format!(
        "Failed to read config file: {}: {}",
        path.display(),
        e
      ))
    })?;

    let Some(ext) = path.extension().and_then(|ext| ext.to_str()) else {
      return Err(ConfigError::Config(format!(
        "Config file has no extension: {}",
        path.display()
      )));
    };

    let parsed = match ext.to_lowercase().as_str() {
      "json" => serde_json::from_str(&content).map_err(ConfigError::from),
      "toml" => toml::from_str(&content).map_err(ConfigError::from),
      "yml" | "yaml" => serde_yaml::from_str(&content).map_err(ConfigError::from),
      _ => {
        return Err(ConfigError::Config(format!(
          "Unsupported config file format: {}",
          path.display()
        )));
      },
    };

    parsed.map_err(|e| {
      ConfigError::Config(format!(
        "Failed to parse {} config from {}: {}",
        ext.to_uppercase(),
        path.display(),
        e
      ))
    })
  }

  /// Load the given configuration file, or the first one found in the current
  /// directory.
  ///
  /// # Errors
  ///
  /// Returns an error if no file is given and none is found, or if loading
  /// fails.
  pub fn load(config_file: Option<&Path>) -> Result<Self, ConfigError> {
    let path = match config_file {
      Some(path) => path.to_path_buf(),
      None => {
        Self::find_config_file().ok_or_else(|| {
          ConfigError::Config(format!(
            "No configuration file found. Looked for: {}. Run `northdoc init` \
             to create one.",
            CONFIG_FILE_NAMES.join(", ")
          ))
        })?
      },
    };

    log::debug!("Loading configuration from {}", path.display());
    Self::from_file(&path)
  }

  /// Search the current directory for a configuration file.
  #[must_use]
  pub fn find_config_file() -> Option<PathBuf> {
    let current_dir = std::env::current_dir().ok()?;
    Self::find_config_file_in(&current_dir)
  }

  /// Search `dir` for the first of [`CONFIG_FILE_NAMES`] that exists.
  #[must_use]
  pub fn find_config_file_in(dir: &Path) -> Option<PathBuf> {
    CONFIG_FILE_NAMES
      .iter()
      .map(|name| dir.join(name))
      .find(|path| path.is_file())
  }

  /// Apply command-line overrides on top of file values.
  pub fn merge_with_cli(
    &mut self,
    output_dir: Option<PathBuf>,
    template_path: Option<PathBuf>,
  ) {
    if let Some(output_dir) = output_dir {
      self.output_dir = output_dir;
    }
    if let Some(template_path) = template_path {
      self.template_path = Some(template_path);
    }
  }

  /// Full path of a document's markdown source.
  #[must_use]
  pub fn source_path(&self, doc: &DocumentConfig) -> PathBuf {
    self.source_dir.join(&doc.source)
  }

  /// Full path of a document's generated page.
  #[must_use]
  pub fn output_path(&self, doc: &DocumentConfig) -> PathBuf {
    self.output_dir.join(doc.output_file_name())
  }

  /// Check the configuration for problems, reporting all of them at once.
  ///
  /// # Errors
  ///
  /// Returns an error listing every problem found.
  pub fn validate(&self) -> Result<(), ConfigError> {
    let mut errors = Vec::new();

    if !self.source_dir.is_dir() {
      errors.push(format!(
        "Source directory does not exist: {}",
        self.source_dir.display()
      ));
    }

    if let Some(ref template_path) = self.template_path {
      if !template_path.exists() {
        errors.push(format!(
          "Template file does not exist: {}",
          template_path.display()
        ));
      } else if !template_path.is_file() {
        errors.push(format!(
          "Template path is not a file: {}",
          template_path.display()
        ));
      }
    }

    if self.docs.is_empty() {
      errors.push("No documents configured under `docs`".to_string());
    }

    let mut outputs = HashSet::new();
    for (index, doc) in self.docs.iter().enumerate() {
      let label = format!("Document {}", index + 1);

      if doc.source.as_os_str().is_empty() {
        errors.push(format!("{label} has no source"));
      } else {
        let source = self.source_path(doc);
        if !source.is_file() {
          errors.push(format!(
            "{label} source does not exist: {}",
            source.display()
          ));
        }
      }

      if doc.file.trim().is_empty() {
        errors.push(format!("{label} has an empty output file name"));
      } else if doc.file.contains(['/', '\\']) {
        errors.push(format!(
          "{label} output file name contains a path separator: {}",
          doc.file
        ));
      } else if !outputs.insert(doc.file.as_str()) {
        errors.push(format!(
          "{label} writes {} which another document also writes",
          doc.output_file_name()
        ));
      }

      if doc.toc.trim().is_empty() {
        errors.push(format!("{label} has an empty table-of-contents title"));
      }
    }

    if !errors.is_empty() {
      let error_message = errors.join("\n");
      return Err(ConfigError::Config(format!(
        "Configuration validation errors:\n{error_message}"
      )));
    }

    Ok(())
  }

  /// Generate a default configuration file with commented explanations
  ///
  /// # Errors
  ///
  /// Returns an error if the format is unsupported or the file cannot be
  /// written.
  pub fn generate_default_config(
    format: &str,
    path: &Path,
  ) -> Result<(), ConfigError> {
    let config_content = crate::templates::get_template(format)
      .map_err(|e| ConfigError::Template(e.to_string()))?;

    fs::write(path, config_content)
      .map_err(ConfigError::io("write default config", path))?;

    log::info!("Created default configuration file: {}", path.display());
    Ok(())
  }

  /// Export embedded templates to a directory for customization
  ///
  /// Existing files are kept unless `force` is set.
  ///
  /// # Errors
  ///
  /// Returns an error if the output directory cannot be created or a template
  /// cannot be written.
  pub fn export_templates(output_dir: &Path, force: bool) -> Result<(), ConfigError> {
    fs::create_dir_all(output_dir)
      .map_err(ConfigError::io("create template directory", output_dir))?;

    for (filename, content) in northdoc_templates::all_templates() {
      let file_path = output_dir.join(filename);

      if file_path.exists() && !force {
        log::warn!(
          "File {} already exists. Use --force to overwrite.",
          file_path.display()
        );
        continue;
      }

      fs::write(&file_path, content)
        .map_err(ConfigError::io("write template file", &file_path))?;
      log::info!("Exported template: {}", file_path.display());
    }

    Ok(())
  }
}

#[cfg(test)]
mod tests {
  #![allow(
    clippy::unwrap_used,
    clippy::panic,
    clippy::field_reassign_with_default,
    reason = "Fine in tests"
  )]

  use tempfile::tempdir;

  use super::*;
  use crate::document::TextDirection;

  fn write(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, content).unwrap();
    path
  }

  #[test]
  fn test_defaults() {
    let config = Config::default();
    assert_eq!(config.source_dir, PathBuf::from("."));
    assert_eq!(config.output_dir, PathBuf::from("build"));
    assert!(config.require_toc);
    assert!(config.repair_links);
    assert!(config.normalize_code_classes);
    assert!(!config.subsections);
  }

  #[test]
  fn test_from_file_all_formats() {
    let dir = tempdir().unwrap();
    let toml = write(
      dir.path(),
      "northdoc.toml",
      "output_dir = \"out\"\n[[docs]]\nsource = \"a.md\"\nfile = \"a\"\ntoc = \
       \"Contents\"\n",
    );
    let json = write(
      dir.path(),
      "northdoc.json",
      r#"{"output_dir": "out", "docs": [{"source": "a.md", "file": "a", "toc": "Contents"}]}"#,
    );
    let yaml = write(
      dir.path(),
      "config.yml",
      "output_dir: out\ndocs:\n  a.md:\n    file: a\n    toc: Contents\n",
    );

    let expected = Config {
      output_dir: PathBuf::from("out"),
      docs: vec![DocumentConfig::new("a.md", "a", "Contents")],
      ..Config::default()
    };
    assert_eq!(Config::from_file(toml).unwrap(), expected);
    assert_eq!(Config::from_file(json).unwrap(), expected);
    assert_eq!(Config::from_file(yaml).unwrap(), expected);
  }

  #[test]
  fn test_from_file_rejects_unknown_extension() {
    let dir = tempdir().unwrap();
    let path = write(dir.path(), "northdoc.ini", "x = 1");
    let err = Config::from_file(path).unwrap_err();
    assert!(err.to_string().contains("Unsupported config file format"));
  }

  #[test]
  fn test_from_file_reports_parse_errors() {
    let dir = tempdir().unwrap();
    let path = write(dir.path(), "northdoc.toml", "docs = 5");
    let err = Config::from_file(path).unwrap_err();
    assert!(err.to_string().contains("Failed to parse TOML config"));
  }

  #[test]
  fn test_find_config_file_in_order() {
    let dir = tempdir().unwrap();
    assert_eq!(Config::find_config_file_in(dir.path()), None);

    write(dir.path(), "config.yml", "docs: []\n");
    assert_eq!(
      Config::find_config_file_in(dir.path()),
      Some(dir.path().join("config.yml"))
    );

    write(dir.path(), "northdoc.toml", "");
    assert_eq!(
      Config::find_config_file_in(dir.path()),
      Some(dir.path().join("northdoc.toml"))
    );
  }

  #[test]
  fn test_merge_with_cli() {
    let mut config = Config::default();
    config.merge_with_cli(None, None);
    assert_eq!(config, Config::default());

    config.merge_with_cli(Some("public".into()), Some("page.html".into()));
    assert_eq!(config.output_dir, PathBuf::from("public"));
    assert_eq!(config.template_path, Some(PathBuf::from("page.html")));
  }

  #[test]
  fn test_paths() {
    let mut config = Config::default();
    config.source_dir = PathBuf::from("docs");
    config.output_dir = PathBuf::from("out");
    let doc = DocumentConfig::new("guide/intro.md", "intro", "Contents");
    assert_eq!(config.source_path(&doc), PathBuf::from("docs/guide/intro.md"));
    assert_eq!(config.output_path(&doc), PathBuf::from("out/intro.html"));
  }

  #[test]
  fn test_validate_collects_every_problem() {
    let dir = tempdir().unwrap();
    write(dir.path(), "a.md", "# A");

    let mut ok = DocumentConfig::new("a.md", "a", "Contents");
    ok.dir = TextDirection::Rtl;
    let config = Config {
      source_dir: dir.path().to_path_buf(),
      template_path: Some(dir.path().join("missing.html")),
      docs: vec![
        ok.clone(),
        DocumentConfig::new("missing.md", "a", " "),
        DocumentConfig::new("a.md", "sub/page", "Contents"),
      ],
      ..Config::default()
    };

    let message = config.validate().unwrap_err().to_string();
    assert!(message.contains("Template file does not exist"));
    assert!(message.contains("Document 2 source does not exist"));
    assert!(message.contains("Document 2 writes a.html"));
    assert!(message.contains("Document 2 has an empty table-of-contents title"));
    assert!(message.contains("Document 3 output file name contains a path separator"));

    let valid = Config {
      source_dir: dir.path().to_path_buf(),
      docs: vec![ok],
      ..Config::default()
    };
    assert!(valid.validate().is_ok());
  }

  #[test]
  fn test_validate_requires_documents() {
    let dir = tempdir().unwrap();
    let config = Config {
      source_dir: dir.path().to_path_buf(),
      ..Config::default()
    };
    let message = config.validate().unwrap_err().to_string();
    assert!(message.contains("No documents configured"));
  }

  #[test]
  fn test_generate_default_config() {
    let dir = tempdir().unwrap();
    for format in ["toml", "json", "yaml"] {
      let path = dir.path().join(format!("northdoc.{format}"));
      Config::generate_default_config(format, &path).unwrap();
      let config = Config::from_file(&path).unwrap();
      assert_eq!(config.output_dir, PathBuf::from("build"));
      assert_eq!(config.docs[0].file, "index");
    }

    let err =
      Config::generate_default_config("ini", &dir.path().join("x.ini")).unwrap_err();
    assert!(matches!(err, ConfigError::Template(_)));
  }

  #[test]
  fn test_export_templates_respects_force() {
    let dir = tempdir().unwrap();
    let target = dir.path().join("templates");

    Config::export_templates(&target, false).unwrap();
    let main = target.join("main.html");
    assert_eq!(
      fs::read_to_string(&main).unwrap(),
      northdoc_templates::MAIN_TEMPLATE
    );

    fs::write(&main, "custom").unwrap();
    Config::export_templates(&target, false).unwrap();
    assert_eq!(fs::read_to_string(&main).unwrap(), "custom");

    Config::export_templates(&target, true).unwrap();
    assert_eq!(
      fs::read_to_string(&main).unwrap(),
      northdoc_templates::MAIN_TEMPLATE
    );
  }

  #[test]
  fn test_export_templates_io_error_names_path() {
    let dir = tempdir().unwrap();
    let blocker = dir.path().join("templates");
    fs::write(&blocker, "not a directory").unwrap();

    let err = Config::export_templates(&blocker, false).unwrap_err();
    match err {
      ConfigError::Io { action, path, .. } => {
        assert_eq!(action, "create template directory");
        assert_eq!(path, blocker);
      },
      other => panic!("expected I/O error, got {other:?}"),
    }
  }
}

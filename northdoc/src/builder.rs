//! Building configured documents into pages.
use std::{
  fs,
  path::{Path, PathBuf},
};

use log::{error, info};
use northdoc_config::{Config, DocumentConfig};
use northdoc_markup::{ComrakRenderer, MarkdownRenderer, PageOptions, build_page};

use crate::{
  error::NorthdocError,
  html::template::{PageContext, PageTemplate},
};

/// Options for one run of [`build_all`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildOptions {
  /// Continue with the next document after a failure.
  pub keep_going: bool,
  /// Only build the document with this output file name.
  pub only:       Option<String>,
}

/// Outcome of a [`build_all`] run.
#[derive(Debug, Default)]
pub struct BuildSummary {
  /// Pages written, in build order.
  pub written:     Vec<PathBuf>,
  /// Documents that failed, by output file name.
  pub failed:      Vec<(String, NorthdocError)>,
  /// Total number of anchor links repaired.
  pub corrections: usize,
}

impl BuildSummary {
  #[must_use]
  pub fn is_success(&self) -> bool {
    self.failed.is_empty()
  }
}

/// Markup options for one document.
#[must_use]
pub fn page_options(config: &Config, doc: &DocumentConfig) -> PageOptions {
  PageOptions {
    toc_title:              doc.toc.clone(),
    subsections:            config.subsections,
    require_toc:            config.require_toc,
    repair_links:           config.repair_links,
    normalize_code_classes: config.normalize_code_classes,
  }
}

/// Build every configured document, one after another.
///
/// Without [`BuildOptions::keep_going`] the first failure ends the run and is
/// returned. Pages already written stay in place either way.
///
/// # Errors
///
/// Returns an error if the template cannot be loaded, the output directory
/// cannot be created, [`BuildOptions::only`] names no document, or a document
/// fails to build and `keep_going` is off.
pub fn build_all(
  config: &Config,
  options: &BuildOptions,
) -> Result<BuildSummary, NorthdocError> {
  let docs = select_documents(config, options.only.as_deref())?;
  let template = PageTemplate::load(config)?;
  let renderer = ComrakRenderer::default();

  fs::create_dir_all(&config.output_dir)
    .map_err(NorthdocError::io("create output directory", &config.output_dir))?;
  info!("Output directory: {}", config.output_dir.display());

  let mut summary = BuildSummary::default();
  for doc in docs {
    match build_document(config, doc, &template, &renderer) {
      Ok(built) => {
        summary.corrections += built.corrections;
        summary.written.push(built.path);
      },
      Err(e) if options.keep_going => {
        error!("{e}");
        summary.failed.push((doc.file.clone(), e));
      },
      Err(e) => return Err(e),
    }
  }

  Ok(summary)
}

/// A page written by [`build_document`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuiltPage {
  pub path:        PathBuf,
  pub corrections: usize,
}

/// Build one document into `<output_dir>/<file>.html`.
///
/// # Errors
///
/// Returns an error if the source cannot be read, a markup pass fails, the
/// template cannot be rendered, or the page cannot be written.
pub fn build_document<R>(
  config: &Config,
  doc: &DocumentConfig,
  template: &PageTemplate,
  renderer: &R,
) -> Result<BuiltPage, NorthdocError>
where
  R: MarkdownRenderer + ?Sized,
{
  let source = config.source_path(doc);
  info!("Building {} from {}", doc.output_file_name(), source.display());

  let markdown = fs::read_to_string(&source)
    .map_err(NorthdocError::io("read document", &source))?;

  let page = build_page(renderer, &markdown, &page_options(config, doc)).map_err(
    |source_error| {
      NorthdocError::Markup {
        path:   source.clone(),
        source: source_error,
      }
    },
  )?;
  log::debug!(
    "{}: {} articles, {} ids registered, {} links repaired",
    doc.file,
    page.nav.article_count(),
    page.registry.len(),
    page.corrections.len()
  );

  let html = template.render(&PageContext::new(doc, &page))?;
  let path = config.output_path(doc);
  write_page(&path, &html)?;

  Ok(BuiltPage {
    path,
    corrections: page.corrections.len(),
  })
}

fn select_documents<'c>(
  config: &'c Config,
  only: Option<&str>,
) -> Result<Vec<&'c DocumentConfig>, NorthdocError> {
  let Some(only) = only else {
    return Ok(config.docs.iter().collect());
  };

  let only = only.strip_suffix(".html").unwrap_or(only);
  let selected: Vec<_> = config.docs.iter().filter(|doc| doc.file == only).collect();
  if selected.is_empty() {
    return Err(NorthdocError::UnknownDocument(only.to_string()));
  }
  Ok(selected)
}

fn write_page(path: &Path, html: &str) -> Result<(), NorthdocError> {
  if let Some(parent) = path.parent() {
    fs::create_dir_all(parent)
      .map_err(NorthdocError::io("create directory", parent))?;
  }
  fs::write(path, html).map_err(NorthdocError::io("write page", path))?;
  info!("Wrote {}", path.display());
  Ok(())
}

use std::fs;

use northdoc_config::{Config, DocumentConfig};
use northdoc_markup::{PageResult, utils::strip_tags};
use tera::Tera;

use crate::error::NorthdocError;

const TEMPLATE_NAME: &str = "main";

/// A compiled page template.
///
/// Placeholders are substituted verbatim: the content and navigation are
/// already HTML, so autoescaping is off.
#[derive(Debug)]
pub struct PageTemplate {
  tera: Tera,
}

impl PageTemplate {
  /// Compile a template from its source text.
  ///
  /// # Errors
  ///
  /// Returns an error if the template does not parse.
  pub fn from_source(source: &str) -> Result<Self, NorthdocError> {
    let mut tera = Tera::default();
    tera.autoescape_on(Vec::new());
    tera.add_raw_template(TEMPLATE_NAME, source)?;
    Ok(Self { tera })
  }

  /// Load the configured template, or the embedded one when none is set.
  ///
  /// # Errors
  ///
  /// Returns an error if the template file cannot be read or does not parse.
  pub fn load(config: &Config) -> Result<Self, NorthdocError> {
    match &config.template_path {
      Some(path) => {
        log::debug!("Using page template {}", path.display());
        let source = fs::read_to_string(path)
          .map_err(NorthdocError::io("read template", path))?;
        Self::from_source(&source)
      },
      None => Self::from_source(northdoc_templates::MAIN_TEMPLATE),
    }
  }

  /// Render a page.
  ///
  /// # Errors
  ///
  /// Returns an error if the template references something missing from the
  /// context.
  pub fn render(&self, page: &PageContext<'_>) -> Result<String, NorthdocError> {
    let mut context = tera::Context::new();
    context.insert("lang", page.lang);
    context.insert("dir", page.dir);
    context.insert("title", &page.title);
    context.insert("nav", page.nav);
    context.insert("content", page.content);
    Ok(self.tera.render(TEMPLATE_NAME, &context)?)
  }
}

/// Values substituted into the page template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageContext<'a> {
  pub lang:    &'a str,
  pub dir:     &'static str,
  pub title:   String,
  pub nav:     &'a str,
  pub content: &'a str,
}

impl<'a> PageContext<'a> {
  #[must_use]
  pub fn new(doc: &'a DocumentConfig, page: &'a PageResult) -> Self {
    Self {
      lang:    &doc.lang,
      dir:     doc.dir.as_str(),
      title:   page_title(doc, page),
      nav:     &page.nav_html,
      content: &page.content,
    }
  }
}

/// Title of a page: the text of its first article heading, falling back to the
/// output file name.
#[must_use]
pub fn page_title(doc: &DocumentConfig, page: &PageResult) -> String {
  page
    .nav
    .items
    .values()
    .map(|article| strip_tags(&article.name).trim().to_string())
    .find(|title| !title.is_empty())
    .unwrap_or_else(|| doc.file.clone())
}

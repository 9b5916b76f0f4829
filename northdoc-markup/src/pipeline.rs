//! The per-document markup pipeline.
//!
//! ```text
//! markdown -> render -> code classes -> sectionize -> nav -> strip TOC -> links
//! ```
use crate::{
  codeclass::normalize_code_classes,
  error::{MarkupError, MarkupResult},
  links::repair_links,
  nav::synthesize_nav,
  render::MarkdownRenderer,
  sectionize::{SectionizeOptions, sectionize},
  strip::remove_stale_nav,
  types::{NAV_CONTAINER_TAG, PageResult},
};

/// Options controlling [`build_page`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageOptions {
  /// Text of the table-of-contents heading.
  pub toc_title:              String,
  /// Record `h3` headings as a third navigation level.
  pub subsections:            bool,
  /// Fail when the table-of-contents heading is missing.
  pub require_toc:            bool,
  /// Run the link repair pass.
  pub repair_links:           bool,
  /// Rewrite code-block classes to `language-*`.
  pub normalize_code_classes: bool,
}

impl PageOptions {
  #[must_use]
  pub fn new(toc_title: impl Into<String>) -> Self {
    Self {
      toc_title: toc_title.into(),
      ..Self::default()
    }
  }

  fn sectionize_options(&self) -> SectionizeOptions {
    SectionizeOptions::new(self.toc_title.clone()).with_subsections(self.subsections)
  }
}

impl Default for PageOptions {
  fn default() -> Self {
    Self {
      toc_title:              String::new(),
      subsections:            false,
      require_toc:            true,
      repair_links:           true,
      normalize_code_classes: true,
    }
  }
}

/// Render `markdown` and run every markup pass over it.
///
/// # Errors
///
/// Returns the renderer's error, or any error of [`assemble_page`].
pub fn build_page<R>(
  renderer: &R,
  markdown: &str,
  options: &PageOptions,
) -> MarkupResult<PageResult>
where
  R: MarkdownRenderer + ?Sized,
{
  let html = renderer.render(markdown)?;
  assemble_page(&html, options)
}

/// Run every markup pass over already rendered HTML.
///
/// # Errors
///
/// - any error of [`sectionize`]
/// - [`MarkupError::TocNotFound`] if no table-of-contents heading was found
///   and [`PageOptions::require_toc`] is set
/// - [`MarkupError::UnclosedNavigation`] if the navigation block is never
///   closed
pub fn assemble_page(html: &str, options: &PageOptions) -> MarkupResult<PageResult> {
  let html = if options.normalize_code_classes {
    normalize_code_classes(html)
  } else {
    html.to_string()
  };

  let sectionized = sectionize(&html, &options.sectionize_options())?;
  log::debug!(
    "Sectionized {} articles, {} navigation entries, {} ids",
    sectionized.nav.article_count(),
    sectionized.nav.entry_count(),
    sectionized.registry.len()
  );

  let nav_html = synthesize_nav(&sectionized.nav);

  let content = match remove_stale_nav(&sectionized.html, NAV_CONTAINER_TAG)? {
    Some(stripped) => stripped,
    None if options.require_toc => {
      return Err(MarkupError::TocNotFound {
        title: options.toc_title.clone(),
      });
    },
    None => {
      log::warn!(
        "No table of contents titled \"{}\"; keeping content as is",
        options.toc_title
      );
      sectionized.html
    },
  };

  let (content, corrections) = if options.repair_links {
    repair_links(&content, &sectionized.registry)
  } else {
    (content, Vec::new())
  };

  Ok(PageResult {
    content,
    nav_html,
    nav: sectionized.nav,
    registry: sectionized.registry,
    corrections,
  })
}

//! Markdown to HTML rendering.
//!
//! Rendering is an external concern: the rest of the crate only needs some
//! [`MarkdownRenderer`] that produces flat HTML whose headings carry `id`
//! attributes. [`ComrakRenderer`] is the implementation used by the build.
use std::sync::LazyLock;

use comrak::{Options, markdown_to_html};
use regex::{Captures, Regex};

use crate::{
  error::MarkupResult,
  utils::{never_matching_regex, slugify, strip_tags},
};

/// Converts a markdown document into flat HTML.
pub trait MarkdownRenderer {
  /// Render `markdown` to HTML.
  ///
  /// # Errors
  ///
  /// Returns [`crate::MarkupError::Render`] if the document cannot be
  /// rendered.
  fn render(&self, markdown: &str) -> MarkupResult<String>;
}

impl<F> MarkdownRenderer for F
where
  F: Fn(&str) -> MarkupResult<String>,
{
  fn render(&self, markdown: &str) -> MarkupResult<String> {
    self(markdown)
  }
}

/// Options for [`ComrakRenderer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
  /// Enable GitHub Flavored Markdown extensions.
  pub gfm:         bool,
  /// Assign an `id` to every heading that lacks one.
  pub heading_ids: bool,
}

impl Default for RenderOptions {
  fn default() -> Self {
    Self {
      gfm:         cfg!(feature = "gfm"),
      heading_ids: true,
    }
  }
}

/// [`MarkdownRenderer`] backed by comrak.
#[derive(Debug, Clone, Copy, Default)]
pub struct ComrakRenderer {
  options: RenderOptions,
}

impl ComrakRenderer {
  #[must_use]
  pub const fn new(options: RenderOptions) -> Self {
    Self { options }
  }

  #[must_use]
  pub const fn options(&self) -> &RenderOptions {
    &self.options
  }

  /// Build comrak options from [`RenderOptions`].
  fn comrak_options(&self) -> Options<'_> {
    let mut options = Options::default();
    if self.options.gfm {
      options.extension.table = true;
      options.extension.footnotes = true;
      options.extension.strikethrough = true;
      options.extension.tasklist = true;
      options.extension.autolink = true;
    }
    options.render.r#unsafe = true;
    // Heading ids are assigned by `assign_heading_ids`, not by comrak's
    // anchor links.
    options.extension.header_ids = None;
    options
  }
}

impl MarkdownRenderer for ComrakRenderer {
  fn render(&self, markdown: &str) -> MarkupResult<String> {
    let html = markdown_to_html(markdown, &self.comrak_options());
    if self.options.heading_ids {
      Ok(assign_heading_ids(&html))
    } else {
      Ok(html)
    }
  }
}

/// Give every `<hN>` element without an `id` attribute an `id`.
///
/// Other attributes on the heading are kept; the `id` is added after them.
/// A trailing `{#custom-id}` in the heading text is removed and used as the
/// id. Otherwise the id is the slug of the heading's text; headings whose slug
/// is empty get `heading-N`, N being the heading's position in the document.
#[must_use]
pub fn assign_heading_ids(html: &str) -> String {
  static HEADING_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)<h([1-6])(\s[^>]*)?>(.*?)</h([1-6])>").unwrap_or_else(|e| {
      log::error!("Failed to compile HEADING_RE regex: {e}");
      never_matching_regex()
    })
  });
  static ID_ATTR_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(^|\s)id\s*=").unwrap_or_else(|e| {
      log::error!("Failed to compile ID_ATTR_RE regex: {e}");
      never_matching_regex()
    })
  });
  static EXPLICIT_ID_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\s*\{#([a-zA-Z0-9_-]+)\}\s*$").unwrap_or_else(|e| {
      log::error!("Failed to compile EXPLICIT_ID_RE regex: {e}");
      never_matching_regex()
    })
  });

  let mut position = 0usize;
  HEADING_RE
    .replace_all(html, |caps: &Captures| {
      position += 1;
      let level = &caps[1];
      let attrs = caps.get(2).map_or("", |m| m.as_str().trim_end());
      if level != &caps[4] || ID_ATTR_RE.is_match(attrs) {
        return caps[0].to_string();
      }

      let inner = &caps[3];
      if let Some(explicit) = EXPLICIT_ID_RE.captures(inner) {
        let id = &explicit[1];
        let text = EXPLICIT_ID_RE.replace(inner, "");
        return format!("<h{level}{attrs} id=\"{id}\">{text}</h{level}>");
      }

      let text = strip_tags(inner);
      let mut id = slugify(&html_escape::decode_html_entities(&text));
      if id.is_empty() {
        id = format!("heading-{position}");
      }
      format!("<h{level}{attrs} id=\"{id}\">{inner}</h{level}>")
    })
    .into_owned()
}

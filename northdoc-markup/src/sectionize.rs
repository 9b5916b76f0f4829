//! Restructuring of flat rendered HTML into articles and sections.
//!
//! Rendered markdown is a flat run of headings and blocks. The site expects
//! every top-level heading to own an `<article>` and every second-level
//! heading to own a `<section>` inside it:
//!
//! ```text
//! <h1 id="a">A</h1>            <article id="a" class="…"><h1>A</h1>
//! <p>…</p>                     <p>…</p>
//! <h2 id="b">B</h2>     =>     <section id="b" class="…"><h2>B</h2>
//! <p>…</p>                     <p>…</p>
//!                              </section>
//!                              </article>
//! ```
//!
//! The level 1 heading whose text equals the configured table-of-contents
//! title is wrapped in the reserved [`NAV_CONTAINER_TAG`] instead, so that
//! [`crate::strip::remove_stale_nav`] can drop it once the generated
//! navigation replaces it.
//!
//! The scan is a fold over [`HeadingTokenizer`] tokens. Replacements are
//! addressed by each token's byte span, so two identical heading blocks are
//! handled independently.
use crate::{
  error::{MarkupError, MarkupResult},
  heading::{ElementKind, HeadingTokenizer, IdElement, opening_tag},
  types::{IdRegistry, NAV_CONTAINER_TAG, NavEntry, NavRoot, NavTree, Sectionized},
  utils::text_matches_title,
};

/// Class attribute of generated `<article>` containers.
pub const ARTICLE_CLASS: &str = "__main--article base--STYLED";

/// Class attribute of generated `<section>` containers.
pub const SECTION_CLASS: &str = "__main--section";

/// Options for [`sectionize`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SectionizeOptions {
  /// Text of the level 1 heading that holds the in-document table of
  /// contents. Compared case-insensitively against the heading's text.
  pub toc_title:   String,
  /// Record `h3` headings as a third navigation level.
  pub subsections: bool,
}

impl SectionizeOptions {
  #[must_use]
  pub fn new(toc_title: impl Into<String>) -> Self {
    Self {
      toc_title:   toc_title.into(),
      subsections: false,
    }
  }

  #[must_use]
  pub const fn with_subsections(mut self, enabled: bool) -> Self {
    self.subsections = enabled;
    self
  }
}

/// Restructure `html` into articles and sections, recording the navigation
/// tree and identifier registry along the way.
///
/// # Errors
///
/// - [`MarkupError::MalformedHeading`] if a heading is never closed
/// - [`MarkupError::MissingHeadingId`] if an `h1` or `h2` has no `id`
/// - [`MarkupError::DuplicateToc`] if the table-of-contents heading appears
///   twice
pub fn sectionize(
  html: &str,
  options: &SectionizeOptions,
) -> MarkupResult<Sectionized> {
  let state = HeadingTokenizer::new(html).try_fold(
    Sectionizer::new(html, options),
    |mut state, element| {
      state.visit(&element?)?;
      Ok::<_, MarkupError>(state)
    },
  )?;

  Ok(state.finish())
}

/// Accumulator threaded through the fold.
struct Sectionizer<'a> {
  html:     &'a str,
  options:  &'a SectionizeOptions,
  out:      String,
  cursor:   usize,
  nav:      NavTree,
  registry: IdRegistry,
  article:  Option<String>,
  section:  Option<String>,
  in_nav:   bool,
  toc_seen: bool,
}

impl<'a> Sectionizer<'a> {
  fn new(html: &'a str, options: &'a SectionizeOptions) -> Self {
    Self {
      html,
      options,
      out: String::with_capacity(html.len() + html.len() / 8),
      cursor: 0,
      nav: NavTree::default(),
      registry: IdRegistry::new(),
      article: None,
      section: None,
      in_nav: false,
      toc_seen: false,
    }
  }

  fn visit(&mut self, element: &IdElement<'_>) -> MarkupResult<()> {
    match element.kind {
      ElementKind::Heading(1) => self.visit_h1(element),
      ElementKind::Heading(2) => self.visit_h2(element),
      ElementKind::Heading(3) if self.options.subsections => {
        self.visit_h3(element);
        Ok(())
      },
      _ => {
        if let Some(id) = element.id {
          self.registry.push(id);
        }
        Ok(())
      },
    }
  }

  fn visit_h1(&mut self, element: &IdElement<'_>) -> MarkupResult<()> {
    let id = self.require_id(element)?;
    let inner = element.inner.unwrap_or_default();

    let mut replacement = self.close_containers();

    if text_matches_title(inner, &self.options.toc_title) {
      if self.toc_seen {
        return Err(MarkupError::DuplicateToc {
          title: self.options.toc_title.clone(),
        });
      }
      self.toc_seen = true;
      self.in_nav = true;
      self.nav.root = Some(NavRoot {
        id:   id.to_string(),
        name: inner.to_string(),
      });
      log::debug!("Table of contents found at #{id}");
      replacement.push_str(&format!("<{NAV_CONTAINER_TAG}>\n<h1>{inner}</h1>"));
    } else {
      self.article = Some(id.to_string());
      self
        .nav
        .items
        .insert(id.to_string(), NavEntry::new(inner));
      log::trace!("Opened article #{id}");
      replacement.push_str(&format!(
        "<article id=\"{id}\" class=\"{ARTICLE_CLASS}\"><h1>{inner}</h1>"
      ));
    }

    self.registry.push(id);
    self.replace(element, &replacement);
    Ok(())
  }

  fn visit_h2(&mut self, element: &IdElement<'_>) -> MarkupResult<()> {
    let id = self.require_id(element)?;
    let inner = element.inner.unwrap_or_default();

    let mut replacement = String::new();
    if self.section.take().is_some() {
      replacement.push_str("</section>\n");
    }
    replacement.push_str(&format!(
      "<section id=\"{id}\" class=\"{SECTION_CLASS}\"><h2>{inner}</h2>"
    ));

    if let Some(article) = self.article_entry() {
      article.sections.insert(id.to_string(), NavEntry::new(inner));
    } else {
      log::debug!("Section #{id} is outside any article; not added to navigation");
    }

    self.section = Some(id.to_string());
    self.registry.push(id);
    self.replace(element, &replacement);
    Ok(())
  }

  fn visit_h3(&mut self, element: &IdElement<'_>) {
    let Some(id) = element.id else {
      return;
    };
    self.registry.push(id);

    let inner = element.inner.unwrap_or_default();
    let section = self.section.clone();
    if let Some(section) = section.and_then(|section| {
      self
        .article_entry()
        .and_then(|article| article.sections.get_mut(&section))
    }) {
      section.sections.insert(id.to_string(), NavEntry::new(inner));
    }
  }

  /// Navigation entry of the open article, if any.
  fn article_entry(&mut self) -> Option<&mut NavEntry> {
    if self.in_nav {
      return None;
    }
    let article = self.article.as_deref()?;
    self.nav.items.get_mut(article)
  }

  fn require_id<'e>(&self, element: &IdElement<'e>) -> MarkupResult<&'e str> {
    element.id.ok_or_else(|| {
      MarkupError::MissingHeadingId {
        tag:      element.tag.clone(),
        fragment: opening_tag(self.html, element).to_string(),
        offset:   element.span.start,
      }
    })
  }

  /// Closing tags for every open container, innermost first.
  fn close_containers(&mut self) -> String {
    let mut closing = String::new();
    if self.section.take().is_some() {
      closing.push_str("</section>\n");
    }
    if self.article.take().is_some() {
      closing.push_str("</article>\n");
    }
    if self.in_nav {
      self.in_nav = false;
      closing.push_str(&format!("</{NAV_CONTAINER_TAG}>\n"));
    }
    closing
  }

  /// Copy everything before `element` verbatim, then emit `replacement` in
  /// place of the element's span.
  fn replace(&mut self, element: &IdElement<'_>, replacement: &str) {
    self.out.push_str(&self.html[self.cursor..element.span.start]);
    self.out.push_str(replacement);
    self.cursor = element.span.end;
  }

  fn finish(mut self) -> Sectionized {
    self.out.push_str(&self.html[self.cursor..]);

    let closing = self.close_containers();
    if !closing.is_empty() {
      if !self.out.is_empty() && !self.out.ends_with('\n') {
        self.out.push('\n');
      }
      self.out.push_str(&closing);
    }

    Sectionized {
      html:     self.out,
      nav:      self.nav,
      registry: self.registry,
    }
  }
}

#[cfg(test)]
mod tests {
  #![allow(clippy::unwrap_used, clippy::panic, reason = "Fine in tests")]

  use super::*;

  fn run(html: &str, toc: &str) -> Sectionized {
    sectionize(html, &SectionizeOptions::new(toc)).unwrap()
  }

  #[test]
  fn test_articles_and_sections() {
    let html = "<h1 id=\"a\">A</h1>\n<p>a</p>\n<h2 id=\"b\">B</h2>\n<p>b</p>\n";
    let result = run(html, "Contents");
    assert_eq!(
      result.html,
      "<article id=\"a\" class=\"__main--article base--STYLED\"><h1>A</h1>\n\
       <p>a</p>\n<section id=\"b\" class=\"__main--section\"><h2>B</h2>\n\
       <p>b</p>\n</section>\n</article>\n"
    );
    assert_eq!(result.nav.items.len(), 1);
    assert_eq!(result.nav.items["a"].name, "A");
    assert_eq!(result.nav.items["a"].sections["b"].name, "B");
    assert_eq!(result.registry.iter().collect::<Vec<_>>(), ["a", "b"]);
  }

  #[test]
  fn test_first_article_has_no_leading_close() {
    let result = run("<h1 id=\"a\">A</h1>", "Contents");
    assert!(result.html.starts_with("<article id=\"a\""));
  }

  #[test]
  fn test_new_article_closes_section_and_article() {
    let html = "<h1 id=\"a\">A</h1><h2 id=\"s\">S</h2><h1 id=\"b\">B</h1>";
    let result = run(html, "Contents");
    assert!(result.html.contains(
      "</section>\n</article>\n<article id=\"b\" class=\"__main--article \
       base--STYLED\"><h1>B</h1>"
    ));
  }

  #[test]
  fn test_section_never_closes_article() {
    let html = "<h1 id=\"a\">A</h1><h2 id=\"s\">S</h2><h2 id=\"t\">T</h2>";
    let result = run(html, "Contents");
    assert_eq!(result.html.matches("<article").count(), 1);
    assert_eq!(result.html.matches("</article>").count(), 1);
    assert!(result.html.contains(
      "</section>\n<section id=\"t\" class=\"__main--section\"><h2>T</h2>"
    ));
  }

  #[test]
  fn test_toc_heading_becomes_nav_container() {
    let html = "<h1 id=\"contents\">Contents</h1>\n<ul><li>x</li></ul>\n<h1 \
                id=\"start\">Start</h1>\n";
    let result = run(html, "contents");
    assert!(!result.html.contains("<article id=\"contents\""));
    assert!(
      result
        .html
        .starts_with("<opennav>\n<h1>Contents</h1>\n<ul><li>x</li></ul>\n</opennav>\n")
    );
    assert_eq!(
      result.nav.root,
      Some(NavRoot {
        id:   "contents".into(),
        name: "Contents".into(),
      })
    );
    assert_eq!(result.nav.items.keys().collect::<Vec<_>>(), ["start"]);
    assert!(result.registry.contains("contents"));
  }

  #[test]
  fn test_toc_matched_by_text_not_id() {
    let html = "<h1 id=\"contents\">Overview</h1><h1 id=\"toc\">Table of \
                Contents</h1>";
    let result = run(html, "TABLE OF CONTENTS");
    assert_eq!(result.nav.root.map(|root| root.id), Some("toc".to_string()));
    assert!(result.nav.items.contains_key("contents"));
  }

  #[test]
  fn test_trailing_toc_is_closed() {
    let result = run("<h1 id=\"c\">Contents</h1><p>x</p>", "Contents");
    assert_eq!(result.html, "<opennav>\n<h1>Contents</h1><p>x</p>\n</opennav>\n");
  }

  #[test]
  fn test_duplicate_toc_is_an_error() {
    let html = "<h1 id=\"c\">Contents</h1><h1 id=\"d\">contents</h1>";
    let result = sectionize(html, &SectionizeOptions::new("Contents"));
    assert!(matches!(result, Err(MarkupError::DuplicateToc { .. })));
  }

  #[test]
  fn test_other_ids_only_registered() {
    let html = "<h1 id=\"a\">A</h1><p><a id=\"legacy\"></a>x</p><h3 \
                id=\"deep\">Deep</h3>";
    let result = run(html, "Contents");
    assert!(result.html.contains("<p><a id=\"legacy\"></a>x</p><h3 id=\"deep\">Deep</h3>"));
    assert_eq!(result.registry.iter().collect::<Vec<_>>(), ["a", "legacy", "deep"]);
    assert!(result.nav.items["a"].sections.is_empty());
  }

  #[test]
  fn test_subsections_recorded_when_enabled() {
    let html = "<h1 id=\"a\">A</h1><h2 id=\"s\">S</h2><h3 id=\"x\">X</h3><h3 \
                id=\"y\">Y</h3>";
    let options = SectionizeOptions::new("Contents").with_subsections(true);
    let result = sectionize(html, &options).unwrap();
    let section = &result.nav.items["a"].sections["s"];
    assert_eq!(section.sections.keys().collect::<Vec<_>>(), ["x", "y"]);
    assert!(result.html.contains("<h3 id=\"x\">X</h3>"));
  }

  #[test]
  fn test_empty_heading_text_still_navigable() {
    let result = run("<h1 id=\"heading-1\"></h1>", "Contents");
    assert_eq!(result.nav.items["heading-1"].name, "");
  }

  #[test]
  fn test_duplicate_article_ids_overwrite_in_place() {
    let html = "<h1 id=\"a\">First</h1><h1 id=\"b\">B</h1><h1 id=\"a\">Second</h1>";
    let result = run(html, "Contents");
    assert_eq!(result.nav.items.keys().collect::<Vec<_>>(), ["a", "b"]);
    assert_eq!(result.nav.items["a"].name, "Second");
    assert_eq!(result.registry.len(), 3);
  }

  #[test]
  fn test_identical_heading_blocks_are_independent() {
    let html = "<h1 id=\"a\">A</h1><h2 id=\"x\">X</h2><h1 id=\"b\">B</h1><h2 \
                id=\"x\">X</h2>";
    let result = run(html, "Contents");
    assert_eq!(result.html.matches("<section id=\"x\"").count(), 2);
    assert_eq!(result.html.matches("</section>").count(), 2);
    assert!(result.nav.items["b"].sections.contains_key("x"));
  }

  #[test]
  fn test_missing_id_is_an_error() {
    let result = sectionize("<h2>No id</h2>", &SectionizeOptions::new("Contents"));
    match result {
      Err(MarkupError::MissingHeadingId { tag, fragment, .. }) => {
        assert_eq!(tag, "h2");
        assert_eq!(fragment, "<h2>");
      },
      other => panic!("expected missing id error, got {other:?}"),
    }
  }

  #[test]
  fn test_section_before_first_article() {
    let html = "<h2 id=\"pre\">Pre</h2><h1 id=\"a\">A</h1>";
    let result = run(html, "Contents");
    assert!(result.html.starts_with(
      "<section id=\"pre\" class=\"__main--section\"><h2>Pre</h2></section>\n<article"
    ));
    assert!(result.nav.items["a"].sections.is_empty());
    assert!(result.registry.contains("pre"));
  }
}

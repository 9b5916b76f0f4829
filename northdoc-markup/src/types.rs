//! Types for northdoc-markup public API and internal use.
use indexmap::IndexMap;
use serde::Serialize;

/// Tag name of the container that temporarily wraps the in-document table of
/// contents between sectionizing and stale navigation removal.
pub const NAV_CONTAINER_TAG: &str = "opennav";

/// The heading designated as table of contents.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct NavRoot {
  /// Identifier of the table-of-contents heading.
  pub id:   String,
  /// Inner markup of the table-of-contents heading.
  pub name: String,
}

/// One navigation node: an article, a section, or a sub-section.
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
pub struct NavEntry {
  /// Inner markup of the heading, used as the link label.
  pub name:     String,
  /// Child entries keyed by identifier, in insertion order.
  pub sections: IndexMap<String, Self>,
}

impl NavEntry {
  #[must_use]
  pub fn new(name: impl Into<String>) -> Self {
    Self {
      name:     name.into(),
      sections: IndexMap::new(),
    }
  }
}

/// Navigation tree recorded while sectionizing.
///
/// Three levels at most: articles, their sections, and the sections'
/// sub-sections. Inserting an identifier that already exists at a level
/// replaces the entry but keeps its original position.
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
pub struct NavTree {
  /// Table-of-contents heading, if one was found.
  pub root:  Option<NavRoot>,
  /// Articles keyed by identifier, in insertion order.
  pub items: IndexMap<String, NavEntry>,
}

impl NavTree {
  /// Number of articles in the tree.
  #[must_use]
  pub fn article_count(&self) -> usize {
    self.items.len()
  }

  /// Total number of entries across every level.
  #[must_use]
  pub fn entry_count(&self) -> usize {
    fn count(entries: &IndexMap<String, NavEntry>) -> usize {
      entries
        .values()
        .map(|entry| 1 + count(&entry.sections))
        .sum()
    }
    count(&self.items)
  }

  #[must_use]
  pub fn is_empty(&self) -> bool {
    self.items.is_empty()
  }
}

/// Ordered log of every identifier seen while sectionizing.
///
/// Duplicates are kept; the registry is only consulted by the link repair
/// pass, where registry order decides which candidate wins.
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct IdRegistry(Vec<String>);

impl IdRegistry {
  #[must_use]
  pub const fn new() -> Self {
    Self(Vec::new())
  }

  pub fn push(&mut self, id: impl Into<String>) {
    self.0.push(id.into());
  }

  #[must_use]
  pub fn contains(&self, id: &str) -> bool {
    self.0.iter().any(|known| known == id)
  }

  pub fn iter(&self) -> impl Iterator<Item = &str> {
    self.0.iter().map(String::as_str)
  }

  #[must_use]
  pub fn len(&self) -> usize {
    self.0.len()
  }

  #[must_use]
  pub fn is_empty(&self) -> bool {
    self.0.is_empty()
  }
}

impl<S: Into<String>> FromIterator<S> for IdRegistry {
  fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
    Self(iter.into_iter().map(Into::into).collect())
  }
}

/// Output of the sectionizer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Sectionized {
  /// Restructured HTML with `<article>`/`<section>` containers.
  pub html:     String,
  /// Navigation tree recorded during the scan.
  pub nav:      NavTree,
  /// Every identifier encountered during the scan.
  pub registry: IdRegistry,
}

/// Audit record of one anchor rewritten by the link repair pass.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct LinkCorrection {
  /// Target before repair (without `#`).
  pub original:  String,
  /// Registry identifier the anchor now points at.
  pub corrected: String,
  /// Levenshtein distance between the two.
  pub distance:  usize,
  /// Byte offset of the `href` attribute in the HTML given to the pass.
  pub offset:    usize,
}

/// Result of building one page body.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageResult {
  /// Final content HTML, ready for the `{{content}}` placeholder.
  pub content:     String,
  /// Navigation markup, ready for the `{{nav}}` placeholder.
  pub nav_html:    String,
  /// Navigation tree the markup was synthesized from.
  pub nav:         NavTree,
  /// Identifier registry used for link repair.
  pub registry:    IdRegistry,
  /// Every link correction applied to `content`.
  pub corrections: Vec<LinkCorrection>,
}

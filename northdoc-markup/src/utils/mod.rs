//! Small string helpers shared by the markup passes.
pub mod distance;

use std::sync::LazyLock;

use regex::Regex;

pub use self::distance::levenshtein;

/// Slugify a string for use as an anchor ID.
/// Converts to lowercase, replaces non-alphanumeric characters with dashes,
/// and trims leading/trailing dashes.
#[must_use]
pub fn slugify(text: &str) -> String {
  text
    .to_lowercase()
    .replace(|c: char| !c.is_alphanumeric() && c != '-' && c != '_', "-")
    .trim_matches('-')
    .to_string()
}

/// Strip every tag from an HTML fragment, keeping only its text.
///
/// Entities are left as written; the result is meant for comparisons and
/// slugs, not for display.
#[must_use]
pub fn strip_tags(html: &str) -> String {
  static TAG_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"<[^>]*>").unwrap_or_else(|e| {
      log::error!("Failed to compile TAG_RE regex: {e}");
      never_matching_regex()
    })
  });

  TAG_RE.replace_all(html, "").into_owned()
}

/// Case-insensitive comparison of a heading's plain text against a title.
///
/// Tags are stripped and entities decoded first, so `Q&amp;A` matches `Q&A`.
#[must_use]
pub fn text_matches_title(inner_html: &str, title: &str) -> bool {
  let text = strip_tags(inner_html);
  html_escape::decode_html_entities(&text).trim().to_lowercase()
    == title.trim().to_lowercase()
}

/// Create a regex that never matches anything.
///
/// This is used as a fallback when a regex fails to compile.
///
/// # Panics
///
/// Never panics; both patterns are valid.
#[must_use]
#[allow(clippy::unwrap_used, reason = "Both patterns are known to be valid")]
pub fn never_matching_regex() -> Regex {
  Regex::new(r"[^\s\S]").unwrap_or_else(|_| Regex::new(r"^\b$").unwrap())
}

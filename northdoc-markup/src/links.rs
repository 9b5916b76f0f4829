//! Edit-distance repair of internal anchor links.
//!
//! Documents are written by hand and anchors drift: `#instalation` next to a
//! heading whose id is `installation`. Every `href="#…"` (attribute name in
//! any case) that does not name a known identifier is pointed at the closest
//! registered one, provided the two differ by fewer than three edits.
use std::sync::LazyLock;

use regex::Regex;

use crate::{
  types::{IdRegistry, LinkCorrection},
  utils::{levenshtein, never_matching_regex},
};

/// Corrections are only made below this distance.
pub const MAX_DISTANCE: usize = 3;

static HREF_RE: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(r##"(?i)href="#([^"]*)""##).unwrap_or_else(|e| {
    log::error!("Failed to compile HREF_RE regex: {e}");
    never_matching_regex()
  })
});

/// Rewrite anchor targets that are close misspellings of registered ids.
///
/// A target equal to a registered id is never touched, which makes the pass
/// idempotent once every target is exact. When several ids are close enough,
/// the one registered last wins. Each rewrite replaces only the span of that
/// one `href` attribute.
#[must_use]
pub fn repair_links(
  html: &str,
  registry: &IdRegistry,
) -> (String, Vec<LinkCorrection>) {
  let mut out = String::with_capacity(html.len());
  let mut corrections = Vec::new();
  let mut cursor = 0;

  for caps in HREF_RE.captures_iter(html) {
    let (Some(attr), Some(target)) = (caps.get(0), caps.get(1)) else {
      continue;
    };
    let original = target.as_str();
    if registry.contains(original) {
      continue;
    }

    let Some((corrected, distance)) = closest_id(original, registry) else {
      log::debug!("No registered id close to #{original}");
      continue;
    };

    log::info!("Repairing link #{original} -> #{corrected} (distance {distance})");

    out.push_str(&html[cursor..attr.start()]);
    out.push_str(&format!("href=\"#{corrected}\""));
    cursor = attr.end();

    corrections.push(LinkCorrection {
      original: original.to_string(),
      corrected: corrected.to_string(),
      distance,
      offset: attr.start(),
    });
  }

  out.push_str(&html[cursor..]);
  (out, corrections)
}

/// Last registered id within [`MAX_DISTANCE`] of `target`.
fn closest_id<'r>(
  target: &str,
  registry: &'r IdRegistry,
) -> Option<(&'r str, usize)> {
  registry
    .iter()
    .filter_map(|id| {
      let distance = levenshtein(target, id);
      (distance > 0 && distance < MAX_DISTANCE).then_some((id, distance))
    })
    .last()
}

#[cfg(test)]
mod tests {
  use super::*;

  fn registry(ids: &[&str]) -> IdRegistry {
    ids.iter().copied().collect()
  }

  #[test]
  fn test_close_target_is_repaired() {
    let registry = registry(&["intro", "overview"]);
    let (html, corrections) =
      repair_links(r##"<a href="#introo">Intro</a>"##, &registry);
    assert_eq!(html, r##"<a href="#intro">Intro</a>"##);
    assert_eq!(
      corrections,
      [LinkCorrection {
        original:  "introo".into(),
        corrected: "intro".into(),
        distance:  1,
        offset:    3,
      }]
    );
  }

  #[test]
  fn test_exact_target_untouched() {
    let registry = registry(&["intro", "intra"]);
    let html = r##"<a href="#intro">Intro</a>"##;
    let (repaired, corrections) = repair_links(html, &registry);
    assert_eq!(repaired, html);
    assert!(corrections.is_empty());
  }

  #[test]
  fn test_distant_target_untouched() {
    let registry = registry(&["installation"]);
    let html = r##"<a href="#usage">Usage</a>"##;
    assert_eq!(repair_links(html, &registry).0, html);
  }

  #[test]
  fn test_last_candidate_wins() {
    let registry = registry(&["setup", "setups", "set-up"]);
    let (html, _) = repair_links(r##"<a href="#setu">x</a>"##, &registry);
    assert_eq!(html, r##"<a href="#set-up">x</a>"##);
  }

  #[test]
  fn test_rewrites_are_position_addressed() {
    let registry = registry(&["intro"]);
    let html = r##"<a href="#intr">a</a><a href="#intro">b</a><a href="#intr">c</a>"##;
    let (repaired, corrections) = repair_links(html, &registry);
    assert_eq!(
      repaired,
      r##"<a href="#intro">a</a><a href="#intro">b</a><a href="#intro">c</a>"##
    );
    assert_eq!(corrections.len(), 2);
    assert!(corrections[0].offset < corrections[1].offset);
  }

  #[test]
  fn test_idempotent_after_repair() {
    let registry = registry(&["intro", "overview"]);
    let (once, _) = repair_links(
      r##"<a href="#introo">a</a><a href="#overveiw">b</a>"##,
      &registry,
    );
    let (twice, corrections) = repair_links(&once, &registry);
    assert_eq!(once, twice);
    assert!(corrections.is_empty());
  }

  #[test]
  fn test_attribute_name_case_ignored() {
    let registry = registry(&["intro"]);
    let (html, corrections) =
      repair_links(r##"<A HREF="#intr">x</A><a Href="#intro">y</a>"##, &registry);
    assert_eq!(html, r##"<A href="#intro">x</A><a Href="#intro">y</a>"##);
    assert_eq!(corrections.len(), 1);
  }

  #[test]
  fn test_external_links_ignored() {
    let registry = registry(&["intro"]);
    let html = r#"<a href="https://example.com/#intr">x</a>"#;
    assert_eq!(repair_links(html, &registry).0, html);
  }
}

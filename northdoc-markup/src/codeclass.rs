//! Normalization of syntax-highlighting class names on code blocks.
//!
//! Highlighters on the site expect `language-*` classes and use `markup` for
//! HTML. Renderers disagree on both, so rendered HTML is rewritten before it
//! is sectionized.
use std::{borrow::Cow, sync::LazyLock};

use regex::{Captures, Regex};

use crate::utils::never_matching_regex;

/// Rewrite code-block language classes to the `language-*` convention.
///
/// Only `class` attribute values are touched:
/// - `lang-html` and `language-html` become `language-markup`
/// - any other `lang-` prefix becomes `language-`
///
/// A `<pre><code>` without a class is marked `language-markup`.
#[must_use]
pub fn normalize_code_classes(html: &str) -> String {
  static CLASS_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"class="([^"]*)""#).unwrap_or_else(|e| {
      log::error!("Failed to compile CLASS_RE regex: {e}");
      never_matching_regex()
    })
  });

  let classes = CLASS_RE.replace_all(html, |caps: &Captures| {
    let value = &caps[1];
    let mut changed = false;
    let tokens: Vec<Cow<'_, str>> = value
      .split_whitespace()
      .map(|token| {
        let normalized = normalize_class(token);
        if normalized != token {
          changed = true;
        }
        normalized
      })
      .collect();

    if changed {
      format!("class=\"{}\"", tokens.join(" "))
    } else {
      caps[0].to_string()
    }
  });

  classes.replace("<pre><code>", r#"<pre><code class="language-markup">"#)
}

fn normalize_class(token: &str) -> Cow<'_, str> {
  match token {
    "lang-html" | "language-html" => Cow::Borrowed("language-markup"),
    _ => {
      token.strip_prefix("lang-").map_or(Cow::Borrowed(token), |lang| {
        Cow::Owned(format!("language-{lang}"))
      })
    },
  }
}

//! Removal of the in-document table of contents.
use crate::error::{MarkupError, MarkupResult};

/// Remove the first `<tag>…</tag>` block, both tags included.
///
/// Returns `Ok(None)` when the opening tag does not occur; the caller decides
/// whether a missing block is an error.
///
/// # Errors
///
/// Returns [`MarkupError::UnclosedNavigation`] if the opening tag has no
/// closing tag after it.
pub fn remove_stale_nav(html: &str, tag: &str) -> MarkupResult<Option<String>> {
  let opening = format!("<{tag}>");
  let closing = format!("</{tag}>");

  let Some(start) = html.find(&opening) else {
    return Ok(None);
  };
  let end = html[start..]
    .find(&closing)
    .map(|offset| start + offset + closing.len())
    .ok_or_else(|| {
      MarkupError::UnclosedNavigation {
        tag: tag.to_string(),
      }
    })?;

  // Drop the newline the sectionizer put after the closing tag.
  let end = if html[end..].starts_with('\n') {
    end + 1
  } else {
    end
  };

  let mut stripped = String::with_capacity(html.len() - (end - start));
  stripped.push_str(&html[..start]);
  stripped.push_str(&html[end..]);
  Ok(Some(stripped))
}

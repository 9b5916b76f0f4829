//! Streaming tokenizer over id-bearing HTML elements.
//!
//! The tokenizer walks rendered HTML once and yields every heading (`h1` to
//! `h6`) and every other element carrying an `id` attribute, together with
//! its byte span. It understands just enough HTML for rendered documents:
//! comments, quoted attribute values, and raw-text `<script>`/`<style>`
//! bodies are skipped.
use std::ops::Range;

use crate::error::{MarkupError, MarkupResult};

/// Longest opening-tag excerpt quoted in error messages.
const FRAGMENT_LIMIT: usize = 80;

/// What kind of element a token describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementKind {
  /// A heading element with its level (1-6).
  Heading(u8),
  /// Any other element carrying an `id`.
  Anchor,
}

/// One id-bearing element or heading found in the HTML.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdElement<'a> {
  pub kind:  ElementKind,
  /// Lowercased tag name.
  pub tag:   String,
  /// Value of the `id` attribute, if present.
  pub id:    Option<&'a str>,
  /// Markup between the opening and closing tag. Only set for headings.
  pub inner: Option<&'a str>,
  /// Whole element for headings, opening tag for anchors.
  pub span:  Range<usize>,
}

impl IdElement<'_> {
  #[must_use]
  pub const fn level(&self) -> Option<u8> {
    match self.kind {
      ElementKind::Heading(level) => Some(level),
      ElementKind::Anchor => None,
    }
  }
}

/// Iterator over the id-bearing elements of an HTML string, in document
/// order. Stops after yielding the first error.
#[derive(Debug, Clone)]
pub struct HeadingTokenizer<'a> {
  html:  &'a str,
  lower: String,
  pos:   usize,
}

impl<'a> HeadingTokenizer<'a> {
  #[must_use]
  pub fn new(html: &'a str) -> Self {
    Self {
      html,
      // ASCII lowercasing keeps byte offsets identical to `html`.
      lower: html.to_ascii_lowercase(),
      pos: 0,
    }
  }

  fn fail(&mut self, error: MarkupError) -> Option<MarkupResult<IdElement<'a>>> {
    self.pos = self.html.len();
    Some(Err(error))
  }

  fn fragment(&self, range: Range<usize>) -> String {
    let text = &self.html[range];
    if text.len() <= FRAGMENT_LIMIT {
      return text.to_string();
    }
    let mut end = FRAGMENT_LIMIT;
    while !text.is_char_boundary(end) {
      end -= 1;
    }
    format!("{}…", &text[..end])
  }
}

impl<'a> Iterator for HeadingTokenizer<'a> {
  type Item = MarkupResult<IdElement<'a>>;

  fn next(&mut self) -> Option<Self::Item> {
    let bytes = self.html.as_bytes();

    loop {
      let lt = self.pos + self.html[self.pos..].find('<')?;

      if self.html[lt..].starts_with("<!--") {
        self.pos = self.html[lt + 4..]
          .find("-->")
          .map_or(self.html.len(), |end| lt + 4 + end + 3);
        continue;
      }

      let name_start = lt + 1;
      if !bytes.get(name_start).is_some_and(u8::is_ascii_alphabetic) {
        self.pos = name_start;
        continue;
      }

      let name_end = self.html[name_start..]
        .find(|c: char| !(c.is_ascii_alphanumeric() || c == '-'))
        .map_or(self.html.len(), |end| name_start + end);
      let tag = self.lower[name_start..name_end].to_string();
      let level = heading_level(&tag);

      let Some(open_end) = find_tag_end(self.html, name_end) else {
        if level.is_some() {
          let error = MarkupError::MalformedHeading {
            fragment: self.fragment(lt..self.html.len()),
            offset: lt,
            tag,
          };
          return self.fail(error);
        }
        self.pos = self.html.len();
        return None;
      };

      let id = find_attribute(&self.html[name_end..open_end - 1], "id");

      if tag == "script" || tag == "style" {
        let closing = format!("</{tag}");
        self.pos = self.lower[open_end..]
          .find(&closing)
          .map_or(self.html.len(), |end| open_end + end);
        if id.is_none() {
          continue;
        }
      } else {
        self.pos = open_end;
      }

      if let Some(level) = level {
        let closing = format!("</{tag}>");
        let Some(close_start) = self.lower[open_end..]
          .find(&closing)
          .map(|end| open_end + end)
        else {
          let error = MarkupError::MalformedHeading {
            fragment: self.fragment(lt..open_end),
            offset: lt,
            tag,
          };
          return self.fail(error);
        };
        let close_end = close_start + closing.len();
        self.pos = close_end;

        return Some(Ok(IdElement {
          kind: ElementKind::Heading(level),
          tag,
          id,
          inner: Some(&self.html[open_end..close_start]),
          span: lt..close_end,
        }));
      }

      if id.is_some() {
        return Some(Ok(IdElement {
          kind: ElementKind::Anchor,
          tag,
          id,
          inner: None,
          span: lt..open_end,
        }));
      }
    }
  }
}

/// Human-readable excerpt of an element's opening tag, for error messages.
#[must_use]
pub fn opening_tag<'a>(html: &'a str, element: &IdElement<'_>) -> &'a str {
  let start = element.span.start;
  find_tag_end(html, start + 1).map_or(&html[element.span.clone()], |end| {
    &html[start..end]
  })
}

fn heading_level(tag: &str) -> Option<u8> {
  match tag {
    "h1" => Some(1),
    "h2" => Some(2),
    "h3" => Some(3),
    "h4" => Some(4),
    "h5" => Some(5),
    "h6" => Some(6),
    _ => None,
  }
}

/// Byte offset just past the `>` closing an opening tag, honoring quoted
/// attribute values.
fn find_tag_end(html: &str, from: usize) -> Option<usize> {
  let mut quote: Option<u8> = None;
  for (offset, &byte) in html.as_bytes()[from..].iter().enumerate() {
    match (quote, byte) {
      (Some(q), b) if b == q => quote = None,
      (Some(_), _) => {},
      (None, b'"' | b'\'') => quote = Some(byte),
      (None, b'>') => return Some(from + offset + 1),
      (None, _) => {},
    }
  }
  None
}

/// Value of attribute `name` in the attribute list of an opening tag.
fn find_attribute<'a>(attrs: &'a str, name: &str) -> Option<&'a str> {
  let bytes = attrs.as_bytes();
  let mut i = 0;

  while i < bytes.len() {
    while i < bytes.len() && (bytes[i].is_ascii_whitespace() || bytes[i] == b'/')
    {
      i += 1;
    }
    let name_start = i;
    while i < bytes.len()
      && !bytes[i].is_ascii_whitespace()
      && !matches!(bytes[i], b'=' | b'>' | b'/')
    {
      i += 1;
    }
    let attr_name = &attrs[name_start..i];
    if attr_name.is_empty() {
      i += 1;
      continue;
    }

    while i < bytes.len() && bytes[i].is_ascii_whitespace() {
      i += 1;
    }
    let mut value = "";
    if i < bytes.len() && bytes[i] == b'=' {
      i += 1;
      while i < bytes.len() && bytes[i].is_ascii_whitespace() {
        i += 1;
      }
      if i < bytes.len() && matches!(bytes[i], b'"' | b'\'') {
        let quote = bytes[i];
        let value_start = i + 1;
        let value_end = attrs[value_start..]
          .bytes()
          .position(|b| b == quote)
          .map_or(attrs.len(), |end| value_start + end);
        value = &attrs[value_start..value_end];
        i = value_end + 1;
      } else {
        let value_start = i;
        while i < bytes.len() && !bytes[i].is_ascii_whitespace() {
          i += 1;
        }
        value = &attrs[value_start..i];
      }
    }

    if attr_name.eq_ignore_ascii_case(name) {
      return Some(value);
    }
  }

  None
}

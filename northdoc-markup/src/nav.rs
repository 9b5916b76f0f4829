//! Navigation markup generated from a [`NavTree`].
use indexmap::IndexMap;

use crate::types::{NavEntry, NavTree};

/// Deepest navigation level rendered.
const MAX_DEPTH: usize = 3;

/// `<li>` class per depth, outermost first.
const ITEM_CLASSES: [&str; MAX_DEPTH] =
  ["nav--primary-item", "nav--secondary-item", "nav--tertiary-item"];

/// Render the navigation tree as a nested list inside `<nav>`.
///
/// Articles become primary items, their sections secondary items, and
/// sub-sections tertiary items. Levels with no entries emit no nested list.
/// The `<nav>` element takes the table-of-contents heading's id when the tree
/// has a root.
#[must_use]
pub fn synthesize_nav(tree: &NavTree) -> String {
  let mut html = match &tree.root {
    Some(root) => format!("<nav id=\"{}\" class=\"nav\">\n<ol>", root.id),
    None => "<nav class=\"nav\">\n<ol>".to_string(),
  };

  write_items(&mut html, &tree.items, 0);
  html.push_str("</ol></nav>");
  html
}

fn write_items(html: &mut String, entries: &IndexMap<String, NavEntry>, depth: usize) {
  for (id, entry) in entries {
    html.push_str(&format!(
      "<li class=\"{}\"><a href=\"#{id}\" class=\"nav--link\">{}</a>",
      ITEM_CLASSES[depth], entry.name
    ));

    if depth + 1 < MAX_DEPTH && !entry.sections.is_empty() {
      html.push_str("<ul class=\"nav--sub-sections\">");
      write_items(html, &entry.sections, depth + 1);
      html.push_str("</ul>");
    }

    html.push_str("</li>");
  }
}

//! # northdoc-markup
//!
//! Turns one markdown document into the two HTML fragments a northdoc page is
//! made of: the content, split into `<article>` and `<section>` blocks, and a
//! generated navigation list.
//!
//! ## Quick Start
//!
//! ```rust
//! use northdoc_markup::{ComrakRenderer, PageOptions, build_page};
//!
//! let markdown = "# Contents\n\n- [Install](#instal)\n\n# Getting Started\n\n## Install\n";
//! let page = build_page(&ComrakRenderer::default(), markdown, &PageOptions::new("Contents"))
//!   .expect("valid document");
//!
//! assert!(page.content.contains("<section id=\"install\""));
//! assert!(page.nav_html.contains("href=\"#getting-started\""));
//! ```
//!
//! ## Passes
//!
//! - **Rendering** behind the [`MarkdownRenderer`] trait, [`ComrakRenderer`]
//!   by default
//! - **Code classes** normalized to `language-*`
//! - **Sectionizing** into articles and sections, recording a [`NavTree`] and
//!   an [`IdRegistry`]
//! - **Navigation** markup synthesized from the tree
//! - **Stale navigation** (the in-document table of contents) removed
//! - **Link repair** of near-miss `#anchor` targets
//!
//! No pass touches the filesystem.

pub mod codeclass;
mod error;
pub mod heading;
pub mod links;
pub mod nav;
mod pipeline;
pub mod render;
pub mod sectionize;
pub mod strip;
mod types;
pub mod utils;

pub use crate::{
  codeclass::normalize_code_classes,
  error::{MarkupError, MarkupResult},
  links::repair_links,
  nav::synthesize_nav,
  pipeline::{PageOptions, assemble_page, build_page},
  render::{ComrakRenderer, MarkdownRenderer, RenderOptions},
  sectionize::{SectionizeOptions, sectionize},
  strip::remove_stale_nav,
  types::{
    IdRegistry,
    LinkCorrection,
    NAV_CONTAINER_TAG,
    NavEntry,
    NavRoot,
    NavTree,
    PageResult,
    Sectionized,
  },
};

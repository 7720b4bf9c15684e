//! Markdown to HTML compiler for quire.
//!
//! Compilation runs in two stages:
//! - [`segment`] cuts a document into classified [`Block`]s on blank lines
//! - [`tokenize`] splits each block's inline text into typed [`Span`]s
//!
//! Spans lower to [`HtmlNode`] leaves, and every block becomes a child of a
//! single `div` root. Output is not HTML-escaped: text is emitted exactly as
//! written in the source.
//!
//! # Example
//!
//! ```
//! use quire_renderer::markdown_to_html;
//!
//! let html = markdown_to_html("This is **bold** text").unwrap();
//! assert_eq!(html, "<div><p>This is <b>bold</b> text</p></div>");
//! ```

mod block;
mod document;
mod error;
mod inline;
mod node;

pub use block::{Block, BlockKind, CodeContent, classify, segment, split_blocks};
pub use document::{
    RenderResult, extract_title, markdown_to_html, markdown_to_html_node, render_page,
};
pub use error::MarkdownError;
pub use inline::{Span, text_to_nodes, tokenize};
pub use node::{Attributes, HtmlNode, LeafNode, ParentNode, RenderError};

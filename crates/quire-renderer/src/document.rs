//! Document compiler.
//!
//! Assembles one `div` node per document from its classified blocks and
//! extracts the page title.

use crate::block::{Block, BlockKind, segment};
use crate::error::MarkdownError;
use crate::inline::text_to_nodes;
use crate::node::{Attributes, HtmlNode};

/// Result of rendering a markdown page.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderResult {
    /// Serialized `div` containing every block.
    pub html: String,
    /// Text of the first `# ` heading line.
    pub title: String,
}

/// Compile a document into a root `div` node.
///
/// Blocks become children of the root in document order. An empty document
/// yields a `div` without children.
pub fn markdown_to_html_node(markdown: &str) -> Result<HtmlNode, MarkdownError> {
    let children = segment(markdown)
        .iter()
        .map(block_to_html_node)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(HtmlNode::parent("div", children))
}

/// Compile and serialize a document.
pub fn markdown_to_html(markdown: &str) -> Result<String, MarkdownError> {
    Ok(markdown_to_html_node(markdown)?.render()?)
}

/// Compile a document and extract its title.
pub fn render_page(markdown: &str) -> Result<RenderResult, MarkdownError> {
    let html = markdown_to_html(markdown)?;
    let title = extract_title(markdown)?;
    Ok(RenderResult { html, title })
}

/// Title from the first line (ignoring leading whitespace) starting with `# `.
pub fn extract_title(markdown: &str) -> Result<String, MarkdownError> {
    markdown
        .lines()
        .find_map(|line| line.trim_start().strip_prefix("# "))
        .map(|title| title.trim().to_owned())
        .ok_or(MarkdownError::MissingTitle)
}

fn block_to_html_node(block: &Block) -> Result<HtmlNode, MarkdownError> {
    let tag = block.kind().tag()?;
    let node = match block.kind() {
        BlockKind::Code => {
            let code = block.code();
            let mut attributes = Attributes::new();
            if let Some(language) = code.language {
                attributes.insert("class", format!("language-{language}"));
            }
            HtmlNode::parent(tag, vec![HtmlNode::leaf_with("code", code.text, attributes)])
        }
        BlockKind::UnorderedList | BlockKind::OrderedList => {
            let items = block
                .list_items()
                .into_iter()
                .map(|item| -> Result<HtmlNode, MarkdownError> {
                    Ok(HtmlNode::parent("li", text_to_nodes(item)?))
                })
                .collect::<Result<Vec<_>, _>>()?;
            HtmlNode::parent(tag, items)
        }
        BlockKind::Paragraph | BlockKind::Heading { .. } | BlockKind::Quote => {
            HtmlNode::parent(tag, text_to_nodes(&block.inline_text())?)
        }
    };
    Ok(node)
}

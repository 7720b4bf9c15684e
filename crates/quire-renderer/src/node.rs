//! HTML node tree.
//!
//! A document compiles to a tree of [`HtmlNode`]s: leaves carry text, parents
//! own their children. Rendering concatenates the serialized nodes exactly;
//! no escaping and no whitespace is inserted between siblings.

use std::fmt::Write;

/// Error returned when a node cannot be serialized.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum RenderError {
    /// Parent node constructed with an empty tag.
    #[error("All parent nodes must have a tag")]
    MissingTag,
    /// Tag name contains characters other than ASCII letters and digits.
    #[error("Invalid tag name `{0}`")]
    InvalidTag(String),
}

/// Ordered attribute list.
///
/// Insertion order is preserved so that rendering is deterministic.
/// Inserting an existing name replaces its value in place.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Attributes(Vec<(String, String)>);

impl Attributes {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set an attribute, keeping the original position if it already exists.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.0.iter_mut().find(|(n, _)| *n == name) {
            Some(entry) => entry.1 = value,
            None => self.0.push((name, value)),
        }
    }

    /// Builder form of [`insert`](Self::insert).
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(name, value);
        self
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Render as ` name="value"` pairs.
    fn render_into(&self, out: &mut String) {
        for (name, value) in &self.0 {
            let _ = write!(out, " {name}=\"{value}\"");
        }
    }
}

/// Node without children.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LeafNode {
    /// Wrapping element; `None` renders the value as raw text.
    pub tag: Option<String>,
    pub value: String,
    pub attributes: Attributes,
}

/// Node that owns an ordered list of children.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParentNode {
    pub tag: String,
    pub children: Vec<HtmlNode>,
    pub attributes: Attributes,
}

/// A renderable HTML node.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum HtmlNode {
    Leaf(LeafNode),
    Parent(ParentNode),
}

impl HtmlNode {
    /// Raw text node, rendered verbatim.
    pub fn text(value: impl Into<String>) -> Self {
        Self::Leaf(LeafNode {
            tag: None,
            value: value.into(),
            attributes: Attributes::new(),
        })
    }

    /// Leaf wrapped in `tag`.
    pub fn leaf(tag: impl Into<String>, value: impl Into<String>) -> Self {
        Self::leaf_with(tag, value, Attributes::new())
    }

    pub fn leaf_with(
        tag: impl Into<String>,
        value: impl Into<String>,
        attributes: Attributes,
    ) -> Self {
        Self::Leaf(LeafNode {
            tag: Some(tag.into()),
            value: value.into(),
            attributes,
        })
    }

    pub fn parent(tag: impl Into<String>, children: Vec<HtmlNode>) -> Self {
        Self::Parent(ParentNode {
            tag: tag.into(),
            children,
            attributes: Attributes::new(),
        })
    }

    pub fn tag(&self) -> Option<&str> {
        match self {
            Self::Leaf(leaf) => leaf.tag.as_deref(),
            Self::Parent(parent) => Some(&parent.tag),
        }
    }

    /// Children of a parent node; empty for leaves.
    pub fn children(&self) -> &[HtmlNode] {
        match self {
            Self::Leaf(_) => &[],
            Self::Parent(parent) => &parent.children,
        }
    }

    /// Serialize the subtree to an HTML string.
    pub fn render(&self) -> Result<String, RenderError> {
        let mut out = String::with_capacity(256);
        self.render_into(&mut out)?;
        Ok(out)
    }

    fn render_into(&self, out: &mut String) -> Result<(), RenderError> {
        match self {
            Self::Leaf(leaf) => {
                let Some(tag) = leaf.tag.as_deref() else {
                    out.push_str(&leaf.value);
                    return Ok(());
                };
                check_tag(tag)?;
                open_tag(tag, &leaf.attributes, out);
                out.push_str(&leaf.value);
                close_tag(tag, out);
            }
            Self::Parent(parent) => {
                if parent.tag.is_empty() {
                    return Err(RenderError::MissingTag);
                }
                check_tag(&parent.tag)?;
                open_tag(&parent.tag, &parent.attributes, out);
                for child in &parent.children {
                    child.render_into(out)?;
                }
                close_tag(&parent.tag, out);
            }
        }
        Ok(())
    }
}

fn check_tag(tag: &str) -> Result<(), RenderError> {
    if tag.is_empty() || !tag.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(RenderError::InvalidTag(tag.to_owned()));
    }
    Ok(())
}

fn open_tag(tag: &str, attributes: &Attributes, out: &mut String) {
    out.push('<');
    out.push_str(tag);
    attributes.render_into(out);
    out.push('>');
}

fn close_tag(tag: &str, out: &mut String) {
    out.push_str("</");
    out.push_str(tag);
    out.push('>');
}

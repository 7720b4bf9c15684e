//! Block segmentation and classification.
//!
//! A document is cut into blocks on runs of blank lines. Each block is
//! classified by looking at its first and last lines (or at every line, for
//! lists) and carries the kind-specific cleanup that precedes inline
//! tokenizing.

use std::borrow::Cow;

use crate::error::MarkdownError;

/// Code fence marker.
const FENCE: &str = "```";

/// Kind of a top-level block.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BlockKind {
    Paragraph,
    /// Level is the length of the leading `#` run; it is not capped here.
    Heading { level: usize },
    Code,
    Quote,
    UnorderedList,
    OrderedList,
}

impl BlockKind {
    /// Element wrapping the block.
    pub fn tag(self) -> Result<Cow<'static, str>, MarkdownError> {
        let tag = match self {
            Self::Paragraph => "p",
            Self::Heading { level } => {
                return match level {
                    1..=6 => Ok(Cow::Owned(format!("h{level}"))),
                    _ => Err(MarkdownError::InvalidHeadingLevel(level)),
                };
            }
            Self::Code => "pre",
            Self::Quote => "blockquote",
            Self::UnorderedList => "ul",
            Self::OrderedList => "ol",
        };
        Ok(Cow::Borrowed(tag))
    }
}

/// A classified block of markdown source.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Block {
    text: String,
    kind: BlockKind,
}

/// Contents of a fenced code block.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CodeContent {
    /// Info string following the opening fence, if any.
    pub language: Option<String>,
    /// Code with exactly one trailing newline.
    pub text: String,
}

impl Block {
    /// Classify a trimmed block.
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let kind = classify(&text);
        Self { text, kind }
    }

    /// Original (trimmed) source of the block.
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn kind(&self) -> BlockKind {
        self.kind
    }

    /// Text handed to the inline tokenizer, with block syntax removed.
    ///
    /// Headings lose their `#` run, quotes lose the `>` of every line and are
    /// joined with spaces, paragraphs have newlines collapsed to spaces.
    /// Code and lists are returned unchanged; see [`code`](Self::code) and
    /// [`list_items`](Self::list_items).
    pub fn inline_text(&self) -> Cow<'_, str> {
        match self.kind {
            BlockKind::Heading { .. } => Cow::Borrowed(self.text.trim_start_matches('#').trim()),
            BlockKind::Quote => Cow::Owned(
                self.text
                    .lines()
                    .map(|line| line.trim_start().trim_start_matches('>').trim())
                    .filter(|line| !line.is_empty())
                    .collect::<Vec<_>>()
                    .join(" "),
            ),
            BlockKind::Paragraph => Cow::Owned(self.text.replace('\n', " ")),
            BlockKind::Code | BlockKind::UnorderedList | BlockKind::OrderedList => {
                Cow::Borrowed(&self.text)
            }
        }
    }

    /// Code between the fences.
    pub fn code(&self) -> CodeContent {
        let body = self.text.trim();
        let body = body.strip_prefix(FENCE).unwrap_or(body);
        let body = body.strip_suffix(FENCE).unwrap_or(body);

        let (language, body) = match body.split_once('\n') {
            Some((info, rest)) if is_info_string(info) => (Some(info.to_owned()), rest),
            _ => (None, body),
        };

        let mut text = body.trim().to_owned();
        text.push('\n');
        CodeContent { language, text }
    }

    /// List item texts with their markers removed.
    pub fn list_items(&self) -> Vec<&str> {
        self.text.lines().map(strip_list_marker).collect()
    }
}

/// Split a document into trimmed, non-empty blocks separated by blank lines.
pub fn split_blocks(markdown: &str) -> Vec<String> {
    let mut blocks = Vec::new();
    let mut current: Vec<&str> = Vec::new();

    for line in markdown.lines() {
        if line.trim().is_empty() {
            push_block(&mut blocks, &mut current);
        } else {
            current.push(line);
        }
    }
    push_block(&mut blocks, &mut current);

    blocks
}

fn push_block(blocks: &mut Vec<String>, lines: &mut Vec<&str>) {
    if lines.is_empty() {
        return;
    }
    let block = lines.join("\n");
    lines.clear();
    let block = block.trim();
    if !block.is_empty() {
        blocks.push(block.to_owned());
    }
}

/// Split and classify a document.
pub fn segment(markdown: &str) -> Vec<Block> {
    split_blocks(markdown).into_iter().map(Block::new).collect()
}

/// Classify a block; the first matching rule wins, paragraphs are the default.
pub fn classify(block: &str) -> BlockKind {
    let lines: Vec<&str> = block.lines().collect();
    let (Some(first), Some(last)) = (lines.first(), lines.last()) else {
        return BlockKind::Paragraph;
    };

    if first.starts_with(FENCE) && last.starts_with(FENCE) {
        return BlockKind::Code;
    }
    if first.starts_with('#') {
        let level = first.chars().take_while(|&c| c == '#').count();
        return BlockKind::Heading { level };
    }
    if first.starts_with('>') {
        return BlockKind::Quote;
    }
    if lines.iter().all(|line| line.starts_with("- ")) {
        return BlockKind::UnorderedList;
    }
    if lines
        .iter()
        .enumerate()
        .all(|(i, line)| line.starts_with(&format!("{}. ", i + 1)))
    {
        return BlockKind::OrderedList;
    }
    BlockKind::Paragraph
}

/// A fence info string is a single language token such as `rust` or `c++`.
///
/// Anything else on the opening fence line is code.
fn is_info_string(line: &str) -> bool {
    !line.is_empty()
        && line
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '+' | '-'))
}

/// Remove a leading `- `, `* ` or `N.` list marker.
fn strip_list_marker(line: &str) -> &str {
    let line = line.trim_start();
    if let Some(rest) = line.strip_prefix("- ").or_else(|| line.strip_prefix("* ")) {
        return rest.trim();
    }
    let digits = line.len() - line.trim_start_matches(|c: char| c.is_ascii_digit()).len();
    if digits > 0
        && let Some(rest) = line[digits..].strip_prefix('.')
    {
        return rest.trim();
    }
    line.trim()
}

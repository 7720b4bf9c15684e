//! Markdown compilation errors.

use crate::node::RenderError;

/// Error returned when a markdown document cannot be compiled.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum MarkdownError {
    /// A `**`, `_` or `` ` `` span was opened but never closed.
    #[error("Invalid markdown syntax: missing closing `{delimiter}` in \"{text}\"")]
    MalformedInlineSyntax {
        delimiter: &'static str,
        /// The plain text run containing the unmatched delimiter.
        text: String,
    },
    /// Heading marker run longer than `h6`.
    #[error("Invalid heading level {0}: at most 6 `#` characters are allowed")]
    InvalidHeadingLevel(usize),
    /// No line of the document starts with `# `.
    #[error("No h1 title found in markdown")]
    MissingTitle,
    #[error(transparent)]
    Render(#[from] RenderError),
}

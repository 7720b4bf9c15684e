//! Inline tokenizer.
//!
//! Turns a run of inline markdown into an ordered list of [`Span`]s. Passes
//! run in a fixed order: images, links, then `**`, `_` and `` ` `` delimiters.
//! Every pass only rewrites [`Span::Plain`] spans, so text that became a link
//! or an image is never scanned for delimiters.

use crate::error::MarkdownError;
use crate::node::{Attributes, HtmlNode};

/// A typed fragment of inline text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Span {
    Plain(String),
    Bold(String),
    Italic(String),
    Code(String),
    Link { text: String, url: String },
    Image { alt: String, url: String },
}

impl Span {
    /// Display text (alt text for images).
    pub fn text(&self) -> &str {
        match self {
            Self::Plain(text) | Self::Bold(text) | Self::Italic(text) | Self::Code(text) => text,
            Self::Link { text, .. } => text,
            Self::Image { alt, .. } => alt,
        }
    }

    /// Target of a link or image.
    pub fn url(&self) -> Option<&str> {
        match self {
            Self::Link { url, .. } | Self::Image { url, .. } => Some(url),
            _ => None,
        }
    }
}

impl From<Span> for HtmlNode {
    fn from(span: Span) -> Self {
        match span {
            Span::Plain(text) => HtmlNode::text(text),
            Span::Bold(text) => HtmlNode::leaf("b", text),
            Span::Italic(text) => HtmlNode::leaf("i", text),
            Span::Code(text) => HtmlNode::leaf("code", text),
            Span::Link { text, url } => {
                HtmlNode::leaf_with("a", text, Attributes::new().with("href", url))
            }
            Span::Image { alt, url } => HtmlNode::leaf_with(
                "img",
                "",
                Attributes::new().with("src", url).with("alt", alt),
            ),
        }
    }
}

/// Split inline markdown into spans, left to right.
pub fn tokenize(text: &str) -> Result<Vec<Span>, MarkdownError> {
    let spans = vec![Span::Plain(text.to_owned())];
    let spans = extract(spans, find_image);
    let spans = extract(spans, find_link);
    let spans = split_delimiter(spans, "**", Span::Bold)?;
    let spans = split_delimiter(spans, "_", Span::Italic)?;
    split_delimiter(spans, "`", Span::Code)
}

/// Tokenize and lower every span to an HTML node.
pub fn text_to_nodes(text: &str) -> Result<Vec<HtmlNode>, MarkdownError> {
    Ok(tokenize(text)?.into_iter().map(HtmlNode::from).collect())
}

/// A reference found in plain text, as byte offsets into that text.
struct Found {
    start: usize,
    end: usize,
    span: Span,
}

/// Replace every match of `find` inside plain spans, keeping surrounding text.
fn extract(spans: Vec<Span>, find: fn(&str) -> Option<Found>) -> Vec<Span> {
    let mut out = Vec::with_capacity(spans.len());
    for span in spans {
        let Span::Plain(text) = span else {
            out.push(span);
            continue;
        };
        let mut rest = text.as_str();
        while let Some(found) = find(rest) {
            if found.start > 0 {
                out.push(Span::Plain(rest[..found.start].to_owned()));
            }
            out.push(found.span);
            rest = &rest[found.end..];
        }
        if !rest.is_empty() {
            out.push(Span::Plain(rest.to_owned()));
        }
    }
    out
}

/// Find the first `![alt](url)`; alt and url are both non-empty.
///
/// Alt text is any run of characters other than `]`, the url any run of
/// characters other than `)`.
fn find_image(text: &str) -> Option<Found> {
    let mut from = 0;
    while let Some(offset) = text[from..].find("![") {
        let start = from + offset;
        if let Some((alt, url, len)) =
            parse_reference(&text[start + 1..], |c| c != ']', |c| c != ')')
            && !alt.is_empty()
            && !url.is_empty()
        {
            return Some(Found {
                start,
                end: start + 1 + len,
                span: Span::Image {
                    alt: alt.to_owned(),
                    url: url.to_owned(),
                },
            });
        }
        from = start + 1;
    }
    None
}

/// Find the first `[text](url)` not preceded by `!`.
///
/// Link text excludes `[` and `]`, the url excludes `(` and `)`. The text may
/// be empty; a link with an empty url stays plain text.
fn find_link(text: &str) -> Option<Found> {
    let mut from = 0;
    while let Some(offset) = text[from..].find('[') {
        let start = from + offset;
        from = start + 1;
        if text[..start].ends_with('!') {
            continue;
        }
        if let Some((label, url, len)) = parse_reference(
            &text[start..],
            |c| c != '[' && c != ']',
            |c| c != '(' && c != ')',
        ) && !url.is_empty()
        {
            return Some(Found {
                start,
                end: start + len,
                span: Span::Link {
                    text: label.to_owned(),
                    url: url.to_owned(),
                },
            });
        }
    }
    None
}

/// Parse `[label](target)` at the start of `input`.
///
/// Returns the label, the target and the number of bytes consumed.
fn parse_reference(
    input: &str,
    label_char: fn(char) -> bool,
    target_char: fn(char) -> bool,
) -> Option<(&str, &str, usize)> {
    let body = input.strip_prefix('[')?;
    let label_len = body.find(|c: char| !label_char(c))?;
    let label = &body[..label_len];
    let target_start = body[label_len..].strip_prefix("](")?;
    let target_len = target_start.find(|c: char| !target_char(c))?;
    let target = &target_start[..target_len];
    target_start[target_len..].strip_prefix(')')?;
    Some((label, target, 1 + label_len + 2 + target_len + 1))
}

/// Split plain spans on `delimiter`; odd-numbered parts become `styled`.
///
/// Empty parts are dropped. An odd number of delimiters means one was left
/// open, which is an error.
fn split_delimiter(
    spans: Vec<Span>,
    delimiter: &'static str,
    styled: fn(String) -> Span,
) -> Result<Vec<Span>, MarkdownError> {
    let mut out = Vec::with_capacity(spans.len());
    for span in spans {
        let Span::Plain(text) = span else {
            out.push(span);
            continue;
        };
        if text.split(delimiter).count() % 2 == 0 {
            return Err(MarkdownError::MalformedInlineSyntax { delimiter, text });
        }
        for (i, part) in text.split(delimiter).enumerate() {
            if part.is_empty() {
                continue;
            }
            if i % 2 == 0 {
                out.push(Span::Plain(part.to_owned()));
            } else {
                out.push(styled(part.to_owned()));
            }
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn plain(text: &str) -> Span {
        Span::Plain(text.to_owned())
    }

    fn render(spans: Vec<Span>) -> String {
        spans
            .into_iter()
            .map(|s| HtmlNode::from(s).render().unwrap())
            .collect()
    }

    #[test]
    fn test_plain_text() {
        assert_eq!(tokenize("just text").unwrap(), vec![plain("just text")]);
    }

    #[test]
    fn test_empty_text_has_no_spans() {
        assert!(tokenize("").unwrap().is_empty());
    }

    #[test]
    fn test_bold() {
        assert_eq!(
            tokenize("This is **bold** text").unwrap(),
            vec![
                plain("This is "),
                Span::Bold("bold".to_owned()),
                plain(" text"),
            ]
        );
    }

    #[test]
    fn test_italic() {
        assert_eq!(
            tokenize("This is _italic_ text").unwrap(),
            vec![
                plain("This is "),
                Span::Italic("italic".to_owned()),
                plain(" text"),
            ]
        );
    }

    #[test]
    fn test_code_multiple_occurrences() {
        assert_eq!(
            tokenize("a `b` c `d` e").unwrap(),
            vec![
                plain("a "),
                Span::Code("b".to_owned()),
                plain(" c "),
                Span::Code("d".to_owned()),
                plain(" e"),
            ]
        );
    }

    #[test]
    fn test_delimiter_at_start_and_end() {
        assert_eq!(
            tokenize("`code`").unwrap(),
            vec![Span::Code("code".to_owned())]
        );
    }

    #[test]
    fn test_adjacent_delimiters_are_dropped() {
        assert_eq!(tokenize("a `` b").unwrap(), vec![plain("a "), plain(" b")]);
    }

    #[test]
    fn test_unterminated_code_fails() {
        let err = tokenize("This is text with a `broken").unwrap_err();
        assert_eq!(
            err,
            MarkdownError::MalformedInlineSyntax {
                delimiter: "`",
                text: "This is text with a `broken".to_owned(),
            }
        );
    }

    #[test]
    fn test_unterminated_bold_fails() {
        assert!(matches!(
            tokenize("**open"),
            Err(MarkdownError::MalformedInlineSyntax { delimiter: "**", .. })
        ));
    }

    #[test]
    fn test_styles_in_one_line() {
        assert_eq!(
            tokenize("**b** and _i_ and `c`").unwrap(),
            vec![
                Span::Bold("b".to_owned()),
                plain(" and "),
                Span::Italic("i".to_owned()),
                plain(" and "),
                Span::Code("c".to_owned()),
            ]
        );
    }

    #[test]
    fn test_image() {
        assert_eq!(
            tokenize("This is text with an ![image](https://i.imgur.com/zjjcJKZ.png)").unwrap(),
            vec![
                plain("This is text with an "),
                Span::Image {
                    alt: "image".to_owned(),
                    url: "https://i.imgur.com/zjjcJKZ.png".to_owned(),
                },
            ]
        );
    }

    #[test]
    fn test_image_with_empty_alt_is_plain() {
        assert_eq!(tokenize("![](x.png)").unwrap(), vec![plain("![](x.png)")]);
    }

    #[test]
    fn test_links() {
        assert_eq!(
            tokenize(
                "This is text with a link [to boot dev](https://www.boot.dev) and [to youtube](https://www.youtube.com/@bootdotdev)"
            )
            .unwrap(),
            vec![
                plain("This is text with a link "),
                Span::Link {
                    text: "to boot dev".to_owned(),
                    url: "https://www.boot.dev".to_owned(),
                },
                plain(" and "),
                Span::Link {
                    text: "to youtube".to_owned(),
                    url: "https://www.youtube.com/@bootdotdev".to_owned(),
                },
            ]
        );
    }

    #[test]
    fn test_image_and_link_together() {
        let spans = tokenize(
            "a ![rick roll](https://i.imgur.com/aKaOqIh.gif) and [to boot dev](https://www.boot.dev)",
        )
        .unwrap();
        assert_eq!(
            spans,
            vec![
                plain("a "),
                Span::Image {
                    alt: "rick roll".to_owned(),
                    url: "https://i.imgur.com/aKaOqIh.gif".to_owned(),
                },
                plain(" and "),
                Span::Link {
                    text: "to boot dev".to_owned(),
                    url: "https://www.boot.dev".to_owned(),
                },
            ]
        );
    }

    #[test]
    fn test_link_with_empty_text() {
        assert_eq!(
            tokenize("[](/home)").unwrap(),
            vec![Span::Link {
                text: String::new(),
                url: "/home".to_owned(),
            }]
        );
    }

    #[test]
    fn test_link_with_empty_url_is_plain() {
        assert_eq!(tokenize("[text]()").unwrap(), vec![plain("[text]()")]);
    }

    #[test]
    fn test_link_text_cannot_contain_bracket() {
        assert_eq!(
            tokenize("[a [b](c)").unwrap(),
            vec![
                plain("[a "),
                Span::Link {
                    text: "b".to_owned(),
                    url: "c".to_owned(),
                },
            ]
        );
    }

    #[test]
    fn test_link_text_is_not_styled() {
        assert_eq!(
            tokenize("[**x**](/y) **z**").unwrap(),
            vec![
                Span::Link {
                    text: "**x**".to_owned(),
                    url: "/y".to_owned(),
                },
                plain(" "),
                Span::Bold("z".to_owned()),
            ]
        );
    }

    #[test]
    fn test_url_underscore_is_not_italic() {
        let spans = tokenize("see [docs](/my_page) now").unwrap();
        assert_eq!(spans[1].url(), Some("/my_page"));
        assert_eq!(spans.len(), 3);
    }

    #[test]
    fn test_span_accessors() {
        let link = Span::Link {
            text: "t".to_owned(),
            url: "u".to_owned(),
        };
        assert_eq!(link.text(), "t");
        assert_eq!(link.url(), Some("u"));
        assert_eq!(Span::Bold("b".to_owned()).url(), None);
    }

    #[test]
    fn test_lowering() {
        let html = render(tokenize("x **b** _i_ `c` [l](/u) ![a](/p.png)").unwrap());
        assert_eq!(
            html,
            r#"x <b>b</b> <i>i</i> <code>c</code> <a href="/u">l</a> <img src="/p.png" alt="a"></img>"#
        );
    }

    #[test]
    fn test_visible_text_survives_tokenizing() {
        let spans = tokenize("This is **bold**, _italic_ and `code`.").unwrap();
        let visible: String = spans.iter().map(Span::text).collect();
        assert_eq!(visible, "This is bold, italic and code.");
    }

    #[test]
    fn test_span_count_for_matched_pairs() {
        // Two pairs: 1 + 2 * 2 parts, none empty.
        let spans = tokenize("a **b** c **d** e").unwrap();
        assert_eq!(spans.len(), 5);
    }

    #[test]
    fn test_plain_output_is_stable() {
        let spans = tokenize("nothing special here").unwrap();
        let again = tokenize(&render(spans.clone())).unwrap();
        assert_eq!(spans, again);
    }
}

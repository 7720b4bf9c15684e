//! HTML page template and link rewriting.

use std::path::Path;

use crate::error::SiteError;

/// Replaced with the page title.
pub const TITLE_PLACEHOLDER: &str = "{{ Title }}";
/// Replaced with the rendered page body.
pub const CONTENT_PLACEHOLDER: &str = "{{ Content }}";

/// Page template with literal `{{ Title }}` and `{{ Content }}` placeholders.
#[derive(Clone, Debug)]
pub struct Template {
    source: String,
}

impl Template {
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
        }
    }

    /// Read a template file.
    pub fn load(path: &Path) -> Result<Self, SiteError> {
        if !path.is_file() {
            return Err(SiteError::MissingSource(path.to_path_buf()));
        }
        let source = std::fs::read_to_string(path).map_err(|e| SiteError::io(path, e))?;
        Ok(Self::new(source))
    }

    /// Substitute every placeholder occurrence.
    pub fn render(&self, title: &str, content: &str) -> String {
        self.source
            .replace(TITLE_PLACEHOLDER, title)
            .replace(CONTENT_PLACEHOLDER, content)
    }
}

/// Prefix root-relative `href` and `src` attributes with `base_path`.
///
/// `base_path` replaces the leading `/` and so should end with one.
pub fn rewrite_root_links(html: &str, base_path: &str) -> String {
    html.replace("href=\"/", &format!("href=\"{base_path}"))
        .replace("src=\"/", &format!("src=\"{base_path}"))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_render_replaces_placeholders() {
        let template = Template::new(
            "<html><head><title>{{ Title }}</title></head><body>{{ Content }}</body></html>",
        );
        assert_eq!(
            template.render("Home", "<div><p>Hi</p></div>"),
            "<html><head><title>Home</title></head><body><div><p>Hi</p></div></body></html>"
        );
    }

    #[test]
    fn test_render_replaces_every_occurrence() {
        let template = Template::new("{{ Title }} | {{ Title }}");
        assert_eq!(template.render("A", ""), "A | A");
    }

    #[test]
    fn test_render_without_placeholders() {
        let template = Template::new("<p>static</p>");
        assert_eq!(template.render("A", "B"), "<p>static</p>");
    }

    #[test]
    fn test_load_missing_template() {
        let temp_dir = tempfile::tempdir().unwrap();
        let err = Template::load(&temp_dir.path().join("template.html")).unwrap_err();
        assert!(matches!(err, SiteError::MissingSource(_)));
    }

    #[test]
    fn test_load_template() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("template.html");
        std::fs::write(&path, "<title>{{ Title }}</title>").unwrap();
        let template = Template::load(&path).unwrap();
        assert_eq!(template.render("T", ""), "<title>T</title>");
    }

    #[test]
    fn test_rewrite_root_links() {
        let html = r#"<link href="/index.css"><a href="/blog/tom">x</a><img src="/images/a.png">"#;
        assert_eq!(
            rewrite_root_links(html, "/repo/"),
            r#"<link href="/repo/index.css"><a href="/repo/blog/tom">x</a><img src="/repo/images/a.png">"#
        );
    }

    #[test]
    fn test_rewrite_leaves_other_links() {
        let html = r#"<a href="https://example.com">x</a><a href="page.html">y</a>"#;
        assert_eq!(rewrite_root_links(html, "/repo/"), html);
    }

    #[test]
    fn test_rewrite_with_root_base_is_identity() {
        let html = r#"<a href="/about">x</a>"#;
        assert_eq!(rewrite_root_links(html, "/"), html);
    }
}

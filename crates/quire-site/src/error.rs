//! Site generation errors.

use std::path::{Path, PathBuf};

use quire_renderer::MarkdownError;

/// Error raised while copying files or generating a single page.
#[derive(Debug, thiserror::Error)]
pub enum SiteError {
    /// Content directory, static directory or template does not exist.
    #[error("Source path not found: {}", .0.display())]
    MissingSource(PathBuf),
    /// I/O error on a specific path.
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// Markdown document failed to compile.
    #[error("Failed to generate {}: {source}", path.display())]
    Markdown {
        path: PathBuf,
        #[source]
        source: MarkdownError,
    },
}

impl SiteError {
    pub(crate) fn io(path: &Path, source: std::io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Error returned by the static site builder.
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error(transparent)]
    Site(#[from] SiteError),
    /// Pages failed while failures were being isolated.
    #[error("{failed} of {total} pages failed to generate")]
    PagesFailed { failed: usize, total: usize },
    #[error("Failed to create thread pool: {0}")]
    ThreadPool(String),
}

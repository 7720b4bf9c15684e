//! Static site builder.

use std::fs;
use std::path::{Path, PathBuf};

use quire_renderer::render_page;
use rayon::prelude::*;

use crate::copy::copy_tree;
use crate::error::{BuildError, SiteError};
use crate::scanner::{PageRef, Scanner};
use crate::template::{Template, rewrite_root_links};

/// Configuration for static site building.
#[derive(Clone, Debug)]
pub struct BuildConfig {
    /// Markdown content tree.
    pub content_dir: PathBuf,
    /// Assets copied verbatim into the output directory.
    pub static_dir: PathBuf,
    /// HTML page template.
    pub template: PathBuf,
    /// Output directory, recreated on every build.
    pub output_dir: PathBuf,
    /// Prefix substituted for the leading `/` of root-relative links.
    pub base_path: String,
    /// Abort on the first failed page instead of isolating failures.
    pub fail_fast: bool,
    /// Worker threads for page generation (0 = one per CPU).
    pub jobs: usize,
}

/// A page that failed to generate.
#[derive(Debug)]
pub struct PageFailure {
    pub source: PathBuf,
    pub error: SiteError,
}

/// Outcome of a build.
#[derive(Debug, Default)]
pub struct BuildReport {
    /// Number of static files copied.
    pub copied_files: usize,
    /// Written pages, in discovery order.
    pub generated: Vec<PathBuf>,
    /// Failed pages, in discovery order.
    pub failures: Vec<PageFailure>,
}

impl BuildReport {
    pub fn total_pages(&self) -> usize {
        self.generated.len() + self.failures.len()
    }

    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }

    /// Convert isolated page failures into an error.
    ///
    /// # Errors
    ///
    /// Returns [`BuildError::PagesFailed`] if any page failed.
    pub fn ensure_success(&self) -> Result<(), BuildError> {
        if self.is_success() {
            Ok(())
        } else {
            Err(BuildError::PagesFailed {
                failed: self.failures.len(),
                total: self.total_pages(),
            })
        }
    }
}

/// Builds a static site from a content tree, a static tree and a template.
pub struct StaticSiteBuilder {
    config: BuildConfig,
}

impl StaticSiteBuilder {
    pub fn new(config: BuildConfig) -> Self {
        Self { config }
    }

    /// Run a full build.
    ///
    /// The template and content tree are checked before the output directory
    /// is touched. The output directory is then replaced by a copy of the
    /// static directory and every page is generated into it.
    ///
    /// # Errors
    ///
    /// Returns an error if a source is missing, on I/O failure, or on the
    /// first failed page when `fail_fast` is set. Without `fail_fast`, page
    /// failures are collected in the returned [`BuildReport`].
    pub fn build(&self) -> Result<BuildReport, BuildError> {
        let template = Template::load(&self.config.template)?;
        let tree = Scanner::new(
            self.config.content_dir.clone(),
            self.config.output_dir.clone(),
        )
        .scan()?;

        let copied_files = copy_tree(&self.config.static_dir, &self.config.output_dir)?;
        tracing::info!(
            files = copied_files,
            dest = %self.config.output_dir.display(),
            "Copied static files"
        );

        for dir in &tree.directories {
            fs::create_dir_all(dir).map_err(|e| SiteError::io(dir, e))?;
        }

        let mut report = self.generate_pages(&tree.pages, &template)?;
        report.copied_files = copied_files;
        Ok(report)
    }

    fn generate_pages(
        &self,
        pages: &[PageRef],
        template: &Template,
    ) -> Result<BuildReport, BuildError> {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.config.jobs)
            .build()
            .map_err(|e| BuildError::ThreadPool(e.to_string()))?;

        let base_path = self.config.base_path.as_str();
        let render = |page: &PageRef| generate_page(&page.source, template, &page.dest, base_path);

        if self.config.fail_fast {
            pool.install(|| pages.par_iter().try_for_each(render))?;
            return Ok(BuildReport {
                generated: pages.iter().map(|page| page.dest.clone()).collect(),
                ..BuildReport::default()
            });
        }

        let results: Vec<Result<(), SiteError>> =
            pool.install(|| pages.par_iter().map(render).collect());

        let mut report = BuildReport::default();
        for (page, result) in pages.iter().zip(results) {
            match result {
                Ok(()) => report.generated.push(page.dest.clone()),
                Err(error) => {
                    tracing::warn!(
                        source = %page.source.display(),
                        error = %error,
                        "Page generation failed"
                    );
                    report.failures.push(PageFailure {
                        source: page.source.clone(),
                        error,
                    });
                }
            }
        }
        Ok(report)
    }
}

/// Render one markdown file into `template` and write it to `dest`.
///
/// Parent directories of `dest` are created as needed.
pub fn generate_page(
    source: &Path,
    template: &Template,
    dest: &Path,
    base_path: &str,
) -> Result<(), SiteError> {
    tracing::info!(
        source = %source.display(),
        dest = %dest.display(),
        "Generating page"
    );

    let markdown = fs::read_to_string(source).map_err(|e| SiteError::io(source, e))?;
    let page = render_page(&markdown).map_err(|e| SiteError::Markdown {
        path: source.to_path_buf(),
        source: e,
    })?;
    let html = rewrite_root_links(&template.render(&page.title, &page.html), base_path);

    if let Some(parent) = dest.parent() {
        fs::create_dir_all(parent).map_err(|e| SiteError::io(parent, e))?;
    }
    fs::write(dest, html).map_err(|e| SiteError::io(dest, e))
}

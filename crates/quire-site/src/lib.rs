//! Static site generation for quire.
//!
//! A build replaces the output directory with a copy of the static directory,
//! then renders every markdown file of the content tree through the page
//! template. Pages are generated in parallel on a rayon pool and reported in
//! discovery order.

mod builder;
mod copy;
mod error;
mod scanner;
mod template;

pub use builder::{BuildConfig, BuildReport, PageFailure, StaticSiteBuilder, generate_page};
pub use copy::copy_tree;
pub use error::{BuildError, SiteError};
pub use scanner::{ContentTree, PageRef, Scanner};
pub use template::{CONTENT_PLACEHOLDER, TITLE_PLACEHOLDER, Template, rewrite_root_links};

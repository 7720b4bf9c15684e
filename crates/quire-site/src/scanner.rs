//! Page discovery by walking the content tree.
//!
//! Discovery only maps source files to output locations. Nothing is read or
//! written here; the builder does that in parallel afterwards.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::SiteError;

/// A markdown source and the HTML file it is rendered to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PageRef {
    pub source: PathBuf,
    pub dest: PathBuf,
}

/// Result of a content tree walk.
#[derive(Debug, Default)]
pub struct ContentTree {
    /// Output directories mirroring every content directory, parents first.
    pub directories: Vec<PathBuf>,
    /// Pages in discovery order.
    pub pages: Vec<PageRef>,
}

/// Walks a content directory and mirrors its layout under an output directory.
///
/// Hidden entries are skipped. Entries are visited in file name order so the
/// discovery order is stable across platforms.
pub struct Scanner {
    content_dir: PathBuf,
    output_dir: PathBuf,
}

impl Scanner {
    pub fn new(content_dir: PathBuf, output_dir: PathBuf) -> Self {
        Self {
            content_dir,
            output_dir,
        }
    }

    /// Walk the content directory.
    ///
    /// # Errors
    ///
    /// Returns [`SiteError::MissingSource`] if the content directory does not exist.
    pub fn scan(&self) -> Result<ContentTree, SiteError> {
        if !self.content_dir.is_dir() {
            return Err(SiteError::MissingSource(self.content_dir.clone()));
        }
        let mut tree = ContentTree::default();
        scan_directory(&self.content_dir, &self.output_dir, &mut tree)?;
        Ok(tree)
    }
}

fn scan_directory(dir: &Path, dest_dir: &Path, tree: &mut ContentTree) -> Result<(), SiteError> {
    let mut entries = fs::read_dir(dir)
        .map_err(|e| SiteError::io(dir, e))?
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| SiteError::io(dir, e))?;
    entries.sort_by_key(fs::DirEntry::file_name);

    for entry in entries {
        let name = entry.file_name();
        if name.to_string_lossy().starts_with('.') {
            continue;
        }

        let path = entry.path();
        let is_dir = entry
            .file_type()
            .map_err(|e| SiteError::io(&path, e))?
            .is_dir();

        if is_dir {
            let child_dest = dest_dir.join(&name);
            tree.directories.push(child_dest.clone());
            scan_directory(&path, &child_dest, tree)?;
        } else if path.extension().is_some_and(|e| e == "md") {
            tree.pages.push(PageRef {
                dest: dest_dir.join(&name).with_extension("html"),
                source: path,
            });
        }
    }
    Ok(())
}

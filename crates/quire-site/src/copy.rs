//! Recursive directory copy for static assets.

use std::fs;
use std::path::Path;

use crate::error::SiteError;

/// Recreate `dest` as a copy of `source`.
///
/// Any existing `dest` is removed first. Returns the number of files copied.
pub fn copy_tree(source: &Path, dest: &Path) -> Result<usize, SiteError> {
    if !source.is_dir() {
        return Err(SiteError::MissingSource(source.to_path_buf()));
    }
    if dest.exists() {
        fs::remove_dir_all(dest).map_err(|e| SiteError::io(dest, e))?;
    }
    copy_dir(source, dest)
}

fn copy_dir(source: &Path, dest: &Path) -> Result<usize, SiteError> {
    fs::create_dir_all(dest).map_err(|e| SiteError::io(dest, e))?;

    let mut entries = fs::read_dir(source)
        .map_err(|e| SiteError::io(source, e))?
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| SiteError::io(source, e))?;
    entries.sort_by_key(fs::DirEntry::file_name);

    let mut copied = 0;
    for entry in entries {
        let path = entry.path();
        let target = dest.join(entry.file_name());
        let is_dir = entry
            .file_type()
            .map_err(|e| SiteError::io(&path, e))?
            .is_dir();

        if is_dir {
            copied += copy_dir(&path, &target)?;
        } else {
            tracing::debug!(source = %path.display(), dest = %target.display(), "Copying file");
            fs::copy(&path, &target).map_err(|e| SiteError::io(&path, e))?;
            copied += 1;
        }
    }
    Ok(copied)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_copy_tree_copies_nested_files() {
        let temp_dir = tempfile::tempdir().unwrap();
        let source = temp_dir.path().join("static");
        fs::create_dir_all(source.join("images")).unwrap();
        fs::write(source.join("index.css"), "body {}").unwrap();
        fs::write(source.join("images/logo.png"), [0x89, b'P']).unwrap();

        let dest = temp_dir.path().join("public");
        let copied = copy_tree(&source, &dest).unwrap();

        assert_eq!(copied, 2);
        assert_eq!(
            fs::read_to_string(dest.join("index.css")).unwrap(),
            "body {}"
        );
        assert_eq!(fs::read(dest.join("images/logo.png")).unwrap(), [0x89, b'P']);
    }

    #[test]
    fn test_copy_tree_replaces_existing_dest() {
        let temp_dir = tempfile::tempdir().unwrap();
        let source = temp_dir.path().join("static");
        fs::create_dir(&source).unwrap();
        fs::write(source.join("new.txt"), "new").unwrap();

        let dest = temp_dir.path().join("public");
        fs::create_dir(&dest).unwrap();
        fs::write(dest.join("stale.txt"), "stale").unwrap();

        copy_tree(&source, &dest).unwrap();

        assert!(dest.join("new.txt").exists());
        assert!(!dest.join("stale.txt").exists());
    }

    #[test]
    fn test_copy_tree_copies_empty_dirs() {
        let temp_dir = tempfile::tempdir().unwrap();
        let source = temp_dir.path().join("static");
        fs::create_dir_all(source.join("empty")).unwrap();

        let dest = temp_dir.path().join("public");
        assert_eq!(copy_tree(&source, &dest).unwrap(), 0);
        assert!(dest.join("empty").is_dir());
    }

    #[test]
    fn test_copy_tree_missing_source() {
        let temp_dir = tempfile::tempdir().unwrap();
        let err = copy_tree(
            &temp_dir.path().join("nope"),
            &temp_dir.path().join("public"),
        )
        .unwrap_err();
        assert!(matches!(err, SiteError::MissingSource(_)));
        assert!(!temp_dir.path().join("public").exists());
    }
}

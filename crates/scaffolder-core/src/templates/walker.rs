//! Template corpus enumeration

use super::TEMPLATE_SUFFIX;
use crate::error::{Error, Result};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// List every template file under `root` using the default suffix
pub fn list_template_files(root: &Path) -> Result<Vec<PathBuf>> {
    list_template_files_with_suffix(root, TEMPLATE_SUFFIX)
}

/// List every regular file under `root` whose name ends with `suffix`
///
/// Entries are visited sorted by file name at each directory level, so the
/// same tree always yields the same sequence. Symlinks are followed; a link
/// cycle is reported as an error.
pub fn list_template_files_with_suffix(root: &Path, suffix: &str) -> Result<Vec<PathBuf>> {
    if !root.is_dir() {
        return Err(Error::io(
            format!("Template directory not found: {}", root.display()),
            std::io::Error::from(std::io::ErrorKind::NotFound),
        ));
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(root).follow_links(true).sort_by_file_name() {
        let entry = entry.map_err(|e| {
            let context = match e.path() {
                Some(path) => format!("Failed to read template corpus at {}", path.display()),
                None => "Failed to read template corpus".to_string(),
            };
            Error::io(context, e.into())
        })?;

        if !entry.file_type().is_file() {
            continue;
        }
        let is_template = entry
            .file_name()
            .to_str()
            .is_some_and(|name| name.ends_with(suffix));
        if is_template {
            files.push(entry.into_path());
        }
    }

    Ok(files)
}

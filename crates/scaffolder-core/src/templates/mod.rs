//! Template corpus handling
//!
//! This module provides:
//! - Bundled corpora embedded in a product binary
//! - Corpus enumeration (files ending in the template suffix)
//! - `{{KEY}}` placeholder substitution
//! - The optional corpus manifest (`template.yaml`)
//! - Version compatibility checking

pub mod bundled;
pub mod manifest;
pub mod substitute;
pub mod version;
pub mod walker;

use crate::error::{Error, Result};
use colored::Colorize;
use std::path::{Path, PathBuf};

pub use bundled::{BundledCorpus, CorpusDir};
pub use manifest::{CorpusManifest, MANIFEST_FILE};
pub use substitute::{substitute, Substitutor};
pub use version::check_compatibility;
pub use walker::{list_template_files, list_template_files_with_suffix};

/// Marker suffix identifying template files
pub const TEMPLATE_SUFFIX: &str = ".template";

/// Output path of a template, relative to the project root
///
/// Exactly one trailing `suffix` is removed from the file name; directory
/// components are kept as-is.
pub fn output_path(template_root: &Path, template_file: &Path, suffix: &str) -> Result<PathBuf> {
    let relative = template_file.strip_prefix(template_root).map_err(|_| {
        Error::template(format!(
            "{} is outside the template directory {}",
            template_file.display(),
            template_root.display()
        ))
    })?;

    let file_name = relative
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| {
            Error::template(format!("Invalid template file name: {}", relative.display()))
        })?;

    match file_name.strip_suffix(suffix) {
        Some(stripped) if !stripped.is_empty() => Ok(relative.with_file_name(stripped)),
        _ => Err(Error::template(format!(
            "Template file {} has no name besides the '{}' suffix",
            relative.display(),
            suffix
        ))),
    }
}

/// Print every template in a corpus with the path it generates (for development use)
pub fn print_corpus(template_dir: &Path) -> Result<()> {
    let manifest = CorpusManifest::load(template_dir)?;
    let suffix = manifest
        .as_ref()
        .and_then(|m| m.suffix.clone())
        .unwrap_or_else(|| TEMPLATE_SUFFIX.to_string());

    match &manifest {
        Some(m) => println!("{} - {}", m.name.cyan().bold(), m.description),
        None => println!("{}", template_dir.display().to_string().cyan().bold()),
    }
    println!();

    let files = list_template_files_with_suffix(template_dir, &suffix)?;
    for file in &files {
        let relative = file.strip_prefix(template_dir).unwrap_or(file);
        let output = output_path(template_dir, file, &suffix)?;
        println!(
            "  {} {} {}",
            relative.display(),
            "->".blue(),
            output.display()
        );
    }

    println!();
    if files.is_empty() {
        println!("{} no '{}' files found", "Warning:".yellow(), suffix);
    } else {
        println!("{} {} template file(s)", "Found".green().bold(), files.len());
    }

    Ok(())
}

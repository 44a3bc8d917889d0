//! Template corpora compiled into a product binary
//!
//! The materializer works on directories, so an embedded corpus is unpacked
//! into a temporary directory that lives as long as the [`BundledCorpus`].

use crate::error::{Error, IoResultExt, Result};
use rust_embed::RustEmbed;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// An embedded corpus unpacked to a temporary directory
#[derive(Debug)]
pub struct BundledCorpus {
    dir: TempDir,
}

impl BundledCorpus {
    /// Unpack every file of `E` into a fresh temporary directory
    pub fn extract<E: RustEmbed>() -> Result<Self> {
        let dir = tempfile::Builder::new()
            .prefix("scaffolder-templates-")
            .tempdir()
            .map_err(|e| Error::io("Failed to create directory for bundled templates", e))?;

        let mut count = 0usize;
        for name in E::iter() {
            let Some(file) = E::get(&name) else {
                continue;
            };
            let relative = embedded_path(&name)?;
            let target = dir.path().join(&relative);
            if let Some(parent) = target.parent() {
                fs::create_dir_all(parent).with_path("create directory", parent)?;
            }
            fs::write(&target, file.data.as_ref()).with_path("write", &target)?;
            count += 1;
        }

        if count == 0 {
            return Err(Error::template("Bundled template corpus is empty"));
        }
        tracing::debug!(files = count, dir = %dir.path().display(), "unpacked bundled templates");

        Ok(Self { dir })
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }
}

/// Embedded names use `/` and must stay below the corpus root
fn embedded_path(name: &str) -> Result<PathBuf> {
    let contained = name
        .split('/')
        .all(|segment| !segment.is_empty() && segment != "." && segment != "..");
    if contained {
        Ok(name.split('/').collect())
    } else {
        Err(Error::template(format!("Invalid bundled template path: {}", name)))
    }
}

/// Where a create run reads its templates from
#[derive(Debug)]
pub enum CorpusDir {
    /// A directory given by the user
    Local(PathBuf),
    /// The product's embedded corpus
    Bundled(BundledCorpus),
}

impl CorpusDir {
    pub fn path(&self) -> &Path {
        match self {
            CorpusDir::Local(path) => path,
            CorpusDir::Bundled(corpus) => corpus.path(),
        }
    }
}

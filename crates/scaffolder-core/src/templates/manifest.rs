//! Template corpus manifest (`template.yaml` at the corpus root)

use crate::error::{Error, IoResultExt, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Manifest file name at the corpus root
pub const MANIFEST_FILE: &str = "template.yaml";

/// Optional description and generation settings for a template corpus
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorpusManifest {
    /// Display name of the template
    pub name: String,

    /// Description of what the template provides
    #[serde(default)]
    pub description: String,

    /// Minimum CLI version (semver) this corpus expects
    #[serde(default)]
    pub version: Option<String>,

    /// Template marker suffix, overriding `.template`
    #[serde(default)]
    pub suffix: Option<String>,

    /// Where the generated colors module is written, relative to the project root
    #[serde(default)]
    pub colors_module: Option<PathBuf>,

    /// File names written empty instead of rendered (e.g. `.gitkeep`)
    #[serde(default)]
    pub empty_markers: Option<Vec<String>>,
}

impl CorpusManifest {
    /// Read `template.yaml` from the corpus root, if present
    pub fn load(template_root: &Path) -> Result<Option<Self>> {
        let path = template_root.join(MANIFEST_FILE);
        if !path.is_file() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(&path).with_path("read", &path)?;
        let manifest = serde_yaml::from_str(&content)
            .map_err(|source| Error::Manifest { path, source })?;
        Ok(Some(manifest))
    }
}

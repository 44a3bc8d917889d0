//! Product configuration trait for CLI binaries
//!
//! Each scaffolding binary implements this trait to configure the shared
//! create flow for its product.

use crate::answers::AnswerRecord;
use crate::error::Result;
use crate::templates::BundledCorpus;
use std::path::Path;

/// Configuration trait for different CLI products
///
/// Each product implements this trait to define:
/// - Product identity (name, display name)
/// - Its bundled template corpus
/// - Documentation links
/// - Post-setup instructions
pub trait ProductConfig: Clone + Send + Sync + 'static {
    /// Internal product name (used for the CLI command)
    fn name(&self) -> &'static str;

    /// Human-readable display name
    fn display_name(&self) -> &'static str;

    /// Unpack the corpus compiled into the binary, used when no
    /// `--template-dir` is given
    fn bundled_corpus(&self) -> Result<BundledCorpus>;

    /// URL for product documentation
    fn docs_url(&self) -> &'static str;

    /// Generate the "next steps" instructions after project creation
    fn next_steps(&self, dir: &Path, answers: &AnswerRecord) -> Vec<String>;

    /// Upgrade/install command shown in version warnings
    fn upgrade_command(&self) -> &'static str;
}

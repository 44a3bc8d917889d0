//! Scaffolder Core - Shared library for project scaffolding CLIs
//!
//! This library provides the core functionality for materializing projects
//! from a local template corpus. A product binary supplies a
//! [`ProductConfig`] and either drives the bundled prompts or builds an
//! [`AnswerRecord`] itself.
//!
//! # Architecture
//!
//! The library is organized into layers:
//!
//! - **Layer 1: Pure transforms** - palette derivation, placeholder substitution, replacement building
//! - **Layer 2: Materialization** - corpus walking and the [`Materializer`]
//! - **Layer 3: CLI/TUI Interface** - Optional cliclack-based prompts (feature-gated)
//!
//! # Feature Flags
//!
//! - `tui` (default): Enables the cliclack-based TUI prompts module
//!
//! # Example Usage (without TUI)
//!
//! ```ignore
//! use scaffolder_core::{AnswerRecord, Materializer};
//!
//! let answers = AnswerRecord::from_file("answers.yaml".as_ref())?;
//! answers.validate()?;
//! let project = Materializer::from_corpus("templates/expo")?
//!     .materialize_atomic("my-app".as_ref(), &answers)?;
//! println!("{} files written", project.files.len());
//! ```

pub mod answers;
pub mod error;
pub mod generator;
pub mod palette;
pub mod product;
pub mod replacements;
pub mod templates;

#[cfg(feature = "tui")]
pub mod tui;

// Re-export main types for convenience
pub use answers::{AnswerRecord, AnswerValue, AnswerValues, Permission};
pub use error::{Error, ErrorKind, Result};
pub use generator::{check_destination, materialize, GeneratedProject, MaterializeOptions, Materializer};
pub use palette::{derive_palette, render_palette_module, ColorPalette};
pub use product::ProductConfig;
pub use replacements::{build_replacements, ReplacementMap};
pub use templates::{
    list_template_files, substitute, BundledCorpus, CorpusDir, CorpusManifest, TEMPLATE_SUFFIX,
};

#[cfg(feature = "tui")]
pub use tui::run;

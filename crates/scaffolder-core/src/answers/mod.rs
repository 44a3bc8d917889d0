//! Answer records collected before generation
//!
//! Answers are gathered into a flat [`AnswerValues`] map while prompting (so
//! later defaults can read earlier answers) and then frozen into a typed
//! [`AnswerRecord`]. Conversion fails fast on the first missing or mistyped
//! key.

pub mod questions;

use crate::error::{Error, IoResultExt, Result};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::path::Path;

pub use questions::{validate_project_name, Question, QuestionKind, QUESTIONS};

/// Platform permissions a generated app can declare
///
/// Variant order is the fixed enumeration order used for every derived
/// fragment, so a `BTreeSet<Permission>` always iterates camera first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Permission {
    Camera,
    Microphone,
    PhotoLibrary,
    Location,
    Notifications,
}

impl Permission {
    pub const ALL: [Permission; 5] = [
        Permission::Camera,
        Permission::Microphone,
        Permission::PhotoLibrary,
        Permission::Location,
        Permission::Notifications,
    ];

    /// Key used in answer files and prompt values
    pub fn key(&self) -> &'static str {
        match self {
            Permission::Camera => "camera",
            Permission::Microphone => "microphone",
            Permission::PhotoLibrary => "photoLibrary",
            Permission::Location => "location",
            Permission::Notifications => "notifications",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Permission::Camera => "Camera",
            Permission::Microphone => "Microphone",
            Permission::PhotoLibrary => "Photo Library",
            Permission::Location => "Location",
            Permission::Notifications => "Notifications",
        }
    }

    /// Parse a permission key (case-insensitive)
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|p| p.key().eq_ignore_ascii_case(key))
    }
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// A single collected answer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnswerValue {
    Text(String),
    Flag(bool),
    Permissions(BTreeSet<Permission>),
}

/// Answers keyed by question key
pub type AnswerValues = BTreeMap<String, AnswerValue>;

/// Frozen configuration for one generated project
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerRecord {
    pub app_name: String,
    pub app_slug: String,
    pub version: String,
    pub bundle_identifier: String,
    pub apple_id: String,
    pub team_id: String,
    pub supports_tablet: bool,
    pub package_name: String,
    pub version_code: String,
    #[serde(default)]
    pub eas_project_id: String,
    #[serde(default)]
    pub owner: String,
    pub primary_color: String,
    #[serde(default)]
    pub permissions: BTreeSet<Permission>,
}

impl AnswerRecord {
    /// Freeze a collected answer map
    pub fn from_values(values: &AnswerValues) -> Result<Self> {
        Ok(Self {
            app_name: text(values, "appName")?,
            app_slug: text(values, "appSlug")?,
            version: text(values, "version")?,
            bundle_identifier: text(values, "bundleIdentifier")?,
            apple_id: text(values, "appleId")?,
            team_id: text(values, "teamId")?,
            supports_tablet: flag(values, "supportsTablet")?,
            package_name: text(values, "packageName")?,
            version_code: text(values, "versionCode")?,
            eas_project_id: optional_text(values, "easProjectId")?,
            owner: optional_text(values, "owner")?,
            primary_color: text(values, "primaryColor")?,
            permissions: permissions(values, "permissions")?,
        })
    }

    /// Parse a YAML (or JSON) answers document
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        serde_yaml::from_str(content).map_err(|e| Error::validation("answers", e.to_string()))
    }

    /// Load answers from a file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).with_path("read", path)?;
        Self::from_yaml_str(&content)
    }

    /// Look up a text field by question key
    pub fn text_field(&self, key: &str) -> Option<&str> {
        let value = match key {
            "appName" => &self.app_name,
            "appSlug" => &self.app_slug,
            "version" => &self.version,
            "bundleIdentifier" => &self.bundle_identifier,
            "appleId" => &self.apple_id,
            "teamId" => &self.team_id,
            "packageName" => &self.package_name,
            "versionCode" => &self.version_code,
            "easProjectId" => &self.eas_project_id,
            "owner" => &self.owner,
            "primaryColor" => &self.primary_color,
            _ => return None,
        };
        Some(value)
    }

    /// Run every text question's validator against this record
    pub fn validate(&self) -> Result<()> {
        for question in QUESTIONS {
            let QuestionKind::Text {
                validate: Some(validate),
                ..
            } = question.kind
            else {
                continue;
            };
            if let Some(value) = self.text_field(question.key) {
                validate(value).map_err(|message| Error::validation(question.key, message))?;
            }
        }
        Ok(())
    }
}

fn get<'a>(values: &'a AnswerValues, key: &str) -> Result<&'a AnswerValue> {
    values.get(key).ok_or_else(|| Error::missing_answer(key))
}

fn text(values: &AnswerValues, key: &str) -> Result<String> {
    match get(values, key)? {
        AnswerValue::Text(s) => Ok(s.clone()),
        _ => Err(Error::validation(key, "expected text")),
    }
}

fn optional_text(values: &AnswerValues, key: &str) -> Result<String> {
    match values.get(key) {
        None => Ok(String::new()),
        Some(AnswerValue::Text(s)) => Ok(s.clone()),
        Some(_) => Err(Error::validation(key, "expected text")),
    }
}

fn flag(values: &AnswerValues, key: &str) -> Result<bool> {
    match get(values, key)? {
        AnswerValue::Flag(b) => Ok(*b),
        _ => Err(Error::validation(key, "expected true or false")),
    }
}

fn permissions(values: &AnswerValues, key: &str) -> Result<BTreeSet<Permission>> {
    match get(values, key)? {
        AnswerValue::Permissions(set) => Ok(set.clone()),
        _ => Err(Error::validation(key, "expected a set of permissions")),
    }
}

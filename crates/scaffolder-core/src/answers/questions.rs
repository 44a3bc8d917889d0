//! The ordered question list and its validators
//!
//! Defaults are plain functions of the project name and the answers collected
//! so far, so a later question can derive its default from an earlier one.

use super::{AnswerValue, AnswerValues};
use crate::error::{Error, Result};
use regex::Regex;
use std::fmt;
use std::sync::LazyLock;

/// Default for a text question, computed at prompt time
pub type DefaultFn = fn(&str, &AnswerValues) -> String;

/// Validator for a text answer; the error is shown to the user
pub type ValidateFn = fn(&str) -> std::result::Result<(), &'static str>;

/// How a question is asked and what kind of value it yields
#[derive(Clone, Copy)]
pub enum QuestionKind {
    /// Free text, yields `AnswerValue::Text`
    Text {
        default: Option<DefaultFn>,
        validate: Option<ValidateFn>,
        /// Whether an empty answer is acceptable
        optional: bool,
    },
    /// Yes/no, yields `AnswerValue::Flag`
    Confirm { default: bool },
    /// Multi-select over `Permission::ALL`, yields `AnswerValue::Permissions`
    Permissions,
}

/// One prompt in the configuration flow
#[derive(Clone, Copy)]
pub struct Question {
    pub key: &'static str,
    pub prompt: &'static str,
    pub kind: QuestionKind,
}

impl fmt::Debug for Question {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Question")
            .field("key", &self.key)
            .field("prompt", &self.prompt)
            .finish_non_exhaustive()
    }
}

impl Question {
    /// Default answer for a text question given what has been collected
    pub fn default_text(&self, project_name: &str, answers: &AnswerValues) -> Option<String> {
        match self.kind {
            QuestionKind::Text {
                default: Some(default),
                ..
            } => Some(default(project_name, answers)),
            _ => None,
        }
    }

    /// Check a text answer against this question's validator
    pub fn check(&self, input: &str) -> std::result::Result<(), &'static str> {
        match self.kind {
            QuestionKind::Text {
                validate: Some(validate),
                ..
            } => validate(input),
            _ => Ok(()),
        }
    }
}

macro_rules! pattern {
    ($name:ident, $re:expr) => {
        static $name: LazyLock<Regex> =
            LazyLock::new(|| Regex::new($re).expect("validator pattern is valid"));
    };
}

pattern!(SLUG, r"^[a-z0-9-]+$");
pattern!(PROJECT_NAME, r"(?i)^[a-z0-9-]+$");
pattern!(SEMVER, r"^\d+\.\d+\.\d+$");
pattern!(REVERSE_DOMAIN, r"^[a-z][a-z0-9]*(\.[a-z][a-z0-9]*)+$");
pattern!(TEAM_ID, r"^[A-Z0-9]{10}$");
pattern!(DIGITS, r"^\d+$");
pattern!(
    UUID,
    r"(?i)^[0-9a-f]{8}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{12}$"
);
pattern!(HEX_COLOR, r"^#[0-9A-Fa-f]{6}$");

fn non_empty(input: &str) -> std::result::Result<(), &'static str> {
    if input.is_empty() {
        Err("App name is required")
    } else {
        Ok(())
    }
}

fn slug(input: &str) -> std::result::Result<(), &'static str> {
    SLUG.is_match(input)
        .then_some(())
        .ok_or("Slug must be lowercase alphanumeric with hyphens")
}

fn version(input: &str) -> std::result::Result<(), &'static str> {
    SEMVER
        .is_match(input)
        .then_some(())
        .ok_or("Version must be in format X.Y.Z")
}

fn bundle_identifier(input: &str) -> std::result::Result<(), &'static str> {
    REVERSE_DOMAIN
        .is_match(input)
        .then_some(())
        .ok_or("Invalid bundle identifier format")
}

fn package_name(input: &str) -> std::result::Result<(), &'static str> {
    REVERSE_DOMAIN
        .is_match(input)
        .then_some(())
        .ok_or("Invalid package name format")
}

fn email(input: &str) -> std::result::Result<(), &'static str> {
    input
        .contains('@')
        .then_some(())
        .ok_or("Please enter a valid email address")
}

fn team_id(input: &str) -> std::result::Result<(), &'static str> {
    TEAM_ID
        .is_match(input)
        .then_some(())
        .ok_or("Team ID must be 10 alphanumeric characters")
}

fn version_code(input: &str) -> std::result::Result<(), &'static str> {
    DIGITS
        .is_match(input)
        .then_some(())
        .ok_or("Version code must be a number")
}

fn optional_uuid(input: &str) -> std::result::Result<(), &'static str> {
    if input.is_empty() || UUID.is_match(input) {
        Ok(())
    } else {
        Err("Invalid UUID format")
    }
}

fn hex_color(input: &str) -> std::result::Result<(), &'static str> {
    HEX_COLOR
        .is_match(input)
        .then_some(())
        .ok_or("Invalid hex color format")
}

/// "my-cool-app" -> "My Cool App"
fn title_case(project_name: &str, _: &AnswerValues) -> String {
    project_name
        .split('-')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn slug_default(project_name: &str, _: &AnswerValues) -> String {
    project_name
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-")
}

/// Only `[a-z0-9]` survives so the default passes `bundle_identifier`
fn bundle_default(project_name: &str, _: &AnswerValues) -> String {
    let segment: String = project_name
        .to_lowercase()
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .collect();
    let segment = match segment.chars().next() {
        Some(c) if c.is_ascii_alphabetic() => segment,
        _ => format!("app{}", segment),
    };
    format!("com.{}.app", segment)
}

fn package_default(project_name: &str, answers: &AnswerValues) -> String {
    match answers.get("bundleIdentifier") {
        Some(AnswerValue::Text(bundle)) => bundle.clone(),
        _ => bundle_default(project_name, answers),
    }
}

fn version_default(_: &str, _: &AnswerValues) -> String {
    "1.0.0".to_string()
}

fn version_code_default(_: &str, _: &AnswerValues) -> String {
    "1".to_string()
}

fn color_default(_: &str, _: &AnswerValues) -> String {
    crate::palette::DEFAULT_PRIMARY.to_string()
}

const fn text(
    key: &'static str,
    prompt: &'static str,
    default: Option<DefaultFn>,
    validate: Option<ValidateFn>,
    optional: bool,
) -> Question {
    Question {
        key,
        prompt,
        kind: QuestionKind::Text {
            default,
            validate,
            optional,
        },
    }
}

/// Every question, in the order it is asked
pub static QUESTIONS: &[Question] = &[
    // App info
    text("appName", "App Name", Some(title_case), Some(non_empty), false),
    text("appSlug", "App Slug (URL-friendly)", Some(slug_default), Some(slug), false),
    text("version", "Version", Some(version_default), Some(version), false),
    // iOS
    text(
        "bundleIdentifier",
        "iOS Bundle Identifier (e.g., com.yourcompany.appname)",
        Some(bundle_default),
        Some(bundle_identifier),
        false,
    ),
    text("appleId", "Apple ID (for TestFlight submission)", None, Some(email), false),
    text("teamId", "Apple Team ID (10 characters)", None, Some(team_id), false),
    Question {
        key: "supportsTablet",
        prompt: "Support iPad?",
        kind: QuestionKind::Confirm { default: true },
    },
    // Android
    text(
        "packageName",
        "Android Package Name",
        Some(package_default),
        Some(package_name),
        false,
    ),
    text(
        "versionCode",
        "Android Version Code",
        Some(version_code_default),
        Some(version_code),
        false,
    ),
    // EAS
    text(
        "easProjectId",
        "EAS Project ID (UUID, leave empty to generate later)",
        None,
        Some(optional_uuid),
        true,
    ),
    text("owner", "EAS Owner (username or organization)", None, None, true),
    // Theming
    text(
        "primaryColor",
        "Primary Color (hex, e.g., #2563eb)",
        Some(color_default),
        Some(hex_color),
        false,
    ),
    Question {
        key: "permissions",
        prompt: "Select permissions needed",
        kind: QuestionKind::Permissions,
    },
];

/// Validate the project directory name given on the command line
pub fn validate_project_name(name: &str) -> Result<()> {
    if PROJECT_NAME.is_match(name) {
        Ok(())
    } else {
        Err(Error::validation(
            "projectName",
            "Project name must be alphanumeric with hyphens only",
        ))
    }
}

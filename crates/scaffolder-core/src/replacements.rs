//! Placeholder values derived from the answers and palette

use crate::answers::{AnswerRecord, Permission};
use crate::palette::ColorPalette;
use std::collections::BTreeMap;

/// Final entry of every `INFO_PLIST` fragment
const NON_EXEMPT_ENCRYPTION: &str = "        \"ITSAppUsesNonExemptEncryption\": false";

/// Indentation of fragment entries inside `app.json`
const FRAGMENT_INDENT: &str = "        ";

/// Placeholder name to literal substitution value
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReplacementMap(BTreeMap<String, String>);

impl ReplacementMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for ReplacementMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

/// iOS usage-description keys required by a permission
fn info_plist_entries(permission: Permission) -> &'static [(&'static str, &'static str)] {
    match permission {
        Permission::Camera => &[(
            "NSCameraUsageDescription",
            "This app needs access to camera.",
        )],
        Permission::Microphone => &[(
            "NSMicrophoneUsageDescription",
            "This app needs access to microphone.",
        )],
        Permission::PhotoLibrary => &[
            (
                "NSPhotoLibraryUsageDescription",
                "This app needs access to photo library.",
            ),
            (
                "NSPhotoLibraryAddUsageDescription",
                "This app needs access to save photos.",
            ),
        ],
        Permission::Location => &[(
            "NSLocationWhenInUseUsageDescription",
            "This app needs access to location.",
        )],
        // Notification permission is requested at runtime, nothing to declare
        Permission::Notifications => &[],
    }
}

/// Android manifest permissions required by a permission
fn android_permissions(permission: Permission) -> &'static [&'static str] {
    match permission {
        Permission::Camera => &["android.permission.CAMERA"],
        Permission::Microphone => &["android.permission.RECORD_AUDIO"],
        Permission::PhotoLibrary => &[
            "android.permission.READ_EXTERNAL_STORAGE",
            "android.permission.WRITE_EXTERNAL_STORAGE",
        ],
        Permission::Location => &[
            "android.permission.ACCESS_FINE_LOCATION",
            "android.permission.ACCESS_COARSE_LOCATION",
        ],
        Permission::Notifications => &[],
    }
}

/// Build the `INFO_PLIST` fragment for the selected permissions
pub fn info_plist_fragment<'a>(permissions: impl IntoIterator<Item = &'a Permission>) -> String {
    let mut entries: Vec<String> = ordered(permissions)
        .flat_map(info_plist_entries)
        .map(|(key, description)| format!("{}\"{}\": \"{}\"", FRAGMENT_INDENT, key, description))
        .collect();
    entries.push(NON_EXEMPT_ENCRYPTION.to_string());
    entries.join(",\n")
}

/// Build the `ANDROID_PERMISSIONS` fragment for the selected permissions
pub fn android_permissions_fragment<'a>(
    permissions: impl IntoIterator<Item = &'a Permission>,
) -> String {
    ordered(permissions)
        .flat_map(android_permissions)
        .map(|id| format!("{}\"{}\"", FRAGMENT_INDENT, id))
        .collect::<Vec<_>>()
        .join(",\n")
}

/// Fixed enumeration order, duplicates dropped
fn ordered<'a>(
    permissions: impl IntoIterator<Item = &'a Permission>,
) -> impl Iterator<Item = Permission> {
    let selected: std::collections::BTreeSet<Permission> =
        permissions.into_iter().copied().collect();
    selected.into_iter()
}

/// Build every placeholder value for one project
pub fn build_replacements(answers: &AnswerRecord, palette: &ColorPalette) -> ReplacementMap {
    let supports_tablet = if answers.supports_tablet {
        "true"
    } else {
        "false"
    };

    [
        ("APP_NAME", answers.app_name.clone()),
        ("APP_SLUG", answers.app_slug.clone()),
        ("BUNDLE_IDENTIFIER", answers.bundle_identifier.clone()),
        ("PACKAGE_NAME", answers.package_name.clone()),
        ("APPLE_ID", answers.apple_id.clone()),
        ("TEAM_ID", answers.team_id.clone()),
        ("EAS_PROJECT_ID", answers.eas_project_id.clone()),
        ("OWNER", answers.owner.clone()),
        ("PRIMARY_COLOR", answers.primary_color.clone()),
        ("VERSION", answers.version.clone()),
        ("VERSION_CODE", answers.version_code.clone()),
        ("SUPPORTS_TABLET", supports_tablet.to_string()),
        ("INFO_PLIST", info_plist_fragment(&answers.permissions)),
        (
            "ANDROID_PERMISSIONS",
            android_permissions_fragment(&answers.permissions),
        ),
        ("PRIMARY_COLOR_BACKGROUND", palette.primary.clone()),
    ]
    .into_iter()
    .collect()
}

//! Project materialization
//!
//! Turns a template corpus plus an [`AnswerRecord`] into a project directory:
//! every template is rendered to its suffix-stripped path, then the colors
//! module, `.gitignore` and `assets/` are added.

use crate::answers::AnswerRecord;
use crate::error::{Error, IoResultExt, Result};
use crate::palette::{derive_palette, render_palette_module};
use crate::replacements::build_replacements;
use crate::templates::{
    list_template_files_with_suffix, output_path, CorpusManifest, Substitutor, TEMPLATE_SUFFIX,
};
use std::fs;
use std::path::{Component, Path, PathBuf};

/// Default location of the generated colors module
pub const COLORS_MODULE_PATH: &str = "src/constants/colors.ts";

/// Directory created empty at the project root
pub const ASSETS_DIR: &str = "assets";

/// Ignore file written at the project root
pub const GITIGNORE: &str = "node_modules/
.expo/
.expo-shared/
dist/
npm-debug.*
*.jks
*.p8
*.p12
*.key
*.mobileprovision
*.orig.*
web-build/
.DS_Store
*.pem

# local env files
.env*.local

# typescript
*.tsbuildinfo
";

/// Settings that shape a materialization
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MaterializeOptions {
    /// Template marker suffix
    pub suffix: String,
    /// Colors module path relative to the project root
    pub colors_module: PathBuf,
    /// Output file names that are written empty
    pub empty_markers: Vec<String>,
}

impl Default for MaterializeOptions {
    fn default() -> Self {
        Self {
            suffix: TEMPLATE_SUFFIX.to_string(),
            colors_module: PathBuf::from(COLORS_MODULE_PATH),
            empty_markers: vec![".gitkeep".to_string()],
        }
    }
}

impl MaterializeOptions {
    /// Apply the overrides declared in a corpus manifest
    pub fn with_manifest(mut self, manifest: &CorpusManifest) -> Result<Self> {
        if let Some(suffix) = &manifest.suffix {
            self.suffix = suffix.clone();
        }
        if let Some(colors_module) = &manifest.colors_module {
            self.colors_module = colors_module.clone();
        }
        if let Some(markers) = &manifest.empty_markers {
            self.empty_markers = markers.clone();
        }
        self.validate()?;
        Ok(self)
    }

    /// Reject settings that would read the wrong files or write outside the project
    pub fn validate(&self) -> Result<()> {
        if self.suffix.is_empty() {
            return Err(Error::template("Template suffix must not be empty"));
        }

        let contained = self
            .colors_module
            .components()
            .all(|c| matches!(c, Component::Normal(_) | Component::CurDir));
        if !contained || self.colors_module.file_name().is_none() {
            return Err(Error::template(format!(
                "Colors module path must be a relative file path inside the project: {}",
                self.colors_module.display()
            )));
        }
        Ok(())
    }

    fn is_empty_marker(&self, output: &Path) -> bool {
        output
            .file_name()
            .and_then(|n| n.to_str())
            .is_some_and(|name| self.empty_markers.iter().any(|m| m == name))
    }
}

/// Summary of a generated project
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedProject {
    /// Project root directory
    pub root: PathBuf,
    /// Files written, relative to `root`, in write order
    pub files: Vec<PathBuf>,
}

/// Fail if `dest` already exists; touches nothing
pub fn check_destination(dest: &Path) -> Result<()> {
    if dest.exists() {
        Err(Error::destination_exists(dest))
    } else {
        Ok(())
    }
}

/// Materializes projects from one template corpus
#[derive(Debug, Clone)]
pub struct Materializer {
    template_root: PathBuf,
    options: MaterializeOptions,
}

impl Materializer {
    /// Use the default options
    pub fn new(template_root: impl Into<PathBuf>) -> Self {
        Self {
            template_root: template_root.into(),
            options: MaterializeOptions::default(),
        }
    }

    /// Use the defaults overridden by the corpus `template.yaml`, if any
    pub fn from_corpus(template_root: impl Into<PathBuf>) -> Result<Self> {
        let template_root = template_root.into();
        let options = match CorpusManifest::load(&template_root)? {
            Some(manifest) => MaterializeOptions::default().with_manifest(&manifest)?,
            None => MaterializeOptions::default(),
        };
        Ok(Self {
            template_root,
            options,
        })
    }

    pub fn with_options(mut self, options: MaterializeOptions) -> Self {
        self.options = options;
        self
    }

    pub fn template_root(&self) -> &Path {
        &self.template_root
    }

    pub fn options(&self) -> &MaterializeOptions {
        &self.options
    }

    /// Write the project directly into `dest`
    ///
    /// A failure partway through leaves `dest` partially populated.
    pub fn materialize(&self, dest: &Path, answers: &AnswerRecord) -> Result<GeneratedProject> {
        self.options.validate()?;
        fs::create_dir_all(dest).with_path("create directory", dest)?;

        let palette = derive_palette(&answers.primary_color);
        let replacements = build_replacements(answers, &palette);
        let substitutor = Substitutor::new(&replacements)?;

        let templates = list_template_files_with_suffix(&self.template_root, &self.options.suffix)?;
        if templates.is_empty() {
            return Err(Error::template(format!(
                "No '{}' files found in {}",
                self.options.suffix,
                self.template_root.display()
            )));
        }

        let mut files = Vec::with_capacity(templates.len() + 2);
        for template in &templates {
            let relative = output_path(&self.template_root, template, &self.options.suffix)?;
            let target = dest.join(&relative);
            ensure_parent(&target)?;

            if self.options.is_empty_marker(&relative) {
                fs::write(&target, "").with_path("write", &target)?;
            } else {
                let raw = fs::read(template).with_path("read template", template)?;
                fs::write(&target, substitutor.apply_bytes(&raw)).with_path("write", &target)?;
            }
            tracing::debug!(file = %relative.display(), "rendered template");
            files.push(relative);
        }

        let colors_path = dest.join(&self.options.colors_module);
        ensure_parent(&colors_path)?;
        fs::write(&colors_path, render_palette_module(&palette)).with_path("write", &colors_path)?;
        files.push(self.options.colors_module.clone());

        let gitignore = dest.join(".gitignore");
        fs::write(&gitignore, GITIGNORE).with_path("write", &gitignore)?;
        files.push(PathBuf::from(".gitignore"));

        let assets = dest.join(ASSETS_DIR);
        fs::create_dir_all(&assets).with_path("create directory", &assets)?;

        tracing::info!(
            dest = %dest.display(),
            files = files.len(),
            "project materialized"
        );

        Ok(GeneratedProject {
            root: dest.to_path_buf(),
            files,
        })
    }

    /// Stage the project next to `dest` and move it into place on success
    ///
    /// `dest` must not exist. On failure the staging directory is removed and
    /// `dest` is never created.
    pub fn materialize_atomic(
        &self,
        dest: &Path,
        answers: &AnswerRecord,
    ) -> Result<GeneratedProject> {
        check_destination(dest)?;
        self.options.validate()?;

        let parent = match dest.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };
        fs::create_dir_all(parent).with_path("create directory", parent)?;

        // The staging dir itself is created owner-only, so build inside it
        let staging = tempfile::Builder::new()
            .prefix(".expo-create-")
            .tempdir_in(parent)
            .with_path("create staging directory in", parent)?;
        let staged_root = staging.path().join("project");

        let staged = self.materialize(&staged_root, answers)?;
        fs::rename(&staged_root, dest).with_path("move project into", dest)?;

        Ok(GeneratedProject {
            root: dest.to_path_buf(),
            files: staged.files,
        })
    }
}

fn ensure_parent(path: &Path) -> Result<()> {
    match path.parent() {
        Some(parent) => fs::create_dir_all(parent).with_path("create directory", parent),
        None => Ok(()),
    }
}

/// Materialize `template_root` into `dest` with default options
pub fn materialize(
    dest: &Path,
    answers: &AnswerRecord,
    template_root: &Path,
) -> Result<GeneratedProject> {
    Materializer::new(template_root).materialize(dest, answers)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::answers::tests::sample_values;
    use crate::error::ErrorKind;

    fn answers() -> AnswerRecord {
        AnswerRecord::from_values(&sample_values()).unwrap()
    }

    fn corpus() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("app.json.template"),
            "{\"name\": \"{{APP_NAME}}\", \"color\": \"{{PRIMARY_COLOR_BACKGROUND}}\"}",
        )
        .unwrap();
        fs::create_dir_all(dir.path().join("src/hooks")).unwrap();
        fs::write(
            dir.path().join("src/hooks/.gitkeep.template"),
            "ignored {{APP_NAME}}",
        )
        .unwrap();
        dir
    }

    #[test]
    fn test_materialize_writes_all_outputs() {
        let templates = corpus();
        let out = tempfile::tempdir().unwrap();
        let dest = out.path().join("app");

        let project = materialize(&dest, &answers(), templates.path()).unwrap();

        assert_eq!(
            fs::read_to_string(dest.join("app.json")).unwrap(),
            "{\"name\": \"Foo Bar\", \"color\": \"#2563eb\"}"
        );
        assert_eq!(fs::read_to_string(dest.join("src/hooks/.gitkeep")).unwrap(), "");
        assert!(fs::read_to_string(dest.join(COLORS_MODULE_PATH))
            .unwrap()
            .starts_with("export const colors = {"));
        assert_eq!(fs::read_to_string(dest.join(".gitignore")).unwrap(), GITIGNORE);
        assert!(dest.join(ASSETS_DIR).is_dir());
        assert_eq!(
            project.files,
            vec![
                PathBuf::from("app.json"),
                PathBuf::from("src/hooks/.gitkeep"),
                PathBuf::from(COLORS_MODULE_PATH),
                PathBuf::from(".gitignore"),
            ]
        );
    }

    #[test]
    fn test_empty_corpus_is_template_error() {
        let templates = tempfile::tempdir().unwrap();
        fs::write(templates.path().join("README.md"), "not a template").unwrap();
        let out = tempfile::tempdir().unwrap();

        let err = materialize(&out.path().join("app"), &answers(), templates.path()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Template);
    }

    #[test]
    fn test_atomic_leaves_nothing_on_failure() {
        let templates = tempfile::tempdir().unwrap();
        let out = tempfile::tempdir().unwrap();
        let dest = out.path().join("app");

        let err = Materializer::new(templates.path())
            .materialize_atomic(&dest, &answers())
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Template);
        assert!(!dest.exists());
        assert_eq!(fs::read_dir(out.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_atomic_moves_project_into_place() {
        let templates = corpus();
        let out = tempfile::tempdir().unwrap();
        let dest = out.path().join("nested/app");

        let project = Materializer::new(templates.path())
            .materialize_atomic(&dest, &answers())
            .unwrap();
        assert_eq!(project.root, dest);
        assert!(dest.join("app.json").is_file());
        // Only the project remains next to it
        let siblings: Vec<_> = fs::read_dir(out.path().join("nested"))
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .collect();
        assert_eq!(siblings, vec![std::ffi::OsString::from("app")]);
    }

    #[test]
    fn test_atomic_rejects_existing_destination() {
        let templates = corpus();
        let out = tempfile::tempdir().unwrap();
        let err = Materializer::new(templates.path())
            .materialize_atomic(out.path(), &answers())
            .unwrap_err();
        assert!(matches!(err, Error::DestinationExists { .. }));
    }

    #[test]
    fn test_manifest_overrides() {
        let templates = corpus();
        fs::write(
            templates.path().join("template.yaml"),
            "name: Test\ncolors_module: theme/colors.ts\nempty_markers: [app.json]\n",
        )
        .unwrap();
        let out = tempfile::tempdir().unwrap();
        let dest = out.path().join("app");

        let materializer = Materializer::from_corpus(templates.path()).unwrap();
        materializer.materialize(&dest, &answers()).unwrap();

        assert!(dest.join("theme/colors.ts").is_file());
        assert_eq!(fs::read_to_string(dest.join("app.json")).unwrap(), "");
        // .gitkeep is no longer a marker, so it is rendered
        assert_eq!(
            fs::read_to_string(dest.join("src/hooks/.gitkeep")).unwrap(),
            "ignored Foo Bar"
        );
    }

    #[test]
    fn test_colors_module_must_stay_inside_project() {
        let templates = corpus();
        fs::write(
            templates.path().join("template.yaml"),
            "name: Test\ncolors_module: ../../escaped-colors.ts\n",
        )
        .unwrap();
        let err = Materializer::from_corpus(templates.path()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Template);

        let out = tempfile::tempdir().unwrap();
        let dest = out.path().join("work/app");
        for colors_module in ["../../escaped-colors.ts", "/tmp/escaped-colors.ts", "src/../.."] {
            let options = MaterializeOptions {
                colors_module: PathBuf::from(colors_module),
                ..MaterializeOptions::default()
            };
            let materializer = Materializer::new(templates.path()).with_options(options);

            let err = materializer.materialize_atomic(&dest, &answers()).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::Template, "{colors_module}");
            let err = materializer.materialize(&dest, &answers()).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::Template, "{colors_module}");
        }
        assert_eq!(fs::read_dir(out.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_empty_suffix_rejected() {
        let templates = corpus();
        fs::write(templates.path().join("template.yaml"), "name: Test\nsuffix: \"\"\n").unwrap();
        let err = Materializer::from_corpus(templates.path()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Template);
        assert!(MaterializeOptions {
            suffix: String::new(),
            ..MaterializeOptions::default()
        }
        .validate()
        .is_err());
    }

    #[test]
    fn test_non_utf8_template_copied_byte_for_byte() {
        let templates = tempfile::tempdir().unwrap();
        fs::write(
            templates.path().join("icon.bin.template"),
            b"\x89PNG\xff{{APP_NAME}}\x00\xfe",
        )
        .unwrap();
        let out = tempfile::tempdir().unwrap();
        let dest = out.path().join("app");

        materialize(&dest, &answers(), templates.path()).unwrap();
        assert_eq!(
            fs::read(dest.join("icon.bin")).unwrap(),
            b"\x89PNG\xffFoo Bar\x00\xfe".to_vec()
        );
    }
}

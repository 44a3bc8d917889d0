//! Expo Create - Project scaffolding for Expo Router apps

use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::Colorize;
use rust_embed::RustEmbed;
use scaffolder_core::tui::CreateArgs;
use scaffolder_core::{AnswerRecord, BundledCorpus, CorpusDir, ProductConfig};
use std::path::{Path, PathBuf};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// CLI version
pub const CLI_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Expo Router template corpus
#[derive(RustEmbed)]
#[folder = "templates/expo/"]
struct ExpoTemplates;

/// Expo product configuration
#[derive(Clone)]
pub struct ExpoConfig;

impl ProductConfig for ExpoConfig {
    fn name(&self) -> &'static str {
        "expo-create"
    }

    fn display_name(&self) -> &'static str {
        "Expo Create"
    }

    fn bundled_corpus(&self) -> scaffolder_core::Result<BundledCorpus> {
        BundledCorpus::extract::<ExpoTemplates>()
    }

    fn docs_url(&self) -> &'static str {
        "https://docs.expo.dev/router/introduction/"
    }

    fn upgrade_command(&self) -> &'static str {
        "cargo install expo-create --force"
    }

    fn next_steps(&self, dir: &Path, answers: &AnswerRecord) -> Vec<String> {
        let mut steps = Vec::new();
        let current = std::env::current_dir().ok();

        // Step 1: cd to directory if not current
        if current.as_deref() != Some(dir) {
            let shown = current
                .as_deref()
                .and_then(|c| dir.strip_prefix(c).ok())
                .unwrap_or(dir);
            steps.push(format!("cd {}", shown.display()));
        }

        // Step 2: Install dependencies
        steps.push("npm install".to_string());

        // Step 3: Link the EAS project if no id was given
        if answers.eas_project_id.is_empty() {
            steps.push("npx eas-cli init  # links the project and fills in the EAS project id".to_string());
        }

        // Step 4: Start the app
        steps.push("npm run ios  # or npm run android".to_string());

        steps
    }
}

#[derive(Parser, Debug)]
#[command(name = "expo-create")]
#[command(about = "Scaffold a production-ready Expo app with Expo Router and React Query")]
#[command(version)]
#[command(args_conflicts_with_subcommands = true)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Command>,

    #[command(flatten)]
    pub create: CliCreateArgs,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create a new Expo project
    Create(CliCreateArgs),
    /// List the template corpus and the files it generates (for development use)
    Templates(TemplatesArgs),
    /// Print the colors module derived from a primary color
    Palette(PaletteArgs),
}

#[derive(Parser, Debug, Default)]
pub struct CliCreateArgs {
    /// Name of the project directory to create
    pub project_name: Option<String>,

    /// Local directory to use for templates instead of the bundled corpus
    #[arg(long = "template-dir")]
    pub template_dir: Option<PathBuf>,

    /// Read answers from a YAML or JSON file instead of prompting
    #[arg(short, long)]
    pub answers: Option<PathBuf>,
}

impl From<CliCreateArgs> for CreateArgs {
    fn from(args: CliCreateArgs) -> Self {
        CreateArgs {
            project_name: args.project_name,
            template_dir: args.template_dir,
            answers_file: args.answers,
        }
    }
}

#[derive(Parser, Debug)]
pub struct TemplatesArgs {
    /// Local directory containing the template corpus
    #[arg(long = "template-dir")]
    pub template_dir: Option<PathBuf>,
}

#[derive(Parser, Debug)]
pub struct PaletteArgs {
    /// Primary color as hex, e.g. #2563eb
    pub color: String,
}

/// Initialize tracing with appropriate verbosity
fn init_tracing(verbose: u8) {
    let filter = match verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn run_create(config: &ExpoConfig, args: CreateArgs) -> Result<()> {
    let result = scaffolder_core::run(config, args, CLI_VERSION);

    // Ensure cursor is visible on normal exit
    let _ = console::Term::stderr().show_cursor();

    result
}

fn main() -> Result<()> {
    // Ensure terminal cursor is restored on panic
    let default_panic = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = console::Term::stderr().show_cursor();
        default_panic(info);
    }));

    // Handle Ctrl+C gracefully
    ctrlc::set_handler(move || {
        let _ = console::Term::stderr().show_cursor();
        std::process::exit(130);
    })
    .ok();

    let args = Args::parse();
    init_tracing(args.verbose);
    let config = ExpoConfig;

    match args.command {
        Some(Command::Create(create_args)) => run_create(&config, create_args.into()),
        Some(Command::Templates(templates_args)) => {
            let corpus = match templates_args.template_dir {
                Some(dir) => CorpusDir::Local(dir),
                None => CorpusDir::Bundled(config.bundled_corpus()?),
            };
            scaffolder_core::templates::print_corpus(corpus.path())?;
            Ok(())
        }
        Some(Command::Palette(palette_args)) => {
            if scaffolder_core::palette::Rgb::from_hex(&palette_args.color).is_none() {
                eprintln!(
                    "{} '{}' is not a hex color, showing the fallback palette",
                    "Warning:".yellow(),
                    palette_args.color
                );
            }
            let palette = scaffolder_core::derive_palette(&palette_args.color);
            print!("{}", scaffolder_core::render_palette_module(&palette));
            Ok(())
        }
        // No subcommand provided, default to create behavior
        None => run_create(&config, args.create.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_bare_project_name_creates() {
        let args = Args::try_parse_from(["expo-create", "my-app"]).unwrap();
        assert!(args.command.is_none());
        assert_eq!(args.create.project_name.as_deref(), Some("my-app"));
    }

    #[test]
    fn test_create_subcommand_with_answers() {
        let args = Args::try_parse_from([
            "expo-create",
            "create",
            "my-app",
            "--answers",
            "answers.yaml",
            "-vv",
        ])
        .unwrap();
        assert_eq!(args.verbose, 2);
        match args.command {
            Some(Command::Create(create)) => {
                assert_eq!(create.project_name.as_deref(), Some("my-app"));
                assert_eq!(create.answers, Some(PathBuf::from("answers.yaml")));
            }
            other => panic!("expected create, got {other:?}"),
        }
    }

    #[test]
    fn test_bundled_corpus_is_self_contained() {
        let corpus = ExpoConfig.bundled_corpus().unwrap();
        assert!(!corpus.path().starts_with(env!("CARGO_MANIFEST_DIR")));
        assert!(corpus.path().join("template.yaml").is_file());
        assert!(corpus.path().join("src/constants/.gitkeep.template").is_file());

        let files = scaffolder_core::list_template_files(corpus.path()).unwrap();
        assert_eq!(files.len(), ExpoTemplates::iter().count() - 1);

        let manifest = scaffolder_core::CorpusManifest::load(corpus.path())
            .unwrap()
            .unwrap();
        assert!(manifest.version.is_some());
    }

    #[test]
    fn test_bundled_corpus_materializes() {
        let corpus = ExpoConfig.bundled_corpus().unwrap();
        let out = tempfile::tempdir().unwrap();
        let dest = out.path().join("foo-bar");
        let answers = AnswerRecord::from_yaml_str(
            "appName: Foo Bar\nappSlug: foo-bar\nversion: 1.0.0\nbundleIdentifier: com.foobar.app\n\
             appleId: a@b.c\nteamId: ABCDE12345\nsupportsTablet: true\npackageName: com.foobar.app\n\
             versionCode: \"1\"\nprimaryColor: \"#2563eb\"\n",
        )
        .unwrap();

        scaffolder_core::Materializer::from_corpus(corpus.path())
            .unwrap()
            .materialize_atomic(&dest, &answers)
            .unwrap();
        assert!(dest.join("app.json").is_file());
        assert!(dest.join("src/constants/colors.ts").is_file());
    }

    #[test]
    fn test_next_steps_mentions_eas_init_without_project_id() {
        let answers: AnswerRecord = AnswerRecord::from_yaml_str(
            "appName: A\nappSlug: a\nversion: 1.0.0\nbundleIdentifier: com.a.app\nappleId: a@b.c\n\
             teamId: ABCDE12345\nsupportsTablet: true\npackageName: com.a.app\nversionCode: \"1\"\n\
             primaryColor: \"#2563eb\"\n",
        )
        .unwrap();
        let steps = ExpoConfig.next_steps(Path::new("/nonexistent/a"), &answers);
        assert!(steps.iter().any(|s| s.contains("eas-cli init")));
        assert_eq!(steps.last().map(String::as_str), Some("npm run ios  # or npm run android"));
    }
}

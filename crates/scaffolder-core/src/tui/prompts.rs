//! Charm-style CLI prompts using cliclack

use crate::answers::{
    validate_project_name, AnswerRecord, AnswerValue, AnswerValues, Permission, Question,
    QuestionKind, QUESTIONS,
};
use crate::generator::{check_destination, Materializer};
use crate::product::ProductConfig;
use crate::templates::{version, CorpusDir, CorpusManifest};
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// CLI arguments for the create command
#[derive(Debug, Clone, Default)]
pub struct CreateArgs {
    /// Project directory name, prompted for when absent
    pub project_name: Option<String>,

    /// Local template corpus to use instead of the product default
    pub template_dir: Option<PathBuf>,

    /// Answers file (YAML or JSON) that replaces the interactive questions
    pub answers_file: Option<PathBuf>,
}

/// Run the CLI with interactive prompts
pub fn run<C: ProductConfig>(config: &C, args: CreateArgs, cli_version: &str) -> Result<()> {
    cliclack::intro(config.display_name())?;
    tracing::debug!(product = config.name(), version = cli_version, "starting create flow");

    // Step 1: Project name and destination
    let project_name = select_project_name(&args)?;
    let project_dir = resolve_directory(&project_name)?;

    // Step 2: Template corpus (kept alive until the project is written)
    let corpus = resolve_corpus(config, &args)?;
    let materializer = setup_materializer(config, &corpus, cli_version)?;

    // Step 3: Answers
    let answers = match &args.answers_file {
        Some(path) => load_answers(path)?,
        None => prompt_answers(&project_name)?,
    };

    // Step 4: Create project
    create_project(&materializer, &project_dir, &answers)?;

    // Step 5: Show next steps
    print_next_steps(config, &project_dir, &answers)?;

    Ok(())
}

fn select_project_name(args: &CreateArgs) -> Result<String> {
    let name = match &args.project_name {
        Some(name) => name.clone(),
        None => cliclack::input("Project name")
            .placeholder("my-app")
            .validate(|input: &String| {
                validate_project_name(input)
                    .map_err(|_| "Project name must be alphanumeric with hyphens only")
            })
            .interact()?,
    };

    validate_project_name(&name)?;
    Ok(name)
}

fn resolve_directory(project_name: &str) -> Result<PathBuf> {
    let current_dir = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let path = current_dir.join(project_name);

    check_destination(&path).with_context(|| {
        format!("Choose another project name or remove \"{}\"", project_name)
    })?;

    cliclack::log::info(format!("Creating project in {}", path.display()))?;
    Ok(path)
}

fn resolve_corpus<C: ProductConfig>(config: &C, args: &CreateArgs) -> Result<CorpusDir> {
    match &args.template_dir {
        Some(path) => {
            cliclack::log::info(format!("Using local templates from {}", path.display()))?;
            Ok(CorpusDir::Local(path.clone()))
        }
        None => Ok(CorpusDir::Bundled(
            config
                .bundled_corpus()
                .context("Failed to unpack bundled templates")?,
        )),
    }
}

fn setup_materializer<C: ProductConfig>(
    config: &C,
    corpus: &CorpusDir,
    cli_version: &str,
) -> Result<Materializer> {
    let template_dir = corpus.path();

    if let Some(manifest) = CorpusManifest::load(template_dir)? {
        cliclack::log::info(format!(
            "Template: {} - {}",
            manifest.name, manifest.description
        ))?;

        // Check version compatibility
        if let Some(warning) = manifest.version.as_deref().and_then(|v| {
            version::check_compatibility(cli_version, v, config.upgrade_command())
        }) {
            cliclack::log::warning(format!(
                "Version warning: {}",
                warning.lines().next().unwrap_or(&warning)
            ))?;
        }
    }

    Materializer::from_corpus(template_dir).context("Failed to load template corpus")
}

fn load_answers(path: &Path) -> Result<AnswerRecord> {
    let answers = AnswerRecord::from_file(path)?;
    answers
        .validate()
        .with_context(|| format!("Invalid answers in {}", path.display()))?;
    cliclack::log::info(format!("Using answers from {}", path.display()))?;
    Ok(answers)
}

fn prompt_answers(project_name: &str) -> Result<AnswerRecord> {
    cliclack::log::info("Let's gather some information about your app")?;

    let mut values = AnswerValues::new();
    for question in QUESTIONS {
        let value = ask(question, project_name, &values)?;
        values.insert(question.key.to_string(), value);
    }

    Ok(AnswerRecord::from_values(&values)?)
}

fn ask(question: &'static Question, project_name: &str, values: &AnswerValues) -> Result<AnswerValue> {
    let value = match question.kind {
        QuestionKind::Text { optional, .. } => {
            let mut input = cliclack::input(question.prompt).required(!optional);
            if let Some(default) = question.default_text(project_name, values) {
                input = input.placeholder(&default).default_input(&default);
            }
            let answer: String = input
                .validate(move |input: &String| question.check(input))
                .interact()?;
            AnswerValue::Text(answer)
        }
        QuestionKind::Confirm { default } => AnswerValue::Flag(
            cliclack::confirm(question.prompt)
                .initial_value(default)
                .interact()?,
        ),
        QuestionKind::Permissions => {
            let mut multi = cliclack::multiselect(question.prompt);
            for permission in Permission::ALL {
                multi = multi.item(permission, permission.display_name(), "");
            }
            let selected: Vec<Permission> = multi.required(false).interact()?;
            AnswerValue::Permissions(selected.into_iter().collect())
        }
    };
    Ok(value)
}

fn create_project(materializer: &Materializer, project_dir: &Path, answers: &AnswerRecord) -> Result<()> {
    let spinner = cliclack::spinner();
    spinner.start("Generating project structure...");

    match materializer.materialize_atomic(project_dir, answers) {
        Ok(project) => {
            spinner.stop(format!(
                "Created {} files in {}",
                project.files.len(),
                project_dir.display()
            ));
            Ok(())
        }
        Err(e) => {
            spinner.stop("Project generation failed");
            cliclack::log::error(format!("{}", e))?;
            Err(e.into())
        }
    }
}

fn print_next_steps<C: ProductConfig>(
    config: &C,
    project_dir: &Path,
    answers: &AnswerRecord,
) -> Result<()> {
    let steps = config.next_steps(project_dir, answers);

    println!();
    println!("  Next steps");
    println!();

    for (i, step) in steps.iter().enumerate() {
        println!("  {}.  {}", i + 1, step);
    }

    println!();
    println!("  Docs: {}", config.docs_url());

    cliclack::outro("Happy coding!")?;

    Ok(())
}

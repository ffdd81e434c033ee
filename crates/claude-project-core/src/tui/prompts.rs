//! Charm-style CLI prompts using cliclack

use super::wizard::{Answers, Prompter, Wizard, WizardSeed};
use crate::config::{self, TemplateSource};
use crate::paths::{directory_entry_count, resolve_project_path};
use crate::registry::{FeatureKey, PresetDefinition, PresetKey, Registry};
use crate::runtime::{PackageManager, ProcessRunner};
use crate::scaffold::{ScaffoldReport, ScaffoldRequest, Scaffolder, StepOutcome};
use crate::validate::{validate_project_name, NameError};
use anyhow::{Context, Result};
use colored::Colorize;
use std::io;
use std::path::PathBuf;
use std::sync::Arc;

/// CLI arguments for the create command
#[derive(Debug, Clone, Default)]
pub struct CreateArgs {
    /// Project name (prompted if absent)
    pub name: Option<String>,

    /// Preset (prompted if absent)
    pub preset: Option<PresetKey>,

    /// Features (prompted if absent)
    pub features: Option<Vec<FeatureKey>>,

    /// Skip dependency installation
    pub skip_install: bool,

    /// Skip git initialization
    pub skip_git: bool,

    /// Auto-confirm (non-interactive mode)
    pub yes: bool,

    /// Directory overriding the bundled base files
    pub template_dir: Option<PathBuf>,

    /// Package manager override (detected if absent)
    pub package_manager: Option<PackageManager>,
}

/// How an invocation ended without error
#[derive(Debug)]
pub enum RunOutcome {
    Created(ScaffoldReport),
    Cancelled,
}

/// Map a prompt interruption (Esc / Ctrl-C) to `None`
fn cancellable<T>(result: io::Result<T>) -> io::Result<Option<T>> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(e) if e.kind() == io::ErrorKind::Interrupted => Ok(None),
        Err(e) => Err(e),
    }
}

/// [`Prompter`] backed by cliclack
pub struct ClackPrompter;

impl Prompter for ClackPrompter {
    fn project_name(&mut self) -> io::Result<Option<String>> {
        cancellable(
            cliclack::input("What is your project named?")
                .placeholder("my-awesome-app")
                .validate(|input: &String| validate_project_name(input).map_err(|e| e.to_string()))
                .interact(),
        )
    }

    fn preset(&mut self, registry: &Registry, initial: PresetKey) -> io::Result<Option<PresetKey>> {
        let mut select = cliclack::select("Choose your project type:");
        for (key, preset) in registry.presets() {
            select = select.item(key, &preset.name, &preset.hint);
        }

        cancellable(select.initial_value(initial).interact())
    }

    fn features(&mut self, registry: &Registry) -> io::Result<Option<Vec<FeatureKey>>> {
        let mut multi = cliclack::multiselect("Select additional features:");
        for (key, feature) in registry.features() {
            multi = multi.item(key, &feature.label, &feature.hint);
        }

        cancellable(multi.required(false).interact())
    }

    fn confirm_create(&mut self, name: &str, preset: &PresetDefinition) -> io::Result<Option<bool>> {
        cancellable(
            cliclack::confirm(format!(
                "Create project \"{}\" with {}?",
                name.cyan(),
                preset.name.green()
            ))
            .initial_value(true)
            .interact(),
        )
    }

    fn rejected_name(&mut self, error: &NameError) -> io::Result<()> {
        cliclack::log::warning(error)
    }
}

/// Run the CLI with interactive prompts
pub async fn run(args: CreateArgs) -> Result<RunOutcome> {
    let registry = Arc::new(Registry::builtin().context("Failed to load preset registry")?);
    let template_source = config::resolve_template_source(args.template_dir.as_deref())?;
    tracing::debug!(source = %template_source.describe(), "using template source");

    cliclack::intro("Create Claude Project".cyan().bold())?;

    // Step 1: Collect answers
    let seed = WizardSeed {
        name: args.name.clone(),
        preset: args.preset,
        features: args.features.clone(),
        yes: args.yes,
    };
    let Some(answers) = Wizard::new(&registry, seed).run(&mut ClackPrompter)? else {
        cliclack::outro_cancel("Operation cancelled")?;
        return Ok(RunOutcome::Cancelled);
    };

    // Step 2: Resolve destination
    let project_path =
        resolve_project_path(&answers.name).context("Failed to resolve project directory")?;
    warn_if_not_empty(&project_path)?;

    // Step 3: Create project
    let report = create_project(registry, template_source, &args, answers, project_path).await?;

    if let StepOutcome::SoftFailed(reason) = &report.git {
        cliclack::log::warning(format!("Could not initialize git repository: {}", reason))?;
    }

    // Step 4: Show next steps
    print_next_steps(&args, &report)?;

    Ok(RunOutcome::Created(report))
}

fn warn_if_not_empty(path: &std::path::Path) -> Result<()> {
    let count = directory_entry_count(path);
    if count > 0 {
        cliclack::log::warning(format!(
            "{} already has {} existing items; generated files will be overwritten",
            path.display(),
            count
        ))?;
    }
    Ok(())
}

async fn create_project(
    registry: Arc<Registry>,
    template_source: TemplateSource,
    args: &CreateArgs,
    answers: Answers,
    project_path: PathBuf,
) -> Result<ScaffoldReport> {
    let request = ScaffoldRequest::new(answers.name, project_path, answers.preset)?
        .with_features(answers.features)
        .skip_git(args.skip_git)
        .skip_install(args.skip_install);

    let scaffolder = Scaffolder::new(registry, ProcessRunner)
        .with_template_source(template_source)
        .with_package_manager(package_manager(args));

    let spinner = cliclack::spinner();
    spinner.start("Creating project structure...");

    match scaffolder.scaffold(request).await {
        Ok(report) => {
            spinner.stop("Project created successfully!");
            Ok(report)
        }
        Err(e) => {
            spinner.stop("Error creating project");
            Err(e.into())
        }
    }
}

fn package_manager(args: &CreateArgs) -> PackageManager {
    args.package_manager.unwrap_or_else(PackageManager::detect)
}

/// Commands the user should run next
pub fn next_steps(project_name: &str, pm: PackageManager, installed: bool) -> Vec<String> {
    let mut steps = vec![format!("cd {}", project_name)];
    if !installed {
        steps.push(pm.install_command());
    }
    steps.push(pm.run_dev_command());
    steps
}

fn print_next_steps(args: &CreateArgs, report: &ScaffoldReport) -> Result<()> {
    let name = report
        .path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| report.path.display().to_string());
    let installed = report.install == StepOutcome::Completed;

    let steps = next_steps(&name, package_manager(args), installed)
        .into_iter()
        .map(|step| match step.split_once(' ') {
            Some((program, rest)) => format!("{} {}", program.cyan(), rest),
            None => step.cyan().to_string(),
        })
        .collect::<Vec<_>>()
        .join("\n");

    cliclack::note("Next steps", steps)?;
    cliclack::outro(format!(
        "{} Your project is ready! {}",
        "✓".green(),
        "Start building with Claude.".dimmed()
    ))?;

    Ok(())
}

/// Print a fatal error the way the rest of the session is rendered
pub fn report_error(err: &anyhow::Error) {
    let _ = cliclack::outro_cancel(format!("{:#}", err).red());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next_steps_before_install() {
        assert_eq!(
            next_steps("my-app", PackageManager::Npm, false),
            vec!["cd my-app", "npm install", "npm run dev"]
        );
    }

    #[test]
    fn test_next_steps_after_install() {
        assert_eq!(
            next_steps("my-app", PackageManager::Pnpm, true),
            vec!["cd my-app", "pnpm run dev"]
        );
    }

    #[test]
    fn test_interrupted_prompt_is_a_cancel() {
        let interrupted: io::Result<bool> = Err(io::Error::from(io::ErrorKind::Interrupted));
        assert!(cancellable(interrupted).unwrap().is_none());

        let broken: io::Result<bool> = Err(io::Error::from(io::ErrorKind::BrokenPipe));
        assert!(cancellable(broken).is_err());

        assert_eq!(cancellable(Ok(3)).unwrap(), Some(3));
    }

    #[test]
    fn test_package_manager_override() {
        let args = CreateArgs {
            package_manager: Some(PackageManager::Bun),
            ..Default::default()
        };
        assert_eq!(package_manager(&args), PackageManager::Bun);
    }
}

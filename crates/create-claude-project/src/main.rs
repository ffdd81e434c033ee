//! create-claude-project - scaffold a new project with Claude Code Sidekick

mod logging;

use claude_project_core::tui::{CreateArgs, RunOutcome};
use claude_project_core::{FeatureKey, PackageManager, PresetKey};
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(name = "create-claude-project")]
#[command(about = "Create a new project with Claude Code Sidekick")]
#[command(version)]
pub struct Args {
    /// Name of the project
    pub project_name: Option<String>,

    /// Project preset
    #[arg(short, long, value_enum)]
    pub preset: Option<PresetKey>,

    /// Additional features (comma-separated: database,auth,analytics,deployment,440css)
    #[arg(short, long, value_enum, value_delimiter = ',')]
    pub features: Option<Vec<FeatureKey>>,

    /// Skip dependency installation
    #[arg(long = "skip-install")]
    pub skip_install: bool,

    /// Skip git initialization
    #[arg(long = "skip-git")]
    pub skip_git: bool,

    /// Auto-confirm all prompts (non-interactive mode)
    #[arg(short, long)]
    pub yes: bool,

    /// Directory overriding the bundled base files (.claude/, .gitignore, README.md)
    #[arg(long = "template-dir")]
    pub template_dir: Option<PathBuf>,

    /// Package manager used to install dependencies (detected if omitted)
    #[arg(long = "package-manager", value_enum)]
    pub package_manager: Option<PackageManager>,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Only log errors
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}

impl From<Args> for CreateArgs {
    fn from(args: Args) -> Self {
        CreateArgs {
            name: args.project_name,
            preset: args.preset,
            features: args.features,
            skip_install: args.skip_install,
            skip_git: args.skip_git,
            yes: args.yes,
            template_dir: args.template_dir,
            package_manager: args.package_manager,
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
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

    if let Err(e) = logging::init(args.verbose, args.quiet) {
        eprintln!("{:#}", e);
    }

    let result = claude_project_core::run(args.into()).await;

    // Ensure cursor is visible on normal exit
    let _ = console::Term::stderr().show_cursor();

    match result {
        Ok(RunOutcome::Created(report)) => {
            tracing::info!(path = %report.path.display(), "project created");
            ExitCode::SUCCESS
        }
        Ok(RunOutcome::Cancelled) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::debug!(error = ?e, "scaffolding failed");
            claude_project_core::tui::report_error(&e);
            ExitCode::FAILURE
        }
    }
}

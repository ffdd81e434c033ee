//! Git repository bootstrap

use super::command::CommandRunner;
use crate::scaffold::StepOutcome;
use std::path::Path;

/// Message used for the first commit of every generated project
pub const INITIAL_COMMIT_MESSAGE: &str = "Initial commit from create-claude-project";

/// `git init`, `git add .`, `git commit` inside `dir`.
///
/// Stops at the first failing command. Failures are reported as
/// [`StepOutcome::SoftFailed`]; a missing git binary or identity must not fail
/// project creation.
pub async fn bootstrap_repository<R: CommandRunner>(runner: &R, dir: &Path) -> StepOutcome {
    let steps: [&[&str]; 3] = [
        &["init"],
        &["add", "."],
        &["commit", "-m", INITIAL_COMMIT_MESSAGE],
    ];

    for args in steps {
        if let Err(e) = runner.run("git", args, dir).await {
            tracing::warn!(error = %e, "could not initialize git repository");
            return StepOutcome::SoftFailed(e.to_string());
        }
    }

    tracing::info!(dir = %dir.display(), "initialized git repository");
    StepOutcome::Completed
}

//! Test doubles shared by unit tests

use crate::runtime::command::{display_command, CommandError, CommandRunner};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Records every command and fails those whose command line starts with one
/// of the configured prefixes.
#[derive(Debug, Default)]
pub struct ScriptedRunner {
    failing: Vec<String>,
    calls: Mutex<Vec<(String, PathBuf)>>,
}

impl ScriptedRunner {
    pub fn failing(prefixes: &[&str]) -> Self {
        Self {
            failing: prefixes.iter().map(|p| p.to_string()).collect(),
            calls: Mutex::default(),
        }
    }

    /// Command lines run so far
    pub fn commands(&self) -> Vec<String> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .map(|(command, _)| command.clone())
            .collect()
    }

    pub fn working_dirs(&self) -> Vec<PathBuf> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .map(|(_, cwd)| cwd.clone())
            .collect()
    }
}

impl CommandRunner for ScriptedRunner {
    async fn run(&self, program: &str, args: &[&str], cwd: &Path) -> Result<(), CommandError> {
        let command = display_command(program, args);
        self.calls
            .lock()
            .unwrap()
            .push((command.clone(), cwd.to_path_buf()));

        if self.failing.iter().any(|prefix| command.starts_with(prefix)) {
            return Err(CommandError::Failed {
                command,
                code: 1,
                stderr: "scripted failure".to_string(),
            });
        }
        Ok(())
    }
}

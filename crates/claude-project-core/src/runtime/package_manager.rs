//! Package manager detection

use std::fmt;

/// Environment variable npm-compatible launchers set for child processes
pub const USER_AGENT_ENV: &str = "npm_config_user_agent";

/// Supported JavaScript package managers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum PackageManager {
    #[default]
    Npm,
    Yarn,
    Pnpm,
    Bun,
}

impl PackageManager {
    /// Detect from the process environment, defaulting to npm
    pub fn detect() -> Self {
        Self::from_user_agent(std::env::var(USER_AGENT_ENV).ok().as_deref())
    }

    /// Detect from an `npm_config_user_agent` value such as `pnpm/9.1.0 npm/? node/v20`
    pub fn from_user_agent(user_agent: Option<&str>) -> Self {
        match user_agent {
            Some(ua) if ua.starts_with("yarn") => PackageManager::Yarn,
            Some(ua) if ua.starts_with("pnpm") => PackageManager::Pnpm,
            Some(ua) if ua.starts_with("bun") => PackageManager::Bun,
            _ => PackageManager::Npm,
        }
    }

    pub fn program(&self) -> &'static str {
        match self {
            PackageManager::Npm => "npm",
            PackageManager::Yarn => "yarn",
            PackageManager::Pnpm => "pnpm",
            PackageManager::Bun => "bun",
        }
    }

    /// Arguments for installing dependencies
    pub fn install_args(&self) -> &'static [&'static str] {
        match self {
            PackageManager::Yarn => &[],
            _ => &["install"],
        }
    }

    /// Full install command line, e.g. `pnpm install`
    pub fn install_command(&self) -> String {
        super::command::display_command(self.program(), self.install_args())
    }

    /// Command line that starts the dev server
    pub fn run_dev_command(&self) -> String {
        format!("{} run dev", self.program())
    }
}

impl fmt::Display for PackageManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program())
    }
}

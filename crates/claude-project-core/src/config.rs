//! Locating the base files shipped with the tool

use include_dir::{include_dir, Dir};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Environment variable overriding the base-file directory
pub const TEMPLATE_DIR_ENV: &str = "CREATE_CLAUDE_PROJECT_TEMPLATE_DIR";

/// Base files compiled into the binary
pub static BUNDLED_TEMPLATES: Dir<'static> =
    include_dir!("$CARGO_MANIFEST_DIR/templates/base");

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Template directory {} (from {origin}) does not exist or is not a directory", .path.display())]
    MissingTemplateDir { path: PathBuf, origin: &'static str },
}

/// Where base files and feature files are copied from
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TemplateSource {
    /// Files embedded at build time
    #[default]
    Bundled,
    /// A directory on disk overriding the bundled files
    Directory(PathBuf),
}

impl TemplateSource {
    pub fn describe(&self) -> String {
        match self {
            TemplateSource::Bundled => "bundled templates".to_string(),
            TemplateSource::Directory(dir) => dir.display().to_string(),
        }
    }
}

/// Resolve where base files are copied from.
///
/// First match wins: explicit flag, environment variable, then the bundled
/// files. An override that does not name an existing directory is an error.
pub fn resolve_template_source(explicit: Option<&Path>) -> Result<TemplateSource, ConfigError> {
    let env = std::env::var_os(TEMPLATE_DIR_ENV).filter(|v| !v.is_empty());
    resolve_from(explicit, env.as_deref().map(Path::new))
}

fn resolve_from(
    explicit: Option<&Path>,
    env: Option<&Path>,
) -> Result<TemplateSource, ConfigError> {
    let (dir, origin) = match (explicit, env) {
        (Some(dir), _) => (dir, "--template-dir"),
        (None, Some(dir)) => (dir, TEMPLATE_DIR_ENV),
        (None, None) => return Ok(TemplateSource::Bundled),
    };

    if !dir.is_dir() {
        return Err(ConfigError::MissingTemplateDir {
            path: dir.to_path_buf(),
            origin,
        });
    }

    Ok(TemplateSource::Directory(dir.to_path_buf()))
}

//! Project name validation
//!
//! The accepted character set doubles as the package.json `name` constraint, so
//! uppercase letters are rejected everywhere, scoped names included.

use regex::Regex;
use std::sync::LazyLock;
use thiserror::Error;

/// Longest accepted project name
pub const MAX_NAME_LENGTH: usize = 214;

/// Names that collide with tooling or VCS directories
pub const RESERVED_NAMES: &[&str] = &["node_modules", "favicon.ico", ".git", ".github", ".claude"];

static NAME_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[@a-z0-9\-~][a-z0-9\-._~]*$").expect("valid name pattern"));

/// Why a project name was rejected
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NameError {
    #[error("Project name is required")]
    Required,

    #[error("Project name must be at most {MAX_NAME_LENGTH} characters")]
    TooLong,

    #[error("Project name can only contain lowercase letters, numbers, hyphens, dots, underscores and tildes")]
    InvalidCharacters,

    #[error("\"{0}\" is a reserved name")]
    Reserved(String),
}

/// Validate a project name. The first failing rule wins.
pub fn validate_project_name(name: &str) -> Result<(), NameError> {
    if name.trim().is_empty() {
        return Err(NameError::Required);
    }

    // Measured in UTF-16 code units, the unit npm uses for this limit
    if name.encode_utf16().count() > MAX_NAME_LENGTH {
        return Err(NameError::TooLong);
    }

    if !NAME_PATTERN.is_match(name) {
        return Err(NameError::InvalidCharacters);
    }

    if RESERVED_NAMES.contains(&name) {
        return Err(NameError::Reserved(name.to_string()));
    }

    Ok(())
}

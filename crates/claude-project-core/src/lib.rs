//! Claude Project Core - scaffolding library behind `create-claude-project`
//!
//! This library turns a validated answer set (project name, preset, features)
//! into a new project directory: support files, a starter document, a
//! package.json, an environment template, and optionally a git repository and
//! installed dependencies.
//!
//! # Architecture
//!
//! - **Registry** - Immutable preset/feature metadata loaded from embedded YAML
//! - **Validation & paths** - Pure project-name checks and destination resolution
//! - **Scaffold** - The sequential pipeline, generic over a [`CommandRunner`]
//! - **TUI** - Optional cliclack-based wizard (feature-gated)
//!
//! # Feature Flags
//!
//! - `tui` (default): Enables the cliclack-based interactive front-end
//!
//! # Example Usage (without TUI)
//!
//! ```ignore
//! use claude_project_core::{PresetKey, ProcessRunner, Registry, ScaffoldRequest, Scaffolder};
//! use std::sync::Arc;
//!
//! let registry = Arc::new(Registry::builtin()?);
//! let path = claude_project_core::resolve_project_path("my-app")?;
//! let request = ScaffoldRequest::new("my-app", path, PresetKey::Static)?
//!     .skip_install(true);
//! let report = Scaffolder::new(registry, ProcessRunner).scaffold(request).await?;
//! ```

pub mod config;
pub mod paths;
pub mod registry;
pub mod runtime;
pub mod scaffold;
pub mod validate;

#[cfg(feature = "tui")]
pub mod tui;

#[cfg(test)]
pub(crate) mod testing;

// Re-export main types for convenience
pub use config::TemplateSource;
pub use paths::{directory_entry_count, resolve_project_path, resolve_project_path_from};
pub use registry::{FeatureDefinition, FeatureKey, PresetDefinition, PresetKey, Registry};
pub use runtime::{CommandRunner, PackageManager, ProcessRunner};
pub use scaffold::{ScaffoldError, ScaffoldReport, ScaffoldRequest, Scaffolder, StepOutcome};
pub use validate::{validate_project_name, NameError};

#[cfg(feature = "tui")]
pub use tui::run;

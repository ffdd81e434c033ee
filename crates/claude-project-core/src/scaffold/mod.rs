//! Project scaffolding
//!
//! [`Scaffolder::scaffold`] materializes a project directory from a
//! [`ScaffoldRequest`]. Steps run strictly in sequence:
//!
//! 1. create the destination directory
//! 2. stage base files (and feature files) from the template source
//! 3. render `PROJECT_STARTER.md`
//! 4. render `package.json`
//! 5. render `.env.example`
//! 6. bootstrap a git repository (soft failure)
//! 7. install dependencies (hard failure)
//!
//! Scaffolding is not transactional: files written before a fatal error stay
//! on disk.

pub mod copier;
pub mod env_file;
pub mod manifest;
pub mod starter;

use crate::config::TemplateSource;
use crate::registry::{FeatureDefinition, FeatureKey, PresetKey, Registry, RegistryError};
use crate::runtime::command::{CommandError, CommandRunner};
use crate::runtime::{git, PackageManager};
use crate::validate::{validate_project_name, NameError};
use indexmap::IndexSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;
use tokio::fs;

pub use manifest::PackageManifest;

/// Fatal scaffolding failures
#[derive(Debug, Error)]
pub enum ScaffoldError {
    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error("Failed to create project directory {}: {source}", .path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to copy {} to {}: {source}", .from.display(), .to.display())]
    Copy {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to serialize package.json: {0}")]
    Manifest(#[from] serde_json::Error),

    #[error("Failed to install dependencies: {0}")]
    Install(#[source] CommandError),
}

/// Result of an optional step
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepOutcome {
    Completed,
    Skipped,
    /// The step failed but scaffolding continued
    SoftFailed(String),
}

/// A validated request to create one project
#[derive(Debug, Clone)]
pub struct ScaffoldRequest {
    name: String,
    path: PathBuf,
    preset: PresetKey,
    features: IndexSet<FeatureKey>,
    skip_git: bool,
    skip_install: bool,
}

impl ScaffoldRequest {
    /// Create a request. Fails if `name` is not a valid project name.
    pub fn new(
        name: impl Into<String>,
        path: impl Into<PathBuf>,
        preset: PresetKey,
    ) -> Result<Self, NameError> {
        let name = name.into();
        validate_project_name(&name)?;

        Ok(Self {
            name,
            path: path.into(),
            preset,
            features: IndexSet::new(),
            skip_git: false,
            skip_install: false,
        })
    }

    /// Add features in selection order; duplicates are ignored
    pub fn with_features(mut self, features: impl IntoIterator<Item = FeatureKey>) -> Self {
        self.features.extend(features);
        self
    }

    pub fn skip_git(mut self, skip: bool) -> Self {
        self.skip_git = skip;
        self
    }

    pub fn skip_install(mut self, skip: bool) -> Self {
        self.skip_install = skip;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn preset(&self) -> PresetKey {
        self.preset
    }

    pub fn features(&self) -> &IndexSet<FeatureKey> {
        &self.features
    }
}

/// What a successful scaffold produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScaffoldReport {
    /// Absolute path of the project directory
    pub path: PathBuf,
    /// Base and feature files copied from the template source
    pub staged: Vec<String>,
    pub git: StepOutcome,
    pub install: StepOutcome,
}

/// Runs the scaffolding pipeline against a shared registry
pub struct Scaffolder<R> {
    registry: Arc<Registry>,
    runner: R,
    template_source: TemplateSource,
    package_manager: PackageManager,
}

impl<R: CommandRunner> Scaffolder<R> {
    pub fn new(registry: Arc<Registry>, runner: R) -> Self {
        Self {
            registry,
            runner,
            template_source: TemplateSource::Bundled,
            package_manager: PackageManager::default(),
        }
    }

    /// Where base files and feature files are copied from
    pub fn with_template_source(mut self, source: TemplateSource) -> Self {
        self.template_source = source;
        self
    }

    pub fn with_package_manager(mut self, package_manager: PackageManager) -> Self {
        self.package_manager = package_manager;
        self
    }

    pub fn runner(&self) -> &R {
        &self.runner
    }

    /// Create the project described by `request`
    pub async fn scaffold(&self, request: ScaffoldRequest) -> Result<ScaffoldReport, ScaffoldError> {
        // Resolve everything up front so a bad key fails before any side effect
        let preset = self.registry.lookup_preset(request.preset)?;
        let features: Vec<&FeatureDefinition> = request
            .features
            .iter()
            .map(|key| self.registry.lookup_feature(*key))
            .collect::<Result<_, _>>()?;

        let dir = request.path.as_path();

        fs::create_dir_all(dir)
            .await
            .map_err(|source| ScaffoldError::CreateDir {
                path: dir.to_path_buf(),
                source,
            })?;
        tracing::info!(dir = %dir.display(), "created project directory");

        let mut entries: Vec<&str> = copier::BASE_FILES.to_vec();
        entries.extend(features.iter().flat_map(|f| f.files.iter().map(String::as_str)));
        let staged = copier::stage_entries(&self.template_source, dir, entries).await?;
        tracing::info!(
            source = %self.template_source.describe(),
            count = staged.len(),
            "staged base files"
        );

        let starter = starter::render_project_starter(&request.name, preset, &features);
        write_file(dir, starter::STARTER_FILE, &starter).await?;

        let package_json = PackageManifest::new(&request.name, preset, features.iter().copied());
        write_file(dir, manifest::MANIFEST_FILE, &package_json.to_json()?).await?;

        let env = env_file::render_env_example(&self.registry, &request.features);
        write_file(dir, env_file::ENV_FILE, &env).await?;

        let git = if request.skip_git {
            StepOutcome::Skipped
        } else {
            git::bootstrap_repository(&self.runner, dir).await
        };

        let install = if request.skip_install {
            StepOutcome::Skipped
        } else {
            self.install_dependencies(dir).await?;
            StepOutcome::Completed
        };

        Ok(ScaffoldReport {
            path: dir.to_path_buf(),
            staged,
            git,
            install,
        })
    }

    async fn install_dependencies(&self, dir: &Path) -> Result<(), ScaffoldError> {
        let pm = self.package_manager;
        tracing::info!(command = %pm.install_command(), "installing dependencies");

        self.runner
            .run(pm.program(), pm.install_args(), dir)
            .await
            .map_err(ScaffoldError::Install)
    }
}

async fn write_file(dir: &Path, file_name: &str, content: &str) -> Result<(), ScaffoldError> {
    let path = dir.join(file_name);
    fs::write(&path, content)
        .await
        .map_err(|source| ScaffoldError::Write {
            path: path.clone(),
            source,
        })?;
    tracing::debug!(file = file_name, "wrote");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::ScriptedRunner;
    use std::fs as std_fs;

    fn scaffolder(runner: ScriptedRunner) -> Scaffolder<ScriptedRunner> {
        Scaffolder::new(Arc::new(Registry::builtin().unwrap()), runner)
    }

    fn request(root: &Path, name: &str, preset: PresetKey) -> ScaffoldRequest {
        ScaffoldRequest::new(name, root.join(name), preset).unwrap()
    }

    fn read_json(path: &Path) -> serde_json::Value {
        serde_json::from_str(&std_fs::read_to_string(path).unwrap()).unwrap()
    }

    #[test]
    fn test_request_rejects_invalid_names() {
        let err = ScaffoldRequest::new("My App", "/tmp/My App", PresetKey::Static).unwrap_err();
        assert_eq!(err, NameError::InvalidCharacters);
    }

    #[test]
    fn test_request_features_are_a_set() {
        let request = ScaffoldRequest::new("app", "/tmp/app", PresetKey::Astro)
            .unwrap()
            .with_features([FeatureKey::Auth, FeatureKey::Database, FeatureKey::Auth]);

        let features: Vec<FeatureKey> = request.features().iter().copied().collect();
        assert_eq!(features, vec![FeatureKey::Auth, FeatureKey::Database]);
    }

    #[test]
    fn test_unknown_keys_surface_as_registry_errors() {
        let err = ScaffoldError::from(RegistryError::UnknownFeature(FeatureKey::Auth));

        assert!(matches!(
            err,
            ScaffoldError::Registry(RegistryError::UnknownFeature(FeatureKey::Auth))
        ));
        assert_eq!(err.to_string(), "Feature 'auth' is not defined in the registry");
    }

    #[tokio::test]
    async fn test_minimal_static_project() {
        let root = tempfile::tempdir().unwrap();
        let scaffolder = scaffolder(ScriptedRunner::default());
        let request = request(root.path(), "my-app", PresetKey::Static)
            .skip_git(true)
            .skip_install(true);

        let report = scaffolder.scaffold(request).await.unwrap();

        let dir = root.path().join("my-app");
        assert_eq!(report.path, dir);
        assert_eq!(report.git, StepOutcome::Skipped);
        assert_eq!(report.install, StepOutcome::Skipped);
        assert!(dir.join(starter::STARTER_FILE).is_file());
        assert!(!dir.join(".git").exists());

        let package = read_json(&dir.join(manifest::MANIFEST_FILE));
        assert_eq!(package["name"], "my-app");
        assert_eq!(package["dependencies"], serde_json::json!({}));
        let dev = package["devDependencies"].as_object().unwrap();
        let dev_names: Vec<&str> = dev.keys().map(String::as_str).collect();
        assert_eq!(dev_names, vec!["vite", "eslint", "prettier"]);

        let env = std_fs::read_to_string(dir.join(env_file::ENV_FILE)).unwrap();
        assert_eq!(env.lines().filter(|l| l.ends_with('=')).count(), 2);

        assert!(scaffolder.runner().commands().is_empty());
    }

    #[tokio::test]
    async fn test_bundled_base_files_by_default() {
        let root = tempfile::tempdir().unwrap();
        let scaffolder = scaffolder(ScriptedRunner::default());
        let request = request(root.path(), "my-app", PresetKey::Static)
            .skip_git(true)
            .skip_install(true);

        let report = scaffolder.scaffold(request).await.unwrap();

        let dir = root.path().join("my-app");
        assert_eq!(report.staged, vec![".claude/", ".gitignore", "README.md"]);
        assert!(dir.join(".claude/settings.json").is_file());
        assert!(dir.join("README.md").is_file());
    }

    #[tokio::test]
    async fn test_features_shape_env_and_dependencies() {
        let root = tempfile::tempdir().unwrap();
        let scaffolder = scaffolder(ScriptedRunner::default());
        let request = request(root.path(), "svc", PresetKey::Fullstack)
            .with_features([FeatureKey::Database, FeatureKey::Analytics])
            .skip_git(true)
            .skip_install(true);

        scaffolder.scaffold(request).await.unwrap();

        let dir = root.path().join("svc");
        let env = std_fs::read_to_string(dir.join(env_file::ENV_FILE)).unwrap();
        let database = env.find("# Database").unwrap();
        let sentry = env.find("# Sentry").unwrap();
        assert!(database < sentry);
        assert!(!env.contains("# Deployment"));

        let package = read_json(&dir.join(manifest::MANIFEST_FILE));
        assert_eq!(package["dependencies"]["fastify"], "^5.0.0");
        assert_eq!(package["dependencies"]["@prisma/client"], "^6.0.0");
        assert_eq!(package["dependencies"]["@sentry/node"], "^8.0.0");
    }

    #[tokio::test]
    async fn test_stages_base_and_feature_files() {
        let root = tempfile::tempdir().unwrap();
        let templates = tempfile::tempdir().unwrap();
        std_fs::write(templates.path().join("README.md"), "# Starter").unwrap();
        std_fs::write(templates.path().join("vercel.json"), "{}").unwrap();

        let scaffolder = scaffolder(ScriptedRunner::default())
            .with_template_source(TemplateSource::Directory(templates.path().to_path_buf()));
        let request = request(root.path(), "site", PresetKey::Astro)
            .with_features([FeatureKey::Deployment])
            .skip_git(true)
            .skip_install(true);

        let report = scaffolder.scaffold(request).await.unwrap();

        assert_eq!(report.staged, vec!["README.md", "vercel.json"]);
        assert!(root.path().join("site/vercel.json").is_file());
        assert!(!root.path().join("site/.cloudflare").exists());
    }

    #[tokio::test]
    async fn test_existing_directory_is_reused() {
        let root = tempfile::tempdir().unwrap();
        let dir = root.path().join("my-app");
        std_fs::create_dir_all(&dir).unwrap();
        std_fs::write(dir.join("notes.txt"), "keep").unwrap();
        std_fs::write(dir.join(starter::STARTER_FILE), "old").unwrap();
        std_fs::write(dir.join(manifest::MANIFEST_FILE), "old").unwrap();

        let scaffolder = scaffolder(ScriptedRunner::default());
        let request = request(root.path(), "my-app", PresetKey::Static)
            .skip_git(true)
            .skip_install(true);

        scaffolder.scaffold(request).await.unwrap();

        assert_eq!(std_fs::read_to_string(dir.join("notes.txt")).unwrap(), "keep");
        assert_ne!(std_fs::read_to_string(dir.join(starter::STARTER_FILE)).unwrap(), "old");
        assert_ne!(std_fs::read_to_string(dir.join(manifest::MANIFEST_FILE)).unwrap(), "old");
    }

    #[tokio::test]
    async fn test_git_and_install_run_in_project_dir() {
        let root = tempfile::tempdir().unwrap();
        let scaffolder = scaffolder(ScriptedRunner::default())
            .with_package_manager(PackageManager::Pnpm);

        let report = scaffolder
            .scaffold(request(root.path(), "app", PresetKey::React))
            .await
            .unwrap();

        assert_eq!(report.git, StepOutcome::Completed);
        assert_eq!(report.install, StepOutcome::Completed);
        assert_eq!(
            scaffolder.runner().commands(),
            vec![
                "git init".to_string(),
                "git add .".to_string(),
                format!("git commit -m {}", git::INITIAL_COMMIT_MESSAGE),
                "pnpm install".to_string(),
            ]
        );
        let dir = root.path().join("app");
        assert!(scaffolder.runner().working_dirs().iter().all(|cwd| *cwd == dir));
    }

    #[tokio::test]
    async fn test_git_failure_is_soft() {
        let root = tempfile::tempdir().unwrap();
        let scaffolder = scaffolder(ScriptedRunner::failing(&["git commit"]));

        let report = scaffolder
            .scaffold(request(root.path(), "app", PresetKey::Static))
            .await
            .unwrap();

        assert!(matches!(report.git, StepOutcome::SoftFailed(_)));
        assert_eq!(report.install, StepOutcome::Completed);
        assert_eq!(scaffolder.runner().commands().last().unwrap(), "npm install");
    }

    #[tokio::test]
    async fn test_git_stops_at_first_failure() {
        let root = tempfile::tempdir().unwrap();
        let scaffolder = scaffolder(ScriptedRunner::failing(&["git init"]));
        let request = request(root.path(), "app", PresetKey::Static).skip_install(true);

        let report = scaffolder.scaffold(request).await.unwrap();

        assert!(matches!(report.git, StepOutcome::SoftFailed(_)));
        assert_eq!(scaffolder.runner().commands(), vec!["git init".to_string()]);
    }

    #[tokio::test]
    async fn test_install_failure_is_fatal_and_leaves_files() {
        let root = tempfile::tempdir().unwrap();
        let scaffolder = scaffolder(ScriptedRunner::failing(&["npm install"]));
        let request = request(root.path(), "app", PresetKey::Static).skip_git(true);

        let err = scaffolder.scaffold(request).await.unwrap_err();

        assert!(matches!(err, ScaffoldError::Install(_)));
        assert!(err.to_string().starts_with("Failed to install dependencies: "));
        assert!(root.path().join("app").join(manifest::MANIFEST_FILE).is_file());
    }

    #[tokio::test]
    async fn test_directory_creation_failure_is_fatal() {
        let root = tempfile::tempdir().unwrap();
        let blocker = root.path().join("taken");
        std_fs::write(&blocker, "not a directory").unwrap();

        let scaffolder = scaffolder(ScriptedRunner::default());
        let request = ScaffoldRequest::new("app", blocker.join("app"), PresetKey::Static)
            .unwrap()
            .skip_git(true)
            .skip_install(true);

        let err = scaffolder.scaffold(request).await.unwrap_err();

        assert!(matches!(err, ScaffoldError::CreateDir { .. }));
        assert!(scaffolder.runner().commands().is_empty());
    }
}

//! package.json generation

use crate::registry::{DependencyMap, FeatureDefinition, PresetDefinition};
use indexmap::IndexMap;
use serde::Serialize;

pub const MANIFEST_FILE: &str = "package.json";

/// Version every generated project starts at
pub const INITIAL_VERSION: &str = "0.1.0";

/// Linter and formatter added to every project's dev dependencies
pub const PINNED_DEV_TOOLING: &[(&str, &str)] = &[("eslint", "^9.0.0"), ("prettier", "^3.0.0")];

const SCRIPTS: &[(&str, &str)] = &[
    ("dev", "vite dev"),
    ("build", "vite build"),
    ("preview", "vite preview"),
    ("lint", "eslint ."),
    ("format", "prettier --write ."),
];

/// Contents of a generated package.json
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageManifest {
    pub name: String,
    pub version: String,
    pub private: bool,
    #[serde(rename = "type")]
    pub module_type: String,
    pub scripts: IndexMap<String, String>,
    pub dependencies: DependencyMap,
    pub dev_dependencies: DependencyMap,
}

/// Merge preset and feature dependencies.
///
/// Features are applied in the order given; on a key collision the later
/// value wins and the key keeps its first position.
pub fn merge_dependencies<'a>(
    preset: &PresetDefinition,
    features: impl IntoIterator<Item = &'a FeatureDefinition>,
) -> (DependencyMap, DependencyMap) {
    let mut dependencies = preset.dependencies.clone();
    let mut dev_dependencies = preset.dev_dependencies.clone();

    for feature in features {
        dependencies.extend(feature.dependencies.clone());
        dev_dependencies.extend(feature.dev_dependencies.clone());
    }

    (dependencies, dev_dependencies)
}

impl PackageManifest {
    pub fn new<'a>(
        project_name: &str,
        preset: &PresetDefinition,
        features: impl IntoIterator<Item = &'a FeatureDefinition>,
    ) -> Self {
        let (dependencies, mut dev_dependencies) = merge_dependencies(preset, features);
        for (name, version) in PINNED_DEV_TOOLING {
            dev_dependencies.insert(name.to_string(), version.to_string());
        }

        Self {
            name: project_name.to_string(),
            version: INITIAL_VERSION.to_string(),
            private: true,
            module_type: "module".to_string(),
            scripts: SCRIPTS
                .iter()
                .map(|(name, cmd)| (name.to_string(), cmd.to_string()))
                .collect(),
            dependencies,
            dev_dependencies,
        }
    }

    /// Pretty-printed JSON with two-space indentation
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

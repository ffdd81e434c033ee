//! Preset and feature registry
//!
//! The registry is authored as YAML (`registry.yaml`, embedded at compile time)
//! and parsed once into an immutable [`Registry`]. Callers share it behind an
//! `Arc` and never mutate it. Adding a preset or feature means adding an entry
//! to the document and a key to the matching enum; orchestration code does not
//! change.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Embedded registry document
const BUILTIN_REGISTRY: &str = include_str!("registry.yaml");

/// Ordered name -> version-range map, as written to package.json
pub type DependencyMap = IndexMap<String, String>;

/// Ordered name -> enabled map for rules, integrations and hooks
pub type ToggleMap = IndexMap<String, bool>;

/// Errors raised while loading or querying the registry
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("Failed to parse registry document")]
    Parse(#[from] serde_yaml::Error),

    #[error("Preset '{0}' is not defined in the registry")]
    UnknownPreset(PresetKey),

    #[error("Feature '{0}' is not defined in the registry")]
    UnknownFeature(FeatureKey),
}

/// Framework presets
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum PresetKey {
    Static,
    Astro,
    React,
    Nextjs,
    Nuxt,
    Svelte,
    Fullstack,
}

impl PresetKey {
    pub const ALL: [PresetKey; 7] = [
        PresetKey::Static,
        PresetKey::Astro,
        PresetKey::React,
        PresetKey::Nextjs,
        PresetKey::Nuxt,
        PresetKey::Svelte,
        PresetKey::Fullstack,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PresetKey::Static => "static",
            PresetKey::Astro => "astro",
            PresetKey::React => "react",
            PresetKey::Nextjs => "nextjs",
            PresetKey::Nuxt => "nuxt",
            PresetKey::Svelte => "svelte",
            PresetKey::Fullstack => "fullstack",
        }
    }
}

impl Default for PresetKey {
    fn default() -> Self {
        PresetKey::Astro
    }
}

impl fmt::Display for PresetKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Optional add-ons, independent of the preset
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum,
)]
pub enum FeatureKey {
    #[serde(rename = "440css")]
    #[value(name = "440css")]
    Css440,
    #[serde(rename = "database")]
    Database,
    #[serde(rename = "auth")]
    Auth,
    #[serde(rename = "analytics")]
    Analytics,
    #[serde(rename = "deployment")]
    Deployment,
}

impl FeatureKey {
    pub const ALL: [FeatureKey; 5] = [
        FeatureKey::Css440,
        FeatureKey::Database,
        FeatureKey::Auth,
        FeatureKey::Analytics,
        FeatureKey::Deployment,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FeatureKey::Css440 => "440css",
            FeatureKey::Database => "database",
            FeatureKey::Auth => "auth",
            FeatureKey::Analytics => "analytics",
            FeatureKey::Deployment => "deployment",
        }
    }
}

impl fmt::Display for FeatureKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A framework preset: display metadata, default toggles and dependencies
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PresetDefinition {
    /// Display name (also the menu label)
    pub name: String,

    pub description: String,

    /// Short menu hint
    #[serde(default)]
    pub hint: String,

    /// Code-quality rules
    #[serde(default)]
    pub rules: ToggleMap,

    /// MCP server integrations
    #[serde(default)]
    pub mcp: ToggleMap,

    /// Development hooks
    #[serde(default)]
    pub hooks: ToggleMap,

    #[serde(default)]
    pub dependencies: DependencyMap,

    #[serde(default)]
    pub dev_dependencies: DependencyMap,
}

/// Environment variables a feature adds to `.env.example`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnvBlock {
    /// Comment line heading the block
    pub title: String,

    pub vars: Vec<String>,
}

/// An optional feature layered on top of any preset
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeatureDefinition {
    pub label: String,

    #[serde(default)]
    pub hint: String,

    /// Line rendered under "Selected Features" in the starter document
    pub description: String,

    /// Extra MCP integrations the feature relies on
    #[serde(default)]
    pub mcp: Vec<String>,

    /// Extra files or directories (relative to the template source) to stage
    #[serde(default)]
    pub files: Vec<String>,

    #[serde(default)]
    pub dependencies: DependencyMap,

    #[serde(default)]
    pub dev_dependencies: DependencyMap,

    #[serde(default)]
    pub env: Option<EnvBlock>,
}

/// Immutable preset/feature lookup table
#[derive(Debug, Clone, Deserialize)]
pub struct Registry {
    presets: IndexMap<PresetKey, PresetDefinition>,
    features: IndexMap<FeatureKey, FeatureDefinition>,
}

impl Registry {
    /// Load the registry shipped with the tool
    pub fn builtin() -> Result<Self, RegistryError> {
        Self::from_yaml(BUILTIN_REGISTRY)
    }

    /// Parse a registry document and check that every key is defined
    pub fn from_yaml(content: &str) -> Result<Self, RegistryError> {
        let registry: Registry = serde_yaml::from_str(content)?;

        if let Some(missing) = PresetKey::ALL
            .iter()
            .find(|key| !registry.presets.contains_key(*key))
        {
            return Err(RegistryError::UnknownPreset(*missing));
        }
        if let Some(missing) = FeatureKey::ALL
            .iter()
            .find(|key| !registry.features.contains_key(*key))
        {
            return Err(RegistryError::UnknownFeature(*missing));
        }

        Ok(registry)
    }

    pub fn lookup_preset(&self, key: PresetKey) -> Result<&PresetDefinition, RegistryError> {
        self.presets
            .get(&key)
            .ok_or(RegistryError::UnknownPreset(key))
    }

    pub fn lookup_feature(&self, key: FeatureKey) -> Result<&FeatureDefinition, RegistryError> {
        self.features
            .get(&key)
            .ok_or(RegistryError::UnknownFeature(key))
    }

    /// Presets in document order
    pub fn presets(&self) -> impl Iterator<Item = (PresetKey, &PresetDefinition)> {
        self.presets.iter().map(|(key, def)| (*key, def))
    }

    /// Features in document order
    pub fn features(&self) -> impl Iterator<Item = (FeatureKey, &FeatureDefinition)> {
        self.features.iter().map(|(key, def)| (*key, def))
    }
}

//! PROJECT_STARTER.md rendering

use crate::registry::{FeatureDefinition, PresetDefinition};

pub const STARTER_FILE: &str = "PROJECT_STARTER.md";

/// Top-level switches shown in the starter document. Always enabled.
const MASTER_TOGGLES: &[&str] = &[
    "MCP Servers",
    "Development Hooks",
    "Code Quality Rules",
    "AI Agents",
];

const GETTING_STARTED: &str = "1. Install dependencies:
   ```bash
   npm install
   ```

2. Start development server:
   ```bash
   npm run dev
   ```

3. Generate project plan:
   ```bash
   /project-planner
   ```

4. Generate tasks:
   ```bash
   /task-planner
   ```

5. Run tasks with AI agents:
   ```bash
   /task-runner
   ```";

fn flag(enabled: bool) -> &'static str {
    if enabled {
        "TRUE"
    } else {
        "FALSE"
    }
}

fn checklist<'a>(entries: impl IntoIterator<Item = (&'a String, &'a bool)>) -> String {
    entries
        .into_iter()
        .map(|(name, enabled)| format!("- **{}**: `{}`", name, flag(*enabled)))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Render the starter document for a project.
///
/// Features appear only in the "Selected Features" list; the rule,
/// integration and hook checklists come from the preset alone.
pub fn render_project_starter(
    project_name: &str,
    preset: &PresetDefinition,
    features: &[&FeatureDefinition],
) -> String {
    let toggles = MASTER_TOGGLES
        .iter()
        .map(|name| format!("- **{}**: `{}`", name, flag(true)))
        .collect::<Vec<_>>()
        .join("\n");

    let selected = features
        .iter()
        .map(|feature| format!("- {}", feature.description))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "# {name}

> Project created with Claude Code Sidekick

## Quick Start Configuration

### Project Preset

Selected: **{preset_name}** - {preset_description}

### Master Toggles

{toggles}

### Selected Features

{selected}

---

## Project Information

### Project Name
{name}

### Project Description
[Describe your project here]

### Primary Goal
[What is the main goal of this project?]

---

## Getting Started

{getting_started}

---

## Code Rules Configuration

{rules}

---

## MCP Configuration

{mcp}

---

## Development Hooks

{hooks}
",
        name = project_name,
        preset_name = preset.name,
        preset_description = preset.description,
        toggles = toggles,
        selected = selected,
        getting_started = GETTING_STARTED,
        rules = checklist(&preset.rules),
        mcp = checklist(&preset.mcp),
        hooks = checklist(&preset.hooks),
    )
}

//! .env.example generation

use crate::registry::{FeatureKey, Registry};
use indexmap::IndexSet;

pub const ENV_FILE: &str = ".env.example";

const BASE_ENV: &str = "# Environment Variables

# Claude Code
CLAUDE_API_KEY=

# Claude Code MCP
ANTHROPIC_API_KEY=
";

/// Render the environment template.
///
/// Feature blocks follow registry order, not selection order.
pub fn render_env_example(registry: &Registry, selected: &IndexSet<FeatureKey>) -> String {
    let mut content = String::from(BASE_ENV);

    for (key, feature) in registry.features() {
        let Some(block) = feature.env.as_ref().filter(|_| selected.contains(&key)) else {
            continue;
        };

        content.push_str(&format!("\n# {}\n", block.title));
        for var in &block.vars {
            content.push_str(&format!("{}=\n", var));
        }
    }

    content
}

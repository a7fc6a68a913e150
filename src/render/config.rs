use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Layout settings written into the Mermaid front matter `gantt:` block.
///
/// Any field missing from a config file keeps its default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ChartConfig {
    /// Mermaid theme name; the document colors only apply to `base`.
    pub theme: String,
    pub bar_gap: u32,
    pub bar_height: u32,
    pub font_size: u32,
    pub section_font_size: u32,
    pub left_padding: u32,
    pub top_padding: u32,
    pub grid_line_start_padding: u32,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            theme: "base".to_string(),
            bar_gap: 10,
            bar_height: 40,
            font_size: 20,
            section_font_size: 20,
            left_padding: 200,
            top_padding: 75,
            grid_line_start_padding: 50,
        }
    }
}

impl ChartConfig {
    /// Load overrides from a JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        let config = serde_json::from_str(&json)?;
        tracing::debug!(path = %path.display(), "Loaded chart config");
        Ok(config)
    }
}

//! Dashboard layout document.
//!
//! Describes where the view layer places widgets for each channel. The
//! simulation engine never reads this; it is carried here so the CLI and
//! GUI share one schema and one loader.

use crate::ProjectResult;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Top-level wrapper; layout files nest everything under a `layout:` key.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
struct LayoutDocument {
    #[serde(default)]
    layout: LayoutConfig,
}

/// Layout of the dashboard grid.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct LayoutConfig {
    #[serde(default)]
    pub grid: GridDef,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct GridDef {
    #[serde(default)]
    pub elements: Vec<ElementDef>,
}

/// One dashboard widget placement.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ElementDef {
    /// Channel id this widget displays.
    pub id: String,
    /// Widget kind; the view renders `sensor` as a plot and anything else
    /// as a numeric readout.
    #[serde(rename = "type")]
    pub kind: String,
    /// Grid cell `(row, column)`.
    pub position: (usize, usize),
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

/// Load a layout configuration from a YAML file.
pub fn load_layout(path: &Path) -> ProjectResult<LayoutConfig> {
    let content = std::fs::read_to_string(path)?;
    let doc: LayoutDocument = serde_yaml::from_str(&content)?;
    Ok(doc.layout)
}

/// Save a layout configuration as YAML.
pub fn save_layout(path: &Path, layout: &LayoutConfig) -> ProjectResult<()> {
    let doc = LayoutDocument {
        layout: layout.clone(),
    };
    let content = serde_yaml::to_string(&doc)?;
    std::fs::write(path, content)?;
    Ok(())
}

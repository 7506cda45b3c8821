//! Inspector settings
//!
//! Presentation defaults for the group inspector. All fields fall back to
//! the built-in defaults when absent, so a partial document is enough.

use crate::error::Result;
use crate::group::view::{FilterMode, ViewMode};
use serde::{Deserialize, Serialize};

/// Presentation defaults for [`GroupInspector`](crate::inspector::GroupInspector)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct InspectorSettings {
    /// Grouping the partitions view starts in
    pub default_view_mode: ViewMode,

    /// Lag filter the partitions view starts with
    pub default_filter: FilterMode,

    /// Whether the statistics bar is rendered
    pub show_statistics_bar: bool,
}

impl Default for InspectorSettings {
    fn default() -> Self {
        Self {
            default_view_mode: ViewMode::Topic,
            default_filter: FilterMode::ShowAll,
            show_statistics_bar: true,
        }
    }
}

impl InspectorSettings {
    /// Parse settings from a JSON document.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

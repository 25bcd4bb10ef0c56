//! Configuration for the course viewer state
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{CourseError, Result};

/// Deepest topic nesting the integrity check will accept without complaint
const MAX_SUPPORTED_TOPIC_DEPTH: usize = 256;

/// Viewer configuration shared by the TOC and the content session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ViewerConfig {
    /// Viewports narrower than this (in CSS pixels) collapse the TOC panel after a selection
    pub narrow_viewport_width: u32,

    /// Expand every module when a course is first loaded
    pub expand_all_on_load: bool,

    /// Expand modules that appear for the first time in a reloaded snapshot
    pub expand_new_modules: bool,

    /// Topic nesting depth above which the integrity check reports an issue
    pub max_topic_depth: usize,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            narrow_viewport_width: 768,
            expand_all_on_load: true,
            expand_new_modules: true,
            max_topic_depth: 32,
        }
    }
}

impl ViewerConfig {
    /// Load configuration from a JSON file, filling absent fields with defaults
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path.as_ref())?;
        let config: ViewerConfig = serde_json::from_str(&raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Whether a viewport of this width counts as narrow
    pub fn is_narrow(&self, viewport_width: u32) -> bool {
        viewport_width < self.narrow_viewport_width
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.narrow_viewport_width == 0 {
            return Err(CourseError::invalid_config(
                "narrow_viewport_width must be greater than 0",
            ));
        }

        if self.max_topic_depth == 0 {
            return Err(CourseError::invalid_config(
                "max_topic_depth must be greater than 0",
            ));
        }

        if self.max_topic_depth > MAX_SUPPORTED_TOPIC_DEPTH {
            return Err(CourseError::invalid_config(format!(
                "max_topic_depth cannot exceed {}",
                MAX_SUPPORTED_TOPIC_DEPTH
            )));
        }

        Ok(())
    }
}

//! Configuration schema types for `hexpanel.toml`

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::color::{parse_color, ColorError};
use crate::panel::{ComposeOptions, Overflow};
use crate::sheet::GRID_SIZE;

/// Default sprite sheet file, looked up in the working directory
pub const DEFAULT_SHEET: &str = "8080_instruction.png";

/// Default panel output file
pub const DEFAULT_OUTPUT: &str = "8080_instruction_panel.png";

/// Top-level `hexpanel.toml` document
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HexpanelConfig {
    #[serde(default)]
    pub panel: PanelConfig,
}

/// `[panel]` section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PanelConfig {
    /// Sprite sheet image to crop cells from
    #[serde(default = "default_sheet")]
    pub sheet: PathBuf,
    /// Where the composed panel is written
    #[serde(default = "default_output")]
    pub output: PathBuf,
    /// Cells per axis of the sprite sheet (1-16)
    #[serde(default = "default_grid")]
    pub grid: u32,
    /// Behavior when cells run past the right edge
    #[serde(default)]
    pub overflow: Overflow,
    /// Canvas fill color, e.g. "#000000" or "transparent"
    #[serde(default = "default_background")]
    pub background: String,
}

fn default_sheet() -> PathBuf {
    PathBuf::from(DEFAULT_SHEET)
}

fn default_output() -> PathBuf {
    PathBuf::from(DEFAULT_OUTPUT)
}

fn default_grid() -> u32 {
    GRID_SIZE
}

fn default_background() -> String {
    "#000000".to_string()
}

impl Default for PanelConfig {
    fn default() -> Self {
        Self {
            sheet: default_sheet(),
            output: default_output(),
            grid: default_grid(),
            overflow: Overflow::default(),
            background: default_background(),
        }
    }
}

/// Configuration validation error
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigValidationError {
    /// Path to the invalid field (e.g., "panel.grid")
    pub field: String,
    pub message: String,
}

impl std::fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "hexpanel.toml: '{}' {}", self.field, self.message)
    }
}

impl HexpanelConfig {
    /// Validate the configuration and return any errors
    pub fn validate(&self) -> Vec<ConfigValidationError> {
        let mut errors = Vec::new();

        // Tokens are single hex digits per axis
        if self.panel.grid == 0 || self.panel.grid > GRID_SIZE {
            errors.push(ConfigValidationError {
                field: "panel.grid".to_string(),
                message: format!("must be between 1 and {}", GRID_SIZE),
            });
        }

        if let Err(e) = parse_color(&self.panel.background) {
            errors.push(ConfigValidationError {
                field: "panel.background".to_string(),
                message: format!("is not a valid color: {}", e),
            });
        }

        if self.panel.output.as_os_str().is_empty() {
            errors.push(ConfigValidationError {
                field: "panel.output".to_string(),
                message: "must be a non-empty path".to_string(),
            });
        }

        errors
    }
}

impl PanelConfig {
    /// Layout options for [`crate::panel::compose`].
    pub fn compose_options(&self) -> Result<ComposeOptions, ColorError> {
        Ok(ComposeOptions { overflow: self.overflow, background: parse_color(&self.background)? })
    }
}

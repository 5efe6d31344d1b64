//! Application configuration model.
//!
//! Loaded from `config.toml`; every field has a default so a partial (or
//! missing) file is valid.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    /// SQLite file; `None` resolves to the platform data directory.
    pub database_path: Option<PathBuf>,
    pub grid: GridSettings,
    pub auto_scroll: AutoScrollSettings,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridSettings {
    /// Height of one slot row in points. Rows are uniform so hit testing is
    /// pure arithmetic.
    pub row_height: f32,
    /// Space reserved at the bottom of the viewport when the editor is
    /// docked below the grid (narrow windows).
    pub editor_bottom_inset: f32,
}

impl Default for GridSettings {
    fn default() -> Self {
        Self {
            row_height: 28.0,
            editor_bottom_inset: 0.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AutoScrollSettings {
    /// Distance from a viewport edge that starts scrolling.
    pub threshold: f32,
    /// Points scrolled per frame at full intensity.
    pub speed: f32,
    /// Lowest intensity applied inside the band.
    pub min_intensity: f32,
}

impl Default for AutoScrollSettings {
    fn default() -> Self {
        Self {
            threshold: 40.0,
            speed: 4.0,
            min_intensity: 0.2,
        }
    }
}

impl AppConfig {
    pub fn validate(&self) -> Result<(), String> {
        if !(self.grid.row_height > 0.0) {
            return Err("grid.row_height must be positive".into());
        }
        if self.grid.editor_bottom_inset < 0.0 {
            return Err("grid.editor_bottom_inset cannot be negative".into());
        }
        if !(self.auto_scroll.threshold > 0.0) || !(self.auto_scroll.speed > 0.0) {
            return Err("auto_scroll.threshold and auto_scroll.speed must be positive".into());
        }
        if !(0.0..=1.0).contains(&self.auto_scroll.min_intensity) {
            return Err("auto_scroll.min_intensity must be between 0 and 1".into());
        }
        Ok(())
    }
}

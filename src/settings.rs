//! Editor configuration.
//!
//! Everything the host passes to the rectangle tool besides the collection
//! itself: whether drawing is enabled, snapping, the default appearance, the
//! hover tooltip and the cursor indicator. Settings persist as JSON; every
//! field has a default so partial files load.

use crate::constants::DEFAULT_HOVER_TOLERANCE_PX;
use crate::error::ShapeResult;
use crate::types::{Appearance, AppearanceOverride, CursorIndicator, HoverText};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Settings for a [`ShapeEditor`](crate::editor::ShapeEditor).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EditorSettings {
    /// When false, presses never arm a new draft
    pub enabled: bool,
    /// Snap drawn points to the nearest plotted x sample
    pub snap: bool,
    /// Default appearance for shapes without their own
    pub appearance: Appearance,
    pub hover_text: HoverText,
    /// Live cursor indicator style
    pub cursor: CursorIndicator,
    /// Hover radius in device pixels
    pub hover_tolerance_px: f64,
}

impl Default for EditorSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            snap: false,
            appearance: Appearance::default(),
            hover_text: HoverText::default(),
            cursor: CursorIndicator::default(),
            hover_tolerance_px: DEFAULT_HOVER_TOLERANCE_PX,
        }
    }
}

impl EditorSettings {
    /// Load settings from a JSON file.
    pub fn load(path: &Path) -> ShapeResult<Self> {
        let json = fs::read_to_string(path)?;
        let settings: Self = serde_json::from_str(&json)?;
        info!("Loaded editor settings from {:?}", path);
        Ok(settings.sanitized())
    }

    /// Load settings, falling back to defaults when missing or unreadable.
    pub fn load_or_default(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }
        match Self::load(path) {
            Ok(settings) => settings,
            Err(e) => {
                warn!("Failed to load editor settings from {:?}: {}", path, e);
                Self::default()
            }
        }
    }

    /// Write settings as pretty JSON, creating parent directories.
    pub fn save(&self, path: &Path) -> ShapeResult<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }

    /// Replace out-of-range values with defaults.
    pub fn sanitized(mut self) -> Self {
        if !self.hover_tolerance_px.is_finite() || self.hover_tolerance_px <= 0.0 {
            warn!(
                "Invalid hover tolerance {}, using {}",
                self.hover_tolerance_px, DEFAULT_HOVER_TOLERANCE_PX
            );
            self.hover_tolerance_px = DEFAULT_HOVER_TOLERANCE_PX;
        }
        // Same range rule as per-shape overrides in the store
        if let Some((field, value)) = AppearanceOverride::from(&self.appearance).first_invalid() {
            warn!("Invalid appearance {} = {}, using default appearance", field, value);
            self.appearance = Appearance::default();
        }
        self
    }
}

/// `<config dir>/chartmark/settings.json`, if the platform has a config dir.
pub fn default_settings_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("chartmark").join("settings.json"))
}

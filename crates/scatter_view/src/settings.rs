//! View settings management
//!
//! This module provides the persisted settings of a scatter view: which
//! fields feed the axes, how categories are colored, and the layout knobs.
//! Settings are stored as camelCase JSON, and every field has a default so
//! partial files load cleanly.

use std::path::{Path, PathBuf};
use std::time::Duration;

use scatter::{
    Color, ColorScheme, ConfigSource, Margins, Palette, PlotConfig, ScatterLayoutCalculator,
    Viewport, COLOR_FIELD_KEY, DEFAULT_FALLBACK_COLOR, DEFAULT_MAX_REPORTED_SKIPS, DEFAULT_PADDING,
    DEFAULT_TICK_COUNT, X_FIELD_KEY, Y_FIELD_KEY,
};
use serde::{Deserialize, Serialize};

use crate::Result;

/// Quiet period before a burst of resizes is applied
pub const DEFAULT_RESIZE_DEBOUNCE_MS: u64 = 100;

/// Upper limit on ticks per axis read from a settings file
pub const MAX_TICK_COUNT: usize = 100;

/// Persisted settings for one scatter view
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct ViewSettings {
    /// Field id for the X axis (e.g. "property.effort")
    pub x_field: Option<String>,
    /// Field id for the Y axis
    pub y_field: Option<String>,
    /// Field id used to group points by color
    pub color_field: Option<String>,
    /// Preset palette used when no custom colors are given
    pub color_scheme: ColorScheme,
    /// Custom palette as hex strings, overrides the scheme when non-empty
    pub custom_colors: Vec<String>,
    /// Color for points without a mapped category
    pub fallback_color: String,
    pub margins: Margins,
    /// Size used until the host reports one
    pub viewport: Viewport,
    /// Fraction of the data range added on each side of an axis
    pub padding: f64,
    /// Ticks per axis
    pub tick_count: usize,
    pub resize_debounce_ms: u64,
    /// How many skipped records are listed in diagnostics
    pub max_reported_skips: usize,
}

impl Default for ViewSettings {
    fn default() -> Self {
        Self {
            x_field: None,
            y_field: None,
            color_field: None,
            color_scheme: ColorScheme::default(),
            custom_colors: Vec::new(),
            fallback_color: DEFAULT_FALLBACK_COLOR.to_string(),
            margins: Margins::default(),
            viewport: Viewport::default(),
            padding: DEFAULT_PADDING,
            tick_count: DEFAULT_TICK_COUNT,
            resize_debounce_ms: DEFAULT_RESIZE_DEBOUNCE_MS,
            max_reported_skips: DEFAULT_MAX_REPORTED_SKIPS,
        }
    }
}

impl ViewSettings {
    /// Set the axis fields
    pub fn with_axes(mut self, x_field: impl Into<String>, y_field: impl Into<String>) -> Self {
        self.x_field = Some(x_field.into());
        self.y_field = Some(y_field.into());
        self
    }

    /// Set the color grouping field
    pub fn with_color_field(mut self, color_field: impl Into<String>) -> Self {
        self.color_field = Some(color_field.into());
        self
    }

    /// Set the initial viewport
    pub fn with_viewport(mut self, viewport: Viewport) -> Self {
        self.viewport = viewport;
        self
    }

    /// Field configuration for the pipeline
    pub fn plot_config(&self) -> PlotConfig {
        PlotConfig::from_source(self)
    }

    /// The palette to color categories with.
    ///
    /// Custom colors that do not parse as hex are dropped with a warning; if
    /// none survive, the color scheme is used instead.
    pub fn palette(&self) -> Palette {
        let fallback = match Color::from_hex(&self.fallback_color) {
            Some(color) => color.to_css_hex(),
            None => {
                tracing::warn!(
                    color = %self.fallback_color,
                    "Invalid fallback color, using {}",
                    DEFAULT_FALLBACK_COLOR
                );
                DEFAULT_FALLBACK_COLOR.to_string()
            }
        };

        let colors: Vec<String> = self
            .custom_colors
            .iter()
            .filter_map(|raw| match Color::from_hex(raw) {
                Some(color) => Some(color.to_css_hex()),
                None => {
                    tracing::warn!(color = %raw, "Ignoring invalid custom color");
                    None
                }
            })
            .collect();

        if colors.is_empty() {
            self.color_scheme.palette(fallback)
        } else {
            Palette { fallback, colors }
        }
    }

    /// Layout calculator configured from these settings.
    ///
    /// A negative or non-finite padding falls back to the default, and the
    /// tick count is capped at [`MAX_TICK_COUNT`].
    pub fn calculator(&self) -> ScatterLayoutCalculator {
        let padding = if self.padding.is_finite() && self.padding >= 0.0 {
            self.padding
        } else {
            tracing::warn!(
                padding = self.padding,
                "Invalid padding, using {}",
                DEFAULT_PADDING
            );
            DEFAULT_PADDING
        };

        let tick_count = if self.tick_count > MAX_TICK_COUNT {
            tracing::warn!(
                tick_count = self.tick_count,
                "Tick count too large, using {}",
                MAX_TICK_COUNT
            );
            MAX_TICK_COUNT
        } else {
            self.tick_count
        };

        ScatterLayoutCalculator::new()
            .with_palette(self.palette())
            .with_margins(self.margins)
            .with_padding(padding)
            .with_tick_count(tick_count)
            .with_max_reported_skips(self.max_reported_skips)
    }

    pub fn resize_debounce(&self) -> Duration {
        Duration::from_millis(self.resize_debounce_ms)
    }
}

impl ConfigSource for ViewSettings {
    fn get_str(&self, key: &str) -> Option<String> {
        match key {
            X_FIELD_KEY => self.x_field.clone(),
            Y_FIELD_KEY => self.y_field.clone(),
            COLOR_FIELD_KEY => self.color_field.clone(),
            _ => None,
        }
    }
}

/// Settings manager for loading, saving, and updating view settings
pub struct SettingsManager {
    /// Path to the settings file
    settings_path: PathBuf,
    /// Current settings (cached)
    current: ViewSettings,
}

impl SettingsManager {
    /// Create a manager for the settings file at `settings_path`
    pub fn new(settings_path: impl Into<PathBuf>) -> Self {
        Self {
            settings_path: settings_path.into(),
            current: ViewSettings::default(),
        }
    }

    /// Create a manager for `scatter-view.json` inside a data directory
    pub fn in_dir(data_dir: impl AsRef<Path>) -> Self {
        Self::new(data_dir.as_ref().join("scatter-view.json"))
    }

    /// Get the path to the settings file
    pub fn settings_path(&self) -> &Path {
        &self.settings_path
    }

    /// Load settings from disk, or return defaults if the file doesn't exist
    pub async fn load(&mut self) -> Result<&ViewSettings> {
        self.current = if self.settings_path.exists() {
            let content = tokio::fs::read_to_string(&self.settings_path).await?;
            parse_or_default(&content)
        } else {
            ViewSettings::default()
        };
        Ok(&self.current)
    }

    /// Load settings synchronously
    pub fn load_sync(&mut self) -> Result<&ViewSettings> {
        self.current = if self.settings_path.exists() {
            let content = std::fs::read_to_string(&self.settings_path)?;
            parse_or_default(&content)
        } else {
            ViewSettings::default()
        };
        Ok(&self.current)
    }

    /// Save current settings to disk
    pub async fn save(&self) -> Result<()> {
        if let Some(parent) = self.settings_path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        let content = serde_json::to_string_pretty(&self.current)?;
        tokio::fs::write(&self.settings_path, content).await?;
        Ok(())
    }

    /// Save settings synchronously
    pub fn save_sync(&self) -> Result<()> {
        if let Some(parent) = self.settings_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(&self.current)?;
        std::fs::write(&self.settings_path, content)?;
        Ok(())
    }

    /// Get current settings
    pub fn get(&self) -> &ViewSettings {
        &self.current
    }

    /// Update settings and save to disk
    pub async fn update(&mut self, settings: ViewSettings) -> Result<()> {
        self.current = settings;
        self.save().await
    }

    /// Update settings synchronously
    pub fn update_sync(&mut self, settings: ViewSettings) -> Result<()> {
        self.current = settings;
        self.save_sync()
    }

    /// Reset settings to defaults and save
    pub fn reset_sync(&mut self) -> Result<&ViewSettings> {
        self.current = ViewSettings::default();
        self.save_sync()?;
        Ok(&self.current)
    }
}

fn parse_or_default(content: &str) -> ViewSettings {
    match serde_json::from_str::<ViewSettings>(content) {
        Ok(settings) => settings,
        Err(e) => {
            tracing::warn!("Failed to parse view settings, using defaults: {}", e);
            ViewSettings::default()
        }
    }
}

//! Configuration management for Jendela
//!
//! Loads, validates and saves the TOML configuration. Every section is
//! optional; the defaults reproduce the stock widget behaviour (200×200
//! minimum, classic skin, 250ms state animations, z-indices from 99).

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

use crate::geometry::Size;
use crate::theme::Theme;
use crate::window::ButtonFlags;

/// Largest accepted `stack.z_index_base`. Leaves room above it for a
/// million windows before hitting `i32::MAX`.
pub const MAX_Z_INDEX_BASE: u32 = i32::MAX as u32 - 1_000_000;

/// Main configuration struct
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct JendelaConfig {
    /// Defaults for newly created windows
    #[serde(default)]
    pub window: WindowConfig,

    /// Animation timings
    #[serde(default)]
    pub animation: AnimationConfig,

    /// Stacking order
    #[serde(default)]
    pub stack: StackConfig,

    /// Viewport percentages and maximized windows resolve against
    #[serde(default)]
    pub viewport: ViewportConfig,

    /// Chrome metrics used for coordinate hit testing
    #[serde(default)]
    pub chrome: ChromeConfig,
}

/// Defaults for windows created without explicit options
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct WindowConfig {
    /// Minimum width (pixels)
    pub min_width: f64,

    /// Minimum height (pixels)
    pub min_height: f64,

    /// Skin for new windows
    pub theme: Theme,

    /// Header buttons for new windows
    pub buttons: ButtonFlags,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AnimationConfig {
    /// Minimize / maximize / restore duration (milliseconds)
    pub state_change_ms: u32,

    /// Close: shrink duration (milliseconds)
    pub close_transform_ms: u32,

    /// Close: fade duration (milliseconds)
    pub close_opacity_ms: u32,

    /// Close: delay before the window is removed (milliseconds)
    pub close_removal_ms: u32,

    /// Close: final scale factor
    pub close_scale: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct StackConfig {
    /// z-index of the bottom-most window
    pub z_index_base: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ViewportConfig {
    pub width: f64,
    pub height: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ChromeConfig {
    /// Title bar height (pixels)
    pub header_height: f64,

    /// Width of each header button (pixels)
    pub button_width: f64,

    /// Thickness of the edge resize handles (pixels)
    pub handle_thickness: f64,

    /// Side length of the corner resize handles (pixels)
    pub corner_size: f64,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            min_width: 200.0,
            min_height: 200.0,
            theme: Theme::Classic,
            buttons: ButtonFlags::default(),
        }
    }
}

impl WindowConfig {
    pub fn min_size(&self) -> Size {
        Size::new(self.min_width, self.min_height)
    }
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            state_change_ms: 250,
            close_transform_ms: 300,
            close_opacity_ms: 200,
            close_removal_ms: 300,
            close_scale: 0.75,
        }
    }
}

impl AnimationConfig {
    pub fn state_change(&self) -> Duration {
        Duration::from_millis(self.state_change_ms as u64)
    }

    pub fn close_removal(&self) -> Duration {
        Duration::from_millis(self.close_removal_ms as u64)
    }
}

impl Default for StackConfig {
    fn default() -> Self {
        Self { z_index_base: 99 }
    }
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            width: 1920.0,
            height: 1080.0,
        }
    }
}

impl ViewportConfig {
    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }
}

impl Default for ChromeConfig {
    fn default() -> Self {
        Self {
            header_height: 32.0,
            button_width: 30.0,
            handle_thickness: 6.0,
            corner_size: 12.0,
        }
    }
}

impl JendelaConfig {
    /// Load configuration from a TOML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        // Expand ~ to home directory
        let expanded_path = if path.to_string_lossy().starts_with('~') {
            let home = std::env::var("HOME").context("Failed to get HOME environment variable")?;
            Path::new(&home).join(path.strip_prefix("~").unwrap_or(path))
        } else {
            path.to_path_buf()
        };

        let contents = fs::read_to_string(&expanded_path)
            .with_context(|| format!("Failed to read config file: {}", expanded_path.display()))?;

        let config: JendelaConfig = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", expanded_path.display()))?;

        config.validate()?;

        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if !(self.window.min_width > 0.0) || !(self.window.min_height > 0.0) {
            anyhow::bail!(
                "Invalid minimum size {}x{}: both must be positive",
                self.window.min_width,
                self.window.min_height
            );
        }

        if !(self.viewport.width > 0.0) || !(self.viewport.height > 0.0) {
            anyhow::bail!("Invalid viewport: width and height must be positive");
        }

        // CSS z-index is a signed 32-bit integer
        if self.stack.z_index_base > MAX_Z_INDEX_BASE {
            anyhow::bail!(
                "Invalid z_index_base {}: must be at most {}",
                self.stack.z_index_base,
                MAX_Z_INDEX_BASE
            );
        }

        let animation = &self.animation;
        if animation.state_change_ms == 0
            || animation.close_transform_ms == 0
            || animation.close_opacity_ms == 0
            || animation.close_removal_ms == 0
        {
            anyhow::bail!("Invalid animation timing: durations must be non-zero");
        }

        if !(animation.close_scale > 0.0 && animation.close_scale <= 1.0) {
            anyhow::bail!("Invalid close_scale: must be in (0.0, 1.0]");
        }

        let chrome = &self.chrome;
        if chrome.header_height < 0.0
            || !(chrome.button_width > 0.0)
            || chrome.handle_thickness < 0.0
            || chrome.corner_size < chrome.handle_thickness
        {
            anyhow::bail!("Invalid chrome metrics");
        }

        Ok(())
    }

    /// Save configuration to a TOML file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let contents = toml::to_string_pretty(self).context("Failed to serialize configuration")?;

        fs::write(path, contents).context("Failed to write configuration file")?;

        Ok(())
    }

    /// Merge a partial configuration into this one.
    /// Sections of `partial` that differ from the defaults replace ours.
    pub fn merge_partial(mut self, partial: JendelaConfig) -> Self {
        let default_config = JendelaConfig::default();

        if partial.window != default_config.window {
            self.window = partial.window;
        }
        if partial.animation != default_config.animation {
            self.animation = partial.animation;
        }
        if partial.stack != default_config.stack {
            self.stack = partial.stack;
        }
        if partial.viewport != default_config.viewport {
            self.viewport = partial.viewport;
        }
        if partial.chrome != default_config.chrome {
            self.chrome = partial.chrome;
        }

        self
    }
}

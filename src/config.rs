// ⚙️ Gallery configuration (TOML)
//
// ```toml
// recent_window_days = 365
// ```

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Default length of the "recent art" window
pub const DEFAULT_RECENT_WINDOW_DAYS: u32 = 365;

/// Upper bound accepted for `recent_window_days` (100 years)
pub const MAX_RECENT_WINDOW_DAYS: u32 = 36_500;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GalleryConfig {
    /// Art created fewer than this many days before today counts as recent
    pub recent_window_days: u32,
}

impl Default for GalleryConfig {
    fn default() -> Self {
        GalleryConfig {
            recent_window_days: DEFAULT_RECENT_WINDOW_DAYS,
        }
    }
}

impl GalleryConfig {
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: GalleryConfig =
            toml::from_str(content).context("Failed to parse gallery config")?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        Self::from_toml_str(&content)
            .with_context(|| format!("Invalid config file {}", path.display()))
    }

    pub fn validate(&self) -> Result<()> {
        if self.recent_window_days > MAX_RECENT_WINDOW_DAYS {
            bail!(
                "recent_window_days must be at most {}, got {}",
                MAX_RECENT_WINDOW_DAYS,
                self.recent_window_days
            );
        }
        Ok(())
    }
}

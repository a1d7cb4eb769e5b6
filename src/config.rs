//! Site configuration module.
//!
//! Handles loading and validating `meatspace.toml` from the site root. Every
//! key is optional: stock defaults reproduce the site's fixed layout, and a
//! user file only needs the values it changes.
//!
//! ## Configuration Options
//!
//! ```toml
//! [photos]
//! dir = "assets/photos"          # Photo directory, relative to the site root
//! url_prefix = "/assets/photos"  # Public URL the directory is served under
//! width = 710                    # width attribute on the <img> tag
//! extensions = ["jpg", "jpeg"]   # Files `meatspace check` inspects
//! ```
//!
//! Unknown keys are rejected so that typos surface instead of silently
//! falling back to a default.

use serde::{Deserialize, Serialize};
use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use thiserror::Error;

pub const CONFIG_FILE: &str = "meatspace.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Site configuration loaded from `meatspace.toml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Where photos live and how they are referenced from pages.
    pub photos: PhotosConfig,
}

/// Photo location and `<img>` settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PhotosConfig {
    /// Photo directory relative to the site root.
    pub dir: String,
    /// URL prefix used in the `src` attribute.
    pub url_prefix: String,
    /// Value of the `width` attribute.
    pub width: u32,
    /// Lowercase file extensions considered photos by the check command.
    pub extensions: Vec<String>,
}

impl Default for PhotosConfig {
    fn default() -> Self {
        Self {
            dir: "assets/photos".to_string(),
            url_prefix: "/assets/photos".to_string(),
            width: 710,
            extensions: vec!["jpg".to_string(), "jpeg".to_string()],
        }
    }
}

impl SiteConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.photos.dir.trim().is_empty() {
            return Err(ConfigError::Validation(
                "photos.dir must not be empty".into(),
            ));
        }
        if self.photos.width == 0 {
            return Err(ConfigError::Validation(
                "photos.width must be non-zero".into(),
            ));
        }
        if self.photos.extensions.is_empty() {
            return Err(ConfigError::Validation(
                "photos.extensions must not be empty".into(),
            ));
        }
        Ok(())
    }
}

impl PhotosConfig {
    /// Whether `ext` (without the dot) is one of the configured photo
    /// extensions, ignoring case.
    pub fn matches_extension(&self, ext: &str) -> bool {
        self.extensions.iter().any(|e| e.eq_ignore_ascii_case(ext))
    }
}

// =============================================================================
// Loading
// =============================================================================

/// Load config for the site rooted at `root`.
///
/// A missing `meatspace.toml` yields the defaults. Keys absent from the
/// file keep their default through `#[serde(default)]`; arrays given in the
/// file replace the default list rather than extending it.
pub fn load_config(root: &Path) -> Result<SiteConfig, ConfigError> {
    let path = root.join(CONFIG_FILE);
    let config = match fs::read_to_string(&path) {
        Ok(content) => toml::from_str::<SiteConfig>(&content)?,
        Err(e) if e.kind() == ErrorKind::NotFound => SiteConfig::default(),
        Err(e) => return Err(e.into()),
    };
    config.validate()?;
    Ok(config)
}

/// Returns a fully-commented stock `meatspace.toml`.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# meatspace configuration
# =======================
# Place this file in the site root as meatspace.toml.
# All settings are optional; values shown are the defaults.
# Unknown keys will cause an error.

[photos]
# Photo directory, relative to the site root.
dir = "assets/photos"

# URL prefix for the <img src> attribute.
url_prefix = "/assets/photos"

# width attribute on every photo's <img> tag.
width = 710

# File extensions inspected by `meatspace check` (case-insensitive).
extensions = ["jpg", "jpeg"]
"##
}

//! Centralized configuration for appdrawer.
//!
//! Constants live on [`AppConfig`]. Everything that varies per user or per
//! test (directories, marker key) lives on [`DrawerContext`], which is passed
//! explicitly to the parser, writer and enumerator.

use crate::error::Result;
use crate::platform;
use std::path::{Path, PathBuf};

/// Application-level configuration.
pub struct AppConfig;

impl AppConfig {
    /// Private key that tags entries created or imported by this tool.
    pub const MARKER_KEY: &'static str = "X-Custom-Added";
    pub const MARKER_VALUE: &'static str = "1";

    pub const DESKTOP_SECTION: &'static str = "Desktop Entry";
    pub const DESKTOP_EXTENSION: &'static str = "desktop";
    pub const ENTRY_TYPE: &'static str = "Application";

    /// Stem used when a launcher name has no filename-safe characters.
    pub const FALLBACK_STEM: &'static str = "custom";

    pub const ICON_BUCKET: &'static str = "128x128";
    pub const DEFAULT_ICON_EXTENSION: &'static str = "png";

    pub const IMPORT_PREFIX: &'static str = "imported";
    pub const IMPORT_TIMESTAMP_FORMAT: &'static str = "%Y%m%d%H%M%S";

    pub const DESCRIPTOR_MODE: u32 = 0o644;
}

/// Directories and marker shared by every operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DrawerContext {
    apps_dir: PathBuf,
    icon_dir: PathBuf,
    marker_key: String,
    marker_value: String,
}

impl DrawerContext {
    /// Create a context over explicit directories with the default marker.
    pub fn new(apps_dir: impl Into<PathBuf>, icon_dir: impl Into<PathBuf>) -> Self {
        Self {
            apps_dir: apps_dir.into(),
            icon_dir: icon_dir.into(),
            marker_key: AppConfig::MARKER_KEY.to_string(),
            marker_value: AppConfig::MARKER_VALUE.to_string(),
        }
    }

    /// Resolve the per-user launcher and icon directories.
    pub fn from_home() -> Result<Self> {
        Ok(Self::new(
            platform::apps_dir()?,
            platform::icon_staging_dir()?,
        ))
    }

    /// Override the marker that identifies managed entries.
    pub fn with_marker(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.marker_key = key.into();
        self.marker_value = value.into();
        self
    }

    pub fn with_apps_dir(mut self, apps_dir: impl Into<PathBuf>) -> Self {
        self.apps_dir = apps_dir.into();
        self
    }

    pub fn with_icon_dir(mut self, icon_dir: impl Into<PathBuf>) -> Self {
        self.icon_dir = icon_dir.into();
        self
    }

    /// Directory holding the managed `*.desktop` files.
    pub fn apps_dir(&self) -> &Path {
        &self.apps_dir
    }

    /// Icon-theme bucket that staged icons are copied into.
    pub fn icon_dir(&self) -> &Path {
        &self.icon_dir
    }

    pub fn marker_key(&self) -> &str {
        &self.marker_key
    }

    pub fn marker_value(&self) -> &str {
        &self.marker_value
    }

    /// The `key=value` line written into every managed descriptor.
    pub fn marker_line(&self) -> String {
        format!("{}={}", self.marker_key, self.marker_value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_marker() {
        let ctx = DrawerContext::new("/tmp/apps", "/tmp/icons");
        assert_eq!(ctx.marker_key(), "X-Custom-Added");
        assert_eq!(ctx.marker_value(), "1");
        assert_eq!(ctx.marker_line(), "X-Custom-Added=1");
    }

    #[test]
    fn test_overrides() {
        let ctx = DrawerContext::new("/a", "/b")
            .with_marker("X-Mine", "yes")
            .with_apps_dir("/c");
        assert_eq!(ctx.apps_dir(), Path::new("/c"));
        assert_eq!(ctx.icon_dir(), Path::new("/b"));
        assert_eq!(ctx.marker_line(), "X-Mine=yes");
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn test_from_home_layout() {
        if let Ok(ctx) = DrawerContext::from_home() {
            assert!(ctx.apps_dir().ends_with(".local/share/applications"));
            assert!(ctx.icon_dir().ends_with("icons/hicolor/128x128/apps"));
        }
    }
}

//! Platform-specific path utilities.
//!
//! Resolves the freedesktop locations appdrawer works in:
//! - the per-user application menu directory
//! - the per-user icon theme bucket used for staged icons

use crate::config::AppConfig;
use crate::error::{DrawerError, Result};
use std::path::PathBuf;

fn home_dir() -> Result<PathBuf> {
    dirs::home_dir().ok_or_else(|| DrawerError::Config {
        message: "Could not determine home directory".to_string(),
    })
}

/// Get the per-user applications directory.
///
/// # Platform Behavior
/// - **Linux/BSD**: `~/.local/share/applications` (XDG data home)
/// - **Other**: unsupported, desktop entries are a freedesktop concept
pub fn apps_dir() -> Result<PathBuf> {
    #[cfg(all(unix, not(target_os = "macos")))]
    {
        Ok(home_dir()?.join(".local").join("share").join("applications"))
    }

    #[cfg(not(all(unix, not(target_os = "macos"))))]
    {
        Err(DrawerError::Config {
            message: "Desktop entries are only supported on freedesktop platforms".to_string(),
        })
    }
}

/// Get the icon theme bucket that launcher icons are staged into.
///
/// `~/.local/share/icons/hicolor/128x128/apps`
pub fn icon_staging_dir() -> Result<PathBuf> {
    #[cfg(all(unix, not(target_os = "macos")))]
    {
        Ok(home_dir()?
            .join(".local")
            .join("share")
            .join("icons")
            .join("hicolor")
            .join(AppConfig::ICON_BUCKET)
            .join("apps"))
    }

    #[cfg(not(all(unix, not(target_os = "macos"))))]
    {
        Err(DrawerError::Config {
            message: "Icon themes are only supported on freedesktop platforms".to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(target_os = "linux")]
    #[test]
    fn test_apps_dir() {
        let dir = apps_dir().unwrap();
        assert!(dir.ends_with(".local/share/applications"));
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn test_icon_staging_dir() {
        let dir = icon_staging_dir().unwrap();
        assert!(dir.ends_with(".local/share/icons/hicolor/128x128/apps"));
    }
}

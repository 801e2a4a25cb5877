//! Platform-specific file permission handling.

use crate::error::{DrawerError, Result};
use std::path::Path;
use tracing::debug;

/// Add user/group/other execute bits to a file's existing mode.
///
/// # Platform Behavior
/// - **Unix**: `mode | 0o111`, other bits are left alone
/// - **Windows**: No-op (executability is determined by extension)
pub fn add_execute_bits(path: &Path) -> Result<()> {
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let metadata =
            std::fs::metadata(path).map_err(|e| DrawerError::io_with_path(e, path))?;
        let mut permissions = metadata.permissions();
        permissions.set_mode(permissions.mode() | 0o111);
        std::fs::set_permissions(path, permissions)
            .map_err(|e| DrawerError::io_with_path(e, path))?;
        debug!("Added execute bits on: {}", path.display());
    }

    #[cfg(windows)]
    {
        debug!("Skipping execute bits on Windows for: {}", path.display());
    }

    Ok(())
}

/// Check if a file has any execute bit set.
///
/// Missing files are reported as not executable.
pub fn is_executable(path: &Path) -> bool {
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        std::fs::metadata(path)
            .map(|metadata| metadata.permissions().mode() & 0o111 != 0)
            .unwrap_or(false)
    }

    #[cfg(windows)]
    {
        if let Some(ext) = path.extension() {
            let ext_lower = ext.to_string_lossy().to_lowercase();
            matches!(ext_lower.as_str(), "exe" | "bat" | "cmd" | "ps1" | "com")
        } else {
            false
        }
    }
}

/// Set a file's permission bits outright.
pub fn set_mode(path: &Path, mode: u32) -> Result<()> {
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        std::fs::set_permissions(path, std::fs::Permissions::from_mode(mode))
            .map_err(|e| DrawerError::io_with_path(e, path))?;
        debug!("Set mode {:o} on: {}", mode, path.display());
    }

    #[cfg(windows)]
    {
        let _ = mode;
        debug!("Skipping mode change on Windows for: {}", path.display());
    }

    Ok(())
}

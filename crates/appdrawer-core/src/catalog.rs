//! Managed-entry enumeration.
//!
//! The listing is rebuilt from disk on every call. There is no cache to
//! invalidate, so changes made behind the tool's back show up on the next
//! refresh.

use crate::config::{AppConfig, DrawerContext};
use crate::descriptor::{parse_descriptor, DesktopDescriptor};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

fn is_descriptor_file(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext == AppConfig::DESKTOP_EXTENSION)
        && path.is_file()
}

/// All `*.desktop` files directly inside `dir`, unsorted.
///
/// A missing directory yields nothing.
pub fn descriptor_paths(dir: &Path) -> Vec<PathBuf> {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            if e.kind() == std::io::ErrorKind::NotFound {
                debug!("Launcher directory {} does not exist", dir.display());
            } else {
                warn!("Failed to read launcher directory {}: {}", dir.display(), e);
            }
            return Vec::new();
        }
    };

    entries
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry.path()),
            Err(e) => {
                warn!("Skipping unreadable entry in {}: {}", dir.display(), e);
                None
            }
        })
        .filter(|path| is_descriptor_file(path))
        .collect()
}

/// Every managed descriptor, sorted case-insensitively by display name.
pub fn list_managed(ctx: &DrawerContext) -> Vec<DesktopDescriptor> {
    let mut entries: Vec<(String, DesktopDescriptor)> = descriptor_paths(ctx.apps_dir())
        .iter()
        .map(|path| parse_descriptor(path))
        .filter(|descriptor| descriptor.is_managed(ctx))
        .map(|descriptor| (descriptor.display_name().to_lowercase(), descriptor))
        .collect();

    entries.sort_by(|(a_key, a), (b_key, b)| {
        a_key
            .cmp(b_key)
            .then_with(|| a.source_path().cmp(b.source_path()))
    });

    debug!(
        "Found {} managed launchers in {}",
        entries.len(),
        ctx.apps_dir().display()
    );
    entries.into_iter().map(|(_, descriptor)| descriptor).collect()
}

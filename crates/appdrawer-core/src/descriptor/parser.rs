//! Line-oriented reader for the `[Desktop Entry]` section.
//!
//! Malformed lines are skipped, never reported. A file that cannot be read
//! produces an empty field set and a warning so that one broken launcher
//! never stops a directory listing.

use super::entry::{DescriptorFields, DesktopDescriptor};
use crate::config::AppConfig;
use std::fs;
use std::path::Path;
use tracing::warn;

/// Parse descriptor text into the fields of its `[Desktop Entry]` section.
pub fn parse_descriptor_text(text: &str) -> DescriptorFields {
    let mut fields = DescriptorFields::default();
    let mut section: Option<&str> = None;

    for raw_line in text.lines() {
        let line = raw_line.trim_end();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        if let Some(name) = line.strip_prefix('[').and_then(|l| l.strip_suffix(']')) {
            section = Some(name);
            continue;
        }

        if section != Some(AppConfig::DESKTOP_SECTION) {
            continue;
        }

        if let Some((key, value)) = line.split_once('=') {
            fields.insert(key.trim(), value.trim());
        }
    }

    fields
}

/// Read and parse a descriptor file.
///
/// Never fails: read errors are logged and yield an empty field set.
pub fn parse_descriptor(path: &Path) -> DesktopDescriptor {
    let fields = match fs::read_to_string(path) {
        Ok(text) => parse_descriptor_text(&text),
        Err(e) => {
            warn!("Failed to read descriptor {}: {}", path.display(), e);
            DescriptorFields::default()
        }
    };
    DesktopDescriptor::new(path, fields)
}

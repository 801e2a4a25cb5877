//! Importing existing descriptor files.
//!
//! An import copies the file as-is into the managed directory and tags it
//! with the marker. Nothing else in the file is parsed or validated.
//!
//! Name clashes are resolved with a timestamp prefix
//! (`imported-20240131120000-app.desktop`), unlike the numeric suffix used
//! when creating entries.

use crate::config::{AppConfig, DrawerContext};
use crate::error::{DrawerError, Result};
use crate::writer::write_descriptor_file;
use chrono::{DateTime, Local, TimeZone};
use std::fmt::Display;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Name of the section a header line opens, if it is one.
fn section_header(line: &str) -> Option<&str> {
    line.trim_end()
        .strip_prefix('[')
        .and_then(|l| l.strip_suffix(']'))
}

/// Lines paired with whether they sit inside `[Desktop Entry]`.
fn entry_section_lines(contents: &str) -> impl Iterator<Item = (&str, bool)> {
    let mut in_entry = false;
    contents.split_inclusive('\n').map(move |line| {
        if let Some(name) = section_header(line) {
            in_entry = name == AppConfig::DESKTOP_SECTION;
            return (line, false);
        }
        (line, in_entry)
    })
}

fn is_key_line(line: &str, key: &str) -> bool {
    line.split_once('=').is_some_and(|(k, _)| k.trim() == key)
}

/// Value the entry section assigns to `key`, last assignment winning.
fn marker_value<'a>(contents: &'a str, key: &str) -> Option<&'a str> {
    entry_section_lines(contents)
        .filter(|(_, in_entry)| *in_entry)
        .filter_map(|(line, _)| line.split_once('='))
        .filter(|(k, _)| k.trim() == key)
        .map(|(_, v)| v.trim())
        .last()
}

/// Tag descriptor text with the marker line.
///
/// Contents whose `[Desktop Entry]` section already carries the marker are
/// returned unchanged, so the marker never appears twice. A marker key in
/// that section holding some other value is rewritten in place. Otherwise
/// the marker goes right after the `[Desktop Entry]` header, or at the end
/// when there is no header. Marker keys in other sections are left alone.
pub fn inject_marker(contents: &str, ctx: &DrawerContext) -> String {
    let marker = ctx.marker_line();
    match marker_value(contents, ctx.marker_key()) {
        Some(value) if value == ctx.marker_value() => return contents.to_string(),
        Some(_) => return replace_marker_lines(contents, ctx.marker_key(), &marker),
        None => {}
    }

    let mut out = String::with_capacity(contents.len() + marker.len() + 2);
    let mut injected = false;

    for line in contents.split_inclusive('\n') {
        out.push_str(line);
        if !injected && section_header(line) == Some(AppConfig::DESKTOP_SECTION) {
            if !line.ends_with('\n') {
                out.push('\n');
            }
            out.push_str(&marker);
            out.push('\n');
            injected = true;
        }
    }

    if !injected {
        if !out.is_empty() && !out.ends_with('\n') {
            out.push('\n');
        }
        out.push_str(&marker);
        out.push('\n');
    }

    out
}

fn replace_marker_lines(contents: &str, key: &str, marker: &str) -> String {
    entry_section_lines(contents)
        .map(|(line, in_entry)| {
            if in_entry && is_key_line(line, key) {
                let ending = &line[line.trim_end_matches(['\r', '\n']).len()..];
                format!("{}{}", marker, ending)
            } else {
                line.to_string()
            }
        })
        .collect()
}

/// Target path for an imported file, never an existing one.
pub fn import_target_path(apps_dir: &Path, file_name: &str, stamp: &impl Display) -> PathBuf {
    let direct = apps_dir.join(file_name);
    if !direct.exists() {
        return direct;
    }

    let prefix = format!("{}-{}", AppConfig::IMPORT_PREFIX, stamp);
    let mut candidate = apps_dir.join(format!("{}-{}", prefix, file_name));
    let mut counter = 1u32;
    while candidate.exists() {
        candidate = apps_dir.join(format!("{}-{}-{}", prefix, counter, file_name));
        counter += 1;
    }
    candidate
}

/// Import a descriptor, stamping clashes with the current local time.
pub fn import_descriptor(ctx: &DrawerContext, source: &Path) -> Result<PathBuf> {
    import_descriptor_at(ctx, source, Local::now())
}

/// Import a descriptor using the given clock reading for clash names.
pub fn import_descriptor_at<Tz>(
    ctx: &DrawerContext,
    source: &Path,
    now: DateTime<Tz>,
) -> Result<PathBuf>
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let file_name = source
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .ok_or_else(|| DrawerError::validation("source", "Choose a .desktop file"))?;

    let contents = fs::read_to_string(source).map_err(|e| DrawerError::Io {
        message: "read desktop file".to_string(),
        path: Some(source.to_path_buf()),
        source: Some(e),
    })?;

    let contents = inject_marker(&contents, ctx);
    let stamp = now.format(AppConfig::IMPORT_TIMESTAMP_FORMAT);
    let target = import_target_path(ctx.apps_dir(), &file_name, &stamp);
    debug!("Importing {} as {}", source.display(), target.display());

    write_descriptor_file(&target, &contents)?;
    info!("Imported {} to {}", source.display(), target.display());
    Ok(target)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use tempfile::TempDir;

    fn context(temp_dir: &TempDir) -> DrawerContext {
        DrawerContext::new(temp_dir.path().join("apps"), temp_dir.path().join("icons"))
    }

    #[test]
    fn test_inject_marker_after_header() {
        let temp_dir = TempDir::new().unwrap();
        let ctx = context(&temp_dir);
        let text = "# hi\n[Desktop Entry]\nName=A\n[Desktop Action x]\nName=X\n";
        assert_eq!(
            inject_marker(text, &ctx),
            "# hi\n[Desktop Entry]\nX-Custom-Added=1\nName=A\n[Desktop Action x]\nName=X\n"
        );
    }

    #[test]
    fn test_inject_marker_without_header_or_newline() {
        let temp_dir = TempDir::new().unwrap();
        let ctx = context(&temp_dir);
        assert_eq!(inject_marker("Name=A", &ctx), "Name=A\nX-Custom-Added=1\n");
        assert_eq!(inject_marker("", &ctx), "X-Custom-Added=1\n");
        assert_eq!(
            inject_marker("[Desktop Entry]", &ctx),
            "[Desktop Entry]\nX-Custom-Added=1\n"
        );
    }

    #[test]
    fn test_inject_marker_keeps_existing_marker() {
        let temp_dir = TempDir::new().unwrap();
        let ctx = context(&temp_dir);
        let text = "[Desktop Entry]\nName=A\nX-Custom-Added = 1\n";
        assert_eq!(inject_marker(text, &ctx), text);
    }

    #[test]
    fn test_inject_marker_rewrites_other_value() {
        let temp_dir = TempDir::new().unwrap();
        let ctx = context(&temp_dir);
        let text = "[Desktop Entry]\r\nX-Custom-Added=0\r\nName=A\r\n";
        assert_eq!(
            inject_marker(text, &ctx),
            "[Desktop Entry]\r\nX-Custom-Added=1\r\nName=A\r\n"
        );
    }

    #[test]
    fn test_inject_marker_ignores_other_sections() {
        let temp_dir = TempDir::new().unwrap();
        let ctx = context(&temp_dir);
        let text = "[Desktop Entry]\nName=A\n[Desktop Action x]\nX-Custom-Added=1\n";
        assert_eq!(
            inject_marker(text, &ctx),
            "[Desktop Entry]\nX-Custom-Added=1\nName=A\n[Desktop Action x]\nX-Custom-Added=1\n"
        );

        let text = "[Desktop Entry]\nX-Custom-Added=0\n[Desktop Action x]\nX-Custom-Added=0\n";
        assert_eq!(
            inject_marker(text, &ctx),
            "[Desktop Entry]\nX-Custom-Added=1\n[Desktop Action x]\nX-Custom-Added=0\n"
        );
    }

    #[test]
    fn test_import_target_path_collision_uses_timestamp() {
        let temp_dir = TempDir::new().unwrap();
        let dir = temp_dir.path();
        assert_eq!(
            import_target_path(dir, "app.desktop", &"20240131120000"),
            dir.join("app.desktop")
        );

        fs::write(dir.join("app.desktop"), "").unwrap();
        let stamped = import_target_path(dir, "app.desktop", &"20240131120000");
        assert_eq!(stamped, dir.join("imported-20240131120000-app.desktop"));

        fs::write(&stamped, "").unwrap();
        assert_eq!(
            import_target_path(dir, "app.desktop", &"20240131120000"),
            dir.join("imported-20240131120000-1-app.desktop")
        );
    }

    #[test]
    fn test_import_descriptor_at() {
        let temp_dir = TempDir::new().unwrap();
        let ctx = context(&temp_dir);
        let source = temp_dir.path().join("tool.desktop");
        fs::write(&source, "[Desktop Entry]\nName=Tool\nExec=tool\n").unwrap();
        let now = Utc.with_ymd_and_hms(2024, 1, 31, 12, 0, 5).unwrap();

        let first = import_descriptor_at(&ctx, &source, now).unwrap();
        assert_eq!(first, ctx.apps_dir().join("tool.desktop"));

        let second = import_descriptor_at(&ctx, &source, now).unwrap();
        assert_eq!(
            second,
            ctx.apps_dir().join("imported-20240131120005-tool.desktop")
        );

        let contents = fs::read_to_string(&second).unwrap();
        assert_eq!(contents.matches("X-Custom-Added=1").count(), 1);
    }

    #[test]
    fn test_import_missing_source_is_io_error() {
        let temp_dir = TempDir::new().unwrap();
        let ctx = context(&temp_dir);
        let err = import_descriptor(&ctx, &temp_dir.path().join("missing.desktop")).unwrap_err();
        assert!(matches!(err, DrawerError::Io { .. }));
        assert!(!ctx.apps_dir().exists());
    }
}

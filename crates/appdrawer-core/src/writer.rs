//! Descriptor file generation.
//!
//! Entries are always written whole: the form state is rendered into a
//! fresh `[Desktop Entry]` section and replaces whatever was on disk.

use crate::config::{AppConfig, DrawerContext};
use crate::descriptor::DesktopDescriptor;
use crate::error::{DrawerError, Result};
use crate::platform;
use std::fmt::Write as FmtWrite;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// User-supplied launcher fields, as collected by a create or edit form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LauncherFields {
    /// Entry name (shown in menus).
    pub name: String,
    /// Complete Exec line.
    pub exec: String,
    /// Whether to run in a terminal.
    pub terminal: bool,
    pub comment: Option<String>,
    /// Icon theme name or path to an image file.
    pub icon: Option<String>,
    /// Semicolon-separated category list.
    pub categories: Option<String>,
}

impl LauncherFields {
    pub fn new(name: impl Into<String>, exec: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            exec: exec.into(),
            ..Self::default()
        }
    }

    /// Pre-fill an edit form from an existing entry.
    pub fn from_descriptor(descriptor: &DesktopDescriptor) -> Self {
        let fields = descriptor.fields();
        Self {
            name: fields.name.clone().unwrap_or_default(),
            exec: fields.exec.clone().unwrap_or_default(),
            terminal: fields.runs_in_terminal(),
            comment: fields.comment.clone(),
            icon: fields.icon.clone(),
            categories: fields.categories.clone(),
        }
    }

    pub fn terminal(mut self, terminal: bool) -> Self {
        self.terminal = terminal;
        self
    }

    pub fn comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    pub fn icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    pub fn categories(mut self, categories: impl Into<String>) -> Self {
        self.categories = Some(categories.into());
        self
    }

    /// Trim every value and drop optional values that end up empty.
    pub fn normalized(&self) -> Self {
        let optional = |value: &Option<String>| {
            value
                .as_deref()
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(str::to_string)
        };
        Self {
            name: self.name.trim().to_string(),
            exec: self.exec.trim().to_string(),
            terminal: self.terminal,
            comment: optional(&self.comment),
            icon: optional(&self.icon),
            categories: optional(&self.categories),
        }
    }

    /// Reject the fields before anything is written.
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(DrawerError::validation("name", "Name required"));
        }
        if self.exec.trim().is_empty() {
            return Err(DrawerError::validation("exec", "Exec required"));
        }
        let single_line = [
            ("name", Some(self.name.as_str())),
            ("exec", Some(self.exec.as_str())),
            ("comment", self.comment.as_deref()),
            ("icon", self.icon.as_deref()),
            ("categories", self.categories.as_deref()),
        ];
        for (field, value) in single_line {
            if value.is_some_and(|v| v.contains(['\n', '\r'])) {
                return Err(DrawerError::validation(
                    field,
                    "Value must fit on a single line",
                ));
            }
        }
        Ok(())
    }
}

/// Filename stem for a launcher name: `[A-Za-z0-9_-]` only, spaces dropped.
pub fn derive_file_stem(name: &str) -> String {
    let stem: String = name
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '-' || *c == '_')
        .collect();
    if stem.is_empty() {
        AppConfig::FALLBACK_STEM.to_string()
    } else {
        stem
    }
}

/// First unused `stem.desktop`, `stem-1.desktop`, `stem-2.desktop`, ...
pub fn unique_descriptor_path(dir: &Path, stem: &str) -> PathBuf {
    let ext = AppConfig::DESKTOP_EXTENSION;
    let mut candidate = dir.join(format!("{}.{}", stem, ext));
    let mut counter = 1u32;
    while candidate.exists() {
        candidate = dir.join(format!("{}-{}.{}", stem, counter, ext));
        counter += 1;
    }
    candidate
}

/// Desktop entry list values must end in `;`.
pub fn normalize_categories(raw: &str) -> String {
    let categories = raw.trim();
    if categories.is_empty() || categories.ends_with(';') {
        categories.to_string()
    } else {
        format!("{};", categories)
    }
}

/// Copy an icon file into the icon theme bucket.
///
/// Returns the value to record as `Icon=`: the absolute staged path when
/// `icon` is a regular file that could be copied, otherwise `icon` itself.
/// A failed copy is logged and never aborts the write.
pub fn stage_icon(ctx: &DrawerContext, icon: &str, stem: &str) -> String {
    let source = Path::new(icon);
    if !source.is_file() {
        return icon.to_string();
    }

    let ext = source
        .extension()
        .map(|ext| ext.to_string_lossy().into_owned())
        .unwrap_or_else(|| AppConfig::DEFAULT_ICON_EXTENSION.to_string());
    let dest = ctx.icon_dir().join(format!("{}.{}", stem, ext));

    if source == dest {
        return dest.to_string_lossy().into_owned();
    }

    if let Err(e) = fs::create_dir_all(ctx.icon_dir()) {
        warn!(
            "Failed to create icon directory {}: {}",
            ctx.icon_dir().display(),
            e
        );
        return icon.to_string();
    }

    match fs::copy(source, &dest) {
        Ok(_) => {
            debug!("Staged icon {} at {}", source.display(), dest.display());
            dest.to_string_lossy().into_owned()
        }
        Err(e) => {
            warn!("Failed to stage icon {}: {}", source.display(), e);
            icon.to_string()
        }
    }
}

/// Render descriptor text.
///
/// `icon` is the already-staged value. The marker line is always last and
/// always present exactly once.
pub fn render_descriptor(fields: &LauncherFields, icon: Option<&str>, ctx: &DrawerContext) -> String {
    let mut content = String::new();

    // Writing into a String cannot fail.
    let _ = writeln!(content, "[{}]", AppConfig::DESKTOP_SECTION);
    let _ = writeln!(content, "Name={}", fields.name);
    let _ = writeln!(content, "Type={}", AppConfig::ENTRY_TYPE);
    let _ = writeln!(content, "Exec={}", fields.exec);
    let _ = writeln!(
        content,
        "Terminal={}",
        if fields.terminal { "true" } else { "false" }
    );

    if let Some(comment) = fields.comment.as_deref() {
        let _ = writeln!(content, "Comment={}", comment);
    }
    if let Some(icon) = icon.filter(|i| !i.is_empty()) {
        let _ = writeln!(content, "Icon={}", icon);
    }
    if let Some(categories) = fields.categories.as_deref() {
        let categories = normalize_categories(categories);
        if !categories.is_empty() {
            let _ = writeln!(content, "Categories={}", categories);
        }
    }

    let _ = writeln!(content, "{}", ctx.marker_line());

    content
}

/// Write descriptor text and give it mode 0644.
pub fn write_descriptor_file(path: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| DrawerError::Io {
            message: "create directory".to_string(),
            path: Some(parent.to_path_buf()),
            source: Some(e),
        })?;
    }

    fs::write(path, contents).map_err(|e| DrawerError::Io {
        message: "write desktop file".to_string(),
        path: Some(path.to_path_buf()),
        source: Some(e),
    })?;

    platform::set_mode(path, AppConfig::DESCRIPTOR_MODE)?;

    debug!("Wrote desktop entry to {:?}", path);
    Ok(())
}

/// Add execute bits to a launch target. Best-effort.
pub fn mark_executable(path: &Path) {
    if let Err(e) = platform::add_execute_bits(path) {
        debug!("Could not mark {} executable: {}", path.display(), e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::parse_descriptor_text;
    use tempfile::TempDir;

    fn context(temp_dir: &TempDir) -> DrawerContext {
        DrawerContext::new(temp_dir.path().join("apps"), temp_dir.path().join("icons"))
    }

    #[test]
    fn test_derive_file_stem() {
        assert_eq!(derive_file_stem("My App"), "MyApp");
        assert_eq!(derive_file_stem("tool_v2-beta!"), "tool_v2-beta");
        assert_eq!(derive_file_stem("日本語 ✓"), "custom");
        assert_eq!(derive_file_stem(""), "custom");
    }

    #[test]
    fn test_unique_descriptor_path() {
        let temp_dir = TempDir::new().unwrap();
        let dir = temp_dir.path();

        let first = unique_descriptor_path(dir, "App");
        assert_eq!(first, dir.join("App.desktop"));
        fs::write(&first, "").unwrap();

        let second = unique_descriptor_path(dir, "App");
        assert_eq!(second, dir.join("App-1.desktop"));
        fs::write(&second, "").unwrap();

        assert_eq!(unique_descriptor_path(dir, "App"), dir.join("App-2.desktop"));
    }

    #[test]
    fn test_normalize_categories() {
        assert_eq!(normalize_categories("Utility;Development"), "Utility;Development;");
        assert_eq!(normalize_categories("Utility;Development;"), "Utility;Development;");
        assert_eq!(normalize_categories("  Game "), "Game;");
        assert_eq!(normalize_categories(""), "");
    }

    #[test]
    fn test_render_field_order() {
        let temp_dir = TempDir::new().unwrap();
        let ctx = context(&temp_dir);
        let fields = LauncherFields::new("Tool", "python3 /opt/tool.py")
            .terminal(true)
            .comment("Does things")
            .categories("Utility");

        let content = render_descriptor(&fields, Some("utilities-terminal"), &ctx);
        assert_eq!(
            content,
            "[Desktop Entry]\n\
             Name=Tool\n\
             Type=Application\n\
             Exec=python3 /opt/tool.py\n\
             Terminal=true\n\
             Comment=Does things\n\
             Icon=utilities-terminal\n\
             Categories=Utility;\n\
             X-Custom-Added=1\n"
        );
    }

    #[test]
    fn test_render_minimal_parses_back_as_valid_managed() {
        let temp_dir = TempDir::new().unwrap();
        let ctx = context(&temp_dir);
        let content = render_descriptor(&LauncherFields::new("A", "a"), None, &ctx);

        assert!(content.ends_with('\n'));
        assert_eq!(content.matches("X-Custom-Added=").count(), 1);

        let parsed = DesktopDescriptor::new("/x/A.desktop", parse_descriptor_text(&content));
        assert!(parsed.is_valid());
        assert!(parsed.is_managed(&ctx));
        assert_eq!(parsed.fields().terminal.as_deref(), Some("false"));
        assert!(parsed.icon().is_none());
    }

    #[test]
    fn test_normalized_drops_blank_optionals() {
        let fields = LauncherFields::new("  Name ", " cmd ")
            .comment("   ")
            .icon("")
            .categories(" Dev ")
            .normalized();
        assert_eq!(fields.name, "Name");
        assert_eq!(fields.exec, "cmd");
        assert!(fields.comment.is_none());
        assert!(fields.icon.is_none());
        assert_eq!(fields.categories.as_deref(), Some("Dev"));
    }

    #[test]
    fn test_validate() {
        assert!(LauncherFields::new("A", "a").validate().is_ok());

        let err = LauncherFields::new(" ", "a").validate().unwrap_err();
        assert!(matches!(err, DrawerError::Validation { ref field, .. } if field == "name"));

        let err = LauncherFields::new("A", "").validate().unwrap_err();
        assert!(matches!(err, DrawerError::Validation { ref field, .. } if field == "exec"));

        assert!(LauncherFields::new("A\nB", "a").validate().is_err());
    }

    fn rejected_field(fields: LauncherFields) -> String {
        match fields.validate() {
            Err(DrawerError::Validation { field, .. }) => field,
            other => panic!("expected a validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_validate_names_the_multiline_field() {
        let base = || LauncherFields::new("A", "a");
        assert_eq!(rejected_field(LauncherFields::new("A\r", "a")), "name");
        assert_eq!(rejected_field(LauncherFields::new("A", "run\nrm")), "exec");
        assert_eq!(
            rejected_field(base().comment("hello\n[Desktop Action x]")),
            "comment"
        );
        assert_eq!(rejected_field(base().icon("logo\r\n.png")), "icon");
        assert_eq!(rejected_field(base().categories("Utility;\nGame")), "categories");
    }

    #[test]
    fn test_stage_icon_copies_file() {
        let temp_dir = TempDir::new().unwrap();
        let ctx = context(&temp_dir);
        let source = temp_dir.path().join("logo.svg");
        fs::write(&source, "<svg/>").unwrap();

        let staged = stage_icon(&ctx, source.to_str().unwrap(), "MyApp");
        let expected = ctx.icon_dir().join("MyApp.svg");
        assert_eq!(staged, expected.to_string_lossy());
        assert_eq!(fs::read_to_string(expected).unwrap(), "<svg/>");
    }

    #[test]
    fn test_stage_icon_defaults_to_png_extension() {
        let temp_dir = TempDir::new().unwrap();
        let ctx = context(&temp_dir);
        let source = temp_dir.path().join("logo");
        fs::write(&source, "img").unwrap();

        let staged = stage_icon(&ctx, source.to_str().unwrap(), "Tool");
        assert!(staged.ends_with("Tool.png"));
    }

    #[test]
    fn test_stage_icon_keeps_theme_names() {
        let temp_dir = TempDir::new().unwrap();
        let ctx = context(&temp_dir);
        assert_eq!(stage_icon(&ctx, "utilities-terminal", "x"), "utilities-terminal");
        assert!(!ctx.icon_dir().exists());
    }

    #[test]
    fn test_stage_icon_copy_failure_falls_back() {
        let temp_dir = TempDir::new().unwrap();
        // icon dir path is occupied by a regular file, so it cannot be created
        let blocker = temp_dir.path().join("icons");
        fs::write(&blocker, "").unwrap();
        let ctx = DrawerContext::new(temp_dir.path().join("apps"), &blocker);

        let source = temp_dir.path().join("logo.png");
        fs::write(&source, "img").unwrap();
        let icon = source.to_str().unwrap();

        assert_eq!(stage_icon(&ctx, icon, "x"), icon);
    }

    #[test]
    fn test_stage_icon_already_staged() {
        let temp_dir = TempDir::new().unwrap();
        let ctx = context(&temp_dir);
        fs::create_dir_all(ctx.icon_dir()).unwrap();
        let staged = ctx.icon_dir().join("Tool.png");
        fs::write(&staged, "img").unwrap();

        let value = stage_icon(&ctx, staged.to_str().unwrap(), "Tool");
        assert_eq!(value, staged.to_string_lossy());
        assert_eq!(fs::read_to_string(&staged).unwrap(), "img");
    }

    #[test]
    fn test_write_descriptor_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("a.desktop");

        write_descriptor_file(&path, "[Desktop Entry]\n").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "[Desktop Entry]\n");

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mode = fs::metadata(&path).unwrap().permissions().mode();
            assert_eq!(mode & 0o777, 0o644);
        }
    }

    #[test]
    fn test_mark_executable_is_best_effort() {
        let temp_dir = TempDir::new().unwrap();
        // Must not panic or error on a missing file
        mark_executable(&temp_dir.path().join("missing.sh"));

        let script = temp_dir.path().join("run.sh");
        fs::write(&script, "#!/bin/sh\n").unwrap();
        mark_executable(&script);
        #[cfg(unix)]
        assert!(platform::is_executable(&script));
    }

    #[test]
    fn test_from_descriptor_round_trip() {
        let text = "[Desktop Entry]\nName=Tool\nType=Application\nExec=tool\nTerminal=true\nIcon=tool\nCategories=Dev;\nX-Custom-Added=1\n";
        let descriptor = DesktopDescriptor::new("/a/Tool.desktop", parse_descriptor_text(text));
        let fields = LauncherFields::from_descriptor(&descriptor);
        assert_eq!(fields.name, "Tool");
        assert!(fields.terminal);
        assert_eq!(fields.icon.as_deref(), Some("tool"));
        assert_eq!(fields.categories.as_deref(), Some("Dev;"));
    }
}

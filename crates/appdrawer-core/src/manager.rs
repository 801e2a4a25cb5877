//! High-level launcher management.
//!
//! [`LauncherManager`] is what a front end talks to. Each call performs its
//! file I/O inline and returns; callers refresh their listing with
//! [`LauncherManager::list_managed`] afterwards.

use crate::catalog;
use crate::command::{self, Wrapper};
use crate::config::DrawerContext;
use crate::descriptor::{parse_descriptor, DesktopDescriptor};
use crate::error::{DrawerError, Result};
use crate::import;
use crate::writer::{self, LauncherFields};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Everything the create form collects.
#[derive(Debug, Clone, Default)]
pub struct CreateRequest {
    pub name: String,
    /// Script or executable the launcher runs.
    pub target: Option<PathBuf>,
    pub wrapper: Wrapper,
    /// Extra arguments, split with shell-word rules.
    pub arguments: String,
    pub comment: Option<String>,
    pub icon: Option<String>,
    pub categories: Option<String>,
    pub terminal: bool,
    /// Add execute bits to `target` before writing.
    pub mark_executable: bool,
}

impl CreateRequest {
    pub fn new(name: impl Into<String>, target: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            target: Some(target.into()),
            mark_executable: true,
            ..Self::default()
        }
    }
}

/// What a delete call found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    Removed,
    /// The file was already gone; nothing to do.
    AlreadyAbsent,
}

/// Launcher manager bound to one set of directories.
#[derive(Debug, Clone)]
pub struct LauncherManager {
    ctx: DrawerContext,
}

impl LauncherManager {
    pub fn new(ctx: DrawerContext) -> Self {
        Self { ctx }
    }

    /// Manager over the current user's launcher and icon directories.
    pub fn for_current_user() -> Result<Self> {
        Ok(Self::new(DrawerContext::from_home()?))
    }

    pub fn context(&self) -> &DrawerContext {
        &self.ctx
    }

    /// Read one descriptor. Unreadable files come back with no fields.
    pub fn parse(&self, path: &Path) -> DesktopDescriptor {
        parse_descriptor(path)
    }

    /// Managed entries, sorted by display name.
    pub fn list_managed(&self) -> Vec<DesktopDescriptor> {
        catalog::list_managed(&self.ctx)
    }

    pub fn build_command(&self, target: Option<&Path>, wrapper: &Wrapper, arguments: &str) -> String {
        command::build_command(target, wrapper, arguments)
    }

    /// Create a new launcher and return the path it was written to.
    pub fn write_new(&self, request: &CreateRequest) -> Result<PathBuf> {
        let target = request
            .target
            .as_deref()
            .filter(|t| !t.as_os_str().is_empty())
            .ok_or_else(|| DrawerError::validation("target", "Pick a file"))?;

        let name = request.name.trim();
        if name.is_empty() {
            return Err(DrawerError::validation("name", "Name required"));
        }

        let exec = command::build_command(Some(target), &request.wrapper, &request.arguments);
        if exec.is_empty() {
            return Err(DrawerError::validation("exec", "Exec could not be built"));
        }

        let mut fields = LauncherFields::new(name, exec).terminal(request.terminal);
        fields.comment = request.comment.clone();
        fields.icon = request.icon.clone();
        fields.categories = request.categories.clone();
        let fields = fields.normalized();
        fields.validate()?;

        if request.mark_executable {
            writer::mark_executable(target);
        }

        let stem = writer::derive_file_stem(&fields.name);
        let path = writer::unique_descriptor_path(self.ctx.apps_dir(), &stem);
        let icon = fields
            .icon
            .as_deref()
            .map(|icon| writer::stage_icon(&self.ctx, icon, &stem));

        let contents = writer::render_descriptor(&fields, icon.as_deref(), &self.ctx);
        writer::write_descriptor_file(&path, &contents)?;

        info!("Created launcher {:?} at {}", fields.name, path.display());
        Ok(path)
    }

    /// Rewrite an existing managed launcher from edited fields.
    pub fn write_edit(&self, path: &Path, fields: &LauncherFields) -> Result<PathBuf> {
        self.require_managed(path)?;

        let fields = fields.normalized();
        fields.validate()?;

        let stem = path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_else(|| writer::derive_file_stem(&fields.name));
        let icon = fields
            .icon
            .as_deref()
            .map(|icon| writer::stage_icon(&self.ctx, icon, &stem));

        let contents = writer::render_descriptor(&fields, icon.as_deref(), &self.ctx);
        writer::write_descriptor_file(path, &contents)?;

        info!("Saved launcher {:?} at {}", fields.name, path.display());
        Ok(path.to_path_buf())
    }

    /// Remove a managed launcher's file.
    ///
    /// A file that is already gone counts as success. Files outside the
    /// launcher directory are refused even when they carry the marker.
    pub fn delete(&self, path: &Path) -> Result<DeleteOutcome> {
        if !path.exists() {
            debug!("Launcher {} already removed", path.display());
            return Ok(DeleteOutcome::AlreadyAbsent);
        }

        if !self.is_in_apps_dir(path) || !parse_descriptor(path).is_managed(&self.ctx) {
            return Err(DrawerError::NotManaged(path.to_path_buf()));
        }

        match fs::remove_file(path) {
            Ok(()) => {
                info!("Deleted launcher {}", path.display());
                Ok(DeleteOutcome::Removed)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(DeleteOutcome::AlreadyAbsent),
            Err(e) => Err(DrawerError::Io {
                message: "delete desktop file".to_string(),
                path: Some(path.to_path_buf()),
                source: Some(e),
            }),
        }
    }

    /// Copy an existing descriptor into the managed directory.
    pub fn import(&self, source: &Path) -> Result<PathBuf> {
        import::import_descriptor(&self.ctx, source)
    }

    fn require_managed(&self, path: &Path) -> Result<DesktopDescriptor> {
        if !path.is_file() {
            return Err(DrawerError::NotFound(path.to_path_buf()));
        }
        let descriptor = parse_descriptor(path);
        if !self.is_in_apps_dir(path) || !descriptor.is_managed(&self.ctx) {
            return Err(DrawerError::NotManaged(path.to_path_buf()));
        }
        Ok(descriptor)
    }

    /// Whether `path` sits directly inside the launcher directory.
    fn is_in_apps_dir(&self, path: &Path) -> bool {
        let parent = match path.parent() {
            Some(parent) if parent.as_os_str().is_empty() => Path::new("."),
            Some(parent) => parent,
            None => return false,
        };
        match (fs::canonicalize(parent), fs::canonicalize(self.ctx.apps_dir())) {
            (Ok(parent), Ok(apps_dir)) => parent == apps_dir,
            _ => parent == self.ctx.apps_dir(),
        }
    }
}

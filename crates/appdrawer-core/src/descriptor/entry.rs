//! In-memory representation of one launcher file.

use crate::config::{AppConfig, DrawerContext};
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Keys read from the `[Desktop Entry]` section.
///
/// Recognized keys get their own field; anything else is kept verbatim in
/// `extra`. Rewrites only emit the recognized keys, so `extra` is dropped
/// when an entry is edited.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DescriptorFields {
    pub name: Option<String>,
    pub entry_type: Option<String>,
    pub exec: Option<String>,
    pub terminal: Option<String>,
    pub comment: Option<String>,
    pub icon: Option<String>,
    pub categories: Option<String>,
    /// Value of the `X-Custom-Added` marker key.
    pub custom_added: Option<String>,
    pub extra: BTreeMap<String, String>,
}

impl DescriptorFields {
    /// Store a value, replacing any earlier value for the same key.
    pub fn insert(&mut self, key: &str, value: impl Into<String>) {
        let value = value.into();
        match key {
            "Name" => self.name = Some(value),
            "Type" => self.entry_type = Some(value),
            "Exec" => self.exec = Some(value),
            "Terminal" => self.terminal = Some(value),
            "Comment" => self.comment = Some(value),
            "Icon" => self.icon = Some(value),
            "Categories" => self.categories = Some(value),
            AppConfig::MARKER_KEY => self.custom_added = Some(value),
            _ => {
                self.extra.insert(key.to_string(), value);
            }
        }
    }

    /// Look up a value by its raw key.
    pub fn get(&self, key: &str) -> Option<&str> {
        match key {
            "Name" => self.name.as_deref(),
            "Type" => self.entry_type.as_deref(),
            "Exec" => self.exec.as_deref(),
            "Terminal" => self.terminal.as_deref(),
            "Comment" => self.comment.as_deref(),
            "Icon" => self.icon.as_deref(),
            "Categories" => self.categories.as_deref(),
            AppConfig::MARKER_KEY => self.custom_added.as_deref(),
            _ => self.extra.get(key).map(String::as_str),
        }
    }

    pub fn len(&self) -> usize {
        [
            &self.name,
            &self.entry_type,
            &self.exec,
            &self.terminal,
            &self.comment,
            &self.icon,
            &self.categories,
            &self.custom_added,
        ]
        .iter()
        .filter(|value| value.is_some())
        .count()
            + self.extra.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// `Terminal=true`, compared case-insensitively.
    pub fn runs_in_terminal(&self) -> bool {
        self.terminal
            .as_deref()
            .is_some_and(|value| value.eq_ignore_ascii_case("true"))
    }
}

/// One descriptor file and the fields parsed from it.
///
/// The path is the identity: two descriptors are the same entry iff they
/// point at the same file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DesktopDescriptor {
    source_path: PathBuf,
    fields: DescriptorFields,
}

impl DesktopDescriptor {
    pub fn new(source_path: impl Into<PathBuf>, fields: DescriptorFields) -> Self {
        Self {
            source_path: source_path.into(),
            fields,
        }
    }

    pub fn source_path(&self) -> &Path {
        &self.source_path
    }

    pub fn fields(&self) -> &DescriptorFields {
        &self.fields
    }

    /// `Name`, falling back to the file's base name.
    pub fn display_name(&self) -> String {
        match self.fields.name.as_deref() {
            Some(name) => name.to_string(),
            None => self
                .source_path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_default(),
        }
    }

    /// Icon theme name or absolute icon path.
    pub fn icon(&self) -> Option<&str> {
        self.fields.icon.as_deref()
    }

    pub fn exec(&self) -> Option<&str> {
        self.fields.exec.as_deref()
    }

    /// File name without the `.desktop` extension.
    pub fn file_stem(&self) -> String {
        self.source_path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    /// Whether this entry carries the context's marker.
    pub fn is_managed(&self, ctx: &DrawerContext) -> bool {
        self.fields.get(ctx.marker_key()) == Some(ctx.marker_value())
    }

    /// Non-empty `Name` and `Exec` with `Type=Application`.
    pub fn is_valid(&self) -> bool {
        let non_empty = |value: &Option<String>| value.as_deref().is_some_and(|v| !v.is_empty());
        non_empty(&self.fields.name)
            && non_empty(&self.fields.exec)
            && self.fields.entry_type.as_deref() == Some(AppConfig::ENTRY_TYPE)
    }

    pub fn summary(&self, ctx: &DrawerContext) -> DescriptorSummary {
        DescriptorSummary {
            path: self.source_path.clone(),
            name: self.display_name(),
            icon: self.fields.icon.clone(),
            exec: self.fields.exec.clone(),
            terminal: self.fields.runs_in_terminal(),
            comment: self.fields.comment.clone(),
            categories: self.fields.categories.clone(),
            managed: self.is_managed(ctx),
            valid: self.is_valid(),
        }
    }
}

/// Flat view of a descriptor for listings and JSON output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DescriptorSummary {
    pub path: PathBuf,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exec: Option<String>,
    pub terminal: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub categories: Option<String>,
    pub managed: bool,
    pub valid: bool,
}

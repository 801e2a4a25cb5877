//! Exec line construction.
//!
//! A command is a wrapper prefix (interpreter or nothing), the target path,
//! and the user's extra arguments. Every token is shell-quoted on its own so
//! that splitting the result with POSIX shell rules gives back exactly the
//! token list it was built from.

use crate::error::{DrawerError, Result};
use crate::platform;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// Extensions that `Auto` always routes through an interpreter.
const SCRIPT_EXTENSIONS: [&str; 4] = ["py", "sh", "bash", "js"];

/// How the target path is launched.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum Wrapper {
    /// Pick an interpreter from the file extension.
    #[default]
    Auto,
    /// Run the target path itself.
    Direct,
    /// Run `<interpreter> <path>`.
    Interpreter(String),
}

impl Wrapper {
    /// Choices offered by the launcher form, in display order.
    pub const PRESETS: [&'static str; 7] = ["Auto", "Direct", "python3", "python", "bash", "sh", "node"];

    pub fn interpreter(name: impl Into<String>) -> Self {
        Wrapper::Interpreter(name.into())
    }

    pub fn presets() -> Vec<Wrapper> {
        Self::PRESETS
            .iter()
            .filter_map(|choice| choice.parse().ok())
            .collect()
    }
}

impl FromStr for Wrapper {
    type Err = DrawerError;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        if s.is_empty() {
            return Err(DrawerError::validation("wrapper", "Wrapper must not be empty"));
        }
        if s.eq_ignore_ascii_case("auto") {
            Ok(Wrapper::Auto)
        } else if s.eq_ignore_ascii_case("direct") {
            Ok(Wrapper::Direct)
        } else {
            Ok(Wrapper::Interpreter(s.to_string()))
        }
    }
}

impl fmt::Display for Wrapper {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Wrapper::Auto => write!(f, "Auto"),
            Wrapper::Direct => write!(f, "Direct"),
            Wrapper::Interpreter(name) => write!(f, "{}", name),
        }
    }
}

fn lowercase_extension(path: &Path) -> String {
    path.extension()
        .map(|ext| ext.to_string_lossy().to_lowercase())
        .unwrap_or_default()
}

/// Split a raw argument string with POSIX shell-word rules.
///
/// Unbalanced quoting does not fail: the whole trimmed string becomes a
/// single literal argument.
pub fn tokenize_arguments(raw: &str) -> Vec<String> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Vec::new();
    }
    shell_words::split(raw).unwrap_or_else(|_| vec![raw.to_string()])
}

/// Tokens that precede the user arguments.
pub fn resolve_prefix(path: &Path, wrapper: &Wrapper) -> Vec<String> {
    let target = path.to_string_lossy().into_owned();
    match wrapper {
        Wrapper::Direct => vec![target],
        Wrapper::Interpreter(name) => vec![name.clone(), target],
        Wrapper::Auto => {
            let ext = lowercase_extension(path);
            let is_script = SCRIPT_EXTENSIONS.contains(&ext.as_str());
            if platform::is_executable(path) && !is_script {
                return vec![target];
            }
            match ext.as_str() {
                "py" => vec!["python3".to_string(), target],
                "sh" | "bash" => vec!["bash".to_string(), target],
                "js" => vec!["node".to_string(), target],
                _ => vec![target],
            }
        }
    }
}

/// Build a shell-safe Exec line.
///
/// Returns an empty string only when no target path is given.
pub fn build_command(path: Option<&Path>, wrapper: &Wrapper, raw_args: &str) -> String {
    let path = match path {
        Some(path) if !path.as_os_str().is_empty() => path,
        _ => return String::new(),
    };

    let mut parts = resolve_prefix(path, wrapper);
    parts.extend(tokenize_arguments(raw_args));
    shell_words::join(parts)
}

/// Wrapper the launcher form preselects after a target is chosen.
pub fn suggest_wrapper(path: &Path) -> Wrapper {
    match lowercase_extension(path).as_str() {
        "py" => Wrapper::interpreter("python3"),
        "sh" | "bash" => Wrapper::interpreter("bash"),
        "js" => Wrapper::interpreter("node"),
        _ => Wrapper::Auto,
    }
}

/// Display name derived from a target file: `my_tool.py` becomes `My Tool`.
pub fn suggest_display_name(path: &Path) -> String {
    let stem = path
        .file_stem()
        .map(|stem| stem.to_string_lossy().replace('_', " "))
        .unwrap_or_default();
    title_case(&stem)
}

/// Uppercase the first letter of every alphabetic run, lowercase the rest.
fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut at_word_start = true;
    for c in text.chars() {
        if c.is_alphabetic() {
            if at_word_start {
                out.extend(c.to_uppercase());
            } else {
                out.extend(c.to_lowercase());
            }
            at_word_start = false;
        } else {
            out.push(c);
            at_word_start = true;
        }
    }
    out
}

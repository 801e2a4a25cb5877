//! appdrawer core - headless management of custom application launchers.
//!
//! Creates, edits, imports, lists and deletes `.desktop` entries in the
//! user's application menu directory. Only entries carrying the private
//! `X-Custom-Added=1` marker are ever listed, edited or deleted, so system
//! launchers are left alone.
//!
//! The crate has no UI. A front end (the `appdrawer` CLI, or a GUI toolkit)
//! collects the user's input and calls into [`LauncherManager`].
//!
//! # Example
//!
//! ```rust,no_run
//! use appdrawer_core::{CreateRequest, LauncherManager, Wrapper};
//!
//! fn main() -> appdrawer_core::Result<()> {
//!     let manager = LauncherManager::for_current_user()?;
//!
//!     let mut request = CreateRequest::new("Backup", "/home/me/bin/backup.sh");
//!     request.wrapper = Wrapper::Auto;
//!     request.arguments = "--quiet".to_string();
//!     let path = manager.write_new(&request)?;
//!     println!("Created {}", path.display());
//!
//!     for entry in manager.list_managed() {
//!         println!("{}", entry.display_name());
//!     }
//!     Ok(())
//! }
//! ```

pub mod catalog;
pub mod command;
pub mod config;
pub mod descriptor;
pub mod error;
pub mod import;
pub mod manager;
pub mod platform;
pub mod writer;

// Re-export commonly used types
pub use command::{build_command, suggest_display_name, suggest_wrapper, tokenize_arguments, Wrapper};
pub use config::{AppConfig, DrawerContext};
pub use descriptor::{parse_descriptor, DescriptorFields, DescriptorSummary, DesktopDescriptor};
pub use error::{DrawerError, ErrorKind, Result};
pub use manager::{CreateRequest, DeleteOutcome, LauncherManager};
pub use writer::LauncherFields;

//! Platform abstraction layer.
//!
//! All `#[cfg]` blocks for OS-specific behavior live here rather than being
//! scattered through the descriptor code.
//!
//! - `paths` - per-user launcher and icon directories
//! - `permissions` - execute bits and descriptor file modes

pub mod paths;
pub mod permissions;

pub use paths::{apps_dir, icon_staging_dir};
pub use permissions::{add_execute_bits, is_executable, set_mode};

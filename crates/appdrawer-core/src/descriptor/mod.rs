//! Desktop entry descriptors.
//!
//! A descriptor is one `.desktop` file. Only the `[Desktop Entry]` section is
//! read; other sections (such as `[Desktop Action ...]`) are ignored and are
//! not reproduced when an entry is rewritten.

mod entry;
mod parser;

pub use entry::{DescriptorFields, DescriptorSummary, DesktopDescriptor};
pub use parser::{parse_descriptor, parse_descriptor_text};

//! Text and JSON rendering for listings.

use appdrawer_core::{AppConfig, DescriptorSummary, DesktopDescriptor};
use serde::Serialize;
use std::io::Write;

pub fn write_json<T: Serialize + ?Sized>(out: &mut impl Write, value: &T) -> anyhow::Result<()> {
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)?;
    Ok(())
}

/// One line per entry: name, then the file it lives in.
pub fn write_table(out: &mut impl Write, entries: &[DescriptorSummary]) -> anyhow::Result<()> {
    if entries.is_empty() {
        writeln!(out, "No custom launchers")?;
        return Ok(());
    }

    let width = entries
        .iter()
        .map(|entry| entry.name.chars().count())
        .max()
        .unwrap_or(0);
    for entry in entries {
        let flag = if entry.valid { ' ' } else { '!' };
        writeln!(
            out,
            "{}{:<width$}  {}",
            flag,
            entry.name,
            entry.path.display(),
            width = width
        )?;
    }
    Ok(())
}

/// `key=value` lines for every key read from the entry section.
pub fn write_fields(out: &mut impl Write, descriptor: &DesktopDescriptor) -> anyhow::Result<()> {
    let fields = descriptor.fields();
    writeln!(out, "# {}", descriptor.source_path().display())?;
    if fields.is_empty() {
        writeln!(out, "# no [Desktop Entry] keys")?;
        return Ok(());
    }

    let known = [
        ("Name", &fields.name),
        ("Type", &fields.entry_type),
        ("Exec", &fields.exec),
        ("Terminal", &fields.terminal),
        ("Comment", &fields.comment),
        ("Icon", &fields.icon),
        ("Categories", &fields.categories),
        (AppConfig::MARKER_KEY, &fields.custom_added),
    ];
    for (key, value) in known {
        if let Some(value) = value {
            writeln!(out, "{}={}", key, value)?;
        }
    }
    for (key, value) in &fields.extra {
        writeln!(out, "{}={}", key, value)?;
    }
    Ok(())
}

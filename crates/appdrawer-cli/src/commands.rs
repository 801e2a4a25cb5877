//! Subcommand handlers.

use crate::output;
use crate::Command;
use appdrawer_core::{
    suggest_display_name, CreateRequest, DeleteOutcome, DrawerContext, LauncherFields,
    LauncherManager, Wrapper,
};
use clap::Args as ClapArgs;
use std::io::{self, Write};
use std::path::PathBuf;

#[derive(ClapArgs, Debug)]
pub struct CreateArgs {
    /// Script or executable to launch
    #[arg(long)]
    pub target: PathBuf,

    /// Menu name (derived from the target file name when omitted)
    #[arg(long)]
    pub name: Option<String>,

    /// Auto, Direct, or an interpreter name
    #[arg(long, default_value = "Auto")]
    pub wrapper: String,

    /// Extra arguments, split with shell rules
    #[arg(long, default_value = "", allow_hyphen_values = true)]
    pub args: String,

    #[arg(long)]
    pub comment: Option<String>,

    /// Icon theme name or image path
    #[arg(long)]
    pub icon: Option<String>,

    /// Semicolon-separated categories
    #[arg(long)]
    pub categories: Option<String>,

    /// Run in a terminal
    #[arg(long)]
    pub terminal: bool,

    /// Leave the target's permissions alone
    #[arg(long)]
    pub no_mark_executable: bool,
}

#[derive(ClapArgs, Debug)]
pub struct EditArgs {
    /// Managed .desktop file to rewrite
    pub path: PathBuf,

    #[arg(long)]
    pub name: Option<String>,

    /// Complete Exec line
    #[arg(long, allow_hyphen_values = true)]
    pub exec: Option<String>,

    #[arg(long)]
    pub comment: Option<String>,

    #[arg(long)]
    pub icon: Option<String>,

    #[arg(long)]
    pub categories: Option<String>,

    #[arg(long)]
    pub terminal: Option<bool>,
}

impl CreateArgs {
    fn into_request(self) -> anyhow::Result<CreateRequest> {
        let wrapper: Wrapper = self.wrapper.parse()?;
        let name = self
            .name
            .unwrap_or_else(|| suggest_display_name(&self.target));
        Ok(CreateRequest {
            name,
            target: Some(self.target),
            wrapper,
            arguments: self.args,
            comment: self.comment,
            icon: self.icon,
            categories: self.categories,
            terminal: self.terminal,
            mark_executable: !self.no_mark_executable,
        })
    }
}

impl EditArgs {
    /// Overlay the given flags on the entry's current fields.
    fn merge_into(self, mut fields: LauncherFields) -> LauncherFields {
        if let Some(name) = self.name {
            fields.name = name;
        }
        if let Some(exec) = self.exec {
            fields.exec = exec;
        }
        if let Some(terminal) = self.terminal {
            fields.terminal = terminal;
        }
        // An empty value clears the optional key
        if self.comment.is_some() {
            fields.comment = self.comment;
        }
        if self.icon.is_some() {
            fields.icon = self.icon;
        }
        if self.categories.is_some() {
            fields.categories = self.categories;
        }
        fields
    }
}

/// Run one subcommand, writing its report to stdout.
pub fn run(command: Command, ctx: DrawerContext) -> anyhow::Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    execute(command, &LauncherManager::new(ctx), &mut out)
}

pub fn execute(
    command: Command,
    manager: &LauncherManager,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    match command {
        Command::List { json } => {
            let entries = manager.list_managed();
            let summaries: Vec<_> = entries
                .iter()
                .map(|entry| entry.summary(manager.context()))
                .collect();
            if json {
                output::write_json(out, &summaries)?;
            } else {
                output::write_table(out, &summaries)?;
            }
        }
        Command::Show { path, json } => {
            let descriptor = manager.parse(&path);
            if json {
                output::write_json(out, &descriptor.summary(manager.context()))?;
            } else {
                output::write_fields(out, &descriptor)?;
            }
        }
        Command::Create(args) => {
            let request = args.into_request()?;
            let path = manager.write_new(&request)?;
            writeln!(out, "Created {}", path.display())?;
        }
        Command::Edit(args) => {
            let path = args.path.clone();
            let current = LauncherFields::from_descriptor(&manager.parse(&path));
            let fields = args.merge_into(current);
            let saved = manager.write_edit(&path, &fields)?;
            writeln!(out, "Saved {}", saved.display())?;
        }
        Command::Delete { path } => match manager.delete(&path)? {
            DeleteOutcome::Removed => writeln!(out, "Deleted {}", path.display())?,
            DeleteOutcome::AlreadyAbsent => {
                writeln!(out, "Already removed {}", path.display())?
            }
        },
        Command::Import { path } => {
            let target = manager.import(&path)?;
            writeln!(out, "Imported {}", target.display())?;
        }
        Command::Command {
            target,
            wrapper,
            args,
        } => {
            let wrapper: Wrapper = wrapper.parse()?;
            writeln!(out, "{}", manager.build_command(Some(&target), &wrapper, &args))?;
        }
        Command::Wrappers => {
            for choice in Wrapper::PRESETS {
                writeln!(out, "{}", choice)?;
            }
        }
    }
    Ok(())
}

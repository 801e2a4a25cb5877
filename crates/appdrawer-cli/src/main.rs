//! appdrawer - command-line front end for managing custom launchers.
//!
//! Plays the part a GUI toolkit would: collects the user's fields, calls
//! into `appdrawer-core`, and reports a short success or failure notice.

mod commands;
mod output;

use appdrawer_core::{DrawerContext, DrawerError, ErrorKind};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{debug, Level};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[derive(Parser, Debug)]
#[command(name = "appdrawer", version)]
#[command(about = "Create, edit, import and delete custom application launchers")]
struct Args {
    /// Launcher directory (defaults to ~/.local/share/applications)
    #[arg(long, global = true)]
    apps_dir: Option<PathBuf>,

    /// Icon staging directory (defaults to ~/.local/share/icons/hicolor/128x128/apps)
    #[arg(long, global = true)]
    icon_dir: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List launchers managed by appdrawer
    List {
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Show one parsed descriptor
    Show {
        path: PathBuf,
        #[arg(long)]
        json: bool,
    },

    /// Create a launcher for a script or executable
    Create(commands::CreateArgs),

    /// Rewrite a managed launcher; unspecified fields keep their values
    Edit(commands::EditArgs),

    /// Delete a managed launcher
    Delete { path: PathBuf },

    /// Copy an existing .desktop file into the launcher directory
    Import { path: PathBuf },

    /// Print the Exec line that would be generated
    Command {
        target: PathBuf,
        /// Auto, Direct, or an interpreter name
        #[arg(short, long, default_value = "Auto")]
        wrapper: String,
        /// Extra arguments, split with shell rules
        #[arg(short, long, default_value = "", allow_hyphen_values = true)]
        args: String,
    },

    /// List the wrapper presets
    Wrappers,
}

/// `RUST_LOG` wins over the level picked by `--debug`.
fn log_filter(debug: bool) -> EnvFilter {
    let log_level = if debug { Level::DEBUG } else { Level::INFO };
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level.as_str()))
}

fn init_logging(debug: bool) {
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(log_filter(debug))
        .with_target(false)
        .with_thread_ids(false)
        .with_writer(std::io::stderr)
        .compact()
        .finish();
    // A second init (e.g. from tests) keeps the first subscriber
    let _ = tracing::subscriber::set_global_default(subscriber);
}

fn resolve_context(args: &Args) -> anyhow::Result<DrawerContext> {
    let ctx = match (&args.apps_dir, &args.icon_dir) {
        (Some(apps), Some(icons)) => DrawerContext::new(apps, icons),
        (apps, icons) => {
            let mut ctx = DrawerContext::from_home()?;
            if let Some(apps) = apps {
                ctx = ctx.with_apps_dir(apps);
            }
            if let Some(icons) = icons {
                ctx = ctx.with_icon_dir(icons);
            }
            ctx
        }
    };
    Ok(ctx)
}

/// 2 for rejected input, 1 for everything else.
fn exit_code_for(err: &anyhow::Error) -> u8 {
    match err.downcast_ref::<DrawerError>().map(DrawerError::kind) {
        Some(ErrorKind::Validation) => 2,
        _ => 1,
    }
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.debug);

    let result = resolve_context(&args).and_then(|ctx| {
        debug!("Launcher directory: {}", ctx.apps_dir().display());
        commands::run(args.command, ctx)
    });

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Failed: {err}");
            ExitCode::from(exit_code_for(&err))
        }
    }
}

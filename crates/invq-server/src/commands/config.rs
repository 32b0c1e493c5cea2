//! `invq config`: inspect or create the configuration file.
//!
//! Every subcommand acts on the file named by the global `--config` flag when
//! it is given, and on the platform default otherwise.

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Args, Subcommand};
use console::style;

use invq_core::InvqConfig;

use super::{config_file_path, load_config};

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    command: ConfigCommand,
}

#[derive(Subcommand)]
enum ConfigCommand {
    /// Print the configuration in effect as JSON
    Show,

    /// Write the built-in defaults to a configuration file
    Init(InitArgs),

    /// Print which configuration file is in effect
    Path,
}

#[derive(Args)]
struct InitArgs {
    /// Where to write the file (default: the file in effect)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Replace an existing file
    #[arg(long)]
    force: bool,
}

pub fn run(args: ConfigArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let path = config_file_path(config_path);

    match args.command {
        ConfigCommand::Show => {
            let config = if path.exists() {
                load_config(config_path)?
            } else {
                eprintln!("{} {} not found, showing defaults.", style("ℹ").blue(), path.display());
                InvqConfig::default()
            };
            println!("{}", serde_json::to_string_pretty(&config)?);
            Ok(())
        }
        ConfigCommand::Init(init) => write_defaults(&init.output.unwrap_or(path), init.force),
        ConfigCommand::Path => {
            let state = if path.exists() {
                style("exists").green()
            } else {
                style("missing, run 'invq config init'").yellow()
            };
            println!("{} ({})", path.display(), state);
            Ok(())
        }
    }
}

fn write_defaults(path: &Path, force: bool) -> anyhow::Result<()> {
    if path.exists() && !force {
        anyhow::bail!("{} already exists; pass --force to replace it", path.display());
    }

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    InvqConfig::default().save(path)?;

    println!("{} Created configuration file at {}", style("✓").green(), path.display());
    Ok(())
}

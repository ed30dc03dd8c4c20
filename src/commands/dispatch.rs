//! Command dispatch logic for tagsel
use std::env;
use std::path::{Path, PathBuf};
use std::time::Instant;

use crate::cli::{Cli, Commands};
use crate::commands;
use tagsel_core::config::SelectorConfig;
use tagsel_core::error::Result;
use tagsel_core::manifest::Manifest;

pub fn run(cli: &Cli, start: Instant) -> Result<()> {
    let root = cli
        .root
        .clone()
        .unwrap_or_else(|| env::current_dir().unwrap_or_else(|_| PathBuf::from(".")));

    tracing::debug!(elapsed = ?start.elapsed(), root = %root.display(), "resolve_root");

    match &cli.command {
        None => handle_no_command(),

        Some(Commands::Parse {
            expression,
            modules,
        }) => {
            let config = load_config(cli, &root, modules)?;
            commands::parse::execute(cli, &config, expression.as_deref())
        }

        Some(Commands::Tags { manifest }) => {
            let manifest = Manifest::load(manifest)?;
            commands::tags::execute(cli, &manifest)
        }

        Some(Commands::Select {
            manifest,
            tags,
            modules,
            all,
        }) => {
            let config = load_config(cli, &root, modules)?;
            let manifest = Manifest::load(manifest)?;
            commands::select::execute(cli, &config, &manifest, tags.as_deref(), *all, start)
        }
    }
}

/// Discover the config, letting `--modules` override the available modules
fn load_config(cli: &Cli, root: &Path, modules: &[String]) -> Result<SelectorConfig> {
    let mut config = SelectorConfig::discover(root, cli.config.as_deref())?;
    if !modules.is_empty() {
        config.available_modules = Some(modules.to_vec());
    }
    Ok(config)
}

fn handle_no_command() -> Result<()> {
    println!("tagsel {}", env!("CARGO_PKG_VERSION"));
    println!();
    println!("Select tests by tag, module, class, method and file.");
    println!();
    println!("Run `tagsel --help` for usage information.");
    Ok(())
}

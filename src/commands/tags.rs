//! `tagsel tags` command - show the tags computed for each class

use tagsel_core::error::Result;
use tagsel_core::format::{records_list, OutputFormat};
use tagsel_core::manifest::Manifest;

use crate::cli::Cli;

/// Execute the tags command
pub fn execute(cli: &Cli, manifest: &Manifest) -> Result<()> {
    let registry = manifest.registry()?;

    match cli.format {
        OutputFormat::Json => {
            let classes: Vec<_> = registry
                .iter()
                .map(|(name, descriptor)| {
                    serde_json::json!({
                        "class": name,
                        "module": descriptor.module,
                        "tags": descriptor.tags,
                        "explicit": descriptor.explicit_tags.is_some(),
                    })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&classes)?);
        }
        OutputFormat::Human => {
            if registry.is_empty() {
                if !cli.quiet {
                    println!("No classes defined");
                }
                return Ok(());
            }
            let width = registry
                .iter()
                .map(|(name, _)| name.len())
                .max()
                .unwrap_or(0);
            for (name, descriptor) in registry.iter() {
                let marker = if descriptor.explicit_tags.is_some() {
                    " (explicit)"
                } else {
                    ""
                };
                println!(
                    "{:width$}  {}{}",
                    name,
                    descriptor.tags,
                    marker,
                    width = width
                );
            }
        }
        OutputFormat::Records => {
            println!(
                "H tagsel=1 records=1 mode=tags classes={}",
                registry.len()
            );
            for (name, descriptor) in registry.iter() {
                println!(
                    "C {} module={} tags={} explicit={}",
                    name,
                    descriptor.module,
                    records_list(descriptor.tags.iter()),
                    descriptor.explicit_tags.is_some()
                );
            }
        }
    }

    Ok(())
}

//! Manifest command: load the build manifest and print a summary.

use crate::{assets::Manifest, config::AppConfig, log};
use anyhow::Result;

pub fn run_manifest(pretty: bool, config: &AppConfig) -> Result<()> {
    let manifest = Manifest::load(&config.assets.output, config.assets.strict_manifest)?;

    log!("manifest"; "{} entries under {}", manifest.len(), config.assets.output.display());

    if pretty {
        let entries: serde_json::Map<String, serde_json::Value> = manifest
            .iter()
            .map(|(key, entry)| (key.clone(), serde_json::to_value(entry).unwrap_or_default()))
            .collect();
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }

    for (key, entry) in manifest.iter() {
        let marker = if entry.is_entry { "*" } else { " " };
        println!("{marker} {key} -> {}", entry.file);
        for css in &entry.css {
            println!("    css {css}");
        }
    }
    Ok(())
}

//! Resolve command: run logical paths through the configured resolver.
//!
//! Debugging aid for template authors: shows exactly what URL a template
//! reference turns into under the current config.

use crate::{assets::AssetManager, cli::ResolveArgs, config::AppConfig, log};
use anyhow::{Result, bail};

pub fn run_resolve(args: &ResolveArgs, config: &AppConfig) -> Result<()> {
    let manager = AssetManager::from_config(config)?;

    let mut failures = 0usize;
    for path in &args.paths {
        match manager.resolve_asset_path(path) {
            Ok(url) if args.types => {
                println!("{path} -> {url} [{}]", manager.asset_type(path));
            }
            Ok(url) => println!("{path} -> {url}"),
            Err(e) => {
                log!("error"; "{path}: {e}");
                failures += 1;
            }
        }
    }

    if failures > 0 {
        bail!("{failures} path(s) failed to resolve");
    }
    Ok(())
}

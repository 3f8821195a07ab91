//! Formwork - asset resolution and serving for the Formwork forms backend.

#![allow(dead_code)]

mod assets;
mod cli;
mod config;
mod core;
mod embed;
mod logger;
mod server;
mod utils;

use anyhow::Result;
use clap::{ColorChoice, Parser};
use cli::{Cli, Commands};
use config::{AppConfig, init_config};

fn main() -> Result<()> {
    // Setup global Ctrl+C handler (before any blocking operations)
    core::setup_shutdown_handler()?;

    let cli: &'static Cli = Box::leak(Box::new(Cli::parse()));

    // Set global color override based on CLI option
    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {} // owo-colors auto-detects TTY
    }

    let config = init_config(AppConfig::load(cli)?);

    match &cli.command {
        Commands::Serve { .. } => cli::serve::serve(&config),
        Commands::Resolve { args } => cli::resolve::run_resolve(args, &config),
        Commands::Manifest { pretty } => cli::manifest::run_manifest(*pretty, &config),
    }
}

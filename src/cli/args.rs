//! Command-line interface definitions.

use crate::config::Environment;
use clap::{ColorChoice, Parser, Subcommand};
use std::path::PathBuf;

/// Formwork asset server CLI
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Control colored output (auto, always, never)
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorChoice,

    /// Config file path (default: formwork.toml)
    #[arg(short = 'C', long, default_value = "formwork.toml", value_hint = clap::ValueHint::FilePath)]
    pub config: PathBuf,

    /// Build output directory (relative to project root)
    #[arg(short, long, global = true, value_hint = clap::ValueHint::DirPath)]
    pub output: Option<PathBuf>,

    /// Asset environment (development, production)
    #[arg(short, long, global = true)]
    pub environment: Option<Environment>,

    /// Fail resolution instead of synthesizing a fallback path
    #[arg(long, global = true, action = clap::ArgAction::Set, num_args = 0..=1, default_missing_value = "true", require_equals = false)]
    pub strict: Option<bool>,

    /// Treat a missing manifest as an error instead of an empty manifest
    #[arg(long = "strict-manifest", global = true, action = clap::ArgAction::Set, num_args = 0..=1, default_missing_value = "true", require_equals = false)]
    pub strict_manifest: Option<bool>,

    /// Enable verbose output for debugging
    #[arg(short = 'V', long, global = true)]
    pub verbose: bool,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Start the asset server for the configured environment
    #[command(visible_alias = "s")]
    Serve {
        /// Network interface to bind (e.g., 127.0.0.1, 0.0.0.0)
        #[arg(short, long)]
        interface: Option<std::net::IpAddr>,

        /// Port number to listen on
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Resolve logical asset paths and print their URLs
    #[command(visible_alias = "r")]
    Resolve {
        #[command(flatten)]
        args: ResolveArgs,
    },

    /// Load the build manifest and print a summary
    #[command(visible_alias = "m")]
    Manifest {
        /// Pretty-print entries as JSON
        #[arg(short, long)]
        pretty: bool,
    },
}

/// Resolve command arguments.
#[derive(clap::Args, Debug, Clone)]
pub struct ResolveArgs {
    /// Logical asset paths to resolve (as written in templates)
    #[arg(value_name = "PATH", required = true)]
    pub paths: Vec<String>,

    /// Show the classified asset type next to each URL
    #[arg(short, long)]
    pub types: bool,
}

impl Cli {
    pub const fn is_serve(&self) -> bool {
        matches!(self.command, Commands::Serve { .. })
    }
}

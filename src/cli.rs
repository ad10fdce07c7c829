//! Command-line argument parsing
//!
//! Supports:
//! - Scanning a Markdown document for the languages it needs
//! - Inspecting a language table dumped by the extractor
//! - Running the whole loading pipeline against a media directory
//! - Syncing bundled assets into a media directory
//! - Writing a default config file

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Load only the highlight.js languages a document uses
#[derive(Parser, Debug)]
#[command(name = "hljs-loader", version, about = "Load only the highlight.js languages a document uses")]
pub struct CliArgs {
    /// Config file to use instead of ~/.config/hljs-loader/config.yaml
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the languages a Markdown document's code blocks need, with bundle URLs
    Scan {
        /// Markdown document
        file: PathBuf,
    },
    /// Print a language table as JSON (the built-in one if no file is given)
    Languages {
        /// Extractor output: one {"name", "alias"} JSON object per line
        file: Option<PathBuf>,
    },
    /// Run the loading pipeline against a media directory and print a JSON report
    Run {
        /// Markdown document
        file: PathBuf,
        /// Directory the engine and language bundles are served from
        #[arg(long, value_name = "DIR")]
        media: PathBuf,
        /// Write the resulting page as HTML
        #[arg(long, value_name = "FILE")]
        html: Option<PathBuf>,
    },
    /// Install bundled assets into a media directory when they are newer
    Sync {
        /// Directory holding the bundled assets
        #[arg(long, value_name = "DIR")]
        assets: PathBuf,
        /// Media directory to install into
        #[arg(long, value_name = "DIR")]
        media: PathBuf,
        /// Page template whose import block should be refreshed
        #[arg(long, value_name = "FILE")]
        template: Option<PathBuf>,
        /// Reinstall even if the installed version is current
        #[arg(short, long)]
        force: bool,
    },
    /// Write the default config to the config file (or --config)
    Init {
        /// Overwrite an existing file
        #[arg(short, long)]
        force: bool,
    },
}

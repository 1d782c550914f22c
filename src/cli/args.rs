//! Command-line interface definitions.

use clap::{ColorChoice, Parser, Subcommand};
use std::path::PathBuf;

/// Check and inspect page metadata declarations
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Control colored output (auto, always, never)
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorChoice,

    /// Content directory path (relative to project root)
    #[arg(short, long, global = true, value_hint = clap::ValueHint::DirPath)]
    pub dir: Option<PathBuf>,

    /// Config file path (default: tola-meta.toml)
    #[arg(short = 'C', long, global = true, default_value = "tola-meta.toml", value_hint = clap::ValueHint::FilePath)]
    pub config: PathBuf,

    /// Enable verbose output for debugging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Validate every declaration under the content directory
    #[command(visible_alias = "c")]
    Check,

    /// Print the resolved navigation entries of a section
    #[command(visible_alias = "l")]
    List {
        /// Section name (directory relative to the content root, `.` for the root)
        section: String,

        /// Include hidden entries
        #[arg(short, long)]
        all: bool,
    },

    /// Print the resolved entry of one route
    #[command(visible_alias = "r")]
    Resolve {
        /// Section name (directory relative to the content root, `.` for the root)
        section: String,

        /// Route key, e.g. `302` or `README`
        route: String,
    },
}

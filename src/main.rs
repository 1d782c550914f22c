//! tola-meta - check and inspect page metadata declarations.

use anyhow::Result;
use clap::{ColorChoice, Parser};
use tola_meta::cli::{self, Cli, Commands};
use tola_meta::config::MetaConfig;
use tola_meta::logger;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set global color override based on CLI option
    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {} // owo-colors auto-detects TTY
    }
    logger::set_verbose(cli.verbose);

    let config = MetaConfig::discover(&cli.config)?.with_source_dir(cli.dir.as_deref());

    match &cli.command {
        Commands::Check => cli::check::run_check(&config),
        Commands::List { section, all } => cli::query::run_list(&config, section, *all),
        Commands::Resolve { section, route } => cli::query::run_resolve(&config, section, route),
    }
}

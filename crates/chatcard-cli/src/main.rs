// this_file: crates/chatcard-cli/src/main.rs

//! Chatcard CLI: chat messages rendered as images.

use anyhow::{Context, Result};
use clap::Parser;

use chatcard_cli::cli::{Cli, Commands};
use chatcard_cli::commands;

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logger(cli.verbose);

    match &cli.command {
        Commands::Render(args) => {
            if args.jobs > 0 {
                rayon::ThreadPoolBuilder::new()
                    .num_threads(args.jobs)
                    .build_global()
                    .context("Failed to initialize thread pool")?;
            }
            commands::render::run(args)?;
        },
        Commands::Tokenize(args) => commands::tokenize::run(args)?,
        Commands::Info(args) => commands::info::run(args)?,
    }

    Ok(())
}

/// Initialize logging based on verbosity flag; RUST_LOG still wins.
fn init_logger(verbose: bool) {
    let level = if verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Warn
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

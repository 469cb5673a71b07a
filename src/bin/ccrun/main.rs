//! ccrun CLI - compile a C/C++ file and run it in a terminal

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;

use cli::{Cli, Commands};

fn main() {
    if let Err(e) = run() {
        eprintln!("error: {:#}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    // Parse CLI
    let cli = Cli::parse();

    // Set up logging
    let filter = if cli.verbose {
        EnvFilter::new("ccrun=debug")
    } else {
        EnvFilter::new("ccrun=info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .init();

    // Execute command
    match cli.command {
        Commands::Compile(args) => commands::compile::execute(args, false, cli.no_color),
        Commands::Debug(args) => commands::compile::execute(args, true, cli.no_color),
        Commands::Config(args) => commands::config::execute(args),
        Commands::Completions(args) => commands::completions::execute(args),
    }
}

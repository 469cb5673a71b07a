//! CLI definitions using clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// ccrun - compile a C/C++ source file and run it in a terminal
#[derive(Parser)]
#[command(name = "ccrun")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Compile a source file and run the result
    Compile(CompileArgs),

    /// Compile a source file and run the result under gdb
    Debug(CompileArgs),

    /// Show or change configuration
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(Args)]
pub struct CompileArgs {
    /// Source file to compile (.c, .cpp, .cc, .cxx, .c++)
    pub file: Option<PathBuf>,

    /// Compile only, do not launch the result
    #[arg(long)]
    pub no_run: bool,

    /// Place the binary beside the source instead of the temp directory
    #[arg(long)]
    pub keep_output: bool,

    /// Extra compiler flags, whitespace-separated (overrides configuration)
    #[arg(long)]
    pub flags: Option<String>,
}

#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommands,
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Show the effective configuration and resolved compilers
    Show,

    /// Write configuration overrides
    Set(ConfigSetArgs),
}

#[derive(Args)]
pub struct ConfigSetArgs {
    /// C compiler name or path
    #[arg(long)]
    pub cc: Option<String>,

    /// C++ compiler name or path
    #[arg(long)]
    pub cxx: Option<String>,

    /// Extra C compiler flags
    #[arg(long)]
    pub cflags: Option<String>,

    /// Extra C++ compiler flags
    #[arg(long)]
    pub cxxflags: Option<String>,

    /// Terminal emulator to launch in (Unix only)
    #[arg(long)]
    pub terminal: Option<String>,

    /// Write to the global config instead of the project config
    #[arg(long)]
    pub global: bool,
}

#[derive(Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}

//! `ccrun config` command

use std::path::PathBuf;

use anyhow::{bail, Result};

use crate::cli::{ConfigArgs, ConfigCommands, ConfigSetArgs};
use ccrun::core::language::LanguageKind;
use ccrun::util::config::{
    global_config_path, load_config, project_config_path, Config,
};
use ccrun::util::process::find_executable;

pub fn execute(args: ConfigArgs) -> Result<()> {
    match args.command {
        ConfigCommands::Show => show_config(),
        ConfigCommands::Set(set_args) => set_config(set_args),
    }
}

fn show_config() -> Result<()> {
    let global = global_config_path().unwrap_or_default();
    let project = project_config_path(&std::env::current_dir()?);
    let config = load_config(&global, &project);

    println!("Compilers:");
    for lang in [LanguageKind::C, LanguageKind::Cpp] {
        let name = config.compiler(lang);
        match find_executable(name) {
            Some(path) => println!("  {:4} {} ({})", lang.name(), name, path.display()),
            None => println!("  {:4} {} (not found)", lang.name(), name),
        }
        let flags = config.extra_flags(lang);
        if !flags.is_empty() {
            println!("       flags: {}", flags.join(" "));
        }
    }

    println!();
    println!("Diagnostics:");
    println!("  persist:          {}", config.persist_diagnostics());
    println!("  split:            {:?}", config.split_direction());
    println!("  close on success: {}", config.close_diagnostics_on_success());
    println!("  show warnings:    {}", config.show_warnings());
    println!("  show errors:      {}", config.show_errors());

    println!();
    println!("Run:");
    println!("  after compile:    {}", config.run_after_compile());
    println!("  to temp dir:      {}", config.compile_to_temp_dir());
    println!("  terminal:         {}", config.terminal().unwrap_or("xterm"));

    println!();
    println!("Config files:");
    for (label, path) in [("global", &global), ("project", &project)] {
        let state = if path.as_os_str().is_empty() || !path.exists() {
            "absent"
        } else {
            "loaded"
        };
        println!("  {:8} {} ({})", label, path.display(), state);
    }

    Ok(())
}

fn set_config(args: ConfigSetArgs) -> Result<()> {
    if args.cc.is_none()
        && args.cxx.is_none()
        && args.cflags.is_none()
        && args.cxxflags.is_none()
        && args.terminal.is_none()
    {
        bail!("nothing to set; pass at least one of --cc, --cxx, --cflags, --cxxflags, --terminal");
    }

    let path: PathBuf = if args.global {
        match global_config_path() {
            Some(p) => p,
            None => bail!("could not determine the home directory for the global config"),
        }
    } else {
        project_config_path(&std::env::current_dir()?)
    };

    let mut config = Config::load_or_default(&path);
    if args.cc.is_some() {
        config.compile.cc = args.cc;
    }
    if args.cxx.is_some() {
        config.compile.cxx = args.cxx;
    }
    if args.cflags.is_some() {
        config.compile.cflags = args.cflags;
    }
    if args.cxxflags.is_some() {
        config.compile.cxxflags = args.cxxflags;
    }
    if args.terminal.is_some() {
        config.run.terminal = args.terminal;
    }

    config.save(&path)?;
    eprintln!("     Updated {}", path.display());

    Ok(())
}

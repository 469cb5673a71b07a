//! `ccrun compile` and `ccrun debug` commands

use std::path::PathBuf;

use anyhow::{bail, Result};

use crate::cli::CompileArgs;
use ccrun::host::ConsoleHost;
use ccrun::ops::compile::{compile_and_run, CompileOptions};
use ccrun::util::config::{global_config_path, load_config, project_config_path};
use ccrun::util::shell::{ColorChoice, Shell, Status};

pub fn execute(args: CompileArgs, attach_debugger: bool, no_color: bool) -> Result<()> {
    let color = if no_color {
        ColorChoice::Never
    } else {
        ColorChoice::Auto
    };
    let host = ConsoleHost::new(Shell::new(color));

    // Project config lives beside the source file being compiled.
    let project_dir = match args.file.as_ref().and_then(|f| f.parent()) {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => std::env::current_dir()?,
    };
    let global = global_config_path().unwrap_or_default();
    let config = load_config(&global, &project_config_path(&project_dir));

    if let Some(ref file) = args.file {
        host.shell().status(Status::Compiling, file.display());
    }

    let opts = CompileOptions {
        attach_debugger,
        run_after: args.no_run.then_some(false),
        to_temp_dir: args.keep_output.then_some(false),
        extra_flags: args.flags,
    };

    let will_run = !args.no_run && config.run_after_compile();

    let result = compile_and_run(args.file.as_deref(), &opts, &config, &host)?;

    if result.success() && will_run {
        if let Some(ref file) = args.file {
            host.shell().status(Status::Running, file.display());
        }
    }

    if !result.success() {
        bail!(
            "compilation of `{}` failed with exit code {}",
            args.file
                .unwrap_or_else(|| PathBuf::from("<active document>"))
                .display(),
            result.exit_code
        );
    }

    Ok(())
}

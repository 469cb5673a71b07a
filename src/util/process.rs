//! Subprocess execution utilities.

use std::ffi::OsStr;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use anyhow::{Context, Result};

/// Exit code and accumulated standard-error text of a finished child.
#[derive(Debug, Clone)]
pub struct ExecResult {
    pub exit_code: i32,
    pub stderr: String,
}

impl ExecResult {
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }
}

/// Builder for subprocess execution.
#[derive(Debug, Clone)]
pub struct ProcessBuilder {
    program: PathBuf,
    args: Vec<String>,
    cwd: Option<PathBuf>,
}

impl ProcessBuilder {
    /// Create a new process builder for the given program.
    pub fn new(program: impl AsRef<Path>) -> Self {
        ProcessBuilder {
            program: program.as_ref().to_path_buf(),
            args: Vec::new(),
            cwd: None,
        }
    }

    /// Add a single argument.
    pub fn arg(mut self, arg: impl AsRef<OsStr>) -> Self {
        self.args.push(arg.as_ref().to_string_lossy().into_owned());
        self
    }

    /// Add multiple arguments.
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        self.args.extend(
            args.into_iter()
                .map(|s| s.as_ref().to_string_lossy().into_owned()),
        );
        self
    }

    /// Set the working directory.
    pub fn cwd(mut self, cwd: impl AsRef<Path>) -> Self {
        self.cwd = Some(cwd.as_ref().to_path_buf());
        self
    }

    /// Get the program path.
    pub fn get_program(&self) -> &Path {
        &self.program
    }

    /// Get the arguments.
    pub fn get_args(&self) -> &[String] {
        &self.args
    }

    fn build_command(&self) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args);
        if let Some(ref cwd) = self.cwd {
            cmd.current_dir(cwd);
        }
        cmd
    }

    /// Execute the command, streaming standard error into a buffer as it
    /// arrives, and wait for completion.
    ///
    /// Standard output is inherited and never interpreted; only stderr is
    /// captured. A child killed by a signal reports exit code -1.
    pub fn exec_streaming_stderr(&self) -> Result<ExecResult> {
        let mut cmd = self.build_command();
        cmd.stdin(Stdio::null());
        cmd.stdout(Stdio::inherit());
        cmd.stderr(Stdio::piped());

        let mut child = cmd
            .spawn()
            .with_context(|| format!("failed to spawn `{}`", self.program.display()))?;

        // Drain stderr incrementally before waiting, so a chatty compiler
        // never blocks on a full pipe. Bytes are accumulated raw and decoded
        // once at EOF: a multi-byte character may straddle a read boundary.
        let mut stderr_bytes = Vec::new();
        if let Some(mut pipe) = child.stderr.take() {
            let mut buf = [0u8; 4096];
            loop {
                match pipe.read(&mut buf) {
                    Ok(0) => break,
                    Ok(n) => stderr_bytes.extend_from_slice(&buf[..n]),
                    Err(e) => {
                        return Err(e).with_context(|| {
                            format!("failed to read stderr of `{}`", self.program.display())
                        })
                    }
                }
            }
        }

        let status = child
            .wait()
            .with_context(|| format!("failed to wait for `{}`", self.program.display()))?;

        Ok(ExecResult {
            exit_code: status.code().unwrap_or(-1),
            stderr: String::from_utf8_lossy(&stderr_bytes).into_owned(),
        })
    }

    /// Spawn the command detached: the child handle is dropped without
    /// waiting, so its lifetime and exit status are never observed.
    pub fn spawn_detached(&self) -> Result<()> {
        let mut cmd = self.build_command();
        cmd.stdin(Stdio::null());
        cmd.stdout(Stdio::null());
        cmd.stderr(Stdio::null());

        cmd.spawn()
            .with_context(|| format!("failed to launch `{}`", self.program.display()))?;

        Ok(())
    }

    /// Display the command for error messages and logs.
    pub fn display_command(&self) -> String {
        let mut parts = vec![self.program.display().to_string()];
        parts.extend(self.args.iter().cloned());
        parts.join(" ")
    }
}

/// Find an executable in PATH.
pub fn find_executable(name: impl AsRef<OsStr>) -> Option<PathBuf> {
    which::which(name).ok()
}

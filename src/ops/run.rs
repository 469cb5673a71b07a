//! Launching the compiled binary.
//!
//! The launch is fire-and-forget: the spawned terminal (or platform open
//! command) is detached and never awaited, so the launched program's fate is
//! invisible here. Platform dispatch is resolved once into a `Launcher`
//! variant so each branch composes a command that can be tested in
//! isolation.

use std::path::Path;

use anyhow::Result;

use crate::util::config::Config;
use crate::util::process::ProcessBuilder;

/// Supported Unix terminal emulators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Terminal {
    #[default]
    Xterm,
    GnomeTerminal,
    Konsole,
    Xfce4Terminal,
    Urxvt,
    Alacritty,
    Kitty,
}

/// How to invoke one terminal emulator.
///
/// `args_prefix` is the emulator's "execute this command" syntax; the
/// command to run must immediately follow it. `hold_flag` keeps the window
/// open after the program exits, for emulators that support it, and is
/// emitted before the prefix.
#[derive(Debug, Clone, Copy)]
pub struct TerminalSpec {
    pub command: &'static str,
    pub args_prefix: &'static [&'static str],
    pub hold_flag: Option<&'static str>,
}

impl Terminal {
    /// Map a configured terminal name to a variant.
    ///
    /// Unset or unrecognized names fall back to xterm.
    pub fn from_name(name: Option<&str>) -> Terminal {
        match name {
            Some("gnome-terminal") => Terminal::GnomeTerminal,
            Some("konsole") => Terminal::Konsole,
            Some("xfce4-terminal") => Terminal::Xfce4Terminal,
            Some("urxvt") => Terminal::Urxvt,
            Some("alacritty") => Terminal::Alacritty,
            Some("kitty") => Terminal::Kitty,
            _ => Terminal::Xterm,
        }
    }

    /// Static invocation shape for this emulator.
    pub fn spec(&self) -> TerminalSpec {
        match self {
            Terminal::Xterm => TerminalSpec {
                command: "xterm",
                args_prefix: &["-e"],
                hold_flag: Some("-hold"),
            },
            Terminal::GnomeTerminal => TerminalSpec {
                command: "gnome-terminal",
                args_prefix: &["--"],
                hold_flag: None,
            },
            Terminal::Konsole => TerminalSpec {
                command: "konsole",
                args_prefix: &["-e"],
                hold_flag: Some("--hold"),
            },
            Terminal::Xfce4Terminal => TerminalSpec {
                command: "xfce4-terminal",
                args_prefix: &["-x"],
                hold_flag: Some("--hold"),
            },
            Terminal::Urxvt => TerminalSpec {
                command: "urxvt",
                args_prefix: &["-e"],
                hold_flag: Some("-hold"),
            },
            Terminal::Alacritty => TerminalSpec {
                command: "alacritty",
                args_prefix: &["-e"],
                hold_flag: Some("--hold"),
            },
            Terminal::Kitty => TerminalSpec {
                command: "kitty",
                args_prefix: &[],
                hold_flag: Some("--hold"),
            },
        }
    }
}

/// How the compiled binary gets launched on this platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Launcher {
    /// Spawn a terminal emulator (Unix-like).
    UnixTerminal(Terminal),
    /// Open a titled console window through the shell (Windows).
    WindowsConsole,
    /// Hand the binary to the `open` launcher (macOS).
    MacOpen,
    /// No launch behavior is defined for this platform.
    Unsupported,
}

impl Launcher {
    /// Resolve the launcher for the current platform and configuration.
    pub fn detect(config: &Config) -> Launcher {
        if cfg!(target_os = "windows") {
            Launcher::WindowsConsole
        } else if cfg!(target_os = "macos") {
            Launcher::MacOpen
        } else if cfg!(unix) {
            Launcher::UnixTerminal(Terminal::from_name(config.terminal()))
        } else {
            Launcher::Unsupported
        }
    }
}

/// Whether the console window waits for a keypress or hosts a debugger.
///
/// The two are mutually exclusive: a gdb session manages its own exit, so
/// the pause suffix is only appended to plain runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowsRunMode {
    Debug,
    PauseAfterExit,
}

impl WindowsRunMode {
    fn for_debugger(attach_debugger: bool) -> Self {
        if attach_debugger {
            WindowsRunMode::Debug
        } else {
            WindowsRunMode::PauseAfterExit
        }
    }
}

/// Compose the argument vector for a Unix terminal launch.
///
/// Shape: [hold flag unless debugging] [exec prefix] [gdb if debugging] <binary>.
/// Debugger sessions manage their own exit, so the hold flag is omitted for
/// them.
pub fn unix_terminal_args(spec: &TerminalSpec, compiled: &Path, attach_debugger: bool) -> Vec<String> {
    let mut args = Vec::new();
    if !attach_debugger {
        if let Some(hold) = spec.hold_flag {
            args.push(hold.to_string());
        }
    }
    args.extend(spec.args_prefix.iter().map(|s| s.to_string()));
    if attach_debugger {
        args.push("gdb".to_string());
    }
    args.push(compiled.display().to_string());
    args
}

/// Compose the single shell command line for a Windows console launch.
///
/// `start` needs shell semantics for the window title, so this string is
/// handed to `cmd /C` rather than spawned as an argv.
pub fn windows_command_line(compiled: &Path, mode: WindowsRunMode) -> String {
    let title = compiled
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();

    let inner = match mode {
        WindowsRunMode::Debug => format!("gdb \"{}\"", compiled.display()),
        WindowsRunMode::PauseAfterExit => format!("\"{}\" & pause", compiled.display()),
    };

    format!("start \"{}\" cmd /C \"{}\"", title, inner)
}

/// Launch the compiled binary, detached, with `cwd` as working directory.
///
/// The spawn itself can fail (emulator not installed); anything after a
/// successful spawn is out of this layer's accounting.
pub fn launch(compiled: &Path, attach_debugger: bool, cwd: &Path, config: &Config) -> Result<()> {
    match Launcher::detect(config) {
        Launcher::UnixTerminal(terminal) => {
            let spec = terminal.spec();
            let builder = ProcessBuilder::new(spec.command)
                .args(unix_terminal_args(&spec, compiled, attach_debugger))
                .cwd(cwd);
            tracing::debug!("launching `{}`", builder.display_command());
            builder.spawn_detached()
        }
        Launcher::WindowsConsole => {
            let mode = WindowsRunMode::for_debugger(attach_debugger);
            let builder = ProcessBuilder::new("cmd")
                .arg("/C")
                .arg(windows_command_line(compiled, mode))
                .cwd(cwd);
            tracing::debug!("launching `{}`", builder.display_command());
            builder.spawn_detached()
        }
        Launcher::MacOpen => {
            let builder = ProcessBuilder::new("open").arg(compiled).cwd(cwd);
            tracing::debug!("launching `{}`", builder.display_command());
            builder.spawn_detached()
        }
        Launcher::Unsupported => {
            tracing::debug!("no launcher defined for this platform");
            Ok(())
        }
    }
}

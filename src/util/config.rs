//! Configuration file support for ccrun.
//!
//! ccrun supports two configuration file locations:
//! - Global: `~/.ccrun/config.toml` - User-wide defaults
//! - Project: `.ccrun/config.toml` - Per-directory overrides
//!
//! Project config takes precedence over global config. Every setting is
//! optional; accessors apply the documented defaults.

use std::path::{Path, PathBuf};
use std::str::FromStr;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::core::language::LanguageKind;

/// Default C compiler executable.
pub const DEFAULT_CC: &str = "gcc";

/// Default C++ compiler executable.
pub const DEFAULT_CXX: &str = "g++";

/// ccrun configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Compiler settings
    pub compile: CompileConfig,

    /// Diagnostics handling settings
    pub diagnostics: DiagnosticsConfig,

    /// Run-after-compile settings
    pub run: RunConfig,
}

/// Compiler selection and flags.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CompileConfig {
    /// C compiler name or path (default: gcc)
    pub cc: Option<String>,

    /// C++ compiler name or path (default: g++)
    pub cxx: Option<String>,

    /// Extra C compiler flags, whitespace-separated
    pub cflags: Option<String>,

    /// Extra C++ compiler flags, whitespace-separated
    pub cxxflags: Option<String>,

    /// Place the compiled binary in the system temp directory (default: true)
    pub to_temp_dir: Option<bool>,
}

/// How compiler diagnostics are surfaced.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DiagnosticsConfig {
    /// Persist error text to a file next to the source (default: true)
    pub persist: Option<bool>,

    /// Split direction when opening the diagnostics file (default: down)
    pub split: Option<SplitDirection>,

    /// Close the diagnostics view after a subsequent good compile (default: true)
    pub close_on_success: Option<bool>,

    /// Surface warning text when compilation succeeds with warnings (default: true)
    pub show_warnings: Option<bool>,

    /// Surface error text as a notification on failure (default: false)
    pub show_errors: Option<bool>,
}

/// Launching the compiled binary.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    /// Launch the binary after a successful compile (default: true)
    pub after_compile: Option<bool>,

    /// Terminal emulator to launch in (Unix only; default: xterm)
    pub terminal: Option<String>,
}

/// Split direction for the diagnostics view.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SplitDirection {
    #[default]
    Down,
    Right,
    None,
}

impl FromStr for SplitDirection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "down" => Ok(SplitDirection::Down),
            "right" => Ok(SplitDirection::Right),
            "none" => Ok(SplitDirection::None),
            _ => Err(format!(
                "invalid split direction '{}'; expected 'down', 'right', or 'none'",
                s
            )),
        }
    }
}

impl Config {
    /// Load configuration from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;

        toml::from_str(&contents)
            .with_context(|| format!("failed to parse config file: {}", path.display()))
    }

    /// Load configuration with fallback to defaults if the file doesn't exist.
    pub fn load_or_default(path: &Path) -> Self {
        if path.exists() {
            Self::load(path).unwrap_or_else(|e| {
                tracing::warn!("Failed to load config from {}: {}", path.display(), e);
                Self::default()
            })
        } else {
            Self::default()
        }
    }

    /// Save configuration to a file.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).with_context(|| {
                format!("failed to create config directory: {}", parent.display())
            })?;
        }

        let contents =
            toml::to_string_pretty(self).with_context(|| "failed to serialize config")?;

        std::fs::write(path, contents)
            .with_context(|| format!("failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Merge another config into this one (other takes precedence).
    pub fn merge(&mut self, other: Config) {
        // Compile settings
        if other.compile.cc.is_some() {
            self.compile.cc = other.compile.cc;
        }
        if other.compile.cxx.is_some() {
            self.compile.cxx = other.compile.cxx;
        }
        if other.compile.cflags.is_some() {
            self.compile.cflags = other.compile.cflags;
        }
        if other.compile.cxxflags.is_some() {
            self.compile.cxxflags = other.compile.cxxflags;
        }
        if other.compile.to_temp_dir.is_some() {
            self.compile.to_temp_dir = other.compile.to_temp_dir;
        }

        // Diagnostics settings
        if other.diagnostics.persist.is_some() {
            self.diagnostics.persist = other.diagnostics.persist;
        }
        if other.diagnostics.split.is_some() {
            self.diagnostics.split = other.diagnostics.split;
        }
        if other.diagnostics.close_on_success.is_some() {
            self.diagnostics.close_on_success = other.diagnostics.close_on_success;
        }
        if other.diagnostics.show_warnings.is_some() {
            self.diagnostics.show_warnings = other.diagnostics.show_warnings;
        }
        if other.diagnostics.show_errors.is_some() {
            self.diagnostics.show_errors = other.diagnostics.show_errors;
        }

        // Run settings
        if other.run.after_compile.is_some() {
            self.run.after_compile = other.run.after_compile;
        }
        if other.run.terminal.is_some() {
            self.run.terminal = other.run.terminal;
        }
    }

    /// Compiler executable for the given language.
    pub fn compiler(&self, lang: LanguageKind) -> &str {
        match lang {
            LanguageKind::C => self.compile.cc.as_deref().unwrap_or(DEFAULT_CC),
            LanguageKind::Cpp => self.compile.cxx.as_deref().unwrap_or(DEFAULT_CXX),
        }
    }

    /// Extra compiler flags for the given language, whitespace-split with
    /// empty tokens discarded.
    pub fn extra_flags(&self, lang: LanguageKind) -> Vec<String> {
        let raw = match lang {
            LanguageKind::C => self.compile.cflags.as_deref(),
            LanguageKind::Cpp => self.compile.cxxflags.as_deref(),
        };
        raw.unwrap_or("")
            .split_whitespace()
            .map(str::to_string)
            .collect()
    }

    pub fn compile_to_temp_dir(&self) -> bool {
        self.compile.to_temp_dir.unwrap_or(true)
    }

    pub fn persist_diagnostics(&self) -> bool {
        self.diagnostics.persist.unwrap_or(true)
    }

    pub fn split_direction(&self) -> SplitDirection {
        self.diagnostics.split.unwrap_or_default()
    }

    pub fn close_diagnostics_on_success(&self) -> bool {
        self.diagnostics.close_on_success.unwrap_or(true)
    }

    pub fn show_warnings(&self) -> bool {
        self.diagnostics.show_warnings.unwrap_or(true)
    }

    pub fn show_errors(&self) -> bool {
        self.diagnostics.show_errors.unwrap_or(false)
    }

    pub fn run_after_compile(&self) -> bool {
        self.run.after_compile.unwrap_or(true)
    }

    /// Configured terminal emulator name, if any.
    pub fn terminal(&self) -> Option<&str> {
        self.run.terminal.as_deref()
    }
}

/// Load merged configuration from global and project locations.
///
/// Order of precedence (highest to lowest):
/// 1. Project config (.ccrun/config.toml)
/// 2. Global config (~/.ccrun/config.toml)
/// 3. Defaults
pub fn load_config(global_path: &Path, project_path: &Path) -> Config {
    let mut config = Config::default();

    if global_path.exists() {
        let global = Config::load_or_default(global_path);
        config.merge(global);
    }

    // Project config overrides global
    if project_path.exists() {
        let project = Config::load_or_default(project_path);
        config.merge(project);
    }

    config
}

/// Get the global ccrun config directory (~/.ccrun).
pub fn global_config_dir() -> Option<PathBuf> {
    directories::BaseDirs::new().map(|b| b.home_dir().join(".ccrun"))
}

/// Get the global config path (~/.ccrun/config.toml).
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("config.toml"))
}

/// Get the project config path (<dir>/.ccrun/config.toml).
pub fn project_config_path(dir: &Path) -> PathBuf {
    dir.join(".ccrun").join("config.toml")
}

//! Editor host seam.
//!
//! The orchestration layer was designed to live inside an editor: it saves
//! the active buffer before compiling, opens the diagnostics artifact in a
//! split pane, and reports through the editor's notification system. This
//! trait captures that contract so the CLI, tests, and any future embedding
//! can each supply their own implementation.

use std::path::{Path, PathBuf};

use anyhow::Result;

use crate::core::language::LanguageKind;
use crate::util::config::SplitDirection;
use crate::util::fs;
use crate::util::shell::{Shell, Status};

/// The document currently focused in the host, with its declared language
/// when the host already resolved one.
#[derive(Debug, Clone)]
pub struct ActiveDocument {
    pub path: PathBuf,
    pub language: Option<LanguageKind>,
}

/// Contract the orchestrator expects from its surroundings.
pub trait EditorHost {
    /// The currently active document, if any.
    fn active_document(&self) -> Option<ActiveDocument>;

    /// Persist unsaved changes of the active document.
    fn save_active_document(&self) -> Result<()>;

    /// Surface an error to the user.
    fn notify_error(&self, message: &str);

    /// Surface a warning to the user.
    fn notify_warning(&self, message: &str);

    /// Surface a success message to the user.
    fn notify_success(&self, message: &str);

    /// Present the diagnostics artifact at `path` (read-only) in the given
    /// split direction.
    fn open_diagnostics(&self, path: &Path, split: SplitDirection) -> Result<()>;

    /// Dismiss any open view of the diagnostics artifact at `path`.
    fn close_diagnostics(&self, path: &Path) -> Result<()>;

    /// Return focus to the original source document.
    fn focus_source(&self, path: &Path) -> Result<()>;
}

/// Console-backed host for the CLI.
///
/// There is no active document on a command line: the source file always
/// arrives as an argument, notifications become shell status lines, and
/// "opening" the diagnostics artifact prints it.
#[derive(Debug, Default)]
pub struct ConsoleHost {
    shell: Shell,
}

impl ConsoleHost {
    pub fn new(shell: Shell) -> Self {
        ConsoleHost { shell }
    }

    pub fn shell(&self) -> &Shell {
        &self.shell
    }
}

impl EditorHost for ConsoleHost {
    fn active_document(&self) -> Option<ActiveDocument> {
        None
    }

    fn save_active_document(&self) -> Result<()> {
        Ok(())
    }

    fn notify_error(&self, message: &str) {
        self.shell.error(message);
    }

    fn notify_warning(&self, message: &str) {
        self.shell.warning(message);
    }

    fn notify_success(&self, message: &str) {
        self.shell.status(Status::Finished, message);
    }

    fn open_diagnostics(&self, path: &Path, _split: SplitDirection) -> Result<()> {
        let text = fs::read_to_string(path)?;
        self.shell.print_block(&text);
        self.shell
            .error(format!("diagnostics written to {}", path.display()));
        Ok(())
    }

    fn close_diagnostics(&self, _path: &Path) -> Result<()> {
        Ok(())
    }

    fn focus_source(&self, _path: &Path) -> Result<()> {
        Ok(())
    }
}

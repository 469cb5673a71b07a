//! Test utilities and mocks for ccrun unit tests.
//!
//! Provides a recording editor host so orchestration tests can assert on
//! notifications, pane operations, and save requests without a real UI.

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::Result;

use crate::core::language::LanguageKind;
use crate::host::{ActiveDocument, EditorHost};
use crate::util::config::SplitDirection;

/// Everything a host was asked to do, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostEvent {
    SavedActive,
    Error(String),
    Warning(String),
    Success(String),
    OpenedDiagnostics(PathBuf),
    ClosedDiagnostics(PathBuf),
    FocusedSource(PathBuf),
}

/// Recording host for orchestration tests.
#[derive(Debug, Default)]
pub struct FakeHost {
    active: Option<(PathBuf, Option<LanguageKind>)>,
    events: Mutex<Vec<HostEvent>>,
}

impl FakeHost {
    pub fn new() -> Self {
        FakeHost::default()
    }

    /// Pretend `path` is the focused document.
    pub fn with_active(path: impl Into<PathBuf>, language: Option<LanguageKind>) -> Self {
        FakeHost {
            active: Some((path.into(), language)),
            events: Mutex::new(Vec::new()),
        }
    }

    /// Snapshot of everything recorded so far.
    pub fn events(&self) -> Vec<HostEvent> {
        self.events.lock().unwrap().clone()
    }

    fn record(&self, event: HostEvent) {
        self.events.lock().unwrap().push(event);
    }
}

impl EditorHost for FakeHost {
    fn active_document(&self) -> Option<ActiveDocument> {
        self.active.as_ref().map(|(path, language)| ActiveDocument {
            path: path.clone(),
            language: *language,
        })
    }

    fn save_active_document(&self) -> Result<()> {
        self.record(HostEvent::SavedActive);
        Ok(())
    }

    fn notify_error(&self, message: &str) {
        self.record(HostEvent::Error(message.to_string()));
    }

    fn notify_warning(&self, message: &str) {
        self.record(HostEvent::Warning(message.to_string()));
    }

    fn notify_success(&self, message: &str) {
        self.record(HostEvent::Success(message.to_string()));
    }

    fn open_diagnostics(&self, path: &Path, _split: SplitDirection) -> Result<()> {
        self.record(HostEvent::OpenedDiagnostics(path.to_path_buf()));
        Ok(())
    }

    fn close_diagnostics(&self, path: &Path) -> Result<()> {
        self.record(HostEvent::ClosedDiagnostics(path.to_path_buf()));
        Ok(())
    }

    fn focus_source(&self, path: &Path) -> Result<()> {
        self.record(HostEvent::FocusedSource(path.to_path_buf()));
        Ok(())
    }
}

/// Write a stub compiler script to `dir` and return its path.
///
/// The script writes `stderr_text` to stderr and exits with `exit_code`.
#[cfg(unix)]
pub fn write_stub_compiler(dir: &Path, name: &str, stderr_text: &str, exit_code: i32) -> PathBuf {
    use std::os::unix::fs::PermissionsExt;

    let path = dir.join(name);
    let script = format!(
        "#!/bin/sh\nprintf '%s' '{}' >&2\nexit {}\n",
        stderr_text.replace('\'', "'\\''"),
        exit_code
    );
    std::fs::write(&path, script).unwrap();
    std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
    path
}

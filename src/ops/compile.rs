//! Implementation of `ccrun compile` and `ccrun debug`.
//!
//! Sequences the whole cycle: resolve the source and its language, flush
//! unsaved editor state, invoke the compiler, surface diagnostics, manage
//! the on-disk diagnostics artifact, and hand a successful build to the
//! launcher.
//!
//! Failures before the compiler is spawned abort the invocation with no
//! partial effects. Failures while handling the diagnostics artifact are
//! logged and never escalated: they must not mask the compile outcome.

use std::path::{Path, PathBuf};

use anyhow::{bail, Result};

use crate::core::language::LanguageKind;
use crate::host::EditorHost;
use crate::ops::run;
use crate::util::config::Config;
use crate::util::diagnostic::{CompilerNotFoundError, NoSourceFileError, UnknownFileTypeError};
use crate::util::fs;
use crate::util::process::{find_executable, ProcessBuilder};

/// Fixed name of the diagnostics artifact, written to the source directory.
///
/// Keyed by directory, not by invocation: a second failing compile in the
/// same directory overwrites the first.
pub const DIAGNOSTICS_FILE_NAME: &str = ".ccrun-errors.log";

/// One compiler invocation, fully resolved. Immutable once built.
#[derive(Debug, Clone)]
pub struct CompileRequest {
    /// Source files, in caller-supplied order. Never empty.
    pub source_paths: Vec<PathBuf>,

    /// Classified language, which selects the compiler and flags.
    pub language: LanguageKind,

    /// Where the compiled binary goes.
    pub output_path: PathBuf,

    /// Extra compiler flags, already whitespace-split.
    pub extra_flags: Vec<String>,

    /// Emit debug symbols (`-g`).
    pub debug_symbols: bool,
}

/// Exit code and accumulated stderr of a finished compile.
#[derive(Debug, Clone)]
pub struct CompileResult {
    pub exit_code: i32,

    /// Accumulated standard-error bytes. Covers both warnings (exit 0) and
    /// errors (non-zero exit). May be empty.
    pub diagnostic_text: String,
}

impl CompileResult {
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }
}

/// Options for the compile command.
#[derive(Debug, Clone, Default)]
pub struct CompileOptions {
    /// Run the result under gdb.
    pub attach_debugger: bool,

    /// CLI override for run-after-compile.
    pub run_after: Option<bool>,

    /// CLI override for compiling into the system temp directory.
    pub to_temp_dir: Option<bool>,

    /// CLI override for extra compiler flags (whitespace-separated).
    pub extra_flags: Option<String>,
}

/// Compile `source` (or the host's active document) and, on success,
/// optionally launch the result.
///
/// Returns the compile outcome; a non-zero exit is an `Ok` result, not an
/// error. `Err` is reserved for precondition failures and spawn failures of
/// the compiler itself.
pub fn compile_and_run(
    source: Option<&Path>,
    opts: &CompileOptions,
    config: &Config,
    host: &dyn EditorHost,
) -> Result<CompileResult> {
    let (source_path, language, from_active) = resolve_source(source, host)?;

    if !source_path.exists() {
        bail!("source file not found: {}", source_path.display());
    }

    // Compiling a stale buffer is a usability trap; always flush first when
    // the trigger was the active document.
    if from_active {
        host.save_active_document()?;
    }

    let compiler = config.compiler(language);
    let Some(compiler_path) = find_executable(compiler) else {
        return Err(CompilerNotFoundError {
            language: language.name().to_string(),
            compiler: compiler.to_string(),
        }
        .into());
    };

    let source_dir = source_dir(&source_path)?;
    let request = CompileRequest {
        source_paths: vec![source_path.clone()],
        language,
        output_path: output_path(&source_path, &source_dir, opts, config),
        extra_flags: match &opts.extra_flags {
            Some(raw) => raw.split_whitespace().map(str::to_string).collect(),
            None => config.extra_flags(language),
        },
        debug_symbols: opts.attach_debugger,
    };

    let builder = ProcessBuilder::new(&compiler_path)
        .args(build_compiler_args(&request))
        .cwd(&source_dir);
    tracing::debug!("compiling with `{}`", builder.display_command());

    let exec = builder.exec_streaming_stderr()?;
    let result = CompileResult {
        exit_code: exec.exit_code,
        diagnostic_text: exec.stderr,
    };

    let artifact = source_dir.join(DIAGNOSTICS_FILE_NAME);

    if result.success() {
        handle_success(&request, &result, &artifact, &source_path, &source_dir, opts, config, host);
    } else {
        handle_failure(&result, &artifact, &source_path, config, host);
    }

    Ok(result)
}

/// Resolve which file to compile and what language it is.
///
/// An explicit path (file-browser trigger) classifies by extension; no path
/// (keybinding trigger) falls back to the active document and its
/// already-declared language.
fn resolve_source(
    source: Option<&Path>,
    host: &dyn EditorHost,
) -> Result<(PathBuf, LanguageKind, bool)> {
    match source {
        Some(path) => {
            let language =
                LanguageKind::from_path(path).ok_or_else(|| UnknownFileTypeError::new(path))?;
            Ok((path.to_path_buf(), language, false))
        }
        None => {
            let doc = host.active_document().ok_or(NoSourceFileError)?;
            let language = doc
                .language
                .or_else(|| LanguageKind::from_path(&doc.path))
                .ok_or_else(|| UnknownFileTypeError::new(&doc.path))?;
            Ok((doc.path, language, true))
        }
    }
}

/// Directory of the source file; the compiler's working directory.
fn source_dir(source: &Path) -> Result<PathBuf> {
    match source.parent() {
        Some(p) if !p.as_os_str().is_empty() => Ok(p.to_path_buf()),
        _ => Ok(std::env::current_dir()?),
    }
}

/// Where the compiled binary goes: the system temp directory by default,
/// or beside the source when configured.
fn output_path(
    source: &Path,
    source_dir: &Path,
    opts: &CompileOptions,
    config: &Config,
) -> PathBuf {
    let dir = if opts.to_temp_dir.unwrap_or_else(|| config.compile_to_temp_dir()) {
        std::env::temp_dir()
    } else {
        source_dir.to_path_buf()
    };

    let stem = source.file_stem().unwrap_or(source.as_os_str());
    let mut out = dir.join(stem);
    if cfg!(windows) {
        out.set_extension("exe");
    }
    out
}

/// Assemble the compiler argument vector.
///
/// Shape: [-g if debugging] <sources...> -o <output> <extra flags...>.
pub fn build_compiler_args(request: &CompileRequest) -> Vec<String> {
    let mut args = Vec::new();
    if request.debug_symbols {
        args.push("-g".to_string());
    }
    for source in &request.source_paths {
        args.push(source.display().to_string());
    }
    args.push("-o".to_string());
    args.push(request.output_path.display().to_string());
    args.extend(request.extra_flags.iter().cloned());
    args
}

/// Non-zero exit: surface and/or persist the diagnostics.
fn handle_failure(
    result: &CompileResult,
    artifact: &Path,
    source: &Path,
    config: &Config,
    host: &dyn EditorHost,
) {
    if config.show_errors() {
        host.notify_error(&result.diagnostic_text);
    }

    if config.persist_diagnostics() {
        if let Err(e) = fs::write_string(artifact, &result.diagnostic_text) {
            tracing::warn!("failed to write diagnostics artifact: {:#}", e);
            return;
        }
        if let Err(e) = host.open_diagnostics(artifact, config.split_direction()) {
            tracing::warn!("failed to open diagnostics artifact: {:#}", e);
        }
        if let Err(e) = host.focus_source(source) {
            tracing::warn!("failed to restore focus: {:#}", e);
        }
    }
}

/// Zero exit: surface warnings, run or report, clear the stale artifact.
#[allow(clippy::too_many_arguments)]
fn handle_success(
    request: &CompileRequest,
    result: &CompileResult,
    artifact: &Path,
    source: &Path,
    source_dir: &Path,
    opts: &CompileOptions,
    config: &Config,
    host: &dyn EditorHost,
) {
    // Compilation can succeed with warnings on stderr.
    if !result.diagnostic_text.is_empty() && config.show_warnings() {
        host.notify_warning(&result.diagnostic_text);
    }

    if opts.run_after.unwrap_or_else(|| config.run_after_compile()) {
        // Fire-and-forget: the launched program is outside this operation's
        // success/failure accounting.
        if let Err(e) = run::launch(&request.output_path, opts.attach_debugger, source_dir, config)
        {
            tracing::warn!("failed to launch program: {:#}", e);
        }
    } else {
        host.notify_success(&format!("compiled {}", request.output_path.display()));
    }

    if artifact.exists() {
        if config.close_diagnostics_on_success() {
            if let Err(e) = host.close_diagnostics(artifact) {
                tracing::warn!("failed to close diagnostics view: {:#}", e);
            }
        }
        if let Err(e) = fs::remove_file_if_exists(artifact) {
            tracing::warn!("failed to remove diagnostics artifact: {:#}", e);
        }
    }

    if let Err(e) = host.focus_source(source) {
        tracing::warn!("failed to restore focus: {:#}", e);
    }
}

#[cfg(test)]
mod tests {
    use std::path::{Path, PathBuf};

    use super::*;
    use crate::test_support::{FakeHost, HostEvent};

    fn request(debug: bool, extra: &[&str]) -> CompileRequest {
        CompileRequest {
            source_paths: vec![PathBuf::from("main.cpp")],
            language: LanguageKind::Cpp,
            output_path: PathBuf::from("/tmp/main"),
            extra_flags: extra.iter().map(|s| s.to_string()).collect(),
            debug_symbols: debug,
        }
    }

    #[test]
    fn test_args_output_follows_sources_precedes_extra_flags() {
        let args = build_compiler_args(&request(false, &["-Wall", "-O2"]));

        assert_eq!(args, vec!["main.cpp", "-o", "/tmp/main", "-Wall", "-O2"]);
    }

    #[test]
    fn test_args_debug_flag_iff_requested() {
        let with_debug = build_compiler_args(&request(true, &[]));
        assert_eq!(with_debug, vec!["-g", "main.cpp", "-o", "/tmp/main"]);

        let without = build_compiler_args(&request(false, &[]));
        assert!(!without.contains(&"-g".to_string()));
    }

    #[test]
    fn test_args_multiple_sources_keep_order() {
        let mut req = request(false, &[]);
        req.source_paths = vec![PathBuf::from("a.cpp"), PathBuf::from("b.cpp")];

        let args = build_compiler_args(&req);
        assert_eq!(args, vec!["a.cpp", "b.cpp", "-o", "/tmp/main"]);
    }

    #[test]
    fn test_no_source_and_no_active_document_fails() {
        let host = FakeHost::new();
        let err = compile_and_run(None, &CompileOptions::default(), &Config::default(), &host)
            .unwrap_err();

        assert!(err.is::<NoSourceFileError>());
        assert!(host.events().is_empty());
    }

    #[test]
    fn test_unknown_extension_fails_before_any_effect() {
        let host = FakeHost::new();
        let err = compile_and_run(
            Some(Path::new("notes.txt")),
            &CompileOptions::default(),
            &Config::default(),
            &host,
        )
        .unwrap_err();

        assert!(err.is::<UnknownFileTypeError>());
        assert!(host.events().is_empty());
    }

    #[test]
    fn test_missing_compiler_fails_before_any_spawn() {
        let tmp = tempfile::TempDir::new().unwrap();
        let source = tmp.path().join("main.c");
        std::fs::write(&source, "int main(void) { return 0; }\n").unwrap();

        let mut config = Config::default();
        config.compile.cc = Some("ccrun-definitely-not-a-real-cc".to_string());

        let host = FakeHost::new();
        let err = compile_and_run(
            Some(&source),
            &CompileOptions::default(),
            &config,
            &host,
        )
        .unwrap_err();

        assert!(err.is::<CompilerNotFoundError>());
    }

    #[cfg(unix)]
    mod with_stub_compiler {
        use std::path::{Path, PathBuf};

        use super::*;
        use crate::test_support::write_stub_compiler;
        use tempfile::TempDir;

        /// Config wired to a stub compiler, compiling beside the source and
        /// never launching.
        fn stub_config(cc: &Path) -> Config {
            let mut config = Config::default();
            config.compile.cc = Some(cc.display().to_string());
            config.compile.cxx = Some(cc.display().to_string());
            config.compile.to_temp_dir = Some(false);
            config.run.after_compile = Some(false);
            config
        }

        fn write_source(dir: &Path, name: &str) -> PathBuf {
            let path = dir.join(name);
            std::fs::write(&path, "int main(void) { return 0; }\n").unwrap();
            path
        }

        #[test]
        fn test_success_creates_no_artifact() {
            let tmp = TempDir::new().unwrap();
            let cc = write_stub_compiler(tmp.path(), "cc-ok", "", 0);
            let source = write_source(tmp.path(), "main.c");
            let config = stub_config(&cc);
            let host = FakeHost::new();

            let result =
                compile_and_run(Some(&source), &CompileOptions::default(), &config, &host)
                    .unwrap();

            assert!(result.success());
            assert!(result.diagnostic_text.is_empty());
            assert!(!tmp.path().join(DIAGNOSTICS_FILE_NAME).exists());

            let events = host.events();
            assert!(events.contains(&HostEvent::Success(format!(
                "compiled {}",
                tmp.path().join("main").display()
            ))));
            assert!(events.contains(&HostEvent::FocusedSource(source.clone())));
        }

        #[test]
        fn test_failure_persists_exact_stderr() {
            let tmp = TempDir::new().unwrap();
            let cc = write_stub_compiler(tmp.path(), "cc-bad", "error: x undeclared", 1);
            let source = write_source(tmp.path(), "broken.c");
            let config = stub_config(&cc);
            let host = FakeHost::new();

            let result =
                compile_and_run(Some(&source), &CompileOptions::default(), &config, &host)
                    .unwrap();

            assert_eq!(result.exit_code, 1);
            assert_eq!(result.diagnostic_text, "error: x undeclared");

            let artifact = tmp.path().join(DIAGNOSTICS_FILE_NAME);
            assert_eq!(
                std::fs::read_to_string(&artifact).unwrap(),
                "error: x undeclared"
            );

            let events = host.events();
            assert!(events.contains(&HostEvent::OpenedDiagnostics(artifact)));
            // show_errors defaults to false
            assert!(!events
                .iter()
                .any(|e| matches!(e, HostEvent::Error(_))));
        }

        #[test]
        fn test_failure_with_persist_disabled_leaves_no_file() {
            let tmp = TempDir::new().unwrap();
            let cc = write_stub_compiler(tmp.path(), "cc-bad", "boom", 1);
            let source = write_source(tmp.path(), "broken.c");
            let mut config = stub_config(&cc);
            config.diagnostics.persist = Some(false);
            config.diagnostics.show_errors = Some(true);
            let host = FakeHost::new();

            let result =
                compile_and_run(Some(&source), &CompileOptions::default(), &config, &host)
                    .unwrap();

            assert!(!result.success());
            assert!(!tmp.path().join(DIAGNOSTICS_FILE_NAME).exists());
            assert!(host.events().contains(&HostEvent::Error("boom".to_string())));
        }

        #[test]
        fn test_recompile_success_deletes_artifact() {
            let tmp = TempDir::new().unwrap();
            let cc_bad = write_stub_compiler(tmp.path(), "cc-bad", "error: nope", 1);
            let cc_ok = write_stub_compiler(tmp.path(), "cc-ok", "", 0);
            let source = write_source(tmp.path(), "main.c");
            let artifact = tmp.path().join(DIAGNOSTICS_FILE_NAME);

            let host = FakeHost::new();
            compile_and_run(
                Some(&source),
                &CompileOptions::default(),
                &stub_config(&cc_bad),
                &host,
            )
            .unwrap();
            assert!(artifact.exists());

            compile_and_run(
                Some(&source),
                &CompileOptions::default(),
                &stub_config(&cc_ok),
                &host,
            )
            .unwrap();
            assert!(!artifact.exists());
            assert!(host
                .events()
                .contains(&HostEvent::ClosedDiagnostics(artifact)));
        }

        #[test]
        fn test_success_twice_is_idempotent() {
            let tmp = TempDir::new().unwrap();
            let cc = write_stub_compiler(tmp.path(), "cc-ok", "", 0);
            let source = write_source(tmp.path(), "main.c");
            let config = stub_config(&cc);
            let host = FakeHost::new();

            compile_and_run(Some(&source), &CompileOptions::default(), &config, &host).unwrap();
            compile_and_run(Some(&source), &CompileOptions::default(), &config, &host).unwrap();

            assert!(!tmp.path().join(DIAGNOSTICS_FILE_NAME).exists());
        }

        #[test]
        fn test_run_after_compile_skips_success_notification() {
            let tmp = TempDir::new().unwrap();
            let cc = write_stub_compiler(tmp.path(), "cc-ok", "", 0);
            let source = write_source(tmp.path(), "main.c");
            let mut config = stub_config(&cc);
            config.run.after_compile = Some(true);
            let host = FakeHost::new();

            let result =
                compile_and_run(Some(&source), &CompileOptions::default(), &config, &host)
                    .unwrap();

            // The outcome is handed to the launcher instead of being reported;
            // a failed terminal spawn is logged, never escalated.
            assert!(result.success());
            assert!(!host
                .events()
                .iter()
                .any(|e| matches!(e, HostEvent::Success(_))));
        }

        #[test]
        fn test_warnings_on_success_are_surfaced() {
            let tmp = TempDir::new().unwrap();
            let cc = write_stub_compiler(tmp.path(), "cc-warn", "warning: unused", 0);
            let source = write_source(tmp.path(), "main.c");
            let config = stub_config(&cc);
            let host = FakeHost::new();

            let result =
                compile_and_run(Some(&source), &CompileOptions::default(), &config, &host)
                    .unwrap();

            assert!(result.success());
            assert!(host
                .events()
                .contains(&HostEvent::Warning("warning: unused".to_string())));
            // Warnings never produce an artifact
            assert!(!tmp.path().join(DIAGNOSTICS_FILE_NAME).exists());
        }

        #[test]
        fn test_warnings_suppressed_when_disabled() {
            let tmp = TempDir::new().unwrap();
            let cc = write_stub_compiler(tmp.path(), "cc-warn", "warning: unused", 0);
            let source = write_source(tmp.path(), "main.c");
            let mut config = stub_config(&cc);
            config.diagnostics.show_warnings = Some(false);
            let host = FakeHost::new();

            compile_and_run(Some(&source), &CompileOptions::default(), &config, &host).unwrap();

            assert!(!host
                .events()
                .iter()
                .any(|e| matches!(e, HostEvent::Warning(_))));
        }

        #[test]
        fn test_active_document_is_saved_before_compiling() {
            let tmp = TempDir::new().unwrap();
            let cc = write_stub_compiler(tmp.path(), "cc-ok", "", 0);
            let source = write_source(tmp.path(), "main.c");
            let config = stub_config(&cc);
            let host = FakeHost::with_active(&source, Some(LanguageKind::C));

            let result =
                compile_and_run(None, &CompileOptions::default(), &config, &host).unwrap();

            assert!(result.success());
            assert_eq!(host.events().first(), Some(&HostEvent::SavedActive));
        }

        #[test]
        fn test_cli_extra_flags_override_config() {
            let tmp = TempDir::new().unwrap();
            let cc = write_stub_compiler(tmp.path(), "cc-ok", "", 0);
            let source = write_source(tmp.path(), "main.c");
            let mut config = stub_config(&cc);
            config.compile.cflags = Some("-O2".to_string());
            let host = FakeHost::new();

            let opts = CompileOptions {
                extra_flags: Some("  -O0   -g3 ".to_string()),
                ..Default::default()
            };

            // The stub ignores its flags; this exercises the override path
            // and the whitespace splitting end to end.
            let result = compile_and_run(Some(&source), &opts, &config, &host).unwrap();
            assert!(result.success());
        }
    }
}

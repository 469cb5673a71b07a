//! User-facing error types.
//!
//! Precondition failures (no source file, unknown file type, missing
//! compiler) abort the whole invocation before any process is spawned and
//! carry a suggested fix. Everything downstream of a successful spawn is
//! either compiler output (surfaced, never fatal) or cleanup noise (logged,
//! never surfaced).

use miette::Diagnostic as MietteDiagnostic;
use thiserror::Error;

/// No source file was given and no active document exists.
#[derive(Debug, Error, MietteDiagnostic)]
#[error("no source file to compile")]
#[diagnostic(
    code(ccrun::compile::no_source),
    help("Pass a source file, e.g. `ccrun compile main.c`")
)]
pub struct NoSourceFileError;

/// The file extension maps to no supported language.
#[derive(Debug, Error, MietteDiagnostic)]
#[error("cannot determine the language of `{path}`")]
#[diagnostic(
    code(ccrun::compile::unknown_file_type),
    help("ccrun compiles C (.c) and C++ (.cpp, .cc, .cxx, .c++) sources")
)]
pub struct UnknownFileTypeError {
    pub path: String,
}

impl UnknownFileTypeError {
    pub fn new(path: &std::path::Path) -> Self {
        UnknownFileTypeError {
            path: path.display().to_string(),
        }
    }
}

/// The configured compiler executable is not on PATH.
#[derive(Debug, Error, MietteDiagnostic)]
#[error("{language} compiler `{compiler}` not found")]
#[diagnostic(
    code(ccrun::compile::compiler_not_found),
    help("Install the compiler or point `ccrun config set --cc/--cxx` at one")
)]
pub struct CompilerNotFoundError {
    pub language: String,
    pub compiler: String,
}

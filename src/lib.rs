//! ccrun - Compile a C/C++ source file and run it in a terminal
//!
//! This crate provides the core library functionality for ccrun:
//! language classification, compiler invocation, diagnostics handling,
//! and platform-specific program launching.

pub mod core;
pub mod host;
pub mod ops;
pub mod util;

/// Test utilities and mocks for ccrun unit tests.
#[cfg(test)]
pub mod test_support;

pub use crate::core::language::LanguageKind;
pub use crate::host::{ConsoleHost, EditorHost};
pub use crate::ops::compile::{CompileRequest, CompileResult};
pub use crate::util::config::Config;

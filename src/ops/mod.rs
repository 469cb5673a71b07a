//! High-level operations.
//!
//! This module contains the implementation of ccrun commands.

pub mod compile;
pub mod run;

pub use compile::{compile_and_run, CompileOptions, CompileRequest, CompileResult};
pub use run::{launch, Launcher, Terminal};

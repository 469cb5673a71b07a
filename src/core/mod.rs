//! Core domain types

pub mod language;

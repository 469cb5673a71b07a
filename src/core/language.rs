//! Source language classification.
//!
//! Maps file extensions to a language kind by consulting a static table.
//! Two call sites exist: compiling an explicit path (file-browser style)
//! resolves the extension here, while compiling the active document asks
//! the editor host for its already-declared language instead.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// A supported source language.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LanguageKind {
    C,
    Cpp,
}

/// Known extensions per language. First language whose set contains the
/// extension wins.
const EXTENSION_TABLE: &[(LanguageKind, &[&str])] = &[
    (LanguageKind::C, &["c"]),
    (LanguageKind::Cpp, &["cpp", "cc", "cxx", "c++"]),
];

impl LanguageKind {
    /// Classify a file extension, without the leading dot.
    pub fn from_extension(ext: &str) -> Option<LanguageKind> {
        let ext = ext.to_lowercase();
        EXTENSION_TABLE
            .iter()
            .find(|(_, exts)| exts.contains(&ext.as_str()))
            .map(|(lang, _)| *lang)
    }

    /// Classify a path by its extension.
    pub fn from_path(path: &Path) -> Option<LanguageKind> {
        path.extension()
            .and_then(|e| e.to_str())
            .and_then(Self::from_extension)
    }

    /// Human-readable language name.
    pub fn name(&self) -> &'static str {
        match self {
            LanguageKind::C => "C",
            LanguageKind::Cpp => "C++",
        }
    }
}

impl fmt::Display for LanguageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for LanguageKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "c" => Ok(LanguageKind::C),
            "c++" | "cpp" | "cxx" => Ok(LanguageKind::Cpp),
            _ => Err(format!("unknown language '{}'; expected 'c' or 'c++'", s)),
        }
    }
}

//! Supported source languages
//!
//! Language dispatch is a closed set of syntax families. Unknown tags are
//! rejected when the `Language` is constructed, never deep inside extraction.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::errors::{EnergyError, Result};

/// Syntax family of a sample
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Language {
    /// Indentation-delimited blocks, `#` comments (Python)
    #[serde(rename = "python", alias = "py")]
    PythonicIndent,

    /// Brace-delimited blocks, C-style comments (JavaScript, TypeScript)
    #[serde(
        rename = "javascript",
        alias = "typescript",
        alias = "js",
        alias = "ts"
    )]
    BraceBased,

    /// Brace-delimited blocks with a compile step (Java)
    #[serde(rename = "java")]
    JvmLike,
}

impl Language {
    /// All variants, in declaration order
    pub const ALL: [Language; 3] = [
        Language::PythonicIndent,
        Language::BraceBased,
        Language::JvmLike,
    ];

    /// Parse a language tag (case-insensitive)
    ///
    /// # Errors
    ///
    /// `EnergyError::Configuration` for any tag outside the supported set.
    pub fn from_tag(tag: &str) -> Result<Self> {
        match tag.trim().to_lowercase().as_str() {
            "python" | "py" => Ok(Language::PythonicIndent),
            "javascript" | "typescript" | "js" | "ts" => Ok(Language::BraceBased),
            "java" => Ok(Language::JvmLike),
            other => Err(EnergyError::config(format!(
                "unsupported language '{}'. Valid: python, javascript, typescript, java",
                other
            ))),
        }
    }

    /// Canonical tag, as written to records
    pub fn as_str(&self) -> &'static str {
        match self {
            Language::PythonicIndent => "python",
            Language::BraceBased => "javascript",
            Language::JvmLike => "java",
        }
    }

    /// Blocks are delimited by braces rather than indentation
    pub fn uses_braces(&self) -> bool {
        !matches!(self, Language::PythonicIndent)
    }
}

impl std::str::FromStr for Language {
    type Err = EnergyError;

    fn from_str(s: &str) -> Result<Self> {
        Language::from_tag(s)
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

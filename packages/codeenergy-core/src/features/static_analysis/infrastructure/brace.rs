//! Brace-family analyzers (script and JVM flavours)
//!
//! Both flavours share comment syntax and brace-depth nesting; they differ in
//! how function definitions and recursion candidates are recognised.

use super::patterns::{
    capture_names, count, BLOCK_COMMENT, JVM_CALL_NAME, JVM_DEF, SCRIPT_ASSIGNED_NAME, SCRIPT_DEF,
    SCRIPT_FUNCTION_NAME, SLASH_COMMENT,
};
use crate::features::static_analysis::domain::{brace_depth, LanguageAnalyzer};
use crate::shared::models::Language;

/// Analyzer for brace-delimited sources
#[derive(Debug, Clone, Copy)]
pub struct BraceAnalyzer {
    language: Language,
}

impl BraceAnalyzer {
    /// JavaScript / TypeScript flavour
    pub const fn script() -> Self {
        Self {
            language: Language::BraceBased,
        }
    }

    /// Java flavour
    pub const fn jvm() -> Self {
        Self {
            language: Language::JvmLike,
        }
    }

    fn is_jvm(&self) -> bool {
        self.language == Language::JvmLike
    }
}

impl LanguageAnalyzer for BraceAnalyzer {
    fn language(&self) -> Language {
        self.language
    }

    fn strip_comments(&self, source: &str) -> String {
        let without_blocks = BLOCK_COMMENT.replace_all(source, "");
        SLASH_COMMENT.replace_all(&without_blocks, "").into_owned()
    }

    fn strip_line_comment<'a>(&self, line: &'a str) -> &'a str {
        match line.find("//") {
            Some(pos) => &line[..pos],
            None => line,
        }
    }

    fn nesting_depth(&self, lines: &[&str]) -> usize {
        brace_depth(lines)
    }

    fn count_functions(&self, code: &str) -> usize {
        if self.is_jvm() {
            count(&JVM_DEF, code)
        } else {
            count(&SCRIPT_DEF, code)
        }
    }

    fn is_function_definition(&self, line: &str) -> bool {
        if self.is_jvm() {
            JVM_DEF.is_match(line)
        } else {
            SCRIPT_DEF.is_match(line)
        }
    }

    fn recursion_candidates(&self, code: &str) -> Vec<String> {
        if self.is_jvm() {
            // Every call-like identifier is a candidate
            capture_names(&JVM_CALL_NAME, code)
        } else {
            let mut names = capture_names(&SCRIPT_FUNCTION_NAME, code);
            names.extend(capture_names(&SCRIPT_ASSIGNED_NAME, code));
            names
        }
    }
}

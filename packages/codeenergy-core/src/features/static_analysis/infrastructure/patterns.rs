//! Compiled extraction patterns
//!
//! Patterns are compile-time constants; a failure to compile is a programming
//! error caught by the tests in this module.

use once_cell::sync::Lazy;
use regex::Regex;

pub(crate) fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).unwrap_or_else(|e| panic!("invalid built-in pattern {pattern:?}: {e}"))
}

// ═══════════════════════════════════════════════════════════════════════════
// Comments
// ═══════════════════════════════════════════════════════════════════════════

pub static HASH_COMMENT: Lazy<Regex> = Lazy::new(|| compile(r"#.*"));
pub static BLOCK_COMMENT: Lazy<Regex> = Lazy::new(|| compile(r"/\*[\s\S]*?\*/"));
pub static SLASH_COMMENT: Lazy<Regex> = Lazy::new(|| compile(r"//.*"));
pub static COMMENT_LINE: Lazy<Regex> = Lazy::new(|| compile(r"^\s*(#|//|/\*)"));

// ═══════════════════════════════════════════════════════════════════════════
// Loops and control flow
// ═══════════════════════════════════════════════════════════════════════════

pub static LOOP_KEYWORD: Lazy<Regex> = Lazy::new(|| compile(r"\b(for|while)\b"));
pub static INDENT_LOOP_HEADER: Lazy<Regex> = Lazy::new(|| compile(r"^\s*(for|while)\b"));
pub static CYCLOMATIC: Lazy<Regex> = Lazy::new(|| {
    compile(r"\b(if|elif|else if|switch|case|default|catch|for|while)\b|&&|\|\|")
});

// ═══════════════════════════════════════════════════════════════════════════
// Operation counters
// ═══════════════════════════════════════════════════════════════════════════

pub static STRING_CONCAT: Lazy<Regex> = Lazy::new(|| compile(r#"\+=\s*['"`]"#));
pub static IN_MEMBERSHIP: Lazy<Regex> =
    Lazy::new(|| compile(r"\b(in)\s+[A-Za-z_][A-Za-z0-9_]*\b"));
pub static INCLUDES_CALL: Lazy<Regex> = Lazy::new(|| compile(r"\.includes\s*\("));
pub static CONTAINS_CALL: Lazy<Regex> = Lazy::new(|| compile(r"\.contains\s*\("));
pub static SORT_CALL: Lazy<Regex> =
    Lazy::new(|| compile(r"\b(sort|Collections\.sort|\.sort\()"));
pub static NEW_OBJECT: Lazy<Regex> = Lazy::new(|| compile(r"\bnew\s+[A-Za-z0-9_\.]+\b"));
pub static ARRAY_LITERAL: Lazy<Regex> = Lazy::new(|| compile(r"\[[^\]]+\]"));
pub static MAP_LIKE: Lazy<Regex> =
    Lazy::new(|| compile(r"(?i)\b(Map|HashMap|dict|set|Set|ArrayList|List)\b"));
pub static CONSTRUCTION: Lazy<Regex> =
    Lazy::new(|| compile(r"\bnew\s+|=\s*\[\]|\.add\(|list\(|dict\(|ArrayList<"));

/// Named API-call patterns, counted into `api_call_counts`
pub static API_CALLS: Lazy<Vec<(&'static str, Regex)>> = Lazy::new(|| {
    vec![
        ("regex", compile(r"\bre\.search\(|\.match\(|re\.compile\(")),
        ("io", compile(r"\b(open\(|fs\.readFileSync\b|\bFileReader\b)")),
        ("sort", compile(r"\b(sort|Collections\.sort|\.sort\()")),
    ]
});

// ═══════════════════════════════════════════════════════════════════════════
// Function definitions
// ═══════════════════════════════════════════════════════════════════════════

pub static PYTHON_DEF: Lazy<Regex> =
    Lazy::new(|| compile(r"(?m)^\s*def\s+[A-Za-z_][A-Za-z0-9_]*\s*\("));
pub static PYTHON_DEF_NAME: Lazy<Regex> =
    Lazy::new(|| compile(r"(?m)^\s*def\s+([A-Za-z_][A-Za-z0-9_]*)\s*\("));

pub static SCRIPT_DEF: Lazy<Regex> = Lazy::new(|| {
    compile(
        r"(?m)^\s*(function\b|const\s+[A-Za-z_][A-Za-z0-9_]*\s*=|\b[A-Za-z_][A-Za-z0-9_]*\s*=\s*\()",
    )
});
pub static SCRIPT_FUNCTION_NAME: Lazy<Regex> =
    Lazy::new(|| compile(r"function\s+([A-Za-z_][A-Za-z0-9_]*)\s*\("));
pub static SCRIPT_ASSIGNED_NAME: Lazy<Regex> =
    Lazy::new(|| compile(r"([A-Za-z_][A-Za-z0-9_]*)\s*=\s*\("));

pub static JVM_DEF: Lazy<Regex> = Lazy::new(|| {
    compile(
        r"(?m)^\s*(public|private|protected|\s)*\s*[A-Za-z0-9_<>\[\]]+\s+[A-Za-z_][A-Za-z0-9_]*\s*\(",
    )
});
pub static JVM_CALL_NAME: Lazy<Regex> =
    Lazy::new(|| compile(r"\b([A-Za-z_][A-Za-z0-9_]*)\s*\("));

/// Count non-overlapping matches
pub fn count(re: &Regex, text: &str) -> usize {
    re.find_iter(text).count()
}

/// Collect the first capture group of every match
pub fn capture_names(re: &Regex, text: &str) -> Vec<String> {
    re.captures_iter(text)
        .filter_map(|c| c.get(1).map(|m| m.as_str().to_string()))
        .collect()
}

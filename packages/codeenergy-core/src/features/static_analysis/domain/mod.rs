//! Domain model for static analysis
//!
//! Pure text heuristics with no I/O. Each syntax family implements
//! `LanguageAnalyzer`; the shared extraction pipeline only talks to this
//! trait, so language dispatch happens exactly once.

use crate::shared::models::Language;

/// Per-language capability used by the extraction pipeline
///
/// Implementations are best-effort textual transforms, not lexers: comment
/// syntax inside string literals is not protected.
pub trait LanguageAnalyzer: Send + Sync {
    fn language(&self) -> Language;

    /// Remove comments, keeping everything else verbatim
    fn strip_comments(&self, source: &str) -> String;

    /// Remove a trailing line comment from a single raw line
    fn strip_line_comment<'a>(&self, line: &'a str) -> &'a str;

    /// Maximum nesting depth over comment-stripped lines
    fn nesting_depth(&self, lines: &[&str]) -> usize;

    /// Number of function definitions in comment-stripped text
    fn count_functions(&self, code: &str) -> usize;

    /// Whether a single line opens a function definition
    fn is_function_definition(&self, line: &str) -> bool;

    /// Candidate function names for the recursion heuristic
    fn recursion_candidates(&self, code: &str) -> Vec<String>;
}

/// Window of lines after a loop header searched for repeated construction
pub const REPEATED_BUILD_WINDOW: usize = 8;

/// Lines below a loop header covered by its hotspot seed
pub const SEED_SPAN_LINES: usize = 5;

/// Running brace depth over `lines`
///
/// A line starting with `}` first lowers the depth, then every line applies
/// its net `{`/`}` balance. Depth never drops below zero.
pub fn brace_depth(lines: &[&str]) -> usize {
    let mut depth: i64 = 0;
    let mut max_depth: i64 = 0;

    for line in lines {
        if line.trim_start().starts_with('}') {
            depth = (depth - 1).max(0);
        }
        let openings = line.matches('{').count() as i64;
        let closings = line.matches('}').count() as i64;
        depth = (depth + openings - closings).max(0);
        max_depth = max_depth.max(depth);
    }

    max_depth as usize
}

/// Indent-family approximation of loop nesting
///
/// A loop header line increments, a blank line decrements; the maximum
/// reached is reported.
pub fn loop_run_depth(lines: &[&str], is_loop_header: impl Fn(&str) -> bool) -> usize {
    let mut depth = 0usize;
    let mut max_depth = 0usize;

    for line in lines {
        if is_loop_header(line) {
            depth += 1;
            max_depth = max_depth.max(depth);
        } else if line.trim().is_empty() {
            depth = depth.saturating_sub(1);
        }
    }

    max_depth
}

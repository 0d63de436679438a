//! Feature extraction pipeline
//!
//! Runs the language-neutral counters over comment-stripped text and defers
//! comment syntax, nesting, function and recursion heuristics to the
//! `LanguageAnalyzer` selected for the sample.

use std::collections::{BTreeMap, BTreeSet};

use regex::Regex;
use tracing::debug;

use super::brace::BraceAnalyzer;
use super::patterns::{
    count, API_CALLS, ARRAY_LITERAL, COMMENT_LINE, CONSTRUCTION, CONTAINS_CALL, CYCLOMATIC,
    INCLUDES_CALL, IN_MEMBERSHIP, LOOP_KEYWORD, MAP_LIKE, NEW_OBJECT, SORT_CALL, STRING_CONCAT,
};
use super::pythonic::PythonicAnalyzer;
use crate::errors::Result;
use crate::features::static_analysis::domain::{
    LanguageAnalyzer, REPEATED_BUILD_WINDOW, SEED_SPAN_LINES,
};
use crate::shared::models::{CodeRange, FeatureVector, Language, FEATURE_VECTOR_VERSION};

static PYTHONIC: PythonicAnalyzer = PythonicAnalyzer;
static SCRIPT: BraceAnalyzer = BraceAnalyzer::script();
static JVM: BraceAnalyzer = BraceAnalyzer::jvm();

/// Analyzer implementation for a syntax family
pub fn analyzer_for(language: Language) -> &'static dyn LanguageAnalyzer {
    match language {
        Language::PythonicIndent => &PYTHONIC,
        Language::BraceBased => &SCRIPT,
        Language::JvmLike => &JVM,
    }
}

/// Text-to-feature-vector extractor
///
/// Deterministic and side-effect free: identical input always produces an
/// identical `FeatureVector`.
#[derive(Debug, Clone, Copy, Default)]
pub struct StaticAnalyzer;

impl StaticAnalyzer {
    pub fn new() -> Self {
        Self
    }

    /// Analyze `source` written in the language named by `language_tag`
    ///
    /// # Errors
    ///
    /// `EnergyError::Configuration` if the tag is not a supported language;
    /// no partial analysis is attempted.
    pub fn analyze(&self, source: &str, language_tag: &str) -> Result<FeatureVector> {
        let language = Language::from_tag(language_tag)?;
        Ok(self.analyze_language(source, language))
    }

    /// Analyze with an already validated language
    pub fn analyze_language(&self, source: &str, language: Language) -> FeatureVector {
        let analyzer = analyzer_for(language);
        let fv = extract(analyzer, source);
        debug!(
            language = %language,
            loops = fv.loop_count,
            depth = fv.nested_loop_depth,
            functions = fv.function_count,
            "extracted static features"
        );
        fv
    }
}

fn extract(analyzer: &dyn LanguageAnalyzer, source: &str) -> FeatureVector {
    let raw_lines: Vec<&str> = source.lines().collect();
    let stripped = analyzer.strip_comments(source);
    let lines: Vec<&str> = stripped.lines().collect();

    let token_count = stripped.chars().count();
    let line_count = lines.iter().filter(|l| !l.trim().is_empty()).count();
    let loop_count = lines.iter().filter(|l| LOOP_KEYWORD.is_match(l)).count();

    let contains_ops = count(&CONTAINS_CALL, &stripped);
    let list_scan_ops =
        count(&IN_MEMBERSHIP, &stripped) + count(&INCLUDES_CALL, &stripped) + contains_ops;

    let function_count = analyzer.count_functions(&stripped);
    let avg_function_length = if function_count > 0 {
        line_count as f64 / function_count as f64
    } else {
        0.0
    };

    let api_call_counts: BTreeMap<String, usize> = API_CALLS
        .iter()
        .map(|(name, re)| (name.to_string(), count(re, &stripped)))
        .collect();

    let comment_lines = raw_lines.iter().filter(|l| COMMENT_LINE.is_match(l)).count();
    let comment_ratio = comment_lines as f64 / raw_lines.len().max(1) as f64;

    FeatureVector {
        language: analyzer.language(),
        version: FEATURE_VECTOR_VERSION.to_string(),
        token_count,
        line_count,
        loop_count,
        nested_loop_depth: analyzer.nesting_depth(&lines),
        string_concat_ops: count(&STRING_CONCAT, &stripped),
        list_scan_ops,
        sort_ops: count(&SORT_CALL, &stripped),
        new_ops: count(&NEW_OBJECT, &stripped),
        array_literals: count(&ARRAY_LITERAL, &stripped),
        map_like: count(&MAP_LIKE, &stripped),
        cyclomatic_tokens: count(&CYCLOMATIC, &stripped),
        function_count,
        avg_function_length,
        recursion_detected: detect_recursion(analyzer, &stripped),
        has_repeated_builds_in_loop: repeated_builds_in_loop(analyzer, &lines),
        comment_ratio,
        contains_ops_java: contains_ops,
        api_call_counts,
        hotspot_seeds: hotspot_seeds(analyzer, &raw_lines),
    }
}

/// Name-occurrence recursion heuristic
///
/// A candidate whose name appears more than once anywhere in the text counts
/// as recursive. Calls from other functions are false positives by design of
/// the heuristic.
fn detect_recursion(analyzer: &dyn LanguageAnalyzer, code: &str) -> bool {
    let candidates: BTreeSet<String> = analyzer.recursion_candidates(code).into_iter().collect();
    candidates.iter().any(|name| {
        Regex::new(&format!(r"\b{}\b", regex::escape(name)))
            .map(|re| re.find_iter(code).nth(1).is_some())
            .unwrap_or(false)
    })
}

/// Construction inside the window following any loop header
///
/// The window starts at the loop line and stops before the next function
/// definition, so a constructor in the following function does not count.
fn repeated_builds_in_loop(analyzer: &dyn LanguageAnalyzer, lines: &[&str]) -> bool {
    lines.iter().enumerate().any(|(idx, line)| {
        if !LOOP_KEYWORD.is_match(line) {
            return false;
        }
        let limit = (idx + REPEATED_BUILD_WINDOW).min(lines.len());
        lines[idx..limit]
            .iter()
            .enumerate()
            .take_while(|(offset, l)| *offset == 0 || !analyzer.is_function_definition(l))
            .any(|(_, l)| CONSTRUCTION.is_match(l))
    })
}

/// One seed per loop line, spanning the header and the next few lines
///
/// Seeds are computed on raw lines so positions refer to the caller's text;
/// loop keywords inside trailing line comments are ignored.
fn hotspot_seeds(analyzer: &dyn LanguageAnalyzer, raw_lines: &[&str]) -> Vec<CodeRange> {
    let Some(last) = raw_lines.len().checked_sub(1) else {
        return Vec::new();
    };

    raw_lines
        .iter()
        .enumerate()
        .filter(|(_, line)| LOOP_KEYWORD.is_match(analyzer.strip_line_comment(line)))
        .map(|(idx, _)| {
            let end = (idx + SEED_SPAN_LINES).min(last);
            let end_character = raw_lines[end].chars().count();
            CodeRange::lines(idx as u32, end as u32, end_character as u32)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const PY_NESTED: &str = "\
def find_pairs(items, targets):
    result = []
    for a in items:
        for b in targets:
            if a in targets:
                result.append((a, b))
    return result
";

    #[test]
    fn test_python_counts() {
        let fv = StaticAnalyzer::new().analyze(PY_NESTED, "python").unwrap();

        assert_eq!(fv.language, Language::PythonicIndent);
        assert_eq!(fv.loop_count, 2);
        assert_eq!(fv.nested_loop_depth, 2);
        assert_eq!(fv.function_count, 1);
        assert_eq!(fv.line_count, 7);
        assert_eq!(fv.avg_function_length, 7.0);
        // `in items`, `in targets` (loop), `in targets` (membership)
        assert_eq!(fv.list_scan_ops, 3);
        assert_eq!(fv.token_count, PY_NESTED.chars().count());
        assert_eq!(fv.hotspot_seeds.len(), 2);
        assert_eq!(fv.hotspot_seeds[0].start.line, 2);
        assert_eq!(fv.hotspot_seeds[0].end.line, 6);
    }

    #[test]
    fn test_unknown_language_rejected() {
        let err = StaticAnalyzer::new().analyze("x", "cobol").unwrap_err();
        assert!(err.is_configuration());
    }

    #[test]
    fn test_seed_clamped_to_last_line() {
        let src = "for (let i = 0; i < n; i++) {\n  s += 'x';\n}";
        let fv = StaticAnalyzer::new().analyze(src, "javascript").unwrap();
        assert_eq!(fv.hotspot_seeds.len(), 1);
        let seed = fv.hotspot_seeds[0];
        assert_eq!(seed.start.line, 0);
        assert_eq!(seed.end.line, 2);
        assert_eq!(seed.end.character, 1);
        assert_eq!(fv.string_concat_ops, 1);
    }

    #[test]
    fn test_commented_loop_is_not_seeded() {
        let src = "x = 1  # for every item\ny = 2\n";
        let fv = StaticAnalyzer::new().analyze(src, "python").unwrap();
        assert_eq!(fv.loop_count, 0);
        assert!(fv.hotspot_seeds.is_empty());
        assert_eq!(fv.comment_ratio, 0.0);
    }

    #[test]
    fn test_empty_source() {
        let fv = StaticAnalyzer::new().analyze("", "java").unwrap();
        assert_eq!(fv.token_count, 0);
        assert_eq!(fv.loop_count, 0);
        assert_eq!(fv.comment_ratio, 0.0);
        assert!(fv.hotspot_seeds.is_empty());
        assert_eq!(fv.api_call_counts.len(), 3);
    }
}

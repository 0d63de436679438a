//! Rule-based hotspot detector
//!
//! Scans raw source lines with a few language-specific patterns. Works on
//! text only; feature vectors are rejected.

use std::collections::BTreeSet;

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use crate::errors::{EnergyError, Result};
use crate::features::scoring::domain::{ScoreInput, ScoreOutcome, ScoringStrategy};
use crate::features::static_analysis::analyzer_for;
use crate::features::static_analysis::infrastructure::patterns::compile;
use crate::shared::models::{CodeRange, Hotspot, Language};

pub const RULE_BASED_VERSION: &str = "rule-based-v1";

/// Max line distance between two loop headers reported as nested
pub const NESTED_LOOP_DISTANCE: usize = 3;
/// Lines after a loop header searched for string accumulation
pub const CONCAT_LOOKAHEAD: usize = 6;

static PYTHON_LOOP: Lazy<Regex> = Lazy::new(|| compile(r"^\s*(for|while)\b"));
static SCRIPT_LOOP: Lazy<Regex> = Lazy::new(|| compile(r"\b(for|while)\s*\(|\.forEach\("));
static JVM_LOOP: Lazy<Regex> = Lazy::new(|| compile(r"\b(for|while)\s*\("));

static STRING_ACCUMULATION: Lazy<Regex> =
    Lazy::new(|| compile(r#"[A-Za-z_]\w*\s*\+=\s*(["'`]|str\(|f["'])"#));

static PYTHON_MEMBERSHIP: Lazy<Regex> = Lazy::new(|| compile(r"\bif\b.+\bin\b.+:"));
static SCRIPT_MEMBERSHIP: Lazy<Regex> = Lazy::new(|| compile(r"\.(includes|indexOf)\("));
static JVM_MEMBERSHIP: Lazy<Regex> = Lazy::new(|| compile(r"\.(contains|indexOf)\("));

/// Fixed output of one detection rule
#[derive(Debug, Clone, Copy)]
struct Rule {
    id: &'static str,
    score: f64,
    confidence: f64,
    suggestion: &'static str,
}

const NESTED_LOOPS: Rule = Rule {
    id: "nested-loops",
    score: 0.7,
    confidence: 0.6,
    suggestion: "Nested loops detected; index the inner collection in a set or dict to avoid repeated scans.",
};

const STRING_CONCAT_IN_LOOP: Rule = Rule {
    id: "string-concat-in-loop",
    score: 0.5,
    confidence: 0.55,
    suggestion: "String built with += inside a loop; collect the parts and join them once.",
};

const LIST_MEMBERSHIP_SCAN: Rule = Rule {
    id: "list-membership-scan",
    score: 0.4,
    confidence: 0.5,
    suggestion: "Linear membership test; use a set for repeated lookups.",
};

impl Rule {
    fn hotspot(&self, range: CodeRange) -> Hotspot {
        Hotspot::new(range, self.score)
            .with_rule(self.id)
            .with_confidence(self.confidence)
            .with_suggestion(Some(self.suggestion.to_string()))
    }
}

fn loop_pattern(language: Language) -> &'static Regex {
    match language {
        Language::PythonicIndent => &PYTHON_LOOP,
        Language::BraceBased => &SCRIPT_LOOP,
        Language::JvmLike => &JVM_LOOP,
    }
}

fn membership_pattern(language: Language) -> &'static Regex {
    match language {
        Language::PythonicIndent => &PYTHON_MEMBERSHIP,
        Language::BraceBased => &SCRIPT_MEMBERSHIP,
        Language::JvmLike => &JVM_MEMBERSHIP,
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct RuleBased;

impl RuleBased {
    pub fn new() -> Self {
        Self
    }

    /// Hotspots in discovery order: per loop header (nested, then
    /// accumulation), then membership tests by line
    pub fn detect(&self, source: &str, language: Language) -> Vec<Hotspot> {
        let analyzer = analyzer_for(language);
        let raw_lines: Vec<&str> = source.lines().collect();
        let lines: Vec<&str> = raw_lines
            .iter()
            .map(|line| analyzer.strip_line_comment(line))
            .collect();

        let loops = loop_pattern(language);
        let loop_lines: Vec<usize> = lines
            .iter()
            .enumerate()
            .filter(|(_, line)| loops.is_match(line))
            .map(|(idx, _)| idx)
            .collect();

        let span = |start: usize, end: usize| {
            CodeRange::lines(start as u32, end as u32, raw_lines[end].chars().count() as u32)
        };

        let mut hotspots = Vec::new();
        let mut concat_lines = BTreeSet::new();

        for (pos, &line) in loop_lines.iter().enumerate() {
            if let Some(&inner) = loop_lines
                .get(pos + 1)
                .filter(|&&next| next - line <= NESTED_LOOP_DISTANCE)
            {
                hotspots.push(NESTED_LOOPS.hotspot(span(line, inner)));
            }

            let window_end = (line + CONCAT_LOOKAHEAD).min(lines.len().saturating_sub(1));
            let accumulation = (line + 1..=window_end)
                .find(|&idx| STRING_ACCUMULATION.is_match(lines[idx]));
            if let Some(idx) = accumulation {
                if concat_lines.insert(idx) {
                    hotspots.push(STRING_CONCAT_IN_LOOP.hotspot(span(line, idx)));
                }
            }
        }

        let membership = membership_pattern(language);
        for (idx, line) in lines.iter().enumerate() {
            if membership.is_match(line) {
                hotspots.push(LIST_MEMBERSHIP_SCAN.hotspot(span(idx, idx)));
            }
        }

        debug!(
            language = %language,
            loops = loop_lines.len(),
            hotspots = hotspots.len(),
            "rule-based scan"
        );
        hotspots
    }
}

impl ScoringStrategy for RuleBased {
    fn version(&self) -> &'static str {
        RULE_BASED_VERSION
    }

    fn score(&self, input: ScoreInput<'_>) -> Result<ScoreOutcome> {
        let ScoreInput::Source { source, language } = input else {
            return Err(EnergyError::config(
                "rule-based scoring needs source text and a language",
            ));
        };

        let hotspots = self.detect(source, language);
        let file_score = hotspots.iter().map(|h| h.score).fold(0.0, f64::max);

        Ok(ScoreOutcome {
            file_score,
            estimated_mj: None,
            hotspots,
        })
    }
}

//! Indentation-family analyzer

use super::patterns::{
    capture_names, count, HASH_COMMENT, INDENT_LOOP_HEADER, PYTHON_DEF, PYTHON_DEF_NAME,
};
use crate::features::static_analysis::domain::{loop_run_depth, LanguageAnalyzer};
use crate::shared::models::Language;

/// Analyzer for `#`-commented, indentation-delimited sources
#[derive(Debug, Clone, Copy, Default)]
pub struct PythonicAnalyzer;

impl LanguageAnalyzer for PythonicAnalyzer {
    fn language(&self) -> Language {
        Language::PythonicIndent
    }

    fn strip_comments(&self, source: &str) -> String {
        HASH_COMMENT.replace_all(source, "").into_owned()
    }

    fn strip_line_comment<'a>(&self, line: &'a str) -> &'a str {
        match line.find('#') {
            Some(pos) => &line[..pos],
            None => line,
        }
    }

    fn nesting_depth(&self, lines: &[&str]) -> usize {
        loop_run_depth(lines, |line| INDENT_LOOP_HEADER.is_match(line))
    }

    fn count_functions(&self, code: &str) -> usize {
        count(&PYTHON_DEF, code)
    }

    fn is_function_definition(&self, line: &str) -> bool {
        PYTHON_DEF.is_match(line)
    }

    fn recursion_candidates(&self, code: &str) -> Vec<String> {
        capture_names(&PYTHON_DEF_NAME, code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_hash_comments() {
        let a = PythonicAnalyzer;
        assert_eq!(a.strip_comments("x = 1  # set x\n# all\ny = 2"), "x = 1  \n\ny = 2");
        assert_eq!(a.strip_line_comment("for i in r:  # loop"), "for i in r:  ");
    }

    #[test]
    fn test_nesting_uses_blank_lines() {
        let a = PythonicAnalyzer;
        let lines = vec![
            "for i in range(n):",
            "    for j in range(n):",
            "        while k:",
            "            k -= 1",
            "",
            "",
            "for z in w:",
        ];
        assert_eq!(a.nesting_depth(&lines), 3);
    }

    #[test]
    fn test_counts_defs() {
        let a = PythonicAnalyzer;
        let code = "def f(x):\n    return x\n\nclass A:\n    def g(self):\n        pass\n";
        assert_eq!(a.count_functions(code), 2);
        assert!(a.is_function_definition("    def g(self):"));
        assert!(!a.is_function_definition("    g(self)"));
        assert_eq!(a.recursion_candidates(code), vec!["f", "g"]);
    }
}

//! Source location types
//!
//! Positions are 0-based (line, character), the editor convention used on the
//! scoring wire format.

use serde::{Deserialize, Serialize};

/// Single location in source code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    pub line: u32,
    pub character: u32,
}

impl Position {
    pub fn new(line: u32, character: u32) -> Self {
        Self { line, character }
    }
}

/// Half-open range of source text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CodeRange {
    pub start: Position,
    pub end: Position,
}

impl CodeRange {
    pub fn new(start: Position, end: Position) -> Self {
        Self { start, end }
    }

    /// Range covering whole lines `start_line..=end_line`
    pub fn lines(start_line: u32, end_line: u32, end_character: u32) -> Self {
        Self::new(
            Position::new(start_line, 0),
            Position::new(end_line, end_character),
        )
    }

    pub fn contains_line(&self, line: u32) -> bool {
        self.start.line <= line && line <= self.end.line
    }

    pub fn line_count(&self) -> u32 {
        if self.end.line >= self.start.line {
            self.end.line - self.start.line + 1
        } else {
            0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_range() {
        let r = CodeRange::lines(3, 8, 12);
        assert_eq!(r.start, Position::new(3, 0));
        assert_eq!(r.end, Position::new(8, 12));
        assert!(r.contains_line(5));
        assert!(!r.contains_line(9));
        assert_eq!(r.line_count(), 6);
    }
}

//! Infrastructure layer for static analysis

pub mod brace;
pub mod extractor;
pub mod patterns;
pub mod pythonic;

pub use brace::BraceAnalyzer;
pub use extractor::{analyzer_for, StaticAnalyzer};
pub use pythonic::PythonicAnalyzer;

//! Static Analysis
//!
//! Line/regex based feature extraction for one source sample:
//! - Comment stripping per syntax family
//! - Loop, nesting, concatenation, membership and allocation counters
//! - Function count and average length
//! - Recursion and repeated-construction heuristics
//! - Hotspot seed ranges (one per loop header)
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │ Domain Layer                            │
//! │  - LanguageAnalyzer (per-family trait)  │
//! │  - brace_depth / loop_run_depth         │
//! └─────────────────────────────────────────┘
//!                   ▲
//!                   │
//! ┌─────────────────────────────────────────┐
//! │ Infrastructure Layer                    │
//! │  - PythonicAnalyzer, BraceAnalyzer      │
//! │  - StaticAnalyzer (extraction pipeline) │
//! └─────────────────────────────────────────┘
//! ```
//!
//! This is deliberately not a parser. Comment-like text inside string
//! literals is stripped along with real comments.
//!
//! # Example
//!
//! ```rust
//! use codeenergy_core::features::static_analysis::StaticAnalyzer;
//!
//! let fv = StaticAnalyzer::new()
//!     .analyze("for x in xs:\n    for y in ys:\n        pass\n", "python")
//!     .unwrap();
//! assert_eq!(fv.nested_loop_depth, 2);
//! ```

pub mod domain;
pub mod infrastructure;

pub use domain::LanguageAnalyzer;
pub use infrastructure::{analyzer_for, StaticAnalyzer};

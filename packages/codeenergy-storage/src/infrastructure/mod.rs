//! Infrastructure layer - Storage adapters
//!
//! JSON-lines file adapter for the run log.

#[cfg(feature = "jsonl")]
pub mod jsonl;

#[cfg(feature = "jsonl")]
pub use jsonl::JsonlRecordLog;

//! Run log storage for the code energy profiler
//!
//! Benchmark configurations are persisted as an append-only, line-oriented
//! log (one JSON document per line). The aggregation stage reads the log back
//! in full; a malformed line aborts the read.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use codeenergy_storage::{JsonlRecordLog, RecordLog};
//!
//! let mut log = JsonlRecordLog::<RunRecord>::open("dataset.jsonl");
//! log.append(&record)?;
//! let records = log.load_all()?;
//! ```

pub mod domain;
pub mod error;

#[cfg(feature = "jsonl")]
pub mod infrastructure;

pub use error::{ErrorKind, Result, StorageError};

pub use domain::{InMemoryRecordLog, RecordLog};

#[cfg(feature = "jsonl")]
pub use infrastructure::JsonlRecordLog;

//! Domain layer for the run log
//!
//! The run log is append-only: one record per benchmark configuration,
//! written as soon as the configuration finishes. Readers get the records
//! back in append order.
//!
//! # Port Trait
//!
//! - `RecordLog`: append + load abstraction, generic over the record type
//!
//! Loading is all-or-nothing. A single undecodable line fails the whole load,
//! because downstream complexity inference over a partial sample set would be
//! misleading.
//!
//! # Examples
//!
//! ```rust
//! use codeenergy_storage::domain::{InMemoryRecordLog, RecordLog};
//!
//! let mut log = InMemoryRecordLog::<u32>::default();
//! log.append(&1).unwrap();
//! log.append(&2).unwrap();
//! assert_eq!(log.load_all().unwrap(), vec![1, 2]);
//! ```

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::Result;

/// Append-only record log
pub trait RecordLog<T>
where
    T: Serialize + DeserializeOwned,
{
    /// Append one record to the end of the log
    fn append(&mut self, record: &T) -> Result<()>;

    /// Load every record in append order
    ///
    /// # Errors
    ///
    /// Fails with `ErrorKind::MalformedRecord` on the first line that does not
    /// decode; no partial result is returned.
    fn load_all(&self) -> Result<Vec<T>>;

    /// Number of records currently in the log
    fn len(&self) -> Result<usize> {
        Ok(self.load_all()?.len())
    }

    fn is_empty(&self) -> Result<bool> {
        Ok(self.len()? == 0)
    }
}

/// Log kept in memory as encoded lines
///
/// Records go through the same JSON encoding as the file-backed log so that
/// encoding problems show up in tests that use it.
#[derive(Debug, Clone)]
pub struct InMemoryRecordLog<T> {
    lines: Vec<String>,
    _marker: std::marker::PhantomData<T>,
}

impl<T> Default for InMemoryRecordLog<T> {
    fn default() -> Self {
        Self::from_lines(Vec::new())
    }
}

impl<T> InMemoryRecordLog<T> {
    /// Build a log from raw lines (used to exercise decoding failures)
    pub fn from_lines(lines: Vec<String>) -> Self {
        Self {
            lines,
            _marker: std::marker::PhantomData,
        }
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }
}

impl<T> RecordLog<T> for InMemoryRecordLog<T>
where
    T: Serialize + DeserializeOwned,
{
    fn append(&mut self, record: &T) -> Result<()> {
        self.lines.push(serde_json::to_string(record)?);
        Ok(())
    }

    fn load_all(&self) -> Result<Vec<T>> {
        decode_lines(self.lines.iter().map(String::as_str))
    }
}

/// Decode JSON lines, skipping blank ones
///
/// Line numbers in errors are 1-based and count blank lines.
pub fn decode_lines<'a, T, I>(lines: I) -> Result<Vec<T>>
where
    T: DeserializeOwned,
    I: IntoIterator<Item = &'a str>,
{
    let mut records = Vec::new();
    for (idx, line) in lines.into_iter().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let record = serde_json::from_str(line)
            .map_err(|e| crate::StorageError::malformed_record(idx + 1, e))?;
        records.push(record);
    }
    Ok(records)
}

//! JSON-lines file adapter for `RecordLog`
//!
//! One compact JSON document per line, appended with a trailing newline.
//! The file is opened per call, so no handle outlives an append or a load.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use crate::domain::{decode_lines, RecordLog};
use crate::Result;

/// File-backed append-only log
#[derive(Debug, Clone)]
pub struct JsonlRecordLog<T> {
    path: PathBuf,
    _marker: PhantomData<T>,
}

impl<T> JsonlRecordLog<T> {
    /// Open a log at `path`; the file is created on first append
    pub fn open(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            _marker: PhantomData,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl<T> RecordLog<T> for JsonlRecordLog<T>
where
    T: Serialize + DeserializeOwned,
{
    fn append(&mut self, record: &T) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let mut line = serde_json::to_string(record)?;
        line.push('\n');

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        file.write_all(line.as_bytes())?;

        debug!(path = %self.path.display(), bytes = line.len(), "appended record");
        Ok(())
    }

    fn load_all(&self) -> Result<Vec<T>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let content = fs::read_to_string(&self.path)?;
        decode_lines(content.lines())
    }
}

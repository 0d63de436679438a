//! Host metadata attached to every persisted record

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sysinfo::System;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollectionMetadata {
    pub timestamp: DateTime<Utc>,
    pub hostname: String,
    pub os: String,
    pub cpu: String,
}

impl CollectionMetadata {
    /// Snapshot of the current host
    pub fn capture() -> Self {
        let mut system = System::new();
        system.refresh_cpu();
        let cpu = system
            .cpus()
            .first()
            .map(|cpu| cpu.brand().trim().to_string())
            .unwrap_or_default();

        Self {
            timestamp: Utc::now(),
            hostname: System::host_name().unwrap_or_default(),
            os: System::long_os_version().unwrap_or_else(|| std::env::consts::OS.to_string()),
            cpu,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capture_serializes_timestamp_as_rfc3339() {
        let meta = CollectionMetadata::capture();
        assert!(!meta.os.is_empty());

        let json = serde_json::to_value(&meta).unwrap();
        let ts = json["timestamp"].as_str().unwrap();
        assert!(DateTime::parse_from_rfc3339(ts).is_ok());
    }
}

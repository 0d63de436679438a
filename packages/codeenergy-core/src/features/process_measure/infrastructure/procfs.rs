//! `/proc` based sampler (Linux)

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::features::process_measure::domain::{ResourceSample, ResourceSampler, SampleError};

/// USER_HZ, the unit of utime/stime in `/proc/<pid>/stat`
///
/// The kernel exports times in USER_HZ regardless of its internal tick rate,
/// and USER_HZ is 100 on x86, arm and riscv. Other targets can override it
/// with `ProcfsSampler::with_clock_ticks`.
pub const USER_HZ: u32 = 100;

/// Reads `/proc/<pid>/status` and `/proc/<pid>/stat`
#[derive(Debug, Clone)]
pub struct ProcfsSampler {
    root: PathBuf,
    clock_ticks: u32,
}

impl Default for ProcfsSampler {
    fn default() -> Self {
        Self::with_root("/proc")
    }
}

impl ProcfsSampler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sampler over an alternative proc root (tests)
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            clock_ticks: USER_HZ,
        }
    }

    /// Ticks per second used to convert stat times; zero keeps the default
    pub fn with_clock_ticks(mut self, ticks_per_sec: u32) -> Self {
        if ticks_per_sec > 0 {
            self.clock_ticks = ticks_per_sec;
        }
        self
    }

    pub fn clock_ticks(&self) -> u32 {
        self.clock_ticks
    }

    /// Whether this host exposes procfs
    pub fn is_supported() -> bool {
        Path::new("/proc/self/stat").exists()
    }

    fn read(&self, pid: u32, file: &str) -> Result<String, SampleError> {
        let path = self.root.join(pid.to_string()).join(file);
        fs::read_to_string(&path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => SampleError::Gone(pid),
            _ => SampleError::Failed {
                pid,
                message: format!("{}: {}", path.display(), e),
            },
        })
    }
}

impl ResourceSampler for ProcfsSampler {
    fn name(&self) -> &'static str {
        "procfs"
    }

    fn begin(&mut self, _pid: u32) {}

    fn sample(&mut self, pid: u32) -> Result<ResourceSample, SampleError> {
        let status = self.read(pid, "status")?;
        let stat = self.read(pid, "stat")?;

        Ok(ResourceSample {
            rss_bytes: status_kb(&status, "VmRSS:").map(|kb| kb * 1024),
            peak_rss_bytes: status_kb(&status, "VmHWM:").map(|kb| kb * 1024),
            cpu_time_s: stat_cpu_seconds(&stat, self.clock_ticks),
        })
    }
}

/// Value of a `Key:   1234 kB` line
///
/// Zombies no longer report memory lines, so absence is not an error.
pub fn status_kb(status: &str, key: &str) -> Option<u64> {
    status
        .lines()
        .find(|line| line.starts_with(key))
        .and_then(|line| line.split_whitespace().nth(1))
        .and_then(|value| value.parse::<u64>().ok())
}

/// utime + stime from a `/proc/<pid>/stat` line, in seconds
///
/// Fields are counted after the closing parenthesis of the command name,
/// which may itself contain spaces.
pub fn stat_cpu_seconds(stat: &str, ticks_per_sec: u32) -> Option<f64> {
    let rest = &stat[stat.rfind(')')? + 1..];
    let fields: Vec<&str> = rest.split_whitespace().collect();
    // fields[0] is the state (field 3); utime/stime are fields 14/15
    let utime = fields.get(11)?.parse::<u64>().ok()?;
    let stime = fields.get(12)?.parse::<u64>().ok()?;
    Some((utime + stime) as f64 / f64::from(ticks_per_sec.max(1)))
}

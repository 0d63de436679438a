//! Portable sampler backed by `sysinfo`
//!
//! `sysinfo` reports cpu usage as a percentage since the previous refresh,
//! so cumulative cpu time is integrated over the wall time between samples.

use std::time::Instant;

use sysinfo::{Pid, System};

use crate::features::process_measure::domain::{ResourceSample, ResourceSampler, SampleError};

pub struct SysinfoSampler {
    system: System,
    cpu_time_s: f64,
    last_sample: Option<Instant>,
}

impl Default for SysinfoSampler {
    fn default() -> Self {
        Self::new()
    }
}

impl SysinfoSampler {
    pub fn new() -> Self {
        Self {
            system: System::new(),
            cpu_time_s: 0.0,
            last_sample: None,
        }
    }
}

impl ResourceSampler for SysinfoSampler {
    fn name(&self) -> &'static str {
        "sysinfo"
    }

    fn begin(&mut self, _pid: u32) {
        self.cpu_time_s = 0.0;
        self.last_sample = None;
    }

    fn sample(&mut self, pid: u32) -> Result<ResourceSample, SampleError> {
        let sys_pid = Pid::from_u32(pid);
        if !self.system.refresh_process(sys_pid) {
            return Err(SampleError::Gone(pid));
        }
        let process = self.system.process(sys_pid).ok_or(SampleError::Gone(pid))?;

        let now = Instant::now();
        if let Some(previous) = self.last_sample {
            let elapsed = now.duration_since(previous).as_secs_f64();
            self.cpu_time_s += f64::from(process.cpu_usage()) / 100.0 * elapsed;
        }
        self.last_sample = Some(now);

        Ok(ResourceSample {
            rss_bytes: Some(process.memory()),
            peak_rss_bytes: None,
            cpu_time_s: Some(self.cpu_time_s),
        })
    }
}

//! Infrastructure layer for process measurement
//!
//! Platform backends for the sampler and energy meter ports, and the
//! selection of the best one available on this host.

pub mod procfs;
#[cfg(feature = "rapl")]
pub mod rapl;
pub mod sysinfo_sampler;

pub use procfs::ProcfsSampler;
#[cfg(feature = "rapl")]
pub use rapl::RaplMeter;
pub use sysinfo_sampler::SysinfoSampler;

use super::domain::{EnergyMeter, ResourceSampler};

/// procfs where available, `sysinfo` elsewhere
pub fn default_sampler() -> Box<dyn ResourceSampler> {
    if ProcfsSampler::is_supported() {
        Box::new(ProcfsSampler::new())
    } else {
        Box::new(SysinfoSampler::new())
    }
}

/// Energy meter for this host, if any
pub fn detect_energy_meter() -> Option<Box<dyn EnergyMeter>> {
    #[cfg(feature = "rapl")]
    {
        if let Some(meter) = RaplMeter::detect() {
            return Some(Box::new(meter));
        }
    }
    None
}

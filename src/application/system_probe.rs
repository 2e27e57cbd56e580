// Probe trait for host statistics
use crate::domain::stats::{CpuStats, DiskStats, MemoryStats, NetworkStats};

/// Blocking samplers; callers run them off the async runtime.
pub trait SystemProbe: Send + Sync {
    fn cpu(&self) -> CpuStats;

    fn memory(&self) -> MemoryStats;

    fn disks(&self) -> Vec<DiskStats>;

    /// Per-interface rates since the previous call.
    fn networks(&self) -> Vec<NetworkStats>;

    /// Seconds since boot.
    fn uptime(&self) -> u64;
}

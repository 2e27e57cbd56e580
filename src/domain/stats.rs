// Host statistics snapshot served to stats widgets
use serde::Serialize;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SystemStats {
    pub cpu: Option<CpuStats>,
    pub memory: Option<MemoryStats>,
    pub disk: Option<Vec<DiskStats>>,
    pub network: Option<Vec<NetworkStats>>,
    /// Seconds since boot.
    pub uptime: Option<u64>,
    /// Milliseconds since the epoch of the last cpu/network refresh.
    pub timestamp: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CpuStats {
    pub current_load: f32,
    pub cpus: Vec<f32>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MemoryStats {
    pub total: u64,
    pub used: u64,
    pub free: u64,
    /// Memory in use by processes, excluding reclaimable cache.
    pub active: u64,
    pub available: u64,
}

impl MemoryStats {
    pub fn new(total: u64, used: u64, free: u64, available: u64) -> Self {
        Self {
            total,
            used,
            free,
            active: total.saturating_sub(available),
            available,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DiskStats {
    pub fs: String,
    pub mount: String,
    pub size: u64,
    pub used: u64,
    pub available: u64,
    #[serde(rename = "use")]
    pub use_percent: f64,
}

impl DiskStats {
    pub fn new(fs: String, mount: String, size: u64, available: u64) -> Self {
        let used = size.saturating_sub(available);
        let use_percent = if size > 0 {
            used as f64 / size as f64 * 100.0
        } else {
            0.0
        };
        Self {
            fs,
            mount,
            size,
            used,
            available,
            use_percent,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NetworkStats {
    pub iface: String,
    pub rx_sec: f64,
    pub tx_sec: f64,
    pub rx_bytes: u64,
    pub tx_bytes: u64,
}

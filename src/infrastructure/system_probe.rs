// sysinfo-backed host probe
use crate::application::system_probe::SystemProbe;
use crate::domain::stats::{CpuStats, DiskStats, MemoryStats, NetworkStats};
use std::sync::{Mutex, MutexGuard};
use std::time::Instant;
use sysinfo::{Disks, Networks, System};

pub struct SysinfoProbe {
    system: Mutex<System>,
    networks: Mutex<NetworkSampler>,
}

struct NetworkSampler {
    networks: Networks,
    sampled_at: Instant,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    match mutex.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}

impl SysinfoProbe {
    pub fn new() -> Self {
        let mut system = System::new();
        // Usage is a delta; prime it so the first real sample is meaningful.
        system.refresh_cpu_usage();
        Self {
            system: Mutex::new(system),
            networks: Mutex::new(NetworkSampler {
                networks: Networks::new_with_refreshed_list(),
                sampled_at: Instant::now(),
            }),
        }
    }
}

impl Default for SysinfoProbe {
    fn default() -> Self {
        Self::new()
    }
}

impl SystemProbe for SysinfoProbe {
    fn cpu(&self) -> CpuStats {
        let mut system = lock(&self.system);
        system.refresh_cpu_usage();
        CpuStats {
            current_load: system.global_cpu_usage(),
            cpus: system.cpus().iter().map(|cpu| cpu.cpu_usage()).collect(),
        }
    }

    fn memory(&self) -> MemoryStats {
        let mut system = lock(&self.system);
        system.refresh_memory();
        MemoryStats::new(
            system.total_memory(),
            system.used_memory(),
            system.free_memory(),
            system.available_memory(),
        )
    }

    fn disks(&self) -> Vec<DiskStats> {
        Disks::new_with_refreshed_list()
            .iter()
            .map(|disk| {
                DiskStats::new(
                    disk.name().to_string_lossy().into_owned(),
                    disk.mount_point().to_string_lossy().into_owned(),
                    disk.total_space(),
                    disk.available_space(),
                )
            })
            .collect()
    }

    fn networks(&self) -> Vec<NetworkStats> {
        let mut sampler = lock(&self.networks);
        sampler.networks.refresh(true);
        let elapsed = sampler.sampled_at.elapsed().as_secs_f64();
        sampler.sampled_at = Instant::now();

        let rate = |bytes: u64| if elapsed > 0.0 { bytes as f64 / elapsed } else { 0.0 };
        let mut stats: Vec<NetworkStats> = sampler
            .networks
            .iter()
            .map(|(name, data)| NetworkStats {
                iface: name.clone(),
                rx_sec: rate(data.received()),
                tx_sec: rate(data.transmitted()),
                rx_bytes: data.total_received(),
                tx_bytes: data.total_transmitted(),
            })
            .collect();
        stats.sort_by(|a, b| a.iface.cmp(&b.iface));
        stats
    }

    fn uptime(&self) -> u64 {
        System::uptime()
    }
}

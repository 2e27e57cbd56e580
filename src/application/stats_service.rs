// Stats service - cached host statistics refreshed on tiered timers
use crate::application::system_probe::SystemProbe;
use crate::domain::stats::{CpuStats, DiskStats, MemoryStats, NetworkStats, SystemStats};
use futures::Stream;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::{RwLock, broadcast, watch};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

const CHANNEL_CAPACITY: usize = 16;

/// Metric classes, each refreshed on its own timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tier {
    CpuNetwork,
    Memory,
    Disk,
    Uptime,
}

impl Tier {
    pub const ALL: [Tier; 4] = [Tier::CpuNetwork, Tier::Memory, Tier::Disk, Tier::Uptime];

    pub fn period(&self) -> Duration {
        match self {
            Tier::CpuNetwork => Duration::from_secs(2),
            Tier::Memory => Duration::from_secs(5),
            Tier::Disk => Duration::from_secs(30),
            Tier::Uptime => Duration::from_secs(60),
        }
    }

    fn sample(self, probe: &dyn SystemProbe) -> Sample {
        match self {
            Tier::CpuNetwork => Sample::CpuNetwork(probe.cpu(), probe.networks()),
            Tier::Memory => Sample::Memory(probe.memory()),
            Tier::Disk => Sample::Disk(probe.disks()),
            Tier::Uptime => Sample::Uptime(probe.uptime()),
        }
    }
}

enum Sample {
    CpuNetwork(CpuStats, Vec<NetworkStats>),
    Memory(MemoryStats),
    Disk(Vec<DiskStats>),
    Uptime(u64),
}

impl Sample {
    fn apply(self, stats: &mut SystemStats) {
        match self {
            Sample::CpuNetwork(cpu, network) => {
                stats.cpu = Some(cpu);
                stats.network = Some(network);
                stats.timestamp = Some(chrono::Utc::now().timestamp_millis());
            }
            Sample::Memory(memory) => stats.memory = Some(memory),
            Sample::Disk(disk) => stats.disk = Some(disk),
            Sample::Uptime(uptime) => stats.uptime = Some(uptime),
        }
    }
}

#[derive(Clone)]
pub struct StatsService {
    inner: Arc<Inner>,
}

struct Inner {
    probe: Arc<dyn SystemProbe>,
    stats: RwLock<SystemStats>,
    tx: broadcast::Sender<SystemStats>,
    stopped: watch::Sender<bool>,
    tasks: Mutex<Vec<JoinHandle<()>>>,
    subscribers: AtomicUsize,
    max_subscribers: usize,
}

impl StatsService {
    pub fn new(probe: Arc<dyn SystemProbe>, max_subscribers: usize) -> Self {
        let (tx, _) = broadcast::channel(CHANNEL_CAPACITY);
        Self {
            inner: Arc::new(Inner {
                probe,
                stats: RwLock::new(SystemStats::default()),
                tx,
                stopped: watch::Sender::new(false),
                tasks: Mutex::new(Vec::new()),
                subscribers: AtomicUsize::new(0),
                max_subscribers,
            }),
        }
    }

    /// Take an initial sample of every tier, then keep each tier fresh.
    ///
    /// A tier's loop awaits its refresh before the next tick, and ticks missed
    /// while a slow refresh runs are skipped, so refreshes never overlap.
    pub async fn start(&self) {
        self.refresh_all().await;

        let mut tasks = match self.inner.tasks.lock() {
            Ok(tasks) => tasks,
            Err(poisoned) => poisoned.into_inner(),
        };
        for tier in Tier::ALL {
            let service = self.clone();
            tasks.push(tokio::spawn(async move {
                let mut ticker = tokio::time::interval(tier.period());
                ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
                // The first tick completes immediately; start() already sampled.
                ticker.tick().await;
                loop {
                    ticker.tick().await;
                    service.refresh(tier).await;
                }
            }));
        }
        tracing::info!("Stats service started ({} refresh tiers)", tasks.len());
    }

    /// Stop every refresh task and end all open subscriptions.
    pub fn shutdown(&self) {
        self.inner.stopped.send_replace(true);
        let mut tasks = match self.inner.tasks.lock() {
            Ok(tasks) => tasks,
            Err(poisoned) => poisoned.into_inner(),
        };
        for task in tasks.drain(..) {
            task.abort();
        }
        tracing::info!("Stats service stopped");
    }

    pub fn is_running(&self) -> bool {
        self.inner
            .tasks
            .lock()
            .map(|tasks| !tasks.is_empty())
            .unwrap_or(false)
    }

    pub async fn snapshot(&self) -> SystemStats {
        self.inner.stats.read().await.clone()
    }

    pub async fn refresh_all(&self) {
        for tier in Tier::ALL {
            self.refresh(tier).await;
        }
    }

    /// Sample one tier; cpu/network refreshes are broadcast to subscribers.
    pub async fn refresh(&self, tier: Tier) {
        let probe = self.inner.probe.clone();
        let sample = match tokio::task::spawn_blocking(move || tier.sample(probe.as_ref())).await {
            Ok(sample) => sample,
            Err(e) => {
                tracing::error!("Stats refresh ({:?}) failed: {}", tier, e);
                return;
            }
        };

        let snapshot = {
            let mut stats = self.inner.stats.write().await;
            sample.apply(&mut stats);
            stats.clone()
        };

        if tier == Tier::CpuNetwork {
            // No receivers is fine
            let _ = self.inner.tx.send(snapshot);
        }
    }

    /// Register a live subscriber, or `None` when the subscriber cap is reached.
    pub fn subscribe(&self) -> Option<StatsSubscription> {
        let max = self.inner.max_subscribers;
        self.inner
            .subscribers
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| (n < max).then_some(n + 1))
            .ok()?;

        Some(StatsSubscription {
            rx: self.inner.tx.subscribe(),
            stopped: self.inner.stopped.subscribe(),
            inner: self.inner.clone(),
        })
    }

    pub fn subscriber_count(&self) -> usize {
        self.inner.subscribers.load(Ordering::SeqCst)
    }
}

/// A live stats feed; releases its subscriber slot when dropped.
pub struct StatsSubscription {
    rx: broadcast::Receiver<SystemStats>,
    stopped: watch::Receiver<bool>,
    inner: Arc<Inner>,
}

impl StatsSubscription {
    /// Next broadcast snapshot, or `None` once the service shuts down.
    /// Lagging receivers skip ahead to the newest snapshot.
    pub async fn recv(&mut self) -> Option<SystemStats> {
        loop {
            tokio::select! {
                result = self.rx.recv() => match result {
                    Ok(stats) => return Some(stats),
                    Err(broadcast::error::RecvError::Lagged(skipped)) => {
                        tracing::debug!("Stats subscriber lagged by {} updates", skipped);
                    }
                    Err(broadcast::error::RecvError::Closed) => return None,
                },
                _ = self.stopped.wait_for(|stopped| *stopped) => return None,
            }
        }
    }

    pub fn into_stream(mut self) -> impl Stream<Item = SystemStats> + Send + 'static {
        async_stream::stream! {
            while let Some(stats) = self.recv().await {
                yield stats;
            }
        }
    }
}

impl Drop for StatsSubscription {
    fn drop(&mut self) {
        self.inner.subscribers.fetch_sub(1, Ordering::SeqCst);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct FakeProbe {
        cpu_calls: AtomicUsize,
    }

    impl SystemProbe for FakeProbe {
        fn cpu(&self) -> CpuStats {
            let n = self.cpu_calls.fetch_add(1, Ordering::SeqCst) + 1;
            CpuStats {
                current_load: n as f32,
                cpus: vec![n as f32],
            }
        }

        fn memory(&self) -> MemoryStats {
            MemoryStats::new(16, 4, 12, 12)
        }

        fn disks(&self) -> Vec<DiskStats> {
            vec![DiskStats::new("sda1".into(), "/".into(), 100, 40)]
        }

        fn networks(&self) -> Vec<NetworkStats> {
            vec![NetworkStats {
                iface: "eth0".into(),
                rx_sec: 1.0,
                tx_sec: 2.0,
                rx_bytes: 10,
                tx_bytes: 20,
            }]
        }

        fn uptime(&self) -> u64 {
            3600
        }
    }

    fn service(max_subscribers: usize) -> StatsService {
        StatsService::new(Arc::new(FakeProbe::default()), max_subscribers)
    }

    #[tokio::test]
    async fn test_refresh_all_fills_snapshot() {
        let service = service(10);
        assert_eq!(service.snapshot().await, SystemStats::default());

        service.refresh_all().await;
        let stats = service.snapshot().await;
        assert_eq!(stats.cpu.unwrap().current_load, 1.0);
        assert_eq!(stats.memory.unwrap().total, 16);
        assert_eq!(stats.disk.unwrap()[0].used, 60);
        assert_eq!(stats.network.unwrap()[0].iface, "eth0");
        assert_eq!(stats.uptime, Some(3600));
        assert!(stats.timestamp.is_some());
    }

    #[tokio::test]
    async fn test_only_cpu_tier_broadcasts() {
        let service = service(10);
        let mut subscription = service.subscribe().unwrap();

        service.refresh(Tier::Memory).await;
        service.refresh(Tier::CpuNetwork).await;

        let stats = subscription.recv().await.unwrap();
        assert_eq!(stats.cpu.unwrap().current_load, 1.0);
        assert!(stats.memory.is_some());
    }

    #[tokio::test]
    async fn test_subscriber_cap() {
        let service = service(1);
        let first = service.subscribe();
        assert!(first.is_some());
        assert!(service.subscribe().is_none());
        assert_eq!(service.subscriber_count(), 1);

        drop(first);
        assert_eq!(service.subscriber_count(), 0);
        assert!(service.subscribe().is_some());
    }

    #[tokio::test]
    async fn test_start_and_shutdown() {
        let service = service(10);
        service.start().await;
        assert!(service.is_running());
        assert!(service.snapshot().await.uptime.is_some());

        service.shutdown();
        assert!(!service.is_running());
    }

    #[tokio::test]
    async fn test_subscription_stream() {
        use futures::StreamExt;

        let service = service(10);
        let stream = service.subscribe().unwrap().into_stream();
        tokio::pin!(stream);

        service.refresh(Tier::CpuNetwork).await;
        service.refresh(Tier::CpuNetwork).await;
        let first = stream.next().await.unwrap();
        let second = stream.next().await.unwrap();
        assert_eq!(first.cpu.unwrap().current_load, 1.0);
        assert_eq!(second.cpu.unwrap().current_load, 2.0);

        service.shutdown();
        assert!(stream.next().await.is_none());
    }

    #[tokio::test]
    async fn test_shutdown_ends_subscriptions() {
        let service = service(10);
        let mut subscription = service.subscribe().unwrap();
        service.shutdown();
        assert!(subscription.recv().await.is_none());
    }

    #[test]
    fn test_tier_periods() {
        let periods: Vec<u64> = Tier::ALL.iter().map(|t| t.period().as_secs()).collect();
        assert_eq!(periods, vec![2, 5, 30, 60]);
    }
}

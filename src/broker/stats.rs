use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};

/// Process-wide delivery counters.
///
/// Incremented only by broker operations. Each counter is independent and
/// monotonically non-decreasing for the life of the process, so relaxed
/// atomics are enough; no counter update is ever lost or partially visible.
#[derive(Debug, Default)]
pub struct Stats {
    rx_bytes: AtomicU64,
    tx_bytes: AtomicU64,
    pub_fails: AtomicU64,
    sub_fails: AtomicU64,
}

impl Stats {
    /// Records an accepted publish of `bytes` payload bytes.
    pub fn record_publish(&self, bytes: usize) {
        self.tx_bytes.fetch_add(bytes as u64, Ordering::Relaxed);
    }

    /// Records a rejected publish attempt.
    pub fn record_publish_failure(&self) {
        self.pub_fails.fetch_add(1, Ordering::Relaxed);
    }

    /// Records a successful consume of `bytes` payload bytes.
    pub fn record_consume(&self, bytes: usize) {
        self.rx_bytes.fetch_add(bytes as u64, Ordering::Relaxed);
    }

    /// Records a consume attempt that found nothing queued.
    pub fn record_consume_failure(&self) {
        self.sub_fails.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            rx_bytes: self.rx_bytes.load(Ordering::Relaxed),
            tx_bytes: self.tx_bytes.load(Ordering::Relaxed),
            pub_fails: self.pub_fails.load(Ordering::Relaxed),
            sub_fails: self.sub_fails.load(Ordering::Relaxed),
        }
    }
}

/// Point-in-time view of the counters, serialized as-is on `GET /stats`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct StatsSnapshot {
    pub rx_bytes: u64,
    pub tx_bytes: u64,
    pub pub_fails: u64,
    pub sub_fails: u64,
}

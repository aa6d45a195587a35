//! Poller
//!
//! Repeats sync runs at a fixed interval until shutdown. Runs are awaited
//! inline, so two runs never overlap; ticks missed while a run was in
//! progress are skipped rather than bunched up.

use std::sync::Arc;
use std::time::Duration;

use tokio::time::MissedTickBehavior;
use tracing::info;

use super::sync::SyncService;
use crate::shared::ShutdownSignal;

/// Counters for a finished polling session
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PollStats {
    pub runs: u64,
    pub failures: u64,
}

pub struct Poller {
    service: Arc<SyncService>,
    interval: Duration,
}

impl Poller {
    pub fn new(service: Arc<SyncService>, interval: Duration) -> Self {
        Self { service, interval }
    }

    pub async fn run(&self, shutdown: ShutdownSignal) -> PollStats {
        let mut stats = PollStats::default();
        let mut ticker = tokio::time::interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        info!("Depot poller started (interval: {}s)", self.interval.as_secs());

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    stats.runs += 1;
                    if !self.service.run().await {
                        stats.failures += 1;
                    }
                    if shutdown.is_triggered() {
                        break;
                    }
                }
                _ = shutdown.wait() => break,
            }
        }

        info!(
            "Depot poller stopped after {} runs ({} failed)",
            stats.runs, stats.failures
        );
        stats
    }
}

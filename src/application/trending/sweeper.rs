//! Retention sweep over trending aggregates.
//!
//! A full scan: every hashtag with an entry has its contributions older
//! than the retention window dropped, and entries left empty are deleted.
//! Runs never overlap. A tick that fires while a run is still in progress is
//! skipped, not queued.

use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::sync::mpsc;
use tokio::task::{JoinHandle, JoinSet};
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};

use crate::port::{Clock, TrendingStore};

/// Sweeper lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SweeperState {
    Idle,
    Running,
}

/// Counters from one completed sweep.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SweepReport {
    /// Hashtags examined.
    pub scanned: usize,
    /// Contributions dropped across all entries.
    pub evicted: usize,
    /// Entries deleted because they became empty.
    pub removed_entries: usize,
    /// Entries whose update failed; they are retried next run.
    pub failed: usize,
}

/// What happened when a sweep was requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SweepOutcome {
    Completed(SweepReport),
    /// Another run was in progress.
    Skipped,
}

/// Handle for stopping a started sweeper.
///
/// Dropping it leaves the sweeper running until the runtime shuts down.
#[must_use = "the sweeper can only be stopped through its handle"]
pub struct SweeperHandle {
    shutdown_tx: mpsc::Sender<()>,
    task: JoinHandle<()>,
}

impl SweeperHandle {
    /// Stop scheduling new runs and wait for any run in flight to finish.
    pub async fn shutdown(self) {
        let _ = self.shutdown_tx.send(()).await;
        if let Err(e) = self.task.await {
            warn!(error = %e, "Eviction sweeper task failed");
        }
    }
}

/// Evicts contributions older than the retention window.
pub struct EvictionSweeper {
    store: Arc<dyn TrendingStore>,
    clock: Arc<dyn Clock>,
    retention: chrono::Duration,
    interval: Duration,
    state: Mutex<SweeperState>,
}

/// Puts the sweeper back to `Idle` when a run ends, even by panic.
struct RunGuard<'a>(&'a Mutex<SweeperState>);

impl Drop for RunGuard<'_> {
    fn drop(&mut self) {
        *self.0.lock() = SweeperState::Idle;
    }
}

impl EvictionSweeper {
    pub fn new(
        store: Arc<dyn TrendingStore>,
        clock: Arc<dyn Clock>,
        retention: chrono::Duration,
        interval: Duration,
    ) -> Self {
        Self {
            store,
            clock,
            retention,
            interval,
            state: Mutex::new(SweeperState::Idle),
        }
    }

    #[must_use]
    pub fn state(&self) -> SweeperState {
        *self.state.lock()
    }

    fn try_begin(&self) -> Option<RunGuard<'_>> {
        let mut state = self.state.lock();
        if *state == SweeperState::Running {
            return None;
        }
        *state = SweeperState::Running;
        Some(RunGuard(&self.state))
    }

    /// Run one sweep now, unless one is already running.
    pub async fn run_once(&self) -> SweepOutcome {
        let Some(_guard) = self.try_begin() else {
            debug!("Sweep already running, skipping");
            return SweepOutcome::Skipped;
        };

        let cutoff = self.clock.now() - self.retention;
        let mut report = SweepReport::default();

        let hashtags = match self.store.hashtags().await {
            Ok(hashtags) => hashtags,
            Err(e) => {
                warn!(error = %e, "Sweep could not list hashtags");
                return SweepOutcome::Completed(report);
            }
        };

        for hashtag in hashtags {
            report.scanned += 1;
            match self.store.evict_before(&hashtag, cutoff).await {
                Ok(eviction) => {
                    report.evicted += eviction.evicted;
                    if eviction.deleted {
                        report.removed_entries += 1;
                    }
                }
                Err(e) => {
                    warn!(hashtag = %hashtag, error = %e, "Sweep failed for entry");
                    report.failed += 1;
                }
            }
        }

        info!(
            scanned = report.scanned,
            evicted = report.evicted,
            removed_entries = report.removed_entries,
            failed = report.failed,
            cutoff = %cutoff,
            "Sweep completed"
        );
        SweepOutcome::Completed(report)
    }

    /// Start sweeping on a fixed interval.
    ///
    /// The first run happens one interval after start. Each tick spawns its
    /// run, so a slow run makes the following ticks hit the `Running` state
    /// and skip.
    pub fn start(self: Arc<Self>) -> SweeperHandle {
        let (shutdown_tx, mut shutdown_rx) = mpsc::channel::<()>(1);
        let sweeper = self;

        let task = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(sweeper.interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
            ticker.tick().await;

            info!(
                interval_secs = sweeper.interval.as_secs(),
                retention_secs = sweeper.retention.num_seconds(),
                "Eviction sweeper started"
            );

            let mut runs = JoinSet::new();
            loop {
                tokio::select! {
                    Some(()) = shutdown_rx.recv() => {
                        info!("Eviction sweeper shutting down");
                        break;
                    }

                    _ = ticker.tick() => {
                        while runs.try_join_next().is_some() {}
                        let sweeper = Arc::clone(&sweeper);
                        runs.spawn(async move {
                            sweeper.run_once().await;
                        });
                    }
                }
            }

            while runs.join_next().await.is_some() {}
        });

        SweeperHandle { shutdown_tx, task }
    }
}

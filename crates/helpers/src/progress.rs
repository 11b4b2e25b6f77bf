//! Outcome of a bulk stop

use tracing::info;

/// Counters collected while stopping a set of scans.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StopAllReport {
    pub total: usize,
    pub stop_requested: usize,
    /// Stop requests that failed and were skipped over.
    pub stop_failed: usize,
    pub settled: usize,
}

impl StopAllReport {
    pub fn new(total: usize) -> Self {
        Self {
            total,
            ..Default::default()
        }
    }

    pub fn record_stop(&mut self, ok: bool) {
        if ok {
            self.stop_requested += 1;
        } else {
            self.stop_failed += 1;
        }
    }

    pub fn record_settled(&mut self) {
        self.settled += 1;
    }

    pub fn log_summary(&self) {
        info!("Stop summary:");
        info!("  Scans: {}", self.total);
        info!("  Stop requested: {}", self.stop_requested);
        info!("  Stop failed: {}", self.stop_failed);
        info!("  Settled: {}", self.settled);
    }
}

use serde::{Deserialize, Serialize};
use std::sync::Mutex;

/// Counters collected across a batch of ingested images.
pub struct MetricsRecorder {
    inner: Mutex<MetricsSnapshot>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricsSnapshot {
    pub images_processed: usize,
    pub images_skipped: usize,
    pub targets_located: usize,
    pub sink_errors: usize,
}

impl MetricsRecorder {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(MetricsSnapshot::default()),
        }
    }

    pub fn record_processed(&self, targets: usize) {
        if let Ok(mut metrics) = self.inner.lock() {
            metrics.images_processed += 1;
            metrics.targets_located += targets;
        }
    }

    pub fn record_skipped(&self) {
        if let Ok(mut metrics) = self.inner.lock() {
            metrics.images_skipped += 1;
        }
    }

    pub fn record_sink_error(&self) {
        if let Ok(mut metrics) = self.inner.lock() {
            metrics.sink_errors += 1;
        }
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        self.inner
            .lock()
            .map(|metrics| *metrics)
            .unwrap_or_default()
    }
}

impl Default for MetricsRecorder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recorder_accumulates_counts() {
        let recorder = MetricsRecorder::new();
        recorder.record_processed(3);
        recorder.record_processed(0);
        recorder.record_skipped();
        recorder.record_sink_error();

        let snapshot = recorder.snapshot();
        assert_eq!(snapshot.images_processed, 2);
        assert_eq!(snapshot.targets_located, 3);
        assert_eq!(snapshot.images_skipped, 1);
        assert_eq!(snapshot.sink_errors, 1);
    }
}

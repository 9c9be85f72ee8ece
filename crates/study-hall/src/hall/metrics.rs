//! Run counters for the study hall.
//!
//! Counters live in atomics so students can record without taking the
//! controller lock, and are mirrored to the `metrics` facade with the
//! `study_hall_` prefix:
//!
//! | Metric | Kind |
//! |--------|------|
//! | `study_hall_admissions_total` | counter |
//! | `study_hall_departures_total` | counter |
//! | `study_hall_releases_total{policy}` | counter (`single`, `batch`) |
//! | `study_hall_saturations_total` | counter |
//! | `study_hall_drains_total` | counter |
//! | `study_hall_queue_depth` | gauge |

use metrics::{counter, gauge};
use serde::Serialize;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::Arc;

/// Shared counters for one simulation run.
#[derive(Debug, Default)]
pub struct HallMetrics {
    admissions: AtomicU64,
    departures: AtomicU64,
    single_releases: AtomicU64,
    batch_releases: AtomicU64,
    batch_released_students: AtomicU64,
    saturations: AtomicU64,
    drains: AtomicU64,
    peak_queue_depth: AtomicUsize,
}

/// Point-in-time copy of [`HallMetrics`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct HallMetricsSnapshot {
    pub admissions: u64,
    pub departures: u64,
    pub single_releases: u64,
    pub batch_releases: u64,
    pub batch_released_students: u64,
    pub saturations: u64,
    pub drains: u64,
    pub peak_queue_depth: usize,
}

impl HallMetrics {
    #[must_use]
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn record_admission(&self) {
        self.admissions.fetch_add(1, Ordering::Relaxed);
        counter!("study_hall_admissions_total").increment(1);
    }

    pub fn record_departure(&self) {
        self.departures.fetch_add(1, Ordering::Relaxed);
        counter!("study_hall_departures_total").increment(1);
    }

    pub fn record_single_release(&self) {
        self.single_releases.fetch_add(1, Ordering::Relaxed);
        counter!("study_hall_releases_total", "policy" => "single").increment(1);
    }

    pub fn record_batch_release(&self, released: usize) {
        self.batch_releases.fetch_add(1, Ordering::Relaxed);
        self.batch_released_students
            .fetch_add(released as u64, Ordering::Relaxed);
        counter!("study_hall_releases_total", "policy" => "batch").increment(1);
    }

    /// The saturation latch was set.
    pub fn record_saturation(&self) {
        self.saturations.fetch_add(1, Ordering::Relaxed);
        counter!("study_hall_saturations_total").increment(1);
    }

    /// The saturation latch was cleared by a full drain.
    pub fn record_drain(&self) {
        self.drains.fetch_add(1, Ordering::Relaxed);
        counter!("study_hall_drains_total").increment(1);
    }

    /// Track the queue depth, keeping the peak.
    pub fn observe_queue_depth(&self, depth: usize) {
        let mut current_peak = self.peak_queue_depth.load(Ordering::Relaxed);
        while depth > current_peak {
            match self.peak_queue_depth.compare_exchange_weak(
                current_peak,
                depth,
                Ordering::Relaxed,
                Ordering::Relaxed,
            ) {
                Ok(_) => break,
                Err(actual) => current_peak = actual,
            }
        }

        // usize to f64 conversion is safe for a queue bounded by the population
        #[allow(clippy::cast_precision_loss)]
        gauge!("study_hall_queue_depth").set(depth as f64);
    }

    #[must_use]
    pub fn snapshot(&self) -> HallMetricsSnapshot {
        HallMetricsSnapshot {
            admissions: self.admissions.load(Ordering::Relaxed),
            departures: self.departures.load(Ordering::Relaxed),
            single_releases: self.single_releases.load(Ordering::Relaxed),
            batch_releases: self.batch_releases.load(Ordering::Relaxed),
            batch_released_students: self.batch_released_students.load(Ordering::Relaxed),
            saturations: self.saturations.load(Ordering::Relaxed),
            drains: self.drains.load(Ordering::Relaxed),
            peak_queue_depth: self.peak_queue_depth.load(Ordering::Relaxed),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use metrics_util::debugging::{DebugValue, DebuggingRecorder};

    #[test]
    fn test_counters_accumulate() {
        let metrics = HallMetrics::new();

        metrics.record_admission();
        metrics.record_admission();
        metrics.record_departure();
        metrics.record_single_release();
        metrics.record_batch_release(8);
        metrics.record_batch_release(4);
        metrics.record_saturation();
        metrics.record_drain();

        let snapshot = metrics.snapshot();
        assert_eq!(snapshot.admissions, 2);
        assert_eq!(snapshot.departures, 1);
        assert_eq!(snapshot.single_releases, 1);
        assert_eq!(snapshot.batch_releases, 2);
        assert_eq!(snapshot.batch_released_students, 12);
        assert_eq!(snapshot.saturations, 1);
        assert_eq!(snapshot.drains, 1);
    }

    #[test]
    fn test_peak_queue_depth_keeps_maximum() {
        let metrics = HallMetrics::new();

        metrics.observe_queue_depth(3);
        metrics.observe_queue_depth(12);
        metrics.observe_queue_depth(5);

        assert_eq!(metrics.snapshot().peak_queue_depth, 12);
    }

    #[test]
    fn test_counters_reach_metrics_facade() {
        let recorder = DebuggingRecorder::new();
        let snapshotter = recorder.snapshotter();

        metrics::with_local_recorder(&recorder, || {
            let metrics = HallMetrics::new();
            metrics.record_admission();
            metrics.record_admission();
            metrics.record_batch_release(8);
            metrics.observe_queue_depth(6);
        });

        let recorded = snapshotter.snapshot().into_vec();

        let admissions = recorded
            .iter()
            .find(|(key, _, _, _)| key.key().name() == "study_hall_admissions_total")
            .map(|(_, _, _, value)| value.clone());
        assert_eq!(admissions, Some(&DebugValue::Counter(2)));

        assert!(recorded
            .iter()
            .any(|(key, _, _, _)| key.key().name() == "study_hall_releases_total"));
        assert!(recorded
            .iter()
            .any(|(key, _, _, _)| key.key().name() == "study_hall_queue_depth"));
    }
}

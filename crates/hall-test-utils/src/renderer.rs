//! Snapshot recorder.

use std::sync::{Arc, Mutex};
use study_hall::console::SnapshotRenderer;
use study_hall::hall::HallSnapshot;

/// Keeps every rendered snapshot in order.
#[derive(Debug, Default)]
pub struct RecordingRenderer {
    snapshots: Mutex<Vec<HallSnapshot>>,
}

impl RecordingRenderer {
    #[must_use]
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Copy of everything rendered so far.
    pub fn snapshots(&self) -> Vec<HallSnapshot> {
        self.snapshots.lock().unwrap().clone()
    }

    pub fn len(&self) -> usize {
        self.snapshots.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The most recent snapshot.
    pub fn last(&self) -> Option<HallSnapshot> {
        self.snapshots.lock().unwrap().last().cloned()
    }
}

impl SnapshotRenderer for RecordingRenderer {
    fn render_snapshot(&self, snapshot: &HallSnapshot) {
        self.snapshots.lock().unwrap().push(snapshot.clone());
    }
}

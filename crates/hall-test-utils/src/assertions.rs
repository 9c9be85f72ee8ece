//! Hall invariant checks.
//!
//! Each helper panics with the offending snapshot index so a failing
//! simulation test points at the exact render.

use std::collections::HashSet;
use study_hall::hall::{HallSnapshot, StudentId, CAPACITY};

/// No snapshot shows more than `CAPACITY` occupants, a student in two
/// slots, or a student both seated and waiting.
pub fn assert_capacity_respected(snapshots: &[HallSnapshot]) {
    for (index, snapshot) in snapshots.iter().enumerate() {
        let occupants = snapshot.occupants();
        assert!(
            occupants.len() <= CAPACITY,
            "snapshot {index}: {} occupants exceeds capacity",
            occupants.len()
        );

        let seated: HashSet<StudentId> = occupants.iter().copied().collect();
        assert_eq!(
            seated.len(),
            occupants.len(),
            "snapshot {index}: a student holds two slots: {occupants:?}"
        );

        for waiting in &snapshot.waiting {
            assert!(
                !seated.contains(waiting),
                "snapshot {index}: student {waiting} is both seated and waiting"
            );
        }
    }
}

/// Every waiting row is a suffix-preserving FIFO: ids leave only from the
/// head and keep their relative order.
pub fn assert_queue_fifo(snapshots: &[HallSnapshot]) {
    for (index, pair) in snapshots.windows(2).enumerate() {
        let (before, after) = (&pair[0].waiting, &pair[1].waiting);
        let removed = before.len().saturating_sub(after.len());
        assert_eq!(
            &before[removed..],
            after.as_slice(),
            "snapshot {}: waiting queue reordered ({before:?} -> {after:?})",
            index + 1
        );
    }
}

/// Every waiting row is the unserved tail of the queue seeded with
/// `CAPACITY..population`: consecutive ids ending at `population - 1`.
///
/// Holds for each snapshot on its own, whatever order they were recorded in.
pub fn assert_waiting_is_queue_tail(snapshots: &[HallSnapshot], population: usize) {
    for (index, snapshot) in snapshots.iter().enumerate() {
        let Some(&head) = snapshot.waiting.first() else {
            continue;
        };
        let expected: Vec<StudentId> = (head..population).collect();
        assert!(
            head >= CAPACITY && snapshot.waiting == expected,
            "snapshot {index}: waiting row {:?} is not a queue tail",
            snapshot.waiting
        );
    }
}

/// The ids in `order` are strictly increasing.
pub fn assert_ascending(order: &[StudentId]) {
    assert!(
        order.windows(2).all(|w| w[0] < w[1]),
        "grant order is not FIFO: {order:?}"
    );
}

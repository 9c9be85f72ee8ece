//! `AdmissionController` - the decision authority of the hall.
//!
//! Owns the occupancy counter, the slot table, the saturation latch and the
//! count of outstanding grants, all behind one lock. Every read-modify-write
//! (admit, depart, classify-and-dequeue) is a single critical section.
//!
//! # Release policy
//!
//! Evaluated by each departing student, in priority order:
//!
//! 1. **Batch**: students waiting, latch set, hall empty. Up to `CAPACITY`
//!    students are dequeued at once and the latch is cleared.
//! 2. **Single**: students waiting, latch clear, a free seat not already
//!    promised to a granted student. Exactly one student is dequeued.
//! 3. **Terminate**: nobody waiting, hall empty, no grant outstanding.
//! 4. **Hold**: anything else; the departing student just leaves.
//!
//! # Invariants
//!
//! - `occupancy` equals the number of occupied slots and never exceeds `CAPACITY`
//! - `occupancy + outstanding_grants <= CAPACITY`
//! - the latch is set only when `occupancy` reaches `CAPACITY` and cleared
//!   only by the decision that observes the hall drained to zero

use crate::errors::{HallError, ProtocolViolation};
use crate::hall::{HallMetrics, HallSnapshot, StudentHandle, StudentId, WaitingQueue, CAPACITY};
use serde::Serialize;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::{debug, error, info};

/// How a student came to hold its admission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdmissionKind {
    /// Seeded by the supervisor before the run started.
    Initial,
    /// Released from the waiting queue by a departing student.
    Granted,
}

/// Outcome class of a release decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReleasePolicy {
    Batch,
    Single,
    Terminate,
    Hold,
}

impl ReleasePolicy {
    /// Classify the hall state seen by a departing student.
    #[must_use]
    pub const fn evaluate(
        occupancy: usize,
        outstanding_grants: usize,
        saturated: bool,
        waiting: usize,
    ) -> Self {
        if waiting > 0 && saturated && occupancy == 0 {
            ReleasePolicy::Batch
        } else if waiting > 0 && !saturated && occupancy + outstanding_grants < CAPACITY {
            ReleasePolicy::Single
        } else if waiting == 0 && occupancy == 0 && outstanding_grants == 0 {
            ReleasePolicy::Terminate
        } else {
            ReleasePolicy::Hold
        }
    }

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            ReleasePolicy::Batch => "batch",
            ReleasePolicy::Single => "single",
            ReleasePolicy::Terminate => "terminate",
            ReleasePolicy::Hold => "hold",
        }
    }
}

/// A release decision together with the students it dequeued.
///
/// The dequeued students are already counted as outstanding grants; the
/// caller must grant each of them.
#[derive(Debug)]
pub enum ReleaseDecision {
    Batch(Vec<Arc<StudentHandle>>),
    Single(Arc<StudentHandle>),
    Terminate,
    Hold,
}

impl ReleaseDecision {
    #[must_use]
    pub fn policy(&self) -> ReleasePolicy {
        match self {
            ReleaseDecision::Batch(_) => ReleasePolicy::Batch,
            ReleaseDecision::Single(_) => ReleasePolicy::Single,
            ReleaseDecision::Terminate => ReleasePolicy::Terminate,
            ReleaseDecision::Hold => ReleasePolicy::Hold,
        }
    }
}

/// Fixed arena of optional occupant ids, scanned linearly.
#[derive(Debug, Clone, Copy)]
struct SlotTable {
    slots: [Option<StudentId>; CAPACITY],
}

impl SlotTable {
    const fn new() -> Self {
        Self {
            slots: [None; CAPACITY],
        }
    }

    fn contains(&self, id: StudentId) -> bool {
        self.slots.iter().any(|slot| *slot == Some(id))
    }

    /// Put `id` in the first empty slot and return its index.
    fn assign(&mut self, id: StudentId) -> Option<usize> {
        let (index, slot) = self
            .slots
            .iter_mut()
            .enumerate()
            .find(|(_, slot)| slot.is_none())?;
        *slot = Some(id);
        Some(index)
    }

    /// Empty the first slot holding `id` and return its index.
    fn release(&mut self, id: StudentId) -> Option<usize> {
        let (index, slot) = self
            .slots
            .iter_mut()
            .enumerate()
            .find(|(_, slot)| **slot == Some(id))?;
        *slot = None;
        Some(index)
    }

    fn occupied(&self) -> usize {
        self.slots.iter().flatten().count()
    }
}

#[derive(Debug)]
struct HallState {
    slots: SlotTable,
    occupancy: usize,
    saturated: bool,
    outstanding_grants: usize,
    grant_order: Vec<StudentId>,
}

impl HallState {
    fn check_counter(&self) -> Result<(), HallError> {
        if self.occupancy == self.slots.occupied() {
            Ok(())
        } else {
            Err(HallError::Internal(format!(
                "occupancy counter {} disagrees with {} occupied slots",
                self.occupancy,
                self.slots.occupied()
            )))
        }
    }
}

/// Occupancy bookkeeping and release policy for one hall.
#[derive(Debug)]
pub struct AdmissionController {
    state: Mutex<HallState>,
    metrics: Arc<HallMetrics>,
}

impl AdmissionController {
    #[must_use]
    pub fn new(metrics: Arc<HallMetrics>) -> Self {
        Self {
            state: Mutex::new(HallState {
                slots: SlotTable::new(),
                occupancy: 0,
                saturated: false,
                outstanding_grants: 0,
                grant_order: Vec::new(),
            }),
            metrics,
        }
    }

    fn lock(&self) -> MutexGuard<'_, HallState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Seat a student in the first free slot.
    ///
    /// `Granted` admissions settle one outstanding grant. Reaching `CAPACITY`
    /// sets the saturation latch. Returns the new occupancy.
    pub fn record_admission(
        &self,
        student_id: StudentId,
        kind: AdmissionKind,
    ) -> Result<usize, HallError> {
        self.admit(student_id, kind)
            .inspect_err(|e| log_violation(student_id, "record_admission", e))
    }

    fn admit(&self, student_id: StudentId, kind: AdmissionKind) -> Result<usize, HallError> {
        let mut state = self.lock();

        if state.slots.contains(student_id) {
            return Err(ProtocolViolation::DoubleAdmission { student_id }.into());
        }
        if kind == AdmissionKind::Granted && state.outstanding_grants == 0 {
            return Err(ProtocolViolation::GrantAccountingUnderflow { student_id }.into());
        }
        if state.occupancy >= CAPACITY {
            return Err(ProtocolViolation::CapacityExceeded.into());
        }

        let slot = state
            .slots
            .assign(student_id)
            .ok_or(ProtocolViolation::CapacityExceeded)?;
        state.occupancy += 1;
        if kind == AdmissionKind::Granted {
            state.outstanding_grants -= 1;
        }
        state.check_counter()?;

        if state.occupancy == CAPACITY && !state.saturated {
            state.saturated = true;
            self.metrics.record_saturation();
            info!(
                target: "study_hall.controller",
                student_id,
                "Hall saturated, arrivals must wait for a full drain"
            );
        }
        self.metrics.record_admission();

        debug!(
            target: "study_hall.controller",
            student_id,
            slot,
            occupancy = state.occupancy,
            outstanding_grants = state.outstanding_grants,
            "Admission recorded"
        );

        Ok(state.occupancy)
    }

    /// Free the slot held by a student. Returns the new occupancy.
    ///
    /// Leaves the saturation latch alone; only `decide_release` clears it.
    pub fn record_departure(&self, student_id: StudentId) -> Result<usize, HallError> {
        self.depart(student_id)
            .inspect_err(|e| log_violation(student_id, "record_departure", e))
    }

    fn depart(&self, student_id: StudentId) -> Result<usize, HallError> {
        let mut state = self.lock();

        let slot = state
            .slots
            .release(student_id)
            .ok_or(ProtocolViolation::NotOccupying { student_id })?;
        state.occupancy = state.occupancy.saturating_sub(1);
        state.check_counter()?;
        self.metrics.record_departure();

        debug!(
            target: "study_hall.controller",
            student_id,
            slot,
            occupancy = state.occupancy,
            "Departure recorded"
        );

        Ok(state.occupancy)
    }

    /// Classify the hall after a departure and dequeue the students to release.
    ///
    /// Runs entirely under the controller lock with the queue lock nested
    /// inside, so concurrent departures see a consistent joint state.
    pub fn decide_release(&self, queue: &WaitingQueue) -> ReleaseDecision {
        let mut state = self.lock();
        let waiting = queue.len();
        let policy = ReleasePolicy::evaluate(
            state.occupancy,
            state.outstanding_grants,
            state.saturated,
            waiting,
        );

        if state.saturated && state.occupancy == 0 {
            state.saturated = false;
            self.metrics.record_drain();
            debug!(target: "study_hall.controller", waiting, "Hall drained, latch cleared");
        }

        let decision = match policy {
            ReleasePolicy::Batch => {
                let room = CAPACITY.saturating_sub(state.outstanding_grants);
                let mut released = Vec::with_capacity(room);
                while released.len() < room {
                    match queue.dequeue() {
                        Some(student) => released.push(student),
                        None => break,
                    }
                }
                state.outstanding_grants += released.len();
                state
                    .grant_order
                    .extend(released.iter().map(|student| student.id()));
                self.metrics.record_batch_release(released.len());
                ReleaseDecision::Batch(released)
            }
            ReleasePolicy::Single => match queue.dequeue() {
                Some(student) => {
                    state.outstanding_grants += 1;
                    state.grant_order.push(student.id());
                    self.metrics.record_single_release();
                    ReleaseDecision::Single(student)
                }
                None => ReleaseDecision::Hold,
            },
            ReleasePolicy::Terminate => ReleaseDecision::Terminate,
            ReleasePolicy::Hold => ReleaseDecision::Hold,
        };

        self.metrics.observe_queue_depth(queue.len());

        debug!(
            target: "study_hall.controller",
            policy = decision.policy().as_str(),
            occupancy = state.occupancy,
            outstanding_grants = state.outstanding_grants,
            waiting_before = waiting,
            "Release decided"
        );

        decision
    }

    #[must_use]
    pub fn occupancy(&self) -> usize {
        self.lock().occupancy
    }

    #[must_use]
    pub fn is_saturated(&self) -> bool {
        self.lock().saturated
    }

    #[must_use]
    pub fn outstanding_grants(&self) -> usize {
        self.lock().outstanding_grants
    }

    /// Student ids in the order the release protocol granted them.
    #[must_use]
    pub fn grant_order(&self) -> Vec<StudentId> {
        self.lock().grant_order.clone()
    }

    /// Consistent view of slots and queue; mutates nothing.
    #[must_use]
    pub fn snapshot(&self, queue: &WaitingQueue) -> HallSnapshot {
        let state = self.lock();
        HallSnapshot {
            slots: state.slots.slots,
            waiting: queue.waiting_ids(),
        }
    }
}

fn log_violation(student_id: StudentId, operation: &'static str, error: &HallError) {
    error!(
        target: "study_hall.controller",
        student_id,
        operation,
        error = %error,
        "Protocol violation"
    );
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use std::sync::Barrier;
    use tracing_subscriber::fmt::MakeWriter;

    fn controller() -> (AdmissionController, Arc<HallMetrics>) {
        let metrics = HallMetrics::new();
        (AdmissionController::new(Arc::clone(&metrics)), metrics)
    }

    fn queue_of(ids: impl IntoIterator<Item = StudentId>) -> WaitingQueue {
        let queue = WaitingQueue::new(40);
        for id in ids {
            queue.enqueue(StudentHandle::new(id)).unwrap();
        }
        queue
    }

    fn fill(controller: &AdmissionController) {
        for id in 0..CAPACITY {
            controller
                .record_admission(id, AdmissionKind::Initial)
                .unwrap();
        }
    }

    #[test]
    fn test_policy_priority_order() {
        assert_eq!(ReleasePolicy::evaluate(0, 0, true, 3), ReleasePolicy::Batch);
        assert_eq!(ReleasePolicy::evaluate(5, 0, false, 3), ReleasePolicy::Single);
        assert_eq!(ReleasePolicy::evaluate(0, 0, false, 3), ReleasePolicy::Single);
        assert_eq!(ReleasePolicy::evaluate(0, 0, false, 0), ReleasePolicy::Terminate);
        assert_eq!(ReleasePolicy::evaluate(0, 0, true, 0), ReleasePolicy::Terminate);
    }

    #[test]
    fn test_policy_holds() {
        // Queue empty, students still studying
        assert_eq!(ReleasePolicy::evaluate(3, 0, false, 0), ReleasePolicy::Hold);
        // Saturated and not yet drained
        assert_eq!(ReleasePolicy::evaluate(4, 0, true, 5), ReleasePolicy::Hold);
        // Free seats all promised to granted students
        assert_eq!(ReleasePolicy::evaluate(6, 2, false, 5), ReleasePolicy::Hold);
        // A granted student has not arrived yet
        assert_eq!(ReleasePolicy::evaluate(0, 1, false, 0), ReleasePolicy::Hold);
    }

    #[test]
    fn test_admission_assigns_first_free_slot() {
        let (controller, _) = controller();
        let queue = queue_of([]);

        controller.record_admission(3, AdmissionKind::Initial).unwrap();
        controller.record_admission(5, AdmissionKind::Initial).unwrap();
        controller.record_departure(3).unwrap();
        controller.record_admission(9, AdmissionKind::Initial).unwrap();

        let snapshot = controller.snapshot(&queue);
        assert_eq!(snapshot.slots[0], Some(9));
        assert_eq!(snapshot.slots[1], Some(5));
        assert_eq!(controller.occupancy(), 2);
        assert_eq!(snapshot.occupancy(), 2);
    }

    #[test]
    fn test_latch_set_exactly_at_capacity() {
        let (controller, metrics) = controller();

        for id in 0..CAPACITY - 1 {
            controller.record_admission(id, AdmissionKind::Initial).unwrap();
            assert!(!controller.is_saturated());
        }
        controller
            .record_admission(CAPACITY - 1, AdmissionKind::Initial)
            .unwrap();
        assert!(controller.is_saturated());
        assert_eq!(metrics.snapshot().saturations, 1);

        // Departures alone never clear the latch
        controller.record_departure(0).unwrap();
        controller.record_departure(1).unwrap();
        assert!(controller.is_saturated());
    }

    #[test]
    fn test_capacity_exceeded_rejected() {
        let (controller, _) = controller();
        fill(&controller);

        let err = controller
            .record_admission(99, AdmissionKind::Initial)
            .unwrap_err();
        assert!(matches!(
            err,
            HallError::Protocol(ProtocolViolation::CapacityExceeded)
        ));
        assert_eq!(controller.occupancy(), CAPACITY);
    }

    #[test]
    fn test_double_admission_rejected() {
        let (controller, _) = controller();
        controller.record_admission(4, AdmissionKind::Initial).unwrap();

        let err = controller
            .record_admission(4, AdmissionKind::Initial)
            .unwrap_err();
        assert!(matches!(
            err,
            HallError::Protocol(ProtocolViolation::DoubleAdmission { student_id: 4 })
        ));
        assert_eq!(controller.occupancy(), 1);
    }

    #[test]
    fn test_departure_without_slot_rejected() {
        let (controller, _) = controller();
        let err = controller.record_departure(12).unwrap_err();
        assert!(matches!(
            err,
            HallError::Protocol(ProtocolViolation::NotOccupying { student_id: 12 })
        ));
    }

    #[test]
    fn test_granted_admission_requires_outstanding_grant() {
        let (controller, _) = controller();
        let err = controller
            .record_admission(10, AdmissionKind::Granted)
            .unwrap_err();
        assert!(matches!(
            err,
            HallError::Protocol(ProtocolViolation::GrantAccountingUnderflow { student_id: 10 })
        ));
    }

    #[test]
    fn test_saturated_hall_holds_until_drained() {
        let (controller, _) = controller();
        let queue = queue_of(8..12);
        fill(&controller);

        for id in 0..CAPACITY - 1 {
            controller.record_departure(id).unwrap();
            let decision = controller.decide_release(&queue);
            assert_eq!(decision.policy(), ReleasePolicy::Hold);
            assert!(controller.is_saturated());
        }
        assert_eq!(queue.len(), 4);
    }

    #[test]
    fn test_batch_release_after_full_drain() {
        let (controller, metrics) = controller();
        let queue = queue_of(8..20);
        fill(&controller);

        for id in 0..CAPACITY {
            controller.record_departure(id).unwrap();
            if id < CAPACITY - 1 {
                let _ = controller.decide_release(&queue);
            }
        }

        let ReleaseDecision::Batch(released) = controller.decide_release(&queue) else {
            panic!("expected batch release");
        };
        let ids: Vec<_> = released.iter().map(|s| s.id()).collect();
        assert_eq!(ids, (8..16).collect::<Vec<_>>());

        assert!(!controller.is_saturated());
        assert_eq!(controller.outstanding_grants(), CAPACITY);
        assert_eq!(queue.waiting_ids(), (16..20).collect::<Vec<_>>());
        assert_eq!(controller.grant_order(), ids);

        let snapshot = metrics.snapshot();
        assert_eq!(snapshot.batch_releases, 1);
        assert_eq!(snapshot.batch_released_students, 8);
        assert_eq!(snapshot.drains, 1);
    }

    #[test]
    fn test_concurrent_departures_release_one_batch_per_drain() {
        let (controller, metrics) = controller();
        let queue = queue_of(CAPACITY..5 * CAPACITY);
        fill(&controller);
        let mut seated: Vec<StudentId> = (0..CAPACITY).collect();

        for cycle in 0..5 {
            let barrier = Barrier::new(seated.len());
            let decisions: Vec<ReleaseDecision> = std::thread::scope(|scope| {
                let workers: Vec<_> = seated
                    .iter()
                    .map(|&id| {
                        let (controller, queue, barrier) = (&controller, &queue, &barrier);
                        scope.spawn(move || {
                            barrier.wait();
                            controller.record_departure(id).unwrap();
                            controller.decide_release(queue)
                        })
                    })
                    .collect();
                workers.into_iter().map(|w| w.join().unwrap()).collect()
            });

            let policies: Vec<ReleasePolicy> =
                decisions.iter().map(ReleaseDecision::policy).collect();
            let count =
                |policy: ReleasePolicy| policies.iter().filter(|&&p| p == policy).count();
            assert_eq!(count(ReleasePolicy::Single), 0, "cycle {cycle}: {policies:?}");

            if cycle < 4 {
                assert_eq!(count(ReleasePolicy::Batch), 1, "cycle {cycle}: {policies:?}");
                assert_eq!(count(ReleasePolicy::Hold), CAPACITY - 1);

                let released = decisions
                    .into_iter()
                    .find_map(|decision| match decision {
                        ReleaseDecision::Batch(released) => Some(released),
                        _ => None,
                    })
                    .unwrap();
                seated = released.iter().map(|s| s.id()).collect();
                let expected: Vec<StudentId> =
                    ((cycle + 1) * CAPACITY..(cycle + 2) * CAPACITY).collect();
                assert_eq!(seated, expected);

                for &id in &seated {
                    controller
                        .record_admission(id, AdmissionKind::Granted)
                        .unwrap();
                }
                assert!(controller.is_saturated());
            } else {
                // Every decision that sees the empty hall may end the run
                assert_eq!(count(ReleasePolicy::Batch), 0, "cycle {cycle}: {policies:?}");
                assert!(count(ReleasePolicy::Terminate) >= 1);
            }
        }

        let snapshot = metrics.snapshot();
        assert_eq!(snapshot.batch_releases, 4);
        assert_eq!(snapshot.batch_released_students, 32);
        assert_eq!(snapshot.saturations, 5);
        assert_eq!(snapshot.drains, 5);
        assert_eq!(controller.occupancy(), 0);
        assert_eq!(controller.outstanding_grants(), 0);
        assert!(queue.is_empty());
    }

    #[derive(Clone, Default)]
    struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

    impl std::io::Write for CapturedLogs {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    impl<'a> MakeWriter<'a> for CapturedLogs {
        type Writer = Self;

        fn make_writer(&'a self) -> Self::Writer {
            self.clone()
        }
    }

    #[test]
    fn test_protocol_violation_logged_at_error() {
        let (controller, _) = controller();
        let logs = CapturedLogs::default();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(logs.clone())
            .with_ansi(false)
            .with_max_level(tracing::Level::ERROR)
            .finish();

        tracing::subscriber::with_default(subscriber, || {
            assert!(controller.record_departure(6).is_err());
            controller
                .record_admission(2, AdmissionKind::Initial)
                .unwrap();
            assert!(controller
                .record_admission(2, AdmissionKind::Initial)
                .is_err());
        });

        let output = String::from_utf8(logs.0.lock().unwrap().clone()).unwrap();
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines.len(), 2, "{output}");
        assert!(lines.iter().all(|line| line.contains("ERROR")));
        assert!(lines[0].contains("student_id=6"));
        assert!(lines[0].contains("record_departure"));
        assert!(lines[1].contains("student_id=2"));
        assert!(lines[1].contains("record_admission"));
    }

    #[test]
    fn test_partial_batch_when_queue_short() {
        let (controller, _) = controller();
        let queue = queue_of([20, 21, 22]);
        fill(&controller);
        for id in 0..CAPACITY {
            controller.record_departure(id).unwrap();
        }

        let ReleaseDecision::Batch(released) = controller.decide_release(&queue) else {
            panic!("expected batch release");
        };
        assert_eq!(released.len(), 3);
        assert!(queue.is_empty());
        assert_eq!(controller.outstanding_grants(), 3);
    }

    #[test]
    fn test_single_release_when_unsaturated() {
        let (controller, metrics) = controller();
        let queue = queue_of([30, 31]);
        for id in 0..3 {
            controller.record_admission(id, AdmissionKind::Initial).unwrap();
        }

        controller.record_departure(1).unwrap();
        let ReleaseDecision::Single(student) = controller.decide_release(&queue) else {
            panic!("expected single release");
        };
        assert_eq!(student.id(), 30);
        assert_eq!(controller.outstanding_grants(), 1);
        assert_eq!(metrics.snapshot().single_releases, 1);

        controller
            .record_admission(30, AdmissionKind::Granted)
            .unwrap();
        assert_eq!(controller.outstanding_grants(), 0);
        assert_eq!(controller.occupancy(), 3);
    }

    #[test]
    fn test_outstanding_grant_blocks_termination() {
        let (controller, _) = controller();
        let queue = queue_of([40]);
        controller.record_admission(0, AdmissionKind::Initial).unwrap();
        controller.record_admission(1, AdmissionKind::Initial).unwrap();

        controller.record_departure(0).unwrap();
        assert_eq!(
            controller.decide_release(&queue).policy(),
            ReleasePolicy::Single
        );

        // Last studier leaves before the granted student records admission
        controller.record_departure(1).unwrap();
        assert_eq!(
            controller.decide_release(&queue).policy(),
            ReleasePolicy::Hold
        );

        controller
            .record_admission(40, AdmissionKind::Granted)
            .unwrap();
        controller.record_departure(40).unwrap();
        assert_eq!(
            controller.decide_release(&queue).policy(),
            ReleasePolicy::Terminate
        );
    }

    #[test]
    fn test_terminate_clears_latch() {
        let (controller, metrics) = controller();
        let queue = queue_of([]);
        fill(&controller);
        for id in 0..CAPACITY {
            controller.record_departure(id).unwrap();
        }

        assert_eq!(
            controller.decide_release(&queue).policy(),
            ReleasePolicy::Terminate
        );
        assert!(!controller.is_saturated());
        assert_eq!(metrics.snapshot().drains, 1);
    }

    #[test]
    fn test_snapshot_is_pure() {
        let (controller, _) = controller();
        let queue = queue_of([9, 10]);
        controller.record_admission(2, AdmissionKind::Initial).unwrap();

        let first = controller.snapshot(&queue);
        let second = controller.snapshot(&queue);
        assert_eq!(first, second);
        assert_eq!(first.to_string(), second.to_string());
        assert_eq!(queue.len(), 2);
        assert_eq!(controller.occupancy(), 1);
    }
}

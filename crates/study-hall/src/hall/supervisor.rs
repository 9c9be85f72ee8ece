//! `Supervisor` - bootstrap and teardown of one simulation run.
//!
//! - Seeds the first `CAPACITY` students straight into the controller
//! - Enqueues everyone else, in id order, before any task starts
//! - Spawns one `StudentActor` per student, paced by the arrival delay
//! - Owns the root `CancellationToken`; every student gets a child token
//!
//! # Shutdown
//!
//! The run ends when the draining student cancels the completion token, a
//! student fails, or the root token is cancelled from outside (Ctrl+C).
//! The supervisor then:
//! 1. Cancels the root token (stragglers stop waiting or studying)
//! 2. Joins every student task with a bounded timeout
//! 3. Closes every admission signal
//! 4. Returns the report, or the first error any student hit

use crate::config::Config;
use crate::console::{validate_population, SnapshotRenderer};
use crate::errors::HallError;
use crate::hall::student::{HallContext, StudyTiming};
use crate::hall::{
    AdmissionController, AdmissionKind, HallMetrics, HallMetricsSnapshot, HallSnapshot,
    StudentActor, StudentHandle, StudentId, StudentOutcome, WaitingQueue, CAPACITY,
};
use serde::Serialize;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, instrument, warn};

/// How the simulation ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SimulationOutcome {
    /// The last student out found the hall and queue empty.
    Completed,
    /// Cancelled from outside before the hall drained.
    Interrupted,
}

/// Summary of a finished run.
#[derive(Debug, Clone, Serialize)]
pub struct SimulationReport {
    pub sim_id: String,
    pub outcome: SimulationOutcome,
    pub population: usize,
    /// Students in the order the release protocol granted them.
    pub grant_order: Vec<StudentId>,
    /// Students stopped by cancellation (or never started).
    pub interrupted_students: Vec<StudentId>,
    pub metrics: HallMetricsSnapshot,
    pub final_snapshot: HallSnapshot,
    pub elapsed_seconds: f64,
}

struct ManagedStudent {
    handle: Arc<StudentHandle>,
    task: Option<JoinHandle<Result<StudentOutcome, HallError>>>,
}

/// Runs one simulation from seeding to teardown.
pub struct Supervisor {
    config: Config,
    renderer: Arc<dyn SnapshotRenderer>,
    metrics: Arc<HallMetrics>,
    cancel_token: CancellationToken,
}

impl Supervisor {
    #[must_use]
    pub fn new(config: Config, renderer: Arc<dyn SnapshotRenderer>) -> Self {
        Self {
            config,
            renderer,
            metrics: HallMetrics::new(),
            cancel_token: CancellationToken::new(),
        }
    }

    #[must_use]
    pub fn metrics(&self) -> Arc<HallMetrics> {
        Arc::clone(&self.metrics)
    }

    /// Token that interrupts the run when cancelled.
    #[must_use]
    pub fn cancel_token(&self) -> CancellationToken {
        self.cancel_token.clone()
    }

    /// Interrupt the run.
    pub fn cancel(&self) {
        self.cancel_token.cancel();
    }

    /// Run the simulation to completion or interruption.
    #[instrument(skip_all, name = "study_hall.supervisor", fields(sim_id = %self.config.sim_id, population = population))]
    pub async fn run(self, population: usize) -> Result<SimulationReport, HallError> {
        let population = validate_population(population)?;
        let started = Instant::now();

        info!(
            target: "study_hall.supervisor",
            sim_id = %self.config.sim_id,
            population,
            capacity = CAPACITY,
            min_study_seconds = self.config.min_study_seconds,
            max_study_seconds = self.config.max_study_seconds,
            seeded = self.config.seed.is_some(),
            "Simulation starting"
        );

        let completion = CancellationToken::new();
        let hall = Arc::new(HallContext {
            controller: AdmissionController::new(Arc::clone(&self.metrics)),
            queue: WaitingQueue::new(population),
            renderer: Arc::clone(&self.renderer),
            timing: StudyTiming::from(&self.config),
            completion: completion.clone(),
        });

        let mut students = self.seed(&hall, population)?;
        self.spawn_students(&hall, &mut students).await;

        let outcome = tokio::select! {
            () = completion.cancelled() => SimulationOutcome::Completed,
            () = self.cancel_token.cancelled() => SimulationOutcome::Interrupted,
        };
        debug!(
            target: "study_hall.supervisor",
            outcome = ?outcome,
            "Simulation loop ended, tearing down"
        );

        self.cancel_token.cancel();
        let (interrupted_students, first_error) = self.join_students(students).await;

        if let Some(e) = first_error {
            error!(
                target: "study_hall.supervisor",
                sim_id = %self.config.sim_id,
                error = %e,
                "Simulation aborted"
            );
            return Err(e);
        }

        let final_snapshot = hall.controller.snapshot(&hall.queue);
        if outcome == SimulationOutcome::Completed
            && (final_snapshot.occupancy() != 0 || !final_snapshot.waiting.is_empty())
        {
            return Err(HallError::Internal(format!(
                "simulation completed with {} occupants and {} waiting",
                final_snapshot.occupancy(),
                final_snapshot.waiting.len()
            )));
        }
        self.renderer.render_snapshot(&final_snapshot);

        let report = SimulationReport {
            sim_id: self.config.sim_id.clone(),
            outcome,
            population,
            grant_order: hall.controller.grant_order(),
            interrupted_students,
            metrics: self.metrics.snapshot(),
            final_snapshot,
            elapsed_seconds: started.elapsed().as_secs_f64(),
        };

        info!(
            target: "study_hall.supervisor",
            sim_id = %report.sim_id,
            outcome = ?report.outcome,
            admissions = report.metrics.admissions,
            batch_releases = report.metrics.batch_releases,
            single_releases = report.metrics.single_releases,
            elapsed_seconds = report.elapsed_seconds,
            "Simulation finished"
        );

        Ok(report)
    }

    /// Create every student, admitting the first `CAPACITY` and queueing the rest.
    fn seed(
        &self,
        hall: &HallContext,
        population: usize,
    ) -> Result<Vec<ManagedStudent>, HallError> {
        let mut students = Vec::with_capacity(population);
        for student_id in 0..population {
            let handle = StudentHandle::new(student_id);
            if student_id < CAPACITY {
                hall.controller
                    .record_admission(student_id, AdmissionKind::Initial)?;
                handle.grant_admission()?;
            } else {
                hall.queue.enqueue(Arc::clone(&handle))?;
            }
            students.push(ManagedStudent { handle, task: None });
        }
        self.metrics.observe_queue_depth(hall.queue.len());

        debug!(
            target: "study_hall.supervisor",
            admitted = hall.controller.occupancy(),
            waiting = hall.queue.len(),
            "Hall seeded"
        );
        Ok(students)
    }

    /// Start the student tasks one arrival at a time.
    ///
    /// Stops early if the run is cancelled or already over.
    async fn spawn_students(&self, hall: &Arc<HallContext>, students: &mut [ManagedStudent]) {
        let pacing = self.config.arrival_pacing();
        for student in students.iter_mut() {
            if self.cancel_token.is_cancelled() || hall.completion.is_cancelled() {
                break;
            }

            let student_id = student.handle.id();
            student.task = Some(StudentActor::spawn(
                Arc::clone(&student.handle),
                student_id < CAPACITY,
                Arc::clone(hall),
                self.cancel_token.child_token(),
            ));

            if !pacing.is_zero() {
                tokio::select! {
                    () = self.cancel_token.cancelled() => {}
                    () = hall.completion.cancelled() => {}
                    () = tokio::time::sleep(pacing) => {}
                }
            }
        }
    }

    /// Join every student task; returns interrupted ids and the first error.
    async fn join_students(
        &self,
        students: Vec<ManagedStudent>,
    ) -> (Vec<StudentId>, Option<HallError>) {
        let timeout = self.config.shutdown_timeout();
        let mut interrupted = Vec::new();
        let mut first_error = None;

        for ManagedStudent { handle, task } in students {
            let student_id = handle.id();
            let Some(task) = task else {
                // Never started
                interrupted.push(student_id);
                handle.close();
                continue;
            };

            match tokio::time::timeout(timeout, task).await {
                Ok(Ok(Ok(StudentOutcome::Completed))) => {}
                Ok(Ok(Ok(StudentOutcome::Interrupted))) => interrupted.push(student_id),
                Ok(Ok(Err(e @ HallError::Protocol(_)))) => {
                    error!(
                        target: "study_hall.supervisor",
                        student_id,
                        error = %e,
                        "Student stopped on a protocol violation"
                    );
                    first_error.get_or_insert(e);
                }
                Ok(Ok(Err(e))) => {
                    warn!(
                        target: "study_hall.supervisor",
                        student_id,
                        error = %e,
                        "Student failed"
                    );
                    first_error.get_or_insert(e);
                }
                Ok(Err(join_error)) => {
                    error!(
                        target: "study_hall.supervisor",
                        student_id,
                        error = ?join_error,
                        "Student task panicked or was aborted"
                    );
                    first_error.get_or_insert(HallError::StudentFailed {
                        student_id,
                        reason: join_error.to_string(),
                    });
                }
                Err(_) => {
                    warn!(
                        target: "study_hall.supervisor",
                        student_id,
                        timeout_secs = timeout.as_secs(),
                        "Student did not stop in time"
                    );
                    first_error.get_or_insert(HallError::ShutdownTimeout { student_id });
                }
            }
            handle.close();
        }

        (interrupted, first_error)
    }
}

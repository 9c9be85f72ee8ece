//! `StudentActor` - one task per student.
//!
//! ```text
//! Created ─┬─> InitiallyAdmitted ─┐
//!          └─> Waiting ───────────┴─> Studying ─> Departed ─> Releasing ─> Finished
//! ```
//!
//! Waiting and studying are both cancellable through the student's child
//! token; a cancelled student finishes as `Interrupted` without touching the
//! controller again.

use crate::config::Config;
use crate::console::SnapshotRenderer;
use crate::errors::HallError;
use crate::hall::{
    AdmissionController, AdmissionKind, ReleaseDecision, StudentHandle, StudentId, WaitingQueue,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, instrument};

/// Lifecycle states of a student.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StudentState {
    Created,
    Waiting,
    InitiallyAdmitted,
    Studying,
    Departed,
    Releasing,
    Finished,
}

impl StudentState {
    /// Whether `self -> next` is an edge of the lifecycle.
    #[must_use]
    pub const fn can_transition_to(self, next: StudentState) -> bool {
        matches!(
            (self, next),
            (StudentState::Created, StudentState::Waiting)
                | (StudentState::Created, StudentState::InitiallyAdmitted)
                | (StudentState::Waiting, StudentState::Studying)
                | (StudentState::InitiallyAdmitted, StudentState::Studying)
                | (StudentState::Studying, StudentState::Departed)
                | (StudentState::Departed, StudentState::Releasing)
                | (StudentState::Releasing, StudentState::Finished)
                // Cancellation ends any state that can be waiting
                | (StudentState::Waiting, StudentState::Finished)
                | (StudentState::InitiallyAdmitted, StudentState::Finished)
                | (StudentState::Studying, StudentState::Finished)
        )
    }

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            StudentState::Created => "created",
            StudentState::Waiting => "waiting",
            StudentState::InitiallyAdmitted => "initially_admitted",
            StudentState::Studying => "studying",
            StudentState::Departed => "departed",
            StudentState::Releasing => "releasing",
            StudentState::Finished => "finished",
        }
    }
}

/// How a student task ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StudentOutcome {
    /// Studied, departed and ran its release decision.
    Completed,
    /// Stopped by cancellation before departing.
    Interrupted,
}

/// Timing knobs shared by every student of a run.
#[derive(Debug, Clone, Copy)]
pub struct StudyTiming {
    pub min_study_seconds: u64,
    pub max_study_seconds: u64,
    pub release_pacing: Duration,
    pub seed: Option<u64>,
}

impl From<&Config> for StudyTiming {
    fn from(config: &Config) -> Self {
        Self {
            min_study_seconds: config.min_study_seconds,
            max_study_seconds: config.max_study_seconds,
            release_pacing: config.release_pacing(),
            seed: config.seed,
        }
    }
}

/// State shared by all students of one run.
pub struct HallContext {
    pub controller: AdmissionController,
    pub queue: WaitingQueue,
    pub renderer: Arc<dyn SnapshotRenderer>,
    pub timing: StudyTiming,
    /// Cancelled by the student that observes the end of the simulation,
    /// or by any student that hits a fatal error.
    pub completion: CancellationToken,
}

impl HallContext {
    pub fn render(&self) {
        self.renderer
            .render_snapshot(&self.controller.snapshot(&self.queue));
    }
}

/// One student's task state.
pub struct StudentActor {
    handle: Arc<StudentHandle>,
    state: StudentState,
    initially_admitted: bool,
    hall: Arc<HallContext>,
    cancel_token: CancellationToken,
    rng: StdRng,
}

impl StudentActor {
    /// Spawn the student task.
    ///
    /// Initially admitted students must already be seeded in the controller
    /// and hold a pending grant.
    pub fn spawn(
        handle: Arc<StudentHandle>,
        initially_admitted: bool,
        hall: Arc<HallContext>,
        cancel_token: CancellationToken,
    ) -> JoinHandle<Result<StudentOutcome, HallError>> {
        let rng = match hall.timing.seed {
            Some(seed) => StdRng::seed_from_u64(seed ^ handle.id() as u64),
            None => StdRng::from_entropy(),
        };

        let actor = Self {
            handle,
            state: StudentState::Created,
            initially_admitted,
            hall,
            cancel_token,
            rng,
        };

        tokio::spawn(actor.run())
    }

    #[must_use]
    pub fn id(&self) -> StudentId {
        self.handle.id()
    }

    /// Run the lifecycle; a fatal error also cancels the completion token
    /// so the supervisor stops waiting.
    async fn run(mut self) -> Result<StudentOutcome, HallError> {
        let result = self.lifecycle().await;
        if result.is_err() {
            self.hall.completion.cancel();
        }
        result
    }

    fn transition(&mut self, next: StudentState) -> Result<(), HallError> {
        if !self.state.can_transition_to(next) {
            return Err(HallError::Internal(format!(
                "student {} cannot move from {} to {}",
                self.id(),
                self.state.as_str(),
                next.as_str()
            )));
        }
        debug!(
            target: "study_hall.student",
            student_id = self.id(),
            from = self.state.as_str(),
            to = next.as_str(),
            "State transition"
        );
        self.state = next;
        Ok(())
    }

    #[instrument(skip_all, name = "study_hall.student", fields(student_id = self.handle.id()))]
    async fn lifecycle(&mut self) -> Result<StudentOutcome, HallError> {
        let student_id = self.id();
        info!(target: "study_hall.student", student_id, "Student was born");

        if self.initially_admitted {
            self.transition(StudentState::InitiallyAdmitted)?;
        } else {
            self.transition(StudentState::Waiting)?;
            if self.hall.controller.is_saturated() {
                info!(target: "study_hall.student", student_id, "Student must wait, hall is full");
                self.hall.render();
            }
        }

        tokio::select! {
            () = self.cancel_token.cancelled() => {
                return self.interrupted();
            }
            admitted = self.handle.await_admission() => admitted?,
        }

        // Seeded students already hold their slot.
        if !self.initially_admitted {
            self.hall
                .controller
                .record_admission(student_id, AdmissionKind::Granted)?;
        }
        self.handle.set_studying(true);
        self.transition(StudentState::Studying)?;

        let study_seconds = self
            .rng
            .gen_range(self.hall.timing.min_study_seconds..=self.hall.timing.max_study_seconds);
        info!(
            target: "study_hall.student",
            student_id,
            study_seconds,
            "Student is studying"
        );
        self.hall.render();

        tokio::select! {
            () = self.cancel_token.cancelled() => {
                return self.interrupted();
            }
            () = tokio::time::sleep(Duration::from_secs(study_seconds)) => {}
        }

        self.hall.controller.record_departure(student_id)?;
        self.handle.set_studying(false);
        self.transition(StudentState::Departed)?;
        info!(target: "study_hall.student", student_id, "Student is done studying");
        self.hall.render();

        let decision = self.hall.controller.decide_release(&self.hall.queue);
        self.transition(StudentState::Releasing)?;
        self.release(decision).await?;

        self.transition(StudentState::Finished)?;
        Ok(StudentOutcome::Completed)
    }

    fn interrupted(&mut self) -> Result<StudentOutcome, HallError> {
        debug!(
            target: "study_hall.student",
            student_id = self.id(),
            state = self.state.as_str(),
            "Student cancelled"
        );
        self.transition(StudentState::Finished)?;
        Ok(StudentOutcome::Interrupted)
    }

    /// Carry out a release decision: grant 0, 1 or up to `CAPACITY` students,
    /// or signal the end of the simulation.
    async fn release(&self, decision: ReleaseDecision) -> Result<(), HallError> {
        let student_id = self.id();
        match decision {
            ReleaseDecision::Batch(students) => {
                info!(
                    target: "study_hall.student",
                    student_id,
                    released = students.len(),
                    "Hall drained, releasing next batch"
                );
                for next in students {
                    next.grant_admission()?;
                    debug!(
                        target: "study_hall.student",
                        student_id,
                        granted = next.id(),
                        "Batch grant"
                    );
                    self.pace().await;
                    self.hall.render();
                }
            }
            ReleaseDecision::Single(next) => {
                next.grant_admission()?;
                info!(
                    target: "study_hall.student",
                    student_id,
                    granted = next.id(),
                    "Releasing next waiting student"
                );
                self.pace().await;
                self.hall.render();
            }
            ReleaseDecision::Terminate => {
                info!(
                    target: "study_hall.student",
                    student_id,
                    "Last student out, simulation complete"
                );
                self.hall.completion.cancel();
            }
            ReleaseDecision::Hold => {}
        }
        Ok(())
    }

    /// Short cosmetic pause between grants; cut short by cancellation.
    async fn pace(&self) {
        let pacing = self.hall.timing.release_pacing;
        if pacing.is_zero() {
            return;
        }
        tokio::select! {
            () = self.cancel_token.cancelled() => {}
            () = tokio::time::sleep(pacing) => {}
        }
    }
}

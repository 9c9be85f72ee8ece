//! Admission control for the study hall.
//!
//! ```text
//! Supervisor (one per run)
//! ├── seeds the first CAPACITY students into the AdmissionController
//! ├── enqueues everyone else into the WaitingQueue (FIFO)
//! └── spawns one StudentActor task per student
//!     └── StudentActor
//!         ├── awaits its own StudentHandle signal (direct handoff)
//!         ├── studies, departs
//!         └── asks the AdmissionController for a release decision:
//!             Batch | Single | Terminate | Hold
//! ```
//!
//! # Key Design Decisions
//!
//! - **Direct handoff**: each student owns a private admission signal, so a
//!   grant can never be consumed by the wrong student.
//! - **Tight release decision**: the decision and the dequeues it implies run
//!   under the controller lock (queue lock nested inside), so two departures
//!   cannot both classify the same hall state.
//! - **Outstanding grants**: students that were granted but have not yet
//!   recorded their admission still count against capacity and block
//!   termination.
//! - **Cooperative shutdown**: the draining student cancels a completion token;
//!   the supervisor observes it and joins every task.
//!
//! # Modules
//!
//! - [`controller`] - `AdmissionController`, occupancy table and release policy
//! - [`handle`] - `StudentHandle`, per-student admission signal
//! - [`metrics`] - run counters
//! - [`queue`] - `WaitingQueue`, bounded FIFO of waiting students
//! - [`snapshot`] - `HallSnapshot`, read-only view of slots and queue
//! - [`student`] - `StudentActor` lifecycle state machine
//! - [`supervisor`] - `Supervisor`, bootstrap and teardown

pub mod controller;
pub mod handle;
pub mod metrics;
pub mod queue;
pub mod snapshot;
pub mod student;
pub mod supervisor;

pub use controller::{AdmissionController, AdmissionKind, ReleaseDecision, ReleasePolicy};
pub use handle::StudentHandle;
pub use metrics::{HallMetrics, HallMetricsSnapshot};
pub use queue::WaitingQueue;
pub use snapshot::HallSnapshot;
pub use student::{StudentActor, StudentOutcome, StudentState};
pub use supervisor::{SimulationOutcome, SimulationReport, Supervisor};

/// Ordinal identity of a student, assigned at creation.
pub type StudentId = usize;

/// Number of concurrent study slots.
pub const CAPACITY: usize = 8;

/// Smallest accepted population.
pub const MIN_POPULATION: usize = 20;

/// Largest accepted population.
pub const MAX_POPULATION: usize = 40;

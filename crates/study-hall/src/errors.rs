//! Study hall error types.
//!
//! Only invalid operator input is recoverable (the console re-prompts). Every
//! other error aborts the run: the supervisor cancels all students, joins them,
//! and hands the first error back to the caller.

use crate::hall::StudentId;
use thiserror::Error;

/// Study hall error type.
#[derive(Debug, Error)]
pub enum HallError {
    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Population size outside the supported range.
    #[error("Population {size} outside allowed range [{min},{max}]")]
    InvalidPopulation { size: usize, min: usize, max: usize },

    /// Operator input could not be read (stdin closed or unreadable).
    #[error("Input error: {0}")]
    Input(String),

    /// The admission protocol detected a broken invariant.
    #[error("Protocol violation: {0}")]
    Protocol(ProtocolViolation),

    /// A student task panicked or was aborted.
    #[error("Student {student_id} failed: {reason}")]
    StudentFailed { student_id: StudentId, reason: String },

    /// A student task did not stop within the shutdown timeout.
    #[error("Student {student_id} did not stop in time")]
    ShutdownTimeout { student_id: StudentId },

    /// Internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Broken admission-protocol invariants.
///
/// None of these can happen while the controller and queue invariants hold;
/// seeing one means the run is no longer trustworthy.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProtocolViolation {
    /// An admission was recorded with every slot taken.
    #[error("occupancy would exceed hall capacity")]
    CapacityExceeded,

    /// A student already holding a slot was admitted or queued again.
    #[error("student {student_id} admitted twice")]
    DoubleAdmission { student_id: StudentId },

    /// A departure was recorded for a student holding no slot.
    #[error("student {student_id} departed without occupying a slot")]
    NotOccupying { student_id: StudentId },

    /// A second grant arrived before the first was consumed.
    #[error("student {student_id} granted admission twice")]
    DuplicateGrant { student_id: StudentId },

    /// A student was enqueued while already queued.
    #[error("student {student_id} cannot join the waiting queue")]
    AlreadyQueued { student_id: StudentId },

    /// The waiting queue is full.
    #[error("waiting queue full, cannot enqueue student {student_id}")]
    QueueOverflow { student_id: StudentId },

    /// An admission claimed a grant the controller never issued.
    #[error("student {student_id} admitted without an outstanding grant")]
    GrantAccountingUnderflow { student_id: StudentId },
}

impl HallError {
    /// Whether the error must abort the simulation.
    ///
    /// Out-of-range population input is the only recoverable case.
    #[must_use]
    pub fn is_fatal(&self) -> bool {
        !matches!(self, HallError::InvalidPopulation { .. })
    }

    /// Process exit code reported by the binary for this error.
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        match self {
            HallError::Config(_) | HallError::InvalidPopulation { .. } => 2,
            HallError::Input(_) => 3,
            HallError::Protocol(_) => 4,
            HallError::StudentFailed { .. }
            | HallError::ShutdownTimeout { .. }
            | HallError::Internal(_) => 1,
        }
    }
}

impl From<ProtocolViolation> for HallError {
    fn from(err: ProtocolViolation) -> Self {
        HallError::Protocol(err)
    }
}

impl From<crate::config::ConfigError> for HallError {
    fn from(err: crate::config::ConfigError) -> Self {
        HallError::Config(err.to_string())
    }
}

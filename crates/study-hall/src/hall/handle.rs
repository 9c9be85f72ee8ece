//! Per-student admission signal.
//!
//! A zero-permit semaphore used as a one-shot event: `grant_admission` adds
//! the single permit, `await_admission` consumes it. Each student owns its
//! own signal, so a grant meant for one student can never wake another.

use crate::errors::{HallError, ProtocolViolation};
use crate::hall::StudentId;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::Semaphore;

/// Identity, occupancy flag and admission signal of one student.
#[derive(Debug)]
pub struct StudentHandle {
    id: StudentId,
    studying: AtomicBool,
    signal: Semaphore,
}

impl StudentHandle {
    /// Create a handle with no pending grant.
    #[must_use]
    pub fn new(id: StudentId) -> Arc<Self> {
        Arc::new(Self {
            id,
            studying: AtomicBool::new(false),
            signal: Semaphore::new(0),
        })
    }

    #[must_use]
    pub fn id(&self) -> StudentId {
        self.id
    }

    /// Whether the student currently occupies a slot.
    #[must_use]
    pub fn is_studying(&self) -> bool {
        self.studying.load(Ordering::SeqCst)
    }

    /// Only the student's own lifecycle flips this flag.
    pub(crate) fn set_studying(&self, studying: bool) {
        self.studying.store(studying, Ordering::SeqCst);
    }

    /// Whether a grant has been delivered but not yet consumed.
    #[must_use]
    pub fn has_pending_grant(&self) -> bool {
        self.signal.available_permits() > 0
    }

    /// Release the student waiting on this signal.
    ///
    /// The signal is binary: granting twice before the student consumes the
    /// first grant, or granting a student that is already studying, is a
    /// protocol violation.
    pub fn grant_admission(&self) -> Result<(), HallError> {
        if self.is_studying() {
            return Err(ProtocolViolation::DoubleAdmission {
                student_id: self.id,
            }
            .into());
        }
        if self.has_pending_grant() {
            return Err(ProtocolViolation::DuplicateGrant {
                student_id: self.id,
            }
            .into());
        }
        self.signal.add_permits(1);
        Ok(())
    }

    /// Suspend until a grant is available, then consume it.
    pub async fn await_admission(&self) -> Result<(), HallError> {
        let permit = self.signal.acquire().await.map_err(|_| {
            HallError::Internal(format!("admission signal for student {} closed", self.id))
        })?;
        permit.forget();
        Ok(())
    }

    /// Close the signal at teardown; pending and future waits fail.
    pub fn close(&self) {
        self.signal.close();
    }
}

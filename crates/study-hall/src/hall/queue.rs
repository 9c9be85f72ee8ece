//! Bounded FIFO of students waiting for a slot.

use crate::errors::{HallError, ProtocolViolation};
use crate::hall::{StudentHandle, StudentId};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Waiting queue, bounded to the population size.
///
/// All operations take the queue-wide lock; it is independent of the
/// controller lock, but when both are held the controller lock comes first.
#[derive(Debug)]
pub struct WaitingQueue {
    inner: Mutex<VecDeque<Arc<StudentHandle>>>,
    bound: usize,
}

impl WaitingQueue {
    #[must_use]
    pub fn new(bound: usize) -> Self {
        Self {
            inner: Mutex::new(VecDeque::with_capacity(bound)),
            bound,
        }
    }

    fn lock(&self) -> MutexGuard<'_, VecDeque<Arc<StudentHandle>>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Append a student to the tail.
    ///
    /// A student may be queued at most once and never while studying.
    pub fn enqueue(&self, student: Arc<StudentHandle>) -> Result<(), HallError> {
        let student_id = student.id();
        if student.is_studying() {
            return Err(ProtocolViolation::DoubleAdmission { student_id }.into());
        }

        let mut queue = self.lock();
        if queue.iter().any(|queued| queued.id() == student_id) {
            return Err(ProtocolViolation::AlreadyQueued { student_id }.into());
        }
        if queue.len() >= self.bound {
            return Err(ProtocolViolation::QueueOverflow { student_id }.into());
        }
        queue.push_back(student);
        Ok(())
    }

    /// Remove and return the head, or `None` if nobody is waiting.
    pub fn dequeue(&self) -> Option<Arc<StudentHandle>> {
        self.lock().pop_front()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Waiting student ids, head first.
    #[must_use]
    pub fn waiting_ids(&self) -> Vec<StudentId> {
        self.lock().iter().map(|student| student.id()).collect()
    }
}

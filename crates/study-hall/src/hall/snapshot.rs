//! Read-only view of the hall slots and the waiting queue.

use crate::hall::{StudentId, CAPACITY};
use serde::Serialize;
use std::fmt;

/// Slot occupants and waiting students at one instant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HallSnapshot {
    /// One entry per slot; `None` is an empty seat.
    pub slots: [Option<StudentId>; CAPACITY],
    /// Waiting students, head of the queue first.
    pub waiting: Vec<StudentId>,
}

impl HallSnapshot {
    #[must_use]
    pub fn empty() -> Self {
        Self {
            slots: [None; CAPACITY],
            waiting: Vec::new(),
        }
    }

    /// Number of occupied slots.
    #[must_use]
    pub fn occupancy(&self) -> usize {
        self.slots.iter().flatten().count()
    }

    /// Ids of current occupants in slot order.
    #[must_use]
    pub fn occupants(&self) -> Vec<StudentId> {
        self.slots.iter().flatten().copied().collect()
    }
}

impl fmt::Display for HallSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Study Hall: ")?;
        for slot in &self.slots {
            match slot {
                Some(id) => write!(f, " |{id}| ")?,
                None => write!(f, " | | ")?,
            }
        }
        writeln!(f)?;

        write!(f, "Waiting Area: ")?;
        if self.waiting.is_empty() {
            for _ in 0..CAPACITY {
                write!(f, " | | ")?;
            }
        } else {
            for id in &self.waiting {
                write!(f, " |{id}| ")?;
            }
        }
        writeln!(f)
    }
}

//! Study Hall Simulation Library
//!
//! A fixed-capacity study hall shared by a population of students, each
//! running as its own task:
//!
//! - Up to `CAPACITY` students study at once
//! - Everyone else waits in a FIFO queue
//! - Each departure decides whether to admit one waiting student, a whole
//!   batch after a full drain, nobody, or to end the simulation
//!
//! # Architecture
//!
//! ```text
//! main
//! ├── Config (environment)
//! ├── PopulationSource (stdin prompt unless configured)
//! └── Supervisor
//!     ├── AdmissionController + WaitingQueue (shared hall state)
//!     └── StudentActor x N
//! ```
//!
//! # Modules
//!
//! - [`config`] - Simulation configuration from environment
//! - [`console`] - Population input and snapshot rendering collaborators
//! - [`errors`] - Error types and exit codes
//! - [`hall`] - Admission protocol, student lifecycle and supervision

pub mod config;
pub mod console;
pub mod errors;
pub mod hall;

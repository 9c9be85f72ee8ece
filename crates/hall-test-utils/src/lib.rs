//! # Hall Test Utilities
//!
//! Shared fixtures for exercising the study hall simulation without a
//! terminal.
//!
//! ## Modules
//!
//! - `fixtures` - Config builder with deterministic, fast settings
//! - `population` - Scripted `PopulationSource`
//! - `renderer` - `SnapshotRenderer` that records every snapshot
//! - `assertions` - Hall invariant checks over recorded snapshots
//!
//! ## Usage
//!
//! ```rust,ignore
//! use hall_test_utils::*;
//!
//! #[tokio::test(start_paused = true)]
//! async fn test_example() {
//!     let renderer = RecordingRenderer::new();
//!     let supervisor = Supervisor::new(TestConfig::new().build(), renderer.clone());
//!     let report = supervisor.run(20).await.unwrap();
//!     assert_capacity_respected(&renderer.snapshots());
//! }
//! ```

pub mod assertions;
pub mod fixtures;
pub mod population;
pub mod renderer;

pub use assertions::*;
pub use fixtures::*;
pub use population::*;
pub use renderer::*;

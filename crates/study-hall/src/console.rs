//! Console collaborators: population input and snapshot output.
//!
//! The admission protocol only sees the two traits here. The console
//! implementations are generic over their streams so tests can drive them
//! with in-memory buffers.

use crate::errors::HallError;
use crate::hall::{HallSnapshot, MAX_POPULATION, MIN_POPULATION};
use std::io::{self, BufRead, Write};
use std::sync::{Mutex, PoisonError};
use tracing::warn;

/// Source of the operator-supplied population size.
pub trait PopulationSource {
    /// Return a population size within `[MIN_POPULATION, MAX_POPULATION]`.
    fn read_population_size(&mut self) -> Result<usize, HallError>;
}

/// Sink for hall snapshots. Rendering must not affect the protocol.
pub trait SnapshotRenderer: Send + Sync {
    fn render_snapshot(&self, snapshot: &HallSnapshot);
}

/// Check a population size against the supported range.
pub fn validate_population(size: usize) -> Result<usize, HallError> {
    if (MIN_POPULATION..=MAX_POPULATION).contains(&size) {
        Ok(size)
    } else {
        Err(HallError::InvalidPopulation {
            size,
            min: MIN_POPULATION,
            max: MAX_POPULATION,
        })
    }
}

/// Interactive prompt that re-asks until it gets an in-range number.
pub struct ConsolePopulation<R, W> {
    input: R,
    output: W,
}

impl ConsolePopulation<io::StdinLock<'static>, io::Stdout> {
    /// Prompt on stdout, read from stdin.
    #[must_use]
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> ConsolePopulation<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    fn prompt(&mut self) -> Result<(), HallError> {
        write!(self.output, "Enter total number of students: ")
            .and_then(|()| self.output.flush())
            .map_err(|e| HallError::Input(format!("failed to write prompt: {e}")))
    }
}

impl<R: BufRead, W: Write> PopulationSource for ConsolePopulation<R, W> {
    fn read_population_size(&mut self) -> Result<usize, HallError> {
        loop {
            self.prompt()?;

            let mut line = String::new();
            let read = self
                .input
                .read_line(&mut line)
                .map_err(|e| HallError::Input(format!("failed to read population: {e}")))?;
            if read == 0 {
                return Err(HallError::Input(
                    "input closed before a population was entered".to_string(),
                ));
            }

            let parsed = line.trim().parse::<usize>().map_err(|_| {
                HallError::InvalidPopulation {
                    size: 0,
                    min: MIN_POPULATION,
                    max: MAX_POPULATION,
                }
            });

            match parsed.and_then(validate_population) {
                Ok(size) => return Ok(size),
                Err(e) if !e.is_fatal() => {
                    writeln!(
                        self.output,
                        "Total number of students must be in range [{MIN_POPULATION},{MAX_POPULATION}]"
                    )
                    .map_err(|e| HallError::Input(format!("failed to write prompt: {e}")))?;
                }
                Err(e) => return Err(e),
            }
        }
    }
}

/// Writes snapshots to a stream under its own print lock.
pub struct ConsoleRenderer<W> {
    output: Mutex<W>,
}

impl ConsoleRenderer<io::Stdout> {
    #[must_use]
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> ConsoleRenderer<W> {
    pub fn new(output: W) -> Self {
        Self {
            output: Mutex::new(output),
        }
    }

    /// Recover the underlying stream.
    pub fn into_inner(self) -> W {
        self.output
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl<W: Write + Send> SnapshotRenderer for ConsoleRenderer<W> {
    fn render_snapshot(&self, snapshot: &HallSnapshot) {
        let mut output = self.output.lock().unwrap_or_else(PoisonError::into_inner);
        // Output is cosmetic; a broken stream must not stop the simulation.
        if let Err(e) = writeln!(output, "\n{snapshot}").and_then(|()| output.flush()) {
            warn!(target: "study_hall.console", error = %e, "Failed to render snapshot");
        }
    }
}

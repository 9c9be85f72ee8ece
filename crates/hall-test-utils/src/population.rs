//! Scripted population input.

use std::collections::VecDeque;
use study_hall::console::{validate_population, PopulationSource};
use study_hall::errors::HallError;

/// Answers population prompts from a fixed script.
///
/// Out-of-range answers are skipped the way the console re-prompts; running
/// out of answers is an input error, like a closed stdin.
#[derive(Debug, Clone)]
pub struct ScriptedPopulation {
    answers: VecDeque<usize>,
    rejected: Vec<usize>,
}

impl ScriptedPopulation {
    pub fn new(answers: impl IntoIterator<Item = usize>) -> Self {
        Self {
            answers: answers.into_iter().collect(),
            rejected: Vec::new(),
        }
    }

    /// Answers that were refused before the accepted one.
    #[must_use]
    pub fn rejected(&self) -> &[usize] {
        &self.rejected
    }
}

impl PopulationSource for ScriptedPopulation {
    fn read_population_size(&mut self) -> Result<usize, HallError> {
        while let Some(answer) = self.answers.pop_front() {
            match validate_population(answer) {
                Ok(size) => return Ok(size),
                Err(e) if !e.is_fatal() => self.rejected.push(answer),
                Err(e) => return Err(e),
            }
        }
        Err(HallError::Input("script exhausted".to_string()))
    }
}

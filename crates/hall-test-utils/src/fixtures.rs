//! Config fixtures for simulation tests.

use study_hall::config::Config;

/// Seed used when a test does not pick its own.
pub const TEST_SEED: u64 = 0x5eed;

/// Builder for a deterministic `Config`.
///
/// Defaults to the production timings with a fixed seed and sim id, so
/// runs under a paused clock are reproducible.
#[derive(Debug, Clone)]
pub struct TestConfig {
    config: Config,
}

impl TestConfig {
    #[must_use]
    pub fn new() -> Self {
        Self {
            config: Config {
                seed: Some(TEST_SEED),
                sim_id: "hall-test".to_string(),
                ..Config::default()
            },
        }
    }

    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.config.seed = Some(seed);
        self
    }

    #[must_use]
    pub fn with_study_seconds(mut self, min: u64, max: u64) -> Self {
        self.config.min_study_seconds = min;
        self.config.max_study_seconds = max;
        self
    }

    #[must_use]
    pub fn with_release_pacing_ms(mut self, millis: u64) -> Self {
        self.config.release_pacing_ms = millis;
        self
    }

    #[must_use]
    pub fn with_arrival_pacing_ms(mut self, millis: u64) -> Self {
        self.config.arrival_pacing_ms = millis;
        self
    }

    #[must_use]
    pub fn with_population(mut self, population: usize) -> Self {
        self.config.population = Some(population);
        self
    }

    #[must_use]
    pub fn build(self) -> Config {
        self.config
    }
}

impl Default for TestConfig {
    fn default() -> Self {
        Self::new()
    }
}

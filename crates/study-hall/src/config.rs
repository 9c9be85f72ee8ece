//! Study hall configuration.
//!
//! Configuration is loaded from environment variables. Everything has a
//! default except the population size, which falls back to an interactive
//! prompt when unset.

use crate::hall::{MAX_POPULATION, MIN_POPULATION};
use std::collections::HashMap;
use std::env;
use std::time::Duration;
use thiserror::Error;

/// Default lower bound of a study session, in seconds.
pub const DEFAULT_MIN_STUDY_SECONDS: u64 = 5;

/// Default upper bound of a study session, in seconds.
pub const DEFAULT_MAX_STUDY_SECONDS: u64 = 15;

/// Default delay between successive grants of a batch release.
pub const DEFAULT_RELEASE_PACING_MS: u64 = 100;

/// Default delay between successive student arrivals.
pub const DEFAULT_ARRIVAL_PACING_MS: u64 = 100;

/// Default per-student join timeout at teardown.
pub const DEFAULT_SHUTDOWN_TIMEOUT_SECONDS: u64 = 30;

/// Default simulation ID prefix.
pub const DEFAULT_SIM_ID_PREFIX: &str = "hall";

/// Study hall configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Population size, if supplied non-interactively.
    pub population: Option<usize>,

    /// Shortest study session in seconds (default: 5).
    pub min_study_seconds: u64,

    /// Longest study session in seconds (default: 15).
    pub max_study_seconds: u64,

    /// Pause between grants during a batch release (default: 100ms).
    pub release_pacing_ms: u64,

    /// Pause between student arrivals (default: 100ms).
    pub arrival_pacing_ms: u64,

    /// Seed for study durations. `None` draws from OS entropy.
    pub seed: Option<u64>,

    /// How long the supervisor waits for each student at teardown.
    pub shutdown_timeout_seconds: u64,

    /// Identifier attached to log output for this run.
    pub sim_id: String,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid configuration value: {0}")]
    InvalidValue(String),
}

impl Default for Config {
    fn default() -> Self {
        Self {
            population: None,
            min_study_seconds: DEFAULT_MIN_STUDY_SECONDS,
            max_study_seconds: DEFAULT_MAX_STUDY_SECONDS,
            release_pacing_ms: DEFAULT_RELEASE_PACING_MS,
            arrival_pacing_ms: DEFAULT_ARRIVAL_PACING_MS,
            seed: None,
            shutdown_timeout_seconds: DEFAULT_SHUTDOWN_TIMEOUT_SECONDS,
            sim_id: generate_sim_id(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(&env::vars().collect())
    }

    /// Load configuration from a `HashMap` (for testing).
    pub fn from_vars(vars: &HashMap<String, String>) -> Result<Self, ConfigError> {
        let population = parse_optional::<usize>(vars, "STUDY_HALL_POPULATION")?;
        if let Some(size) = population {
            if !(MIN_POPULATION..=MAX_POPULATION).contains(&size) {
                return Err(ConfigError::InvalidValue(format!(
                    "STUDY_HALL_POPULATION must be in [{MIN_POPULATION},{MAX_POPULATION}], got {size}"
                )));
            }
        }

        let min_study_seconds = parse_optional(vars, "STUDY_HALL_MIN_STUDY_SECONDS")?
            .unwrap_or(DEFAULT_MIN_STUDY_SECONDS);

        let max_study_seconds = parse_optional(vars, "STUDY_HALL_MAX_STUDY_SECONDS")?
            .unwrap_or(DEFAULT_MAX_STUDY_SECONDS);

        if min_study_seconds > max_study_seconds {
            return Err(ConfigError::InvalidValue(format!(
                "STUDY_HALL_MIN_STUDY_SECONDS ({min_study_seconds}) exceeds \
                 STUDY_HALL_MAX_STUDY_SECONDS ({max_study_seconds})"
            )));
        }

        let release_pacing_ms = parse_optional(vars, "STUDY_HALL_RELEASE_PACING_MS")?
            .unwrap_or(DEFAULT_RELEASE_PACING_MS);

        let arrival_pacing_ms = parse_optional(vars, "STUDY_HALL_ARRIVAL_PACING_MS")?
            .unwrap_or(DEFAULT_ARRIVAL_PACING_MS);

        let seed = parse_optional(vars, "STUDY_HALL_SEED")?;

        let shutdown_timeout_seconds = parse_optional(vars, "STUDY_HALL_SHUTDOWN_TIMEOUT_SECONDS")?
            .unwrap_or(DEFAULT_SHUTDOWN_TIMEOUT_SECONDS);

        let sim_id = vars
            .get("STUDY_HALL_SIM_ID")
            .cloned()
            .unwrap_or_else(generate_sim_id);

        Ok(Config {
            population,
            min_study_seconds,
            max_study_seconds,
            release_pacing_ms,
            arrival_pacing_ms,
            seed,
            shutdown_timeout_seconds,
            sim_id,
        })
    }

    #[must_use]
    pub fn release_pacing(&self) -> Duration {
        Duration::from_millis(self.release_pacing_ms)
    }

    #[must_use]
    pub fn arrival_pacing(&self) -> Duration {
        Duration::from_millis(self.arrival_pacing_ms)
    }

    #[must_use]
    pub fn shutdown_timeout(&self) -> Duration {
        Duration::from_secs(self.shutdown_timeout_seconds)
    }
}

/// Parse an optional variable; present-but-malformed is an error.
fn parse_optional<T: std::str::FromStr>(
    vars: &HashMap<String, String>,
    key: &str,
) -> Result<Option<T>, ConfigError> {
    match vars.get(key) {
        None => Ok(None),
        Some(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::InvalidValue(format!("{key}={raw:?} is not a valid value"))),
    }
}

fn generate_sim_id() -> String {
    let uuid_suffix = uuid::Uuid::new_v4().simple().to_string();
    let short_suffix = uuid_suffix.get(..8).unwrap_or("00000000");
    format!("{DEFAULT_SIM_ID_PREFIX}-{short_suffix}")
}

use std::time::Duration;

use lander_brain::Topology;
use lander_training::{DEFAULT_MUTATION_RATE, DEFAULT_TOURNAMENT_SIZE};
use serde::{Deserialize, Serialize};

use crate::{INPUT_SIZE, OUTPUT_SIZE};

pub const DEFAULT_HIDDEN_LAYERS: [usize; 1] = [16];
pub const DEFAULT_POPULATION_SIZE: usize = 20;
pub const DEFAULT_GENERATION_INTERVAL_MS: u64 = 20_000;

/// Deployment parameters of an [`Autopilot`](crate::Autopilot).
///
/// Every field has a default, so a configuration file only needs the fields it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AutopilotConfig {
    /// Network layout; must have [`INPUT_SIZE`] inputs and [`OUTPUT_SIZE`] outputs
    pub topology: Topology,
    /// Number of individuals, one per ship
    pub population_size: usize,
    pub tournament_size: usize,
    /// Per-gene mutation probability when the population is doing fine
    pub mutation_rate: f64,
    /// Wall-clock length of one generation, driven by the host
    pub generation_interval_ms: u64,
    /// Fitness added once when a ship lands
    pub landing_reward: f64,
    /// Ships above this altitude are penalized and respawned
    pub altitude_ceiling: f64,
    pub out_of_bounds_penalty: f64,
    /// Fitness above which an individual counts as a success
    pub success_threshold: f64,
    /// Raise the mutation rate when at most one individual succeeds
    pub adaptive_mutation: bool,
}

impl AutopilotConfig {
    #[must_use]
    pub fn generation_interval(&self) -> Duration {
        Duration::from_millis(self.generation_interval_ms)
    }
}

impl Default for AutopilotConfig {
    fn default() -> Self {
        Self {
            topology: Topology::new(INPUT_SIZE, DEFAULT_HIDDEN_LAYERS.to_vec(), OUTPUT_SIZE)
                .expect("default topology has non-empty layers"),
            population_size: DEFAULT_POPULATION_SIZE,
            tournament_size: DEFAULT_TOURNAMENT_SIZE,
            mutation_rate: DEFAULT_MUTATION_RATE,
            generation_interval_ms: DEFAULT_GENERATION_INTERVAL_MS,
            landing_reward: 10.0,
            altitude_ceiling: 1000.0,
            out_of_bounds_penalty: 1.0,
            success_threshold: 5.0,
            adaptive_mutation: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_file_keeps_defaults() {
        let config: AutopilotConfig = serde_json::from_str(
            r#"{"topology": {"inputs": 7, "hidden": [16, 8], "outputs": 3}, "population_size": 10}"#,
        )
        .unwrap();
        assert_eq!(config.topology.hidden(), &[16, 8]);
        assert_eq!(config.population_size, 10);
        assert_eq!(config.tournament_size, 5);
        assert_eq!(config.mutation_rate, 0.015);
        assert_eq!(config.generation_interval(), Duration::from_secs(20));
    }

    #[test]
    fn rejects_unknown_fields() {
        assert!(serde_json::from_str::<AutopilotConfig>(r#"{"populaton_size": 10}"#).is_err());
    }

    #[test]
    fn default_roundtrips_through_json() {
        let config = AutopilotConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        assert_eq!(serde_json::from_str::<AutopilotConfig>(&json).unwrap(), config);
    }
}

use lander_brain::NeuralNetwork;
use lander_stats::descriptive::DescriptiveStats;
use lander_training::{GeneticAlgorithm, GeneticSystem, Population, PopulationError};
use rand::Rng;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::{
    AutopilotConfig, AutopilotError, DecodedOutput, INPUT_SIZE, LanderAction, LanderStatus,
    NormalizedInput, OUTPUT_SIZE, Telemetry,
};

/// What the controller last observed for a ship, so terminal events score once.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum PilotState {
    #[default]
    Alive,
    Crashed,
    Landed,
}

/// Result of one tick for one ship.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TickOutcome {
    pub action: LanderAction,
    /// The ship left the playfield and should be put back at its spawn point.
    pub respawn: bool,
}

/// Summary of a finished generation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenerationReport {
    pub generation: usize,
    pub fitness: DescriptiveStats,
    pub best_fitness: f64,
    /// Individuals whose fitness exceeded the success threshold
    pub successes: usize,
    /// Difficulty level after this generation
    pub level: usize,
    pub leveled_up: bool,
    /// Mutation rate used to breed the next generation
    pub mutation_rate: f64,
}

/// Owns the population and one network per ship, and drives both through ticks and
/// generation boundaries.
#[derive(Debug, Clone)]
pub struct Autopilot {
    config: AutopilotConfig,
    algorithm: GeneticAlgorithm,
    population: Population,
    networks: Vec<NeuralNetwork>,
    pilots: Vec<PilotState>,
    generation: usize,
    level: usize,
}

impl Autopilot {
    /// Creates generation 0 with random chromosomes.
    ///
    /// # Errors
    ///
    /// Fails when the topology does not map telemetry to actions, the population
    /// size is 0, or the tournament size or mutation rate is out of range.
    pub fn new<R>(config: AutopilotConfig, rng: &mut R) -> Result<Self, AutopilotError>
    where
        R: Rng + ?Sized,
    {
        let topology = &config.topology;
        if topology.inputs() != INPUT_SIZE || topology.outputs() != OUTPUT_SIZE {
            return Err(AutopilotError::TopologyMismatch {
                inputs: topology.inputs(),
                outputs: topology.outputs(),
            });
        }
        let population = Population::random(topology.clone(), config.population_size, rng)?;
        let algorithm = GeneticAlgorithm {
            tournament_size: config.tournament_size,
            mutation_rate: config.mutation_rate,
        };
        algorithm.validate(population.size())?;

        let networks = build_networks(&population)?;
        let pilots = vec![PilotState::Alive; population.size()];
        info!(
            population = population.size(),
            genes = population.gene_len(),
            hidden = ?population.topology().hidden(),
            "autopilot initialized"
        );

        Ok(Self {
            config,
            algorithm,
            population,
            networks,
            pilots,
            generation: 0,
            level: 0,
        })
    }

    #[must_use]
    pub fn config(&self) -> &AutopilotConfig {
        &self.config
    }

    #[must_use]
    pub fn population(&self) -> &Population {
        &self.population
    }

    #[must_use]
    pub fn size(&self) -> usize {
        self.population.size()
    }

    /// Index of the generation currently flying.
    #[must_use]
    pub fn generation(&self) -> usize {
        self.generation
    }

    /// Difficulty level, raised when more than half the population succeeds.
    #[must_use]
    pub fn level(&self) -> usize {
        self.level
    }

    /// Mutation rate that will be used at the next boundary unless adapted.
    #[must_use]
    pub fn mutation_rate(&self) -> f64 {
        self.algorithm.mutation_rate
    }

    #[must_use]
    pub fn pilot_state(&self, index: usize) -> Option<PilotState> {
        self.pilots.get(index).copied()
    }

    #[must_use]
    pub fn fitness(&self, index: usize) -> Option<f64> {
        self.population
            .genetic_system(index)
            .map(GeneticSystem::fitness)
    }

    /// Scores status changes for ship `index` and returns its next action.
    ///
    /// # Arguments
    ///
    /// * `index` - Slot of the ship, stable across generations
    /// * `telemetry` - The ship's state for this tick
    ///
    /// # Returns
    ///
    /// The action to apply, and whether the host should respawn the ship
    pub fn on_tick(
        &mut self,
        index: usize,
        telemetry: &Telemetry,
    ) -> Result<TickOutcome, AutopilotError> {
        telemetry.validate()?;
        let size = self.population.size();
        let system = self
            .population
            .genetic_system_mut(index)
            .ok_or(AutopilotError::UnknownPilot { index, size })?;
        let pilot = &mut self.pilots[index];
        let input = NormalizedInput::from_telemetry(telemetry);

        match telemetry.status {
            LanderStatus::Alive if !pilot.is_alive() => {
                debug!(index, "pilot respawned");
                *pilot = PilotState::Alive;
            }
            LanderStatus::Dead if pilot.is_alive() => {
                system.add_score(-input.vx - input.vy);
                system.add_score(-input.angle);
                debug!(index, fitness = system.fitness(), "pilot crashed");
                *pilot = PilotState::Crashed;
            }
            LanderStatus::Landed if pilot.is_alive() => {
                system.add_score(self.config.landing_reward);
                debug!(index, fitness = system.fitness(), "pilot landed");
                *pilot = PilotState::Landed;
            }
            _ => {}
        }

        let respawn = telemetry.altitude > self.config.altitude_ceiling;
        if respawn {
            system.add_score(-self.config.out_of_bounds_penalty);
            warn!(index, altitude = telemetry.altitude, "pilot out of bounds");
        }

        let raw = self.networks[index].evaluate(&input.to_array())?;
        let action = DecodedOutput::decode(&raw)?.into_action();
        Ok(TickOutcome { action, respawn })
    }

    /// Runs [`Autopilot::on_tick`] for every ship, in slot order.
    ///
    /// The whole batch is validated first; on error no ship is scored.
    pub fn on_tick_all(
        &mut self,
        telemetry: &[Telemetry],
    ) -> Result<Vec<TickOutcome>, AutopilotError> {
        if telemetry.len() != self.size() {
            return Err(AutopilotError::TelemetryCountMismatch {
                expected: self.size(),
                actual: telemetry.len(),
            });
        }
        telemetry.iter().try_for_each(Telemetry::validate)?;
        telemetry
            .iter()
            .enumerate()
            .map(|(index, t)| self.on_tick(index, t))
            .collect()
    }

    /// Ends the current generation: breeds the next population, rebuilds every
    /// network and resets all scores.
    pub fn on_generation_boundary<R>(&mut self, rng: &mut R) -> Result<GenerationReport, AutopilotError>
    where
        R: Rng + ?Sized,
    {
        let fitness = DescriptiveStats::new(self.population.iter().map(GeneticSystem::fitness))
            .ok_or(PopulationError::Empty)?;
        let best_fitness = self.population.fittest().fitness();
        let successes = self
            .population
            .iter()
            .filter(|gs| gs.fitness() > self.config.success_threshold)
            .count();
        info!(
            generation = self.generation,
            best_fitness,
            mean_fitness = fitness.mean,
            successes,
            "generation finished"
        );

        let leveled_up = successes * 2 > self.size();
        if leveled_up {
            self.level += 1;
            info!(level = self.level, "level up");
        }

        if self.config.adaptive_mutation {
            let rate = adapted_mutation_rate(self.config.mutation_rate, successes, self.size());
            if rate != self.algorithm.mutation_rate {
                debug!(from = self.algorithm.mutation_rate, to = rate, "mutation rate adjusted");
            }
            self.algorithm.mutation_rate = rate;
        }

        let mut population = self.algorithm.evolve(&self.population, rng)?;
        population.reset_scores();
        self.networks = build_networks(&population)?;
        self.population = population;
        self.pilots.fill(PilotState::Alive);

        let report = GenerationReport {
            generation: self.generation,
            fitness,
            best_fitness,
            successes,
            level: self.level,
            leveled_up,
            mutation_rate: self.algorithm.mutation_rate,
        };
        self.generation += 1;
        Ok(report)
    }
}

/// Mutation rate for the next generation.
///
/// When at most one individual succeeded the rate becomes
/// `(1 - successes / size) / 4`, otherwise it falls back to `base`.
#[must_use]
pub fn adapted_mutation_rate(base: f64, successes: usize, size: usize) -> f64 {
    if successes <= 1 {
        #[expect(clippy::cast_precision_loss)]
        let ratio = successes as f64 / size as f64;
        (1.0 - ratio) / 4.0
    } else {
        base
    }
}

fn build_networks(population: &Population) -> Result<Vec<NeuralNetwork>, AutopilotError> {
    population
        .iter()
        .map(|gs| NeuralNetwork::from_genes(population.topology().clone(), gs.genes()))
        .collect::<Result<_, _>>()
        .map_err(AutopilotError::from)
}

#[cfg(test)]
mod tests {
    use lander_brain::Topology;
    use lander_training::EvolveError;
    use rand::SeedableRng as _;
    use rand_pcg::Pcg32;

    use super::*;
    use crate::TelemetryError;

    fn config(population_size: usize) -> AutopilotConfig {
        AutopilotConfig {
            population_size,
            tournament_size: 2,
            ..AutopilotConfig::default()
        }
    }

    fn flying(status: LanderStatus) -> Telemetry {
        Telemetry {
            vx: 40.0,
            vy: -40.0,
            angle: 10.0,
            altitude: 100.0,
            used_fuel: 0.0,
            status,
        }
    }

    fn autopilot(population_size: usize, seed: u64) -> (Autopilot, Pcg32) {
        let mut rng = Pcg32::seed_from_u64(seed);
        let autopilot = Autopilot::new(config(population_size), &mut rng).unwrap();
        (autopilot, rng)
    }

    #[test]
    fn new_builds_one_network_per_individual() {
        let (autopilot, _) = autopilot(6, 1);
        assert_eq!(autopilot.size(), 6);
        assert_eq!(autopilot.generation(), 0);
        assert_eq!(autopilot.level(), 0);
        for i in 0..6 {
            assert_eq!(autopilot.pilot_state(i), Some(PilotState::Alive));
            assert_eq!(autopilot.fitness(i), Some(0.0));
            assert_eq!(
                autopilot.networks[i].genes(),
                autopilot.population().genetic_system(i).unwrap().genes()
            );
        }
    }

    #[test]
    fn new_rejects_bad_configuration() {
        let mut rng = Pcg32::seed_from_u64(2);
        let wrong_io = AutopilotConfig {
            topology: Topology::new(5, vec![4], 3).unwrap(),
            ..config(4)
        };
        assert_eq!(
            Autopilot::new(wrong_io, &mut rng).unwrap_err(),
            AutopilotError::TopologyMismatch {
                inputs: 5,
                outputs: 3,
            }
        );
        assert_eq!(
            Autopilot::new(config(0), &mut rng).unwrap_err(),
            AutopilotError::Population(PopulationError::Empty)
        );
        let big_tournament = AutopilotConfig {
            tournament_size: 5,
            ..config(3)
        };
        assert!(matches!(
            Autopilot::new(big_tournament, &mut rng),
            Err(AutopilotError::Evolve(EvolveError::TournamentTooLarge { .. }))
        ));
    }

    #[test]
    fn crash_is_penalized_once() {
        let (mut autopilot, _) = autopilot(4, 3);
        autopilot.on_tick(1, &flying(LanderStatus::Alive)).unwrap();
        autopilot.on_tick(1, &flying(LanderStatus::Dead)).unwrap();
        // -(0.5 + 0.5) - 0.5
        assert_eq!(autopilot.fitness(1), Some(-1.5));
        assert_eq!(autopilot.pilot_state(1), Some(PilotState::Crashed));

        autopilot.on_tick(1, &flying(LanderStatus::Dead)).unwrap();
        assert_eq!(autopilot.fitness(1), Some(-1.5));
        assert_eq!(autopilot.fitness(0), Some(0.0));
    }

    #[test]
    fn landing_is_rewarded_once_per_life() {
        let (mut autopilot, _) = autopilot(4, 4);
        autopilot.on_tick(2, &flying(LanderStatus::Landed)).unwrap();
        autopilot.on_tick(2, &flying(LanderStatus::Landed)).unwrap();
        assert_eq!(autopilot.fitness(2), Some(10.0));

        // respawned by the simulation, then lands again
        autopilot.on_tick(2, &flying(LanderStatus::Alive)).unwrap();
        assert_eq!(autopilot.pilot_state(2), Some(PilotState::Alive));
        autopilot.on_tick(2, &flying(LanderStatus::Landed)).unwrap();
        assert_eq!(autopilot.fitness(2), Some(20.0));
    }

    #[test]
    fn out_of_bounds_is_penalized_and_respawned() {
        let (mut autopilot, _) = autopilot(4, 5);
        let high = Telemetry {
            altitude: 1500.0,
            ..flying(LanderStatus::Alive)
        };
        let outcome = autopilot.on_tick(0, &high).unwrap();
        assert!(outcome.respawn);
        assert_eq!(autopilot.fitness(0), Some(-1.0));

        let outcome = autopilot.on_tick(0, &flying(LanderStatus::Alive)).unwrap();
        assert!(!outcome.respawn);
    }

    #[test]
    fn tick_action_follows_the_network() {
        let (mut autopilot, _) = autopilot(4, 6);
        let telemetry = flying(LanderStatus::Alive);
        let input = NormalizedInput::from_telemetry(&telemetry).to_array();
        let raw = autopilot.networks[3].clone().evaluate(&input).unwrap();
        let expected = DecodedOutput::decode(&raw).unwrap().into_action();

        let outcome = autopilot.on_tick(3, &telemetry).unwrap();
        assert_eq!(outcome.action, expected);
        assert_eq!(autopilot.on_tick(3, &telemetry).unwrap(), outcome);
    }

    #[test]
    fn tick_rejects_unknown_pilot_and_bad_telemetry() {
        let (mut autopilot, _) = autopilot(4, 7);
        assert_eq!(
            autopilot.on_tick(4, &flying(LanderStatus::Alive)),
            Err(AutopilotError::UnknownPilot { index: 4, size: 4 })
        );
        let broken = Telemetry {
            vy: f64::NAN,
            ..flying(LanderStatus::Dead)
        };
        assert_eq!(
            autopilot.on_tick(0, &broken),
            Err(AutopilotError::Telemetry(TelemetryError::NonFinite {
                field: "vy"
            }))
        );
        assert_eq!(autopilot.fitness(0), Some(0.0));
    }

    #[test]
    fn tick_all_requires_one_record_per_ship() {
        let (mut autopilot, _) = autopilot(3, 8);
        let outcomes = autopilot
            .on_tick_all(&[flying(LanderStatus::Alive); 3])
            .unwrap();
        assert_eq!(outcomes.len(), 3);
        assert_eq!(
            autopilot.on_tick_all(&[flying(LanderStatus::Alive); 2]),
            Err(AutopilotError::TelemetryCountMismatch {
                expected: 3,
                actual: 2,
            })
        );
    }

    #[test]
    fn rejected_batch_leaves_scores_untouched() {
        let (mut autopilot, _) = autopilot(6, 12);
        let mut batch = [flying(LanderStatus::Dead); 6];
        batch[3].vy = f64::NAN;

        assert_eq!(
            autopilot.on_tick_all(&batch),
            Err(AutopilotError::Telemetry(TelemetryError::NonFinite { field: "vy" }))
        );
        for index in 0..6 {
            assert_eq!(autopilot.fitness(index), Some(0.0));
            assert_eq!(autopilot.pilot_state(index), Some(PilotState::Alive));
        }
    }

    #[test]
    fn generation_boundary_breeds_and_resets() {
        let (mut autopilot, mut rng) = autopilot(4, 9);
        autopilot.on_tick(0, &flying(LanderStatus::Dead)).unwrap();
        autopilot.on_tick(2, &flying(LanderStatus::Landed)).unwrap();
        let best_genes = autopilot.population().genetic_system(2).unwrap().genes().to_vec();

        let report = autopilot.on_generation_boundary(&mut rng).unwrap();

        assert_eq!(report.generation, 0);
        assert_eq!(report.best_fitness, 10.0);
        assert_eq!(report.successes, 1);
        assert_eq!(report.fitness.count, 4);
        assert!(!report.leveled_up);
        assert_eq!(autopilot.generation(), 1);
        assert_eq!(autopilot.population().genetic_system(0).unwrap().genes(), best_genes);
        for i in 0..4 {
            assert_eq!(autopilot.fitness(i), Some(0.0));
            assert_eq!(autopilot.pilot_state(i), Some(PilotState::Alive));
            assert_eq!(
                autopilot.networks[i].genes(),
                autopilot.population().genetic_system(i).unwrap().genes()
            );
        }
    }

    #[test]
    fn mutation_rate_rises_when_few_succeed() {
        let (mut autopilot, mut rng) = autopilot(4, 10);
        let report = autopilot.on_generation_boundary(&mut rng).unwrap();
        assert_eq!(report.successes, 0);
        assert_eq!(report.mutation_rate, 0.25);

        for i in 0..2 {
            autopilot.on_tick(i, &flying(LanderStatus::Landed)).unwrap();
        }
        let report = autopilot.on_generation_boundary(&mut rng).unwrap();
        assert_eq!(report.successes, 2);
        assert_eq!(report.mutation_rate, 0.015);
    }

    #[test]
    fn level_rises_when_most_succeed() {
        let (mut autopilot, mut rng) = autopilot(4, 11);
        for i in 0..3 {
            autopilot.on_tick(i, &flying(LanderStatus::Landed)).unwrap();
        }
        let report = autopilot.on_generation_boundary(&mut rng).unwrap();
        assert!(report.leveled_up);
        assert_eq!(report.level, 1);
        assert_eq!(autopilot.level(), 1);
    }

    #[test]
    fn adapted_rate_formula() {
        assert_eq!(adapted_mutation_rate(0.015, 0, 10), 0.25);
        assert_eq!(adapted_mutation_rate(0.015, 1, 10), 0.225);
        assert_eq!(adapted_mutation_rate(0.015, 2, 10), 0.015);
    }
}

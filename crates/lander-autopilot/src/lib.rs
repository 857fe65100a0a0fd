//! Neural autopilot for lunar landers.
//!
//! The host simulation owns the physics. Once per tick it hands the [`Autopilot`] one
//! [`Telemetry`] record per ship and receives one [`LanderAction`] back:
//!
//! ```text
//! Telemetry → NormalizedInput → NeuralNetwork::evaluate → DecodedOutput → LanderAction
//! ```
//!
//! Once per generation interval the host calls
//! [`Autopilot::on_generation_boundary`], which scores the population, breeds the next
//! one and rebuilds every ship's network.

use lander_brain::BrainError;
use lander_training::{EvolveError, PopulationError};

pub use self::{config::*, controller::*, input::*, output::*, telemetry::*};

pub mod config;
pub mod controller;
pub mod input;
pub mod output;
pub mod telemetry;

#[derive(Debug, Clone, PartialEq, derive_more::Display, derive_more::Error, derive_more::From)]
pub enum AutopilotError {
    #[display("no pilot in slot {index}, population has {size}")]
    UnknownPilot { index: usize, size: usize },
    #[display("expected telemetry for {expected} ships, got {actual}")]
    TelemetryCountMismatch { expected: usize, actual: usize },
    #[display(
        "autopilot needs a {}-input, {}-output topology, got {inputs} and {outputs}",
        INPUT_SIZE,
        OUTPUT_SIZE
    )]
    TopologyMismatch { inputs: usize, outputs: usize },
    #[display("network produced {actual} outputs, expected {}", OUTPUT_SIZE)]
    OutputSizeMismatch { actual: usize },
    #[display("invalid telemetry: {_0}")]
    #[from]
    Telemetry(TelemetryError),
    #[display("network error: {_0}")]
    #[from]
    Brain(BrainError),
    #[display("population error: {_0}")]
    #[from]
    Population(PopulationError),
    #[display("evolution error: {_0}")]
    #[from]
    Evolve(EvolveError),
}

//! Statistical summaries for autopilot training.
//!
//! The training loop reports how the fitness of a population is distributed at each
//! generation boundary. This crate keeps that arithmetic out of the controller.
//!
//! # Examples
//!
//! ```
//! use lander_stats::descriptive::DescriptiveStats;
//!
//! let values = [1.0, 2.0, 3.0, 4.0, 5.0];
//! let stats = DescriptiveStats::new(values).unwrap();
//! assert_eq!(stats.mean, 3.0);
//! ```

pub mod descriptive;

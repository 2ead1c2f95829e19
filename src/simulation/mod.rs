//! Simulation control
//!
//! # Overview
//!
//! - **SimulationDriver**: spawns one thread per agent and gathers their reports
//! - **CancellationToken**: cooperative stop signal with a wakeable inter-tick wait
//! - **RunSummary**: per-agent reports and run totals
//! - **SimulationError**: error types and the recovery policy
//! - **LoggingConfig**: tracing subscriber setup
//!
//! # Usage Example
//!
//! ```rust
//! use geo_walk_simulator::agent::AgentProfileGenerator;
//! use geo_walk_simulator::geometry::{Point, Region, RegionSampler};
//! use geo_walk_simulator::simulation::*;
//! use geo_walk_simulator::sink::CollectingSink;
//! use geo_walk_simulator::types::SimulationConfig;
//! use std::sync::Arc;
//!
//! let config = SimulationConfig {
//!     device_count: 5,
//!     offline: true,
//!     tick_interval_ms: 0,
//!     seed: Some(1),
//!     max_ticks: Some(3),
//!     ..Default::default()
//! };
//!
//! let region = Arc::new(Region::rectangle(Point::new(0.0, 0.0), Point::new(10.0, 10.0)).unwrap());
//! let profiles = AgentProfileGenerator::with_seed(1).generate(config.device_count, &config.floor);
//! let seeds = RegionSampler::with_seed(1).sample(&region, profiles.len()).unwrap();
//!
//! let sink = Arc::new(CollectingSink::new());
//! let driver = SimulationDriver::new(&config, sink.clone());
//! let summary = driver.run(profiles, seeds, region, CancellationToken::new()).unwrap();
//!
//! assert_eq!(sink.len() as u64, summary.total_ticks());
//! ```

pub mod cancellation;
pub mod driver;
pub mod error;
pub mod logging;
pub mod statistics;

// Re-export all public types for convenience
pub use cancellation::*;
pub use driver::*;
pub use error::*;
pub use logging::*;
pub use statistics::*;

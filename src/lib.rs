//! Geo Walk Simulator
//!
//! Simulates a fleet of geo-located assets (taxis, visitor taxis) that random-walk
//! inside a polygonal region and report their position as JSON location events,
//! for exercising a real-time geospatial ingestion pipeline without real devices.
//!
//! # Overview
//!
//! Every asset is an independent agent on its own OS thread. Once per tick it
//! advances a step counter that drives its status, takes a fixed-length step along
//! its heading (turning away from the boundary until the step lands inside the
//! region), emits an event and drifts its heading for the next tick.
//!
//! ## Key Features
//!
//! - **Polygon Regions**: GeoJSON polygons and multipolygons with holes
//! - **Uniform Seeding**: rejection sampling inside the region
//! - **Boundary Containment**: an agent is never observed outside its region
//! - **Status Cycling**: periodic normal/alert status per category vocabulary
//! - **Pluggable Sinks**: HTTP receiver, offline log, per-agent CSV tracks
//! - **Prompt Shutdown**: Ctrl-C wakes every agent out of its inter-tick wait
//!
//! ## Quick Start
//!
//! ```rust
//! use geo_walk_simulator::*;
//! use std::sync::Arc;
//!
//! let config = SimulationConfig {
//!     device_count: 10,
//!     offline: true,
//!     tick_interval_ms: 0,
//!     max_ticks: Some(5),
//!     seed: Some(42),
//!     ..Default::default()
//! };
//! config.validate()?;
//!
//! let region = Arc::new(Region::default_square());
//! let profiles = AgentProfileGenerator::with_seed(42).generate(config.device_count, &config.floor);
//! let seeds = RegionSampler::with_seed(42).sample(&region, profiles.len())?;
//!
//! let sink = Arc::new(CollectingSink::new());
//! let summary = SimulationDriver::new(&config, sink.clone())
//!     .run(profiles, seeds, region, CancellationToken::new())?;
//!
//! assert_eq!(summary.agent_count(), 4);
//! assert_eq!(sink.len(), 20);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Module Organization
//!
//! - [`types`]: Identifiers, enums and configuration
//! - [`geometry`]: Regions, GeoJSON loading and seed sampling
//! - [`agent`]: Profiles, status cycling and the walk state machine
//! - [`events`]: Location event wire type and builder
//! - [`sink`]: Event delivery
//! - [`simulation`]: Driver, cancellation, statistics, errors and logging
#![warn(missing_docs, missing_debug_implementations, unreachable_pub)]

pub mod agent;
pub mod events;
pub mod geometry;
pub mod simulation;
pub mod sink;
pub mod types;

// Core types and identifiers
pub use types::{
    AssetCategory, CliArgs, ConfigError, ConfigValidationError, DeviceKind, ObjectId,
    SimulationConfig,
};

// Geometry
pub use geometry::{Point, Region, RegionLoader, RegionSampler};

// Agents
pub use agent::{AgentProfile, AgentProfileGenerator, StatusPhase, WalkAgent};

// Events
pub use events::{EventBuilder, LocationEvent};

// Sinks
pub use sink::{build_sink, CollectingSink, EventSink, HttpSink, LogSink, SinkError, TrackRecorder};

// Simulation
pub use simulation::{
    AgentOutcome, AgentReport, CancellationToken, LoggingConfig, RunSummary, SimulationDriver,
    SimulationError, SimulationResult,
};

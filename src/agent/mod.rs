//! Simulated assets: profiles, status phases and the random walk
//!
//! # Overview
//!
//! - **AgentProfile**: static descriptor (category, device, status vocabulary, floor)
//! - **AgentProfileGenerator**: splits a requested device count into profiles
//! - **StatusPhase / StepCounter**: counter-driven normal/alert cycle
//! - **WalkAgent**: position and heading, advanced one tick at a time inside a region
//!
//! # Usage Example
//!
//! ```rust
//! use std::sync::Arc;
//! use geo_walk_simulator::agent::*;
//! use geo_walk_simulator::geometry::{Point, Region};
//! use geo_walk_simulator::sink::CollectingSink;
//!
//! let region = Arc::new(Region::default_square());
//! let profiles = AgentProfileGenerator::with_seed(1).generate(10, "1");
//! let mut agent = WalkAgent::with_seed(profiles[0].clone(), Point::new(50.0, 50.0), region, 1).unwrap();
//!
//! let sink = CollectingSink::new();
//! let outcome = agent.tick(&sink).unwrap();
//! assert!(outcome.delivered);
//! ```

pub mod generator;
pub mod profile;
pub mod status;
pub mod walk;

pub use generator::{AgentProfileGenerator, ProfileStats};
pub use profile::AgentProfile;
pub use status::{StatusPhase, StepCounter};
pub use walk::{AgentSnapshot, TickOutcome, WalkAgent};

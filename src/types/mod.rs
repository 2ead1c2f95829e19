//! Core types and identifiers for the walk simulator
//!
//! This module contains fundamental types, identifiers, and configuration structures
//! used throughout the simulation system.
//!
//! # Overview
//!
//! - **Identifiers**: UUID-based identity for every simulated asset
//! - **Enums**: Asset categories and device kinds
//! - **Configuration**: Simulation configuration with validation and CLI support
//!
//! # Usage Example
//!
//! ```rust
//! use geo_walk_simulator::types::*;
//!
//! let object_id = ObjectId::new();
//! let category = AssetCategory::Taxi;
//! assert_eq!(category.status_vocabulary()[0], "free");
//!
//! let config = SimulationConfig {
//!     device_count: 10,
//!     offline: true,
//!     ..Default::default()
//! };
//! assert!(config.validate().is_ok());
//! # let _ = object_id;
//! ```

pub mod config;
pub mod enums;
pub mod identifiers;

// Re-export all public types for convenience
pub use config::*;
pub use enums::*;
pub use identifiers::*;

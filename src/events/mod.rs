//! Location events and their construction
//!
//! # Overview
//!
//! - **LocationEvent**: immutable position report in the receiver's wire shape
//! - **EventBuilder**: pure conversion of profile + agent snapshot + time into an event
//!
//! # Usage Example
//!
//! ```rust
//! use chrono::Utc;
//! use geo_walk_simulator::agent::{AgentProfile, AgentSnapshot, StatusPhase};
//! use geo_walk_simulator::events::*;
//! use geo_walk_simulator::geometry::Point;
//! use geo_walk_simulator::types::*;
//!
//! let profile = AgentProfile::new(AssetCategory::Taxi, DeviceKind::Android, "1", 3857);
//! let snapshot = AgentSnapshot {
//!     object_id: ObjectId::new(),
//!     position: Point::new(1.0, 2.0),
//!     phase: StatusPhase::Normal,
//!     step_counter: 3,
//!     accuracy: 1,
//! };
//!
//! let event = EventBuilder::build(&profile, &snapshot, Utc::now());
//! assert_eq!(event.status, "free");
//! ```

pub mod builder;
pub mod location_event;

// Re-export all public types for convenience
pub use builder::*;
pub use location_event::*;

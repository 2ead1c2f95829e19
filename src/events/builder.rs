//! Event construction
//!
//! [`EventBuilder::build`] is a pure function of its inputs. The random accuracy
//! draw happens in the agent and arrives through the snapshot.

use chrono::{DateTime, Utc};

use crate::agent::{AgentProfile, AgentSnapshot};
use crate::events::{EventGeometry, LocationEvent, SpatialReference};

/// Timestamp layout expected by the receiver (naive UTC, microseconds)
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.6f";

/// Builds location events from agent state
#[derive(Debug, Default, Clone, Copy)]
pub struct EventBuilder;

impl EventBuilder {
    /// Combine a profile, a post-move snapshot and a capture time into an event
    pub fn build(profile: &AgentProfile, snapshot: &AgentSnapshot, timestamp: DateTime<Utc>) -> LocationEvent {
        let position = snapshot.position;
        LocationEvent {
            geometry: EventGeometry {
                x: position.x,
                y: position.y,
                z: profile.floor.clone(),
                spatial_reference: SpatialReference { wkid: profile.spatial_reference_id },
            },
            device: profile.device_kind,
            object_id: snapshot.object_id,
            object_desc: profile.category,
            lat: position.x,
            lon: position.y,
            status: profile.status(snapshot.phase).to_string(),
            accuracy: snapshot.accuracy,
            timerecordstamp: Self::format_timestamp(timestamp),
        }
    }

    /// Render a capture time in the receiver's timestamp layout
    pub fn format_timestamp(timestamp: DateTime<Utc>) -> String {
        timestamp.format(TIMESTAMP_FORMAT).to_string()
    }
}

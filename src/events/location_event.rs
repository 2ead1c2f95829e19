//! Location events in the receiver's wire shape
//!
//! Field names and order match what the geospatial receiver expects:
//!
//! ```text
//! {"geometry": {"x", "y", "z", "spatialReference": {"wkid"}},
//!  "device", "objectId", "objectDesc", "lat", "lon", "status", "accuracy", "timerecordstamp"}
//! ```

use serde::{Deserialize, Serialize};

use crate::types::{AssetCategory, DeviceKind, ObjectId};

/// Coordinate system of an event geometry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpatialReference {
    /// Well-known id of the coordinate system
    pub wkid: u32,
}

/// Point geometry of an event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventGeometry {
    /// First coordinate
    pub x: f64,
    /// Second coordinate
    pub y: f64,
    /// Floor identifier
    pub z: String,
    /// Coordinate system
    #[serde(rename = "spatialReference")]
    pub spatial_reference: SpatialReference,
}

/// One emitted position report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationEvent {
    /// Position and coordinate system
    pub geometry: EventGeometry,
    /// Reporting device kind
    pub device: DeviceKind,
    /// Stable per-agent identity
    pub object_id: ObjectId,
    /// Asset category
    pub object_desc: AssetCategory,
    /// First coordinate, duplicated from the geometry
    pub lat: f64,
    /// Second coordinate, duplicated from the geometry
    pub lon: f64,
    /// Status string for the agent's current phase
    pub status: String,
    /// Reported accuracy
    pub accuracy: u32,
    /// UTC capture time, ISO-8601 without offset
    pub timerecordstamp: String,
}

impl LocationEvent {
    /// Serialize to the compact JSON body sent to the receiver
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

//! Static per-asset descriptors

use serde::{Deserialize, Serialize};

use crate::agent::StatusPhase;
use crate::types::{AssetCategory, DeviceKind};

/// Static descriptor of one simulated asset
///
/// Created once at simulation start and owned by the agent that walks it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentProfile {
    /// Asset category, reported as `objectDesc`
    pub category: AssetCategory,
    /// Device kind, reported as `device`
    pub device_kind: DeviceKind,
    /// Status strings indexed by [`StatusPhase::index`]
    pub status_vocabulary: [String; 2],
    /// Floor identifier, reported as `geometry.z`
    pub floor: String,
    /// Spatial reference id, reported as `geometry.spatialReference.wkid`
    pub spatial_reference_id: u32,
}

impl AgentProfile {
    /// Create a profile with the category's standard status vocabulary
    pub fn new(
        category: AssetCategory,
        device_kind: DeviceKind,
        floor: impl Into<String>,
        spatial_reference_id: u32,
    ) -> Self {
        let [normal, alert] = category.status_vocabulary();
        Self {
            category,
            device_kind,
            status_vocabulary: [normal.to_string(), alert.to_string()],
            floor: floor.into(),
            spatial_reference_id,
        }
    }

    /// Status string for a phase
    pub fn status(&self, phase: StatusPhase) -> &str {
        &self.status_vocabulary[phase.index()]
    }
}

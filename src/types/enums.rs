//! Enumeration types for the walk simulator
//!
//! This module contains the asset categories and device kinds that make up an
//! agent's static descriptor.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Category of simulated asset, reported as `objectDesc`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssetCategory {
    /// Fleet taxi
    Taxi,
    /// Taxi hired by a visitor
    VisitorTaxi,
}

impl AssetCategory {
    /// All categories in generation order
    pub const ALL: [AssetCategory; 2] = [AssetCategory::Taxi, AssetCategory::VisitorTaxi];

    /// Wire name of the category
    pub fn as_str(&self) -> &'static str {
        match self {
            AssetCategory::Taxi => "taxi",
            AssetCategory::VisitorTaxi => "visitor_taxi",
        }
    }

    /// Share of the requested device count assigned to this category, in percent
    pub fn share_percent(&self) -> usize {
        match self {
            AssetCategory::Taxi => 20,
            AssetCategory::VisitorTaxi => 20,
        }
    }

    /// Status strings indexed by status phase (normal, alert)
    pub fn status_vocabulary(&self) -> [&'static str; 2] {
        match self {
            AssetCategory::Taxi => ["free", "occupied"],
            AssetCategory::VisitorTaxi => ["ok", "free"],
        }
    }
}

impl fmt::Display for AssetCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for AssetCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "taxi" => Ok(AssetCategory::Taxi),
            "visitor_taxi" | "visitor taxi" | "visitortaxi" => Ok(AssetCategory::VisitorTaxi),
            _ => Err(format!("Unknown asset category: {}", s)),
        }
    }
}

/// Kind of device reporting the position, reported as `device`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceKind {
    /// Android handset
    Android,
    /// iOS handset
    Ios,
}

impl DeviceKind {
    /// All device kinds an agent can be assigned
    pub const ALL: [DeviceKind; 2] = [DeviceKind::Android, DeviceKind::Ios];

    /// Wire name of the device kind
    pub fn as_str(&self) -> &'static str {
        match self {
            DeviceKind::Android => "android",
            DeviceKind::Ios => "ios",
        }
    }
}

impl fmt::Display for DeviceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for DeviceKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "android" => Ok(DeviceKind::Android),
            "ios" => Ok(DeviceKind::Ios),
            _ => Err(format!("Unknown device kind: {}", s)),
        }
    }
}

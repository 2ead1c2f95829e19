//! Error types and handling
//!
//! This module contains error types for the simulation and the policy that decides
//! how far an error reaches: a failed delivery only costs one event, a stuck agent
//! only stops itself, and anything raised before agents start aborts the run.

use thiserror::Error;
use tracing::{error, info, warn};

use crate::types::{ConfigError, ConfigValidationError, ObjectId};

/// Errors that can occur during simulation
#[derive(Debug, Error)]
pub enum SimulationError {
    /// Configuration validation failed
    #[error("Configuration validation failed: {0}")]
    ConfigurationError(String),

    /// Region has no parts
    #[error("Region is empty")]
    EmptyRegion,

    /// Region exists but has no usable area
    #[error("Region is degenerate: {0}")]
    DegenerateRegion(String),

    /// Region could not be loaded from its source
    #[error("Failed to load region: {0}")]
    RegionLoad(String),

    /// Profiles and seed positions do not pair up
    #[error("Profile count ({profiles}) does not match seed position count ({seeds})")]
    CountMismatch {
        /// Number of profiles supplied
        profiles: usize,
        /// Number of seed positions supplied
        seeds: usize,
    },

    /// Seed sampling gave up
    #[error("Region could not be sampled: no point found after {attempts} attempts")]
    UnsamplableRegion {
        /// Draws spent on the point that failed
        attempts: usize,
    },

    /// Agent found no in-region step
    #[error("Agent {object_id} is stuck: no step inside the region after {attempts} attempts")]
    Stuck {
        /// Agent that got stuck
        object_id: ObjectId,
        /// Turn-and-retry attempts spent
        attempts: usize,
    },

    /// Event delivery failed
    #[error("Event delivery failed: {0}")]
    EmissionError(String),

    /// Agent thread could not be started or died
    #[error("Agent failure: {0}")]
    AgentFailure(String),

    /// I/O error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

impl From<ConfigValidationError> for SimulationError {
    fn from(error: ConfigValidationError) -> Self {
        SimulationError::ConfigurationError(error.to_string())
    }
}

impl From<ConfigError> for SimulationError {
    fn from(error: ConfigError) -> Self {
        SimulationError::ConfigurationError(error.to_string())
    }
}

impl SimulationError {
    /// Create a configuration error
    pub fn configuration_error(msg: impl Into<String>) -> Self {
        Self::ConfigurationError(msg.into())
    }

    /// Create a region loading error
    pub fn region_load(msg: impl Into<String>) -> Self {
        Self::RegionLoad(msg.into())
    }

    /// Create an emission error
    pub fn emission_error(msg: impl Into<String>) -> Self {
        Self::EmissionError(msg.into())
    }

    /// Create an agent failure
    pub fn agent_failure(msg: impl Into<String>) -> Self {
        Self::AgentFailure(msg.into())
    }

    /// Check if the simulation as a whole can carry on after this error
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            SimulationError::EmissionError(_)
                | SimulationError::Stuck { .. }
                | SimulationError::AgentFailure(_)
        )
    }

    /// Get the error category
    pub fn category(&self) -> &'static str {
        match self {
            SimulationError::ConfigurationError(_) | SimulationError::CountMismatch { .. } => {
                "Configuration"
            }
            SimulationError::EmptyRegion
            | SimulationError::DegenerateRegion(_)
            | SimulationError::RegionLoad(_) => "Region",
            SimulationError::UnsamplableRegion { .. } => "Sampling",
            SimulationError::Stuck { .. } => "Movement",
            SimulationError::EmissionError(_) => "Emission",
            SimulationError::AgentFailure(_) => "Agent",
            SimulationError::IoError(_) => "IO",
            SimulationError::SerializationError(_) => "Serialization",
        }
    }
}

/// Result type for simulation operations
pub type SimulationResult<T> = Result<T, SimulationError>;

/// What happens after an error inside a running simulation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecoveryStrategy {
    /// Drop the failed operation and keep the agent walking
    Continue,
    /// Stop the affected agent; siblings are untouched
    StopAgent,
    /// Abort the entire simulation
    Abort,
}

/// Error handler applying the isolation policy
#[derive(Debug, Clone, Default)]
pub struct ErrorHandler;

impl ErrorHandler {
    /// Create a new error handler
    pub fn new() -> Self {
        Self
    }

    /// Log the error and decide how far it reaches
    pub fn handle_error(&self, error: &SimulationError) -> RecoveryStrategy {
        match error {
            SimulationError::EmissionError(_) => {
                warn!(category = error.category(), "{}", error);
                RecoveryStrategy::Continue
            }
            SimulationError::Stuck { .. } | SimulationError::AgentFailure(_) => {
                error!(category = error.category(), "{}", error);
                info!("Stopping affected agent only; other agents keep running");
                RecoveryStrategy::StopAgent
            }
            _ => {
                error!(category = error.category(), "Critical error: {}", error);
                RecoveryStrategy::Abort
            }
        }
    }
}

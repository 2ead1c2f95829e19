//! Event emission sinks
//!
//! Agents hand every event to an [`EventSink`]. Delivery is fire-and-forget: a
//! failure is reported back to the agent, which logs it and keeps walking.
//!
//! # Overview
//!
//! - **HttpSink**: POSTs the JSON body to a receiver with a bounded timeout
//! - **LogSink**: logs each event (offline mode)
//! - **TrackRecorder**: appends each position to a per-agent CSV for plotting
//! - **CompositeSink**: forwards to several sinks
//! - **CollectingSink**: keeps events in memory
//!
//! [`build_sink`] assembles the sink stack described by a [`SimulationConfig`].

pub mod composite;
pub mod http;
pub mod log;
pub mod memory;
pub mod track;

pub use composite::CompositeSink;
pub use http::HttpSink;
pub use log::LogSink;
pub use memory::CollectingSink;
pub use track::{TrackRecorder, TrackRow};

use std::sync::Arc;
use thiserror::Error;
use tracing::info;

use crate::events::LocationEvent;
use crate::simulation::{SimulationError, SimulationResult};
use crate::types::SimulationConfig;

/// Destination for emitted events
///
/// Implementations are shared by every agent thread and must not hold a
/// cross-agent lock while waiting on I/O.
pub trait EventSink: Send + Sync {
    /// Deliver one event
    fn deliver(&self, event: &LocationEvent) -> Result<(), SinkError>;

    /// Short name used in logs
    fn name(&self) -> &'static str;
}

/// Errors raised while delivering an event
#[derive(Debug, Error)]
pub enum SinkError {
    /// Transport failure (connect, timeout, ...)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Receiver answered with a non-success status
    #[error("receiver rejected event with status {status}")]
    Rejected {
        /// HTTP status code
        status: u16,
    },

    /// Local file error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Event could not be serialized
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Track file could not be written or holds a malformed row
    #[error("Track file error: {0}")]
    Track(#[from] csv::Error),

    /// One or more sinks of a composite failed
    #[error("{failed} of {total} sinks failed: {first}")]
    Partial {
        /// Number of failing sinks
        failed: usize,
        /// Number of sinks tried
        total: usize,
        /// First failure message
        first: String,
    },
}

/// Build the sink stack for a configuration
///
/// Online mode posts to the endpoint; offline mode logs events instead. A track
/// directory adds a [`TrackRecorder`] in either mode.
pub fn build_sink(config: &SimulationConfig) -> SimulationResult<Arc<dyn EventSink>> {
    let mut sinks: Vec<Arc<dyn EventSink>> = Vec::new();

    if config.offline {
        info!("Offline mode: events are logged, not delivered");
        sinks.push(Arc::new(LogSink::new()));
    } else {
        let endpoint = config
            .endpoint
            .as_deref()
            .ok_or_else(|| SimulationError::configuration_error("endpoint required in online mode"))?;
        let http = HttpSink::new(endpoint, config.request_timeout())
            .map_err(|e| SimulationError::configuration_error(format!("failed to build HTTP client: {}", e)))?;
        info!("Delivering events to {}", endpoint);
        sinks.push(Arc::new(http));
    }

    if let Some(directory) = &config.track_output {
        sinks.push(Arc::new(TrackRecorder::new(directory)?));
        info!("Recording agent tracks under {}", directory);
    }

    if sinks.len() == 1 {
        Ok(sinks.remove(0))
    } else {
        Ok(Arc::new(CompositeSink::new(sinks)))
    }
}

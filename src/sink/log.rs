//! Offline sink that logs events instead of delivering them

use tracing::info;

use crate::events::LocationEvent;
use crate::sink::{EventSink, SinkError};

/// Logs every event as JSON at INFO under the `events` target
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

impl LogSink {
    /// Create a new log sink
    pub fn new() -> Self {
        Self
    }
}

impl EventSink for LogSink {
    fn deliver(&self, event: &LocationEvent) -> Result<(), SinkError> {
        let body = event.to_json()?;
        info!(target: "events", object_id = %event.object_id, "{}", body);
        Ok(())
    }

    fn name(&self) -> &'static str {
        "log"
    }
}

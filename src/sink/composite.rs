//! Fan-out to several sinks

use std::fmt;
use std::sync::Arc;

use crate::events::LocationEvent;
use crate::sink::{EventSink, SinkError};

/// Delivers every event to each inner sink
///
/// All sinks are tried even when an earlier one fails; the failures are folded
/// into a single [`SinkError::Partial`].
pub struct CompositeSink {
    sinks: Vec<Arc<dyn EventSink>>,
}

impl fmt::Debug for CompositeSink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.sinks.iter().map(|s| s.name()).collect();
        f.debug_struct("CompositeSink").field("sinks", &names).finish()
    }
}

impl CompositeSink {
    /// Create a composite over `sinks`
    pub fn new(sinks: Vec<Arc<dyn EventSink>>) -> Self {
        Self { sinks }
    }

    /// Number of inner sinks
    pub fn len(&self) -> usize {
        self.sinks.len()
    }

    /// Whether there are no inner sinks
    pub fn is_empty(&self) -> bool {
        self.sinks.is_empty()
    }
}

impl EventSink for CompositeSink {
    fn deliver(&self, event: &LocationEvent) -> Result<(), SinkError> {
        let failures: Vec<String> = self
            .sinks
            .iter()
            .filter_map(|sink| sink.deliver(event).err().map(|e| format!("{}: {}", sink.name(), e)))
            .collect();

        match failures.first() {
            None => Ok(()),
            Some(first) => Err(SinkError::Partial {
                failed: failures.len(),
                total: self.sinks.len(),
                first: first.clone(),
            }),
        }
    }

    fn name(&self) -> &'static str {
        "composite"
    }
}

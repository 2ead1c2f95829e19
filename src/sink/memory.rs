//! In-memory sink

use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::events::LocationEvent;
use crate::sink::{EventSink, SinkError};
use crate::types::ObjectId;

/// Keeps every delivered event in memory
#[derive(Debug, Default)]
pub struct CollectingSink {
    events: Mutex<Vec<LocationEvent>>,
}

impl CollectingSink {
    /// Create an empty sink
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<LocationEvent>> {
        self.events.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Copy of every event received so far
    pub fn events(&self) -> Vec<LocationEvent> {
        self.lock().clone()
    }

    /// Events emitted by one agent, in delivery order
    pub fn events_for(&self, object_id: ObjectId) -> Vec<LocationEvent> {
        self.lock().iter().filter(|e| e.object_id == object_id).cloned().collect()
    }

    /// Number of events received
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Whether nothing has been received
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }
}

impl EventSink for CollectingSink {
    fn deliver(&self, event: &LocationEvent) -> Result<(), SinkError> {
        self.lock().push(event.clone());
        Ok(())
    }

    fn name(&self) -> &'static str {
        "memory"
    }
}

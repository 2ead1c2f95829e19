//! HTTP delivery to a JSON receiver

use reqwest::blocking::Client;
use std::time::Duration;
use tracing::debug;

use crate::events::LocationEvent;
use crate::sink::{EventSink, SinkError};

/// POSTs each event as a JSON body
///
/// The client is shared by all agents; each request is bounded by the configured
/// timeout so a slow receiver only delays the agent that is waiting on it.
#[derive(Debug, Clone)]
pub struct HttpSink {
    client: Client,
    endpoint: String,
}

impl HttpSink {
    /// Create a sink posting to `endpoint`
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self, SinkError> {
        let client = Client::builder().timeout(timeout).connect_timeout(timeout).build()?;
        Ok(Self { client, endpoint: endpoint.into() })
    }

    /// Receiver URL
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl EventSink for HttpSink {
    fn deliver(&self, event: &LocationEvent) -> Result<(), SinkError> {
        let response = self.client.post(&self.endpoint).json(event).send()?;

        let status = response.status();
        if !status.is_success() {
            return Err(SinkError::Rejected { status: status.as_u16() });
        }

        debug!(object_id = %event.object_id, status = status.as_u16(), "Event delivered");
        Ok(())
    }

    fn name(&self) -> &'static str {
        "http"
    }
}

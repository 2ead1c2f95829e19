//! Per-agent track files for visual inspection
//!
//! Every agent gets `<directory>/<objectId>.csv` with an `x,y,timerecordstamp`
//! header. Files are opened in append mode per event, so agents never contend
//! for a shared handle.

use csv::{ReaderBuilder, WriterBuilder};
use serde::{Deserialize, Serialize};
use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};

use crate::events::LocationEvent;
use crate::simulation::SimulationResult;
use crate::sink::{EventSink, SinkError};
use crate::types::ObjectId;

/// One row of a track file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackRow {
    /// First coordinate
    pub x: f64,
    /// Second coordinate
    pub y: f64,
    /// Event timestamp, as sent on the wire
    pub timerecordstamp: String,
}

impl From<&LocationEvent> for TrackRow {
    fn from(event: &LocationEvent) -> Self {
        Self {
            x: event.lat,
            y: event.lon,
            timerecordstamp: event.timerecordstamp.clone(),
        }
    }
}

/// Appends each event's position to its agent's CSV track
#[derive(Debug, Clone)]
pub struct TrackRecorder {
    directory: PathBuf,
}

impl TrackRecorder {
    /// Create a recorder, creating the directory if needed
    pub fn new(directory: impl AsRef<Path>) -> SimulationResult<Self> {
        let directory = directory.as_ref().to_path_buf();
        fs::create_dir_all(&directory)?;
        Ok(Self { directory })
    }

    /// Track file for one agent
    pub fn track_path(&self, object_id: ObjectId) -> PathBuf {
        self.directory.join(format!("{}.csv", object_id))
    }

    /// Read back every row of an agent's track
    ///
    /// A malformed row fails the whole read.
    pub fn read_rows(&self, object_id: ObjectId) -> Result<Vec<TrackRow>, SinkError> {
        let mut reader = ReaderBuilder::new().from_path(self.track_path(object_id))?;
        let rows = reader.deserialize().collect::<Result<Vec<TrackRow>, _>>()?;
        Ok(rows)
    }

    /// Read back an agent's track as `(x, y)` pairs
    pub fn read_track(&self, object_id: ObjectId) -> Result<Vec<(f64, f64)>, SinkError> {
        Ok(self
            .read_rows(object_id)?
            .into_iter()
            .map(|row| (row.x, row.y))
            .collect())
    }
}

impl EventSink for TrackRecorder {
    fn deliver(&self, event: &LocationEvent) -> Result<(), SinkError> {
        let path = self.track_path(event.object_id);
        let is_new = !path.exists();

        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        let mut writer = WriterBuilder::new().has_headers(is_new).from_writer(file);
        writer.serialize(TrackRow::from(event))?;
        writer.flush()?;
        Ok(())
    }

    fn name(&self) -> &'static str {
        "track"
    }
}

use std::fs;
use std::path::PathBuf;
use trafficwatch_domain::repositories::traffic_events::{
    decode_traffic_events, SourceError, TrafficEvent, TrafficEventSource,
};

/// Reads a saved `traffic-events` response from disk.
pub struct JsonFileEventSource {
    path: PathBuf,
}

impl JsonFileEventSource {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

impl TrafficEventSource for JsonFileEventSource {
    fn load_events(&self) -> Result<Vec<TrafficEvent>, SourceError> {
        let contents = fs::read_to_string(&self.path).map_err(|err| {
            SourceError::Unavailable(format!("failed to read {}: {err}", self.path.display()))
        })?;
        let payload: serde_json::Value = serde_json::from_str(&contents).map_err(|err| {
            SourceError::InvalidData(format!("failed to parse {}: {err}", self.path.display()))
        })?;
        decode_traffic_events(&payload).map_err(SourceError::InvalidData)
    }
}

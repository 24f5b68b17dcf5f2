use serde::{Deserialize, Serialize};

/// An incident reported by the traffic-events feed. Coordinates arrive as
/// strings (`coordX` = longitude, `coordY` = latitude).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrafficEvent {
    pub event_type: String,
    #[serde(default)]
    pub event_detail_type: String,
    #[serde(default)]
    pub start_date: String,
    pub coord_x: String,
    pub coord_y: String,
}

/// Map pin for an event; clicking it opens the CCTV viewer at `(lat, lng)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapMarker {
    pub lat: f64,
    pub lng: f64,
    pub event_type: String,
    pub event_detail_type: String,
}

impl TrafficEvent {
    pub fn marker(&self) -> Result<MapMarker, String> {
        let lat = parse_coord(&self.coord_y, "coordY")?;
        let lng = parse_coord(&self.coord_x, "coordX")?;
        Ok(MapMarker {
            lat,
            lng,
            event_type: self.event_type.clone(),
            event_detail_type: self.event_detail_type.clone(),
        })
    }
}

fn parse_coord(raw: &str, field: &str) -> Result<f64, String> {
    let value: f64 = raw
        .trim()
        .parse()
        .map_err(|_| format!("invalid {field}: {raw:?}"))?;
    if !value.is_finite() {
        return Err(format!("invalid {field}: {raw:?}"));
    }
    Ok(value)
}

/// Accepts either a bare array of events or an object with an `events` array.
pub fn decode_traffic_events(payload: &serde_json::Value) -> Result<Vec<TrafficEvent>, String> {
    let list = match payload {
        serde_json::Value::Array(_) => payload,
        serde_json::Value::Object(map) => match map.get("events") {
            Some(events @ serde_json::Value::Array(_)) => events,
            _ => {
                return Err(
                    "unexpected traffic-events response: missing `events` array".to_string(),
                )
            }
        },
        _ => return Err("unexpected traffic-events response: not an array or object".to_string()),
    };
    serde_json::from_value(list.clone())
        .map_err(|err| format!("failed to decode traffic events: {err}"))
}

#[derive(Debug, Clone, PartialEq)]
pub enum SourceError {
    Unavailable(String),
    InvalidData(String),
}

impl std::fmt::Display for SourceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SourceError::Unavailable(msg) => write!(f, "unavailable: {msg}"),
            SourceError::InvalidData(msg) => write!(f, "invalid data: {msg}"),
        }
    }
}

impl std::error::Error for SourceError {}

pub trait TrafficEventSource {
    fn load_events(&self) -> Result<Vec<TrafficEvent>, SourceError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn event(x: &str, y: &str) -> serde_json::Value {
        json!({
            "eventType": "accident",
            "eventDetailType": "collision",
            "startDate": "20240518101500",
            "coordX": x,
            "coordY": y
        })
    }

    #[test]
    fn decodes_bare_array() {
        let events = decode_traffic_events(&json!([event("127.0", "37.5")])).expect("events");
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].event_detail_type, "collision");
    }

    #[test]
    fn decodes_wrapped_array() {
        let payload = json!({ "events": [event("127.0", "37.5"), event("126.9", "35.1")] });
        let events = decode_traffic_events(&payload).expect("events");
        assert_eq!(events.len(), 2);
    }

    #[test]
    fn rejects_unexpected_shapes() {
        assert!(decode_traffic_events(&json!({ "items": [] })).is_err());
        assert!(decode_traffic_events(&json!("nope")).is_err());
    }

    #[test]
    fn marker_swaps_x_and_y_into_lng_and_lat() {
        let events = decode_traffic_events(&json!([event("127.25", " 36.5 ")])).unwrap();
        let marker = events[0].marker().expect("marker");
        assert_eq!(marker.lat, 36.5);
        assert_eq!(marker.lng, 127.25);
    }

    #[test]
    fn unparsable_coordinates_give_no_marker() {
        let events = decode_traffic_events(&json!([event("east", "37.5")])).unwrap();
        let err = events[0].marker().expect_err("bad coordX");
        assert!(err.contains("coordX"));
    }
}

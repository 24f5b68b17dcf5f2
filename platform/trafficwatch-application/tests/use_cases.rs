use chrono::NaiveDate;
use std::cell::Cell;
use trafficwatch_application::config::{default_config, load_config, to_toml_pretty};
use trafficwatch_application::dashboard::query::{DashboardQuery, ViewMode};
use trafficwatch_application::dashboard::{build_snapshot, load_events_or_empty, SnapshotRequest};
use trafficwatch_domain::entities::region_risk::RiskCategory;
use trafficwatch_domain::repositories::traffic_events::{
    SourceError, TrafficEvent, TrafficEventSource,
};

struct FakeEventSource {
    events: Vec<TrafficEvent>,
    calls: Cell<usize>,
}

impl TrafficEventSource for FakeEventSource {
    fn load_events(&self) -> Result<Vec<TrafficEvent>, SourceError> {
        self.calls.set(self.calls.get() + 1);
        Ok(self.events.clone())
    }
}

struct FailingEventSource;

impl TrafficEventSource for FailingEventSource {
    fn load_events(&self) -> Result<Vec<TrafficEvent>, SourceError> {
        Err(SourceError::Unavailable("connection refused".to_string()))
    }
}

fn event(x: &str, y: &str) -> TrafficEvent {
    TrafficEvent {
        event_type: "construction".to_string(),
        event_detail_type: "lane closure".to_string(),
        start_date: "20240518090000".to_string(),
        coord_x: x.to_string(),
        coord_y: y.to_string(),
    }
}

fn noon_on_the_18th() -> chrono::NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 5, 18)
        .and_then(|d| d.and_hms_opt(12, 0, 0))
        .expect("valid timestamp")
}

#[test]
fn monthly_snapshot_places_markers_from_event_source() {
    let config = default_config().expect("config");
    let source = FakeEventSource {
        events: vec![event("127.1", "37.4"), event("n/a", "37.4")],
        calls: Cell::new(0),
    };
    let events = load_events_or_empty(&source);
    assert_eq!(source.calls.get(), 1);

    let snapshot = build_snapshot(
        &config,
        SnapshotRequest {
            query: DashboardQuery::parse("view=monthly"),
            now: noon_on_the_18th(),
            category: RiskCategory::HighRisk,
            events: &events,
        },
    )
    .expect("snapshot");

    let map = snapshot.map.expect("map layer in monthly view");
    assert_eq!(map.markers.len(), 1);
    assert_eq!(map.markers[0].lng, 127.1);
    let highlighted: Vec<&str> = map
        .regions
        .iter()
        .filter(|r| r.highlighted)
        .map(|r| r.name.as_str())
        .collect();
    assert_eq!(highlighted.len(), 2);
    assert!(highlighted.contains(&"경기도"));
    assert!(highlighted.contains(&"충청북도"));
}

#[test]
fn failing_event_source_yields_empty_map() {
    let config = default_config().expect("config");
    let events = load_events_or_empty(&FailingEventSource);
    assert!(events.is_empty());

    let snapshot = build_snapshot(
        &config,
        SnapshotRequest {
            query: DashboardQuery::parse("view=monthly"),
            now: noon_on_the_18th(),
            category: RiskCategory::Unexpected,
            events: &events,
        },
    )
    .expect("snapshot");
    assert!(snapshot.map.expect("map").markers.is_empty());
}

#[test]
fn snapshot_from_config_file_serializes_for_charts() {
    let config = default_config().expect("config");
    let dir = std::env::temp_dir().join(format!("trafficwatch-use-cases-{}", std::process::id()));
    std::fs::create_dir_all(&dir).expect("temp dir");
    let path = dir.join("dashboard.toml");
    std::fs::write(&path, to_toml_pretty(&config).expect("toml")).expect("write config");

    let loaded = load_config(&path).expect("load config");
    let snapshot = build_snapshot(
        &loaded,
        SnapshotRequest {
            query: DashboardQuery::default(),
            now: noon_on_the_18th(),
            category: RiskCategory::default(),
            events: &[],
        },
    )
    .expect("snapshot");
    assert_eq!(snapshot.view, ViewMode::Daily);

    let json = serde_json::to_value(&snapshot).expect("json");
    assert_eq!(json["view"], "daily");
    assert_eq!(json["traffic"]["center_index"], 5);
    assert!(json["traffic"]["points"][0]["prediction"].is_null());
    assert!(json["map"].is_null());
    assert_eq!(json["accidents"]["points"].as_array().map(Vec::len), Some(9));

    let _ = std::fs::remove_dir_all(&dir);
}

//! Chart-ready dashboard snapshots built from config data and the clock.

pub mod query;

use crate::config::{Config, ViewSeriesConfig};
use chrono::{Datelike, NaiveDateTime, Timelike};
use query::{DashboardQuery, ViewMode};
use serde::Serialize;
use trafficwatch_domain::entities::area::{AreaChoices, AreaSelection};
use trafficwatch_domain::entities::region_risk::{RegionStyle, RiskCategory};
use trafficwatch_domain::repositories::traffic_events::{
    decode_traffic_events, MapMarker, TrafficEvent, TrafficEventSource,
};
use trafficwatch_domain::services::alignment::{align_cyclic, align_sequential};
use trafficwatch_domain::value_objects::aligned::{CyclicAlignment, SequentialAlignment};
use trafficwatch_domain::value_objects::period::{
    format_date_display, format_month_display, DatePresets,
};
use trafficwatch_domain::value_objects::series::Series;
use trafficwatch_domain::value_objects::vehicle_share::VehicleShare;

pub struct SnapshotRequest<'a> {
    pub query: DashboardQuery,
    pub now: NaiveDateTime,
    pub category: RiskCategory,
    pub events: &'a [TrafficEvent],
}

#[derive(Debug, Clone, Serialize)]
pub struct DashboardSnapshot {
    pub view: ViewMode,
    pub generated_at: String,
    pub query: String,
    pub traffic: CyclicAlignment,
    pub speed: CyclicAlignment,
    pub vehicle_share: VehicleShare,
    pub accidents: SequentialAlignment,
    pub map: Option<MapLayer>,
    pub area: AreaPanel,
    pub dates: DatePanel,
}

#[derive(Debug, Clone, Serialize)]
pub struct MapLayer {
    pub category: RiskCategory,
    pub legend: Vec<LegendEntry>,
    pub regions: Vec<RegionHighlight>,
    pub markers: Vec<MapMarker>,
}

#[derive(Debug, Clone, Serialize)]
pub struct LegendEntry {
    pub category: RiskCategory,
    pub label: &'static str,
    pub active: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct RegionHighlight {
    pub name: String,
    pub highlighted: bool,
    pub style: RegionStyle,
}

#[derive(Debug, Clone, Serialize)]
pub struct AreaPanel {
    pub selection: AreaSelection,
    pub choices: AreaChoices,
    pub municipality_enabled: bool,
    pub local_enabled: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct DatePanel {
    pub presets: DatePresets,
    pub today_active: bool,
    pub yesterday_active: bool,
    pub this_month_active: bool,
    pub last_month_active: bool,
    pub date_display: String,
    pub month_display: String,
}

pub fn build_snapshot(
    config: &Config,
    request: SnapshotRequest<'_>,
) -> Result<DashboardSnapshot, String> {
    let view = request.query.view;
    let span = tracing::info_span!("build_snapshot", view = view.as_str());
    let _guard = span.enter();

    let center_hour = i64::from(request.now.hour());
    let center_day = i64::from(request.now.day());
    let view_data = view_series(config, view);

    let traffic = align_cyclic(
        &Series::from_hourly(&view_data.traffic),
        center_hour,
        config.window.hourly_radius,
    )
    .map_err(|err| format!("traffic window: {err}"))?;
    let speed = align_cyclic(
        &Series::from_hourly(&view_data.speed),
        center_hour,
        config.window.hourly_radius,
    )
    .map_err(|err| format!("speed window: {err}"))?;
    let accidents = align_sequential(
        &config.accidents.series()?,
        center_day,
        config.window.daily_radius,
        config.accidents.missing_policy(),
    )
    .map_err(|err| format!("accident window: {err}"))?;

    tracing::debug!(
        center_hour,
        center_day,
        hourly_points = traffic.points.len(),
        daily_points = accidents.points.len(),
        "aligned dashboard windows"
    );

    let map = match view {
        ViewMode::Monthly => Some(map_layer(config, request.category, request.events)),
        ViewMode::Daily => None,
    };

    let area = AreaPanel {
        choices: config.area.choices(&request.query.area),
        municipality_enabled: request.query.area.municipality_enabled(),
        local_enabled: request.query.area.local_enabled(),
        selection: request.query.area.clone(),
    };

    let dates = date_panel(&request.query, request.now);

    metrics::counter!("trafficwatch.app.snapshots_total", "view" => view.as_str()).increment(1);

    Ok(DashboardSnapshot {
        view,
        generated_at: request.now.format("%Y-%m-%dT%H:%M:%S").to_string(),
        query: request.query.to_query_string(),
        traffic,
        speed,
        vehicle_share: view_data.vehicle_share.clone(),
        accidents,
        map,
        area,
        dates,
    })
}

fn view_series(config: &Config, view: ViewMode) -> &ViewSeriesConfig {
    match view {
        ViewMode::Daily => &config.fallback.daily,
        ViewMode::Monthly => &config.fallback.monthly,
    }
}

fn map_layer(config: &Config, category: RiskCategory, events: &[TrafficEvent]) -> MapLayer {
    let legend = RiskCategory::ALL
        .iter()
        .map(|c| LegendEntry {
            category: *c,
            label: c.legend_label(),
            active: *c == category,
        })
        .collect();

    let regions = config
        .regions
        .region_names()
        .into_iter()
        .map(|name| {
            let highlighted = config.regions.is_highlighted(category, &name);
            let style = config.regions.style(category, &name);
            RegionHighlight {
                name,
                highlighted,
                style,
            }
        })
        .collect();

    MapLayer {
        category,
        legend,
        regions,
        markers: collect_markers(events),
    }
}

/// Events whose coordinates do not parse are dropped from the map.
pub fn collect_markers(events: &[TrafficEvent]) -> Vec<MapMarker> {
    let mut markers = Vec::with_capacity(events.len());
    for event in events {
        match event.marker() {
            Ok(marker) => markers.push(marker),
            Err(err) => {
                metrics::counter!("trafficwatch.app.events_skipped_total").increment(1);
                tracing::warn!(
                    event_type = %event.event_type,
                    error = %err,
                    "skipping traffic event"
                );
            }
        }
    }
    markers
}

/// Decodes a traffic-events payload, treating an unexpected shape as no events.
pub fn events_or_empty(payload: &serde_json::Value) -> Vec<TrafficEvent> {
    match decode_traffic_events(payload) {
        Ok(events) => events,
        Err(err) => {
            tracing::warn!(error = %err, "ignoring traffic-events payload");
            Vec::new()
        }
    }
}

/// Pulls events from a source; a failing feed leaves the map without markers.
pub fn load_events_or_empty<S: TrafficEventSource + ?Sized>(source: &S) -> Vec<TrafficEvent> {
    match source.load_events() {
        Ok(events) => {
            tracing::debug!(count = events.len(), "loaded traffic events");
            events
        }
        Err(err) => {
            tracing::warn!(error = %err, "traffic-events source failed");
            Vec::new()
        }
    }
}

fn date_panel(query: &DashboardQuery, now: NaiveDateTime) -> DatePanel {
    let presets = DatePresets::from_today(now.date());
    let date_display = display_or_empty(query.date.as_deref(), format_date_display);
    let month_display = display_or_empty(query.month.as_deref(), format_month_display);
    DatePanel {
        today_active: query.is_date_active(&presets.today),
        yesterday_active: query.is_date_active(&presets.yesterday),
        this_month_active: query.is_month_active(&presets.this_month),
        last_month_active: query.is_month_active(&presets.last_month),
        presets,
        date_display,
        month_display,
    }
}

fn display_or_empty(value: Option<&str>, format: fn(&str) -> Result<String, String>) -> String {
    let Some(value) = value else {
        return String::new();
    };
    format(value).unwrap_or_else(|err| {
        tracing::warn!(error = %err, "unable to format filter value");
        String::new()
    })
}

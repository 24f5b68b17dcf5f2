use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use trafficwatch_domain::entities::area::AreaCatalog;
use trafficwatch_domain::entities::region_risk::RegionRiskMap;
use trafficwatch_domain::services::alignment::MissingPolicy;
use trafficwatch_domain::value_objects::series::Series;
use trafficwatch_domain::value_objects::vehicle_share::VehicleShare;
use trafficwatch_domain::value_objects::window::{Window, HOURS_PER_DAY};

const DEFAULT_CONFIG_TOML: &str = include_str!("../../configs/default.toml");

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(deny_unknown_fields)]
pub struct Config {
    pub window: WindowConfig,
    pub fallback: FallbackConfig,
    pub accidents: AccidentsConfig,
    #[serde(default)]
    pub regions: RegionRiskMap,
    #[serde(default)]
    pub area: AreaCatalog,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(deny_unknown_fields)]
pub struct WindowConfig {
    pub hourly_radius: i64,
    pub daily_radius: i64,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(deny_unknown_fields)]
pub struct FallbackConfig {
    pub daily: ViewSeriesConfig,
    pub monthly: ViewSeriesConfig,
}

/// Hourly series for one dashboard view; index 0 is midnight.
#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(deny_unknown_fields)]
pub struct ViewSeriesConfig {
    pub traffic: Vec<f64>,
    pub speed: Vec<f64>,
    pub vehicle_share: VehicleShare,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(deny_unknown_fields)]
pub struct AccidentsConfig {
    pub missing: Option<MissingPolicy>,
    #[serde(default)]
    pub rates: BTreeMap<String, f64>,
}

impl AccidentsConfig {
    /// Accident-rate gaps render as zero-height bars unless configured otherwise.
    pub fn missing_policy(&self) -> MissingPolicy {
        self.missing.unwrap_or(MissingPolicy::Zero)
    }

    pub fn series(&self) -> Result<Series, String> {
        Series::from_day_labels(self.rates.iter().map(|(label, v)| (label.as_str(), *v)))
            .map_err(|err| format!("invalid accidents.rates: {err}"))
    }
}

pub fn load_config(path: &Path) -> Result<Config, String> {
    let contents = fs::read_to_string(path)
        .map_err(|err| format!("failed to read config {}: {}", path.display(), err))?;
    toml::from_str(&contents)
        .map_err(|err| format!("failed to parse TOML {}: {}", path.display(), err))
}

/// The static dashboard data bundled with the crate.
pub fn default_config() -> Result<Config, String> {
    toml::from_str(DEFAULT_CONFIG_TOML)
        .map_err(|err| format!("failed to parse built-in config: {err}"))
}

pub fn to_toml_pretty(config: &Config) -> Result<String, String> {
    toml::to_string_pretty(config)
        .map_err(|err| format!("failed to serialize config as TOML: {err}"))
}

pub fn validate_config(config: &Config) -> Result<(), String> {
    Window::new(0, config.window.hourly_radius)
        .map_err(|err| format!("window.hourly_radius: {err}"))?;
    Window::new(0, config.window.daily_radius)
        .map_err(|err| format!("window.daily_radius: {err}"))?;

    for (name, view) in [
        ("fallback.daily", &config.fallback.daily),
        ("fallback.monthly", &config.fallback.monthly),
    ] {
        for (series, values) in [("traffic", &view.traffic), ("speed", &view.speed)] {
            if values.len() > HOURS_PER_DAY as usize {
                return Err(format!(
                    "{name}.{series} has {} values (max {HOURS_PER_DAY})",
                    values.len()
                ));
            }
            if values.iter().any(|v| !v.is_finite()) {
                return Err(format!("{name}.{series} contains non-finite values"));
            }
        }
        view.vehicle_share
            .validate()
            .map_err(|err| format!("{name}.vehicle_share: {err}"))?;
    }

    config.accidents.series()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{default_config, load_config, to_toml_pretty, validate_config, Config};
    use std::path::Path;
    use trafficwatch_domain::services::alignment::MissingPolicy;

    const MINIMAL: &str = r#"
[window]
hourly_radius = 2
daily_radius = 1

[fallback.daily]
traffic = [1, 2, 3]
speed = [4, 5, 6]

[fallback.daily.vehicle_share]
labels = ["Bus"]
data = [100]

[fallback.monthly]
traffic = []
speed = []

[fallback.monthly.vehicle_share]
labels = []
data = []

[accidents]

[accidents.rates]
day13 = 50
"#;

    fn parse_config(toml_str: &str) -> Config {
        toml::from_str(toml_str).expect("config should parse")
    }

    #[test]
    fn parse_minimal_config() {
        let config = parse_config(MINIMAL);
        assert_eq!(config.window.hourly_radius, 2);
        assert_eq!(config.fallback.daily.traffic, vec![1.0, 2.0, 3.0]);
        assert_eq!(config.accidents.missing_policy(), MissingPolicy::Zero);
        assert!(config.regions.statuses.is_empty());
        validate_config(&config).expect("valid");
    }

    #[test]
    fn parse_config_rejects_unknown_fields() {
        let toml_str = format!("unknown_field = 123\n{MINIMAL}");
        let err = toml::from_str::<Config>(&toml_str).expect_err("unknown field should fail");
        assert!(err.to_string().to_lowercase().contains("unknown field"));
    }

    #[test]
    fn parse_config_rejects_malformed_toml() {
        let err = toml::from_str::<Config>("[window\nhourly_radius = 1").expect_err("malformed");
        assert!(!err.to_string().is_empty());
    }

    #[test]
    fn built_in_config_is_valid() {
        let config = default_config().expect("built-in config");
        validate_config(&config).expect("built-in config validates");
        assert_eq!(config.window.hourly_radius, 5);
        assert_eq!(config.window.daily_radius, 4);
        assert_eq!(config.fallback.daily.traffic.len(), 24);
        assert_eq!(config.fallback.monthly.speed.len(), 24);
        assert_eq!(config.accidents.rates.len(), 11);
        assert_eq!(config.area.municipalities_of("경기도").len(), 2);
    }

    #[test]
    fn validate_rejects_negative_radius() {
        let mut config = parse_config(MINIMAL);
        config.window.daily_radius = -1;
        let err = validate_config(&config).expect_err("negative radius");
        assert!(err.contains("window.daily_radius"));
    }

    #[test]
    fn validate_rejects_more_than_a_day_of_hours() {
        let mut config = parse_config(MINIMAL);
        config.fallback.monthly.speed = vec![1.0; 25];
        let err = validate_config(&config).expect_err("too many hours");
        assert!(err.contains("fallback.monthly.speed"));
    }

    #[test]
    fn validate_rejects_unlabelled_accident_rates() {
        let mut config = parse_config(MINIMAL);
        config.accidents.rates.insert("today".to_string(), 1.0);
        let err = validate_config(&config).expect_err("bad label");
        assert!(err.contains("accidents.rates"));
    }

    #[test]
    fn config_round_trips_through_toml() {
        let config = default_config().expect("built-in config");
        let rendered = to_toml_pretty(&config).expect("toml");
        let reparsed = parse_config(&rendered);
        assert_eq!(reparsed.fallback.daily.traffic, config.fallback.daily.traffic);
        assert_eq!(reparsed.regions, config.regions);
    }

    #[test]
    fn load_config_missing_file_returns_error() {
        let path = Path::new("/tmp/trafficwatch-missing-config.toml");
        let err = load_config(path).expect_err("expected load to fail");
        assert!(err.contains("failed to read config"));
    }
}

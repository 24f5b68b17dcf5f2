mod events;
mod obs;

use chrono::{DateTime, NaiveDateTime};
use clap::{Parser, Subcommand};
use events::JsonFileEventSource;
use std::path::PathBuf;
use trafficwatch_application::config::{self, Config};
use trafficwatch_application::dashboard::query::DashboardQuery;
use trafficwatch_application::dashboard::{build_snapshot, load_events_or_empty, SnapshotRequest};
use trafficwatch_domain::entities::region_risk::RiskCategory;

#[derive(Parser)]
#[command(name = "trafficwatch")]
#[command(about = "Trafficwatch dashboard data CLI", version, arg_required_else_help = true)]
#[command(
    after_help = "Examples:\n  trafficwatch snapshot --query 'view=monthly&region=경기도' --at 2024-05-18T12:00:00\n  trafficwatch snapshot --events traffic-events.json --category high_risk --pretty\n  trafficwatch validate --config dashboard.toml\n"
)]
struct Cli {
    /// Default log filter when TRAFFICWATCH_LOG is not set.
    #[arg(long, global = true, default_value = "info")]
    log_level: String,
    /// Log output format: text | json.
    #[arg(long, global = true, default_value = "text")]
    log_format: String,
    #[command(subcommand)]
    command: CliCommand,
}

#[derive(Subcommand)]
enum CliCommand {
    /// Print the dashboard snapshot for a query as JSON.
    Snapshot {
        /// Config file path (TOML). Falls back to env TRAFFICWATCH_CONFIG, then built-in data.
        #[arg(long)]
        config: Option<PathBuf>,
        /// Dashboard query string, e.g. `view=monthly&region=...`.
        #[arg(long, default_value = "")]
        query: String,
        /// Pin "now" (RFC3339 or YYYY-MM-DDTHH:MM:SS). Defaults to the local clock.
        #[arg(long)]
        at: Option<String>,
        /// Active map category: accident | high_risk | unexpected.
        #[arg(long, default_value = "accident")]
        category: String,
        /// Saved traffic-events response (JSON array or {"events": [...]}).
        #[arg(long)]
        events: Option<PathBuf>,
        #[arg(long, default_value_t = false)]
        pretty: bool,
    },
    /// Load and validate a config file.
    Validate {
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

fn main() {
    let cli = Cli::parse();
    if let Err(err) = obs::init_tracing(&cli.log_level, &cli.log_format) {
        eprintln!("error: {err}");
        std::process::exit(1);
    }

    let result = match cli.command {
        CliCommand::Snapshot {
            config,
            query,
            at,
            category,
            events,
            pretty,
        } => run_snapshot(config, &query, at.as_deref(), &category, events, pretty),
        CliCommand::Validate { config } => run_validate(config),
    };

    match result {
        Ok(output) => println!("{output}"),
        Err(err) => {
            eprintln!("error: {err}");
            std::process::exit(1);
        }
    }
}

fn run_snapshot(
    config_path: Option<PathBuf>,
    query: &str,
    at: Option<&str>,
    category: &str,
    events_path: Option<PathBuf>,
    pretty: bool,
) -> Result<String, String> {
    let config = resolve_config(config_path)?;
    let now = parse_now(at)?;
    let category = RiskCategory::parse(category)?;
    let events = match events_path {
        Some(path) => load_events_or_empty(&JsonFileEventSource::new(path)),
        None => Vec::new(),
    };

    let snapshot = build_snapshot(
        &config,
        SnapshotRequest {
            query: DashboardQuery::parse(query),
            now,
            category,
            events: &events,
        },
    )?;
    tracing::info!(view = snapshot.view.as_str(), at = %snapshot.generated_at, "snapshot built");

    let rendered = if pretty {
        serde_json::to_string_pretty(&snapshot)
    } else {
        serde_json::to_string(&snapshot)
    };
    rendered.map_err(|err| format!("failed to serialize snapshot: {err}"))
}

fn run_validate(config_path: Option<PathBuf>) -> Result<String, String> {
    let config = resolve_config(config_path)?;
    let summary = serde_json::json!({
        "status": "ok",
        "hourly_radius": config.window.hourly_radius,
        "daily_radius": config.window.daily_radius,
        "accident_days": config.accidents.rates.len(),
        "regions": config.regions.region_names().len(),
    });
    Ok(summary.to_string())
}

fn resolve_config(path: Option<PathBuf>) -> Result<Config, String> {
    let path = path.or_else(|| {
        std::env::var("TRAFFICWATCH_CONFIG")
            .ok()
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from)
    });
    let config = match path {
        Some(path) => {
            tracing::debug!(config = %path.display(), "loading config");
            config::load_config(&path)?
        }
        None => config::default_config()?,
    };
    config::validate_config(&config)?;
    Ok(config)
}

fn parse_now(at: Option<&str>) -> Result<NaiveDateTime, String> {
    let Some(raw) = at else {
        return Ok(chrono::Local::now().naive_local());
    };
    let raw = raw.trim();
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.naive_local())
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S"))
        .map_err(|_| format!("invalid --at {raw:?} (expected RFC3339 or YYYY-MM-DDTHH:MM:SS)"))
}

#[cfg(test)]
mod tests {
    use super::{parse_now, run_snapshot};
    use chrono::{Datelike, Timelike};

    #[test]
    fn parse_now_keeps_wall_clock_of_rfc3339_offset() {
        let now = parse_now(Some("2024-05-18T23:15:00+09:00")).expect("rfc3339");
        assert_eq!(now.hour(), 23);
        assert_eq!(now.day(), 18);
    }

    #[test]
    fn parse_now_accepts_naive_timestamps() {
        let now = parse_now(Some("2024-05-18T07:00:00")).expect("naive");
        assert_eq!(now.hour(), 7);
    }

    #[test]
    fn parse_now_rejects_garbage() {
        assert!(parse_now(Some("yesterday")).is_err());
    }

    #[test]
    fn snapshot_command_renders_json() {
        let out = run_snapshot(
            None,
            "view=monthly",
            Some("2024-05-18T12:00:00"),
            "unexpected",
            None,
            false,
        )
        .expect("snapshot");
        let json: serde_json::Value = serde_json::from_str(&out).expect("json");
        assert_eq!(json["view"], "monthly");
        assert_eq!(json["map"]["category"], "unexpected");
    }

    #[test]
    fn snapshot_command_rejects_unknown_category() {
        let err = run_snapshot(None, "", Some("2024-05-18T12:00:00"), "flood", None, false)
            .expect_err("bad category");
        assert!(err.contains("flood"));
    }
}

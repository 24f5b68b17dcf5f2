use serde::{Deserialize, Serialize};
use trafficwatch_domain::entities::area::AreaSelection;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    #[default]
    Daily,
    Monthly,
}

impl ViewMode {
    /// Anything other than `monthly` is treated as the daily view.
    pub fn parse_lenient(value: &str) -> Self {
        if value.trim().eq_ignore_ascii_case("monthly") {
            Self::Monthly
        } else {
            Self::Daily
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Daily => "daily",
            Self::Monthly => "monthly",
        }
    }
}

/// Dashboard filter state as carried in the page's query string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardQuery {
    pub view: ViewMode,
    pub date: Option<String>,
    pub month: Option<String>,
    pub area: AreaSelection,
}

impl DashboardQuery {
    /// Reads `view`, `date`, `month`, `region`, `municipality` and `local`.
    /// Values are taken as-is; unknown keys are ignored.
    pub fn parse(query: &str) -> Self {
        let raw = query.trim().trim_start_matches('?');
        let mut parsed = Self::default();
        for (key, value) in url::form_urlencoded::parse(raw.as_bytes()) {
            let value = non_empty(value.into_owned());
            match &*key {
                "view" => parsed.view = ViewMode::parse_lenient(value.as_deref().unwrap_or("")),
                "date" => parsed.date = value,
                "month" => parsed.month = value,
                "region" => parsed.area.region = value,
                "municipality" => parsed.area.municipality = value,
                "local" => parsed.area.local = value,
                _ => {}
            }
        }
        parsed
    }

    /// Updates one parameter the way the filter sidebar does: a new region
    /// drops municipality and local, a new municipality drops local.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), String> {
        let value = non_empty(value.to_string());
        match key {
            "view" => self.view = ViewMode::parse_lenient(value.as_deref().unwrap_or("")),
            "date" => self.date = value,
            "month" => self.month = value,
            "region" => self.area.select_region(value),
            "municipality" => self.area.select_municipality(value),
            "local" => self.area.select_local(value),
            _ => return Err(format!("unsupported query parameter: {key}")),
        }
        Ok(())
    }

    pub fn select_month_preset(&mut self, month: &str) {
        self.view = ViewMode::Monthly;
        self.month = non_empty(month.to_string());
    }

    pub fn select_date_preset(&mut self, date: &str) {
        self.view = ViewMode::Daily;
        self.date = non_empty(date.to_string());
    }

    pub fn is_month_active(&self, month: &str) -> bool {
        self.view == ViewMode::Monthly && self.month.as_deref() == Some(month)
    }

    pub fn is_date_active(&self, date: &str) -> bool {
        self.view == ViewMode::Daily && self.date.as_deref() == Some(date)
    }

    pub fn to_query_string(&self) -> String {
        let mut out = url::form_urlencoded::Serializer::new(String::new());
        out.append_pair("view", self.view.as_str());
        let optional = [
            ("date", &self.date),
            ("month", &self.month),
            ("region", &self.area.region),
            ("municipality", &self.area.municipality),
            ("local", &self.area.local),
        ];
        for (key, value) in optional {
            if let Some(value) = value {
                out.append_pair(key, value);
            }
        }
        out.finish()
    }
}

fn non_empty(value: String) -> Option<String> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value)
    }
}

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskCategory {
    #[default]
    Accident,
    HighRisk,
    Unexpected,
}

impl RiskCategory {
    pub const ALL: [RiskCategory; 3] = [
        RiskCategory::Accident,
        RiskCategory::HighRisk,
        RiskCategory::Unexpected,
    ];

    pub fn parse(value: &str) -> Result<Self, String> {
        match value.trim().to_lowercase().as_str() {
            "accident" => Ok(Self::Accident),
            "high_risk" | "highrisk" | "high-risk" => Ok(Self::HighRisk),
            "unexpected" => Ok(Self::Unexpected),
            _ => Err(format!("unsupported risk category: {value}")),
        }
    }

    pub fn legend_label(self) -> &'static str {
        match self {
            Self::Accident => "Accident Location",
            Self::HighRisk => "High-Risk Section",
            Self::Unexpected => "Unexpected Incident",
        }
    }

    /// `(fill, stroke)` used for highlighted regions.
    pub fn palette(self) -> (&'static str, &'static str) {
        match self {
            Self::Accident => ("#FCE4EC", "#D81B60"),
            Self::HighRisk => ("#FFF3E0", "#FB8C00"),
            Self::Unexpected => ("#E1F5FE", "#039BE5"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RegionStatus {
    Good,
    #[default]
    Normal,
    Bad,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionStyle {
    pub fill_color: String,
    pub stroke_color: String,
    pub weight: u32,
    pub fill_opacity: f64,
}

const REGION_STROKE_WEIGHT: u32 = 2;
const HIGHLIGHT_OPACITY: f64 = 0.5;
const IDLE_STROKE: &str = "#BBB";

impl RegionStyle {
    pub fn highlighted(category: RiskCategory) -> Self {
        let (fill, stroke) = category.palette();
        Self {
            fill_color: fill.to_string(),
            stroke_color: stroke.to_string(),
            weight: REGION_STROKE_WEIGHT,
            fill_opacity: HIGHLIGHT_OPACITY,
        }
    }

    pub fn idle() -> Self {
        Self {
            fill_color: "transparent".to_string(),
            stroke_color: IDLE_STROKE.to_string(),
            weight: REGION_STROKE_WEIGHT,
            fill_opacity: 0.0,
        }
    }
}

/// Per-region risk facts behind the choropleth.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RegionRiskMap {
    #[serde(default)]
    pub statuses: BTreeMap<String, RegionStatus>,
    #[serde(default)]
    pub high_risk: Vec<String>,
    #[serde(default)]
    pub unexpected: Vec<String>,
}

impl RegionRiskMap {
    pub fn is_highlighted(&self, category: RiskCategory, region: &str) -> bool {
        match category {
            RiskCategory::Accident => self.statuses.get(region) == Some(&RegionStatus::Bad),
            RiskCategory::HighRisk => self.high_risk.iter().any(|r| r == region),
            RiskCategory::Unexpected => self.unexpected.iter().any(|r| r == region),
        }
    }

    pub fn style(&self, category: RiskCategory, region: &str) -> RegionStyle {
        if self.is_highlighted(category, region) {
            RegionStyle::highlighted(category)
        } else {
            RegionStyle::idle()
        }
    }

    /// Every region the map knows about, statuses first, in stable order.
    pub fn region_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.statuses.keys().cloned().collect();
        for extra in self.high_risk.iter().chain(self.unexpected.iter()) {
            if !names.contains(extra) {
                names.push(extra.clone());
            }
        }
        names
    }
}

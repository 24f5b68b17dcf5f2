use serde::{Deserialize, Serialize};

/// Traffic share per vehicle type, in the order the pie chart draws it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct VehicleShare {
    pub labels: Vec<String>,
    pub data: Vec<f64>,
    #[serde(default)]
    pub icons: Vec<String>,
}

impl VehicleShare {
    pub fn validate(&self) -> Result<(), String> {
        if self.labels.len() != self.data.len() {
            return Err(format!(
                "vehicle share has {} labels but {} values",
                self.labels.len(),
                self.data.len()
            ));
        }
        if !self.icons.is_empty() && self.icons.len() != self.labels.len() {
            return Err(format!(
                "vehicle share has {} labels but {} icons",
                self.labels.len(),
                self.icons.len()
            ));
        }
        if let Some(bad) = self.data.iter().find(|v| !v.is_finite() || **v < 0.0) {
            return Err(format!("vehicle share values must be finite and >= 0 (got {bad})"));
        }
        Ok(())
    }
}

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Region -> municipality -> local area choices for the area filter.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AreaCatalog {
    #[serde(default)]
    pub regions: Vec<String>,
    #[serde(default)]
    pub municipalities: BTreeMap<String, Vec<String>>,
    #[serde(default)]
    pub locals: BTreeMap<String, Vec<String>>,
}

impl AreaCatalog {
    pub fn municipalities_of(&self, region: &str) -> &[String] {
        self.municipalities
            .get(region)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn locals_of(&self, municipality: &str) -> &[String] {
        self.locals
            .get(municipality)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn choices(&self, selection: &AreaSelection) -> AreaChoices {
        let municipalities = selection
            .region
            .as_deref()
            .map(|r| self.municipalities_of(r).to_vec())
            .unwrap_or_default();
        let locals = selection
            .municipality
            .as_deref()
            .map(|m| self.locals_of(m).to_vec())
            .unwrap_or_default();
        AreaChoices {
            regions: self.regions.clone(),
            municipalities,
            locals,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AreaChoices {
    pub regions: Vec<String>,
    pub municipalities: Vec<String>,
    pub locals: Vec<String>,
}

/// Current area filter. Choosing a broader level clears the narrower ones.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AreaSelection {
    pub region: Option<String>,
    pub municipality: Option<String>,
    pub local: Option<String>,
}

impl AreaSelection {
    pub fn select_region(&mut self, region: Option<String>) {
        self.region = non_empty(region);
        self.municipality = None;
        self.local = None;
    }

    pub fn select_municipality(&mut self, municipality: Option<String>) {
        self.municipality = non_empty(municipality);
        self.local = None;
    }

    pub fn select_local(&mut self, local: Option<String>) {
        self.local = non_empty(local);
    }

    pub fn municipality_enabled(&self) -> bool {
        self.region.is_some()
    }

    pub fn local_enabled(&self) -> bool {
        self.municipality.is_some()
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

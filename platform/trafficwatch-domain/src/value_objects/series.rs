use crate::services::alignment::labels::parse_day_number;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Integer-keyed numeric series. Keys are hours (0..=23) or day numbers.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Series {
    points: BTreeMap<i64, f64>,
}

impl Series {
    pub fn new() -> Self {
        Self::default()
    }

    /// Index of each value becomes its key, so `values[0]` is hour 0.
    pub fn from_hourly(values: &[f64]) -> Self {
        let points = values
            .iter()
            .copied()
            .enumerate()
            .map(|(idx, value)| (idx as i64, value))
            .collect();
        Self { points }
    }

    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (i64, f64)>,
    {
        Self {
            points: pairs.into_iter().collect(),
        }
    }

    /// Builds a day-keyed series from labels such as `day13` or `day-2`.
    /// A day given twice is an error.
    pub fn from_day_labels<'a, I>(labelled: I) -> Result<Self, String>
    where
        I: IntoIterator<Item = (&'a str, f64)>,
    {
        let mut points = BTreeMap::new();
        for (label, value) in labelled {
            let day = parse_day_number(label)?;
            if points.insert(day, value).is_some() {
                return Err(format!("duplicate day label: {label}"));
            }
        }
        Ok(Self { points })
    }

    pub fn insert(&mut self, key: i64, value: f64) -> Option<f64> {
        self.points.insert(key, value)
    }

    pub fn get(&self, key: i64) -> Option<f64> {
        self.points.get(&key).copied()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

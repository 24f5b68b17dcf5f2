//! Fixed-width windows around "now" for hourly and daily chart series.
//!
//! Both aligners are pure: the caller supplies the center (current hour or
//! current day) and the series, and gets back exactly `2 * radius + 1`
//! positions with the center at index `radius`.

pub mod labels;

use crate::value_objects::aligned::{
    AlignedPoint, CyclicAlignment, SequentialAlignment, SplitPoint,
};
use crate::value_objects::series::Series;
use crate::value_objects::window::{Window, HOURS_PER_DAY};
use labels::{day_label, hour_label};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AlignError {
    InvalidArgument(String),
}

impl std::fmt::Display for AlignError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AlignError::InvalidArgument(msg) => write!(f, "invalid argument: {msg}"),
        }
    }
}

impl std::error::Error for AlignError {}

/// What a position gets when the series has no value for its key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MissingPolicy {
    #[default]
    Preserve,
    Zero,
}

impl MissingPolicy {
    fn resolve(self, value: Option<f64>) -> Option<f64> {
        match (self, value) {
            (_, Some(v)) => Some(v),
            (MissingPolicy::Zero, None) => Some(0.0),
            (MissingPolicy::Preserve, None) => None,
        }
    }
}

/// Hour-of-day window. Keys wrap over midnight; positions at or before the
/// center go to `history`, later ones to `prediction`. Gaps stay `None`.
pub fn align_cyclic(
    series: &Series,
    center_hour: i64,
    radius: i64,
) -> Result<CyclicAlignment, AlignError> {
    let window = Window::hour_of_day(center_hour, radius)?;
    let points = window
        .offsets()
        .map(|offset| {
            let key = (window.center() + offset).rem_euclid(HOURS_PER_DAY);
            let value = series.get(key);
            let (history, prediction) = if offset <= 0 {
                (value, None)
            } else {
                (None, value)
            };
            SplitPoint {
                key,
                label: hour_label(key),
                history,
                prediction,
            }
        })
        .collect();

    Ok(CyclicAlignment {
        points,
        center_index: window.center_index(),
    })
}

/// Day-number window. No calendar awareness: keys below 1 or past the end of
/// the month are looked up as-is.
pub fn align_sequential(
    series: &Series,
    center_day: i64,
    radius: i64,
    missing: MissingPolicy,
) -> Result<SequentialAlignment, AlignError> {
    let window = Window::new(center_day, radius)?;
    let points = window
        .offsets()
        .map(|offset| {
            let key = window.center() + offset;
            AlignedPoint {
                key,
                label: day_label(key),
                value: missing.resolve(series.get(key)),
            }
        })
        .collect();

    Ok(SequentialAlignment {
        points,
        center_index: window.center_index(),
    })
}

use crate::services::alignment::AlignError;
use serde::Serialize;

pub const HOURS_PER_DAY: i64 = 24;

/// A `2 * radius + 1` wide range of positions centered on `center`.
/// Both ends are representable as `i64`, so key arithmetic cannot overflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Window {
    center: i64,
    radius: usize,
    width: usize,
}

impl Window {
    pub fn new(center: i64, radius: i64) -> Result<Self, AlignError> {
        if radius < 0 {
            return Err(AlignError::InvalidArgument(format!(
                "radius must be >= 0 (got {radius})"
            )));
        }
        if center.checked_sub(radius).is_none() || center.checked_add(radius).is_none() {
            return Err(AlignError::InvalidArgument(format!(
                "window {center} +/- {radius} does not fit in i64"
            )));
        }
        let width = usize::try_from(radius)
            .ok()
            .and_then(|r| r.checked_mul(2))
            .and_then(|w| w.checked_add(1))
            .ok_or_else(|| {
                AlignError::InvalidArgument(format!("radius {radius} is too large"))
            })?;
        Ok(Self {
            center,
            radius: width / 2,
            width,
        })
    }

    /// Same as [`Window::new`] but also requires `center` to be an hour of day.
    pub fn hour_of_day(center_hour: i64, radius: i64) -> Result<Self, AlignError> {
        if !(0..HOURS_PER_DAY).contains(&center_hour) {
            return Err(AlignError::InvalidArgument(format!(
                "center hour must be in 0..=23 (got {center_hour})"
            )));
        }
        Self::new(center_hour, radius)
    }

    pub fn center(&self) -> i64 {
        self.center
    }

    pub fn width(&self) -> usize {
        self.width
    }

    /// Position of the center inside the window.
    pub fn center_index(&self) -> usize {
        self.radius
    }

    /// Signed offsets from `-radius` to `+radius`, in order.
    pub fn offsets(&self) -> impl Iterator<Item = i64> {
        let radius = self.radius as i64;
        -radius..=radius
    }
}

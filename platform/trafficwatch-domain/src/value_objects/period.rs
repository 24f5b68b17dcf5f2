use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// Quick-pick values offered by the date filter, relative to "today".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatePresets {
    pub today: String,
    pub yesterday: String,
    pub this_month: String,
    pub last_month: String,
}

impl DatePresets {
    pub fn from_today(today: NaiveDate) -> Self {
        let yesterday = today.pred_opt().unwrap_or(today);
        let (last_year, last_month) = previous_month(today.year(), today.month());
        Self {
            today: format_date_param(today),
            yesterday: format_date_param(yesterday),
            this_month: format_month_param(today.year(), today.month()),
            last_month: format_month_param(last_year, last_month),
        }
    }
}

pub fn format_date_param(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

pub fn format_month_param(year: i32, month: u32) -> String {
    format!("{year:04}-{month:02}")
}

fn previous_month(year: i32, month: u32) -> (i32, u32) {
    if month <= 1 {
        (year - 1, 12)
    } else {
        (year, month - 1)
    }
}

pub fn parse_date_param(value: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .map_err(|err| format!("invalid date {value:?} (expected YYYY-MM-DD): {err}"))
}

pub fn parse_month_param(value: &str) -> Result<(i32, u32), String> {
    let trimmed = value.trim();
    let (year, month) = trimmed
        .split_once('-')
        .ok_or_else(|| format!("invalid month {value:?} (expected YYYY-MM)"))?;
    let year: i32 = year
        .parse()
        .map_err(|_| format!("invalid month {value:?} (bad year)"))?;
    let month: u32 = month
        .parse()
        .map_err(|_| format!("invalid month {value:?} (bad month)"))?;
    if !(1..=12).contains(&month) {
        return Err(format!("invalid month {value:?} (month out of range)"));
    }
    Ok((year, month))
}

/// `2024-05-18` -> `2024. 05. 18.`; empty input stays empty.
pub fn format_date_display(value: &str) -> Result<String, String> {
    if value.trim().is_empty() {
        return Ok(String::new());
    }
    let date = parse_date_param(value)?;
    Ok(date.format("%Y. %m. %d.").to_string())
}

/// `2024-5` or `2024-05` -> `2024. 05.`; empty input stays empty.
pub fn format_month_display(value: &str) -> Result<String, String> {
    if value.trim().is_empty() {
        return Ok(String::new());
    }
    let (year, month) = parse_month_param(value)?;
    Ok(format!("{year}. {month:02}."))
}

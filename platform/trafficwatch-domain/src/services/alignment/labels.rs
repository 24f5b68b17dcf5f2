/// 12-hour clock label: 0 -> `12AM`, 12 -> `12PM`, 13 -> `1PM`.
pub fn hour_label(hour: i64) -> String {
    let hour = hour.rem_euclid(24);
    let suffix = if hour < 12 { "AM" } else { "PM" };
    let h12 = if hour % 12 == 0 { 12 } else { hour % 12 };
    format!("{h12}{suffix}")
}

pub fn day_label(day: i64) -> String {
    format!("day{day}")
}

/// Inverse of [`day_label`]: accepts exactly the strings it produces
/// (`day13`, `day0`, `day-2`), so a label always lands on its own bar.
pub fn parse_day_number(label: &str) -> Result<i64, String> {
    let day = label
        .strip_prefix("day")
        .filter(|rest| {
            let digits = rest.strip_prefix('-').unwrap_or(*rest);
            !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
        })
        .and_then(|rest| rest.parse::<i64>().ok())
        .ok_or_else(|| format!("invalid day label: {label:?} (expected dayN)"))?;
    if day_label(day) != label {
        return Err(format!("non-canonical day label: {label:?} (use {:?})", day_label(day)));
    }
    Ok(day)
}

//! Normalising what people type into the date, time and coordinate fields.

use anyhow::Result;
use chrono::{NaiveDate, NaiveTime};
use elderease_core::Coordinates;

/// Expand common abbreviations that fuzzydate doesn't handle.
fn expand_abbreviations(input: &str) -> String {
    let abbrevs = [
        ("mon", "monday"),
        ("tue", "tuesday"),
        ("tues", "tuesday"),
        ("wed", "wednesday"),
        ("thu", "thursday"),
        ("thur", "thursday"),
        ("thurs", "thursday"),
        ("fri", "friday"),
        ("sat", "saturday"),
        ("sun", "sunday"),
        ("jan", "january"),
        ("feb", "february"),
        ("mar", "march"),
        ("apr", "april"),
        ("jun", "june"),
        ("jul", "july"),
        ("aug", "august"),
        ("sep", "september"),
        ("sept", "september"),
        ("oct", "october"),
        ("nov", "november"),
        ("dec", "december"),
    ];

    lower_words(input)
        .map(|word| {
            abbrevs
                .iter()
                .find(|(abbr, _)| *abbr == word)
                .map(|(_, full)| full.to_string())
                .unwrap_or(word)
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn lower_words(input: &str) -> impl Iterator<Item = String> + '_ {
    input.split_whitespace().map(str::to_lowercase)
}

/// Turn "2025-06-01", "tomorrow" or "sat" into an ISO date.
pub fn parse_date(input: &str) -> Result<String> {
    let trimmed = input.trim();

    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Ok(date.format("%Y-%m-%d").to_string());
    }

    let expanded = expand_abbreviations(trimmed);
    let dt = fuzzydate::parse(&expanded)
        .map_err(|_| anyhow::anyhow!("Could not understand the date \"{}\"", input))?;

    Ok(dt.date().format("%Y-%m-%d").to_string())
}

/// Turn "18:00", "6pm" or "6:30 pm" into HH:MM.
pub fn parse_time(input: &str) -> Result<String> {
    let mut compact: String = input
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect::<String>()
        .to_uppercase();

    // "6PM" has no minutes, which chrono won't accept
    if !compact.contains(':') && (compact.ends_with("AM") || compact.ends_with("PM")) {
        compact.insert_str(compact.len() - 2, ":00");
    }

    let time = match compact.as_str() {
        "NOON" => NaiveTime::from_hms_opt(12, 0, 0),
        "MIDNIGHT" => NaiveTime::from_hms_opt(0, 0, 0),
        _ => ["%H:%M", "%I:%M%p"]
            .iter()
            .find_map(|fmt| NaiveTime::parse_from_str(&compact, fmt).ok()),
    };

    time.map(|t| t.format("%H:%M").to_string())
        .ok_or_else(|| anyhow::anyhow!("Could not understand the time \"{}\"", input))
}

/// Parse "44.98, -93.27". Ranges are not checked.
pub fn parse_coordinates(input: &str) -> Result<Coordinates> {
    let invalid = || anyhow::anyhow!("Expected \"latitude, longitude\", got \"{}\"", input);

    let (lat, lng) = input.split_once(',').ok_or_else(invalid)?;
    let latitude = parse_degrees(lat).map_err(|_| invalid())?;
    let longitude = parse_degrees(lng).map_err(|_| invalid())?;

    Ok(Coordinates::new(latitude, longitude))
}

/// A single finite coordinate value. NaN and infinities can't be stored
/// as JSON numbers, so they are refused here.
pub fn parse_degrees(input: &str) -> Result<f64, String> {
    let value: f64 = input
        .trim()
        .parse()
        .map_err(|_| format!("\"{}\" is not a number", input.trim()))?;

    if !value.is_finite() {
        return Err(format!("\"{}\" is not a finite number", input.trim()));
    }

    Ok(value)
}

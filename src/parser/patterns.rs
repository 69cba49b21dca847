use std::sync::LazyLock;

use chrono::{Datelike, Local, NaiveDateTime};
use regex::Regex;

use crate::error::{ExtractError, PatternKind};
use crate::model::{Timestamp, Waypoint};

static DENOMINATION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(.+?) ([0-9]+) ?(.*)$").unwrap());
static ROUTE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\(([0-9]{2}\.[0-9]{2}\. [0-9]{2}:[0-9]{2})\) (.+?) -> (.+?) \(([0-9]{2}\.[0-9]{2}\. [0-9]{2}:[0-9]{2})\)")
        .unwrap()
});
static DIGITS_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[0-9]+").unwrap());

/// Page format for times; the page never prints a year.
const DATE_TIME_FORMAT: &str = "%d.%m. %H:%M";

/// Collapse every whitespace run (NBSP included) to a single space.
pub fn normalize_ws(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// `"R 812 Tatran"` → `("R", 812, "Tatran")`. The name is empty when the
/// train has none.
pub fn parse_denomination(text: &str) -> Result<(String, u32, String), ExtractError> {
    let normalized = normalize_ws(text);
    let caps = DENOMINATION_RE
        .captures(&normalized)
        .ok_or_else(|| ExtractError::pattern(PatternKind::Denomination, text))?;

    let number = caps[2]
        .parse::<u32>()
        .map_err(|_| ExtractError::pattern(PatternKind::Denomination, text))?;
    let category = caps[1].trim().to_string();
    let name = caps[3].trim().to_string();

    Ok((category, number, name))
}

/// `"(15.03. 10:00) Bratislava -> Košice (15.03. 16:30)"` → origin and
/// destination waypoints.
pub fn parse_route(text: &str) -> Result<(Waypoint, Waypoint), ExtractError> {
    let normalized = normalize_ws(text);
    let matches: Vec<_> = ROUTE_RE.captures_iter(&normalized).collect();
    let [caps] = matches.as_slice() else {
        return Err(ExtractError::pattern(PatternKind::Route, text));
    };

    let from = Waypoint {
        station: caps[2].trim().to_string(),
        time: parse_date_time(&caps[1]),
    };
    let to = Waypoint {
        station: caps[3].trim().to_string(),
        time: parse_date_time(&caps[4]),
    };
    Ok((from, to))
}

/// Parse `dd.mm. HH:MM`, stamping it with the current local year.
/// Anything that does not fit the format is simply absent.
pub fn parse_date_time(text: &str) -> Timestamp {
    parse_date_time_in_year(text, Local::now().year())
}

pub fn parse_date_time_in_year(text: &str, year: i32) -> Timestamp {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }
    NaiveDateTime::parse_from_str(&format!("{year} {text}"), &format!("%Y {DATE_TIME_FORMAT}")).ok()
}

/// First run of digits anywhere in the text, 0 when there is none.
pub fn extract_delay_digits(text: &str) -> u32 {
    DIGITS_RE
        .find(text)
        .and_then(|m| m.as_str().parse().ok())
        .unwrap_or(0)
}

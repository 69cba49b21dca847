use chrono::NaiveDateTime;
use serde::Serialize;

/// A civil date-time read from the page. `None` means the page did not
/// carry a usable value (train not there yet, cell empty, bad format).
pub type Timestamp = Option<NaiveDateTime>;

/// One train as listed on the status page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrainRecord {
    pub category: String,
    pub number: u32,
    pub name: String,
    pub scheduled_from: Waypoint,
    pub scheduled_to: Waypoint,
    pub current: DelayReport,
}

/// Scheduled stop: station plus timetable time.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Waypoint {
    pub station: String,
    pub time: Timestamp,
}

/// Live position of a train.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DelayReport {
    pub station: String,
    pub scheduled_time: Timestamp,
    pub actual_time: Timestamp,
    pub delay_minutes: u32,
}

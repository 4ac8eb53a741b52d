use chrono::{DateTime, Datelike, TimeZone, Utc};

use crate::hours::types::Day;

/// The weekday `instant` falls on in `tz`.
pub fn weekday_of<Tz: TimeZone>(instant: &DateTime<Utc>, tz: &Tz) -> Day {
    Day::from(instant.with_timezone(tz).weekday())
}

/// Wall-clock reading for `instant` in `tz`.
pub fn local_time<Tz: TimeZone>(instant: &DateTime<Utc>, tz: &Tz) -> DateTime<Tz> {
    instant.with_timezone(tz)
}

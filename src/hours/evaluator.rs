//! Open / closing-soon / closed evaluation for a vendor's weekly schedule.
//!
//! Every query takes the wall-clock reading as an argument. Times are compared
//! in their canonical 24-hour form; a window that closes at midnight ends on
//! [`MIDNIGHT_SENTINEL`](crate::time::MIDNIGHT_SENTINEL) and is treated as
//! running to the end of the day.

use std::fmt;

use chrono::{DateTime, Datelike, TimeZone, Timelike};
use serde::Serialize;

use crate::error::TimeParseError;
use crate::hours::types::{Day, WeeklyHours};
use crate::time::{NormalizedTime, parse_time};

/// Default look-ahead for [`VendorStatus::ClosingSoon`].
pub const DEFAULT_CLOSING_SOON_MINUTES: u32 = 60;

const MINUTES_PER_DAY: i64 = 24 * 60;

/// Badge state shown on a vendor card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum VendorStatus {
    Open,
    ClosingSoon,
    Closed,
}

impl VendorStatus {
    /// Human-readable badge text.
    pub fn label(&self) -> &'static str {
        match self {
            VendorStatus::Open => "Open Now",
            VendorStatus::ClosingSoon => "Closing Soon",
            VendorStatus::Closed => "Closed",
        }
    }
}

impl fmt::Display for VendorStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            VendorStatus::Open => "open",
            VendorStatus::ClosingSoon => "closing-soon",
            VendorStatus::Closed => "closed",
        })
    }
}

/// Callback invoked with the day, the raw text and the reason whenever a
/// stored time cannot be normalized.
pub type Reporter = Box<dyn Fn(Day, &str, &TimeParseError) + Send + Sync>;

/// Evaluates weekly schedules against an injected clock reading.
pub struct HoursEvaluator {
    threshold_minutes: u32,
    reporter: Option<Reporter>,
}

impl Default for HoursEvaluator {
    fn default() -> Self {
        Self::new(DEFAULT_CLOSING_SOON_MINUTES)
    }
}

impl HoursEvaluator {
    pub fn new(threshold_minutes: u32) -> Self {
        Self {
            threshold_minutes,
            reporter: None,
        }
    }

    /// Attaches a diagnostics callback for unparseable stored times.
    pub fn with_reporter<F>(mut self, reporter: F) -> Self
    where
        F: Fn(Day, &str, &TimeParseError) + Send + Sync + 'static,
    {
        self.reporter = Some(Box::new(reporter));
        self
    }

    pub fn threshold_minutes(&self) -> u32 {
        self.threshold_minutes
    }

    /// Whether `now` falls inside today's window, inclusive at both ends.
    pub fn is_open_now<Tz: TimeZone>(&self, hours: &WeeklyHours, now: &DateTime<Tz>) -> bool {
        self.todays_window(hours, now)
            .is_some_and(|(start, end)| window_contains(start, end, now))
    }

    /// Whether the vendor is open and closes within the threshold.
    pub fn is_closing_soon<Tz: TimeZone>(&self, hours: &WeeklyHours, now: &DateTime<Tz>) -> bool {
        self.status(hours, now) == VendorStatus::ClosingSoon
    }

    pub fn status<Tz: TimeZone>(&self, hours: &WeeklyHours, now: &DateTime<Tz>) -> VendorStatus {
        let Some((start, end)) = self.todays_window(hours, now) else {
            return VendorStatus::Closed;
        };

        if !window_contains(start, end, now) {
            return VendorStatus::Closed;
        }

        let remaining = minutes_until_close(end, now);
        if remaining > 0 && remaining <= self.threshold_minutes as i64 {
            VendorStatus::ClosingSoon
        } else {
            VendorStatus::Open
        }
    }

    /// Today's normalized `(start, end)`, or `None` when the vendor has no
    /// usable window for the day.
    fn todays_window<Tz: TimeZone>(
        &self,
        hours: &WeeklyHours,
        now: &DateTime<Tz>,
    ) -> Option<(NormalizedTime, NormalizedTime)> {
        let day = Day::from(now.weekday());
        let window = hours.get(day)?;

        let start = self.resolve(day, window.start.as_deref());
        let end = self.resolve(day, window.end.as_deref());
        Some((start?, end?))
    }

    fn resolve(&self, day: Day, raw: Option<&str>) -> Option<NormalizedTime> {
        let raw = raw?;
        match parse_time(raw) {
            Ok(t) => Some(t),
            Err(TimeParseError::Empty) => None,
            Err(e) => {
                if let Some(report) = &self.reporter {
                    report(day, raw, &e);
                }
                None
            }
        }
    }
}

/// Whether the vendor is open at `now`.
pub fn is_open_now<Tz: TimeZone>(hours: &WeeklyHours, now: &DateTime<Tz>) -> bool {
    HoursEvaluator::default().is_open_now(hours, now)
}

/// Whether the vendor is open at `now` and closes within `threshold_minutes`.
pub fn is_closing_soon<Tz: TimeZone>(
    hours: &WeeklyHours,
    now: &DateTime<Tz>,
    threshold_minutes: u32,
) -> bool {
    HoursEvaluator::new(threshold_minutes).is_closing_soon(hours, now)
}

pub fn vendor_status<Tz: TimeZone>(
    hours: &WeeklyHours,
    now: &DateTime<Tz>,
    threshold_minutes: u32,
) -> VendorStatus {
    HoursEvaluator::new(threshold_minutes).status(hours, now)
}

fn window_contains<Tz: TimeZone>(start: NormalizedTime, end: NormalizedTime, now: &DateTime<Tz>) -> bool {
    let now = now.num_seconds_from_midnight();

    if end.is_midnight_sentinel() {
        // Open from start through the end of the day, and through the 00:00 minute.
        return now >= start.seconds_since_midnight() || now < 60;
    }

    start.seconds_since_midnight() <= now && now <= end.seconds_since_midnight()
}

fn minutes_until_close<Tz: TimeZone>(end: NormalizedTime, now: &DateTime<Tz>) -> i64 {
    let current = (now.hour() * 60 + now.minute()) as i64;
    let close = if end.is_midnight_sentinel() {
        MINUTES_PER_DAY
    } else {
        end.minutes_since_midnight() as i64
    };
    close - current
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hours::types::DayWindow;
    use chrono::Utc;
    use chrono_tz::America::New_York;
    use std::sync::{Arc, Mutex};

    // 2024-01-01 is a Monday, 2024-01-05 a Friday.
    fn monday(h: u32, m: u32, s: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 1, h, m, s).unwrap()
    }

    fn friday(h: u32, m: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 5, h, m, 0).unwrap()
    }

    fn nine_to_five() -> WeeklyHours {
        WeeklyHours::default().with(Day::Monday, DayWindow::new("09:00", "17:00"))
    }

    fn friday_until_midnight() -> WeeklyHours {
        WeeklyHours::default().with(Day::Friday, DayWindow::new("18:00", "12:00am"))
    }

    #[test]
    fn test_open_boundaries_are_inclusive() {
        let hours = nine_to_five();

        assert!(!is_open_now(&hours, &monday(8, 59, 59)));
        assert!(is_open_now(&hours, &monday(9, 0, 0)));
        assert!(is_open_now(&hours, &monday(12, 30, 0)));
        assert!(is_open_now(&hours, &monday(17, 0, 0)));
        assert!(!is_open_now(&hours, &monday(17, 0, 1)));
        assert!(!is_open_now(&hours, &monday(17, 1, 0)));
    }

    #[test]
    fn test_closed_on_other_days() {
        let hours = nine_to_five();
        let tuesday = Utc.with_ymd_and_hms(2024, 1, 2, 12, 0, 0).unwrap();

        assert!(!is_open_now(&hours, &tuesday));
        assert_eq!(vendor_status(&hours, &tuesday, 60), VendorStatus::Closed);
    }

    #[test]
    fn test_midnight_window() {
        let hours = friday_until_midnight();

        assert!(is_open_now(&hours, &friday(23, 30)));
        assert!(is_open_now(&hours, &friday(18, 0)));
        assert!(!is_open_now(&hours, &friday(17, 59)));
    }

    #[test]
    fn test_midnight_window_covers_the_midnight_minute() {
        let hours = friday_until_midnight();
        let at = |m, s| Utc.with_ymd_and_hms(2024, 1, 5, 0, m, s).unwrap();

        assert!(is_open_now(&hours, &at(0, 0)));
        assert!(is_open_now(&hours, &at(0, 30)));
        assert!(is_open_now(&hours, &at(0, 59)));
        assert!(!is_open_now(&hours, &at(1, 0)));
    }

    #[test]
    fn test_twelve_hour_window() {
        let hours = WeeklyHours::default().with(Day::Monday, DayWindow::new("9:30 AM", "5:45 PM"));

        assert!(!is_open_now(&hours, &monday(9, 29, 0)));
        assert!(is_open_now(&hours, &monday(9, 30, 0)));
        assert!(is_open_now(&hours, &monday(17, 45, 0)));
        assert!(!is_open_now(&hours, &monday(17, 46, 0)));
    }

    #[test]
    fn test_missing_or_bad_sides_mean_closed() {
        let mut hours = WeeklyHours::default();
        hours.set(
            Day::Monday,
            Some(DayWindow {
                start: Some("09:00".to_string()),
                end: None,
            }),
        );
        assert!(!is_open_now(&hours, &monday(12, 0, 0)));

        let hours = WeeklyHours::default().with(Day::Monday, DayWindow::new("9ish", "17:00"));
        assert!(!is_open_now(&hours, &monday(12, 0, 0)));
        assert!(!is_closing_soon(&hours, &monday(16, 30, 0), 60));
    }

    #[test]
    fn test_closing_soon_default_threshold() {
        let hours = nine_to_five();
        let threshold = DEFAULT_CLOSING_SOON_MINUTES;

        assert!(is_closing_soon(&hours, &monday(16, 1, 0), threshold));
        assert!(is_closing_soon(&hours, &monday(16, 59, 0), threshold));
        assert!(!is_closing_soon(&hours, &monday(15, 59, 0), threshold));
        assert!(!is_closing_soon(&hours, &monday(17, 0, 0), threshold));
        assert!(!is_closing_soon(&hours, &monday(18, 0, 0), threshold));
    }

    #[test]
    fn test_closing_soon_exactly_at_threshold() {
        let hours = nine_to_five();

        assert!(is_closing_soon(&hours, &monday(16, 0, 0), 60));
        assert!(!is_closing_soon(&hours, &monday(16, 0, 0), 59));
    }

    #[test]
    fn test_closing_soon_before_midnight() {
        let hours = friday_until_midnight();

        assert!(is_closing_soon(&hours, &friday(23, 30), 60));
        assert!(!is_closing_soon(&hours, &friday(22, 30), 60));
        assert!(is_closing_soon(&hours, &friday(22, 30), 90));
    }

    #[test]
    fn test_status_labels() {
        let hours = nine_to_five();

        assert_eq!(vendor_status(&hours, &monday(10, 0, 0), 60), VendorStatus::Open);
        assert_eq!(
            vendor_status(&hours, &monday(16, 30, 0), 60),
            VendorStatus::ClosingSoon
        );
        assert_eq!(vendor_status(&hours, &monday(20, 0, 0), 60), VendorStatus::Closed);
        assert_eq!(VendorStatus::ClosingSoon.to_string(), "closing-soon");
        assert_eq!(VendorStatus::Open.label(), "Open Now");
    }

    #[test]
    fn test_evaluates_in_local_timezone() {
        // 2024-01-01 14:30 UTC is Monday 09:30 in New York.
        let hours = nine_to_five();
        let local = monday(14, 30, 0).with_timezone(&New_York);

        assert!(is_open_now(&hours, &local));
        assert!(!is_open_now(&hours, &monday(23, 0, 0).with_timezone(&New_York)));
    }

    #[test]
    fn test_reporter_receives_bad_times() {
        let seen: Arc<Mutex<Vec<(Day, String)>>> = Arc::default();
        let sink = Arc::clone(&seen);

        let evaluator = HoursEvaluator::default().with_reporter(move |day, raw, _err| {
            sink.lock().unwrap().push((day, raw.to_string()));
        });

        let hours = WeeklyHours::default().with(Day::Monday, DayWindow::new("", "half past"));
        assert!(!evaluator.is_open_now(&hours, &monday(12, 0, 0)));

        let seen = seen.lock().unwrap();
        assert_eq!(seen.as_slice(), &[(Day::Monday, "half past".to_string())]);
    }
}

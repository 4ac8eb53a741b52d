//! Free-form time parsing.
//!
//! Vendors type their hours by hand ("9am", "9:30 PM", "13:00", "12:00am"),
//! so everything the hours evaluator compares goes through [`normalize`]
//! first and comes out as a canonical 24-hour [`NormalizedTime`].

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Serialize, Serializer};

use crate::error::TimeParseError;

static TWELVE_HOUR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d{1,2})(?::(\d{2}))?(am|pm)$").unwrap());

static TWENTY_FOUR_HOUR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d{1,2}):(\d{2})$").unwrap());

/// Stricter 24-hour form accepted by the vendor admin form: two-digit hour, 00-23.
static ADMIN_TWENTY_FOUR_HOUR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([01]\d|2[0-3]):[0-5]\d$").unwrap());

/// Spellings of midnight that map straight to [`MIDNIGHT_SENTINEL`].
const MIDNIGHT_INPUTS: [&str; 3] = ["00:00", "24:00", "12:00am"];

/// Closing time used for "open until midnight".
///
/// Midnight is stored as the last minute of the day so a window ending at
/// midnight still compares as later than every same-day clock time.
pub const MIDNIGHT_SENTINEL: NormalizedTime = NormalizedTime {
    hour: 23,
    minute: 59,
};

/// A wall-clock time in canonical 24-hour `HH:MM` form.
///
/// Ordering is chronological, which is the same as the lexicographic order of
/// the zero-padded string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NormalizedTime {
    hour: u8,
    minute: u8,
}

impl NormalizedTime {
    /// Builds a time from 24-hour components, rejecting out-of-range values.
    pub fn new(hour: u32, minute: u32) -> Option<Self> {
        if hour > 23 || minute > 59 {
            return None;
        }
        Some(Self {
            hour: hour as u8,
            minute: minute as u8,
        })
    }

    pub fn hour(&self) -> u32 {
        self.hour as u32
    }

    pub fn minute(&self) -> u32 {
        self.minute as u32
    }

    pub fn minutes_since_midnight(&self) -> u32 {
        self.hour() * 60 + self.minute()
    }

    pub fn seconds_since_midnight(&self) -> u32 {
        self.minutes_since_midnight() * 60
    }

    pub fn is_midnight_sentinel(&self) -> bool {
        *self == MIDNIGHT_SENTINEL
    }
}

impl fmt::Display for NormalizedTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

impl Serialize for NormalizedTime {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl FromStr for NormalizedTime {
    type Err = TimeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_time(s)
    }
}

/// Normalizes an optional free-form time string.
///
/// Returns `None` both for "no time given" and for input that cannot be
/// understood. Use [`parse_time`] to tell the two apart.
pub fn normalize(raw: Option<&str>) -> Option<NormalizedTime> {
    parse_time(raw?).ok()
}

/// Parses a free-form time string into a [`NormalizedTime`].
///
/// Accepts `9am`, `9:30pm`, `9:30 PM` and 24-hour `13:00`. Case and
/// whitespace are ignored. Every spelling of midnight (`00:00`, `24:00`,
/// `12:00am`, `12am`) becomes [`MIDNIGHT_SENTINEL`].
pub fn parse_time(raw: &str) -> Result<NormalizedTime, TimeParseError> {
    let cleaned = clean(raw);

    if cleaned.is_empty() {
        return Err(TimeParseError::Empty);
    }

    if MIDNIGHT_INPUTS.contains(&cleaned.as_str()) {
        return Ok(MIDNIGHT_SENTINEL);
    }

    let (hour, minute) = if let Some(caps) = TWELVE_HOUR.captures(&cleaned) {
        let hour = number(&caps[1])?;
        let minute = caps.get(2).map(|m| number(m.as_str())).transpose()?.unwrap_or(0);

        if !(1..=12).contains(&hour) {
            return Err(TimeParseError::HourOutOfRange(hour));
        }

        let hour = match &caps[3] {
            "pm" if hour < 12 => hour + 12,
            "am" if hour == 12 => 0,
            _ => hour,
        };
        (hour, minute)
    } else if let Some(caps) = TWENTY_FOUR_HOUR.captures(&cleaned) {
        (number(&caps[1])?, number(&caps[2])?)
    } else {
        return Err(TimeParseError::Unrecognized(raw.to_string()));
    };

    if hour > 23 {
        return Err(TimeParseError::HourOutOfRange(hour));
    }
    if minute > 59 {
        return Err(TimeParseError::MinuteOutOfRange(minute));
    }

    match NormalizedTime::new(hour, minute) {
        Some(t) if t.minutes_since_midnight() == 0 => Ok(MIDNIGHT_SENTINEL),
        Some(t) => Ok(t),
        None => Err(TimeParseError::Unrecognized(raw.to_string())),
    }
}

/// Checks a time field the way the vendor admin form does: blank is fine,
/// otherwise it must be a 12-hour time (`9 AM`, `9:00 PM`) or a 24-hour time
/// with a two-digit hour from `00` to `23` (`09:05`, `13:00`).
///
/// Stricter than [`parse_time`], which also takes `9:05`, `0:00` and `24:00`.
pub fn validate_time_input(raw: Option<&str>) -> Result<(), TimeParseError> {
    let Some(raw) = raw else {
        return Ok(());
    };
    let cleaned = clean(raw);

    if cleaned.is_empty() {
        Ok(())
    } else if TWELVE_HOUR.is_match(&cleaned) {
        parse_time(raw).map(|_| ())
    } else if ADMIN_TWENTY_FOUR_HOUR.is_match(&cleaned) {
        Ok(())
    } else {
        Err(TimeParseError::Unrecognized(raw.to_string()))
    }
}

/// Lowercases and drops all whitespace.
fn clean(raw: &str) -> String {
    raw.chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect()
}

fn number(digits: &str) -> Result<u32, TimeParseError> {
    digits
        .parse()
        .map_err(|_| TimeParseError::Unrecognized(digits.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn norm(s: &str) -> Option<String> {
        normalize(Some(s)).map(|t| t.to_string())
    }

    #[test]
    fn test_twelve_hour_forms() {
        assert_eq!(norm("9:00 AM").as_deref(), Some("09:00"));
        assert_eq!(norm("9 PM").as_deref(), Some("21:00"));
        assert_eq!(norm("9am").as_deref(), Some("09:00"));
        assert_eq!(norm("9:30pm").as_deref(), Some("21:30"));
        assert_eq!(norm("12pm").as_deref(), Some("12:00"));
        assert_eq!(norm("12:30am").as_deref(), Some("00:30"));
        assert_eq!(norm("11:59 pm").as_deref(), Some("23:59"));
    }

    #[test]
    fn test_twenty_four_hour_forms() {
        assert_eq!(norm("13:00").as_deref(), Some("13:00"));
        assert_eq!(norm("09:05").as_deref(), Some("09:05"));
        assert_eq!(norm("9:05").as_deref(), Some("09:05"));
        assert_eq!(norm(" 17 : 45 ").as_deref(), Some("17:45"));
    }

    #[test]
    fn test_midnight_inputs_map_to_sentinel() {
        for input in ["00:00", "24:00", "12:00am", "12:00 AM", "12am", "0:00"] {
            assert_eq!(norm(input).as_deref(), Some("23:59"), "input {input:?}");
        }
    }

    #[test]
    fn test_empty_and_absent() {
        assert_eq!(normalize(None), None);
        assert_eq!(normalize(Some("")), None);
        assert_eq!(normalize(Some("   ")), None);
        assert_eq!(parse_time(" "), Err(TimeParseError::Empty));
    }

    #[test]
    fn test_malformed_input() {
        assert_eq!(norm("noon"), None);
        assert_eq!(norm("9"), None);
        assert_eq!(norm("9:5pm"), None);
        assert_eq!(norm("25:00"), None);
        assert_eq!(norm("13pm"), None);
        assert_eq!(norm("0am"), None);
        assert_eq!(norm("10:75"), None);
        assert_eq!(norm("9:00 AM extra"), None);
    }

    #[test]
    fn test_parse_error_reasons() {
        assert_eq!(parse_time("25:00"), Err(TimeParseError::HourOutOfRange(25)));
        assert_eq!(parse_time("13pm"), Err(TimeParseError::HourOutOfRange(13)));
        assert_eq!(parse_time("10:75"), Err(TimeParseError::MinuteOutOfRange(75)));
        assert!(matches!(
            parse_time("soon"),
            Err(TimeParseError::Unrecognized(_))
        ));
    }

    #[test]
    fn test_validate_time_input() {
        assert!(validate_time_input(None).is_ok());
        assert!(validate_time_input(Some("")).is_ok());
        assert!(validate_time_input(Some("9:00 AM")).is_ok());
        assert!(validate_time_input(Some("13:00")).is_ok());
        assert!(validate_time_input(Some("late")).is_err());
    }

    #[test]
    fn test_validate_time_input_needs_two_digit_24_hour() {
        assert!(validate_time_input(Some("09:05")).is_ok());
        assert!(validate_time_input(Some("00:00")).is_ok());
        assert!(validate_time_input(Some("23:59")).is_ok());
        assert!(validate_time_input(Some("12:00 am")).is_ok());
        assert!(validate_time_input(Some("9 PM")).is_ok());

        assert!(validate_time_input(Some("24:00")).is_err());
        assert!(validate_time_input(Some("0:00")).is_err());
        assert!(validate_time_input(Some("9:05")).is_err());
        assert!(validate_time_input(Some("13pm")).is_err());
        assert!(validate_time_input(Some("10:75")).is_err());

        // Still normalizable, just not accepted by the form.
        assert!(normalize(Some("9:05")).is_some());
    }

    #[test]
    fn test_ordering_matches_string_order() {
        let a: NormalizedTime = "9am".parse().unwrap();
        let b: NormalizedTime = "10:30".parse().unwrap();
        assert!(a < b);
        assert!(a.to_string() < b.to_string());
        assert_eq!(b.minutes_since_midnight(), 630);
    }

    #[test]
    fn test_serializes_as_string() {
        let t = NormalizedTime::new(7, 5).unwrap();
        assert_eq!(serde_json::to_string(&t).unwrap(), "\"07:05\"");
    }

    proptest! {
        #[test]
        fn prop_twelve_hour_conversion(hour in 1u32..=12, minute in 0u32..60, pm in any::<bool>()) {
            let suffix = if pm { "pm" } else { "am" };
            let t = parse_time(&format!("{hour}:{minute:02} {suffix}")).unwrap();

            let expected = match (pm, hour) {
                (true, h) if h < 12 => h + 12,
                (false, 12) => 0,
                (_, h) => h,
            };

            if expected == 0 && minute == 0 {
                prop_assert!(t.is_midnight_sentinel());
            } else {
                prop_assert_eq!(t.hour(), expected);
                prop_assert_eq!(t.minute(), minute);
            }
            prop_assert!(t <= MIDNIGHT_SENTINEL);
        }

        #[test]
        fn prop_normalize_is_idempotent(raw in "[0-9]{1,2}(:[0-9]{2})? ?(am|pm|AM|PM)?") {
            if let Some(once) = normalize(Some(&raw)) {
                let twice = normalize(Some(&once.to_string()));
                prop_assert_eq!(twice, Some(once));
            }
        }
    }
}

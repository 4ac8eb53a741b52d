//! Weekly schedule records as they arrive from the content store.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::time::normalize;

/// Day of the week, keyed the way vendor schedules store it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Day {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Day {
    pub const ALL: [Day; 7] = [
        Day::Monday,
        Day::Tuesday,
        Day::Wednesday,
        Day::Thursday,
        Day::Friday,
        Day::Saturday,
        Day::Sunday,
    ];

    /// Lowercase English key, e.g. `"friday"`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Day::Monday => "monday",
            Day::Tuesday => "tuesday",
            Day::Wednesday => "wednesday",
            Day::Thursday => "thursday",
            Day::Friday => "friday",
            Day::Saturday => "saturday",
            Day::Sunday => "sunday",
        }
    }
}

impl From<chrono::Weekday> for Day {
    fn from(weekday: chrono::Weekday) -> Self {
        match weekday {
            chrono::Weekday::Mon => Day::Monday,
            chrono::Weekday::Tue => Day::Tuesday,
            chrono::Weekday::Wed => Day::Wednesday,
            chrono::Weekday::Thu => Day::Thursday,
            chrono::Weekday::Fri => Day::Friday,
            chrono::Weekday::Sat => Day::Saturday,
            chrono::Weekday::Sun => Day::Sunday,
        }
    }
}

impl fmt::Display for Day {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Opening and closing time for a single day, exactly as the vendor typed them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayWindow {
    pub start: Option<String>,
    pub end: Option<String>,
}

impl DayWindow {
    pub fn new(start: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            start: Some(start.into()),
            end: Some(end.into()),
        }
    }

    fn has_any_time(&self) -> bool {
        let filled = |s: &Option<String>| s.as_deref().is_some_and(|s| !s.is_empty());
        filled(&self.start) || filled(&self.end)
    }
}

/// A vendor's declared weekly schedule.
///
/// A missing day means closed all day.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WeeklyHours {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub monday: Option<DayWindow>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tuesday: Option<DayWindow>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wednesday: Option<DayWindow>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thursday: Option<DayWindow>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub friday: Option<DayWindow>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub saturday: Option<DayWindow>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sunday: Option<DayWindow>,
}

impl WeeklyHours {
    pub fn get(&self, day: Day) -> Option<&DayWindow> {
        self.slot(day).as_ref()
    }

    pub fn set(&mut self, day: Day, window: Option<DayWindow>) {
        *self.slot_mut(day) = window;
    }

    /// Builder form of [`WeeklyHours::set`].
    pub fn with(mut self, day: Day, window: DayWindow) -> Self {
        self.set(day, Some(window));
        self
    }

    /// Days that have a window, Monday first.
    pub fn days(&self) -> impl Iterator<Item = (Day, &DayWindow)> {
        Day::ALL
            .into_iter()
            .filter_map(|day| self.get(day).map(|w| (day, w)))
    }

    /// Rewrites every stored time into canonical `HH:MM` form.
    ///
    /// Days with neither a start nor an end are dropped. A side that cannot
    /// be normalized becomes `None`.
    pub fn normalized(&self) -> WeeklyHours {
        let mut out = WeeklyHours::default();
        for (day, window) in self.days() {
            if !window.has_any_time() {
                continue;
            }
            out.set(
                day,
                Some(DayWindow {
                    start: normalize(window.start.as_deref()).map(|t| t.to_string()),
                    end: normalize(window.end.as_deref()).map(|t| t.to_string()),
                }),
            );
        }
        out
    }

    fn slot(&self, day: Day) -> &Option<DayWindow> {
        match day {
            Day::Monday => &self.monday,
            Day::Tuesday => &self.tuesday,
            Day::Wednesday => &self.wednesday,
            Day::Thursday => &self.thursday,
            Day::Friday => &self.friday,
            Day::Saturday => &self.saturday,
            Day::Sunday => &self.sunday,
        }
    }

    fn slot_mut(&mut self, day: Day) -> &mut Option<DayWindow> {
        match day {
            Day::Monday => &mut self.monday,
            Day::Tuesday => &mut self.tuesday,
            Day::Wednesday => &mut self.wednesday,
            Day::Thursday => &mut self.thursday,
            Day::Friday => &mut self.friday,
            Day::Saturday => &mut self.saturday,
            Day::Sunday => &mut self.sunday,
        }
    }
}

use chrono::{NaiveTime, Timelike};
use serde::{Deserialize, Serialize};

use crate::errors::ScheduleError;

pub const LAST_MINUTE: u16 = 24 * 60 - 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TimeOfDay(u16);

impl TimeOfDay {
    pub fn from_minutes(minutes: u16) -> Result<Self, ScheduleError> {
        if minutes > LAST_MINUTE {
            return Err(ScheduleError::InvalidTime(minutes.to_string()));
        }
        Ok(Self(minutes))
    }

    pub fn clamped(minutes: u32) -> Self {
        Self(minutes.min(LAST_MINUTE as u32) as u16)
    }

    pub fn parse(s: &str) -> Result<Self, ScheduleError> {
        let time = NaiveTime::parse_from_str(s.trim(), "%H:%M")
            .map_err(|_| ScheduleError::InvalidTime(s.to_string()))?;
        Ok(Self((time.hour() * 60 + time.minute()) as u16))
    }

    pub fn minutes(self) -> u16 {
        self.0
    }

    pub fn hhmm(self) -> String {
        format!("{:02}:{:02}", self.0 / 60, self.0 % 60)
    }

    pub fn to_naive_time(self) -> NaiveTime {
        NaiveTime::from_hms_opt(u32::from(self.0 / 60), u32::from(self.0 % 60), 0)
            .unwrap_or(NaiveTime::MIN)
    }
}

impl std::fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.hhmm())
    }
}

impl TryFrom<String> for TimeOfDay {
    type Error = ScheduleError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<TimeOfDay> for String {
    fn from(time: TimeOfDay) -> Self {
        time.hhmm()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeSlot {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub start: TimeOfDay,
    pub end: TimeOfDay,
    /// Server-computed; never sent back on publish.
    #[serde(default, skip_serializing)]
    pub is_booked: Option<bool>,
}

impl TimeSlot {
    pub fn new(start: TimeOfDay, end: TimeOfDay) -> Self {
        Self {
            id: None,
            start,
            end,
            is_booked: None,
        }
    }

    pub fn duration_minutes(&self) -> i32 {
        i32::from(self.end.minutes()) - i32::from(self.start.minutes())
    }

    pub fn overlaps(&self, other: &TimeSlot) -> bool {
        self.start < other.end && self.end > other.start
    }

    pub fn same_times(&self, other: &TimeSlot) -> bool {
        self.start == other.start && self.end == other.end
    }

    pub fn is_booked(&self) -> bool {
        self.is_booked.unwrap_or(false)
    }
}

use std::fmt;
use std::str::FromStr;

use crate::{DayOffset, Time, TimeParseError, MINUTES_PER_DAY};

/// Largest hour accepted in a time string. Tables occasionally write times of the following
/// morning as "25:30".
const MAX_HOUR: u16 = 47;

/// A wall-clock reading as written in a shift or timetable ("hh:mm" or "hh:mm:ss"),
/// in minutes since midnight. Seconds are truncated.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
pub struct ClockTime(u16);

impl ClockTime {
    pub fn from_minutes(minutes: u16) -> ClockTime {
        ClockTime(minutes)
    }

    pub fn from_hm(hours: u16, minutes: u16) -> ClockTime {
        ClockTime(hours * 60 + minutes)
    }

    pub fn in_min(&self) -> u16 {
        self.0
    }

    /// places this reading on the timeline anchored at the given day.
    pub fn on(&self, day: DayOffset) -> Time {
        Time::from_minutes(self.0 as i32 + day.in_minutes())
    }

    pub fn parse(string: &str) -> Result<ClockTime, TimeParseError> {
        let trimmed = string.trim();
        if trimmed.is_empty() {
            return Err(TimeParseError::Empty);
        }
        let splitted: Vec<&str> = trimmed.split(':').collect();
        if splitted.len() < 2 || splitted.len() > 3 {
            return Err(TimeParseError::WrongFormat(string.to_string()));
        }
        let parse_component = |s: &str| -> Result<u16, TimeParseError> {
            s.trim()
                .parse::<u16>()
                .map_err(|_| TimeParseError::WrongFormat(string.to_string()))
        };
        let hours = parse_component(splitted[0])?;
        let minutes = parse_component(splitted[1])?;
        let seconds = match splitted.get(2) {
            Some(s) => parse_component(s)?,
            None => 0,
        };
        if hours > MAX_HOUR || minutes >= 60 || seconds >= 60 {
            return Err(TimeParseError::OutOfRange(string.to_string()));
        }
        Ok(ClockTime::from_hm(hours, minutes))
    }
}

impl FromStr for ClockTime {
    type Err = TimeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ClockTime::parse(s)
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let minutes = self.0 as i32 % MINUTES_PER_DAY;
        write!(f, "{:02}:{:02}", minutes / 60, minutes % 60)
    }
}

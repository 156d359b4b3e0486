use std::fmt;
use std::ops::{Add, Sub};

use serde::{Deserialize, Serialize};

use crate::{ClockTime, Duration};

pub const MINUTES_PER_DAY: i32 = 1440;

/// A point on the extended timeline of the planning day, in minutes since its midnight.
/// `Time(-120)` is 22:00 of the previous day, `Time(1500)` is 01:00 of the next day.
#[derive(
    Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Time(i32);

/// Number of calendar days an event lies after (positive) or before (negative) the day its
/// timeline is anchored to.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
pub struct DayOffset(i32);

////////////////////////////////////////////////////////////////////
//////////////////////////// Time //////////////////////////////////
////////////////////////////////////////////////////////////////////

impl Time {
    pub const MIDNIGHT: Time = Time(0);
    pub const NEXT_MIDNIGHT: Time = Time(MINUTES_PER_DAY);

    pub fn from_minutes(minutes: i32) -> Time {
        Time(minutes)
    }

    pub fn in_min(&self) -> i32 {
        self.0
    }

    /// the calendar day (relative to the planning day) this time falls on.
    pub fn day_offset(&self) -> DayOffset {
        DayOffset(self.0.div_euclid(MINUTES_PER_DAY))
    }

    /// the wall-clock reading of this time, ignoring the day.
    pub fn clock(&self) -> ClockTime {
        ClockTime::from_minutes(self.0.rem_euclid(MINUTES_PER_DAY) as u16)
    }

    /// the same instant seen from a timeline anchored `offset` days earlier
    /// (i.e. `Time(60).shifted(DayOffset::NEXT_DAY) == Time(1500)`).
    pub fn shifted(&self, offset: DayOffset) -> Time {
        Time(self.0 + offset.in_minutes())
    }
}

impl Add<Duration> for Time {
    type Output = Self;

    fn add(self, other: Duration) -> Self {
        Time(self.0 + other.in_min())
    }
}

impl Sub<Duration> for Time {
    type Output = Self;

    fn sub(self, other: Duration) -> Self {
        Time(self.0 - other.in_min())
    }
}

impl Sub for Time {
    type Output = Duration;

    fn sub(self, other: Self) -> Duration {
        Duration::from_minutes(self.0 - other.0)
    }
}

impl fmt::Display for Time {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let offset = self.day_offset();
        if offset == DayOffset::SAME_DAY {
            write!(f, "{}", self.clock())
        } else {
            write!(f, "{}{:+}d", self.clock(), offset.0)
        }
    }
}

////////////////////////////////////////////////////////////////////
////////////////////////// DayOffset ///////////////////////////////
////////////////////////////////////////////////////////////////////

impl DayOffset {
    pub const PREVIOUS_DAY: DayOffset = DayOffset(-1);
    pub const SAME_DAY: DayOffset = DayOffset(0);
    pub const NEXT_DAY: DayOffset = DayOffset(1);

    pub fn days(days: i32) -> DayOffset {
        DayOffset(days)
    }

    pub fn in_days(&self) -> i32 {
        self.0
    }

    pub fn in_minutes(&self) -> i32 {
        self.0 * MINUTES_PER_DAY
    }
}

impl Add for DayOffset {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        DayOffset(self.0 + other.0)
    }
}

use std::fmt;
use std::iter::Sum;
use std::ops::{Add, Sub};

use serde::{Deserialize, Serialize};

/// A length of time in whole minutes. Negative values are allowed as intermediate results.
#[derive(
    Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Duration(i32);

impl Duration {
    pub const ZERO: Duration = Duration(0);

    pub fn from_minutes(minutes: i32) -> Duration {
        Duration(minutes)
    }

    /// rounds up to the next whole minute, so a travel time is never under-estimated.
    pub fn from_minutes_ceil(minutes: f64) -> Duration {
        Duration(minutes.ceil() as i32)
    }

    pub fn in_min(&self) -> i32 {
        self.0
    }

    pub fn is_negative(&self) -> bool {
        self.0 < 0
    }
}

impl Add for Duration {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Duration(self.0 + other.0)
    }
}

impl Sub for Duration {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Duration(self.0 - other.0)
    }
}

impl Sum for Duration {
    fn sum<I>(iter: I) -> Self
    where
        I: Iterator<Item = Self>,
    {
        iter.fold(Duration::ZERO, |a, b| a + b)
    }
}

impl fmt::Display for Duration {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let minutes = self.0.abs();
        write!(f, "{}{:02}:{:02}h", sign, minutes / 60, minutes % 60)
    }
}

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{DayOffset, Duration, Time};

/// A closed time window `[start, end]`. An interval with `start > end` is inverted and treated
/// as empty.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
pub struct Interval {
    start: Time,
    end: Time,
}

impl Interval {
    pub fn new(start: Time, end: Time) -> Interval {
        Interval { start, end }
    }

    pub fn zero_length_at(time: Time) -> Interval {
        Interval {
            start: time,
            end: time,
        }
    }

    pub fn start(&self) -> Time {
        self.start
    }

    pub fn end(&self) -> Time {
        self.end
    }

    pub fn length(&self) -> Duration {
        self.end - self.start
    }

    pub fn is_degenerate(&self) -> bool {
        self.start == self.end
    }

    pub fn is_inverted(&self) -> bool {
        self.start > self.end
    }

    pub fn contains(&self, other: &Interval) -> bool {
        self.start <= other.start && other.end <= self.end
    }

    pub fn contains_time(&self, time: Time) -> bool {
        self.start <= time && time <= self.end
    }

    /// `None` if the intersection is inverted. Touching intervals intersect in a single point.
    pub fn intersection(&self, other: &Interval) -> Option<Interval> {
        let start = self.start.max(other.start);
        let end = self.end.min(other.end);
        if start > end {
            None
        } else {
            Some(Interval { start, end })
        }
    }

    /// true iff the interiors of both intervals overlap.
    pub fn overlaps(&self, other: &Interval) -> bool {
        self.start.max(other.start) < self.end.min(other.end)
    }

    pub fn shifted(&self, offset: DayOffset) -> Interval {
        Interval {
            start: self.start.shifted(offset),
            end: self.end.shifted(offset),
        }
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "[{}, {}]", self.start, self.end)
    }
}

use std::fmt;

use crate::{ClockTime, DayOffset, Interval, Time};

/// A clock reading together with the day it belongs to, relative to the anchor day of its
/// timeline.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct TimelineEvent {
    clock: ClockTime,
    day: DayOffset,
}

impl TimelineEvent {
    pub fn new(clock: ClockTime, day: DayOffset) -> TimelineEvent {
        TimelineEvent { clock, day }
    }

    pub fn clock(&self) -> ClockTime {
        self.clock
    }

    pub fn day(&self) -> DayOffset {
        self.day
    }

    pub fn time(&self) -> Time {
        self.clock.on(self.day)
    }

    fn anchored_to(&self, anchor: DayOffset) -> TimelineEvent {
        TimelineEvent {
            clock: self.clock,
            day: self.day + anchor,
        }
    }
}

/// The events of one driver shift (start, end and breaks) placed on a single monotone timeline.
///
/// The midnight rule is applied exactly once, in [`ShiftTimeline::normalize`]: an event whose
/// clock reading is earlier than the shift start belongs to the following day. Afterwards the
/// timeline can be re-anchored to any planning day with [`ShiftTimeline::anchored_to`].
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct ShiftTimeline {
    start: TimelineEvent,
    end: TimelineEvent,
    breaks: Vec<(TimelineEvent, TimelineEvent)>,
}

impl ShiftTimeline {
    /// builds the timeline of a shift declared on the anchor day.
    pub fn normalize(
        start: ClockTime,
        end: ClockTime,
        breaks: impl IntoIterator<Item = (ClockTime, ClockTime)>,
    ) -> ShiftTimeline {
        let day_of = |clock: ClockTime| {
            if clock < start {
                DayOffset::NEXT_DAY
            } else {
                DayOffset::SAME_DAY
            }
        };
        ShiftTimeline {
            start: TimelineEvent::new(start, DayOffset::SAME_DAY),
            end: TimelineEvent::new(end, day_of(end)),
            breaks: breaks
                .into_iter()
                .map(|(break_start, break_end)| {
                    (
                        TimelineEvent::new(break_start, day_of(break_start)),
                        TimelineEvent::new(break_end, day_of(break_end)),
                    )
                })
                .collect(),
        }
    }

    /// the same shift seen from a planning day `anchor` days away from the day it was
    /// declared on. A shift of yesterday is `anchored_to(DayOffset::PREVIOUS_DAY)`.
    pub fn anchored_to(&self, anchor: DayOffset) -> ShiftTimeline {
        ShiftTimeline {
            start: self.start.anchored_to(anchor),
            end: self.end.anchored_to(anchor),
            breaks: self
                .breaks
                .iter()
                .map(|(s, e)| (s.anchored_to(anchor), e.anchored_to(anchor)))
                .collect(),
        }
    }

    pub fn start(&self) -> TimelineEvent {
        self.start
    }

    pub fn end(&self) -> TimelineEvent {
        self.end
    }

    pub fn window(&self) -> Interval {
        Interval::new(self.start.time(), self.end.time())
    }

    pub fn break_windows(&self) -> Vec<Interval> {
        self.breaks
            .iter()
            .map(|(s, e)| Interval::new(s.time(), e.time()))
            .collect()
    }

    /// true iff the shift ends on a later day than it starts.
    pub fn crosses_midnight(&self) -> bool {
        self.end.day > self.start.day
    }

    /// true iff some part of the shift lies on the anchor day after its midnight,
    /// i.e. the end is at or after 00:00 of the anchor day.
    pub fn reaches_anchor_day(&self) -> bool {
        self.end.time() >= Time::MIDNIGHT
    }
}

impl fmt::Display for ShiftTimeline {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "shift {}", self.window())?;
        for b in self.break_windows() {
            write!(f, " break {}", b)?;
        }
        Ok(())
    }
}

//! Minute-based time handling for one planning day.
//!
//! All times of a planning day live on one extended timeline measured in minutes relative to
//! midnight of that day. Times before midnight are negative (e.g. the pre-midnight buffer),
//! times after the following midnight exceed 1440.
mod clock_time;
mod duration;
mod error;
mod interval;
mod shift_timeline;
mod time_point;
mod weekday;

pub use clock_time::ClockTime;
pub use duration::Duration;
pub use error::TimeParseError;
pub use interval::Interval;
pub use shift_timeline::{ShiftTimeline, TimelineEvent};
pub use time_point::{DayOffset, Time, MINUTES_PER_DAY};
pub use weekday::{parse_weekday, weekday_name};

use std::fmt;

use serde::Serialize;
use time::{Interval, Time};

use crate::base_types::{BusId, DepotId, PassengerCount};

pub const MAX_BREAKS: usize = 2;

/// A vehicle/driver duty window available to the solver. Both break slots are always filled;
/// a zero-length break means "no break".
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Bus {
    id: BusId,
    capacity: PassengerCount,
    shift_start: Time,
    shift_end: Time,
    breaks: [Interval; MAX_BREAKS],
    depot_id: DepotId,
}

// static functions
impl Bus {
    pub fn new(
        id: BusId,
        capacity: PassengerCount,
        window: Interval,
        breaks: [Interval; MAX_BREAKS],
        depot_id: DepotId,
    ) -> Bus {
        Bus {
            id,
            capacity,
            shift_start: window.start(),
            shift_end: window.end(),
            breaks,
            depot_id,
        }
    }

    /// breaks are placed as zero-length windows at `no_break_at`.
    pub fn without_breaks(
        id: BusId,
        capacity: PassengerCount,
        window: Interval,
        no_break_at: Time,
        depot_id: DepotId,
    ) -> Bus {
        Bus::new(
            id,
            capacity,
            window,
            [Interval::zero_length_at(no_break_at); MAX_BREAKS],
            depot_id,
        )
    }
}

// methods
impl Bus {
    pub fn id(&self) -> &BusId {
        &self.id
    }

    pub fn capacity(&self) -> PassengerCount {
        self.capacity
    }

    pub fn shift_start(&self) -> Time {
        self.shift_start
    }

    pub fn shift_end(&self) -> Time {
        self.shift_end
    }

    pub fn window(&self) -> Interval {
        Interval::new(self.shift_start, self.shift_end)
    }

    pub fn breaks(&self) -> &[Interval; MAX_BREAKS] {
        &self.breaks
    }

    /// breaks of positive length
    pub fn real_breaks(&self) -> impl Iterator<Item = &Interval> + '_ {
        self.breaks.iter().filter(|b| !b.is_degenerate())
    }

    pub fn depot_id(&self) -> DepotId {
        self.depot_id
    }

    /// shift_start < shift_end, every break ordered and inside the shift, real breaks
    /// pairwise non-overlapping.
    pub fn is_consistent(&self) -> bool {
        let window = self.window();
        if self.shift_start >= self.shift_end {
            return false;
        }
        if self
            .breaks
            .iter()
            .any(|b| b.is_inverted() || !window.contains(b))
        {
            return false;
        }
        let real: Vec<&Interval> = self.real_breaks().collect();
        !real
            .iter()
            .enumerate()
            .any(|(i, a)| real[i + 1..].iter().any(|b| a.overlaps(b)))
    }
}

impl fmt::Display for Bus {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "bus {} (cap {}; depot {}; {}",
            self.id,
            self.capacity,
            self.depot_id,
            self.window()
        )?;
        for b in self.real_breaks() {
            write!(f, "; break {}", b)?;
        }
        write!(f, ")")
    }
}

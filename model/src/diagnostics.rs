use std::collections::BTreeMap;

use serde::Serialize;

use crate::demand::DemandRejection;

/// Counters of records and pairs that were skipped or defaulted while building an instance.
/// Returned next to the instance so a sweep can report them per combination.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Diagnostics {
    /// routes excluded for structural violations
    pub malformed_routes: usize,
    /// stop pairs without travel time because a coordinate is missing
    pub missing_coordinates: usize,
    /// stops seen with more than one coordinate
    pub conflicting_coordinates: usize,
    /// routes ignored by the horizon because the return trip to the depot is unknown
    pub missing_travel_times: usize,
    /// time strings that could not be parsed and were read as 00:00
    pub unparseable_times: usize,
    /// breaks that left their shift after normalization and were dropped
    pub breaks_outside_shift: usize,
    /// breaks overlapping an earlier break of the same shift, dropped
    pub overlapping_breaks: usize,
    /// shifts with an empty availability window
    pub degenerate_shifts: usize,
    pub demand_rejections: BTreeMap<DemandRejection, usize>,
}

impl Diagnostics {
    pub fn reject_demand(&mut self, reason: DemandRejection) {
        *self.demand_rejections.entry(reason).or_insert(0) += 1;
    }

    pub fn rejected_demand(&self) -> usize {
        self.demand_rejections.values().sum()
    }

    pub fn merge(&mut self, other: &Diagnostics) {
        self.malformed_routes += other.malformed_routes;
        self.missing_coordinates += other.missing_coordinates;
        self.conflicting_coordinates += other.conflicting_coordinates;
        self.missing_travel_times += other.missing_travel_times;
        self.unparseable_times += other.unparseable_times;
        self.breaks_outside_shift += other.breaks_outside_shift;
        self.overlapping_breaks += other.overlapping_breaks;
        self.degenerate_shifts += other.degenerate_shifts;
        for (reason, count) in other.demand_rejections.iter() {
            *self.demand_rejections.entry(*reason).or_insert(0) += count;
        }
    }

    /// total number of skipped or defaulted items.
    pub fn total(&self) -> usize {
        self.malformed_routes
            + self.missing_coordinates
            + self.conflicting_coordinates
            + self.missing_travel_times
            + self.unparseable_times
            + self.breaks_outside_shift
            + self.overlapping_breaks
            + self.degenerate_shifts
            + self.rejected_demand()
    }
}

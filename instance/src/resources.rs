//! Candidate fleet of one depot and day.
//!
//! Every operating regime has its own generator. All of them share the [`ResourceContext`] and
//! produce buses in a deterministic order: shifts sorted by (depot, shift id), capacities
//! ascending, buses of the planning day before continuations of the previous day.
mod breaks;
mod capacity;
mod unconstrained;

use std::collections::BTreeSet;

use chrono::{Datelike, NaiveDate, Weekday};
use itertools::Itertools;
use log::warn;

use model::base_types::{DepotId, PassengerCount};
use model::buses::Bus;
use model::config::Config;
use model::depots::Depot;
use model::diagnostics::Diagnostics;
use model::error::ConfigError;
use model::regimes::{FleetScope, OperatingRegime};
use model::routes::Route;
use model::shifts::ShiftRecord;
use model::vehicles::{distinct_capacities, VehicleRecord};

use crate::horizon::Horizon;

/// Read-only inputs of the resource generation for one (depot, date).
pub struct ResourceContext<'a> {
    pub depot: &'a Depot,
    pub date: NaiveDate,
    /// route trips of the depot on the weekday of `date`
    pub routes: &'a [&'a Route],
    pub horizon: Horizon,
    pub shifts: &'a [ShiftRecord],
    pub vehicles: &'a [VehicleRecord],
    pub config: &'a Config,
}

pub fn generate_resources(
    regime: OperatingRegime,
    context: &ResourceContext,
    diagnostics: &mut Diagnostics,
) -> Result<Vec<Bus>, ConfigError> {
    match regime {
        OperatingRegime::Unconstrained => Ok(unconstrained::generate(context)),
        OperatingRegime::Capacity => {
            capacity::generate(context, context.config.capacity_scope)
        }
        OperatingRegime::CapacityBreaks => {
            breaks::generate(context, FleetScope::Fleet, diagnostics)
        }
        OperatingRegime::CapacityBreaksDepotLocal => {
            breaks::generate(context, FleetScope::Depot, diagnostics)
        }
    }
}

impl<'a> ResourceContext<'a> {
    fn scope_depot(&self, scope: FleetScope) -> Option<DepotId> {
        match scope {
            FleetScope::Fleet => None,
            FleetScope::Depot => Some(self.depot.id()),
        }
    }

    /// shifts of the scope that are active on `weekday`, sorted by (depot, shift id).
    fn active_shifts(
        &self,
        scope: FleetScope,
        weekday: Weekday,
    ) -> Result<Vec<&'a ShiftRecord>, ConfigError> {
        let depot = self.scope_depot(scope);
        let mut active = Vec::new();
        for shift in self
            .shifts
            .iter()
            .filter(|s| depot.map_or(true, |d| s.depot_id == d))
            .sorted_by(|a, b| (a.depot_id, &a.shift_id).cmp(&(b.depot_id, &b.shift_id)))
        {
            if shift.is_active_on(weekday)? {
                active.push(shift);
            }
        }
        Ok(active)
    }

    /// distinct vehicle capacities of the scope, ascending. An empty pool falls back to the
    /// configured capacity, if any.
    fn capacities(&self, scope: FleetScope) -> BTreeSet<PassengerCount> {
        let capacities = distinct_capacities(self.vehicles, self.scope_depot(scope));
        if !capacities.is_empty() {
            return capacities;
        }
        match self.config.fallback_capacity {
            Some(fallback) => {
                warn!(
                    "depot {} on {}: no vehicles in the {} pool, using fallback capacity {}",
                    self.depot.name(),
                    self.date,
                    scope,
                    fallback
                );
                BTreeSet::from([fallback])
            }
            None => {
                warn!(
                    "depot {} on {}: no vehicles in the {} pool, no buses are generated",
                    self.depot.name(),
                    self.date,
                    scope
                );
                BTreeSet::new()
            }
        }
    }

    fn weekday(&self) -> Weekday {
        self.date.weekday()
    }
}

#[cfg(test)]
#[path = "resources/tests.rs"]
mod tests;

use chrono::{Datelike, NaiveDate};
use log::{debug, warn};
use serde::Serialize;
use time::{Duration, Time};

use model::base_types::StopId;
use model::depots::Depot;
use model::diagnostics::Diagnostics;
use model::routes::Routes;
use model::travel_times::TravelTimes;

/// Latest time any vehicle of a depot could be back at the depot on a planning day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Horizon {
    latest_return: Time,
    contributing_routes: usize,
}

impl Horizon {
    pub fn new(latest_return: Time, contributing_routes: usize) -> Horizon {
        Horizon {
            latest_return,
            contributing_routes,
        }
    }

    pub fn latest_return(&self) -> Time {
        self.latest_return
    }

    /// routes whose return to the depot is known. 0 means the horizon is a placeholder.
    pub fn contributing_routes(&self) -> usize {
        self.contributing_routes
    }

    pub fn is_empty(&self) -> bool {
        self.contributing_routes == 0
    }
}

/// last stop time plus the travel time from the last stop back to the depot, maximized over all
/// route trips of the depot on the weekday of `date`. Rounded up to whole minutes.
pub fn compute_horizon(
    depot: &Depot,
    date: NaiveDate,
    routes: &Routes,
    travel_times: &TravelTimes,
    diagnostics: &mut Diagnostics,
) -> Horizon {
    let mut latest_return: Option<Time> = None;
    let mut contributing_routes = 0;

    for route in routes.of_depot_on(depot.id(), date.weekday()) {
        let last = route.last_stop();
        match travel_times.time(last.stop_id, StopId::DEPOT) {
            Some(minutes) => {
                let back = last.time + Duration::from_minutes_ceil(minutes);
                latest_return = Some(latest_return.map_or(back, |t| t.max(back)));
                contributing_routes += 1;
            }
            None => {
                warn!(
                    "depot {}: no travel time from stop {} back to the depot, route {} trip {} is ignored for the horizon",
                    depot.name(),
                    last.stop_id,
                    route.route_id(),
                    route.trip_id()
                );
                diagnostics.missing_travel_times += 1;
            }
        }
    }

    match latest_return {
        Some(latest_return) => {
            debug!(
                "depot {} on {}: horizon {} from {} routes",
                depot.name(),
                date,
                latest_return,
                contributing_routes
            );
            Horizon::new(latest_return, contributing_routes)
        }
        None => {
            warn!(
                "depot {} on {}: no route contributes to the horizon, using {}",
                depot.name(),
                date,
                Time::MIDNIGHT
            );
            Horizon::new(Time::MIDNIGHT, 0)
        }
    }
}

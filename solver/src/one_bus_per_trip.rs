use std::collections::BTreeSet;
use std::sync::Arc;
use std::time::Duration as StdDuration;

use itertools::Itertools;
use log::{debug, warn};
use time::{Duration, Interval};

use instance::problem_parameters::ProblemParameters;
use model::base_types::{BusId, Idx, PassengerCount, StopId};
use model::buses::Bus;
use model::routes::Route;

use crate::assignment::{ArcVisit, BusAssignment, SolverOutput};
use crate::error::SolverError;
use crate::solver::{Solver, SolverStatus};

/// Baseline that drives every route trip with its own bus: depot, all stops of the trip, depot.
/// Takes the first unused bus (in instance order) that is available for the whole duty and large
/// enough for the peak load. Never proves optimality.
pub struct OneBusPerTrip {
    parameters: Arc<ProblemParameters>,
    time_limit: StdDuration,
}

impl Solver for OneBusPerTrip {
    fn initialize(parameters: Arc<ProblemParameters>, time_limit: StdDuration) -> Self {
        Self {
            parameters,
            time_limit,
        }
    }

    fn solve(&self) -> Result<SolverOutput, SolverError> {
        debug!(
            "one bus per trip for {} (time limit {:?})",
            self.parameters.combination(),
            self.time_limit
        );
        let mut used: BTreeSet<&BusId> = BTreeSet::new();
        let mut assignments = Vec::new();

        for route in self.parameters.routes() {
            let duty = match self.duty_of(route) {
                Some(duty) => duty,
                None => {
                    warn!(
                        "route {} trip {} cannot be driven, no solution",
                        route.route_id(),
                        route.trip_id()
                    );
                    return Ok(SolverOutput::without_solution(SolverStatus::NoSolution));
                }
            };
            let peak = duty.iter().map(|a| a.load).max().unwrap_or(0);
            let driven = Interval::new(duty[0].departure, duty[duty.len() - 1].arrival);
            let bus = self
                .parameters
                .buses()
                .iter()
                .find(|b| !used.contains(b.id()) && can_drive(b, driven, peak));
            match bus {
                Some(bus) => {
                    used.insert(bus.id());
                    assignments.push(BusAssignment::new(bus.id().clone(), duty));
                }
                None => {
                    warn!(
                        "no free bus for route {} trip {} ({} with {} passengers), no solution",
                        route.route_id(),
                        route.trip_id(),
                        driven,
                        peak
                    );
                    return Ok(SolverOutput::without_solution(SolverStatus::NoSolution));
                }
            }
        }

        let output = SolverOutput::new(
            SolverStatus::Feasible,
            Some(assignments.len() as f64),
            assignments,
        );
        output.validate(&self.parameters)?;
        Ok(output)
    }
}

impl OneBusPerTrip {
    /// arcs depot -> stop 1 -> ... -> stop n -> depot. `None` if a depot leg has no travel time
    /// or the timetable goes back in time.
    fn duty_of(&self, route: &Route) -> Option<Vec<ArcVisit>> {
        let travel_times = self.parameters.travel_times();
        let first = route.first_stop();
        let last = route.last_stop();
        let pull_out = travel_times.time(StopId::DEPOT, first.stop_id)?;
        let pull_in = travel_times.time(last.stop_id, StopId::DEPOT)?;

        let depot = route.station_at(0);
        let mut arcs = vec![ArcVisit {
            from: depot.clone(),
            to: route.station_at(1),
            departure: first.time - Duration::from_minutes_ceil(pull_out),
            arrival: first.time,
            load: 0,
        }];
        for (a, b) in route.stops().tuple_windows() {
            if b.time < a.time {
                return None;
            }
            arcs.push(ArcVisit {
                from: route.station_at(a.position),
                to: route.station_at(b.position),
                departure: a.time,
                arrival: b.time,
                load: self.load_after(route, a.position),
            });
        }
        arcs.push(ArcVisit {
            from: route.station_at(last.position),
            to: depot,
            departure: last.time,
            arrival: last.time + Duration::from_minutes_ceil(pull_in),
            load: 0,
        });
        Some(arcs)
    }

    /// passengers on board between stop `position` and the next stop of the trip.
    fn load_after(&self, route: &Route, position: Idx) -> PassengerCount {
        let trip = route.station_at(0);
        self.parameters
            .demand()
            .iter()
            .filter(|d| d.is_on_trip_of(&trip))
            .filter(|d| {
                d.origin().stop_position() <= position && position < d.destination().stop_position()
            })
            .map(|d| d.quantity())
            .sum()
    }
}

fn can_drive(bus: &Bus, driven: Interval, peak: PassengerCount) -> bool {
    bus.capacity() >= peak
        && bus.window().contains(&driven)
        && !bus.real_breaks().any(|b| b.overlaps(&driven))
}

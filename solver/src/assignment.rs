use std::collections::BTreeSet;

use itertools::Itertools;
use serde::{Deserialize, Serialize};
use time::{Duration, Interval, Time};

use instance::problem_parameters::ProblemParameters;
use model::base_types::{BusId, Idx, ModelStation, PassengerCount};
use model::routes::Route;

use crate::error::AssignmentError;
use crate::solver::SolverStatus;

/// One traversed arc of the time-expanded network.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArcVisit {
    pub from: ModelStation,
    pub to: ModelStation,
    pub departure: Time,
    pub arrival: Time,
    pub load: PassengerCount,
}

/// The duty of one used bus: a chain of arcs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BusAssignment {
    bus: BusId,
    arcs: Vec<ArcVisit>,
    operational_duration: Duration,
    waiting_time: Duration,
}

impl BusAssignment {
    pub fn new(bus: BusId, arcs: Vec<ArcVisit>) -> BusAssignment {
        let operational_duration = match (arcs.first(), arcs.last()) {
            (Some(first), Some(last)) => last.arrival - first.departure,
            _ => Duration::ZERO,
        };
        let waiting_time = arcs
            .iter()
            .tuple_windows()
            .map(|(a, b)| b.departure - a.arrival)
            .sum();
        BusAssignment {
            bus,
            arcs,
            operational_duration,
            waiting_time,
        }
    }

    pub fn bus(&self) -> &BusId {
        &self.bus
    }

    pub fn arcs(&self) -> &[ArcVisit] {
        &self.arcs
    }

    /// from the first departure to the last arrival.
    pub fn operational_duration(&self) -> Duration {
        self.operational_duration
    }

    /// time spent between arcs.
    pub fn waiting_time(&self) -> Duration {
        self.waiting_time
    }

    pub fn max_load(&self) -> PassengerCount {
        self.arcs.iter().map(|a| a.load).max().unwrap_or(0)
    }
}

/// What a solver hands back for one instance.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SolverOutput {
    status: SolverStatus,
    objective_value: Option<f64>,
    assignments: Vec<BusAssignment>,
}

impl SolverOutput {
    pub fn new(
        status: SolverStatus,
        objective_value: Option<f64>,
        assignments: Vec<BusAssignment>,
    ) -> SolverOutput {
        SolverOutput {
            status,
            objective_value,
            assignments,
        }
    }

    pub fn without_solution(status: SolverStatus) -> SolverOutput {
        SolverOutput::new(status, None, Vec::new())
    }

    pub fn status(&self) -> SolverStatus {
        self.status
    }

    pub fn objective_value(&self) -> Option<f64> {
        self.objective_value
    }

    pub fn assignments(&self) -> &[BusAssignment] {
        &self.assignments
    }

    pub fn used_buses(&self) -> usize {
        self.assignments.len()
    }

    /// checks that every assignment uses a known bus at most once, that its arcs chain through
    /// stations of the instance forward in time within the bus shift, and that no arc carries
    /// more passengers than the bus can.
    pub fn validate(&self, parameters: &ProblemParameters) -> Result<(), AssignmentError> {
        if !self.status.has_solution() && !self.assignments.is_empty() {
            return Err(AssignmentError::AssignmentsWithoutSolution(
                self.status.to_string(),
            ));
        }
        let mut seen = BTreeSet::new();
        for assignment in self.assignments.iter() {
            let bus_id = assignment.bus();
            let bus = parameters
                .buses()
                .iter()
                .find(|b| b.id() == bus_id)
                .ok_or_else(|| AssignmentError::UnknownBus(bus_id.clone()))?;
            if !seen.insert(bus_id) {
                return Err(AssignmentError::DuplicateBus(bus_id.clone()));
            }
            if assignment.arcs.is_empty() {
                return Err(AssignmentError::EmptyDuty(bus_id.clone()));
            }

            let shift = bus.window();
            for (position, arc) in assignment.arcs.iter().enumerate() {
                for station in [&arc.from, &arc.to] {
                    if !is_known_station(parameters.routes(), station) {
                        return Err(AssignmentError::UnknownStation {
                            bus: bus_id.clone(),
                            station: station.clone(),
                        });
                    }
                }
                if arc.departure > arc.arrival {
                    return Err(AssignmentError::NonMonotoneTimes {
                        bus: bus_id.clone(),
                        position,
                    });
                }
                if let Some(time) = [arc.departure, arc.arrival]
                    .into_iter()
                    .find(|&t| !shift.contains_time(t))
                {
                    return Err(AssignmentError::OutsideShift {
                        bus: bus_id.clone(),
                        time,
                    });
                }
                if arc.load > bus.capacity() {
                    return Err(AssignmentError::CapacityExceeded {
                        bus: bus_id.clone(),
                        load: arc.load,
                        capacity: bus.capacity(),
                    });
                }
            }
            for (position, (a, b)) in assignment.arcs.iter().tuple_windows().enumerate() {
                if a.to != b.from {
                    return Err(AssignmentError::BrokenChain {
                        bus: bus_id.clone(),
                        position: position + 1,
                    });
                }
                if a.arrival > b.departure {
                    return Err(AssignmentError::NonMonotoneTimes {
                        bus: bus_id.clone(),
                        position: position + 1,
                    });
                }
            }
            if let Some(arc) = assignment.arcs.iter().find(|arc| {
                let driven = Interval::new(arc.departure, arc.arrival);
                bus.real_breaks().any(|b| b.overlaps(&driven))
            }) {
                return Err(AssignmentError::DuringBreak {
                    bus: bus_id.clone(),
                    time: arc.departure,
                });
            }
        }
        Ok(())
    }
}

fn is_known_station(routes: &[Route], station: &ModelStation) -> bool {
    routes.iter().any(|r| {
        r.route_id() == station.route()
            && r.trip_id() == station.trip()
            && r.trip_sequence() == station.trip_sequence()
            && station.stop_position() <= r.len() as Idx
    })
}

use model::base_types::{BusId, ModelStation, PassengerCount};
use time::Time;

/// A solver output that does not fit the instance it was computed for.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum AssignmentError {
    #[error("Bus {0} is not part of the instance")]
    UnknownBus(BusId),
    #[error("Bus {0} is assigned twice")]
    DuplicateBus(BusId),
    #[error("Bus {0} is assigned an empty duty")]
    EmptyDuty(BusId),
    #[error("Bus {bus}: station {station} is not part of the instance")]
    UnknownStation { bus: BusId, station: ModelStation },
    #[error("Bus {bus}: arc {position} does not continue the previous arc")]
    BrokenChain { bus: BusId, position: usize },
    #[error("Bus {bus}: arc {position} goes back in time")]
    NonMonotoneTimes { bus: BusId, position: usize },
    #[error("Bus {bus}: duty leaves the shift at {time}")]
    OutsideShift { bus: BusId, time: Time },
    #[error("Bus {bus}: drives during a break at {time}")]
    DuringBreak { bus: BusId, time: Time },
    #[error("Bus {bus}: load {load} exceeds the capacity {capacity}")]
    CapacityExceeded {
        bus: BusId,
        load: PassengerCount,
        capacity: PassengerCount,
    },
    #[error("Status {0} carries assignments")]
    AssignmentsWithoutSolution(String),
}

#[derive(thiserror::Error, Debug)]
pub enum SolverError {
    #[error("Solver backend failed: {0}")]
    Backend(String),
    #[error(transparent)]
    Assignment(#[from] AssignmentError),
}

use std::fmt;

use derive_more::Display;
use derive_more::From;
use serde::{Deserialize, Serialize, Serializer};

pub type Idx = u32;
pub type PassengerCount = u32;

/// x = longitude, y = latitude (degrees).
pub type Coordinate = geo::Point<f64>;

#[derive(
    Display, From, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct StopId(pub Idx);

impl StopId {
    /// the depot of a travel-time zone. Never part of a route body.
    pub const DEPOT: StopId = StopId(0);

    pub fn is_depot(&self) -> bool {
        *self == StopId::DEPOT
    }
}

#[derive(
    Display, From, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct DepotId(pub Idx);

#[derive(
    Display, From, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct DemandId(pub Idx);

macro_rules! string_id {
    ($name:ident) => {
        #[derive(
            Display, From, Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(pub String);

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                $name(s.to_string())
            }
        }
    };
}

string_id!(RouteId);
string_id!(TripId);
string_id!(ShiftId);

/// Identity of a generated bus. Buses derived from a shift keep the shift's identity;
/// `Continuation` marks the part of a previous-day shift running past midnight.
#[derive(Display, Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum BusId {
    #[display(fmt = "bus{}", _0)]
    Fleet(Idx),
    #[display(fmt = "d{}_{}_cap{}", depot, shift, capacity)]
    Shift {
        depot: DepotId,
        shift: ShiftId,
        capacity: PassengerCount,
    },
    #[display(fmt = "d{}_{}_cap{}_prev", depot, shift, capacity)]
    Continuation {
        depot: DepotId,
        shift: ShiftId,
        capacity: PassengerCount,
    },
}

impl BusId {
    pub fn fleet_from(idx: Idx) -> BusId {
        BusId::Fleet(idx)
    }

    pub fn shift(&self) -> Option<&ShiftId> {
        match self {
            BusId::Fleet(_) => None,
            BusId::Shift { shift, .. } => Some(shift),
            BusId::Continuation { shift, .. } => Some(shift),
        }
    }

    pub fn is_continuation(&self) -> bool {
        matches!(self, BusId::Continuation { .. })
    }
}

impl Serialize for BusId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// A boardable point of the time-expanded network: one stop position of one trip.
/// Position 0 is the depot.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ModelStation {
    route: RouteId,
    trip: TripId,
    trip_sequence: Idx,
    stop_position: Idx,
}

impl ModelStation {
    pub const DEPOT_POSITION: Idx = 0;

    pub fn new(route: RouteId, trip: TripId, trip_sequence: Idx, stop_position: Idx) -> Self {
        ModelStation {
            route,
            trip,
            trip_sequence,
            stop_position,
        }
    }

    pub fn route(&self) -> &RouteId {
        &self.route
    }

    pub fn trip(&self) -> &TripId {
        &self.trip
    }

    pub fn trip_sequence(&self) -> Idx {
        self.trip_sequence
    }

    pub fn stop_position(&self) -> Idx {
        self.stop_position
    }

    pub fn is_depot(&self) -> bool {
        self.stop_position == ModelStation::DEPOT_POSITION
    }

    /// the depot node of the same trip.
    pub fn depot(&self) -> ModelStation {
        ModelStation {
            stop_position: ModelStation::DEPOT_POSITION,
            ..self.clone()
        }
    }
}

impl fmt::Display for ModelStation {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{}/{}#{}@{}",
            self.route, self.trip, self.trip_sequence, self.stop_position
        )
    }
}

use chrono::NaiveDate;
use derive_more::Display;
use serde::{Deserialize, Serialize};

use crate::base_types::{DemandId, DepotId, ModelStation, PassengerCount};

/// A request to carry `quantity` passengers between two stations of the same trip.
/// Quantity 0 marks a synthetic coverage requirement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PassengerDemand {
    id: DemandId,
    date: NaiveDate,
    origin: ModelStation,
    destination: ModelStation,
    depot_id: DepotId,
    quantity: PassengerCount,
}

impl PassengerDemand {
    pub fn new(
        id: DemandId,
        date: NaiveDate,
        origin: ModelStation,
        destination: ModelStation,
        depot_id: DepotId,
        quantity: PassengerCount,
    ) -> PassengerDemand {
        PassengerDemand {
            id,
            date,
            origin,
            destination,
            depot_id,
            quantity,
        }
    }

    pub fn id(&self) -> DemandId {
        self.id
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn origin(&self) -> &ModelStation {
        &self.origin
    }

    pub fn destination(&self) -> &ModelStation {
        &self.destination
    }

    pub fn depot_id(&self) -> DepotId {
        self.depot_id
    }

    pub fn quantity(&self) -> PassengerCount {
        self.quantity
    }

    pub fn is_synthetic(&self) -> bool {
        self.quantity == 0
    }

    /// true iff both ends lie on the same trip as `station`.
    pub fn is_on_trip_of(&self, station: &ModelStation) -> bool {
        self.origin.depot() == station.depot()
    }
}

/// One row of the demand table, every cell as written (missing or null cells are `None`).
/// Numeric cells are kept as their text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DemandRecord {
    #[serde(deserialize_with = "crate::json_serialisation::cell_as_text")]
    pub depot_id: Option<String>,
    #[serde(deserialize_with = "crate::json_serialisation::cell_as_text")]
    pub date: Option<String>,
    #[serde(deserialize_with = "crate::json_serialisation::cell_as_text")]
    pub status: Option<String>,
    #[serde(deserialize_with = "crate::json_serialisation::cell_as_text")]
    pub route_id: Option<String>,
    #[serde(deserialize_with = "crate::json_serialisation::cell_as_text")]
    pub trip_id: Option<String>,
    #[serde(deserialize_with = "crate::json_serialisation::cell_as_text")]
    pub boarding_stop_id: Option<String>,
    #[serde(deserialize_with = "crate::json_serialisation::cell_as_text")]
    pub boarding_position: Option<String>,
    #[serde(deserialize_with = "crate::json_serialisation::cell_as_text")]
    pub alighting_stop_id: Option<String>,
    #[serde(deserialize_with = "crate::json_serialisation::cell_as_text")]
    pub alighting_position: Option<String>,
    #[serde(deserialize_with = "crate::json_serialisation::cell_as_text")]
    pub passengers: Option<String>,
}

/// Why a demand record did not make it into the instance.
#[derive(
    Display, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum DemandRejection {
    #[display(fmt = "missing field")]
    MissingField,
    #[display(fmt = "unparseable date")]
    UnparseableDate,
    #[display(fmt = "unparseable number")]
    UnparseableNumber,
    #[display(fmt = "other depot")]
    DepotMismatch,
    #[display(fmt = "other date")]
    DateMismatch,
    #[display(fmt = "already fulfilled")]
    AlreadyFulfilled,
    #[display(fmt = "unknown trip")]
    UnknownTrip,
    #[display(fmt = "trip runs more than once")]
    AmbiguousTrip,
    #[display(fmt = "stop position out of range")]
    PositionOutOfRange,
    #[display(fmt = "stop id does not match position")]
    StopMismatch,
    #[display(fmt = "alighting not after boarding")]
    InvertedPositions,
    #[display(fmt = "no passengers")]
    NonPositiveQuantity,
}

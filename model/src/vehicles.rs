use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::base_types::{DepotId, PassengerCount};

/// One row of the vehicle table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VehicleRecord {
    #[serde(default)]
    pub vehicle_id: Option<String>,
    pub depot_id: DepotId,
    pub capacity: PassengerCount,
}

/// distinct seat capacities, ascending. `None` pools the whole fleet.
pub fn distinct_capacities(
    vehicles: &[VehicleRecord],
    depot: Option<DepotId>,
) -> BTreeSet<PassengerCount> {
    vehicles
        .iter()
        .filter(|v| depot.map_or(true, |d| v.depot_id == d))
        .map(|v| v.capacity)
        .collect()
}

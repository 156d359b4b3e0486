use std::fs;

use log::{info, warn};
use serde::{Deserialize, Serialize};
use time::Time;

use crate::base_types::{Coordinate, DepotId, Idx, RouteId, StopId, TripId};
use crate::dataset::Dataset;
use crate::demand::DemandRecord;
use crate::depots::{Depot, Depots};
use crate::diagnostics::Diagnostics;
use crate::error::InputError;
use crate::routes::{Route, Routes};
use crate::shifts::ShiftRecord;
use crate::vehicles::VehicleRecord;

type Integer = u32;

/// reads a table cell written as text, number or boolean as text. Null reads as a missing cell;
/// arrays and objects are kept as their JSON text and fail later parsing of the record.
pub(crate) fn cell_as_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let cell = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(cell.and_then(|value| match value {
        serde_json::Value::Null => None,
        serde_json::Value::String(s) => Some(s),
        other => Some(other.to_string()),
    }))
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy)]
#[serde(rename_all = "camelCase")]
struct LatLon {
    lat: f64,
    lon: f64,
}

impl From<LatLon> for Coordinate {
    fn from(l: LatLon) -> Coordinate {
        Coordinate::new(l.lon, l.lat)
    }
}

#[derive(Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
struct JsonDepot {
    id: Integer,
    name: String,
    #[serde(flatten)]
    location: LatLon,
}

#[derive(Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
struct JsonRoute {
    route_id: String,
    trip_id: String,
    #[serde(default)]
    trip_sequence: Integer,
    depot_id: Integer,
    weekday: String,
    stop_ids: Vec<Integer>,
    stop_times: Vec<i32>,
    stop_names: Vec<String>,
    locations: Vec<Option<LatLon>>,
}

#[derive(Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
struct JsonInput {
    depots: Vec<JsonDepot>,
    routes: Vec<JsonRoute>,
    #[serde(default)]
    shifts: Vec<ShiftRecord>,
    #[serde(default)]
    vehicles: Vec<VehicleRecord>,
    #[serde(default)]
    demand: Vec<DemandRecord>,
}

pub fn load_dataset_from_file(path: &str) -> Result<Dataset, InputError> {
    let data = fs::read_to_string(path).map_err(|source| InputError::Io {
        path: path.to_string(),
        source,
    })?;
    let input_data: serde_json::Value = serde_json::from_str(&data)?;
    load_dataset_from_json(input_data)
}

pub fn load_dataset_from_json(input_data: serde_json::Value) -> Result<Dataset, InputError> {
    let json_input: JsonInput = serde_json::from_value(input_data)?;
    let mut diagnostics = Diagnostics::default();

    let depots = create_depots(&json_input)?;
    let routes = create_routes(&json_input, &mut diagnostics);
    info!(
        "loaded {} depots, {} trips ({} excluded), {} shifts, {} vehicles, {} demand records",
        depots.len(),
        routes.len(),
        diagnostics.malformed_routes,
        json_input.shifts.len(),
        json_input.vehicles.len(),
        json_input.demand.len()
    );

    Ok(Dataset::new(
        depots,
        routes,
        json_input.shifts,
        json_input.vehicles,
        json_input.demand,
        diagnostics,
    ))
}

fn create_depots(json_input: &JsonInput) -> Result<Depots, InputError> {
    Depots::new(
        json_input
            .depots
            .iter()
            .map(|d| Depot::new(DepotId(d.id), d.name.clone(), d.location.into()))
            .collect(),
    )
}

fn create_routes(json_input: &JsonInput, diagnostics: &mut Diagnostics) -> Routes {
    let routes = json_input
        .routes
        .iter()
        .filter_map(|r| {
            let route = Route::new(
                RouteId::from(r.route_id.as_str()),
                TripId::from(r.trip_id.as_str()),
                r.trip_sequence as Idx,
                DepotId(r.depot_id),
                &r.weekday,
                r.stop_ids.iter().map(|&s| StopId(s)).collect(),
                r.stop_times.iter().map(|&t| Time::from_minutes(t)).collect(),
                r.stop_names.clone(),
                r.locations.iter().map(|l| l.map(Coordinate::from)).collect(),
            );
            match route {
                Ok(route) => Some(route),
                Err(e) => {
                    warn!("{}; route excluded", e);
                    diagnostics.malformed_routes += 1;
                    None
                }
            }
        })
        .collect();
    Routes::new(routes)
}

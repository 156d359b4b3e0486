use std::collections::BTreeMap;
use std::{fs::File, io::Read};

use chrono::NaiveDate;
use time::Time;

use model::base_types::{Coordinate, DepotId, RouteId, ShiftId, StopId, TripId};
use model::dataset::Dataset;
use model::demand::DemandRecord;
use model::depots::Depot;
use model::json_serialisation::load_dataset_from_json;
use model::routes::{Route, Routes};
use model::shifts::{DayMarker, ShiftRecord};
use model::travel_times::{TravelTime, TravelTimes};
use model::vehicles::VehicleRecord;

pub(crate) const WEEKDAYS: [&str; 7] = [
    "monday",
    "tuesday",
    "wednesday",
    "thursday",
    "friday",
    "saturday",
    "sunday",
];

pub(crate) fn load_test_dataset() -> Dataset {
    let path = "resources/test_input.json";

    let mut file = File::open(path).unwrap();
    let mut input_data = String::new();
    file.read_to_string(&mut input_data).unwrap();
    let input_data: serde_json::Value = serde_json::from_str(&input_data).unwrap();
    load_dataset_from_json(input_data).unwrap()
}

/// 2024-01-15, a monday
pub(crate) fn monday() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 15).unwrap()
}

pub(crate) fn tuesday() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 16).unwrap()
}

pub(crate) fn depot_a() -> Depot {
    Depot::new(
        DepotId(1),
        String::from("A"),
        Coordinate::new(8.4889, 47.3914),
    )
}

/// a monday trip of depot 1; `stops` are (stop id, time)
pub(crate) fn route(route: &str, trip: &str, sequence: u32, stops: &[(u32, i32)]) -> Route {
    Route::new(
        RouteId::from(route),
        TripId::from(trip),
        sequence,
        DepotId(1),
        "monday",
        stops.iter().map(|s| StopId(s.0)).collect(),
        stops.iter().map(|s| Time::from_minutes(s.1)).collect(),
        stops.iter().map(|s| format!("stop {}", s.0)).collect(),
        stops.iter().map(|_| None).collect(),
    )
    .unwrap()
}

/// travel times of depot 1 between the depot and stops `1..=stops`: `minutes` for every pair
/// except the self pairs and the given overrides.
pub(crate) fn travel_times(
    stops: u32,
    minutes: f64,
    overrides: &[(u32, u32, f64)],
) -> TravelTimes {
    let mut entries = Vec::new();
    for origin in 0..=stops {
        for destination in 0..=stops {
            let time = if origin == destination { 0.0 } else { minutes };
            entries.push(TravelTime::new(
                DepotId(1),
                StopId(origin),
                StopId(destination),
                time / 2.0,
                time,
            ));
        }
    }
    entries.extend(overrides.iter().map(|&(o, d, time)| {
        TravelTime::new(DepotId(1), StopId(o), StopId(d), time / 2.0, time)
    }));
    TravelTimes::from_entries(DepotId(1), entries)
}

/// the single-trip day of depot "A": stops [1, 2, 3] at [0, 10, 25], 5 minutes from the depot
/// to stop 1 and 7 minutes from stop 3 back.
pub(crate) fn depot_a_day() -> (Routes, TravelTimes) {
    let routes = Routes::new(vec![route("L1", "T1", 1, &[(1, 0), (2, 10), (3, 25)])]);
    let travel_times = travel_times(3, 3.0, &[(0, 1, 5.0), (3, 0, 7.0)]);
    (routes, travel_times)
}

/// a shift of depot `depot` active on `days`; `breaks` are (start, end) strings.
pub(crate) fn shift(
    id: &str,
    depot: u32,
    start: &str,
    end: &str,
    breaks: &[(&str, &str)],
    days: &[&str],
) -> ShiftRecord {
    let break_at = |i: usize| breaks.get(i).map(|b| (b.0.to_string(), b.1.to_string()));
    let (break1_start, break1_end) = break_at(0).unzip();
    let (break2_start, break2_end) = break_at(1).unzip();
    ShiftRecord {
        shift_id: ShiftId::from(id),
        depot_id: DepotId(depot),
        shift_start: Some(start.to_string()),
        shift_end: Some(end.to_string()),
        break1_start,
        break1_end,
        break2_start,
        break2_end,
        days: WEEKDAYS
            .iter()
            .map(|w| (w.to_string(), DayMarker::Flag(days.contains(w))))
            .collect::<BTreeMap<_, _>>(),
    }
}

pub(crate) fn vehicle(depot: u32, capacity: u32) -> VehicleRecord {
    VehicleRecord {
        vehicle_id: None,
        depot_id: DepotId(depot),
        capacity,
    }
}

/// a demand record of depot 1 on `monday()`.
pub(crate) fn demand_record(
    route: &str,
    trip: &str,
    boarding_position: &str,
    alighting_position: &str,
    passengers: &str,
) -> DemandRecord {
    DemandRecord {
        depot_id: Some(String::from("1")),
        date: Some(String::from("2024-01-15")),
        status: None,
        route_id: Some(route.to_string()),
        trip_id: Some(trip.to_string()),
        boarding_stop_id: None,
        boarding_position: Some(boarding_position.to_string()),
        alighting_stop_id: None,
        alighting_position: Some(alighting_position.to_string()),
        passengers: Some(passengers.to_string()),
    }
}

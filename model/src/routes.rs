use std::collections::BTreeMap;

use chrono::Weekday;
use serde::{Serialize, Serializer};
use time::{parse_weekday, weekday_name, Time};

use crate::base_types::{Coordinate, DepotId, Idx, ModelStation, RouteId, StopId, TripId};
use crate::error::RouteError;

/// One scheduled trip of a line on one weekday. The four stop arrays are parallel and
/// non-empty; stop position `p` (1-based) refers to index `p - 1`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Route {
    route_id: RouteId,
    trip_id: TripId,
    trip_sequence: Idx,
    depot_id: DepotId,
    #[serde(serialize_with = "serialize_weekday")]
    weekday: Weekday,
    stop_ids: Vec<StopId>,
    stop_times: Vec<Time>,
    stop_names: Vec<String>,
    locations: Vec<Option<Coordinate>>,
}

/// One visit of a route, as seen through [`Route::stops`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RouteStop<'a> {
    pub position: Idx,
    pub stop_id: StopId,
    pub time: Time,
    pub name: &'a str,
    pub location: Option<Coordinate>,
}

fn serialize_weekday<S: Serializer>(weekday: &Weekday, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(weekday_name(*weekday))
}

// static functions
impl Route {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        route_id: RouteId,
        trip_id: TripId,
        trip_sequence: Idx,
        depot_id: DepotId,
        weekday: &str,
        stop_ids: Vec<StopId>,
        stop_times: Vec<Time>,
        stop_names: Vec<String>,
        locations: Vec<Option<Coordinate>>,
    ) -> Result<Route, RouteError> {
        let n = stop_ids.len();
        if n != stop_times.len() || n != stop_names.len() || n != locations.len() {
            return Err(RouteError::LengthMismatch {
                route: route_id,
                trip: trip_id,
                ids: n,
                times: stop_times.len(),
                names: stop_names.len(),
                locations: locations.len(),
            });
        }
        if n == 0 {
            return Err(RouteError::Empty {
                route: route_id,
                trip: trip_id,
            });
        }
        if stop_ids.iter().any(|s| s.is_depot()) {
            return Err(RouteError::DepotInBody {
                route: route_id,
                trip: trip_id,
            });
        }
        let weekday = match parse_weekday(weekday) {
            Ok(w) => w,
            Err(_) => {
                return Err(RouteError::UnknownWeekday {
                    route: route_id,
                    trip: trip_id,
                    weekday: weekday.to_string(),
                })
            }
        };
        Ok(Route {
            route_id,
            trip_id,
            trip_sequence,
            depot_id,
            weekday,
            stop_ids,
            stop_times,
            stop_names,
            locations,
        })
    }
}

// methods
impl Route {
    pub fn route_id(&self) -> &RouteId {
        &self.route_id
    }

    pub fn trip_id(&self) -> &TripId {
        &self.trip_id
    }

    pub fn trip_sequence(&self) -> Idx {
        self.trip_sequence
    }

    pub fn depot_id(&self) -> DepotId {
        self.depot_id
    }

    pub fn weekday(&self) -> Weekday {
        self.weekday
    }

    pub fn runs_on(&self, depot_id: DepotId, weekday: Weekday) -> bool {
        self.depot_id == depot_id && self.weekday == weekday
    }

    pub fn len(&self) -> usize {
        self.stop_ids.len()
    }

    /// always false, routes are validated to be non-empty.
    pub fn is_empty(&self) -> bool {
        self.stop_ids.is_empty()
    }

    pub fn stop_ids(&self) -> &[StopId] {
        &self.stop_ids
    }

    pub fn stops(&self) -> impl Iterator<Item = RouteStop<'_>> + '_ {
        (0..self.len()).map(move |i| self.stop_by_index(i))
    }

    pub fn first_stop(&self) -> RouteStop<'_> {
        self.stop_by_index(0)
    }

    pub fn last_stop(&self) -> RouteStop<'_> {
        self.stop_by_index(self.len() - 1)
    }

    /// 1-based; `None` for the depot position 0 and positions past the end.
    pub fn stop_at(&self, position: Idx) -> Option<RouteStop<'_>> {
        if position == 0 || position as usize > self.len() {
            return None;
        }
        Some(self.stop_by_index(position as usize - 1))
    }

    fn stop_by_index(&self, i: usize) -> RouteStop<'_> {
        RouteStop {
            position: i as Idx + 1,
            stop_id: self.stop_ids[i],
            time: self.stop_times[i],
            name: &self.stop_names[i],
            location: self.locations[i],
        }
    }

    pub fn station_at(&self, position: Idx) -> ModelStation {
        ModelStation::new(
            self.route_id.clone(),
            self.trip_id.clone(),
            self.trip_sequence,
            position,
        )
    }

    /// first and last stop of the trip.
    pub fn full_span(&self) -> (ModelStation, ModelStation) {
        (self.station_at(1), self.station_at(self.len() as Idx))
    }

    /// key used for sorting and trip lookup
    pub fn key(&self) -> (DepotId, &RouteId, Idx, &TripId) {
        (
            self.depot_id,
            &self.route_id,
            self.trip_sequence,
            &self.trip_id,
        )
    }
}

/// All valid route trips, sorted by (depot, route, trip sequence, trip).
#[derive(Debug, Clone, Default)]
pub struct Routes {
    routes: Vec<Route>,
}

impl Routes {
    pub fn new(mut routes: Vec<Route>) -> Routes {
        routes.sort_by(|a, b| a.key().cmp(&b.key()));
        Routes { routes }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Route> + '_ {
        self.routes.iter()
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// all trips of the depot regardless of the weekday (the depot's travel-time zone).
    pub fn of_depot(&self, depot_id: DepotId) -> impl Iterator<Item = &Route> + '_ {
        self.routes.iter().filter(move |r| r.depot_id == depot_id)
    }

    pub fn of_depot_on(&self, depot_id: DepotId, weekday: Weekday) -> Vec<&Route> {
        self.routes
            .iter()
            .filter(|r| r.runs_on(depot_id, weekday))
            .collect()
    }
}

/// Lookup of trips by (route id, trip id) within one depot and day. A key runs more than once a
/// day when its trips differ in trip sequence; those trips are kept in input order.
pub fn trips_by_key<'a>(
    routes: &[&'a Route],
) -> BTreeMap<(&'a RouteId, &'a TripId), Vec<&'a Route>> {
    let mut trips: BTreeMap<(&'a RouteId, &'a TripId), Vec<&'a Route>> = BTreeMap::new();
    for route in routes {
        trips
            .entry((&route.route_id, &route.trip_id))
            .or_default()
            .push(*route);
    }
    trips
}

use std::collections::btree_map::Entry;
use std::collections::BTreeMap;

use itertools::iproduct;
use log::{debug, warn};
use serde::{Serialize, Serializer};

use crate::base_types::{Coordinate, DepotId, StopId};
use crate::config::Config;
use crate::depots::Depot;
use crate::diagnostics::Diagnostics;
use crate::error::ConfigError;
use crate::routes::Routes;

/// Directed travel between two stops of one depot zone. Time in minutes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TravelTime {
    depot_id: DepotId,
    origin: StopId,
    destination: StopId,
    distance_km: f64,
    time: f64,
    involves_depot: bool,
}

impl TravelTime {
    pub fn new(
        depot_id: DepotId,
        origin: StopId,
        destination: StopId,
        distance_km: f64,
        time: f64,
    ) -> TravelTime {
        TravelTime {
            depot_id,
            origin,
            destination,
            distance_km,
            time,
            involves_depot: origin.is_depot() || destination.is_depot(),
        }
    }

    pub fn depot_id(&self) -> DepotId {
        self.depot_id
    }

    pub fn origin(&self) -> StopId {
        self.origin
    }

    pub fn destination(&self) -> StopId {
        self.destination
    }

    pub fn distance_km(&self) -> f64 {
        self.distance_km
    }

    pub fn time(&self) -> f64 {
        self.time
    }

    pub fn involves_depot(&self) -> bool {
        self.involves_depot
    }
}

/// The pair-wise travel times between all stops of one depot zone (every stop on a route of the
/// depot, plus the depot itself as [`StopId::DEPOT`]), including self-pairs.
///
/// Pairs involving a stop without coordinate are absent; they are never reported as zero.
#[derive(Debug, Clone, PartialEq)]
pub struct TravelTimes {
    depot_id: DepotId,
    entries: BTreeMap<(StopId, StopId), TravelTime>,
}

/// great-circle distance in km.
pub fn haversine_km(a: Coordinate, b: Coordinate, earth_radius_km: f64) -> f64 {
    let (lat1, lat2) = (a.y().to_radians(), b.y().to_radians());
    let d_lat = lat2 - lat1;
    let d_lon = (b.x() - a.x()).to_radians();
    let h = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lon / 2.0).sin().powi(2);
    2.0 * earth_radius_km * h.sqrt().min(1.0).asin()
}

// static functions
impl TravelTimes {
    pub fn compute(
        depot: &Depot,
        routes: &Routes,
        config: &Config,
        diagnostics: &mut Diagnostics,
    ) -> Result<TravelTimes, ConfigError> {
        config.validate()?;

        let mut zone: BTreeMap<StopId, Option<Coordinate>> = BTreeMap::new();
        zone.insert(StopId::DEPOT, Some(depot.location()));
        for route in routes.of_depot(depot.id()) {
            for stop in route.stops() {
                match zone.entry(stop.stop_id) {
                    Entry::Vacant(e) => {
                        e.insert(stop.location);
                    }
                    Entry::Occupied(mut e) => match (*e.get(), stop.location) {
                        (None, Some(location)) => {
                            e.insert(Some(location));
                        }
                        (Some(known), Some(location)) if known != location => {
                            warn!(
                                "depot {}: stop {} has conflicting coordinates, keeping ({}, {})",
                                depot.name(),
                                stop.stop_id,
                                known.y(),
                                known.x()
                            );
                            diagnostics.conflicting_coordinates += 1;
                        }
                        _ => {}
                    },
                }
            }
        }

        for (stop, _) in zone.iter().filter(|(_, location)| location.is_none()) {
            warn!(
                "depot {}: stop {} has no coordinate, its travel times are unknown",
                depot.name(),
                stop
            );
        }

        let mut entries = BTreeMap::new();
        for ((&origin, &origin_location), (&destination, &destination_location)) in
            iproduct!(zone.iter(), zone.iter())
        {
            let (from, to) = match (origin_location, destination_location) {
                (Some(from), Some(to)) => (from, to),
                _ => {
                    diagnostics.missing_coordinates += 1;
                    continue;
                }
            };
            let distance_km = if origin == destination {
                0.0
            } else {
                haversine_km(from, to, config.earth_radius_km)
            };
            entries.insert(
                (origin, destination),
                TravelTime::new(
                    depot.id(),
                    origin,
                    destination,
                    distance_km,
                    config.minutes_for_km(distance_km),
                ),
            );
        }
        debug!(
            "depot {}: {} stops, {} travel times",
            depot.name(),
            zone.len(),
            entries.len()
        );

        Ok(TravelTimes {
            depot_id: depot.id(),
            entries,
        })
    }

    /// a precomputed table. Later entries for the same pair replace earlier ones.
    pub fn from_entries(
        depot_id: DepotId,
        entries: impl IntoIterator<Item = TravelTime>,
    ) -> TravelTimes {
        TravelTimes {
            depot_id,
            entries: entries
                .into_iter()
                .map(|t| ((t.origin, t.destination), t))
                .collect(),
        }
    }
}

// methods
impl TravelTimes {
    pub fn depot_id(&self) -> DepotId {
        self.depot_id
    }

    pub fn get(&self, origin: StopId, destination: StopId) -> Option<&TravelTime> {
        self.entries.get(&(origin, destination))
    }

    /// minutes
    pub fn time(&self, origin: StopId, destination: StopId) -> Option<f64> {
        self.get(origin, destination).map(|t| t.time)
    }

    /// true iff the table has at least one entry leaving `stop`.
    pub fn has_origin(&self, stop: StopId) -> bool {
        self.entries
            .range((stop, StopId(0))..)
            .next()
            .map_or(false, |((origin, _), _)| *origin == stop)
    }

    /// sorted by (origin, destination)
    pub fn iter(&self) -> impl Iterator<Item = &TravelTime> + '_ {
        self.entries.values()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Serialize for TravelTimes {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.entries.values())
    }
}

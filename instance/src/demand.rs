//! Passenger demand of one depot and day: the real requests from the demand table, augmented with
//! zero-quantity coverage requests according to the coverage policy.
use std::collections::BTreeSet;

use chrono::NaiveDate;
use log::debug;

use model::base_types::{DemandId, Idx, ModelStation, PassengerCount, RouteId, StopId, TripId};
use model::config::Config;
use model::demand::{DemandRecord, DemandRejection, PassengerDemand};
use model::depots::Depot;
use model::diagnostics::Diagnostics;
use model::regimes::CoveragePolicy;
use model::routes::{trips_by_key, Route};

/// real demand of `depot` on `date`, in input order with ids 0, 1, ... Rejected records are
/// counted per reason.
pub fn assemble_real_demand(
    records: &[DemandRecord],
    depot: &Depot,
    date: NaiveDate,
    routes: &[&Route],
    config: &Config,
    diagnostics: &mut Diagnostics,
) -> Vec<PassengerDemand> {
    let trips = trips_by_key(routes);
    let mut demand = Vec::new();
    for record in records {
        let parsed = parse_record(record, depot, date, config).and_then(|parsed| {
            let candidates = trips
                .get(&(&parsed.route_id, &parsed.trip_id))
                .ok_or(DemandRejection::UnknownTrip)?;
            parsed.on_one_of(candidates)
        });
        match parsed {
            Ok((origin, destination, quantity)) => demand.push(PassengerDemand::new(
                DemandId(demand.len() as Idx),
                date,
                origin,
                destination,
                depot.id(),
                quantity,
            )),
            Err(reason) => diagnostics.reject_demand(reason),
        }
    }
    debug!(
        "depot {} on {}: {} demand records accepted, {} rejected",
        depot.name(),
        date,
        demand.len(),
        diagnostics.rejected_demand()
    );
    demand
}

/// adds the coverage requests of `policy`. Ids continue after the largest existing id.
/// Applying the same policy twice adds nothing the second time.
pub fn augment_demand(
    policy: CoveragePolicy,
    mut demand: Vec<PassengerDemand>,
    depot: &Depot,
    date: NaiveDate,
    routes: &[&Route],
) -> Vec<PassengerDemand> {
    let covered_trips: BTreeSet<ModelStation> = match policy {
        CoveragePolicy::OnlyDemand => return demand,
        CoveragePolicy::AllLines => routes.iter().map(|r| r.station_at(0)).collect(),
        CoveragePolicy::AllLinesWithDemand => demand
            .iter()
            .filter(|d| !d.is_synthetic())
            .map(|d| d.origin().depot())
            .collect(),
    };
    let existing: BTreeSet<(ModelStation, ModelStation)> = demand
        .iter()
        .filter(|d| d.is_synthetic())
        .map(|d| (d.origin().clone(), d.destination().clone()))
        .collect();
    let mut next_id = demand.iter().map(|d| d.id().0 + 1).max().unwrap_or(0);

    let mut added = 0;
    for route in routes {
        if !covered_trips.contains(&route.station_at(0)) {
            continue;
        }
        let (origin, destination) = route.full_span();
        if existing.contains(&(origin.clone(), destination.clone())) {
            continue;
        }
        demand.push(PassengerDemand::new(
            DemandId(next_id),
            date,
            origin,
            destination,
            depot.id(),
            0,
        ));
        next_id += 1;
        added += 1;
    }
    debug!(
        "depot {} on {}: {} coverage requests added ({})",
        depot.name(),
        date,
        added,
        policy
    );
    demand
}

/// real demand followed by the coverage requests of `policy`.
pub fn assemble_demand(
    policy: CoveragePolicy,
    records: &[DemandRecord],
    depot: &Depot,
    date: NaiveDate,
    routes: &[&Route],
    config: &Config,
    diagnostics: &mut Diagnostics,
) -> Vec<PassengerDemand> {
    let real = assemble_real_demand(records, depot, date, routes, config, diagnostics);
    augment_demand(policy, real, depot, date, routes)
}

////////////////////////////////////////////////////////////////////
////////////////////////// record parsing //////////////////////////
////////////////////////////////////////////////////////////////////

struct ParsedRecord {
    route_id: RouteId,
    trip_id: TripId,
    boarding_stop: Option<StopId>,
    boarding_position: Idx,
    alighting_stop: Option<StopId>,
    alighting_position: Idx,
    passengers: PassengerCount,
}

fn parse_record(
    record: &DemandRecord,
    depot: &Depot,
    date: NaiveDate,
    config: &Config,
) -> Result<ParsedRecord, DemandRejection> {
    let depot_field = required(&record.depot_id)?;
    let date_field = required(&record.date)?;
    let route_id = required(&record.route_id)?;
    let trip_id = required(&record.trip_id)?;
    let boarding_position = required(&record.boarding_position)?;
    let alighting_position = required(&record.alighting_position)?;
    let passengers = required(&record.passengers)?;

    if !refers_to(depot_field, depot) {
        return Err(DemandRejection::DepotMismatch);
    }
    let record_date = NaiveDate::parse_from_str(date_field, "%Y-%m-%d")
        .map_err(|_| DemandRejection::UnparseableDate)?;
    if record_date != date {
        return Err(DemandRejection::DateMismatch);
    }
    if config.exclude_fulfilled_demand
        && optional(&record.status).map_or(false, |s| config.is_fulfilled_status(s))
    {
        return Err(DemandRejection::AlreadyFulfilled);
    }

    Ok(ParsedRecord {
        route_id: RouteId::from(route_id),
        trip_id: TripId::from(trip_id),
        boarding_stop: optional(&record.boarding_stop_id)
            .map(parse_count)
            .transpose()?
            .map(StopId),
        boarding_position: parse_count(boarding_position)?,
        alighting_stop: optional(&record.alighting_stop_id)
            .map(parse_count)
            .transpose()?
            .map(StopId),
        alighting_position: parse_count(alighting_position)?,
        passengers: parse_count(passengers)?,
    })
}

impl ParsedRecord {
    /// the stations of the request on the only candidate trip it fits. A (route, trip) key that
    /// runs several times a day is resolved by the record's positions and stop ids; if more than
    /// one run fits, the record is ambiguous.
    fn on_one_of(
        &self,
        candidates: &[&Route],
    ) -> Result<(ModelStation, ModelStation, PassengerCount), DemandRejection> {
        let mut fitting = Vec::new();
        let mut first_rejection = None;
        for route in candidates {
            match self.on(route) {
                Ok(stations) => fitting.push(stations),
                Err(reason) => {
                    first_rejection.get_or_insert(reason);
                }
            }
        }
        match (fitting.pop(), fitting.is_empty()) {
            (Some(stations), true) => Ok(stations),
            (Some(_), false) => Err(DemandRejection::AmbiguousTrip),
            (None, _) => Err(first_rejection.unwrap_or(DemandRejection::UnknownTrip)),
        }
    }

    /// the stations of the request on its trip.
    fn on(
        &self,
        route: &Route,
    ) -> Result<(ModelStation, ModelStation, PassengerCount), DemandRejection> {
        let boarding = route
            .stop_at(self.boarding_position)
            .ok_or(DemandRejection::PositionOutOfRange)?;
        let alighting = route
            .stop_at(self.alighting_position)
            .ok_or(DemandRejection::PositionOutOfRange)?;
        if self.boarding_position >= self.alighting_position {
            return Err(DemandRejection::InvertedPositions);
        }
        if self.boarding_stop.map_or(false, |s| s != boarding.stop_id)
            || self.alighting_stop.map_or(false, |s| s != alighting.stop_id)
        {
            return Err(DemandRejection::StopMismatch);
        }
        if self.passengers == 0 {
            return Err(DemandRejection::NonPositiveQuantity);
        }
        Ok((
            route.station_at(self.boarding_position),
            route.station_at(self.alighting_position),
            self.passengers,
        ))
    }
}

fn optional(field: &Option<String>) -> Option<&str> {
    field
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
}

fn required(field: &Option<String>) -> Result<&str, DemandRejection> {
    optional(field).ok_or(DemandRejection::MissingField)
}

/// the depot column holds either the depot id or its name.
fn refers_to(field: &str, depot: &Depot) -> bool {
    field == depot.name() || parse_count(field).map_or(false, |id| id == depot.id().0)
}

/// whole numbers, also when written as "12.0". Negative numbers read as 0.
fn parse_count(field: &str) -> Result<Idx, DemandRejection> {
    if let Ok(n) = field.parse::<Idx>() {
        return Ok(n);
    }
    match field.parse::<f64>() {
        Ok(x) if x.is_finite() && x.fract() == 0.0 && x <= 0.0 => Ok(0),
        Ok(x) if x.is_finite() && x.fract() == 0.0 && x <= Idx::MAX as f64 => Ok(x as Idx),
        _ => Err(DemandRejection::UnparseableNumber),
    }
}

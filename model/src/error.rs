use crate::base_types::{DepotId, RouteId, ShiftId, TripId};

/// Fatal for the construction that hit it.
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    Load(#[from] ::config::ConfigError),
    #[error("Average speed must be positive, got {0} km/h")]
    NonPositiveSpeed(f64),
    #[error("Earth radius must be positive, got {0} km")]
    NonPositiveEarthRadius(f64),
    #[error("Unknown weekday in configuration: {0}")]
    UnknownWeekday(#[from] time::TimeParseError),
    #[error("Shift table has no column for weekday '{weekday}' (shift {shift})")]
    MissingWeekdayColumn { shift: ShiftId, weekday: String },
    #[error("Weekday '{0}' is not among the configured weekdays")]
    WeekdayNotPlanned(String),
}

#[derive(thiserror::Error, Debug)]
pub enum InputError {
    #[error("Failed to read input file {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("Failed to parse input json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Depot {0} is defined twice")]
    DuplicateDepot(DepotId),
}

/// Structural violations of a route record; the route is excluded.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum RouteError {
    #[error("Route {route} trip {trip} has no stops")]
    Empty { route: RouteId, trip: TripId },
    #[error("Route {route} trip {trip}: parallel arrays differ in length (ids {ids}, times {times}, names {names}, locations {locations})")]
    LengthMismatch {
        route: RouteId,
        trip: TripId,
        ids: usize,
        times: usize,
        names: usize,
        locations: usize,
    },
    #[error("Route {route} trip {trip} visits the reserved depot stop id")]
    DepotInBody { route: RouteId, trip: TripId },
    #[error("Route {route} trip {trip}: unknown weekday '{weekday}'")]
    UnknownWeekday {
        route: RouteId,
        trip: TripId,
        weekday: String,
    },
}

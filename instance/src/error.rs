use chrono::NaiveDate;

use model::base_types::{BusId, DemandId, DepotId, StopId};
use model::error::ConfigError;

/// A precondition of the instance packager is violated; no instance is produced.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum PackagingError {
    #[error("Depot {depot} has no routes on {date}")]
    NoRoutes { depot: String, date: NaiveDate },
    #[error("Depot {depot} has no buses on {date}")]
    NoBuses { depot: String, date: NaiveDate },
    #[error("No travel time leaves stop {0}")]
    MissingTravelTimes(StopId),
    #[error("Service level must lie in [0, 1], got {0}")]
    InvalidServiceLevel(f64),
    #[error("Bus {0} is generated twice")]
    DuplicateBus(BusId),
    #[error("Bus {0} has an inconsistent window or breaks")]
    InconsistentBus(BusId),
    #[error("Demand id {0} is used twice")]
    DuplicateDemand(DemandId),
}

/// Failure of the construction of one combination.
#[derive(thiserror::Error, Debug)]
pub enum InstanceError {
    #[error("Unknown depot {0}")]
    UnknownDepot(DepotId),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Packaging(#[from] PackagingError),
}

use std::collections::BTreeSet;
use std::sync::Arc;

use chrono::NaiveDate;
use serde::Serialize;
use time::Time;

use model::buses::Bus;
use model::demand::PassengerDemand;
use model::depots::Depot;
use model::regimes::{CoveragePolicy, OperatingRegime};
use model::routes::Route;
use model::travel_times::TravelTimes;

use crate::combination::Combination;
use crate::error::PackagingError;

/// The complete input of one solver run. Immutable once built.
#[derive(Debug, Clone, Serialize)]
pub struct ProblemParameters {
    depot: Depot,
    date: NaiveDate,
    regime: OperatingRegime,
    policy: CoveragePolicy,
    service_level: f64,
    horizon: Time,
    routes: Vec<Route>,
    buses: Vec<Bus>,
    travel_times: Arc<TravelTimes>,
    demand: Vec<PassengerDemand>,
}

// static functions
impl ProblemParameters {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        depot: Depot,
        combination: &Combination,
        horizon: Time,
        routes: Vec<Route>,
        buses: Vec<Bus>,
        travel_times: Arc<TravelTimes>,
        demand: Vec<PassengerDemand>,
    ) -> Result<ProblemParameters, PackagingError> {
        if routes.is_empty() {
            return Err(PackagingError::NoRoutes {
                depot: depot.name().to_string(),
                date: combination.date,
            });
        }
        if combination.regime.is_constrained() && buses.is_empty() {
            return Err(PackagingError::NoBuses {
                depot: depot.name().to_string(),
                date: combination.date,
            });
        }
        if let Some(stop) = routes
            .iter()
            .flat_map(|r| r.stop_ids().iter())
            .find(|&&s| !travel_times.has_origin(s))
        {
            return Err(PackagingError::MissingTravelTimes(*stop));
        }
        if !(0.0..=1.0).contains(&combination.service_level) {
            return Err(PackagingError::InvalidServiceLevel(
                combination.service_level,
            ));
        }

        let mut bus_ids = BTreeSet::new();
        for bus in buses.iter() {
            if !bus_ids.insert(bus.id()) {
                return Err(PackagingError::DuplicateBus(bus.id().clone()));
            }
            if !bus.is_consistent() {
                return Err(PackagingError::InconsistentBus(bus.id().clone()));
            }
        }
        let mut demand_ids = BTreeSet::new();
        if let Some(d) = demand.iter().find(|d| !demand_ids.insert(d.id())) {
            return Err(PackagingError::DuplicateDemand(d.id()));
        }

        Ok(ProblemParameters {
            depot,
            date: combination.date,
            regime: combination.regime,
            policy: combination.policy,
            service_level: combination.service_level,
            horizon,
            routes,
            buses,
            travel_times,
            demand,
        })
    }
}

// methods
impl ProblemParameters {
    pub fn depot(&self) -> &Depot {
        &self.depot
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn regime(&self) -> OperatingRegime {
        self.regime
    }

    pub fn policy(&self) -> CoveragePolicy {
        self.policy
    }

    /// share of the real passengers the solver has to carry.
    pub fn service_level(&self) -> f64 {
        self.service_level
    }

    pub fn horizon(&self) -> Time {
        self.horizon
    }

    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    pub fn buses(&self) -> &[Bus] {
        &self.buses
    }

    pub fn travel_times(&self) -> &TravelTimes {
        &self.travel_times
    }

    pub fn demand(&self) -> &[PassengerDemand] {
        &self.demand
    }

    pub fn combination(&self) -> Combination {
        Combination {
            depot: self.depot.id(),
            date: self.date,
            regime: self.regime,
            policy: self.policy,
            service_level: self.service_level,
        }
    }
}

use std::sync::Arc;

use chrono::{Datelike, NaiveDate};
use log::{info, warn};
use serde::Serialize;

use model::config::Config;
use model::dataset::Dataset;
use model::diagnostics::Diagnostics;
use model::error::ConfigError;
use model::travel_times::TravelTimes;
use time::weekday_name;

use crate::combination::Combination;
use crate::demand::assemble_demand;
use crate::error::InstanceError;
use crate::horizon::{compute_horizon, Horizon};
use crate::problem_parameters::ProblemParameters;
use crate::resources::{generate_resources, ResourceContext};

/// An instance together with what was skipped or defaulted while building it.
#[derive(Debug, Clone, Serialize)]
pub struct BuiltInstance {
    parameters: ProblemParameters,
    horizon: Horizon,
    diagnostics: Diagnostics,
}

impl BuiltInstance {
    pub fn parameters(&self) -> &ProblemParameters {
        &self.parameters
    }

    pub fn horizon(&self) -> Horizon {
        self.horizon
    }

    /// includes the routes excluded while loading the dataset.
    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    pub fn into_parameters(self) -> ProblemParameters {
        self.parameters
    }
}

/// builds the instance of one combination, computing the travel times of the depot.
pub fn build_instance(
    dataset: &Dataset,
    combination: &Combination,
    config: &Config,
) -> Result<BuiltInstance, InstanceError> {
    let depot = dataset
        .depots()
        .get(combination.depot)
        .ok_or(InstanceError::UnknownDepot(combination.depot))?;
    let mut diagnostics = Diagnostics::default();
    let travel_times = TravelTimes::compute(depot, dataset.routes(), config, &mut diagnostics)?;
    let mut built = build_instance_with(dataset, combination, config, Arc::new(travel_times))?;
    built.diagnostics.merge(&diagnostics);
    Ok(built)
}

/// builds the instance of one combination with precomputed travel times of the depot. Those
/// travel-time diagnostics are not repeated here.
pub fn build_instance_with(
    dataset: &Dataset,
    combination: &Combination,
    config: &Config,
    travel_times: Arc<TravelTimes>,
) -> Result<BuiltInstance, InstanceError> {
    let depot = dataset
        .depots()
        .get(combination.depot)
        .ok_or(InstanceError::UnknownDepot(combination.depot))?;
    let date: NaiveDate = combination.date;
    let weekday = date.weekday();

    config.validate()?;
    if !config.plans_weekday(weekday) {
        return Err(ConfigError::WeekdayNotPlanned(weekday_name(weekday).to_string()).into());
    }
    config.validate_against_shifts(dataset.shifts())?;

    let mut diagnostics = dataset.diagnostics().clone();

    let routes = dataset.routes().of_depot_on(depot.id(), weekday);
    if routes.is_empty() {
        warn!(
            "depot {}: no routes on {} ({})",
            depot.name(),
            date,
            weekday_name(weekday)
        );
    }

    let horizon = compute_horizon(
        depot,
        date,
        dataset.routes(),
        &travel_times,
        &mut diagnostics,
    );

    let context = ResourceContext {
        depot,
        date,
        routes: &routes,
        horizon,
        shifts: dataset.shifts(),
        vehicles: dataset.vehicles(),
        config,
    };
    let buses = generate_resources(combination.regime, &context, &mut diagnostics)?;

    let demand = assemble_demand(
        combination.policy,
        dataset.demand(),
        depot,
        date,
        &routes,
        config,
        &mut diagnostics,
    );

    info!(
        "{}: {} routes, {} buses, {} demand requests, horizon {}",
        combination,
        routes.len(),
        buses.len(),
        demand.len(),
        horizon.latest_return()
    );

    let parameters = ProblemParameters::new(
        depot.clone(),
        combination,
        horizon.latest_return(),
        routes.into_iter().cloned().collect(),
        buses,
        travel_times,
        demand,
    )?;

    Ok(BuiltInstance {
        parameters,
        horizon,
        diagnostics,
    })
}

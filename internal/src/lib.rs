//! Batch construction: builds the instance of every combination of the configured sweep in
//! parallel, optionally runs the baseline solver on it and records what happened.
pub mod error;

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;

use itertools::{iproduct, Itertools};
use log::{info, warn};
use rayon::prelude::*;
use serde::Serialize;

use instance::build::{build_instance_with, BuiltInstance};
use instance::combination::Combination;
use instance::error::InstanceError;
use instance::json_serialisation::write_instance_to_json;
use model::base_types::DepotId;
use model::config::Config;
use model::dataset::Dataset;
use model::diagnostics::Diagnostics;
use model::travel_times::TravelTimes;
use solver::json_serialisation::write_solver_output_to_json;
use solver::one_bus_per_trip::OneBusPerTrip;
use solver::{Solver, SolverOutput, SolverStatus};

pub use error::SweepError;

type DepotTravelTimes = Result<(Arc<TravelTimes>, Diagnostics), String>;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case", tag = "status", content = "detail")]
pub enum CombinationStatus {
    Built,
    Solved(SolverStatus),
    Failed(String),
}

impl CombinationStatus {
    pub fn is_failure(&self) -> bool {
        matches!(self, CombinationStatus::Failed(_))
    }
}

/// What came out of one combination. A failed combination keeps its reason and no instance.
pub struct CombinationOutcome {
    combination: Combination,
    status: CombinationStatus,
    instance: Option<BuiltInstance>,
    solver_output: Option<SolverOutput>,
    diagnostics: Diagnostics,
}

/// One line of the sweep summary.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SweepRecord {
    pub combination: Combination,
    pub status: CombinationStatus,
    pub routes: usize,
    pub buses: usize,
    pub demand: usize,
    pub used_buses: Option<usize>,
    pub diagnostics: Diagnostics,
}

// static functions
impl CombinationOutcome {
    fn failed(combination: Combination, reason: String, diagnostics: Diagnostics) -> Self {
        warn!("{}: {}", combination, reason);
        CombinationOutcome {
            combination,
            status: CombinationStatus::Failed(reason),
            instance: None,
            solver_output: None,
            diagnostics,
        }
    }
}

// methods
impl CombinationOutcome {
    pub fn combination(&self) -> &Combination {
        &self.combination
    }

    pub fn status(&self) -> &CombinationStatus {
        &self.status
    }

    pub fn instance(&self) -> Option<&BuiltInstance> {
        self.instance.as_ref()
    }

    pub fn solver_output(&self) -> Option<&SolverOutput> {
        self.solver_output.as_ref()
    }

    /// counters of the construction, including those of the depot's travel times.
    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    pub fn record(&self) -> SweepRecord {
        let parameters = self.instance.as_ref().map(|built| built.parameters());
        SweepRecord {
            combination: self.combination,
            status: self.status.clone(),
            routes: parameters.map_or(0, |p| p.routes().len()),
            buses: parameters.map_or(0, |p| p.buses().len()),
            demand: parameters.map_or(0, |p| p.demand().len()),
            used_buses: self.solver_output.as_ref().map(|o| o.used_buses()),
            diagnostics: self.diagnostics.clone(),
        }
    }
}

/// depots (all of the dataset if none are configured) x dates x regimes x policies x service
/// levels, in this nesting order.
pub fn combinations(dataset: &Dataset, config: &Config) -> Vec<Combination> {
    let sweep = &config.sweep;
    let depots: Vec<DepotId> = if sweep.depots.is_empty() {
        dataset.depots().iter().map(|d| d.id()).collect()
    } else {
        sweep.depots.clone()
    };
    iproduct!(
        depots.iter(),
        sweep.dates.iter(),
        sweep.regimes.iter(),
        sweep.policies.iter(),
        sweep.service_levels.iter()
    )
    .map(
        |(&depot, &date, &regime, &policy, &service_level)| Combination {
            depot,
            date,
            regime,
            policy,
            service_level,
        },
    )
    .collect()
}

/// builds every combination in parallel. Travel times are computed once per depot and shared.
/// A failing combination is recorded and does not stop the others.
pub fn run_sweep(dataset: &Dataset, config: &Config, solve: bool) -> Vec<CombinationOutcome> {
    let combinations = combinations(dataset, config);
    if combinations.is_empty() {
        warn!("the sweep has no combinations (are dates configured?)");
        return Vec::new();
    }
    info!("sweep over {} combinations", combinations.len());

    let depots = combinations.iter().map(|c| c.depot).unique().collect_vec();
    let travel_times = travel_times_per_depot(dataset, &depots, config);

    combinations
        .into_par_iter()
        .map(|combination| {
            run_combination(
                dataset,
                combination,
                config,
                travel_times.get(&combination.depot),
                solve,
            )
        })
        .collect()
}

fn travel_times_per_depot(
    dataset: &Dataset,
    depots: &[DepotId],
    config: &Config,
) -> BTreeMap<DepotId, DepotTravelTimes> {
    depots
        .par_iter()
        .map(|&id| {
            let travel_times = match dataset.depots().get(id) {
                Some(depot) => {
                    let mut diagnostics = Diagnostics::default();
                    TravelTimes::compute(depot, dataset.routes(), config, &mut diagnostics)
                        .map(|t| (Arc::new(t), diagnostics))
                        .map_err(|e| e.to_string())
                }
                None => Err(InstanceError::UnknownDepot(id).to_string()),
            };
            (id, travel_times)
        })
        .collect()
}

fn run_combination(
    dataset: &Dataset,
    combination: Combination,
    config: &Config,
    travel_times: Option<&DepotTravelTimes>,
    solve: bool,
) -> CombinationOutcome {
    let (travel_times, travel_time_diagnostics) = match travel_times {
        Some(Ok((travel_times, diagnostics))) => (travel_times.clone(), diagnostics),
        Some(Err(reason)) => {
            return CombinationOutcome::failed(
                combination,
                reason.clone(),
                Diagnostics::default(),
            )
        }
        None => {
            return CombinationOutcome::failed(
                combination,
                InstanceError::UnknownDepot(combination.depot).to_string(),
                Diagnostics::default(),
            )
        }
    };

    let built = match build_instance_with(dataset, &combination, config, travel_times) {
        Ok(built) => built,
        Err(err) => {
            return CombinationOutcome::failed(
                combination,
                err.to_string(),
                travel_time_diagnostics.clone(),
            )
        }
    };
    let mut diagnostics = built.diagnostics().clone();
    diagnostics.merge(travel_time_diagnostics);

    if !solve {
        return CombinationOutcome {
            combination,
            status: CombinationStatus::Built,
            instance: Some(built),
            solver_output: None,
            diagnostics,
        };
    }

    let solver = OneBusPerTrip::initialize(
        Arc::new(built.parameters().clone()),
        config.solver_time_limit(),
    );
    let (status, solver_output) = match solver.solve() {
        Ok(output) => (CombinationStatus::Solved(output.status()), Some(output)),
        Err(err) => {
            warn!("{}: solver failed: {}", combination, err);
            (CombinationStatus::Failed(err.to_string()), None)
        }
    };
    CombinationOutcome {
        combination,
        status,
        instance: Some(built),
        solver_output,
        diagnostics,
    }
}

pub fn sweep_summary(outcomes: &[CombinationOutcome]) -> serde_json::Value {
    let count = |f: fn(&CombinationStatus) -> bool| outcomes.iter().filter(|o| f(&o.status)).count();
    serde_json::json!({
        "combinations": outcomes.len(),
        "built": count(|s| matches!(s, CombinationStatus::Built)),
        "solved": count(|s| matches!(s, CombinationStatus::Solved(_))),
        "failed": count(CombinationStatus::is_failure),
        "records": outcomes.iter().map(|o| o.record()).collect_vec(),
    })
}

/// writes `<stem>.json` per built instance, `<stem>_solution.json` per solver output and
/// `summary.json` into the directory (created if missing).
pub fn write_sweep(outcomes: &[CombinationOutcome], directory: &Path) -> Result<(), SweepError> {
    std::fs::create_dir_all(directory)?;
    for outcome in outcomes {
        let stem = outcome.combination.file_stem();
        if let Some(built) = &outcome.instance {
            let path = directory.join(format!("{}.json", stem));
            write_instance_to_json(built, &path.to_string_lossy())?;
            if let Some(output) = &outcome.solver_output {
                let path = directory.join(format!("{}_solution.json", stem));
                write_solver_output_to_json(output, built.parameters(), &path.to_string_lossy())?;
            }
        }
    }
    let file = std::fs::File::create(directory.join("summary.json"))?;
    serde_json::to_writer_pretty(file, &sweep_summary(outcomes))?;
    Ok(())
}

#[cfg(test)]
#[path = "tests.rs"]
mod tests;

use std::collections::BTreeSet;

use chrono::NaiveDate;

use model::base_types::DepotId;
use model::config::{Config, ConfigSweep};
use model::dataset::Dataset;
use model::json_serialisation::load_dataset_from_file;
use model::regimes::{CoveragePolicy, OperatingRegime};
use solver::SolverStatus;

use super::*;

fn load_test_dataset() -> Dataset {
    load_dataset_from_file("resources/test_input.json").unwrap()
}

fn monday() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 15).unwrap()
}

fn tuesday() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 16).unwrap()
}

fn config_with(sweep: ConfigSweep) -> Config {
    Config {
        sweep,
        ..Config::default()
    }
}

fn monday_and_tuesday() -> Config {
    config_with(ConfigSweep {
        dates: vec![monday(), tuesday()],
        ..ConfigSweep::default()
    })
}

fn outcomes_of<'a>(
    outcomes: &'a [CombinationOutcome],
    depot: DepotId,
    date: NaiveDate,
) -> impl Iterator<Item = &'a CombinationOutcome> + 'a {
    outcomes
        .iter()
        .filter(move |o| o.combination().depot == depot && o.combination().date == date)
}

#[test]
fn combinations_span_the_sweep() {
    let dataset = load_test_dataset();

    let combinations = combinations(&dataset, &monday_and_tuesday());

    // 2 depots x 2 dates x 4 regimes x 3 policies x 1 service level
    assert_eq!(combinations.len(), 48);
    assert_eq!(combinations[0].depot, DepotId(1));
    assert_eq!(combinations[0].date, monday());
    assert_eq!(combinations[0].regime, OperatingRegime::Unconstrained);
    assert_eq!(combinations[0].policy, CoveragePolicy::AllLines);
    assert_eq!(combinations[47].depot, DepotId(2));
    let stems: BTreeSet<String> = combinations.iter().map(|c| c.file_stem()).collect();
    assert_eq!(stems.len(), 48);
}

#[test]
fn sweep_without_dates_is_empty() {
    let dataset = load_test_dataset();

    assert!(combinations(&dataset, &Config::default()).is_empty());
    assert!(run_sweep(&dataset, &Config::default(), false).is_empty());
}

#[test]
fn failures_are_recorded_and_the_sweep_continues() {
    let dataset = load_test_dataset();

    let outcomes = run_sweep(&dataset, &monday_and_tuesday(), false);

    assert_eq!(outcomes.len(), 48);
    for outcome in outcomes_of(&outcomes, DepotId(1), monday()) {
        assert_eq!(outcome.status(), &CombinationStatus::Built);
        assert!(outcome.instance().is_some());
        assert!(outcome.solver_output().is_none());
        // the travel-time counters are part of every record of the depot
        assert_eq!(outcome.diagnostics().missing_coordinates, 11);
        assert_eq!(outcome.diagnostics().malformed_routes, 1);
    }
    // the tuesday route of depot 1 visits a stop without coordinate
    for outcome in outcomes_of(&outcomes, DepotId(1), tuesday()) {
        assert!(outcome.status().is_failure());
        assert!(outcome.instance().is_none());
    }
}

#[test]
fn unknown_depots_fail_every_combination() {
    let dataset = load_test_dataset();
    let config = config_with(ConfigSweep {
        depots: vec![DepotId(9)],
        dates: vec![monday()],
        ..ConfigSweep::default()
    });

    let outcomes = run_sweep(&dataset, &config, false);

    assert_eq!(outcomes.len(), 12);
    assert!(outcomes.iter().all(|o| o.status().is_failure()));
    assert_eq!(sweep_summary(&outcomes)["failed"], 12);
}

#[test]
fn sweep_can_run_the_baseline() {
    let dataset = load_test_dataset();
    let config = config_with(ConfigSweep {
        depots: vec![DepotId(1)],
        dates: vec![monday()],
        regimes: vec![OperatingRegime::Capacity],
        policies: vec![CoveragePolicy::AllLines],
        service_levels: vec![1.0],
    });

    let outcomes = run_sweep(&dataset, &config, true);

    assert_eq!(outcomes.len(), 1);
    assert_eq!(
        outcomes[0].status(),
        &CombinationStatus::Solved(SolverStatus::Feasible)
    );
    let record = outcomes[0].record();
    assert_eq!(record.routes, 2);
    assert_eq!(record.buses, 9);
    assert_eq!(record.used_buses, Some(2));
}

#[test]
fn sweep_is_deterministic() {
    let dataset = load_test_dataset();
    let config = monday_and_tuesday();

    let first = sweep_summary(&run_sweep(&dataset, &config, false));
    let second = sweep_summary(&run_sweep(&dataset, &config, false));

    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );
    assert_eq!(first["records"][0]["status"]["status"], "built");
}

#[test]
fn sweep_is_written_to_directory() {
    let dataset = load_test_dataset();
    let config = config_with(ConfigSweep {
        depots: vec![DepotId(1)],
        dates: vec![monday(), tuesday()],
        regimes: vec![OperatingRegime::Capacity],
        policies: vec![CoveragePolicy::OnlyDemand],
        service_levels: vec![0.5],
    });
    let directory = std::env::temp_dir().join("build_instances_sweep_is_written_to_directory");
    let _ = std::fs::remove_dir_all(&directory);

    let outcomes = run_sweep(&dataset, &config, true);
    write_sweep(&outcomes, &directory).unwrap();

    let stem = outcomes[0].combination().file_stem();
    assert!(directory.join(format!("{}.json", stem)).exists());
    assert!(directory.join(format!("{}_solution.json", stem)).exists());
    // the failed tuesday has no instance file
    let failed_stem = outcomes[1].combination().file_stem();
    assert!(!directory.join(format!("{}.json", failed_stem)).exists());

    let summary: serde_json::Value =
        serde_json::from_reader(std::fs::File::open(directory.join("summary.json")).unwrap())
            .unwrap();
    assert_eq!(summary["combinations"], 2);
    assert_eq!(summary["solved"], 1);
    assert_eq!(summary["failed"], 1);

    std::fs::remove_dir_all(&directory).unwrap();
}

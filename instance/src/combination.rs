use chrono::NaiveDate;
use derive_more::Display;
use serde::Serialize;

use model::base_types::DepotId;
use model::regimes::{CoveragePolicy, OperatingRegime};

/// One point of a sweep: everything that selects a single instance.
#[derive(Display, Debug, Clone, Copy, PartialEq, Serialize)]
#[display(
    fmt = "depot {} on {} ({}, {}, service level {:.2})",
    depot,
    date,
    regime,
    policy,
    service_level
)]
pub struct Combination {
    pub depot: DepotId,
    pub date: NaiveDate,
    pub regime: OperatingRegime,
    pub policy: CoveragePolicy,
    pub service_level: f64,
}

impl Combination {
    /// file name stem of the instance, e.g. `d1_2024-01-15_capacity_breaks_all_lines_1.00`.
    pub fn file_stem(&self) -> String {
        format!(
            "d{}_{}_{}_{}_{:.2}",
            self.depot, self.date, self.regime, self.policy, self.service_level
        )
    }
}

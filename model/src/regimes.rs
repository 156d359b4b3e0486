use derive_more::Display;
use serde::{Deserialize, Serialize};

/// How realistic the generated fleet is.
#[derive(Display, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OperatingRegime {
    /// one bus per trip, unlimited capacity, available all day
    #[display(fmt = "unconstrained")]
    Unconstrained,
    /// one bus per (shift, capacity), available all day
    #[display(fmt = "capacity")]
    Capacity,
    /// one bus per (shift, capacity) with real shift times and breaks, fleet-wide
    #[display(fmt = "capacity_breaks")]
    CapacityBreaks,
    /// as `CapacityBreaks`, restricted to shifts and vehicles of the depot
    #[display(fmt = "capacity_breaks_depot")]
    CapacityBreaksDepotLocal,
}

impl OperatingRegime {
    pub const ALL: [OperatingRegime; 4] = [
        OperatingRegime::Unconstrained,
        OperatingRegime::Capacity,
        OperatingRegime::CapacityBreaks,
        OperatingRegime::CapacityBreaksDepotLocal,
    ];

    pub fn is_constrained(&self) -> bool {
        *self != OperatingRegime::Unconstrained
    }
}

/// Which route segments must appear in the instance even without real ridership.
#[derive(Display, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CoveragePolicy {
    #[display(fmt = "all_lines")]
    AllLines,
    #[display(fmt = "all_lines_with_demand")]
    AllLinesWithDemand,
    #[display(fmt = "only_demand")]
    OnlyDemand,
}

impl CoveragePolicy {
    pub const ALL: [CoveragePolicy; 3] = [
        CoveragePolicy::AllLines,
        CoveragePolicy::AllLinesWithDemand,
        CoveragePolicy::OnlyDemand,
    ];
}

/// Whose shifts and vehicles a depot may draw from.
#[derive(Display, Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum FleetScope {
    #[default]
    #[display(fmt = "fleet")]
    Fleet,
    #[display(fmt = "depot")]
    Depot,
}

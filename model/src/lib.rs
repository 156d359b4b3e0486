pub mod base_types;
pub mod buses;
pub mod config;
pub mod dataset;
pub mod demand;
pub mod depots;
pub mod diagnostics;
pub mod error;
pub mod regimes;
pub mod routes;
pub mod shifts;
pub mod travel_times;
pub mod vehicles;

pub mod json_serialisation;

#[cfg(test)]
#[path = "json_serialisation/tests.rs"]
mod json_serialisation_tests;

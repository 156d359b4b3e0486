pub mod build;
pub mod combination;
pub mod demand;
pub mod error;
pub mod horizon;
pub mod json_serialisation;
pub mod problem_parameters;
pub mod resources;

#[cfg(test)]
pub(crate) mod test_utilities;

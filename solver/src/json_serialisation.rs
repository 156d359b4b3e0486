use instance::problem_parameters::ProblemParameters;

use crate::assignment::SolverOutput;

pub fn write_solver_output_to_json(
    output: &SolverOutput,
    parameters: &ProblemParameters,
    path: &str,
) -> Result<(), std::io::Error> {
    let json_output = serde_json::json!({
        "combination": parameters.combination(),
        "status": output.status(),
        "objective_value": output.objective_value(),
        "used_buses": output.used_buses(),
        "assignments": output.assignments(),
    });
    let file = std::fs::File::create(path)?;
    serde_json::to_writer_pretty(file, &json_output)?;
    Ok(())
}

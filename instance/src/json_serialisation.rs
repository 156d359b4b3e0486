use crate::build::BuiltInstance;
use crate::problem_parameters::ProblemParameters;

pub fn instance_to_json(parameters: &ProblemParameters) -> serde_json::Value {
    serde_json::json!({
        "combination": parameters.combination(),
        "instance": parameters,
    })
}

/// writes the instance together with its horizon and diagnostics.
pub fn write_instance_to_json(built: &BuiltInstance, path: &str) -> Result<(), std::io::Error> {
    let json_output = serde_json::json!({
        "combination": built.parameters().combination(),
        "horizon": built.horizon(),
        "diagnostics": built.diagnostics(),
        "instance": built.parameters(),
    });
    let file = std::fs::File::create(path)?;
    serde_json::to_writer_pretty(file, &json_output)?;
    Ok(())
}

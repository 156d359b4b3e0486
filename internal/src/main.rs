use std::path::Path;
use std::time as stdtime;

use clap::Parser;
use log::{error, info};

use internal::{run_sweep, sweep_summary, write_sweep, SweepError};
use model::config::Config;
use model::json_serialisation::load_dataset_from_file;

#[derive(Parser)]
#[command(author, version, about = "builds bus duty instances for every combination of the sweep", long_about = None)]
struct Arguments {
    #[arg(long, help = "path to the input JSON file (depots, routes, shifts, vehicles, demand)")]
    input_file: String,
    #[arg(long, help = "path to a TOML, JSON or YAML configuration file")]
    configuration_file: Option<String>,
    #[arg(long, default_value = "output", help = "directory for instance files and summary.json")]
    output_directory: String,
    #[arg(long, help = "also run the one-bus-per-trip baseline on every instance")]
    solve: bool,
}

fn run(args: &Arguments) -> Result<(), SweepError> {
    let config = match &args.configuration_file {
        None => Config::default(),
        Some(f) => {
            info!("reading configuration from {f}");
            Config::from_file(f)?
        }
    };
    let dataset = load_dataset_from_file(&args.input_file)?;
    println!("\n---------- RUN: {} ----------", args.input_file);
    let start_time = stdtime::Instant::now();

    let outcomes = run_sweep(&dataset, &config, args.solve);
    write_sweep(&outcomes, Path::new(&args.output_directory))?;

    let summary = sweep_summary(&outcomes);
    println!(
        "{} combinations: {} built, {} solved, {} failed",
        summary["combinations"], summary["built"], summary["solved"], summary["failed"]
    );
    println!(
        "Running time: {:0.2}sec",
        start_time.elapsed().as_secs_f32()
    );
    Ok(())
}

fn main() {
    env_logger::init();
    let args = Arguments::parse();
    if let Err(e) = run(&args) {
        error!("build_instances failed: {e}");
        std::process::exit(1)
    }
}

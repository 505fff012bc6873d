use threebody::{Scenario, ScenarioSource};
use threebody::run_2d;

use clap::Parser;
use anyhow::Result;
use log::info;

use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(about = "Three bodies under Newtonian gravity")]
struct Args {
    /// Scenario YAML; bare names are looked up in `scenarios/` first
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// Enter the initial conditions on the console
    #[arg(short, long, conflicts_with = "file")]
    interactive: bool,

    /// Run without a window and print the final state
    #[arg(long)]
    headless: bool,

    /// Number of steps for a headless run
    #[arg(long, default_value_t = 1000, requires = "headless")]
    steps: usize,
}

fn resolve_scenario_path(file: PathBuf) -> PathBuf {
    let bundled = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("scenarios").join(&file);
    if file.is_relative() && !file.exists() && bundled.exists() {
        bundled
    } else {
        file
    }
}

fn run_headless(mut scenario: Scenario, steps: usize) -> Result<()> {
    scenario.simulation.advance(steps)?;

    let sim = &scenario.simulation;
    info!("headless run finished: {} steps, t = {:.4}", sim.steps(), sim.time());
    for (i, b) in sim.bodies().iter().enumerate() {
        println!(
            "body {i} ({}): x = ({:.9}, {:.9}) v = ({:.9}, {:.9})",
            b.tag, b.x.x, b.x.y, b.v.x, b.v.y
        );
    }
    Ok(())
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    let source = match (args.file, args.interactive) {
        (Some(file), _) => ScenarioSource::File(resolve_scenario_path(file)),
        (None, true) => ScenarioSource::Interactive,
        (None, false) => ScenarioSource::FigureEight,
    };

    let scenario = Scenario::load(source)?;

    if args.headless {
        run_headless(scenario, args.steps)
    } else {
        run_2d(scenario);
        Ok(())
    }
}

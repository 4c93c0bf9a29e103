use anyhow::{Context, Result};
use ants_forage::{scenario, Simulation, SimulationConfig, SimulationState};
use clap::Parser;
use std::{fs, io, path::PathBuf};
use tracing::{info, warn};

mod render;

/// Runs an ant colony foraging until all food is delivered.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// Scenario file with the grid, colony and food entries
    #[arg(long, conflicts_with = "config")]
    scenario: Option<PathBuf>,

    /// JSON configuration file, missing fields take their defaults
    #[arg(long)]
    config: Option<PathBuf>,

    /// Seed for the random source, overrides the one in the scenario or configuration
    #[arg(long)]
    seed: Option<u64>,

    /// Time step of every tick
    #[arg(long, default_value_t = 0.45)]
    dt: f64,

    /// Stop after this many ticks even if food is left
    #[arg(long, default_value_t = 5000)]
    max_ticks: usize,

    /// File to save a JSON replay of the run to
    #[arg(long)]
    replay: Option<String>,

    /// Draw the world every this many ticks, 0 runs without drawing
    #[arg(long, default_value_t = 0)]
    draw_every: usize,

    /// Extra blocks of food dropped at random positions before the first tick
    #[arg(long, default_value_t = 0)]
    scatter: usize,
}

fn main() -> Result<()> {
    init_tracing();
    let args = Args::parse();

    let mut config = load_config(&args)?;
    if args.seed.is_some() {
        config.seed = args.seed;
    }

    let mut simulation = Simulation::new(config, args.replay.clone())?;
    if args.scatter > 0 {
        let cells = simulation.scatter_food(args.scatter);
        info!(blocks = args.scatter, cells, "Scattered extra food");
    }

    let state = run(&mut simulation, &args)?;

    match state.finished {
        true => {
            println!("Total Food Delivered: {}", state.food_delivered);
            println!("Total Time Elapsed: {:.2} seconds", state.elapsed);
        }
        false => {
            warn!(
                tick = state.tick,
                food_remaining = state.food_remaining,
                carrying = state.carrying,
                "Stopped before all food was delivered"
            );
            println!("Food Delivered: {}", state.food_delivered);
            println!("Food Left: {}", state.food_remaining + state.carrying);
            // A finished run saves on its own
            simulation.save_replay().context("saving replay")?;
        }
    }

    Ok(())
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}

fn load_config(args: &Args) -> Result<SimulationConfig> {
    if let Some(path) = &args.scenario {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("reading scenario {}", path.display()))?;
        return scenario::parse(&contents)
            .with_context(|| format!("parsing scenario {}", path.display()));
    }

    if let Some(path) = &args.config {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("reading configuration {}", path.display()))?;
        return SimulationConfig::from_json(&contents)
            .with_context(|| format!("parsing configuration {}", path.display()));
    }

    Ok(SimulationConfig::default())
}

fn run(simulation: &mut Simulation, args: &Args) -> Result<SimulationState> {
    run_with(simulation, args, render::draw, render::restore)
}

fn run_with<D, R>(
    simulation: &mut Simulation,
    args: &Args,
    mut draw: D,
    restore: R,
) -> Result<SimulationState>
where
    D: FnMut(&Simulation, f64) -> io::Result<()>,
    R: FnOnce() -> io::Result<()>,
{
    let mut ticks = || -> io::Result<SimulationState> {
        let mut state = simulation.state();

        while !state.finished && state.tick < args.max_ticks {
            state = simulation.advance_tick(args.dt);

            if args.draw_every > 0 && state.tick % args.draw_every == 0 {
                draw(simulation, args.dt)?;
            }
        }

        Ok(state)
    };
    let state = ticks();

    // The cursor is hidden while drawing, bring it back even if a draw failed
    if args.draw_every > 0 {
        restore()?;
    }

    Ok(state?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn when_parsing_no_arguments_the_reference_run_is_used() {
        let args = Args::try_parse_from(["forage"]).unwrap();

        assert_eq!(args.dt, 0.45);
        assert_eq!(args.max_ticks, 5000);
        assert_eq!(args.draw_every, 0);
        assert!(args.seed.is_none());
        assert_eq!(load_config(&args).unwrap(), SimulationConfig::default());
    }

    #[test]
    fn when_passing_both_a_scenario_and_a_config_parsing_fails() {
        let args = Args::try_parse_from([
            "forage",
            "--scenario",
            "a.scenario",
            "--config",
            "b.json",
        ]);

        assert!(args.is_err());
    }

    #[test]
    fn when_loading_the_bundled_scenario_it_matches_the_reference_world() {
        let path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("scenarios/reference.scenario");
        let args = Args::try_parse_from(["forage", "--scenario", path.to_str().unwrap()]).unwrap();

        let config = load_config(&args).unwrap();

        assert_eq!(
            config,
            SimulationConfig {
                seed: Some(42),
                ..SimulationConfig::default()
            }
        );
    }

    #[test]
    fn when_the_run_hits_the_tick_limit_it_stops() {
        let args = Args::try_parse_from(["forage", "--max-ticks", "3", "--seed", "7"]).unwrap();
        let config = SimulationConfig {
            seed: args.seed,
            ..SimulationConfig::default()
        };
        let mut simulation = Simulation::new(config, None).unwrap();

        let state = run(&mut simulation, &args).unwrap();

        assert_eq!(state.tick, 3);
        assert!(!state.finished);
    }

    #[test]
    fn when_drawing_fails_the_cursor_is_still_restored_and_the_error_returned() {
        let args = Args::try_parse_from(["forage", "--draw-every", "2", "--seed", "7"]).unwrap();
        let config = SimulationConfig {
            seed: args.seed,
            ..SimulationConfig::default()
        };
        let mut simulation = Simulation::new(config, None).unwrap();
        let mut restored = false;

        let result = run_with(
            &mut simulation,
            &args,
            |_, _| Err(io::Error::new(io::ErrorKind::BrokenPipe, "terminal closed")),
            || {
                restored = true;
                Ok(())
            },
        );

        assert!(result.is_err());
        assert!(restored);
        assert_eq!(simulation.tick(), 2);
    }
}

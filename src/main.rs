//! Boat Adventure headless runner
//!
//! Runs the simulation with the demo autopilot until the run ends or the tick
//! cap is reached, then prints the final HUD as JSON.

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::{Duration, Instant};

use boat_adventure::WorldConfig;
use boat_adventure::renderer::{build_scene, scene_vertices, vertex_bytes};
use boat_adventure::sim::{FixedTimestep, GameEvent, GameState, TickInput, tick};

const DEFAULT_TICK_CAP: u64 = 36_000;
const USAGE: &str = "usage: boat-adventure [--config PATH] [--seed N] [--ticks N] [--realtime]";

#[derive(Debug, Default)]
struct Args {
    config: Option<PathBuf>,
    seed: Option<u64>,
    ticks: Option<u64>,
    realtime: bool,
}

fn parse_args(mut argv: impl Iterator<Item = String>) -> Result<Args, String> {
    let mut args = Args::default();
    while let Some(arg) = argv.next() {
        match arg.as_str() {
            "--config" => {
                let path = argv.next().ok_or("--config needs a path")?;
                args.config = Some(PathBuf::from(path));
            }
            "--seed" => {
                let value = argv.next().ok_or("--seed needs a value")?;
                args.seed = Some(value.parse().map_err(|_| format!("bad seed: {value}"))?);
            }
            "--ticks" => {
                let value = argv.next().ok_or("--ticks needs a value")?;
                args.ticks = Some(value.parse().map_err(|_| format!("bad tick cap: {value}"))?);
            }
            "--realtime" => args.realtime = true,
            other => return Err(format!("unknown argument: {other}")),
        }
    }
    Ok(args)
}

fn log_events(state: &GameState) {
    for event in state.events() {
        match event {
            GameEvent::PlayerDamaged { lives } => log::info!("Player hit, {} lives left", lives),
            GameEvent::CraftDestroyed { id } => log::info!("Enemy craft {} destroyed", id),
            GameEvent::Finished { phase, .. } => {
                log::info!("Run finished: {:?} at tick {}", phase, state.time_ticks)
            }
            other => log::trace!("{:?}", other),
        }
    }
}

fn run(state: &mut GameState, cap: u64, realtime: bool) {
    let input = TickInput {
        idle_mode: true,
        ..Default::default()
    };
    let mut clock = FixedTimestep::new(state.config.world.tick_rate);
    let mut last = Instant::now();

    while !state.phase().is_terminal() && state.time_ticks < cap {
        let steps = if realtime {
            let now = Instant::now();
            let elapsed = now.duration_since(last).as_secs_f32();
            last = now;
            clock.advance(elapsed)
        } else {
            1
        };

        for _ in 0..steps {
            if state.phase().is_terminal() || state.time_ticks >= cap {
                break;
            }
            tick(state, &input);
            log_events(state);
        }

        if realtime {
            let scene = build_scene(state);
            let vertices = scene_vertices(&scene);
            log::debug!(
                "frame: {} draw items, {} bytes of vertices",
                scene.len(),
                vertex_bytes(&vertices).len()
            );
            std::thread::sleep(Duration::from_secs_f32(clock.dt() / 2.0));
        }
    }
}

fn main() -> ExitCode {
    env_logger::init();

    let args = match parse_args(std::env::args().skip(1)) {
        Ok(args) => args,
        Err(e) => {
            eprintln!("{e}\n{USAGE}");
            return ExitCode::from(2);
        }
    };

    let config = match &args.config {
        Some(path) => WorldConfig::load(path),
        None => Ok(WorldConfig::default()),
    };
    let config = match config {
        Ok(config) => config,
        Err(e) => {
            log::error!("{}", e);
            eprintln!("{e}");
            return ExitCode::from(2);
        }
    };

    let seed = args
        .seed
        .or(config.seed)
        .unwrap_or_else(rand::random::<u64>);
    log::info!("Boat Adventure starting with seed {}", seed);

    let cap = args.ticks.unwrap_or(DEFAULT_TICK_CAP);
    let mut state = GameState::new(config, seed);
    run(&mut state, cap, args.realtime);

    let hud = state.hud();
    match serde_json::to_string(&hud) {
        Ok(json) => println!("{json}"),
        Err(e) => {
            log::error!("Failed to encode HUD: {}", e);
            return ExitCode::FAILURE;
        }
    }
    ExitCode::SUCCESS
}

//! Headless runner
//!
//! Usage: `echo-maze [CONFIG.json] [SEED]`
//!
//! Builds a maze, lets the autopilot walk it with periodic echo pulses, and
//! prints ASCII snapshots. Set `RUST_LOG=debug` for per-pulse logging.

use std::process::ExitCode;

use echo_maze::sim::{Autopilot, EngineEvent, MazeEngine, TickInput, tick};
use echo_maze::{EngineConfig, EngineError};

/// Ticks between autopilot pulses
const PULSE_INTERVAL: u64 = 45;
/// Give up on the demo after this many ticks
const MAX_DEMO_TICKS: u64 = 100_000;

fn main() -> ExitCode {
    env_logger::init();
    log::info!("Echo Maze (headless) starting...");

    let mut args = std::env::args().skip(1);
    let mut config = match args.next() {
        Some(path) => match EngineConfig::load(&path) {
            Ok(config) => config,
            Err(e) => {
                log::error!("Bad config {}: {}", path, e);
                return ExitCode::from(1);
            }
        },
        None => EngineConfig::default(),
    };
    if let Some(seed) = args.next() {
        match seed.parse() {
            Ok(seed) => config.seed = seed,
            Err(e) => {
                log::error!("Bad seed {:?}: {}", seed, e);
                return ExitCode::from(1);
            }
        }
    }

    let mut engine = match MazeEngine::new(config) {
        Ok(engine) => engine,
        Err(e @ EngineError::Generation(_)) => {
            log::error!("Cannot start: {}", e);
            return ExitCode::from(2);
        }
        Err(e) => {
            log::error!("{}", e);
            return ExitCode::from(1);
        }
    };

    let Some(mut pilot) = Autopilot::plan(&engine) else {
        log::error!("Exit unreachable from the start cell");
        return ExitCode::from(2);
    };

    let mut brightest = 0;
    let mut snapshot = String::new();
    while !engine.is_solved() && engine.time_ticks() < MAX_DEMO_TICKS {
        let input = TickInput {
            intent: pilot.steer(&engine),
            pulse: engine.time_ticks() % PULSE_INTERVAL == 0,
        };
        tick(&mut engine, &input);

        for event in engine.events() {
            if let EngineEvent::Collided { correction } = event {
                log::warn!("Autopilot scraped a wall ({:?})", correction);
            }
        }

        let shown = engine.view().shown_count();
        if shown > brightest {
            brightest = shown;
            snapshot = render(&engine);
        }
    }

    println!("Brightest echo ({} walls lit):\n{}", brightest, snapshot);
    println!("Final:\n{}", render(&engine));

    if engine.is_solved() {
        println!("Solved in {} ticks", engine.time_ticks());
        ExitCode::SUCCESS
    } else {
        println!("Not solved after {} ticks", engine.time_ticks());
        ExitCode::from(3)
    }
}

/// View with the player (`@`) and exit (`E`) drawn in
fn render(engine: &MazeEngine) -> String {
    let view = engine.view();
    let grid = engine.grid();
    let player = grid.cell_at_clamped(engine.player().center(), engine.config().cell_size);
    let exit = grid.exit();

    let mut out = String::with_capacity((view.width() + 1) * view.height());
    for (i, cell) in view.cells().iter().enumerate() {
        let (x, y) = ((i % view.width()) as i32, (i / view.width()) as i32);
        let glyph = if (x, y) == (player.x, player.y) {
            '@'
        } else if (x, y) == (exit.x, exit.y) {
            'E'
        } else {
            cell.glyph()
        };
        out.push(glyph);
        if x as usize == view.width() - 1 {
            out.push('\n');
        }
    }
    out
}

/// Entry point and frame loop.

mod config;
mod domain;
mod error;
mod sim;
mod ui;

use std::path::PathBuf;
use std::time::{Duration, Instant};

use clap::Parser;

use config::GameConfig;
use domain::grid::Grid;
use error::GameError;
use sim::clock::IntervalClock;
use sim::session::Session;
use sim::world::WorldState;
use ui::input::InputState;
use ui::paint;
use ui::renderer::Renderer;

const FRAME_SLEEP: Duration = Duration::from_millis(5);

#[derive(Parser, Debug)]
#[command(name = "wrapsnake", version, about = "Snake on a board with no edges")]
struct Cli {
    /// Path to a config.toml (default: next to the executable, then the CWD)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Seed the food RNG for a reproducible game
    #[arg(long)]
    seed: Option<u64>,

    /// Initial speed in ticks per second, overriding the config
    #[arg(long)]
    speed: Option<u32>,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();

    let mut config = match GameConfig::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Config error: {e}");
            std::process::exit(1);
        }
    };
    if let Some(speed) = cli.speed {
        config.speed.initial = speed;
    }

    let mut renderer = Renderer::new();
    if let Err(e) = renderer.init() {
        eprintln!("Terminal init failed: {e}");
        return;
    }

    let result = board_for(&config, &renderer).and_then(|grid| {
        log::info!(
            "board {}x{} cells, step {}, seed {:?}",
            grid.columns(), grid.rows(), config.board.step, cli.seed,
        );
        let world = WorldState::new(grid, &config, cli.seed);
        let session = Session::start(world, IntervalClock::new())?;
        game_loop(session, &mut renderer)
    });

    if let Err(e) = renderer.cleanup() {
        eprintln!("Terminal cleanup failed: {e}");
    }

    match result {
        Ok(score) => {
            println!();
            println!("Thanks for playing Wrapsnake!");
            println!("Final Score: {score}");
        }
        Err(e) => eprintln!("Game error: {e}"),
    }
}

/// Board from the config, or as many cells as the terminal can show.
fn board_for(config: &GameConfig, renderer: &Renderer) -> Result<Grid, GameError> {
    let step = config.board.step;
    let (cols, rows) = renderer.capacity();
    let width = config.board.width.unwrap_or(cols as i32 * step);
    let height = config.board.height.unwrap_or(rows as i32 * step);
    Grid::new(width, height, step, step)
}

fn game_loop(mut session: Session<IntervalClock>, renderer: &mut Renderer) -> Result<u64, GameError> {
    let mut kb = InputState::new();
    renderer.attach(&session.world.grid);
    paint::paint(&session.world, renderer);

    loop {
        kb.drain_events();
        if kb.quit_requested() {
            break;
        }

        for &code in kb.codes() {
            let events = session.handle_code(code)?;
            renderer.note(&events);
        }

        if session.poll(Instant::now()) {
            let events = session.tick(renderer)?;
            renderer.note(&events);
        }

        renderer.render(&session.world)?;
        std::thread::sleep(FRAME_SLEEP);
    }

    Ok(session.world.score)
}

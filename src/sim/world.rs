/// WorldState: the complete snapshot of a running game.
///
/// The world exclusively owns every entity. Step and control functions
/// take `&mut WorldState` explicitly; no entity refers back to it.
///
/// ## Speed
///
/// `speed` is in ticks per second. The tick period is `1000 / speed`
/// milliseconds. Speed never drops below 1 and is capped at
/// `MAX_SPEED` so the period never reaches zero.

use std::time::Duration;

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::config::{FoodConfig, GameConfig};
use crate::domain::entity::{Food, Snake, Wall};
use crate::domain::food::Cadence;
use crate::domain::grid::{Direction, Grid};

pub const MAX_SPEED: u32 = 1000;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum GameStatus {
    Ready,
    Paused,
    Unpaused,
    Over,
}

pub struct WorldState {
    pub grid: Grid,

    // ── Entities ──
    pub snake: Snake,
    pub wall: Wall,
    pub foods: Vec<Food>,

    // ── Input staging ──
    /// Direction requested since the last tick; committed by the next one.
    pub next_direction: Direction,

    // ── Game tracking ──
    pub status: GameStatus,
    pub score: u64,
    pub multiplier: u32,
    pub speed: u32,
    /// How many foods the board should carry.
    pub food_target: usize,
    pub cadence: Cadence,
    pub tick: u64,
    pub eaten: u64,

    // ── Rules ──
    pub food_rules: FoodConfig,
    pub initial_speed: u32,

    pub rng: StdRng,
}

impl WorldState {
    /// A world with an empty board; call `step::reset` before playing.
    pub fn new(grid: Grid, config: &GameConfig, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(s) => StdRng::seed_from_u64(s),
            None => StdRng::from_entropy(),
        };
        let initial_speed = config.speed.initial.clamp(1, MAX_SPEED);
        WorldState {
            grid,
            snake: Snake::new(grid.center()),
            wall: Wall::new(),
            foods: Vec::new(),
            next_direction: Direction::None,
            status: GameStatus::Ready,
            score: 0,
            multiplier: 1,
            speed: initial_speed,
            food_target: config.food.count,
            cadence: Cadence::new(config.food.special_every),
            tick: 0,
            eaten: 0,
            food_rules: config.food.clone(),
            initial_speed,
            rng,
        }
    }

    /// Tick period for the current speed.
    pub fn period(&self) -> Duration {
        period_for(self.speed)
    }

    pub fn is_running(&self) -> bool {
        matches!(self.status, GameStatus::Ready | GameStatus::Unpaused)
    }
}

pub fn period_for(speed: u32) -> Duration {
    Duration::from_millis(1000 / u64::from(speed.clamp(1, MAX_SPEED)))
}

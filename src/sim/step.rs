/// The step function: advances the world by one tick.
///
/// Processing order:
///   1. Commit the staged direction
///   2. Collision detection on the current head, first match wins:
///      a. wall  → game over, nothing moves
///      b. food  → effect, replacement spawn (skips the self check)
///      c. body  → the bitten loop turns into wall
///   3. Advance one cell, feeding if the eaten food grows the snake
///
/// Painting happens before the step (see `sim::session`), so what is on
/// screen during a tick is the state the collision check sees.

use crate::domain::entity::{Food, FoodKind, Snake};
use crate::domain::food::{self, Extra, Growth};
use crate::domain::grid::Direction;
use crate::error::GameError;
use super::event::GameEvent;
use super::world::{GameStatus, WorldState, MAX_SPEED};

// ══════════════════════════════════════════════════════════════
// Main entry point
// ══════════════════════════════════════════════════════════════

pub fn step(world: &mut WorldState) -> Result<Vec<GameEvent>, GameError> {
    if world.status != GameStatus::Unpaused { return Ok(vec![]); }

    let mut events: Vec<GameEvent> = Vec::new();
    world.tick += 1;
    world.snake.direction = world.next_direction;

    let head = world.snake.head();

    if world.wall.contains(head) {
        log::info!(
            "hit the wall at ({}, {}) on tick {}; final score {}, {} foods eaten",
            head.x, head.y, world.tick, world.score, world.eaten,
        );
        events.push(GameEvent::WallHit { at: head });
        set_status(world, GameStatus::Over, &mut events);
        return Ok(events);
    }

    let mut feed = false;
    if let Some(idx) = world.foods.iter().position(|f| f.cell == head) {
        feed = resolve_food(world, idx, &mut events)?;
    } else if world.snake.body_contains(head) {
        let walled = world.snake.bite_resolve(&mut world.wall);
        log::debug!("self-bite: {walled} cells became wall");
        events.push(GameEvent::SelfBitten { walled });
    }

    let dir = world.snake.direction;
    world.snake.advance(&world.grid, dir, feed);

    Ok(events)
}

// ══════════════════════════════════════════════════════════════
// Food
// ══════════════════════════════════════════════════════════════

/// Eat the food at `idx`, apply its effect and spawn what replaces it.
/// Returns whether the following move should feed the snake.
fn resolve_food(world: &mut WorldState, idx: usize, events: &mut Vec<GameEvent>) -> Result<bool, GameError> {
    let eaten = world.foods.remove(idx);
    world.eaten += 1;

    let (applied, effect) = food::resolve_effect(eaten.kind, &mut world.rng)?;
    log::debug!("ate {} (applied {}) at ({}, {})", eaten.kind, applied, eaten.cell.x, eaten.cell.y);
    events.push(GameEvent::FoodEaten { eaten: eaten.kind, applied, at: eaten.cell });

    if effect.scores {
        world.score += u64::from(eaten.value) * u64::from(world.multiplier);
    }

    let feed = match effect.growth {
        Growth::Grow => true,
        Growth::Shrink => {
            world.snake.shrink();
            false
        }
        Growth::Hold => false,
    };

    let mut regenerate = false;
    match effect.extra {
        Extra::None => {}
        Extra::ClearWallCell => {
            if let Some(at) = world.wall.remove_random(&mut world.rng) {
                events.push(GameEvent::WallCleared { at });
            }
        }
        Extra::BumpMultiplier => {
            world.multiplier += 1;
            events.push(GameEvent::MultiplierRaised { multiplier: world.multiplier });
        }
        Extra::MoreFood => {
            world.food_target = (world.food_target + 1).min(world.food_rules.max_count);
            regenerate = true;
            events.push(GameEvent::FoodSlotsRaised { target: world.food_target });
        }
        Extra::SpeedUp => {
            let to = world.speed.saturating_mul(2);
            set_speed(world, to, events);
        }
        Extra::SlowDown => {
            let to = (world.speed / 2).max(1);
            set_speed(world, to, events);
        }
    }

    let special = world.cadence.consume();
    let kind = food::spawn_kind(special, &world.food_rules.special_pool, &mut world.rng)?;
    if regenerate {
        world.foods.clear();
    }
    spawn_food(world, kind)?;
    if regenerate {
        fill_foods(world)?;
    }

    Ok(feed)
}

/// Place one food of `kind` on a free cell.
pub fn spawn_food(world: &mut WorldState, kind: FoodKind) -> Result<(), GameError> {
    let cell = food::generate_valid(&world.grid, &mut world.rng, &world.foods, &world.snake, &world.wall)?;
    world.foods.push(Food::new(cell, kind, world.food_rules.value));
    Ok(())
}

/// Top the board up to `food_target` Normal foods.
fn fill_foods(world: &mut WorldState) -> Result<(), GameError> {
    while world.foods.len() < world.food_target {
        spawn_food(world, FoodKind::Normal)?;
    }
    Ok(())
}

// ══════════════════════════════════════════════════════════════
// Helpers
// ══════════════════════════════════════════════════════════════

fn set_speed(world: &mut WorldState, to: u32, events: &mut Vec<GameEvent>) {
    let to = to.clamp(1, MAX_SPEED);
    if to == world.speed { return; }
    log::debug!("speed {} -> {}", world.speed, to);
    events.push(GameEvent::SpeedChanged { from: world.speed, to });
    world.speed = to;
}

pub fn set_status(world: &mut WorldState, to: GameStatus, events: &mut Vec<GameEvent>) {
    let from = world.status;
    if from == to { return; }
    log::debug!("status {:?} -> {:?}", from, to);
    world.status = to;
    events.push(GameEvent::StatusChanged { from, to });
}

/// Start a fresh game: empty wall, one-cell snake at the center, a new set
/// of foods, counters and speed back to their initial values.
pub fn reset(world: &mut WorldState) -> Result<Vec<GameEvent>, GameError> {
    let mut events = vec![GameEvent::Reset];

    world.wall.clear();
    world.snake = Snake::new(world.grid.center());
    world.next_direction = Direction::None;
    world.score = 0;
    world.multiplier = 1;
    world.tick = 0;
    world.eaten = 0;
    world.cadence.reset();
    world.food_target = world.food_rules.count;
    if world.speed != world.initial_speed {
        events.push(GameEvent::SpeedChanged { from: world.speed, to: world.initial_speed });
        world.speed = world.initial_speed;
    }

    world.foods.clear();
    fill_foods(world)?;

    set_status(world, GameStatus::Ready, &mut events);
    log::info!("new game on {}x{} cells", world.grid.columns(), world.grid.rows());
    Ok(events)
}

// ══════════════════════════════════════════════════════════════
// Unit tests
// ══════════════════════════════════════════════════════════════

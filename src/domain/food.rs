/// Food policy: where food may appear, what eating it does, and when the
/// next spawn is a special one.
///
/// Pure functions over borrowed entity state. Nothing here mutates the
/// world; `sim::step` applies the returned `Effect`.
///
/// ## Effect table
/// ┌──────────────┬────────┬───────┬──────────────────────────────┐
/// │ Kind         │ Growth │ Score │ Extra                        │
/// ├──────────────┼────────┼───────┼──────────────────────────────┤
/// │ Normal       │ +1     │ yes   │                              │
/// │ Surprise     │ (re-rolled to another kind, then applied)     │
/// │ Shortener    │ -1     │ yes   │                              │
/// │ WallCleaner  │ +1     │ yes   │ remove one random wall cell  │
/// │ Multiplier   │ +1     │ no    │ multiplier += 1              │
/// │ Ghost        │ 0      │ no    │                              │
/// │ FoodIncrease │ +1     │ no    │ food count += 1, regenerate  │
/// │ SpeedUp      │ +1     │ yes   │ speed × 2                    │
/// │ SlowDown     │ +1     │ yes   │ speed ÷ 2 (min 1)            │
/// └──────────────┴────────┴───────┴──────────────────────────────┘

use rand::seq::SliceRandom;
use rand::Rng;

use super::entity::{Food, FoodKind, Snake, Wall};
use super::grid::{Cell, Grid};
use crate::error::GameError;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Growth {
    Grow,
    Shrink,
    Hold,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Extra {
    None,
    ClearWallCell,
    BumpMultiplier,
    MoreFood,
    SpeedUp,
    SlowDown,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Effect {
    pub growth: Growth,
    pub scores: bool,
    pub extra: Extra,
}

impl Effect {
    const fn new(growth: Growth, scores: bool, extra: Extra) -> Self {
        Effect { growth, scores, extra }
    }
}

/// Fixed effect of a kind. Surprise has none of its own.
pub fn effect_of(kind: FoodKind) -> Option<Effect> {
    let effect = match kind {
        FoodKind::Normal => Effect::new(Growth::Grow, true, Extra::None),
        FoodKind::Surprise => return None,
        FoodKind::Shortener => Effect::new(Growth::Shrink, true, Extra::None),
        FoodKind::WallCleaner => Effect::new(Growth::Grow, true, Extra::ClearWallCell),
        FoodKind::Multiplier => Effect::new(Growth::Grow, false, Extra::BumpMultiplier),
        FoodKind::Ghost => Effect::new(Growth::Hold, false, Extra::None),
        FoodKind::FoodIncrease => Effect::new(Growth::Grow, false, Extra::MoreFood),
        FoodKind::SpeedUp => Effect::new(Growth::Grow, true, Extra::SpeedUp),
        FoodKind::SlowDown => Effect::new(Growth::Grow, true, Extra::SlowDown),
    };
    Some(effect)
}

/// Surprise becomes one of the other eight kinds, uniformly.
/// Every other kind resolves to itself.
pub fn resolve_kind<R: Rng + ?Sized>(kind: FoodKind, rng: &mut R) -> FoodKind {
    match kind {
        FoodKind::Surprise => {
            let outcomes = &FoodKind::SURPRISE_OUTCOMES;
            outcomes[rng.gen_range(0..outcomes.len())]
        }
        other => other,
    }
}

/// Resolve `kind` (re-rolling Surprise once) and look up its effect.
pub fn resolve_effect<R: Rng + ?Sized>(kind: FoodKind, rng: &mut R) -> Result<(FoodKind, Effect), GameError> {
    let applied = resolve_kind(kind, rng);
    let effect = effect_of(applied).ok_or(GameError::UnresolvedFood(applied))?;
    Ok((applied, effect))
}

// ── Placement ──

/// A cell may hold new food only if nothing else is there.
pub fn is_valid(cell: Cell, foods: &[Food], snake: &Snake, wall: &Wall) -> bool {
    !foods.iter().any(|f| f.cell == cell)
        && !snake.contains(cell)
        && !wall.contains(cell)
}

/// Draw random cells until one is free.
///
/// Rejection sampling with no attempt limit; the only guard is that a board
/// with no free cell at all fails with `BoardSaturated` instead of spinning.
pub fn generate_valid<R: Rng + ?Sized>(
    grid: &Grid,
    rng: &mut R,
    foods: &[Food],
    snake: &Snake,
    wall: &Wall,
) -> Result<Cell, GameError> {
    let total = grid.cell_count();
    if occupied_cells(foods, snake, wall) >= total {
        return Err(GameError::BoardSaturated { cells: total });
    }
    loop {
        let cell = grid.random_cell(rng);
        if is_valid(cell, foods, snake, wall) {
            return Ok(cell);
        }
    }
}

/// Distinct cells covered by any entity.
fn occupied_cells(foods: &[Food], snake: &Snake, wall: &Wall) -> usize {
    let mut seen: std::collections::HashSet<Cell> = std::collections::HashSet::new();
    seen.extend(foods.iter().map(|f| f.cell));
    seen.extend(snake.cells().copied());
    seen.extend(wall.cells().iter().copied());
    seen.len()
}

// ── Special cadence ──

/// Counts consumed food modulo `every`. Each wrap to zero marks the
/// consumption whose replacement is a special kind.
#[derive(Clone, Copy, Debug)]
pub struct Cadence {
    every: u32,
    count: u32,
}

impl Cadence {
    pub fn new(every: u32) -> Self {
        Cadence { every: every.max(1), count: 0 }
    }

    /// Record one consumption. Returns true on every `every`-th call.
    pub fn consume(&mut self) -> bool {
        self.count = (self.count + 1) % self.every;
        self.count == 0
    }

    /// Consumptions left until the next special replacement.
    pub fn remaining(&self) -> u32 {
        self.every - self.count
    }

    pub fn reset(&mut self) {
        self.count = 0;
    }
}

/// Kind for the replacement food: a random pick from `pool` when the
/// cadence fired, Normal otherwise. An empty pool is a configuration error.
pub fn spawn_kind<R: Rng + ?Sized>(
    special: bool,
    pool: &[FoodKind],
    rng: &mut R,
) -> Result<FoodKind, GameError> {
    if !special { return Ok(FoodKind::Normal); }
    pool.choose(rng)
        .copied()
        .ok_or_else(|| GameError::InvalidFoodPool("no kinds to pick from".to_string()))
}

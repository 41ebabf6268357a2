/// Entities: Snake, Wall, Food.
/// All of them are plain data owned by `WorldState`; none holds a
/// reference back to the world.

use std::collections::VecDeque;
use std::fmt;
use std::str::FromStr;

use rand::Rng;

use super::grid::{Cell, Direction, Grid};
use crate::error::GameError;

// ── Snake ──

/// Ordered body cells: tail at the front, head at the back.
/// Never empty.
#[derive(Clone, Debug)]
pub struct Snake {
    body: VecDeque<Cell>,
    /// Committed direction, used for the next advance.
    pub direction: Direction,
}

impl Snake {
    pub fn new(start: Cell) -> Self {
        let mut body = VecDeque::with_capacity(16);
        body.push_back(start);
        Snake { body, direction: Direction::None }
    }

    pub fn head(&self) -> Cell {
        self.body[self.body.len() - 1]
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn cells(&self) -> impl DoubleEndedIterator<Item = &Cell> + '_ {
        self.body.iter()
    }

    pub fn contains(&self, cell: Cell) -> bool {
        self.body.contains(&cell)
    }

    /// Does any cell other than the head sit on `cell`?
    pub fn body_contains(&self, cell: Cell) -> bool {
        self.body.iter().rev().skip(1).any(|c| *c == cell)
    }

    /// Move one step. With `feed` the tail stays and the snake grows by one.
    /// `Direction::None` leaves the snake untouched.
    pub fn advance(&mut self, grid: &Grid, dir: Direction, feed: bool) {
        if dir == Direction::None { return; }
        let next = grid.neighbor(self.head(), dir);
        debug_assert!(grid.contains(next));
        self.body.push_back(next);
        if !feed {
            self.body.pop_front();
        }
    }

    /// Drop the tail cell, keeping at least the head.
    pub fn shrink(&mut self) -> bool {
        if self.body.len() > 1 {
            self.body.pop_front();
            true
        } else {
            false
        }
    }

    /// Cut off the loop closed by the head biting the body.
    ///
    /// Tail cells are moved into `wall` one by one until the cell under the
    /// head has been moved. The head itself always survives. Returns the
    /// number of cells converted.
    pub fn bite_resolve(&mut self, wall: &mut Wall) -> usize {
        let head = self.head();
        let mut moved = 0;
        while self.body.len() > 1 {
            let Some(cell) = self.body.pop_front() else { break };
            wall.push(cell);
            moved += 1;
            if cell == head { break; }
        }
        moved
    }

    #[cfg(test)]
    pub fn from_cells(cells: &[Cell], direction: Direction) -> Self {
        Snake { body: cells.iter().copied().collect(), direction }
    }
}

// ── Wall ──

/// Obstacle cells. Grows from self-bites, shrinks via WallCleaner food.
#[derive(Clone, Debug, Default)]
pub struct Wall {
    cells: Vec<Cell>,
}

impl Wall {
    pub fn new() -> Self {
        Wall { cells: Vec::new() }
    }

    pub fn push(&mut self, cell: Cell) {
        self.cells.push(cell);
    }

    pub fn contains(&self, cell: Cell) -> bool {
        self.cells.contains(&cell)
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn clear(&mut self) {
        self.cells.clear();
    }

    /// Remove one uniformly chosen cell, if there is any.
    pub fn remove_random<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Option<Cell> {
        if self.cells.is_empty() { return None; }
        let idx = rng.gen_range(0..self.cells.len());
        Some(self.cells.swap_remove(idx))
    }
}

// ── Food ──

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum FoodKind {
    Normal,
    Surprise,
    WallCleaner,
    Shortener,
    Multiplier,
    Ghost,
    FoodIncrease,
    SpeedUp,
    SlowDown,
}

impl FoodKind {
    pub const ALL: [FoodKind; 9] = [
        FoodKind::Normal,
        FoodKind::Surprise,
        FoodKind::WallCleaner,
        FoodKind::Shortener,
        FoodKind::Multiplier,
        FoodKind::Ghost,
        FoodKind::FoodIncrease,
        FoodKind::SpeedUp,
        FoodKind::SlowDown,
    ];

    /// Every kind except Normal: the default pool for special spawns.
    pub const SPECIAL: [FoodKind; 8] = [
        FoodKind::Surprise,
        FoodKind::WallCleaner,
        FoodKind::Shortener,
        FoodKind::Multiplier,
        FoodKind::Ghost,
        FoodKind::FoodIncrease,
        FoodKind::SpeedUp,
        FoodKind::SlowDown,
    ];

    /// What a Surprise can turn into: every kind but Surprise itself.
    pub const SURPRISE_OUTCOMES: [FoodKind; 8] = [
        FoodKind::Normal,
        FoodKind::WallCleaner,
        FoodKind::Shortener,
        FoodKind::Multiplier,
        FoodKind::Ghost,
        FoodKind::FoodIncrease,
        FoodKind::SpeedUp,
        FoodKind::SlowDown,
    ];

    pub fn name(self) -> &'static str {
        match self {
            FoodKind::Normal => "normal",
            FoodKind::Surprise => "surprise",
            FoodKind::WallCleaner => "wall_cleaner",
            FoodKind::Shortener => "shortener",
            FoodKind::Multiplier => "multiplier",
            FoodKind::Ghost => "ghost",
            FoodKind::FoodIncrease => "food_increase",
            FoodKind::SpeedUp => "speed_up",
            FoodKind::SlowDown => "slow_down",
        }
    }
}

impl fmt::Display for FoodKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for FoodKind {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_ascii_lowercase().replace('-', "_");
        FoodKind::ALL.iter()
            .copied()
            .find(|k| k.name() == key)
            .ok_or_else(|| GameError::UnknownFoodKind(s.to_string()))
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Food {
    pub cell: Cell,
    pub kind: FoodKind,
    pub value: u32,
}

impl Food {
    pub fn new(cell: Cell, kind: FoodKind, value: u32) -> Self {
        Food { cell, kind, value }
    }
}

/// Events emitted during a simulation step or a key press.
/// The presentation layer consumes these for the HUD message and logs.

use crate::domain::entity::FoodKind;
use crate::domain::grid::Cell;
use super::world::GameStatus;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GameEvent {
    /// `eaten` is the kind as placed, `applied` is what it resolved to
    /// (differs only for Surprise).
    FoodEaten { eaten: FoodKind, applied: FoodKind, at: Cell },
    SelfBitten { walled: usize },
    WallHit { at: Cell },
    WallCleared { at: Cell },
    MultiplierRaised { multiplier: u32 },
    FoodSlotsRaised { target: usize },
    SpeedChanged { from: u32, to: u32 },
    StatusChanged { from: GameStatus, to: GameStatus },
    Reset,
}

/// Errors raised by the engine and its loaders.
///
/// Ordinary gameplay never fails: stray keys and ticks while paused are
/// no-ops. These variants cover configuration mistakes and the one
/// degenerate board state the food generator cannot satisfy.

use std::path::PathBuf;

use crate::domain::entity::FoodKind;

#[derive(Debug, thiserror::Error)]
pub enum GameError {
    #[error("no free cell left for food ({cells} cells all occupied)")]
    BoardSaturated { cells: usize },
    #[error("unknown food kind: {0:?}")]
    UnknownFoodKind(String),
    #[error("invalid special_pool: {0}")]
    InvalidFoodPool(String),
    #[error("cannot read config {path}: {source}")]
    ConfigRead { path: PathBuf, source: std::io::Error },
    #[error("food kind {0:?} has no direct effect")]
    UnresolvedFood(FoodKind),
    #[error("board {width}x{height} px is smaller than one {step}px cell")]
    InvalidBoard { width: i32, height: i32, step: i32 },
    #[error("terminal i/o: {0}")]
    Io(#[from] std::io::Error),
}

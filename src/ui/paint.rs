/// Paint pass: what gets drawn each tick, and in which order.
///
/// The engine only knows the `Canvas` seam: clear the board, then fill
/// cells. Order is fixed: board, foods, wall, snake (tail to head), so the
/// snake is always on top.

use crossterm::style::Color;

use crate::domain::entity::FoodKind;
use crate::domain::grid::Cell;
use crate::sim::world::{GameStatus, WorldState};

pub const FOOD_INSET: i32 = 4;
pub const WALL_INSET: i32 = 4;
pub const SNAKE_INSET: i32 = 4;

pub const BOARD: Color = Color::DarkBlue;
pub const WALL: Color = Color::Black;
pub const SNAKE: Color = Color::Red;
pub const SNAKE_DEAD: Color = Color::DarkGrey;

pub trait Canvas {
    fn clear(&mut self, color: Color);
    /// Fill the cell whose top-left pixel is `origin`, leaving `inset`
    /// pixels of board visible around it.
    fn draw_cell(&mut self, origin: Cell, inset: i32, color: Color);
}

pub fn food_color(kind: FoodKind) -> Color {
    match kind {
        FoodKind::Normal => Color::Yellow,
        FoodKind::Surprise => Color::Magenta,
        FoodKind::WallCleaner => Color::White,
        FoodKind::Shortener => Color::Cyan,
        FoodKind::Multiplier => Color::Green,
        FoodKind::Ghost => Color::Grey,
        FoodKind::FoodIncrease => Color::DarkYellow,
        FoodKind::SpeedUp => Color::DarkRed,
        FoodKind::SlowDown => Color::DarkCyan,
    }
}

pub fn paint<C: Canvas + ?Sized>(world: &WorldState, canvas: &mut C) {
    canvas.clear(BOARD);
    for food in &world.foods {
        canvas.draw_cell(food.cell, FOOD_INSET, food_color(food.kind));
    }
    for &cell in world.wall.cells() {
        canvas.draw_cell(cell, WALL_INSET, WALL);
    }
    let snake_color = if world.status == GameStatus::Over { SNAKE_DEAD } else { SNAKE };
    for &cell in world.snake.cells() {
        canvas.draw_cell(cell, SNAKE_INSET, snake_color);
    }
}

#[cfg(test)]
pub mod testing {
    use super::*;

    #[derive(Clone, Debug, PartialEq)]
    pub enum Stroke {
        Clear(Color),
        Cell(Cell, Color),
    }

    /// Canvas that remembers every call.
    #[derive(Default)]
    pub struct Recorder {
        pub strokes: Vec<Stroke>,
    }

    impl Canvas for Recorder {
        fn clear(&mut self, color: Color) {
            self.strokes.push(Stroke::Clear(color));
        }

        fn draw_cell(&mut self, origin: Cell, _inset: i32, color: Color) {
            self.strokes.push(Stroke::Cell(origin, color));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::testing::{Recorder, Stroke};
    use super::*;
    use crate::config::GameConfig;
    use crate::domain::entity::{Food, Snake};
    use crate::domain::grid::{Direction, Grid};

    #[test]
    fn board_then_food_then_wall_then_snake() {
        let grid = Grid::new(320, 320, 32, 32).unwrap();
        let mut w = WorldState::new(grid, &GameConfig::default(), Some(1));
        w.foods.push(Food::new(Cell::new(0, 0), FoodKind::SpeedUp, 1));
        w.wall.push(Cell::new(32, 0));
        w.snake = Snake::from_cells(&[Cell::new(64, 0), Cell::new(96, 0)], Direction::Right);

        let mut canvas = Recorder::default();
        paint(&w, &mut canvas);
        assert_eq!(canvas.strokes, vec![
            Stroke::Clear(BOARD),
            Stroke::Cell(Cell::new(0, 0), Color::DarkRed),
            Stroke::Cell(Cell::new(32, 0), WALL),
            Stroke::Cell(Cell::new(64, 0), SNAKE),
            Stroke::Cell(Cell::new(96, 0), SNAKE),
        ]);
    }

    #[test]
    fn dead_snake_is_grey() {
        let grid = Grid::new(320, 320, 32, 32).unwrap();
        let mut w = WorldState::new(grid, &GameConfig::default(), Some(1));
        w.status = GameStatus::Over;
        let mut canvas = Recorder::default();
        paint(&w, &mut canvas);
        assert_eq!(canvas.strokes.last(), Some(&Stroke::Cell(grid.center(), SNAKE_DEAD)));
    }
}

/// Board geometry: cells, directions and the toroidal grid.
///
/// Cells are addressed by the pixel origin of their top-left corner, so
/// every coordinate is a multiple of the step size. The board wraps on
/// both axes: leaving one edge re-enters from the opposite one.

use rand::Rng;

use crate::error::GameError;

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    pub const fn new(x: i32, y: i32) -> Self {
        Cell { x, y }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum Direction {
    /// Only valid before the first move of a game.
    #[default]
    None,
    Up,
    Right,
    Down,
    Left,
}

impl Direction {
    pub fn opposite(self) -> Direction {
        match self {
            Direction::None => Direction::None,
            Direction::Up => Direction::Down,
            Direction::Right => Direction::Left,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Axis {
    X,
    Y,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Grid {
    width: i32,
    height: i32,
    step_x: i32,
    step_y: i32,
}

impl Grid {
    /// Build a grid from raw viewport pixels. At least one full cell must
    /// fit on each axis.
    pub fn new(width: i32, height: i32, step_x: i32, step_y: i32) -> Result<Self, GameError> {
        if step_x <= 0 || step_y <= 0 || width < step_x || height < step_y {
            return Err(GameError::InvalidBoard { width, height, step: step_x.max(step_y) });
        }
        Ok(Grid { width, height, step_x, step_y })
    }

    pub fn step_x(&self) -> i32 { self.step_x }
    pub fn step_y(&self) -> i32 { self.step_y }

    /// Largest multiple of the horizontal step not exceeding the raw width.
    pub fn aligned_width(&self) -> i32 {
        (self.width / self.step_x) * self.step_x
    }

    /// Largest multiple of the vertical step not exceeding the raw height.
    pub fn aligned_height(&self) -> i32 {
        (self.height / self.step_y) * self.step_y
    }

    pub fn columns(&self) -> i32 { self.width / self.step_x }
    pub fn rows(&self) -> i32 { self.height / self.step_y }

    pub fn cell_count(&self) -> usize {
        self.columns() as usize * self.rows() as usize
    }

    /// Fold a coordinate back into `[0, aligned extent)`.
    pub fn wrap(&self, coord: i32, axis: Axis) -> i32 {
        let extent = match axis {
            Axis::X => self.aligned_width(),
            Axis::Y => self.aligned_height(),
        };
        coord.rem_euclid(extent)
    }

    /// The cell one step away in `dir`, wrapped around the board edges.
    pub fn neighbor(&self, cell: Cell, dir: Direction) -> Cell {
        let (dx, dy) = match dir {
            Direction::None => return cell,
            Direction::Up => (0, -self.step_y),
            Direction::Right => (self.step_x, 0),
            Direction::Down => (0, self.step_y),
            Direction::Left => (-self.step_x, 0),
        };
        Cell {
            x: self.wrap(cell.x + dx, Axis::X),
            y: self.wrap(cell.y + dy, Axis::Y),
        }
    }

    /// Starting cell for a fresh snake.
    pub fn center(&self) -> Cell {
        Cell {
            x: (self.columns() / 2) * self.step_x,
            y: (self.rows() / 2) * self.step_y,
        }
    }

    pub fn random_cell<R: Rng + ?Sized>(&self, rng: &mut R) -> Cell {
        Cell {
            x: rng.gen_range(0..self.columns()) * self.step_x,
            y: rng.gen_range(0..self.rows()) * self.step_y,
        }
    }

    pub fn contains(&self, cell: Cell) -> bool {
        cell.x >= 0 && cell.x < self.aligned_width()
            && cell.y >= 0 && cell.y < self.aligned_height()
            && cell.x % self.step_x == 0 && cell.y % self.step_y == 0
    }
}

/// Presentation layer: double-buffered, diff-based terminal renderer.
///
/// How it works:
///   1. Ticks paint the board into `board` through the `Canvas` trait
///   2. Every frame, `front` = board layer + HUD + message + overlays
///   3. Compare each glyph with `back` (previous frame)
///   4. Only emit terminal commands for glyphs that changed
///   5. All commands are batched with `queue!`, flushed once at the end
///   6. Swap front/back
///
/// The board layer only changes on a tick, so a paused or finished game
/// keeps showing exactly what the last tick painted.

use std::io::{self, BufWriter, Write};

use crossterm::{
    cursor::{self, MoveTo},
    execute, queue,
    style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    terminal::{self, Clear, ClearType},
};

use crate::domain::grid::{Cell, Grid};
use crate::sim::event::GameEvent;
use crate::sim::world::{GameStatus, WorldState};
use super::paint::{self, Canvas};

// ── Glyph: the unit of the back-buffer ──

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
struct Glyph {
    ch: char,
    fg: Color,
    bg: Color,
}

impl Glyph {
    const BASE_BG: Color = Color::Rgb { r: 22, g: 22, b: 35 };

    const BLANK: Glyph = Glyph { ch: ' ', fg: Color::White, bg: Glyph::BASE_BG };

    /// Sentinel used to invalidate the back buffer.
    /// Different from any real glyph, so every position will be diff'd.
    const INVALID: Glyph = Glyph { ch: '?', fg: Color::Magenta, bg: Color::Magenta };

    fn new(ch: char, fg: Color, bg: Color) -> Self {
        Glyph { ch, fg, bg }
    }
}

// ── FrameBuffer: a 2D grid of Glyphs ──

#[derive(Clone)]
struct FrameBuffer {
    width: usize,
    height: usize,
    cells: Vec<Glyph>,
}

impl FrameBuffer {
    fn new(w: usize, h: usize) -> Self {
        FrameBuffer { width: w, height: h, cells: vec![Glyph::BLANK; w * h] }
    }

    fn resize(&mut self, w: usize, h: usize) {
        if self.width != w || self.height != h {
            self.width = w;
            self.height = h;
            self.cells = vec![Glyph::BLANK; w * h];
        }
    }

    fn clear(&mut self) {
        self.cells.fill(Glyph::BLANK);
    }

    fn fill(&mut self, glyph: Glyph) {
        self.cells.fill(glyph);
    }

    fn set(&mut self, x: usize, y: usize, glyph: Glyph) {
        if x < self.width && y < self.height {
            self.cells[y * self.width + x] = glyph;
        }
    }

    fn get(&self, x: usize, y: usize) -> Glyph {
        if x < self.width && y < self.height {
            self.cells[y * self.width + x]
        } else {
            Glyph::BLANK
        }
    }

    /// Write a string at (x, y). Each char occupies 1 column.
    fn put_str(&mut self, x: usize, y: usize, s: &str, fg: Color, bg: Color) {
        for (i, ch) in s.chars().enumerate() {
            if x + i >= self.width { break; }
            self.set(x + i, y, Glyph::new(ch, fg, bg));
        }
    }

    /// Fill a whole row with `bg` and write `s` over it.
    fn put_bar(&mut self, y: usize, s: &str, fg: Color, bg: Color) {
        for x in 0..self.width {
            self.set(x, y, Glyph::new(' ', fg, bg));
        }
        self.put_str(0, y, s, fg, bg);
    }

    /// Copy `src` into this buffer with its top-left at (x0, y0).
    fn blit(&mut self, src: &FrameBuffer, x0: usize, y0: usize) {
        for y in 0..src.height {
            for x in 0..src.width {
                self.set(x0 + x, y0 + y, src.get(x, y));
            }
        }
    }
}

// ── Renderer ──

/// Terminal columns per grid cell, so cells look roughly square.
pub const CELL_W: usize = 2;

/// Vertical layout
const HUD_ROW: usize = 0;
const MAP_ROW: usize = 2;
/// Rows that are not board: HUD, gap, message, gap, help.
pub const RESERVED_ROWS: usize = MAP_ROW + 3;

const HUD_BG: Color = Color::Rgb { r: 20, g: 20, b: 60 };
const MSG_BG: Color = Color::Rgb { r: 200, g: 180, b: 50 };

pub struct Renderer {
    writer: BufWriter<io::Stdout>,
    front: FrameBuffer,
    back: FrameBuffer,
    /// What the last tick painted.
    board: FrameBuffer,
    board_bg: Color,
    step_x: i32,
    step_y: i32,
    term_w: usize,
    term_h: usize,
    message: String,
}

impl Renderer {
    pub fn new() -> Self {
        Renderer {
            writer: BufWriter::with_capacity(16384, io::stdout()),
            front: FrameBuffer::new(0, 0),
            back: FrameBuffer::new(0, 0),
            board: FrameBuffer::new(0, 0),
            board_bg: paint::BOARD,
            step_x: 1,
            step_y: 1,
            term_w: 0,
            term_h: 0,
            message: String::new(),
        }
    }

    pub fn init(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        execute!(
            self.writer,
            terminal::EnterAlternateScreen,
            cursor::Hide,
            SetBackgroundColor(Glyph::BASE_BG),
            Clear(ClearType::All)
        )?;

        let (tw, th) = terminal::size().unwrap_or((80, 24));
        self.term_w = tw as usize;
        self.term_h = th as usize;
        self.front.resize(self.term_w, self.term_h);
        self.back.resize(self.term_w, self.term_h);
        // Force full repaint on first frame: back ≠ front for every glyph.
        self.back.fill(Glyph::INVALID);

        Ok(())
    }

    pub fn cleanup(&mut self) -> io::Result<()> {
        execute!(
            self.writer,
            ResetColor,
            cursor::Show,
            terminal::LeaveAlternateScreen
        )?;
        terminal::disable_raw_mode()
    }

    /// Grid cells that fit the terminal: (columns, rows).
    pub fn capacity(&self) -> (usize, usize) {
        let cols = (self.term_w / CELL_W).max(1);
        let rows = self.term_h.saturating_sub(RESERVED_ROWS).max(1);
        (cols, rows)
    }

    /// Size the board layer for `grid`.
    pub fn attach(&mut self, grid: &Grid) {
        self.step_x = grid.step_x();
        self.step_y = grid.step_y();
        self.board.resize(grid.columns() as usize * CELL_W, grid.rows() as usize);
        self.board.fill(Glyph::new(' ', Color::White, self.board_bg));
    }

    /// Turn engine events into the message bar text.
    pub fn note(&mut self, events: &[GameEvent]) {
        for event in events {
            if let Some(msg) = describe(event) {
                self.message = msg;
            }
        }
    }

    pub fn render(&mut self, world: &WorldState) -> io::Result<()> {
        // Detect terminal resize
        let (tw, th) = terminal::size().unwrap_or((80, 24));
        if tw as usize != self.term_w || th as usize != self.term_h {
            self.term_w = tw as usize;
            self.term_h = th as usize;
            self.front.resize(self.term_w, self.term_h);
            self.back.resize(self.term_w, self.term_h);
            self.back.fill(Glyph::INVALID);
            queue!(self.writer, SetBackgroundColor(Glyph::BASE_BG), Clear(ClearType::All))?;
        }

        self.front.clear();
        self.compose(world);
        self.flush_diff()?;
        std::mem::swap(&mut self.front, &mut self.back);
        Ok(())
    }

    // ── Compose: build front buffer content ──

    fn compose(&mut self, w: &WorldState) {
        self.front.put_bar(HUD_ROW, &hud_line(w), Color::White, HUD_BG);

        self.front.blit(&self.board, 0, MAP_ROW);

        let msg_row = MAP_ROW + self.board.height + 1;
        let status = match w.status {
            GameStatus::Ready => Some(" Arrow keys / WASD to start "),
            GameStatus::Paused => Some(" PAUSED  [P] Resume "),
            GameStatus::Over => Some(" GAME OVER  [R] Restart "),
            GameStatus::Unpaused => None,
        };
        match status {
            Some(text) => self.front.put_bar(msg_row, text, Color::Black, MSG_BG),
            None if !self.message.is_empty() => {
                let msg = format!(" {} ", self.message);
                self.front.put_bar(msg_row, &msg, Color::Black, MSG_BG);
            }
            None => {}
        }

        let help_row = msg_row + 2;
        let help = " Arrows/WASD:Move  P/Space:Pause  R:Reset  Q/Esc:Quit";
        self.front.put_str(0, help_row, help, Color::DarkGrey, Glyph::BASE_BG);
    }

    // ── Diff flush: only write changed glyphs ──

    fn flush_diff(&mut self) -> io::Result<()> {
        let mut last_fg = Color::White;
        let mut last_bg = Glyph::BASE_BG;
        let mut need_move = true;

        queue!(self.writer,
            SetForegroundColor(Color::White),
            SetBackgroundColor(Glyph::BASE_BG),
        )?;

        for y in 0..self.front.height {
            for x in 0..self.front.width {
                let glyph = self.front.get(x, y);
                if glyph == self.back.get(x, y) {
                    need_move = true;
                    continue;
                }

                if need_move || x == 0 {
                    queue!(self.writer, MoveTo(x as u16, y as u16))?;
                    need_move = false;
                }
                if glyph.fg != last_fg {
                    queue!(self.writer, SetForegroundColor(glyph.fg))?;
                    last_fg = glyph.fg;
                }
                if glyph.bg != last_bg {
                    queue!(self.writer, SetBackgroundColor(glyph.bg))?;
                    last_bg = glyph.bg;
                }
                queue!(self.writer, Print(glyph.ch))?;
            }
        }

        self.writer.flush()
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

impl Canvas for Renderer {
    fn clear(&mut self, color: Color) {
        self.board_bg = color;
        self.board.fill(Glyph::new(' ', Color::White, color));
    }

    fn draw_cell(&mut self, origin: Cell, inset: i32, color: Color) {
        let col = (origin.x / self.step_x) as usize * CELL_W;
        let row = (origin.y / self.step_y) as usize;
        let (left, right) = cell_glyphs(inset, self.step_x);
        self.board.set(col, row, Glyph::new(left, color, self.board_bg));
        self.board.set(col + 1, row, Glyph::new(right, color, self.board_bg));
    }
}

fn hud_line(w: &WorldState) -> String {
    format!(
        " Score:{:<7}  x{:<3}  Speed:{:>4}/s  Length:{:<4}  Wall:{:<4}  Eaten:{:<4}  Special in:{:<3}",
        w.score, w.multiplier, w.speed, w.snake.len(), w.wall.len(), w.eaten, w.cadence.remaining(),
    )
}

/// Two half-cells for one grid cell. An inset leaves a sliver of board
/// showing on both sides.
fn cell_glyphs(inset: i32, step: i32) -> (char, char) {
    if inset <= 0 {
        ('█', '█')
    } else if inset * 4 < step {
        ('▐', '▌')
    } else {
        ('▗', '▖')
    }
}

fn describe(event: &GameEvent) -> Option<String> {
    match event {
        GameEvent::FoodEaten { eaten, applied, .. } if eaten != applied => {
            Some(format!("Surprise! It was {applied}"))
        }
        GameEvent::FoodEaten { applied, .. } => Some(format!("Ate {applied}")),
        GameEvent::SelfBitten { walled } => Some(format!("Ouch! {walled} cells turned to wall")),
        GameEvent::WallCleared { .. } => Some("A wall cell crumbles".to_string()),
        GameEvent::MultiplierRaised { multiplier } => Some(format!("Multiplier x{multiplier}")),
        GameEvent::FoodSlotsRaised { target } => Some(format!("{target} foods on the board")),
        GameEvent::SpeedChanged { to, .. } => Some(format!("Speed {to}/s")),
        GameEvent::Reset => Some(String::new()),
        GameEvent::WallHit { .. } | GameEvent::StatusChanged { .. } => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::domain::entity::FoodKind;

    #[test]
    fn inset_glyphs() {
        assert_eq!(cell_glyphs(0, 32), ('█', '█'));
        assert_eq!(cell_glyphs(4, 32), ('▐', '▌'));
        assert_eq!(cell_glyphs(8, 16), ('▗', '▖'));
    }

    #[test]
    fn canvas_writes_into_board_layer() {
        let grid = Grid::new(320, 320, 32, 32).unwrap();
        let mut r = Renderer::new();
        r.attach(&grid);
        assert_eq!(r.board.width, 20);
        assert_eq!(r.board.height, 10);

        r.clear(Color::Blue);
        r.draw_cell(Cell::new(64, 32), 4, Color::Red);
        assert_eq!(r.board.get(4, 1), Glyph::new('▐', Color::Red, Color::Blue));
        assert_eq!(r.board.get(5, 1), Glyph::new('▌', Color::Red, Color::Blue));
        assert_eq!(r.board.get(0, 0), Glyph::new(' ', Color::White, Color::Blue));
    }

    #[test]
    fn hud_counts_eaten_food() {
        let grid = Grid::new(320, 320, 32, 32).unwrap();
        let mut w = WorldState::new(grid, &GameConfig::default(), Some(3));
        w.eaten = 12;
        w.score = 40;
        let hud = hud_line(&w);
        assert!(hud.contains("Eaten:12"), "{hud}");
        assert!(hud.contains("Score:40"), "{hud}");
    }

    #[test]
    fn surprise_message_names_the_outcome() {
        let at = Cell::new(0, 0);
        let msg = describe(&GameEvent::FoodEaten {
            eaten: FoodKind::Surprise, applied: FoodKind::Ghost, at,
        });
        assert_eq!(msg.as_deref(), Some("Surprise! It was ghost"));
    }

    #[test]
    fn reset_clears_the_message() {
        let mut r = Renderer::new();
        r.note(&[GameEvent::MultiplierRaised { multiplier: 2 }]);
        assert_eq!(r.message, "Multiplier x2");
        r.note(&[GameEvent::Reset]);
        assert!(r.message.is_empty());
    }
}

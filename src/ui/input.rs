/// Terminal key source.
///
/// Drains every pending crossterm event once per frame and turns key
/// presses into classic key codes (see `Key::from_code`), in arrival
/// order. Release events are ignored: the game reacts to presses only.
///
/// Quit (`q`, `Esc`, Ctrl+C) is process control, not a game key, and is
/// reported separately.

use std::time::Duration;

use crossterm::event::{self, poll, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

pub struct InputState {
    /// Key codes pressed since the last drain, oldest first.
    codes: Vec<u16>,
    quit: bool,
}

impl InputState {
    pub fn new() -> Self {
        InputState {
            codes: Vec::with_capacity(8),
            quit: false,
        }
    }

    /// Read all available terminal events without blocking.
    pub fn drain_events(&mut self) {
        self.codes.clear();

        while poll(Duration::ZERO).unwrap_or(false) {
            if let Ok(Event::Key(key)) = event::read() {
                if key.kind == KeyEventKind::Release { continue; }
                if is_quit(&key) {
                    self.quit = true;
                } else if let Some(code) = key_code(key.code) {
                    self.codes.push(code);
                }
            }
        }
    }

    pub fn codes(&self) -> &[u16] {
        &self.codes
    }

    pub fn quit_requested(&self) -> bool {
        self.quit
    }
}

fn is_quit(key: &KeyEvent) -> bool {
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('Q') => true,
        KeyCode::Char('c') | KeyCode::Char('C') => key.modifiers.contains(KeyModifiers::CONTROL),
        _ => false,
    }
}

const CODE_LEFT: u16 = 37;
const CODE_UP: u16 = 38;
const CODE_RIGHT: u16 = 39;
const CODE_DOWN: u16 = 40;
const CODE_P: u16 = 80;
const CODE_R: u16 = 82;

/// Arrows or WASD steer; `p`/space pause; `r` resets.
pub fn key_code(code: KeyCode) -> Option<u16> {
    match code {
        KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('W') => Some(CODE_UP),
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => Some(CODE_RIGHT),
        KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('S') => Some(CODE_DOWN),
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => Some(CODE_LEFT),
        KeyCode::Char('p') | KeyCode::Char('P') | KeyCode::Char(' ') => Some(CODE_P),
        KeyCode::Char('r') | KeyCode::Char('R') => Some(CODE_R),
        _ => None,
    }
}

/// Input/status state machine.
///
/// Keys only stage state: a direction key writes `next_direction`, which
/// the next tick commits. Any number of direction keys may arrive between
/// two ticks; the last one that does not reverse the committed direction
/// wins.
///
/// ## Transitions
/// ┌──────────────┬───────────┬────────────────────────────┐
/// │ Status       │ Key       │ Result                     │
/// ├──────────────┼───────────┼────────────────────────────┤
/// │ any          │ Reset     │ fresh game, Ready          │
/// │ Over         │ other     │ ignored                    │
/// │ Ready        │ direction │ staged, → Unpaused         │
/// │ Unpaused     │ direction │ staged                     │
/// │ Paused       │ direction │ ignored                    │
/// │ Unpaused     │ Pause     │ → Paused                   │
/// │ Paused       │ Pause     │ → Unpaused                 │
/// │ Ready        │ Pause     │ ignored                    │
/// └──────────────┴───────────┴────────────────────────────┘

use crate::domain::grid::Direction;
use crate::error::GameError;
use super::event::GameEvent;
use super::step;
use super::world::{GameStatus, WorldState};

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Key {
    Up,
    Right,
    Down,
    Left,
    Pause,
    Reset,
}

impl Key {
    /// Classic browser key codes: arrows 37–40, `P` 80, `R` 82.
    pub fn from_code(code: u16) -> Option<Key> {
        match code {
            38 => Some(Key::Up),
            39 => Some(Key::Right),
            40 => Some(Key::Down),
            37 => Some(Key::Left),
            80 => Some(Key::Pause),
            82 => Some(Key::Reset),
            _ => None,
        }
    }

    fn direction(self) -> Option<Direction> {
        match self {
            Key::Up => Some(Direction::Up),
            Key::Right => Some(Direction::Right),
            Key::Down => Some(Direction::Down),
            Key::Left => Some(Direction::Left),
            Key::Pause | Key::Reset => None,
        }
    }
}

pub fn handle_key(world: &mut WorldState, key: Key) -> Result<Vec<GameEvent>, GameError> {
    if key == Key::Reset {
        return step::reset(world);
    }

    let mut events = Vec::new();
    match (world.status, key.direction()) {
        (GameStatus::Over, _) => {}
        (status, None) => match status {
            GameStatus::Unpaused => step::set_status(world, GameStatus::Paused, &mut events),
            GameStatus::Paused => step::set_status(world, GameStatus::Unpaused, &mut events),
            _ => {}
        },
        (GameStatus::Paused, Some(_)) => {}
        (status, Some(dir)) => {
            if dir == world.snake.direction.opposite() {
                return Ok(events);
            }
            world.next_direction = dir;
            if status == GameStatus::Ready {
                step::set_status(world, GameStatus::Unpaused, &mut events);
            }
        }
    }
    Ok(events)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::domain::grid::Grid;

    fn ready() -> WorldState {
        let grid = Grid::new(320, 320, 32, 32).unwrap();
        let mut w = WorldState::new(grid, &GameConfig::default(), Some(7));
        step::reset(&mut w).unwrap();
        w
    }

    fn press(w: &mut WorldState, key: Key) -> Vec<GameEvent> {
        handle_key(w, key).unwrap()
    }

    #[test]
    fn key_codes() {
        assert_eq!(Key::from_code(37), Some(Key::Left));
        assert_eq!(Key::from_code(38), Some(Key::Up));
        assert_eq!(Key::from_code(39), Some(Key::Right));
        assert_eq!(Key::from_code(40), Some(Key::Down));
        assert_eq!(Key::from_code(80), Some(Key::Pause));
        assert_eq!(Key::from_code(82), Some(Key::Reset));
        assert_eq!(Key::from_code(65), None);
    }

    #[test]
    fn first_direction_starts_the_game() {
        let mut w = ready();
        let events = press(&mut w, Key::Left);
        assert_eq!(w.status, GameStatus::Unpaused);
        assert_eq!(w.next_direction, Direction::Left);
        assert_eq!(w.snake.direction, Direction::None);
        assert_eq!(events, vec![GameEvent::StatusChanged {
            from: GameStatus::Ready, to: GameStatus::Unpaused,
        }]);
    }

    #[test]
    fn pause_in_ready_is_ignored() {
        let mut w = ready();
        assert!(press(&mut w, Key::Pause).is_empty());
        assert_eq!(w.status, GameStatus::Ready);
    }

    #[test]
    fn reversal_is_rejected() {
        let mut w = ready();
        press(&mut w, Key::Right);
        step::step(&mut w).unwrap();
        press(&mut w, Key::Left);
        assert_eq!(w.next_direction, Direction::Right);
    }

    #[test]
    fn last_staged_direction_wins() {
        let mut w = ready();
        press(&mut w, Key::Right);
        step::step(&mut w).unwrap();
        press(&mut w, Key::Up);
        press(&mut w, Key::Down);
        // Down is not the reverse of the committed Right.
        assert_eq!(w.next_direction, Direction::Down);
        step::step(&mut w).unwrap();
        assert_eq!(w.snake.direction, Direction::Down);
    }

    #[test]
    fn quick_double_turn_cannot_reverse() {
        // Moving right, Up then Left before the tick: Left reverses the
        // committed Right and is dropped, so the snake turns Up.
        let mut w = ready();
        press(&mut w, Key::Right);
        step::step(&mut w).unwrap();
        press(&mut w, Key::Up);
        press(&mut w, Key::Left);
        step::step(&mut w).unwrap();
        assert_eq!(w.snake.direction, Direction::Up);
    }

    #[test]
    fn pause_toggles_and_freezes_direction_keys() {
        let mut w = ready();
        press(&mut w, Key::Right);
        press(&mut w, Key::Pause);
        assert_eq!(w.status, GameStatus::Paused);
        press(&mut w, Key::Down);
        assert_eq!(w.next_direction, Direction::Right);
        let head = w.snake.head();
        step::step(&mut w).unwrap();
        assert_eq!(w.snake.head(), head);
        press(&mut w, Key::Pause);
        assert_eq!(w.status, GameStatus::Unpaused);
    }

    #[test]
    fn over_ignores_everything_but_reset() {
        let mut w = ready();
        w.status = GameStatus::Over;
        assert!(press(&mut w, Key::Pause).is_empty());
        assert!(press(&mut w, Key::Up).is_empty());
        assert_eq!(w.status, GameStatus::Over);
        press(&mut w, Key::Reset);
        assert_eq!(w.status, GameStatus::Ready);
    }

    #[test]
    fn reset_works_from_every_status() {
        for status in [GameStatus::Ready, GameStatus::Paused, GameStatus::Unpaused, GameStatus::Over] {
            let mut w = ready();
            w.status = status;
            w.score = 9;
            press(&mut w, Key::Reset);
            assert_eq!(w.status, GameStatus::Ready);
            assert_eq!(w.score, 0);
        }
    }
}

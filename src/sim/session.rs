/// Session: the engine façade the frame loop talks to.
///
/// Owns the world and the tick clock. Every status or speed change that
/// comes out of a tick or a key press is mirrored onto the clock here:
///   - Over / Paused      → clock cancelled
///   - Paused → Unpaused  → clock re-armed at the current period
///   - speed changed      → clock re-armed at the new period
///   - reset              → clock re-armed at the initial period

use std::time::Instant;

use crate::error::GameError;
use crate::ui::paint::{self, Canvas};
use super::clock::Clock;
use super::control::{self, Key};
use super::event::GameEvent;
use super::step;
use super::world::{GameStatus, WorldState};

pub struct Session<C: Clock> {
    pub world: WorldState,
    clock: C,
}

impl<C: Clock> Session<C> {
    /// Wrap `world`, start a fresh game and arm the clock.
    pub fn start(world: WorldState, clock: C) -> Result<Self, GameError> {
        let mut session = Session { world, clock };
        session.reset()?;
        Ok(session)
    }

    #[cfg(test)]
    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Is a tick due?
    pub fn poll(&mut self, now: Instant) -> bool {
        self.clock.poll(now)
    }

    pub fn reset(&mut self) -> Result<Vec<GameEvent>, GameError> {
        let events = step::reset(&mut self.world)?;
        self.clock.schedule(self.world.period());
        Ok(events)
    }

    /// Classic key code entry point. Unrecognized codes are no-ops.
    pub fn handle_code(&mut self, code: u16) -> Result<Vec<GameEvent>, GameError> {
        match Key::from_code(code) {
            Some(key) => self.handle_key(key),
            None => Ok(Vec::new()),
        }
    }

    pub fn handle_key(&mut self, key: Key) -> Result<Vec<GameEvent>, GameError> {
        if key == Key::Reset {
            return self.reset();
        }
        let events = control::handle_key(&mut self.world, key)?;
        self.sync_clock(&events);
        Ok(events)
    }

    /// One tick: paint, step, and paint again if the game just ended so
    /// the dead snake is what stays on screen.
    ///
    /// A board with no room left for food ends the game instead of
    /// propagating `BoardSaturated`.
    pub fn tick<V: Canvas + ?Sized>(&mut self, canvas: &mut V) -> Result<Vec<GameEvent>, GameError> {
        paint::paint(&self.world, canvas);

        let events = match step::step(&mut self.world) {
            Ok(events) => events,
            Err(GameError::BoardSaturated { cells }) => {
                log::warn!("board full ({cells} cells), ending game");
                let mut events = Vec::new();
                step::set_status(&mut self.world, GameStatus::Over, &mut events);
                events
            }
            Err(e) => return Err(e),
        };

        if self.world.status == GameStatus::Over {
            paint::paint(&self.world, canvas);
        }
        self.sync_clock(&events);
        Ok(events)
    }

    fn sync_clock(&mut self, events: &[GameEvent]) {
        for event in events {
            match *event {
                GameEvent::StatusChanged { to: GameStatus::Over | GameStatus::Paused, .. } => {
                    self.clock.cancel();
                }
                GameEvent::StatusChanged { from: GameStatus::Paused, to: GameStatus::Unpaused } => {
                    self.clock.schedule(self.world.period());
                }
                GameEvent::SpeedChanged { .. } if self.world.is_running() => {
                    self.clock.schedule(self.world.period());
                }
                _ => {}
            }
        }
    }
}

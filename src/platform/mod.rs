//! Platform abstraction layer
//!
//! The simulation only emits [`GameEvent`]s. This module turns them into
//! calls on display sinks:
//! - [`Surface`]: one per displayed entity (move, remove)
//! - [`Scoreboard`]: current score
//! - [`Notifier`]: end-of-session message
//!
//! Backends: `dom` (browser elements, wasm32 only) and `headless`
//! (in-memory, for native runs and tests).

#[cfg(target_arch = "wasm32")]
pub mod dom;
pub mod headless;

use std::collections::HashMap;

use glam::Vec2;

use crate::sim::{EntityId, EntityKind, GameEvent, GameState, Outcome};

/// Display handle for one entity
pub trait Surface {
    /// Place the sprite's top-left corner at `pos` (board-local units)
    fn set_position(&mut self, pos: Vec2);
    /// Take the sprite off the display. Called exactly once.
    fn remove(&mut self);
}

/// Creates display handles for newly spawned entities
pub trait SurfaceFactory {
    type Surface: Surface;

    /// `None` if the backend could not create the sprite
    fn create(&mut self, id: EntityId, kind: EntityKind) -> Option<Self::Surface>;
}

/// Receives the score after every scoring event
pub trait Scoreboard {
    fn show_score(&mut self, score: u32);
}

/// Receives the terminal outcome once per session
pub trait Notifier {
    fn notify_end(&mut self, outcome: Outcome, score: u32);
}

/// Applies simulation events to a set of sinks
pub struct Presenter<F: SurfaceFactory, S: Scoreboard, N: Notifier> {
    factory: F,
    scoreboard: S,
    notifier: N,
    surfaces: HashMap<EntityId, F::Surface>,
}

impl<F: SurfaceFactory, S: Scoreboard, N: Notifier> Presenter<F, S, N> {
    pub fn new(factory: F, scoreboard: S, notifier: N) -> Self {
        Self {
            factory,
            scoreboard,
            notifier,
            surfaces: HashMap::new(),
        }
    }

    /// Drain the session's pending events and apply them in order
    pub fn present(&mut self, state: &mut GameState) {
        for event in state.drain_events() {
            self.apply(event);
        }
    }

    pub fn apply(&mut self, event: GameEvent) {
        match event {
            GameEvent::Spawned { id, kind, pos } => {
                let Some(mut surface) = self.factory.create(id, kind) else {
                    log::warn!("Could not create sprite for {:?} {}", kind, id);
                    return;
                };
                surface.set_position(pos);
                if let Some(mut stale) = self.surfaces.insert(id, surface) {
                    log::warn!("Entity {} spawned twice, dropping old sprite", id);
                    stale.remove();
                }
            }
            GameEvent::Moved { id, pos } => match self.surfaces.get_mut(&id) {
                Some(surface) => surface.set_position(pos),
                None => log::warn!("Move for unknown entity {}", id),
            },
            GameEvent::Removed { id } => match self.surfaces.remove(&id) {
                Some(mut surface) => surface.remove(),
                None => log::warn!("Removal of unknown entity {}", id),
            },
            GameEvent::ScoreChanged { score } => self.scoreboard.show_score(score),
            GameEvent::Ended { outcome, score } => self.notifier.notify_end(outcome, score),
        }
    }

    /// Number of sprites currently on display
    pub fn live_count(&self) -> usize {
        self.surfaces.len()
    }

    pub fn is_displayed(&self, id: EntityId) -> bool {
        self.surfaces.contains_key(&id)
    }
}

#[cfg(test)]
mod tests {
    use super::headless::headless_presenter;
    use super::*;
    use crate::Settings;
    use crate::consts::*;
    use crate::sim::{KeyCommand, PLAYER_ID, ProjectileOwner, handle_key, tick};

    fn quiet_state() -> GameState {
        let settings = Settings {
            invader_fire_chance: 0.0,
            ..Default::default()
        };
        GameState::new(settings, 5)
    }

    #[test]
    fn test_initial_board() {
        let mut state = quiet_state();
        let (mut presenter, board) = headless_presenter();
        presenter.present(&mut state);

        assert_eq!(presenter.live_count(), 33);
        let board = board.borrow();
        let player = &board.sprites[&PLAYER_ID];
        assert_eq!(player.kind, EntityKind::Player);
        assert_eq!(player.pos, Vec2::new(PLAYER_START_X, PLAYER_Y));
        assert_eq!(board.score, None);
    }

    #[test]
    fn test_kill_updates_display_and_score() {
        let mut state = quiet_state();
        let (mut presenter, board) = headless_presenter();
        let target = state.formation.invaders[0].clone();
        let shot = state.spawn_projectile(
            ProjectileOwner::Player,
            Vec2::new(target.pos.x + 15.0, target.pos.y + 15.0),
        )
        .unwrap();
        presenter.present(&mut state);
        assert!(presenter.is_displayed(shot));

        tick(&mut state, 0.0);
        presenter.present(&mut state);

        assert!(!presenter.is_displayed(shot));
        assert!(!presenter.is_displayed(target.id));
        let board = board.borrow();
        assert_eq!(board.score, Some(10));
        assert_eq!(board.score_updates, 1);
        assert_eq!(board.removed, vec![shot, target.id]);
    }

    #[test]
    fn test_every_entity_removed_once() {
        let mut state = quiet_state();
        let (mut presenter, board) = headless_presenter();
        state.player.x = 0.0;
        for n in 0..20 {
            handle_key(&mut state, KeyCommand::Fire, false);
            state.spawn_invader_projectile(n % 8);
            tick(&mut state, 0.0);
            presenter.present(&mut state);
        }
        for _ in 0..200 {
            tick(&mut state, 0.0);
            presenter.present(&mut state);
        }

        let board = board.borrow();
        let mut removed = board.removed.clone();
        let total = removed.len();
        removed.sort_unstable();
        removed.dedup();
        assert_eq!(removed.len(), total);
        // Every projectile left the board
        assert_eq!(total, 40);
        assert_eq!(presenter.live_count(), 33);
    }

    #[test]
    fn test_end_notifies_once() {
        let mut state = quiet_state();
        let (mut presenter, board) = headless_presenter();
        state.end(Outcome::Loss);
        state.end(Outcome::Win);
        presenter.present(&mut state);

        assert_eq!(board.borrow().ended, vec![(Outcome::Loss, 0)]);
    }

    #[test]
    fn test_player_move_reaches_display() {
        let mut state = quiet_state();
        let (mut presenter, board) = headless_presenter();
        handle_key(&mut state, KeyCommand::MoveRight, false);
        presenter.present(&mut state);

        let x = board.borrow().sprites[&PLAYER_ID].pos.x;
        assert_eq!(x, PLAYER_START_X + PLAYER_STEP);
    }

    #[test]
    fn test_restart_rebuilds_display() {
        let mut state = quiet_state();
        let (mut presenter, board) = headless_presenter();
        handle_key(&mut state, KeyCommand::Fire, false);
        presenter.present(&mut state);
        assert_eq!(presenter.live_count(), 34);

        state.end(Outcome::Loss);
        state.restart(6);
        presenter.present(&mut state);
        assert_eq!(presenter.live_count(), 33);
        assert_eq!(board.borrow().sprites.len(), 33);
    }
}

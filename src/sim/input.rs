//! Keyboard input
//!
//! Key-down events are applied to the session as they arrive, outside the
//! frame step. Each event is one discrete command.

use crate::consts::PLAYER_STEP;

use super::state::{EntityId, GameEvent, GameState, PLAYER_ID};

/// Commands recognized from the keyboard
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyCommand {
    MoveLeft,
    MoveRight,
    Fire,
}

impl KeyCommand {
    /// Map a DOM `KeyboardEvent.key` value to a command
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "ArrowLeft" => Some(KeyCommand::MoveLeft),
            "ArrowRight" => Some(KeyCommand::MoveRight),
            " " | "Spacebar" => Some(KeyCommand::Fire),
            _ => None,
        }
    }
}

/// Apply one key-down event
///
/// `repeat` is the host's auto-repeat flag. Repeated fire events are dropped
/// only when `Settings::ignore_fire_repeat` is set. Returns the id of a newly
/// fired projectile, if any.
pub fn handle_key(state: &mut GameState, command: KeyCommand, repeat: bool) -> Option<EntityId> {
    if state.is_ended() {
        return None;
    }

    match command {
        KeyCommand::MoveLeft | KeyCommand::MoveRight => {
            let dx = if command == KeyCommand::MoveLeft {
                -PLAYER_STEP
            } else {
                PLAYER_STEP
            };
            state.player.nudge(dx);
            let pos = state.player.pos();
            state.record(GameEvent::Moved { id: PLAYER_ID, pos });
            None
        }
        KeyCommand::Fire => {
            if repeat && state.settings.ignore_fire_repeat {
                return None;
            }
            state.spawn_player_projectile()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Settings;
    use crate::consts::*;
    use crate::sim::state::Outcome;
    use proptest::prelude::*;

    fn new_state() -> GameState {
        let mut state = GameState::new(Settings::default(), 1);
        state.drain_events();
        state
    }

    #[test]
    fn test_key_mapping() {
        assert_eq!(KeyCommand::from_key("ArrowLeft"), Some(KeyCommand::MoveLeft));
        assert_eq!(KeyCommand::from_key("ArrowRight"), Some(KeyCommand::MoveRight));
        assert_eq!(KeyCommand::from_key(" "), Some(KeyCommand::Fire));
        assert_eq!(KeyCommand::from_key("Spacebar"), Some(KeyCommand::Fire));
        assert_eq!(KeyCommand::from_key("a"), None);
        assert_eq!(KeyCommand::from_key("Enter"), None);
    }

    #[test]
    fn test_move_steps_and_reports() {
        let mut state = new_state();
        handle_key(&mut state, KeyCommand::MoveLeft, false);
        assert_eq!(state.player.x, PLAYER_START_X - PLAYER_STEP);
        assert_eq!(
            state.drain_events(),
            vec![GameEvent::Moved {
                id: PLAYER_ID,
                pos: state.player.pos()
            }]
        );
    }

    #[test]
    fn test_fire_repeat_policy() {
        let mut state = new_state();
        // Default: every key-down fires, repeats included
        assert!(handle_key(&mut state, KeyCommand::Fire, false).is_some());
        assert!(handle_key(&mut state, KeyCommand::Fire, true).is_some());
        assert_eq!(state.player_projectiles.len(), 2);

        let settings = Settings {
            ignore_fire_repeat: true,
            ..Default::default()
        };
        let mut state = GameState::new(settings, 1);
        assert!(handle_key(&mut state, KeyCommand::Fire, true).is_none());
        assert!(handle_key(&mut state, KeyCommand::Fire, false).is_some());
        assert_eq!(state.player_projectiles.len(), 1);
    }

    #[test]
    fn test_input_ignored_after_end() {
        let mut state = new_state();
        state.end(Outcome::Loss);
        state.drain_events();
        let x = state.player.x;

        handle_key(&mut state, KeyCommand::MoveRight, false);
        handle_key(&mut state, KeyCommand::Fire, false);
        assert_eq!(state.player.x, x);
        assert!(state.player_projectiles.is_empty());
        assert!(state.events().is_empty());
    }

    proptest! {
        #[test]
        fn prop_player_never_leaves_board(moves in prop::collection::vec(any::<bool>(), 0..200)) {
            let mut state = new_state();
            for left in moves {
                let cmd = if left { KeyCommand::MoveLeft } else { KeyCommand::MoveRight };
                handle_key(&mut state, cmd, false);
                prop_assert!(state.player.x >= 0.0);
                prop_assert!(state.player.x <= BOARD_WIDTH - PLAYER_WIDTH);
            }
        }

        #[test]
        fn prop_left_presses_clamp_at_zero(n in 0usize..100) {
            let mut state = new_state();
            for _ in 0..n {
                handle_key(&mut state, KeyCommand::MoveLeft, false);
            }
            prop_assert!(state.player.x >= 0.0);
            if n >= 28 {
                prop_assert_eq!(state.player.x, 0.0);
            }
        }

        #[test]
        fn prop_right_presses_clamp_at_max(n in 0usize..100) {
            let mut state = new_state();
            for _ in 0..n {
                handle_key(&mut state, KeyCommand::MoveRight, false);
            }
            prop_assert!(state.player.x <= PLAYER_MAX_X);
            if n >= 28 {
                prop_assert_eq!(state.player.x, PLAYER_MAX_X);
            }
        }
    }
}

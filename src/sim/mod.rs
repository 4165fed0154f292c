//! Simulation module
//!
//! All gameplay logic lives here. Nothing in this module touches the DOM:
//! - Positions in one top-left, y-down board convention
//! - Seeded RNG only
//! - Display changes leave as `GameEvent`s

pub mod collision;
pub mod input;
pub mod state;
pub mod tick;

pub use collision::{Rect, invader_shot_hits_player, player_shot_hits_invader, rects_overlap};
pub use input::{KeyCommand, handle_key};
pub use state::{
    Direction, EntityId, EntityKind, Formation, GameEvent, GamePhase, GameState, Invader, Outcome,
    PLAYER_ID, Player, Projectile, ProjectileOwner,
};
pub use tick::{
    advance_invader_projectiles, advance_player_projectiles, check_win, step_formation, tick,
};

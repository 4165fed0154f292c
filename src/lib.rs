//! DOM Invaders - a browser arcade shooter
//!
//! Core modules:
//! - `sim`: Simulation (entity stores, input, per-frame step, session state)
//! - `platform`: Presentation boundary (display sinks, DOM and headless backends)
//! - `settings`: Runtime configuration

pub mod platform;
pub mod settings;
pub mod sim;

pub use settings::{Settings, SettingsError};

/// Game configuration constants
///
/// All positions are board-local units with the origin at the top-left
/// corner of the board and y growing downward.
pub mod consts {
    /// Board dimensions
    pub const BOARD_WIDTH: f32 = 600.0;
    pub const BOARD_HEIGHT: f32 = 400.0;

    /// Player defaults
    pub const PLAYER_WIDTH: f32 = 50.0;
    pub const PLAYER_START_X: f32 = 275.0;
    /// Top edge of the player sprite
    pub const PLAYER_Y: f32 = 370.0;
    /// Horizontal distance per key press
    pub const PLAYER_STEP: f32 = 10.0;
    /// Rightmost legal player x
    pub const PLAYER_MAX_X: f32 = BOARD_WIDTH - PLAYER_WIDTH;

    /// Player projectile spawn height, measured up from the board bottom
    pub const PLAYER_MUZZLE_ALTITUDE: f32 = 30.0;
    /// Units per frame for player-fired projectiles
    pub const PLAYER_PROJECTILE_SPEED: f32 = 5.0;
    /// Units per frame for invader-fired projectiles
    pub const INVADER_PROJECTILE_SPEED: f32 = 3.0;

    /// Vertical band (exclusive) in which an invader shot can hit the player
    pub const PLAYER_HIT_BAND_TOP: f32 = 370.0;
    pub const PLAYER_HIT_BAND_BOTTOM: f32 = 390.0;

    /// Invader sprite size
    pub const INVADER_WIDTH: f32 = 30.0;
    pub const INVADER_HEIGHT: f32 = 20.0;
    /// Horizontal offset of an invader shot from the invader's left edge
    pub const INVADER_MUZZLE_OFFSET_X: f32 = 12.5;
    /// Rightmost x an invader may occupy without triggering an edge flip
    pub const INVADER_MAX_X: f32 = BOARD_WIDTH - INVADER_WIDTH;

    /// Formation grid
    pub const INVADER_ROWS: u32 = 4;
    pub const INVADER_COLS: u32 = 8;
    pub const INVADER_SPACING_X: f32 = 60.0;
    pub const INVADER_OFFSET_X: f32 = 40.0;
    pub const INVADER_SPACING_Y: f32 = 40.0;
    pub const INVADER_OFFSET_Y: f32 = 20.0;

    /// Formation movement
    pub const FORMATION_SPEED: f32 = 5.0;
    pub const FORMATION_DESCENT: f32 = 20.0;
    /// Wall-clock cadence of formation-move ticks
    pub const FORMATION_INTERVAL_MS: f64 = 500.0;
    /// Any invader below this y ends the session
    pub const INVASION_LINE_Y: f32 = 350.0;
    /// Chance per formation-move tick that one invader fires
    pub const INVADER_FIRE_CHANCE: f64 = 0.02;

    /// Points per invader destroyed
    pub const KILL_SCORE: u32 = 10;
}

/// Clamp a player x into the legal range `[0, PLAYER_MAX_X]`
///
/// NaN collapses to 0 so the player always stays renderable.
#[inline]
pub fn clamp_player_x(x: f32) -> f32 {
    if x.is_nan() {
        return 0.0;
    }
    x.clamp(0.0, consts::PLAYER_MAX_X)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_player_x() {
        assert_eq!(clamp_player_x(-5.0), 0.0);
        assert_eq!(clamp_player_x(1000.0), consts::PLAYER_MAX_X);
        assert_eq!(clamp_player_x(123.0), 123.0);
        assert_eq!(clamp_player_x(f32::NAN), 0.0);
    }
}

//! Per-frame simulation step
//!
//! One call to [`tick`] is one presented frame. Within a frame the order is
//! fixed: timed formation step, player projectiles, invader projectiles, win
//! check. Each stage sees the state left by the previous one, and the frame
//! stops as soon as the session ends.

use rand::Rng;

use super::collision::{invader_shot_hits_player, player_shot_hits_invader};
use super::state::{GameEvent, GameState, Outcome};
use crate::consts::*;

/// Advance the session by one frame
///
/// `timestamp_ms` is the host's frame timestamp. The formation only moves
/// when more than `Settings::formation_interval_ms` has passed since its last
/// move, independent of the frame rate.
pub fn tick(state: &mut GameState, timestamp_ms: f64) {
    if state.is_ended() {
        return;
    }
    state.frame += 1;

    if timestamp_ms - state.formation.last_move_ms > state.settings.formation_interval_ms {
        state.formation.last_move_ms = timestamp_ms;
        step_formation(state);
        if state.is_ended() {
            return;
        }
    }

    advance_player_projectiles(state);
    advance_invader_projectiles(state);
    if state.is_ended() {
        return;
    }

    check_win(state);
}

/// One formation-move tick
///
/// Shifts every invader along the shared direction. If any invader leaves
/// `[0, INVADER_MAX_X]` the direction flips for the next tick and the whole
/// formation descends on this one. An invader already below the invasion
/// line when it moves ends the session; this tick's descent only counts on
/// the next tick. Otherwise a random invader may fire.
pub fn step_formation(state: &mut GameState) {
    if state.is_ended() {
        return;
    }

    let dx = FORMATION_SPEED * state.formation.direction.sign();
    let mut edge_reached = false;
    let mut invaded = false;
    for invader in &mut state.formation.invaders {
        invader.pos.x += dx;
        if invader.pos.x < 0.0 || invader.pos.x > INVADER_MAX_X {
            edge_reached = true;
        }
        if invader.pos.y > INVASION_LINE_Y {
            invaded = true;
        }
    }

    if edge_reached {
        state.formation.direction = state.formation.direction.flipped();
        for invader in &mut state.formation.invaders {
            invader.pos.y += FORMATION_DESCENT;
        }
        log::debug!(
            "Formation hit edge, now heading {:?}",
            state.formation.direction
        );
    }

    let moves: Vec<GameEvent> = state
        .formation
        .invaders
        .iter()
        .map(|i| GameEvent::Moved { id: i.id, pos: i.pos })
        .collect();
    for event in moves {
        state.record(event);
    }
    log::trace!("Formation step at frame {}", state.frame);

    if invaded {
        log::info!("Invaders reached the player row");
        state.end(Outcome::Loss);
        return;
    }

    maybe_invader_fire(state);
}

/// Roll the fire chance and pick a shooter uniformly from the formation
fn maybe_invader_fire(state: &mut GameState) {
    if state.formation.is_empty() {
        return;
    }
    let chance = state.settings.effective_fire_chance();
    if !state.rng.random_bool(chance) {
        return;
    }
    let index = state.rng.random_range(0..state.formation.len());
    if let Some(id) = state.spawn_invader_projectile(index) {
        log::debug!("Invader {} fired projectile {}", state.formation.invaders[index].id, id);
    }
}

/// Move player projectiles and resolve hits against the formation
///
/// A projectile is tested against invaders in store order and resolves
/// against the first match only.
pub fn advance_player_projectiles(state: &mut GameState) {
    if state.is_ended() {
        return;
    }
    let mut i = 0;
    while i < state.player_projectiles.len() {
        let shot = &mut state.player_projectiles[i];
        shot.advance();
        let (id, pos, altitude) = (shot.id, shot.pos, shot.altitude());

        if shot.is_off_board() {
            state.player_projectiles.remove(i);
            state.record(GameEvent::Removed { id });
            continue;
        }
        state.record(GameEvent::Moved { id, pos });

        let hit = state
            .formation
            .invaders
            .iter()
            .position(|invader| player_shot_hits_invader(pos.x, altitude, invader.pos));
        if let Some(index) = hit {
            state.player_projectiles.remove(i);
            state.record(GameEvent::Removed { id });
            state.remove_invader(index);
            state.award_kill();
            continue;
        }

        i += 1;
    }
}

/// Move invader projectiles and check them against the player
///
/// A hit ends the session immediately; ending clears the remaining
/// projectiles, the one that hit included.
pub fn advance_invader_projectiles(state: &mut GameState) {
    if state.is_ended() {
        return;
    }
    let mut i = 0;
    while i < state.invader_projectiles.len() {
        let shot = &mut state.invader_projectiles[i];
        shot.advance();
        let (id, pos) = (shot.id, shot.pos);

        if shot.is_off_board() {
            state.invader_projectiles.remove(i);
            state.record(GameEvent::Removed { id });
            continue;
        }
        state.record(GameEvent::Moved { id, pos });

        if invader_shot_hits_player(pos, state.player.x) {
            log::info!("Player hit by projectile {}", id);
            state.end(Outcome::Loss);
            return;
        }

        i += 1;
    }
}

/// End the session as a win once the formation is gone
pub fn check_win(state: &mut GameState) {
    if state.is_running() && state.formation.is_empty() {
        state.end(Outcome::Win);
    }
}

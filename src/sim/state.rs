//! Game state and core simulation types
//!
//! Entity stores, the shared formation state and the session outcome all
//! live on [`GameState`]. Display handles are plain entity ids; every change
//! the presentation layer needs to know about is recorded as a [`GameEvent`].

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::Settings;
use crate::clamp_player_x;
use crate::consts::*;

/// Identity of a displayed entity
pub type EntityId = u32;

/// The player always owns this id
pub const PLAYER_ID: EntityId = 0;

/// How a session ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    Win,
    Loss,
}

impl Outcome {
    /// Label shown in the terminal notification
    pub fn label(&self) -> &'static str {
        match self {
            Outcome::Win => "You win!",
            Outcome::Loss => "Game over",
        }
    }
}

/// Session status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    Running,
    /// One-way terminal state
    Ended(Outcome),
}

/// What kind of sprite an entity is drawn as
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntityKind {
    Player,
    Invader,
    PlayerProjectile,
    InvaderProjectile,
}

/// State diff consumed by the presentation layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    Spawned { id: EntityId, kind: EntityKind, pos: Vec2 },
    Moved { id: EntityId, pos: Vec2 },
    Removed { id: EntityId },
    ScoreChanged { score: u32 },
    Ended { outcome: Outcome, score: u32 },
}

/// The player's ship
#[derive(Debug, Clone)]
pub struct Player {
    /// Left edge, always within `[0, PLAYER_MAX_X]`
    pub x: f32,
}

impl Default for Player {
    fn default() -> Self {
        Self { x: PLAYER_START_X }
    }
}

impl Player {
    pub fn pos(&self) -> Vec2 {
        Vec2::new(self.x, PLAYER_Y)
    }

    /// Move horizontally by `dx`, clamped to the board
    pub fn nudge(&mut self, dx: f32) {
        self.x = clamp_player_x(self.x + dx);
    }

    /// Where a new player projectile appears (centre of the ship)
    pub fn muzzle_x(&self) -> f32 {
        self.x + PLAYER_WIDTH / 2.0
    }
}

/// Who fired a projectile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProjectileOwner {
    Player,
    Invader,
}

impl ProjectileOwner {
    pub fn kind(&self) -> EntityKind {
        match self {
            ProjectileOwner::Player => EntityKind::PlayerProjectile,
            ProjectileOwner::Invader => EntityKind::InvaderProjectile,
        }
    }
}

/// A projectile in flight
#[derive(Debug, Clone)]
pub struct Projectile {
    pub id: EntityId,
    pub owner: ProjectileOwner,
    pub pos: Vec2,
}

impl Projectile {
    /// Height above the board bottom
    #[inline]
    pub fn altitude(&self) -> f32 {
        BOARD_HEIGHT - self.pos.y
    }

    /// Move one frame along the owner's firing direction
    pub fn advance(&mut self) {
        match self.owner {
            ProjectileOwner::Player => self.pos.y -= PLAYER_PROJECTILE_SPEED,
            ProjectileOwner::Invader => self.pos.y += INVADER_PROJECTILE_SPEED,
        }
    }

    /// Past the far edge of the board for its direction of travel
    pub fn is_off_board(&self) -> bool {
        match self.owner {
            ProjectileOwner::Player => self.altitude() > BOARD_HEIGHT,
            ProjectileOwner::Invader => self.pos.y > BOARD_HEIGHT,
        }
    }
}

/// An invader in the formation
#[derive(Debug, Clone)]
pub struct Invader {
    pub id: EntityId,
    /// Grid slot at creation, identity only
    pub row: u32,
    pub col: u32,
    /// Top-left corner
    pub pos: Vec2,
}

/// Shared horizontal heading of the formation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Direction {
    #[default]
    Right,
    Left,
}

impl Direction {
    pub fn sign(&self) -> f32 {
        match self {
            Direction::Right => 1.0,
            Direction::Left => -1.0,
        }
    }

    pub fn flipped(&self) -> Self {
        match self {
            Direction::Right => Direction::Left,
            Direction::Left => Direction::Right,
        }
    }
}

/// Live invaders plus the state they share
#[derive(Debug, Clone, Default)]
pub struct Formation {
    /// Creation order, row-major
    pub invaders: Vec<Invader>,
    pub direction: Direction,
    /// Timestamp (ms) of the last formation-move tick
    pub last_move_ms: f64,
}

impl Formation {
    pub fn is_empty(&self) -> bool {
        self.invaders.is_empty()
    }

    pub fn len(&self) -> usize {
        self.invaders.len()
    }
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameState {
    pub settings: Settings,
    /// Run seed for reproducibility
    pub seed: u64,
    /// Source for invader fire decisions
    pub rng: Pcg32,
    pub score: u32,
    pub phase: GamePhase,
    /// Frames processed while running
    pub frame: u64,
    pub player: Player,
    pub player_projectiles: Vec<Projectile>,
    pub invader_projectiles: Vec<Projectile>,
    pub formation: Formation,
    /// Pending state diffs for the presentation layer
    events: Vec<GameEvent>,
    /// Next entity ID
    next_id: EntityId,
}

impl GameState {
    /// Create a running session with the player and a full formation
    pub fn new(settings: Settings, seed: u64) -> Self {
        let mut state = Self {
            settings,
            seed,
            rng: Pcg32::seed_from_u64(seed),
            score: 0,
            phase: GamePhase::Running,
            frame: 0,
            player: Player::default(),
            player_projectiles: Vec::new(),
            invader_projectiles: Vec::new(),
            formation: Formation::default(),
            events: Vec::new(),
            next_id: PLAYER_ID + 1,
        };

        state.events.push(GameEvent::Spawned {
            id: PLAYER_ID,
            kind: EntityKind::Player,
            pos: state.player.pos(),
        });
        state.spawn_formation();

        log::info!(
            "Session started (seed {}, {} invaders)",
            seed,
            state.formation.len()
        );
        state
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> EntityId {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Lay out the `INVADER_ROWS` x `INVADER_COLS` grid
    pub fn spawn_formation(&mut self) {
        for row in 0..INVADER_ROWS {
            for col in 0..INVADER_COLS {
                let pos = Vec2::new(
                    col as f32 * INVADER_SPACING_X + INVADER_OFFSET_X,
                    row as f32 * INVADER_SPACING_Y + INVADER_OFFSET_Y,
                );
                self.spawn_invader(row, col, pos);
            }
        }
    }

    /// Add one invader at an explicit position. No-op once ended.
    pub fn spawn_invader(&mut self, row: u32, col: u32, pos: Vec2) -> Option<EntityId> {
        if self.is_ended() {
            return None;
        }
        let id = self.next_entity_id();
        self.formation.invaders.push(Invader { id, row, col, pos });
        self.events.push(GameEvent::Spawned {
            id,
            kind: EntityKind::Invader,
            pos,
        });
        Some(id)
    }

    pub fn is_running(&self) -> bool {
        self.phase == GamePhase::Running
    }

    pub fn is_ended(&self) -> bool {
        !self.is_running()
    }

    pub fn outcome(&self) -> Option<Outcome> {
        match self.phase {
            GamePhase::Running => None,
            GamePhase::Ended(outcome) => Some(outcome),
        }
    }

    /// Fire from the player's muzzle. No-op once ended.
    pub fn spawn_player_projectile(&mut self) -> Option<EntityId> {
        if self.is_ended() {
            return None;
        }
        let pos = Vec2::new(self.player.muzzle_x(), BOARD_HEIGHT - PLAYER_MUZZLE_ALTITUDE);
        self.spawn_projectile(ProjectileOwner::Player, pos)
    }

    /// Fire from the invader at `index` in the formation store
    pub fn spawn_invader_projectile(&mut self, index: usize) -> Option<EntityId> {
        if self.is_ended() {
            return None;
        }
        let invader_pos = self.formation.invaders.get(index)?.pos;
        let pos = Vec2::new(invader_pos.x + INVADER_MUZZLE_OFFSET_X, invader_pos.y);
        self.spawn_projectile(ProjectileOwner::Invader, pos)
    }

    /// Insert a projectile at an explicit position. No-op once ended.
    pub fn spawn_projectile(&mut self, owner: ProjectileOwner, pos: Vec2) -> Option<EntityId> {
        if self.is_ended() {
            return None;
        }
        let id = self.next_entity_id();
        let projectile = Projectile { id, owner, pos };
        match owner {
            ProjectileOwner::Player => self.player_projectiles.push(projectile),
            ProjectileOwner::Invader => self.invader_projectiles.push(projectile),
        }
        self.events.push(GameEvent::Spawned {
            id,
            kind: owner.kind(),
            pos,
        });
        Some(id)
    }

    /// Take the invader at `index` out of the formation and off the display.
    /// `None` once ended or if `index` is out of range.
    pub fn remove_invader(&mut self, index: usize) -> Option<Invader> {
        if self.is_ended() || index >= self.formation.invaders.len() {
            return None;
        }
        let invader = self.formation.invaders.remove(index);
        self.events.push(GameEvent::Removed { id: invader.id });
        Some(invader)
    }

    /// Credit one kill and push the new score to the scoreboard.
    /// No-op once ended.
    pub fn award_kill(&mut self) {
        if self.is_ended() {
            return;
        }
        self.score += KILL_SCORE;
        self.events.push(GameEvent::ScoreChanged { score: self.score });
    }

    pub(crate) fn record(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Transition to `Ended(outcome)`. A second call is a no-op.
    ///
    /// Projectiles still in flight are removed; invaders and the player stay
    /// on display so the final board remains visible.
    pub fn end(&mut self, outcome: Outcome) {
        if self.is_ended() {
            return;
        }
        self.phase = GamePhase::Ended(outcome);

        let in_flight: Vec<EntityId> = self
            .player_projectiles
            .drain(..)
            .chain(self.invader_projectiles.drain(..))
            .map(|p| p.id)
            .collect();
        for id in in_flight {
            self.events.push(GameEvent::Removed { id });
        }

        self.events.push(GameEvent::Ended {
            outcome,
            score: self.score,
        });
        log::info!(
            "Session ended: {:?} with score {} after {} frames",
            outcome,
            self.score,
            self.frame
        );
    }

    /// Replace this session with a fresh one, clearing every live entity
    /// from the display first
    pub fn restart(&mut self, seed: u64) {
        let live: Vec<EntityId> = std::iter::once(PLAYER_ID)
            .chain(self.formation.invaders.iter().map(|i| i.id))
            .chain(self.player_projectiles.iter().map(|p| p.id))
            .chain(self.invader_projectiles.iter().map(|p| p.id))
            .collect();
        let mut pending = std::mem::take(&mut self.events);
        pending.extend(live.into_iter().map(|id| GameEvent::Removed { id }));

        let settings = self.settings.clone();
        *self = Self::new(settings, seed);
        pending.append(&mut self.events);
        self.events = pending;
        log::info!("Session restarted");
    }

    /// Hand pending events to the presentation layer
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Pending events, oldest first
    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }
}

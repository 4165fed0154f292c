//! In-memory display backend
//!
//! Records what a real display would show. Used by the native binary and by
//! tests that check presentation without a browser.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

use glam::Vec2;

use super::{Notifier, Presenter, Scoreboard, Surface, SurfaceFactory};
use crate::sim::{EntityId, EntityKind, Outcome};

/// A sprite currently on the headless board
#[derive(Debug, Clone, PartialEq)]
pub struct Sprite {
    pub kind: EntityKind,
    pub pos: Vec2,
}

/// Everything the headless display has been told
#[derive(Debug, Default)]
pub struct Board {
    pub sprites: BTreeMap<EntityId, Sprite>,
    /// Ids in removal order
    pub removed: Vec<EntityId>,
    pub score: Option<u32>,
    pub score_updates: usize,
    pub ended: Vec<(Outcome, u32)>,
}

pub type SharedBoard = Rc<RefCell<Board>>;

pub struct HeadlessSurface {
    id: EntityId,
    board: SharedBoard,
}

impl Surface for HeadlessSurface {
    fn set_position(&mut self, pos: Vec2) {
        if let Some(sprite) = self.board.borrow_mut().sprites.get_mut(&self.id) {
            sprite.pos = pos;
        }
    }

    fn remove(&mut self) {
        let mut board = self.board.borrow_mut();
        board.sprites.remove(&self.id);
        board.removed.push(self.id);
    }
}

pub struct HeadlessFactory {
    board: SharedBoard,
}

impl SurfaceFactory for HeadlessFactory {
    type Surface = HeadlessSurface;

    fn create(&mut self, id: EntityId, kind: EntityKind) -> Option<HeadlessSurface> {
        self.board.borrow_mut().sprites.insert(
            id,
            Sprite {
                kind,
                pos: Vec2::ZERO,
            },
        );
        Some(HeadlessSurface {
            id,
            board: self.board.clone(),
        })
    }
}

pub struct HeadlessScoreboard {
    board: SharedBoard,
}

impl Scoreboard for HeadlessScoreboard {
    fn show_score(&mut self, score: u32) {
        let mut board = self.board.borrow_mut();
        board.score = Some(score);
        board.score_updates += 1;
    }
}

/// Records the outcome and logs it
pub struct HeadlessNotifier {
    board: SharedBoard,
}

impl Notifier for HeadlessNotifier {
    fn notify_end(&mut self, outcome: Outcome, score: u32) {
        log::info!("{} Score: {}", outcome.label(), score);
        self.board.borrow_mut().ended.push((outcome, score));
    }
}

pub type HeadlessPresenter = Presenter<HeadlessFactory, HeadlessScoreboard, HeadlessNotifier>;

/// Presenter wired to a fresh shared board
pub fn headless_presenter() -> (HeadlessPresenter, SharedBoard) {
    let board: SharedBoard = Rc::new(RefCell::new(Board::default()));
    let presenter = Presenter::new(
        HeadlessFactory {
            board: board.clone(),
        },
        HeadlessScoreboard {
            board: board.clone(),
        },
        HeadlessNotifier {
            board: board.clone(),
        },
    );
    (presenter, board)
}

//! Browser DOM backend
//!
//! Each entity is an absolutely positioned `div` inside the board element.
//! Styling comes from the page's stylesheet via class names.

use glam::Vec2;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement, Window};

use super::{Notifier, Presenter, Scoreboard, Surface, SurfaceFactory};
use crate::sim::{EntityId, EntityKind, Outcome};

/// CSS class for each kind of sprite
fn class_name(kind: EntityKind) -> &'static str {
    match kind {
        EntityKind::Player => "player",
        EntityKind::Invader => "invader",
        EntityKind::PlayerProjectile => "bullet",
        EntityKind::InvaderProjectile => "bullet invader-bullet",
    }
}

pub struct DomSurface {
    element: HtmlElement,
}

impl Surface for DomSurface {
    fn set_position(&mut self, pos: Vec2) {
        let style = self.element.style();
        for (property, value) in [("left", pos.x), ("top", pos.y)] {
            if let Err(e) = style.set_property(property, &format!("{}px", value)) {
                log::warn!("set_property {} failed: {:?}", property, e);
            }
        }
    }

    fn remove(&mut self) {
        self.element.remove();
    }
}

/// Creates sprites as children of the board element
pub struct DomFactory {
    document: Document,
    board: Element,
}

impl DomFactory {
    pub fn new(document: Document, board: Element) -> Self {
        Self { document, board }
    }
}

impl SurfaceFactory for DomFactory {
    type Surface = DomSurface;

    fn create(&mut self, id: EntityId, kind: EntityKind) -> Option<DomSurface> {
        let element = match self.document.create_element("div") {
            Ok(el) => el,
            Err(e) => {
                log::warn!("create_element failed: {:?}", e);
                return None;
            }
        };
        element.set_class_name(class_name(kind));
        if let Err(e) = element.set_attribute("data-entity", &id.to_string()) {
            log::warn!("set_attribute failed: {:?}", e);
        }
        if let Err(e) = self.board.append_child(&element) {
            log::warn!("append_child failed: {:?}", e);
            return None;
        }
        let element: HtmlElement = element.dyn_into().ok()?;
        Some(DomSurface { element })
    }
}

/// Writes the score into a text element
pub struct DomScoreboard {
    element: Element,
}

impl DomScoreboard {
    pub fn new(element: Element) -> Self {
        element.set_text_content(Some("0"));
        Self { element }
    }
}

impl Scoreboard for DomScoreboard {
    fn show_score(&mut self, score: u32) {
        self.element.set_text_content(Some(&score.to_string()));
    }
}

/// Reports the outcome with `window.alert`
pub struct AlertNotifier {
    window: Window,
}

impl AlertNotifier {
    pub fn new(window: Window) -> Self {
        Self { window }
    }
}

impl Notifier for AlertNotifier {
    fn notify_end(&mut self, outcome: Outcome, score: u32) {
        log::info!("{} Score: {}", outcome.label(), score);
        let message = format!("{}\nScore: {}", outcome.label(), score);
        if let Err(e) = self.window.alert_with_message(&message) {
            log::warn!("alert failed: {:?}", e);
        }
    }
}

pub type DomPresenter = Presenter<DomFactory, DomScoreboard, AlertNotifier>;

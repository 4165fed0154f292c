//! Collision detection for axis-aligned sprites
//!
//! Everything on the board is an axis-aligned rectangle. Projectiles are
//! tested as points against the rectangle spans with strict bounds, so a
//! projectile sitting exactly on an edge does not hit.

use glam::Vec2;

use crate::consts::*;

/// Axis-aligned rectangle in board-local units (top-left origin)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub min: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            min: Vec2::new(x, y),
            size: Vec2::new(w, h),
        }
    }

    #[inline]
    pub fn max(&self) -> Vec2 {
        self.min + self.size
    }

    /// True if the point lies strictly inside the rectangle
    #[inline]
    pub fn contains_strict(&self, p: Vec2) -> bool {
        let max = self.max();
        p.x > self.min.x && p.x < max.x && p.y > self.min.y && p.y < max.y
    }
}

/// Overlap test between two rectangles
///
/// Touching edges do not count as overlap.
pub fn rects_overlap(a: &Rect, b: &Rect) -> bool {
    let (a_max, b_max) = (a.max(), b.max());
    a.min.x < b_max.x && b.min.x < a_max.x && a.min.y < b_max.y && b.min.y < a_max.y
}

/// Bounding box of an invader whose top-left corner is `pos`
#[inline]
pub fn invader_rect(pos: Vec2) -> Rect {
    Rect::new(pos.x, pos.y, INVADER_WIDTH, INVADER_HEIGHT)
}

/// Hit box of the player at horizontal position `player_x`
///
/// Spans the player's width and the narrow band around its row.
#[inline]
pub fn player_hit_rect(player_x: f32) -> Rect {
    Rect::new(
        player_x,
        PLAYER_HIT_BAND_TOP,
        PLAYER_WIDTH,
        PLAYER_HIT_BAND_BOTTOM - PLAYER_HIT_BAND_TOP,
    )
}

/// Player-fired projectile against an invader
///
/// `altitude` is the projectile's height above the board bottom. It is
/// converted back to a top-measured y before comparing with the invader.
pub fn player_shot_hits_invader(shot_x: f32, altitude: f32, invader_pos: Vec2) -> bool {
    let y = BOARD_HEIGHT - altitude;
    invader_rect(invader_pos).contains_strict(Vec2::new(shot_x, y))
}

/// Invader-fired projectile against the player
pub fn invader_shot_hits_player(shot_pos: Vec2, player_x: f32) -> bool {
    player_hit_rect(player_x).contains_strict(shot_pos)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rects_overlap() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(5.0, 5.0, 10.0, 10.0);
        assert!(rects_overlap(&a, &b));
        assert!(rects_overlap(&b, &a));

        // Shared edge only
        let c = Rect::new(10.0, 0.0, 10.0, 10.0);
        assert!(!rects_overlap(&a, &c));

        let d = Rect::new(50.0, 50.0, 1.0, 1.0);
        assert!(!rects_overlap(&a, &d));
    }

    #[test]
    fn test_player_shot_hits_invader() {
        // Invader at (40, 20) covers x in (40, 70), y in (20, 40)
        let invader = Vec2::new(40.0, 20.0);

        // y = 400 - 370 = 30, inside
        assert!(player_shot_hits_invader(55.0, 370.0, invader));
        // On the left edge: strict, no hit
        assert!(!player_shot_hits_invader(40.0, 370.0, invader));
        // On the right edge
        assert!(!player_shot_hits_invader(70.0, 370.0, invader));
        // Exactly at invader bottom (y = 40)
        assert!(!player_shot_hits_invader(55.0, 360.0, invader));
        // Below the invader
        assert!(!player_shot_hits_invader(55.0, 100.0, invader));
    }

    #[test]
    fn test_invader_shot_hits_player() {
        let player_x = 275.0;
        assert!(invader_shot_hits_player(Vec2::new(300.0, 371.0), player_x));
        assert!(invader_shot_hits_player(Vec2::new(276.0, 389.0), player_x));
        // Outside the band
        assert!(!invader_shot_hits_player(Vec2::new(300.0, 370.0), player_x));
        assert!(!invader_shot_hits_player(Vec2::new(300.0, 390.0), player_x));
        // Outside the player's span
        assert!(!invader_shot_hits_player(Vec2::new(275.0, 380.0), player_x));
        assert!(!invader_shot_hits_player(Vec2::new(325.0, 380.0), player_x));
    }
}

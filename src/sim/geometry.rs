//! Static table geometry
//!
//! Pocket and rack layouts are fixed ratios of the table size. The origin is
//! the table center, x runs along the long edge.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Pocket centers as fractions of (width, height): four corners, two mid long-edge
const POCKET_RATIOS: [(f32, f32); POCKET_COUNT] = [
    (-0.5, -0.5),
    (0.0, -0.5),
    (0.5, -0.5),
    (-0.5, 0.5),
    (0.0, 0.5),
    (0.5, 0.5),
];

/// Starting ball centers as fractions of (width, height). Entry 0 is the cue ball.
const RACK_RATIOS: [(f32, f32); BALL_COUNT] = [
    // player ball
    (-0.3, 0.0),
    // object balls, apex toward the cue ball
    (0.2, 0.0),
    (0.25, 0.05),
    (0.25, -0.05),
    (0.3, 0.1),
    (0.3, 0.0),
    (0.3, -0.1),
];

/// Table dimensions plus the shared ball and pocket radii
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TableGeometry {
    pub width: f32,
    pub height: f32,
    pub ball_radius: f32,
    pub pocket_radius: f32,
}

impl Default for TableGeometry {
    fn default() -> Self {
        Self {
            width: TABLE_WIDTH,
            height: TABLE_HEIGHT,
            ball_radius: BALL_RADIUS,
            pocket_radius: POCKET_RADIUS,
        }
    }
}

impl TableGeometry {
    /// Half width / half height of the cloth
    #[inline]
    pub fn half_extents(&self) -> Vec2 {
        Vec2::new(0.5 * self.width, 0.5 * self.height)
    }

    /// Largest |x|, |y| a resting ball center may take (rail minus radius)
    #[inline]
    pub fn playable_half_extents(&self) -> Vec2 {
        self.half_extents() - Vec2::splat(self.ball_radius)
    }

    /// Whether a ball centered at `pos` lies fully on the cloth
    pub fn contains_ball(&self, pos: Vec2) -> bool {
        let limit = self.playable_half_extents();
        pos.x.abs() <= limit.x && pos.y.abs() <= limit.y
    }

    /// Clamp a ball center into the playable rectangle
    pub fn clamp_ball(&self, pos: Vec2) -> Vec2 {
        let limit = self.playable_half_extents();
        pos.clamp(-limit, limit)
    }

    /// The six pocket centers, ordered by pocket index
    pub fn pocket_positions(&self) -> [Vec2; POCKET_COUNT] {
        POCKET_RATIOS.map(|(rx, ry)| Vec2::new(rx * self.width, ry * self.height))
    }

    /// Starting layout for all balls, ordered by ball index
    pub fn rack_positions(&self) -> [Vec2; BALL_COUNT] {
        RACK_RATIOS.map(|(rx, ry)| Vec2::new(rx * self.width, ry * self.height))
    }

    /// First pocket (by index) whose capture circle contains `pos`
    pub fn pocket_at(&self, pos: Vec2) -> Option<usize> {
        let r_sq = self.pocket_radius * self.pocket_radius;
        self.pocket_positions()
            .iter()
            .position(|pocket| pocket.distance_squared(pos) <= r_sq)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pocket_positions() {
        let geo = TableGeometry::default();
        let pockets = geo.pocket_positions();
        assert_eq!(pockets[0], Vec2::new(-7.5, -4.0));
        assert_eq!(pockets[1], Vec2::new(0.0, -4.0));
        assert_eq!(pockets[2], Vec2::new(7.5, -4.0));
        assert_eq!(pockets[3], Vec2::new(-7.5, 4.0));
        assert_eq!(pockets[4], Vec2::new(0.0, 4.0));
        assert_eq!(pockets[5], Vec2::new(7.5, 4.0));
    }

    #[test]
    fn test_rack_positions() {
        let geo = TableGeometry::default();
        let rack = geo.rack_positions();
        assert!((rack[0] - Vec2::new(-4.5, 0.0)).length() < 1e-5);
        assert!((rack[1] - Vec2::new(3.0, 0.0)).length() < 1e-5);
        assert!((rack[2] - Vec2::new(3.75, 0.4)).length() < 1e-5);
        assert!((rack[6] - Vec2::new(4.5, -0.8)).length() < 1e-5);

        // Every ball starts on the cloth and clear of its neighbours
        for (i, a) in rack.iter().enumerate() {
            assert!(geo.contains_ball(*a));
            for b in &rack[i + 1..] {
                assert!(a.distance(*b) >= 2.0 * geo.ball_radius);
            }
        }
    }

    #[test]
    fn test_pocket_at() {
        let geo = TableGeometry::default();
        assert_eq!(geo.pocket_at(Vec2::new(0.0, 4.0)), Some(4));
        assert_eq!(geo.pocket_at(Vec2::new(0.0, 3.65)), Some(4));
        assert_eq!(geo.pocket_at(Vec2::new(0.0, 3.5)), None);
        assert_eq!(geo.pocket_at(Vec2::ZERO), None);
    }

    #[test]
    fn test_clamp_ball() {
        let geo = TableGeometry::default();
        let clamped = geo.clamp_ball(Vec2::new(9.0, -9.0));
        assert!((clamped - Vec2::new(7.2, -3.7)).length() < 1e-5);
        assert!(geo.contains_ball(clamped));
    }
}

//! Table state and core simulation types
//!
//! Balls and pockets live in fixed-size arrays indexed by small integers;
//! nothing is added or destroyed while a table is alive.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::geometry::TableGeometry;
use crate::consts::*;
use crate::kinetic_energy;

/// A ball on the table
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ball {
    /// Stable index, 0 is the cue ball
    pub id: usize,
    pub pos: Vec2,
    pub vel: Vec2,
    /// Pocket that captured this ball, if any. Capture is permanent.
    pub pocketed: Option<usize>,
}

impl Ball {
    pub fn new(id: usize, pos: Vec2) -> Self {
        Self {
            id,
            pos,
            vel: Vec2::ZERO,
            pocketed: None,
        }
    }

    #[inline]
    pub fn is_pocketed(&self) -> bool {
        self.pocketed.is_some()
    }

    /// Still on the cloth and taking part in physics
    #[inline]
    pub fn is_active(&self) -> bool {
        self.pocketed.is_none()
    }

    #[inline]
    pub fn is_moving(&self) -> bool {
        self.is_active() && self.vel != Vec2::ZERO
    }

    /// Remove the ball from play
    pub fn capture(&mut self, pocket: usize) {
        self.pocketed = Some(pocket);
        self.vel = Vec2::ZERO;
    }
}

/// A pocket: capture circle at a fixed position
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pocket {
    pub id: usize,
    pub pos: Vec2,
    pub radius: f32,
}

/// Something that happened during a step, for presentation (sound, UI, logs)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum TableEvent {
    /// Cue ball launched by a released shot
    ShotFired { ball: usize, velocity: Vec2 },
    /// Two balls exchanged momentum
    BallCollision { a: usize, b: usize },
    /// A ball bounced off a rail
    CushionHit { ball: usize },
    /// A ball dropped into a pocket
    BallPocketed { ball: usize, pocket: usize },
    /// The last moving ball stopped
    CameToRest,
}

/// All balls and pockets of one game session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Table {
    pub geometry: TableGeometry,
    pub balls: [Ball; BALL_COUNT],
    pub pockets: [Pocket; POCKET_COUNT],
}

impl Table {
    /// Fresh table with the standard rack
    pub fn new(geometry: TableGeometry) -> Self {
        let rack = geometry.rack_positions();
        let pocket_positions = geometry.pocket_positions();
        Self {
            geometry,
            balls: std::array::from_fn(|id| Ball::new(id, rack[id])),
            pockets: std::array::from_fn(|id| Pocket {
                id,
                pos: pocket_positions[id],
                radius: geometry.pocket_radius,
            }),
        }
    }

    /// True when no ball on the cloth has any velocity
    pub fn is_at_rest(&self) -> bool {
        !self.balls.iter().any(Ball::is_moving)
    }

    /// Balls still on the cloth
    pub fn balls_remaining(&self) -> usize {
        self.balls.iter().filter(|b| b.is_active()).count()
    }

    /// Sum of ½|v|² over active balls (unit mass)
    pub fn total_kinetic_energy(&self) -> f32 {
        self.balls
            .iter()
            .filter(|b| b.is_active())
            .map(|b| kinetic_energy(b.vel))
            .sum()
    }
}

/// Copy of the observable table state, safe to hand to another thread
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableSnapshot {
    pub balls: Vec<Ball>,
    pub charging: bool,
    pub charge_progress: f32,
}

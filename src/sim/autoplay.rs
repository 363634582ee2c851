//! Idle/demo mode shot planner
//!
//! Picks a remaining object ball at random and aims the cue ball at it with a
//! little angular noise. Seeded, so a given seed replays the same game.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::table::TableSimulation;
use crate::consts::CUE_BALL;
use crate::error::Result;

/// Maximum aiming error (radians)
const AIM_JITTER: f32 = 0.04;
/// Charge range as a fraction of the full charge time
const MIN_CHARGE: f32 = 0.3;
const MAX_CHARGE: f32 = 1.0;

/// What the autoplayer wants to do next
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlannedShot {
    /// Object ball being aimed at
    pub target: usize,
    /// Unit direction for the release
    pub direction: Vec2,
    /// Seconds to hold the charge
    pub charge_secs: f32,
}

/// Seeded opponent that plans one shot at a time
#[derive(Debug, Clone)]
pub struct AutoPlayer {
    rng: Pcg32,
}

impl AutoPlayer {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Plan the next shot, or `None` if the cue ball is gone or nothing is left to hit
    pub fn plan(&mut self, sim: &TableSimulation) -> Result<Option<PlannedShot>> {
        let balls = sim.balls()?;
        let cue = &balls[CUE_BALL];
        if cue.is_pocketed() {
            return Ok(None);
        }

        let targets: Vec<_> = balls
            .iter()
            .filter(|b| b.id != CUE_BALL && b.is_active())
            .collect();
        if targets.is_empty() {
            return Ok(None);
        }

        let target = targets[self.rng.random_range(0..targets.len())];
        let Some(aim) = (target.pos - cue.pos).try_normalize() else {
            return Ok(None);
        };

        let jitter = self.rng.random_range(-AIM_JITTER..=AIM_JITTER);
        let direction = Vec2::from_angle(jitter).rotate(aim);
        let charge = self.rng.random_range(MIN_CHARGE..=MAX_CHARGE);

        Ok(Some(PlannedShot {
            target: target.id,
            direction,
            charge_secs: charge * sim.config().charge_time,
        }))
    }
}

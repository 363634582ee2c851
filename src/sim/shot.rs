//! Charge-and-release shot mechanic
//!
//! Holding input charges the shot; releasing converts the accumulated charge
//! into a launch velocity for the cue ball.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Shot state machine phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ShotPhase {
    /// Waiting for a press
    #[default]
    Idle,
    /// Input held, charge accumulating
    Charging,
}

/// Turns a held input into a cue ball launch velocity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShotController {
    phase: ShotPhase,
    /// Charge fraction in [0, 1]
    progress: f32,
    /// Seconds to reach full charge
    charge_time: f32,
    /// Launch speed at full charge
    max_shot_speed: f32,
}

impl ShotController {
    pub fn new(charge_time: f32, max_shot_speed: f32) -> Self {
        Self {
            phase: ShotPhase::Idle,
            progress: 0.0,
            charge_time,
            max_shot_speed,
        }
    }

    pub fn phase(&self) -> ShotPhase {
        self.phase
    }

    #[inline]
    pub fn is_charging(&self) -> bool {
        self.phase == ShotPhase::Charging
    }

    /// Charge fraction for the progress bar
    #[inline]
    pub fn progress(&self) -> f32 {
        self.progress
    }

    /// Start charging. A press while already charging is ignored.
    pub fn press(&mut self) {
        if self.phase == ShotPhase::Idle {
            self.phase = ShotPhase::Charging;
            self.progress = 0.0;
        }
    }

    /// Accumulate charge; full charge takes exactly `charge_time` seconds
    pub fn update(&mut self, dt: f32) {
        if self.phase == ShotPhase::Charging && dt.is_finite() && dt > 0.0 {
            self.progress = (self.progress + dt / self.charge_time).min(1.0);
        }
    }

    /// Drop back to idle without shooting
    pub fn cancel(&mut self) {
        self.phase = ShotPhase::Idle;
        self.progress = 0.0;
    }

    /// Finish the shot and return the launch velocity
    ///
    /// Releasing while idle does nothing. A zero-length (or non-finite)
    /// direction, or a release with no charge, cancels the shot. Either way
    /// the controller ends up idle with zero progress.
    pub fn release(&mut self, direction: Vec2) -> Option<Vec2> {
        if self.phase == ShotPhase::Idle {
            return None;
        }
        let progress = self.progress;
        self.cancel();

        let direction = direction.try_normalize()?;
        if progress <= 0.0 {
            return None;
        }
        Some(direction * progress * self.max_shot_speed)
    }
}

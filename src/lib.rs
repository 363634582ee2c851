//! Billiards Sim - physics core of a small billiards table
//!
//! Core modules:
//! - `sim`: Deterministic simulation (ball motion, collisions, pockets, shots)
//! - `config`: Start-up tunables with JSON overrides
//! - `presentation`: Boundary toward whatever draws the table
//! - `error`: Error type shared by every fallible operation
//!
//! The simulation never touches meshes, windows or input devices. A game loop
//! owns a [`TableSimulation`], feeds it abstract commands (charge, release,
//! advance by `dt`) and reads plain positions back.

pub mod config;
pub mod error;
pub mod presentation;
pub mod sim;

pub use config::SimConfig;
pub use error::{Result, SimError};
pub use presentation::{LogSink, PresentationSink};
pub use sim::TableSimulation;

/// Game configuration constants
pub mod consts {
    /// Presentation frame rate the demo driver runs at
    pub const TARGET_FPS: u32 = 60;

    /// Table dimensions (world units, origin at table center)
    pub const TABLE_WIDTH: f32 = 15.0;
    pub const TABLE_HEIGHT: f32 = 8.0;
    pub const POCKET_RADIUS: f32 = 0.4;

    /// Ball defaults
    pub const BALL_RADIUS: f32 = 0.3;
    pub const BALL_COUNT: usize = 7;
    pub const POCKET_COUNT: usize = 6;
    /// Index of the player's (cue) ball
    pub const CUE_BALL: usize = 0;

    /// Seconds of held input needed to reach full power
    pub const CHARGE_TIME: f32 = 1.0;
    /// Cue ball speed at full charge (units/s)
    pub const MAX_SHOT_SPEED: f32 = 10.0;

    /// Felt friction: velocity *= 1 - FRICTION * dt
    pub const FRICTION: f32 = 0.8;
    /// Below this speed a ball is snapped to rest (units/s)
    pub const REST_SPEED: f32 = 0.01;
    /// Largest dt a single step integrates; larger frames are clamped
    pub const MAX_STEP_DT: f32 = 1.0 / 30.0;
}

/// Kinetic energy of a unit-mass ball
#[inline]
pub fn kinetic_energy(vel: glam::Vec2) -> f32 {
    0.5 * vel.length_squared()
}

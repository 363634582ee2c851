//! Deterministic simulation module
//!
//! All table physics lives here. This module must stay pure and deterministic:
//! - Same inputs and dt sequence, same result
//! - Seeded RNG only (autoplay)
//! - Stable iteration order (by ball index)
//! - No rendering or platform dependencies

pub mod autoplay;
pub mod collision;
pub mod geometry;
pub mod shot;
pub mod state;
pub mod table;
pub mod tick;

pub use autoplay::{AutoPlayer, PlannedShot};
pub use collision::{ball_ball_collision, ball_wall_collision, reflect_velocity};
pub use geometry::TableGeometry;
pub use shot::{ShotController, ShotPhase};
pub use state::{Ball, Pocket, Table, TableEvent, TableSnapshot};
pub use table::TableSimulation;
pub use tick::tick;

//! Simulation configuration
//!
//! Fixed for the lifetime of a table. Defaults come from [`crate::consts`];
//! a JSON document may override any subset of fields.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::{Result, SimError};
use crate::sim::TableGeometry;

/// Tunable physical parameters of the table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    pub table_width: f32,
    pub table_height: f32,
    pub ball_radius: f32,
    /// Capture radius around each pocket center
    pub pocket_radius: f32,
    /// Seconds of charging to reach full power
    pub charge_time: f32,
    /// Velocity damping per second
    pub friction: f32,
    /// Cue ball speed at full charge
    pub max_shot_speed: f32,
    /// Speeds below this snap to zero
    pub rest_speed: f32,
    /// Upper bound on the dt integrated by a single step
    pub max_step_dt: f32,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            table_width: TABLE_WIDTH,
            table_height: TABLE_HEIGHT,
            ball_radius: BALL_RADIUS,
            pocket_radius: POCKET_RADIUS,
            charge_time: CHARGE_TIME,
            friction: FRICTION,
            max_shot_speed: MAX_SHOT_SPEED,
            rest_speed: REST_SPEED,
            max_step_dt: MAX_STEP_DT,
        }
    }
}

impl SimConfig {
    /// Geometry view of this configuration
    pub fn geometry(&self) -> TableGeometry {
        TableGeometry {
            width: self.table_width,
            height: self.table_height,
            ball_radius: self.ball_radius,
            pocket_radius: self.pocket_radius,
        }
    }

    /// Parse and validate a JSON document (missing fields keep defaults)
    pub fn from_json(json: &str) -> Result<Self> {
        let config: SimConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json(&json)?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check the invariants the simulation relies on
    pub fn validate(&self) -> Result<()> {
        let positive = [
            ("table_width", self.table_width),
            ("table_height", self.table_height),
            ("ball_radius", self.ball_radius),
            ("pocket_radius", self.pocket_radius),
            ("charge_time", self.charge_time),
            ("max_step_dt", self.max_step_dt),
        ];
        for (name, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(SimError::InvalidConfig(format!(
                    "{name} must be positive, got {value}"
                )));
            }
        }

        let non_negative = [
            ("friction", self.friction),
            ("max_shot_speed", self.max_shot_speed),
            ("rest_speed", self.rest_speed),
        ];
        for (name, value) in non_negative {
            if !(value.is_finite() && value >= 0.0) {
                return Err(SimError::InvalidConfig(format!(
                    "{name} must be non-negative, got {value}"
                )));
            }
        }

        let geometry = self.geometry();
        if let Some(index) = geometry
            .rack_positions()
            .iter()
            .position(|&pos| !geometry.contains_ball(pos))
        {
            return Err(SimError::InvalidConfig(format!(
                "ball {index} starts outside the playable area"
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(SimConfig::default().validate().is_ok());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = SimConfig::from_json(r#"{ "friction": 0.0, "max_shot_speed": 4.5 }"#)
            .expect("valid config");
        assert_eq!(config.friction, 0.0);
        assert_eq!(config.max_shot_speed, 4.5);
        assert_eq!(config.table_width, TABLE_WIDTH);
        assert_eq!(config.charge_time, CHARGE_TIME);
    }

    #[test]
    fn test_rejects_bad_values() {
        assert!(matches!(
            SimConfig::from_json(r#"{ "table_width": 0.0 }"#),
            Err(SimError::InvalidConfig(_))
        ));
        assert!(matches!(
            SimConfig::from_json(r#"{ "friction": -1.0 }"#),
            Err(SimError::InvalidConfig(_))
        ));
        // Balls this large no longer fit the rack inside the rails
        assert!(matches!(
            SimConfig::from_json(r#"{ "ball_radius": 3.5 }"#),
            Err(SimError::InvalidConfig(_))
        ));
        assert!(matches!(
            SimConfig::from_json("{ not json"),
            Err(SimError::Parse(_))
        ));
    }

    #[test]
    fn test_json_roundtrip() {
        let config = SimConfig {
            friction: 0.25,
            ..Default::default()
        };
        let json = config.to_json().expect("serializes");
        assert_eq!(SimConfig::from_json(&json).expect("parses"), config);
    }
}

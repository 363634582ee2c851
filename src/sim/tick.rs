//! Variable timestep integrator
//!
//! Advances every ball on the cloth by one frame: move, damp, rails, pairs,
//! pockets. The caller drives it once per presentation frame with the elapsed
//! time; steps longer than `max_step_dt` are clamped so fast balls cannot
//! skip through pockets or past each other.

use super::collision::{capture_pocketed, resolve_ball_collisions, resolve_walls};
use super::state::{Table, TableEvent};
use crate::config::SimConfig;

/// Advance the table by `dt` seconds and report what happened
///
/// Non-finite or non-positive `dt` leaves the table untouched.
pub fn tick(table: &mut Table, config: &SimConfig, dt: f32) -> Vec<TableEvent> {
    let mut events = Vec::new();

    if !(dt.is_finite() && dt > 0.0) {
        log::debug!("ignoring step with dt = {dt}");
        return events;
    }
    let geometry = table.geometry;
    let was_moving = !table.is_at_rest();

    // Only integration is skipped at rest; a placed ball may still sit off the
    // cloth, on another ball, or over a pocket
    if was_moving {
        let dt = dt.min(config.max_step_dt);
        let damping = (1.0 - config.friction * dt).max(0.0);
        let rest_sq = config.rest_speed * config.rest_speed;

        for ball in table.balls.iter_mut().filter(|b| b.is_active()) {
            ball.pos += ball.vel * dt;

            ball.vel *= damping;
            if ball.vel.length_squared() < rest_sq {
                ball.vel = glam::Vec2::ZERO;
            }
        }
    }

    resolve_walls(&mut table.balls, &geometry, &mut events);
    resolve_ball_collisions(&mut table.balls, &geometry, &mut events);
    capture_pocketed(&mut table.balls, &geometry, &mut events);

    if was_moving && table.is_at_rest() {
        log::debug!("table at rest, {} balls on the cloth", table.balls_remaining());
        events.push(TableEvent::CameToRest);
    }

    events
}

#[cfg(test)]
mod tests {
    use glam::Vec2;

    use super::*;
    use crate::consts::*;
    use crate::sim::TableGeometry;

    fn frictionless() -> SimConfig {
        SimConfig {
            friction: 0.0,
            ..Default::default()
        }
    }

    #[test]
    fn test_resting_table_is_untouched() {
        let mut table = Table::new(TableGeometry::default());
        let before = table.balls;

        let events = tick(&mut table, &SimConfig::default(), 1.0 / 60.0);
        assert!(events.is_empty());
        assert_eq!(table.balls, before);
    }

    #[test]
    fn test_resting_ball_off_cloth_is_clamped() {
        let config = SimConfig::default();
        let mut table = Table::new(config.geometry());
        table.balls[2].pos = Vec2::new(20.0, 0.0);

        let events = tick(&mut table, &config, 1.0 / 60.0);
        assert!(events.is_empty());
        assert_eq!(table.balls[2].pos, Vec2::new(7.2, 0.0));
        assert!(table.is_at_rest());
    }

    #[test]
    fn test_resting_overlap_is_separated() {
        let config = SimConfig::default();
        let mut table = Table::new(config.geometry());
        table.balls[2].pos = Vec2::new(0.0, 0.0);
        table.balls[3].pos = Vec2::new(0.1, 0.0);

        let events = tick(&mut table, &config, 1.0 / 60.0);
        assert_eq!(events, vec![TableEvent::BallCollision { a: 2, b: 3 }]);
        assert!((table.balls[2].pos.distance(table.balls[3].pos) - 0.6).abs() < 1e-5);
        // Nothing was approaching, so nothing starts moving
        assert!(table.is_at_rest());
    }

    #[test]
    fn test_moves_ball_by_velocity() {
        let config = frictionless();
        let mut table = Table::new(config.geometry());
        table.balls[CUE_BALL].vel = Vec2::new(0.0, 1.5);

        tick(&mut table, &config, 0.02);
        let expected = Vec2::new(-4.5, 0.03);
        assert!((table.balls[CUE_BALL].pos - expected).length() < 1e-5);
        assert_eq!(table.balls[CUE_BALL].vel, Vec2::new(0.0, 1.5));
    }

    #[test]
    fn test_friction_damps_velocity() {
        let config = SimConfig::default();
        let mut table = Table::new(config.geometry());
        table.balls[CUE_BALL].vel = Vec2::new(2.0, 0.0);

        tick(&mut table, &config, 0.01);
        let expected = 2.0 * (1.0 - FRICTION * 0.01);
        assert!((table.balls[CUE_BALL].vel.x - expected).abs() < 1e-5);
    }

    #[test]
    fn test_slow_ball_snaps_to_rest() {
        let config = SimConfig::default();
        let mut table = Table::new(config.geometry());
        table.balls[CUE_BALL].vel = Vec2::new(0.005, 0.0);

        let events = tick(&mut table, &config, 0.01);
        assert_eq!(table.balls[CUE_BALL].vel, Vec2::ZERO);
        assert_eq!(events, vec![TableEvent::CameToRest]);
    }

    #[test]
    fn test_ball_comes_to_rest_in_finite_time() {
        let config = SimConfig::default();
        let mut table = Table::new(config.geometry());
        table.balls[CUE_BALL].vel = Vec2::new(0.0, 0.5);

        let mut frames = 0;
        while !table.is_at_rest() {
            tick(&mut table, &config, 1.0 / 60.0);
            frames += 1;
            assert!(frames < 60 * 60, "ball never stopped");
        }
    }

    #[test]
    fn test_large_dt_is_clamped() {
        let config = frictionless();
        let mut table = Table::new(config.geometry());
        table.balls[CUE_BALL].vel = Vec2::new(0.0, 1.0);

        tick(&mut table, &config, 1.0);
        let travelled = table.balls[CUE_BALL].pos.y;
        assert!((travelled - MAX_STEP_DT).abs() < 1e-5);
    }

    #[test]
    fn test_invalid_dt_is_ignored() {
        let config = SimConfig::default();
        let mut table = Table::new(config.geometry());
        table.balls[CUE_BALL].vel = Vec2::new(1.0, 0.0);
        let before = table.balls;

        for dt in [0.0, -0.1, f32::NAN, f32::INFINITY] {
            assert!(tick(&mut table, &config, dt).is_empty());
        }
        assert_eq!(table.balls, before);
    }

    #[test]
    fn test_pocketed_ball_is_frozen() {
        let config = frictionless();
        let mut table = Table::new(config.geometry());
        table.balls[3].capture(1);
        let frozen = table.balls[3].pos;
        table.balls[CUE_BALL].vel = Vec2::new(1.0, 0.0);

        for _ in 0..30 {
            tick(&mut table, &config, 1.0 / 60.0);
        }
        assert_eq!(table.balls[3].pos, frozen);
        assert_eq!(table.balls[3].pocketed, Some(1));
    }

    #[test]
    fn test_corner_pocket_is_reachable() {
        let config = frictionless();
        let mut table = Table::new(config.geometry());
        // Resting against both rails next to the top-right corner, rolling in
        table.balls[CUE_BALL].pos = Vec2::new(7.2, 3.7);
        table.balls[CUE_BALL].vel = Vec2::new(3.0, 3.0);

        let events = tick(&mut table, &config, 1.0 / 60.0);
        assert!(events.contains(&TableEvent::BallPocketed { ball: 0, pocket: 5 }));
        assert!(table.balls[CUE_BALL].is_pocketed());
    }

    #[test]
    fn test_determinism() {
        // Two tables fed the same shot produce identical results
        let config = SimConfig::default();
        let mut table1 = Table::new(config.geometry());
        let mut table2 = Table::new(config.geometry());
        table1.balls[CUE_BALL].vel = Vec2::new(9.0, 0.4);
        table2.balls[CUE_BALL].vel = Vec2::new(9.0, 0.4);

        for frame in 0..600 {
            let dt = if frame % 3 == 0 { 1.0 / 30.0 } else { 1.0 / 90.0 };
            let e1 = tick(&mut table1, &config, dt);
            let e2 = tick(&mut table2, &config, dt);
            assert_eq!(e1, e2);
        }
        assert_eq!(table1.balls, table2.balls);
    }
}

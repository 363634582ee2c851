//! Collision detection and response
//!
//! Three passes run once per step, in this order: rails, ball pairs, pockets.
//! None of them iterate to a fixed point; a single sweep over at most seven
//! balls is enough at frame-rate step sizes.
//!
//! A ball whose center is already inside a pocket's capture circle is "over
//! the mouth": the rail and pair passes leave it alone so the pocket pass can
//! take it. Without this the rail clamp would hold centers 0.3 from both rails
//! and corner pockets could never be reached.

use glam::Vec2;

use super::geometry::TableGeometry;
use super::state::{Ball, TableEvent};

/// Centers closer than this are treated as coincident
const COINCIDENT_EPSILON: f32 = 1e-6;

/// Mirror a velocity about a rail with unit inward `normal`
#[inline]
pub fn reflect_velocity(velocity: Vec2, normal: Vec2) -> Vec2 {
    velocity - 2.0 * velocity.dot(normal) * normal
}

/// Whether a ball takes part in rail and pair resolution this step
#[inline]
fn collides(ball: &Ball, geo: &TableGeometry) -> bool {
    ball.is_active() && geo.pocket_at(ball.pos).is_none()
}

/// Keep a single ball inside the rails
///
/// Each axis is handled on its own, so corners need no special case. The
/// wall-normal velocity component is turned to point back onto the cloth and
/// the center is clamped to the rail minus the radius. Returns true if the
/// velocity was reflected.
pub fn ball_wall_collision(ball: &mut Ball, geo: &TableGeometry) -> bool {
    let limit = geo.playable_half_extents();
    let mut reflected = false;

    for axis in [Vec2::X, Vec2::Y] {
        let along = ball.pos.dot(axis);
        if along.abs() <= limit.dot(axis) {
            continue;
        }
        // Rail normal points back toward the table center
        let normal = -along.signum() * axis;
        if ball.vel.dot(normal) < 0.0 {
            ball.vel = reflect_velocity(ball.vel, normal);
            reflected = true;
        }
    }
    ball.pos = geo.clamp_ball(ball.pos);

    reflected
}

/// Resolve overlap between two balls of equal mass
///
/// Pushes both centers apart along the line of centers until they are exactly
/// `2 * radius` apart, then, if they are approaching, swaps their velocity
/// components along that line (perfectly elastic, frictionless). Returns true
/// if the balls overlapped.
pub fn ball_ball_collision(a: &mut Ball, b: &mut Ball, radius: f32) -> bool {
    let contact = 2.0 * radius;
    let delta = b.pos - a.pos;
    let dist_sq = delta.length_squared();
    if dist_sq >= contact * contact {
        return false;
    }

    let dist = dist_sq.sqrt();
    // Stacked centers have no line between them; split along +x so the result stays deterministic
    let normal = if dist > COINCIDENT_EPSILON {
        delta / dist
    } else {
        Vec2::X
    };

    let correction = normal * ((contact - dist) * 0.5);
    a.pos -= correction;
    b.pos += correction;

    let va = a.vel.dot(normal);
    let vb = b.vel.dot(normal);
    if vb - va < 0.0 {
        a.vel += (vb - va) * normal;
        b.vel += (va - vb) * normal;
    }

    true
}

/// Rail pass over every ball on the cloth
pub fn resolve_walls(balls: &mut [Ball], geo: &TableGeometry, events: &mut Vec<TableEvent>) {
    for ball in balls.iter_mut() {
        if !collides(ball, geo) {
            continue;
        }
        if ball_wall_collision(ball, geo) {
            log::trace!("ball {} hit a rail at {:?}", ball.id, ball.pos);
            events.push(TableEvent::CushionHit { ball: ball.id });
        }
    }
}

/// Put `free` exactly `contact` away from `fixed`, staying on the cloth
///
/// Moves along the line of centers first. If that runs into a rail, the ball
/// keeps the rail coordinate and slides along it instead.
fn place_clear(free: Vec2, fixed: Vec2, contact: f32, geo: &TableGeometry) -> Vec2 {
    let dir = (free - fixed).try_normalize().unwrap_or(Vec2::X);
    let pos = geo.clamp_ball(fixed + dir * contact);
    if pos.distance_squared(fixed) >= contact * contact {
        return pos;
    }

    let limit = geo.playable_half_extents();
    let mut slid = pos;
    if pos.x.abs() >= limit.x {
        let dx = pos.x - fixed.x;
        let reach = (contact * contact - dx * dx).max(0.0).sqrt();
        slid.y = fixed.y + reach.copysign(dir.y);
    } else {
        let dy = pos.y - fixed.y;
        let reach = (contact * contact - dy * dy).max(0.0).sqrt();
        slid.x = fixed.x + reach.copysign(dir.x);
    }
    geo.clamp_ball(slid)
}

/// Clamp a corrected pair back onto the cloth without losing separation
///
/// A ball pushed past a rail stays on the rail and its partner takes the
/// whole remaining correction. Two balls jammed into the same corner can
/// still end up touching closer than `2 * radius`.
fn settle_on_cloth(a: &mut Ball, b: &mut Ball, geo: &TableGeometry) {
    let a_pinned = !geo.contains_ball(a.pos);
    let b_pinned = !geo.contains_ball(b.pos);
    if !a_pinned && !b_pinned {
        return;
    }

    let contact = 2.0 * geo.ball_radius;
    a.pos = geo.clamp_ball(a.pos);
    b.pos = geo.clamp_ball(b.pos);
    if a_pinned {
        b.pos = place_clear(b.pos, a.pos, contact, geo);
    } else {
        a.pos = place_clear(a.pos, b.pos, contact, geo);
    }
}

/// Pair pass over all unordered pairs, ascending (i, j)
pub fn resolve_ball_collisions(
    balls: &mut [Ball],
    geo: &TableGeometry,
    events: &mut Vec<TableEvent>,
) {
    for i in 0..balls.len() {
        for j in (i + 1)..balls.len() {
            let (head, tail) = balls.split_at_mut(j);
            let a = &mut head[i];
            let b = &mut tail[0];
            if !collides(a, geo) || !collides(b, geo) {
                continue;
            }
            if ball_ball_collision(a, b, geo.ball_radius) {
                log::trace!("balls {} and {} collided", a.id, b.id);
                settle_on_cloth(a, b, geo);
                events.push(TableEvent::BallCollision { a: a.id, b: b.id });
            }
        }
    }
}

/// Capture every ball whose center lies within a pocket's radius
///
/// First pocket by index wins. Capture is one-way.
pub fn capture_pocketed(balls: &mut [Ball], geo: &TableGeometry, events: &mut Vec<TableEvent>) {
    for ball in balls.iter_mut().filter(|b| b.is_active()) {
        if let Some(pocket) = geo.pocket_at(ball.pos) {
            ball.capture(pocket);
            log::debug!("ball {} pocketed in pocket {}", ball.id, pocket);
            events.push(TableEvent::BallPocketed {
                ball: ball.id,
                pocket,
            });
        }
    }
}

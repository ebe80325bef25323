//! Slide move algorithm for collision response.
//!
//! This implements the classic Quake slide move that lets the player glide
//! along walls and floors, plus the stair step that runs it twice (once flat,
//! once lifted by a step) and keeps whichever got further.

use glam::DVec3;

use crate::collision::{CollisionWorld, ContentFlags};

use super::config::MovementConfig;
use super::state::MovementState;

/// Velocity components smaller than this are snapped to zero after clipping.
pub const STOP_EPSILON: f64 = 0.1;

/// How a slide move ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlideOutcome {
    /// Moved the full distance without touching anything.
    Completed,
    /// Touched at least one plane and kept sliding.
    Clipped,
    /// Velocity was zeroed on purpose.
    Stopped(StopReason),
    /// The box was inside solid geometry; velocity was zeroed.
    Trapped,
}

/// Why a slide move zeroed the velocity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// The clipped velocity pointed against the velocity the move started with.
    Reversed,
    /// No single plane or two-plane crease could be slid along.
    Wedged,
    /// More planes were touched than the solver tracks.
    PlaneOverflow,
    /// No trace made any progress.
    NoProgress,
}

/// Clip velocity against a surface normal.
///
/// Removes `overbounce` times the into-surface component, snaps components
/// within [`STOP_EPSILON`] of zero to zero, then pushes any residual
/// penetration back out along the normal. The last step matters for planes
/// nearly parallel to the velocity, where snapping can otherwise leave the
/// result pointing slightly into the surface.
pub fn clip_velocity(velocity: DVec3, normal: DVec3, overbounce: f64) -> DVec3 {
    let backoff = velocity.dot(normal) * overbounce;
    let snap = |c: f64| if c.abs() < STOP_EPSILON { 0.0 } else { c };

    let clipped = velocity - normal * backoff;
    let mut out = DVec3::new(snap(clipped.x), snap(clipped.y), snap(clipped.z));

    let adjust = out.dot(normal);
    if adjust < 0.0 {
        out -= normal * adjust;
    }

    out
}

/// Perform a slide move through the collision world.
///
/// Traces the remaining displacement up to `config.max_bumps` times. Every
/// blocked trace adds its plane to the touched set and re-derives the velocity
/// from it:
///
/// - **Airborne**: clip against the last touched floor-like plane, or the
///   last touched plane when none is floor-like.
/// - **Grounded**: take the first single-plane clip that doesn't push into
///   any other touched plane, fall back to the crease of exactly two planes,
///   and stop otherwise. A result that opposes the starting velocity stops
///   the move.
///
/// Any trace that makes progress commits the position and resets the touched
/// set.
pub fn slide_move(
    world: &CollisionWorld,
    state: &mut MovementState,
    delta_time: f64,
    config: &MovementConfig,
) -> SlideOutcome {
    if state.velocity == DVec3::ZERO {
        return SlideOutcome::Completed;
    }

    let primal_velocity = state.velocity;
    let mut original_velocity = state.velocity;
    let mut planes: Vec<DVec3> = Vec::with_capacity(config.max_clip_planes);
    let mut time_left = delta_time;
    let mut all_fraction = 0.0;
    let mut outcome = SlideOutcome::Completed;

    for bump in 0..config.max_bumps {
        if state.velocity == DVec3::ZERO {
            break;
        }

        let end = state.position + state.velocity * time_left;
        let trace = world.trace(
            state.position,
            end,
            config.mins,
            config.maxs,
            ContentFlags::MASK_PLAYER_SOLID,
        );
        state.last_trace = Some(trace);
        all_fraction += trace.fraction;

        if trace.all_solid {
            state.velocity = DVec3::ZERO;
            return SlideOutcome::Trapped;
        }

        if trace.fraction > 0.0 {
            state.position = trace.end_position;
            original_velocity = state.velocity;
            planes.clear();
        }

        if trace.fraction == 1.0 {
            break;
        }

        // Started inside something with nothing to slide along
        let Some(plane) = trace.plane else {
            state.velocity = DVec3::ZERO;
            return SlideOutcome::Trapped;
        };

        log::trace!(
            "bump {}: fraction {:.4} against {:?}",
            bump,
            trace.fraction,
            plane.normal
        );

        time_left -= time_left * trace.fraction;

        if planes.len() >= config.max_clip_planes {
            log::warn!("slide move touched more than {} planes", config.max_clip_planes);
            state.velocity = DVec3::ZERO;
            outcome = SlideOutcome::Stopped(StopReason::PlaneOverflow);
            break;
        }
        planes.push(plane.normal);
        outcome = SlideOutcome::Clipped;

        if !state.on_ground {
            let normal = planes
                .iter()
                .rev()
                .find(|n| n.y > config.min_walk_normal)
                .unwrap_or(&plane.normal);
            state.velocity = clip_velocity(original_velocity, *normal, 1.0);
            continue;
        }

        let single = planes.iter().enumerate().find_map(|(i, normal)| {
            let clipped = clip_velocity(original_velocity, *normal, 1.0);
            let clear_of_others = planes
                .iter()
                .enumerate()
                .all(|(j, other)| j == i || clipped.dot(*other) >= 0.0);
            clear_of_others.then_some(clipped)
        });

        match single {
            Some(velocity) => state.velocity = velocity,
            None if planes.len() == 2 => {
                let crease = planes[0].cross(planes[1]).normalize_or_zero();
                state.velocity = crease * crease.dot(state.velocity);
            }
            None => {
                log::debug!("slide move wedged between {} planes", planes.len());
                state.velocity = DVec3::ZERO;
                outcome = SlideOutcome::Stopped(StopReason::Wedged);
                break;
            }
        }

        if state.velocity.dot(primal_velocity) <= 0.0 {
            state.velocity = DVec3::ZERO;
            outcome = SlideOutcome::Stopped(StopReason::Reversed);
            break;
        }
    }

    if all_fraction == 0.0 {
        state.velocity = DVec3::ZERO;
        if !matches!(outcome, SlideOutcome::Stopped(_)) {
            outcome = SlideOutcome::Stopped(StopReason::NoProgress);
        }
    }

    outcome
}

#[inline]
fn horizontal_distance_squared(from: DVec3, to: DVec3) -> f64 {
    let delta = to - from;
    delta.x * delta.x + delta.z * delta.z
}

/// Perform a slide move that can climb steps.
///
/// Runs [`slide_move`] from the current position ("down"), then again from a
/// position lifted by `config.step_size` and dropped back down afterwards
/// ("up"). The up result is only considered when the drop lands on walkable
/// ground. The path that covered more horizontal distance wins; when the
/// down path wins it still takes the up path's vertical velocity.
pub fn step_slide_move(
    world: &CollisionWorld,
    state: &mut MovementState,
    delta_time: f64,
    config: &MovementConfig,
) -> SlideOutcome {
    let original = *state;

    let down_outcome = slide_move(world, state, delta_time, config);
    let down = *state;

    *state = original;

    let lift = DVec3::new(0.0, config.step_size, 0.0);
    let trace = world.trace(
        state.position,
        state.position + lift,
        config.mins,
        config.maxs,
        ContentFlags::MASK_PLAYER_SOLID,
    );
    if !trace.start_solid && !trace.all_solid {
        state.position = trace.end_position;
    }

    let up_outcome = slide_move(world, state, delta_time, config);

    let trace = world.trace(
        state.position,
        state.position - lift,
        config.mins,
        config.maxs,
        ContentFlags::MASK_PLAYER_SOLID,
    );

    let lands_on_ground = trace
        .plane
        .is_some_and(|p| p.normal.y >= config.min_walk_normal);
    if !lands_on_ground {
        *state = down;
        return down_outcome;
    }

    if !trace.start_solid {
        state.position = trace.end_position;
    }
    state.last_trace = Some(trace);

    let down_distance = horizontal_distance_squared(original.position, down.position);
    let up_distance = horizontal_distance_squared(original.position, state.position);

    if down_distance > up_distance {
        let stepped_vertical = state.velocity.y;
        *state = down;
        state.velocity.y = stepped_vertical;
        down_outcome
    } else {
        log::trace!(
            "stepped from y={:.3} to y={:.3}",
            original.position.y,
            state.position.y
        );
        up_outcome
    }
}

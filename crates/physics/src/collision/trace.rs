//! Trace results and world sweeps.

use glam::DVec3;
use serde::{Deserialize, Serialize};

use super::clip::clip_box_to_planes;
use super::flags::ContentFlags;
use super::plane::Plane;
use super::world::ConvexSolid;

/// Result of sweeping a box through the world.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Trace {
    /// How far along the sweep the box got before being blocked.
    ///
    /// - `1.0` = traveled the full distance (no collision)
    /// - `0.0` = blocked immediately, or started inside a solid
    pub fraction: f64,

    /// Final position of the box origin.
    ///
    /// Exactly the requested end when `fraction == 1.0`, otherwise the point
    /// at `fraction` along the sweep.
    pub end_position: DVec3,

    /// Copy of the plane that blocked the sweep. `None` when nothing did.
    pub plane: Option<Plane>,

    /// The sweep started inside a solid.
    pub start_solid: bool,

    /// The whole sweep stayed inside a solid. Implies `start_solid` after
    /// [`player_trace`].
    pub all_solid: bool,
}

impl Default for Trace {
    fn default() -> Self {
        Self::no_hit(DVec3::ZERO)
    }
}

impl Trace {
    /// Create a trace that reached `end_position` unobstructed.
    pub fn no_hit(end_position: DVec3) -> Self {
        Self {
            fraction: 1.0,
            end_position,
            plane: None,
            start_solid: false,
            all_solid: false,
        }
    }

    /// Check if this trace was blocked.
    #[inline]
    pub fn hit_something(&self) -> bool {
        self.fraction < 1.0
    }

    /// Normal of the blocking plane, if any.
    #[inline]
    pub fn hit_normal(&self) -> Option<DVec3> {
        self.plane.map(|p| p.normal)
    }

    fn with_end_position(mut self, start: DVec3, end: DVec3) -> Self {
        self.end_position = if self.fraction == 1.0 {
            end
        } else {
            start + (end - start) * self.fraction
        };
        self
    }
}

/// Sweep the box `mins..maxs` from `start` to `end` through `solids`.
///
/// Solids whose contents do not intersect `mask` are skipped. The running
/// trace is threaded through [`clip_box_to_planes`] solid by solid, and the
/// sweep stops early once the fraction reaches zero.
pub fn box_trace<'a, I>(
    solids: I,
    start: DVec3,
    end: DVec3,
    mins: DVec3,
    maxs: DVec3,
    mask: ContentFlags,
) -> Trace
where
    I: IntoIterator<Item = &'a ConvexSolid>,
{
    let mut trace = Trace::no_hit(end);

    for solid in solids {
        if !solid.contents.intersects(mask) {
            continue;
        }
        trace = clip_box_to_planes(mins, maxs, start, end, &solid.planes, trace);
        if trace.fraction == 0.0 {
            break;
        }
    }

    trace.with_end_position(start, end)
}

/// [`box_trace`] with the solid flags normalised for movement code.
///
/// `all_solid` implies `start_solid`, and `start_solid` forces the fraction
/// to zero with the end position pulled back to `start`, so callers can treat
/// `start_solid` alone as "stuck".
pub fn player_trace<'a, I>(
    solids: I,
    start: DVec3,
    end: DVec3,
    mins: DVec3,
    maxs: DVec3,
    mask: ContentFlags,
) -> Trace
where
    I: IntoIterator<Item = &'a ConvexSolid>,
{
    let mut trace = box_trace(solids, start, end, mins, maxs, mask);

    if trace.all_solid {
        trace.start_solid = true;
    }
    if trace.start_solid {
        trace.fraction = 0.0;
        trace.end_position = start;
    }

    trace
}

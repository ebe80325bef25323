//! Swept-box clipping against a single convex plane set.

use glam::DVec3;

use super::plane::Plane;
use super::trace::Trace;

/// Distance the box is kept away from any surface it hits.
pub const DIST_EPSILON: f64 = 0.03125;

/// Minimum approach toward a plane that counts as touching it.
///
/// A sweep that starts outside a plane and gets closer by less than this is
/// treated as never reaching it. Without the cutoff such a graze is reported
/// as a hit whose normal is perpendicular to the velocity, so clipping leaves
/// the velocity unchanged and the slide solver stalls on it.
pub const COLLIDE_EPSILON: f64 = DIST_EPSILON / 1024.0;

/// Corner of the box that touches a plane first: the one furthest along
/// `-normal`.
#[inline]
fn support_offset(normal: DVec3, mins: DVec3, maxs: DVec3) -> DVec3 {
    DVec3::new(
        if normal.x < 0.0 { maxs.x } else { mins.x },
        if normal.y < 0.0 { maxs.y } else { mins.y },
        if normal.z < 0.0 { maxs.z } else { mins.z },
    )
}

/// Clip the box `mins..maxs` swept from `start` to `end` against one convex
/// solid.
///
/// `prior` is the trace accumulated from earlier solids. The result only ever
/// tightens it: the fraction never grows, and the blocking plane is replaced
/// only when this solid is hit strictly earlier. Starting inside the solid
/// sets `start_solid` (and `all_solid` when the sweep never leaves it) without
/// touching the fraction; [`player_trace`](super::player_trace) turns that
/// into a zero fraction.
///
/// `end_position` is carried through from `prior` untouched.
pub fn clip_box_to_planes(
    mins: DVec3,
    maxs: DVec3,
    start: DVec3,
    end: DVec3,
    planes: &[Plane],
    prior: Trace,
) -> Trace {
    let mut trace = prior;
    let mut enter_frac = -1.0;
    let mut leave_frac = 1.0;
    let mut clip_plane = None;
    let mut get_out = false;
    let mut start_out = false;

    for plane in planes {
        let ofs = support_offset(plane.normal, mins, maxs);
        let dist = plane.dist - ofs.dot(plane.normal);

        let d1 = start.dot(plane.normal) - dist;
        let d2 = end.dot(plane.normal) - dist;

        if d2 > 0.0 {
            get_out = true;
        }
        if d1 > 0.0 {
            start_out = true;
        }

        // Outside this plane and never meaningfully approaching it
        if d1 > 0.0 && d2 >= d1 - COLLIDE_EPSILON {
            return trace;
        }

        if d1 <= 0.0 && d2 <= 0.0 {
            continue;
        }

        if d1 > d2 {
            // Entering
            let f = (d1 - DIST_EPSILON) / (d1 - d2);
            if f > enter_frac {
                enter_frac = f;
                clip_plane = Some(*plane);
            }
        } else {
            // Leaving
            let f = (d1 + DIST_EPSILON) / (d1 - d2);
            if f < leave_frac {
                leave_frac = f;
            }
        }
    }

    if !start_out {
        trace.start_solid = true;
        if !get_out {
            trace.all_solid = true;
        }
        return trace;
    }

    if enter_frac < leave_frac && enter_frac > -1.0 && enter_frac < trace.fraction {
        trace.fraction = enter_frac.max(0.0);
        trace.plane = clip_plane;
    }

    trace
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINS: DVec3 = DVec3::new(-16.0, -16.0, -32.0);
    const MAXS: DVec3 = DVec3::new(16.0, 16.0, 32.0);

    fn clip(start: DVec3, end: DVec3, planes: &[Plane]) -> Trace {
        clip_box_to_planes(MINS, MAXS, start, end, planes, Trace::no_hit(end))
    }

    #[test]
    fn test_drop_onto_plane() {
        let floor = Plane::new(DVec3::Z, 0.0);
        let trace = clip(DVec3::new(0.0, 0.0, 128.0), DVec3::ZERO, &[floor]);

        // Box bottom is 32 below the origin, so contact happens after 96 of 128
        let expected = (96.0 - DIST_EPSILON) / 128.0;
        assert!((trace.fraction - expected).abs() < 1e-12);
        assert!((trace.fraction - 0.75).abs() < 1e-3);
        assert_eq!(trace.plane, Some(floor));
        assert!(!trace.start_solid);
        assert!(!trace.all_solid);
    }

    #[test]
    fn test_stationary_outside() {
        let floor = Plane::new(DVec3::Z, 0.0);
        let point = DVec3::new(0.0, 0.0, 128.0);
        let trace = clip(point, point, &[floor]);

        assert_eq!(trace.fraction, 1.0);
        assert!(trace.plane.is_none());
        assert!(!trace.start_solid);
    }

    #[test]
    fn test_stationary_inside_is_all_solid() {
        let floor = Plane::new(DVec3::Z, 0.0);
        let trace = clip(DVec3::ZERO, DVec3::ZERO, &[floor]);

        assert!(trace.start_solid);
        assert!(trace.all_solid);
        assert_eq!(trace.fraction, 1.0);
        assert!(trace.plane.is_none());
    }

    #[test]
    fn test_start_inside_moving_out() {
        let floor = Plane::new(DVec3::Z, 0.0);
        let trace = clip(DVec3::ZERO, DVec3::new(0.0, 0.0, 128.0), &[floor]);

        assert!(trace.start_solid);
        assert!(!trace.all_solid);
        assert_eq!(trace.fraction, 1.0);
    }

    #[test]
    fn test_start_on_surface_counts_as_inside() {
        // Box bottom exactly touching the plane
        let floor = Plane::new(DVec3::Z, 0.0);
        let start = DVec3::new(0.0, 0.0, 32.0);
        let trace = clip(start, start, &[floor]);

        assert!(trace.start_solid);
        assert!(trace.all_solid);
        assert_eq!(trace.fraction, 1.0);
    }

    #[test]
    fn test_angled_plane() {
        let k = 0.577_350_269_189_625_8;
        let slope = Plane::new(DVec3::new(k, k, k), 0.0);
        let trace = clip(DVec3::new(0.0, 0.0, 128.0), DVec3::ZERO, &[slope]);

        assert!((trace.fraction - 0.5).abs() < 1e-3);
        assert_eq!(trace.plane.map(|p| p.normal), Some(slope.normal));
    }

    #[test]
    fn test_miss_beside_box_brush() {
        // A 64-unit cube off to the side; sweeping down past it must not hit
        let brush = crate::collision::box_planes(
            DVec3::new(100.0, -32.0, -32.0),
            DVec3::new(164.0, 32.0, 32.0),
        );
        let trace = clip(DVec3::new(0.0, 0.0, 128.0), DVec3::new(0.0, 0.0, -128.0), &brush);

        assert_eq!(trace.fraction, 1.0);
        assert!(!trace.start_solid);
    }

    #[test]
    fn test_hit_box_brush_top() {
        let brush = crate::collision::box_planes(
            DVec3::new(-64.0, -64.0, -64.0),
            DVec3::new(64.0, 64.0, 0.0),
        );
        let trace = clip(DVec3::new(0.0, 0.0, 128.0), DVec3::new(0.0, 0.0, 0.0), &brush);

        assert!((trace.fraction - (96.0 - DIST_EPSILON) / 128.0).abs() < 1e-12);
        assert_eq!(trace.plane.map(|p| p.normal), Some(DVec3::Z));
    }

    #[test]
    fn test_graze_within_collide_epsilon_is_ignored() {
        let floor = Plane::new(DVec3::Z, 0.0);
        // Box bottom 1 unit above the plane, drifting down by far less than
        // COLLIDE_EPSILON while moving sideways
        let start = DVec3::new(0.0, 0.0, 33.0);
        let end = DVec3::new(64.0, 0.0, 33.0 - COLLIDE_EPSILON * 0.5);
        let trace = clip(start, end, &[floor]);

        assert_eq!(trace.fraction, 1.0);
        assert!(trace.plane.is_none());
    }

    #[test]
    fn test_prior_fraction_only_tightens() {
        let floor = Plane::new(DVec3::Z, 0.0);
        let start = DVec3::new(0.0, 0.0, 128.0);
        let end = DVec3::ZERO;

        let mut earlier = Trace::no_hit(end);
        earlier.fraction = 0.25;
        earlier.plane = Some(Plane::new(DVec3::X, 5.0));

        let trace = clip_box_to_planes(MINS, MAXS, start, end, &[floor], earlier);
        assert_eq!(trace.fraction, 0.25);
        assert_eq!(trace.plane, earlier.plane);
    }
}

//! Collision detection against convex plane sets.
//!
//! Every solid is stored as the planes that bound it. A swept axis-aligned box
//! is clipped against each solid in turn and the tightest hit wins.
//!
//! # Key Types
//!
//! - [`Plane`]: Half-space boundary `dot(p, normal) <= dist`
//! - [`SolidGeometry`]: Raw geometry that gets reduced to planes
//! - [`Trace`]: Output from a swept-box query
//! - [`CollisionWorld`]: All solids the player can collide with
//!
//! # Tracing Algorithm
//!
//! For each plane the box is expanded by its support corner, so the sweep
//! becomes a segment against a shifted plane. Entering crossings push the
//! entry fraction up, leaving crossings pull the exit fraction down, and the
//! segment is blocked when it enters before it leaves. Both fractions carry
//! a [`DIST_EPSILON`] bias so the box stops a hair outside the surface.

mod clip;
mod flags;
mod geometry;
mod plane;
mod trace;
mod world;

pub use clip::{clip_box_to_planes, COLLIDE_EPSILON, DIST_EPSILON};
pub use flags::ContentFlags;
pub use geometry::{box_planes, planes_from_mesh, GeometryError, SolidGeometry};
pub use plane::{Plane, PLANE_EPSILON};
pub use trace::{box_trace, player_trace, Trace};
pub use world::{CollisionWorld, ConvexSolid};

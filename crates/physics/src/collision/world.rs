//! Collision world containing all static solids.
//!
//! Geometry is reduced to planes once when it is added. After that the world
//! is only read, so traces can share it freely.

use glam::DVec3;

use super::flags::ContentFlags;
use super::geometry::{box_planes, GeometryError, SolidGeometry};
use super::plane::Plane;
use super::trace::{box_trace, player_trace, Trace};

/// A convex solid in the world.
#[derive(Debug, Clone)]
pub struct ConvexSolid {
    /// Unique identifier for this solid.
    pub id: u32,
    /// Bounding planes; the solid is their intersection.
    pub planes: Vec<Plane>,
    /// Content flags used for trace filtering.
    pub contents: ContentFlags,
}

impl ConvexSolid {
    /// Check if a point lies inside the solid.
    pub fn contains_point(&self, point: DVec3) -> bool {
        self.planes.iter().all(|p| p.contains(point))
    }
}

/// The collision world containing all solids.
///
/// # Thread Safety
///
/// The world is only mutated while it is being built. Traces take `&self`,
/// so a finished world can be shared across threads.
#[derive(Debug, Default)]
pub struct CollisionWorld {
    solids: Vec<ConvexSolid>,
    next_id: u32,
}

impl CollisionWorld {
    /// Create an empty collision world.
    pub fn new() -> Self {
        Self {
            solids: Vec::new(),
            next_id: 0,
        }
    }

    /// Add a convex solid, deriving its planes.
    ///
    /// # Errors
    ///
    /// Fails if the geometry cannot be reduced to planes or reduces to none.
    pub fn add_solid(
        &mut self,
        geometry: SolidGeometry,
        contents: ContentFlags,
    ) -> Result<u32, GeometryError> {
        let planes = geometry.into_planes()?;
        if planes.is_empty() {
            return Err(GeometryError::Empty);
        }
        Ok(self.push(planes, contents))
    }

    /// Add a solid from a pre-built plane set.
    pub fn add_planes(
        &mut self,
        planes: Vec<Plane>,
        contents: ContentFlags,
    ) -> Result<u32, GeometryError> {
        self.add_solid(SolidGeometry::Planes(planes), contents)
    }

    /// Add a solid from world-space mesh positions and co-indexed normals.
    pub fn add_mesh(
        &mut self,
        positions: Vec<DVec3>,
        normals: Vec<DVec3>,
        contents: ContentFlags,
    ) -> Result<u32, GeometryError> {
        self.add_solid(SolidGeometry::mesh(positions, normals), contents)
    }

    /// Add an axis-aligned box to the world.
    ///
    /// # Arguments
    ///
    /// * `center` - Center position of the box in world space
    /// * `half_extents` - Half-size in each axis (x, y, z)
    /// * `contents` - Content flags for collision filtering
    pub fn add_box(&mut self, center: DVec3, half_extents: DVec3, contents: ContentFlags) -> u32 {
        let half_extents = half_extents.abs();
        self.push(
            box_planes(center - half_extents, center + half_extents),
            contents,
        )
    }

    fn push(&mut self, planes: Vec<Plane>, contents: ContentFlags) -> u32 {
        let id = self.next_id;
        self.next_id += 1;

        log::trace!("solid {} added with {} planes", id, planes.len());
        self.solids.push(ConvexSolid {
            id,
            planes,
            contents,
        });

        id
    }

    /// Remove all solids.
    pub fn clear(&mut self) {
        self.solids.clear();
    }

    /// Get the number of solids in the world.
    pub fn solid_count(&self) -> usize {
        self.solids.len()
    }

    /// All solids, in insertion order.
    pub fn solids(&self) -> &[ConvexSolid] {
        &self.solids
    }

    /// Sweep a box through the world, reporting the raw solid flags.
    pub fn box_trace(
        &self,
        start: DVec3,
        end: DVec3,
        mins: DVec3,
        maxs: DVec3,
        mask: ContentFlags,
    ) -> Trace {
        box_trace(&self.solids, start, end, mins, maxs, mask)
    }

    /// Sweep a player box through the world.
    ///
    /// See [`player_trace`] for how the solid flags are normalised.
    pub fn trace(
        &self,
        start: DVec3,
        end: DVec3,
        mins: DVec3,
        maxs: DVec3,
        mask: ContentFlags,
    ) -> Trace {
        player_trace(&self.solids, start, end, mins, maxs, mask)
    }

    /// Check that a box placed at `position` does not overlap any solid.
    pub fn position_is_clear(
        &self,
        position: DVec3,
        mins: DVec3,
        maxs: DVec3,
        mask: ContentFlags,
    ) -> bool {
        !self.trace(position, position, mins, maxs, mask).start_solid
    }
}

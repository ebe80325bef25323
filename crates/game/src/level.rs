//! Level construction and spawn points.

use brushwalk_physics::{CollisionWorld, ContentFlags, GeometryError, SolidGeometry};
use glam::{DAffine3, DVec3};
use serde::{Deserialize, Serialize};

/// A game level containing collision geometry and spawn points.
#[derive(Debug)]
pub struct Level {
    /// Level identifier.
    pub id: String,

    /// Display name.
    pub name: String,

    /// Collision world for physics.
    pub collision: CollisionWorld,

    /// Player spawn points.
    pub spawn_points: Vec<SpawnPoint>,
}

/// A spawn point for players.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpawnPoint {
    /// Position in world space.
    pub position: DVec3,

    /// Initial facing direction (yaw in radians).
    pub facing: f64,
}

/// Mesh data for a wedge rising along +X.
///
/// The sloped face climbs from `x0` at floor level to `x1` at `height`. Every
/// face lists its own corners with the face normal, the way an exported mesh
/// would.
fn wedge_mesh(x0: f64, x1: f64, height: f64, z0: f64, z1: f64) -> (Vec<DVec3>, Vec<DVec3>) {
    let slope = DVec3::new(-height, x1 - x0, 0.0).normalize();

    let faces: [(DVec3, Vec<DVec3>); 5] = [
        (
            slope,
            vec![
                DVec3::new(x0, 0.0, z0),
                DVec3::new(x0, 0.0, z1),
                DVec3::new(x1, height, z1),
                DVec3::new(x1, height, z0),
            ],
        ),
        (
            DVec3::NEG_Y,
            vec![
                DVec3::new(x0, 0.0, z0),
                DVec3::new(x1, 0.0, z0),
                DVec3::new(x1, 0.0, z1),
                DVec3::new(x0, 0.0, z1),
            ],
        ),
        (
            DVec3::X,
            vec![
                DVec3::new(x1, 0.0, z0),
                DVec3::new(x1, height, z0),
                DVec3::new(x1, height, z1),
                DVec3::new(x1, 0.0, z1),
            ],
        ),
        (
            DVec3::NEG_Z,
            vec![
                DVec3::new(x0, 0.0, z0),
                DVec3::new(x1, 0.0, z0),
                DVec3::new(x1, height, z0),
            ],
        ),
        (
            DVec3::Z,
            vec![
                DVec3::new(x0, 0.0, z1),
                DVec3::new(x1, 0.0, z1),
                DVec3::new(x1, height, z1),
            ],
        ),
    ];

    let mut positions = Vec::new();
    let mut normals = Vec::new();
    for (normal, corners) in faces {
        normals.extend(std::iter::repeat(normal).take(corners.len()));
        positions.extend(corners);
    }
    (positions, normals)
}

impl Level {
    /// Half-size of the arena floor.
    pub const ARENA_SIZE: f64 = 1024.0;

    /// Height of the arena walls.
    pub const WALL_HEIGHT: f64 = 256.0;

    /// Rise of each stair step.
    pub const STEP_HEIGHT: f64 = 16.0;

    /// Number of stair steps.
    pub const STEP_COUNT: usize = 4;

    /// Create an empty level.
    pub fn new(id: &str, name: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            collision: CollisionWorld::new(),
            spawn_points: Vec::new(),
        }
    }

    /// Create a test arena for development.
    ///
    /// A walled floor with its top at y=0 and a central pillar. Toward -Z is
    /// a flight of stairs climbing along +X to a platform. Toward +Z are two
    /// ramps, a 30 degree one that can be walked up and a 60 degree one that
    /// can't.
    pub fn test_arena() -> Result<Self, GeometryError> {
        let mut level = Self::new("test_arena", "Test Arena");
        let size = Self::ARENA_SIZE;
        let wall_height = Self::WALL_HEIGHT;
        let wall_thickness = 8.0;

        // Floor
        level.collision.add_box(
            DVec3::new(0.0, -8.0, 0.0),
            DVec3::new(size + 2.0 * wall_thickness, 8.0, size + 2.0 * wall_thickness),
            ContentFlags::SOLID,
        );

        // Walls
        for (center, half_extents) in [
            (
                DVec3::new(0.0, wall_height / 2.0, -size - wall_thickness),
                DVec3::new(size, wall_height / 2.0, wall_thickness),
            ),
            (
                DVec3::new(0.0, wall_height / 2.0, size + wall_thickness),
                DVec3::new(size, wall_height / 2.0, wall_thickness),
            ),
            (
                DVec3::new(size + wall_thickness, wall_height / 2.0, 0.0),
                DVec3::new(wall_thickness, wall_height / 2.0, size),
            ),
            (
                DVec3::new(-size - wall_thickness, wall_height / 2.0, 0.0),
                DVec3::new(wall_thickness, wall_height / 2.0, size),
            ),
        ] {
            level.collision.add_box(center, half_extents, ContentFlags::SOLID);
        }

        // Central pillar
        level.collision.add_box(
            DVec3::new(0.0, 64.0, 0.0),
            DVec3::new(32.0, 64.0, 32.0),
            ContentFlags::SOLID,
        );

        // Stairs, each step running through to the platform edge at x=-64
        let stairs_start = -384.0;
        let stairs_end = -64.0;
        let step_depth = 32.0;
        for i in 0..Self::STEP_COUNT {
            let x0 = stairs_start + step_depth * i as f64;
            let height = Self::STEP_HEIGHT * (i + 1) as f64;
            level.collision.add_box(
                DVec3::new((x0 + stairs_end) / 2.0, height / 2.0, -512.0),
                DVec3::new((stairs_end - x0) / 2.0, height / 2.0, 128.0),
                ContentFlags::SOLID,
            );
        }

        // Walkable ramp
        let (positions, normals) = wedge_mesh(
            -256.0,
            0.0,
            256.0 * 30f64.to_radians().tan(),
            384.0,
            640.0,
        );
        level
            .collision
            .add_mesh(positions, normals, ContentFlags::SOLID)?;

        // Steep ramp, authored at the origin and placed like a mesh node
        let (positions, normals) =
            wedge_mesh(0.0, 128.0, 128.0 * 60f64.to_radians().tan(), 0.0, 256.0);
        let placement = DAffine3::from_translation(DVec3::new(256.0, 0.0, 384.0));
        level.collision.add_solid(
            SolidGeometry::mesh_with_transform(&positions, &normals, &placement),
            ContentFlags::SOLID,
        )?;

        // Trigger volume by the first spawn; traces for movement pass through it
        level.collision.add_box(
            DVec3::new(-640.0, 64.0, 0.0),
            DVec3::new(64.0, 64.0, 64.0),
            ContentFlags::TRIGGER,
        );

        // Spawn points
        level.spawn_points.push(SpawnPoint {
            position: DVec3::new(-640.0, 1.0, 0.0),
            facing: 0.0,
        });
        level.spawn_points.push(SpawnPoint {
            position: DVec3::new(640.0, 1.0, 0.0),
            facing: std::f64::consts::PI,
        });

        Ok(level)
    }

    /// Get a player spawn point.
    pub fn get_player_spawn(&self, index: usize) -> Option<&SpawnPoint> {
        self.spawn_points.get(index)
    }

    /// Get the number of player spawn points.
    pub fn player_spawn_count(&self) -> usize {
        self.spawn_points.len()
    }
}

//! Reduction of convex solids to bounding plane sets.
//!
//! Geometry arrives either as a ready-made plane list (synthetic or test
//! solids) or as co-indexed vertex positions and normals from a mesh. Mesh
//! input produces one candidate plane per vertex, and candidates that match an
//! existing plane within [`PLANE_EPSILON`] are dropped, since every vertex of
//! a face shares that face's plane.

use glam::{DAffine3, DVec3};
use thiserror::Error;

use super::plane::{Plane, PLANE_EPSILON};

/// Errors produced while turning geometry into planes.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeometryError {
    #[error("mesh has {positions} positions but {normals} normals")]
    MismatchedLengths { positions: usize, normals: usize },

    #[error("vertex {index} has a degenerate normal {normal}")]
    DegenerateNormal { index: usize, normal: DVec3 },

    #[error("solid has no bounding planes")]
    Empty,
}

/// Geometry for one convex solid.
#[derive(Debug, Clone)]
pub enum SolidGeometry {
    /// Already reduced to planes; passed through unchanged.
    Planes(Vec<Plane>),

    /// World-space vertex positions with one normal per vertex.
    Mesh {
        positions: Vec<DVec3>,
        normals: Vec<DVec3>,
    },
}

impl SolidGeometry {
    pub fn mesh(positions: Vec<DVec3>, normals: Vec<DVec3>) -> Self {
        Self::Mesh { positions, normals }
    }

    /// Build mesh geometry from local-space data and a local-to-world transform.
    ///
    /// Positions go through the full affine transform. Normals go through the
    /// inverse-transpose of its linear part so non-uniform scale keeps them
    /// perpendicular to their faces; they are renormalised when planes are
    /// derived.
    pub fn mesh_with_transform(
        local_positions: &[DVec3],
        local_normals: &[DVec3],
        transform: &DAffine3,
    ) -> Self {
        let normal_matrix = transform.matrix3.inverse().transpose();

        Self::Mesh {
            positions: local_positions
                .iter()
                .map(|p| transform.transform_point3(*p))
                .collect(),
            normals: local_normals.iter().map(|n| normal_matrix * *n).collect(),
        }
    }

    /// Derive the plane set, reusing the allocation for plane input.
    pub fn into_planes(self) -> Result<Vec<Plane>, GeometryError> {
        match self {
            Self::Planes(planes) => Ok(planes),
            Self::Mesh { positions, normals } => planes_from_mesh(&positions, &normals),
        }
    }
}

/// Derive the supporting planes of a convex mesh.
///
/// Output is in first-seen order.
pub fn planes_from_mesh(positions: &[DVec3], normals: &[DVec3]) -> Result<Vec<Plane>, GeometryError> {
    if positions.len() != normals.len() {
        return Err(GeometryError::MismatchedLengths {
            positions: positions.len(),
            normals: normals.len(),
        });
    }

    let mut planes: Vec<Plane> = Vec::new();

    for (index, (position, normal)) in positions.iter().zip(normals).enumerate() {
        let unit = normal
            .try_normalize()
            .filter(|n| position.is_finite() && n.is_finite())
            .ok_or(GeometryError::DegenerateNormal {
                index,
                normal: *normal,
            })?;

        let candidate = Plane::from_point_normal(*position, unit);
        if !planes.iter().any(|p| p.approx_eq(&candidate, PLANE_EPSILON)) {
            planes.push(candidate);
        }
    }

    if planes.is_empty() {
        return Err(GeometryError::Empty);
    }

    Ok(planes)
}

/// The six planes of an axis-aligned box.
pub fn box_planes(mins: DVec3, maxs: DVec3) -> Vec<Plane> {
    vec![
        Plane::new(DVec3::X, maxs.x),
        Plane::new(DVec3::NEG_X, -mins.x),
        Plane::new(DVec3::Y, maxs.y),
        Plane::new(DVec3::NEG_Y, -mins.y),
        Plane::new(DVec3::Z, maxs.z),
        Plane::new(DVec3::NEG_Z, -mins.z),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Unit cube from 0 to 1 laid out the way a mesh exporter would: four
    /// vertices per face, each carrying that face's normal.
    fn cube_mesh() -> (Vec<DVec3>, Vec<DVec3>) {
        let faces = [
            (DVec3::X, [[1.0, 0.0, 0.0], [1.0, 1.0, 0.0], [1.0, 1.0, 1.0], [1.0, 0.0, 1.0]]),
            (DVec3::NEG_X, [[0.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 1.0, 1.0], [0.0, 0.0, 1.0]]),
            (DVec3::Y, [[0.0, 1.0, 0.0], [1.0, 1.0, 0.0], [1.0, 1.0, 1.0], [0.0, 1.0, 1.0]]),
            (DVec3::NEG_Y, [[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [1.0, 0.0, 1.0], [0.0, 0.0, 1.0]]),
            (DVec3::Z, [[0.0, 0.0, 1.0], [1.0, 0.0, 1.0], [1.0, 1.0, 1.0], [0.0, 1.0, 1.0]]),
            (DVec3::NEG_Z, [[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [1.0, 1.0, 0.0], [0.0, 1.0, 0.0]]),
        ];

        let mut positions = Vec::new();
        let mut normals = Vec::new();
        for (normal, corners) in faces {
            for corner in corners {
                positions.push(DVec3::from_array(corner));
                normals.push(normal);
            }
        }
        (positions, normals)
    }

    #[test]
    fn test_mesh_dedups_shared_face_planes() {
        let (positions, normals) = cube_mesh();
        let planes = planes_from_mesh(&positions, &normals).unwrap();

        assert_eq!(planes.len(), 6);
        // First-seen order follows the face order of the input
        assert_eq!(planes[0], Plane::new(DVec3::X, 1.0));
        assert_eq!(planes[1], Plane::new(DVec3::NEG_X, 0.0));
        assert_eq!(planes[5], Plane::new(DVec3::NEG_Z, 0.0));
    }

    #[test]
    fn test_mesh_dedup_tolerates_tiny_noise() {
        let positions = vec![DVec3::new(0.0, 8.0, 0.0), DVec3::new(5.0, 8.0 + 1e-12, 3.0)];
        let normals = vec![DVec3::Y, DVec3::new(0.0, 1.0, 1e-12)];

        let planes = planes_from_mesh(&positions, &normals).unwrap();
        assert_eq!(planes.len(), 1);
    }

    #[test]
    fn test_planes_pass_through_unchanged() {
        let planes = vec![
            Plane::new(DVec3::new(0.6, 0.8, 0.0), -3.0),
            Plane::new(DVec3::new(0.6, 0.8, 0.0), -3.0),
        ];
        let geometry = SolidGeometry::Planes(planes.clone());

        // No dedup on plane input; it is returned exactly as supplied
        assert_eq!(geometry.into_planes().unwrap(), planes);
    }

    #[test]
    fn test_mismatched_lengths_rejected() {
        let err = planes_from_mesh(&[DVec3::ZERO, DVec3::ONE], &[DVec3::Y]).unwrap_err();
        assert_eq!(
            err,
            GeometryError::MismatchedLengths {
                positions: 2,
                normals: 1
            }
        );
    }

    #[test]
    fn test_degenerate_normal_rejected() {
        let err = planes_from_mesh(&[DVec3::ZERO, DVec3::ONE], &[DVec3::Y, DVec3::ZERO]).unwrap_err();
        assert!(matches!(err, GeometryError::DegenerateNormal { index: 1, .. }));
    }

    #[test]
    fn test_empty_mesh_rejected() {
        assert_eq!(planes_from_mesh(&[], &[]), Err(GeometryError::Empty));
    }

    #[test]
    fn test_mesh_with_transform_moves_planes() {
        let (positions, normals) = cube_mesh();
        let transform = DAffine3::from_scale_rotation_translation(
            DVec3::new(2.0, 4.0, 2.0),
            glam::DQuat::IDENTITY,
            DVec3::new(10.0, 0.0, -5.0),
        );

        let planes = SolidGeometry::mesh_with_transform(&positions, &normals, &transform)
            .into_planes()
            .unwrap();

        assert_eq!(planes.len(), 6);
        let top = planes
            .iter()
            .find(|p| p.normal.abs_diff_eq(DVec3::Y, 1e-12))
            .unwrap();
        assert!((top.dist - 4.0).abs() < 1e-12);
        let east = planes
            .iter()
            .find(|p| p.normal.abs_diff_eq(DVec3::X, 1e-12))
            .unwrap();
        assert!((east.dist - 12.0).abs() < 1e-12);
    }

    #[test]
    fn test_box_planes_contain_center() {
        let mins = DVec3::new(-8.0, 0.0, -4.0);
        let maxs = DVec3::new(8.0, 16.0, 4.0);
        let planes = box_planes(mins, maxs);

        assert_eq!(planes.len(), 6);
        let center = (mins + maxs) * 0.5;
        assert!(planes.iter().all(|p| p.contains(center)));
        assert!(!planes.iter().all(|p| p.contains(DVec3::new(0.0, 17.0, 0.0))));
    }
}

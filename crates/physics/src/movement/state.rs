//! Movement state and input structures.

use glam::DVec3;
use serde::{Deserialize, Serialize};

use crate::collision::Trace;

/// Complete movement state for a player.
///
/// Owned by whoever runs the simulation and handed to
/// [`PlayerController::update`](super::PlayerController::update) by exclusive
/// reference once per tick.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MovementState {
    /// Position in world space (origin of the box, at the feet).
    pub position: DVec3,

    /// Velocity in world space (units/second).
    pub velocity: DVec3,

    /// Whether the player is standing on walkable ground.
    pub on_ground: bool,

    /// Most recent trace produced while moving, kept for diagnostics.
    #[serde(skip)]
    pub last_trace: Option<Trace>,
}

impl Default for MovementState {
    fn default() -> Self {
        Self::new(DVec3::ZERO)
    }
}

impl MovementState {
    /// Create a new airborne movement state at the given position.
    pub fn new(position: DVec3) -> Self {
        Self {
            position,
            velocity: DVec3::ZERO,
            on_ground: false,
            last_trace: None,
        }
    }

    /// Speed in the horizontal plane.
    #[inline]
    pub fn horizontal_speed(&self) -> f64 {
        self.velocity.x.hypot(self.velocity.z)
    }

    /// Eye position for a camera `eye_height` above the feet.
    #[inline]
    pub fn eye_position(&self, eye_height: f64) -> DVec3 {
        self.position + DVec3::new(0.0, eye_height, 0.0)
    }

    pub(crate) fn is_finite(&self) -> bool {
        self.position.is_finite() && self.velocity.is_finite()
    }
}

/// Input command for a single tick.
///
/// The wish direction is already resolved against the camera. Only its
/// horizontal part is used; its length (clamped to 1) scales the wish speed,
/// so keyboard input passes a unit vector and analog input anything shorter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PlayerCommand {
    /// Desired movement direction in world space.
    pub wish_direction: DVec3,

    /// Jump is held.
    pub jump: bool,
}

impl PlayerCommand {
    pub fn new(wish_direction: DVec3, jump: bool) -> Self {
        Self {
            wish_direction,
            jump,
        }
    }

    /// Build a command from a view basis and movement axes.
    ///
    /// `forward` and `right` are flattened onto the horizontal plane before
    /// being combined, so looking up or down does not slow the player.
    /// Diagonal input is normalised.
    pub fn from_view(
        forward: DVec3,
        right: DVec3,
        forward_move: f64,
        side_move: f64,
        jump: bool,
    ) -> Self {
        let forward = DVec3::new(forward.x, 0.0, forward.z).normalize_or_zero();
        let right = DVec3::new(right.x, 0.0, right.z).normalize_or_zero();

        let mut wish = forward * forward_move + right * side_move;
        if wish.length_squared() > 1.0 {
            wish = wish.normalize();
        }

        Self::new(wish, jump)
    }

    /// Horizontal unit wish direction and its magnitude in `[0, 1]`.
    pub fn wish(&self) -> (DVec3, f64) {
        let flat = DVec3::new(self.wish_direction.x, 0.0, self.wish_direction.z);
        let length = flat.length();
        if length < 1e-6 {
            return (DVec3::ZERO, 0.0);
        }
        (flat / length, length.min(1.0))
    }
}

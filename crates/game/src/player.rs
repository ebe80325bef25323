//! Player entity and state.

use brushwalk_physics::{MoveError, MovementConfig, MovementState};
use glam::DVec3;
use serde::{Deserialize, Serialize};

/// Unique identifier for entities.
pub type EntityId = u32;

/// Pitch limit just short of straight up or down.
const MAX_PITCH: f64 = 89.0 * std::f64::consts::PI / 180.0;

/// Whether the simulation still integrates a player.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PlayerStatus {
    Active,
    /// Movement failed; the player is frozen where the error happened.
    Halted(MoveError),
}

/// A player in the game.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    /// Unique player ID.
    pub id: EntityId,

    /// Player name/handle.
    pub name: String,

    /// Movement physics state.
    pub movement: MovementState,

    /// View yaw in radians. 0 faces +X.
    pub yaw: f64,

    /// View pitch in radians, positive looking up.
    pub pitch: f64,

    pub status: PlayerStatus,
}

impl Player {
    /// Create a new player standing at the given position.
    pub fn new(id: EntityId, name: String, position: DVec3, facing: f64) -> Self {
        Self {
            id,
            name,
            movement: MovementState::new(position),
            yaw: facing,
            pitch: 0.0,
            status: PlayerStatus::Active,
        }
    }

    /// Get the player's current position.
    #[inline]
    pub fn position(&self) -> DVec3 {
        self.movement.position
    }

    /// Get the player's eye position (for camera).
    pub fn eye_position(&self, config: &MovementConfig) -> DVec3 {
        self.movement.eye_position(config.view_height(false))
    }

    /// Get the direction the player is looking.
    pub fn look_direction(&self) -> DVec3 {
        let (sin_yaw, cos_yaw) = self.yaw.sin_cos();
        let (sin_pitch, cos_pitch) = self.pitch.sin_cos();
        DVec3::new(cos_yaw * cos_pitch, sin_pitch, sin_yaw * cos_pitch)
    }

    /// Speed in the horizontal plane, as shown on the HUD.
    #[inline]
    pub fn horizontal_speed(&self) -> f64 {
        self.movement.horizontal_speed()
    }

    /// Check if the player is on the ground.
    #[inline]
    pub fn on_ground(&self) -> bool {
        self.movement.on_ground
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.status == PlayerStatus::Active
    }

    /// Turn the view, keeping pitch short of vertical and yaw in `[0, 2π)`.
    pub fn turn(&mut self, delta_pitch: f64, delta_yaw: f64) {
        self.pitch = (self.pitch + delta_pitch).clamp(-MAX_PITCH, MAX_PITCH);
        self.yaw = (self.yaw + delta_yaw).rem_euclid(std::f64::consts::TAU);
    }

    /// Stop integrating this player.
    pub fn halt(&mut self, error: MoveError) {
        self.status = PlayerStatus::Halted(error);
    }

    /// Put the player back at `position` with a fresh movement state.
    pub fn respawn(&mut self, position: DVec3, facing: f64) {
        self.movement = MovementState::new(position);
        self.yaw = facing;
        self.pitch = 0.0;
        self.status = PlayerStatus::Active;
    }
}

//! Player input handling.
//!
//! This module converts raw input (movement keys, mouse motion, jump) into
//! commands for the physics system.

use brushwalk_physics::PlayerCommand;
use glam::DVec3;
use serde::{Deserialize, Serialize};

/// Raw player input for a single tick.
///
/// It gets converted to a [`PlayerCommand`] once the player's view has been
/// turned by the mouse motion.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlayerInput {
    /// Movement keys pressed.
    pub movement: MovementInput,

    /// Mouse delta this tick (pixels).
    pub mouse_delta: (f64, f64),

    /// Jump is held.
    pub jump: bool,
}

/// Movement key states.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct MovementInput {
    pub forward: bool,
    pub backward: bool,
    pub left: bool,
    pub right: bool,
}

impl MovementInput {
    /// Forward and sideways axes in `[-1, 1]`.
    pub fn axes(&self) -> (f64, f64) {
        let axis = |positive: bool, negative: bool| match (positive, negative) {
            (true, false) => 1.0,
            (false, true) => -1.0,
            _ => 0.0,
        };
        (
            axis(self.forward, self.backward),
            axis(self.right, self.left),
        )
    }
}

impl PlayerInput {
    /// Convert to a physics command for a player facing `yaw` radians.
    ///
    /// Yaw 0 faces +X and positive yaw turns toward +Z.
    pub fn to_command(&self, yaw: f64) -> PlayerCommand {
        let (sin, cos) = yaw.sin_cos();
        let forward = DVec3::new(cos, 0.0, sin);
        let right = DVec3::new(-sin, 0.0, cos);

        let (forward_move, side_move) = self.movement.axes();
        PlayerCommand::from_view(forward, right, forward_move, side_move, self.jump)
    }

    /// View angle change as `(pitch, yaw)` in radians.
    ///
    /// Moving the mouse right turns right and moving it up looks up.
    pub fn view_delta(&self, mouse_sensitivity: f64) -> (f64, f64) {
        let sensitivity_radians = mouse_sensitivity * 0.001;
        (
            -self.mouse_delta.1 * sensitivity_radians,
            self.mouse_delta.0 * sensitivity_radians,
        )
    }
}

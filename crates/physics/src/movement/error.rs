//! Movement errors.

use glam::DVec3;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::collision::Trace;

/// Errors that stop a player from being integrated.
#[derive(Debug, Clone, PartialEq, Error, Serialize, Deserialize)]
pub enum MoveError {
    /// The player is inside solid geometry and no position on the nudge grid
    /// around it is clear. Integrating from here is undefined.
    #[error("player stuck in solid at {position} with velocity {velocity}")]
    Stuck {
        position: DVec3,
        velocity: DVec3,
        /// Most recent trace the player produced before getting stuck.
        last_trace: Option<Trace>,
    },

    #[error("invalid time step {0}")]
    InvalidTimeStep(f64),

    #[error("wish direction {0} is not finite")]
    InvalidCommand(DVec3),

    #[error("refusing to integrate non-finite state: position {position}, velocity {velocity}")]
    NonFiniteState { position: DVec3, velocity: DVec3 },
}

/// Errors from [`MovementConfig::validate`](super::MovementConfig::validate).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("{field} is out of range: {value}")]
    OutOfRange { field: &'static str, value: f64 },

    #[error("player bounds are inverted: mins {mins}, maxs {maxs}")]
    InvertedBounds { mins: DVec3, maxs: DVec3 },

    #[error("duck height {duck_height} exceeds standing height {height}")]
    DuckTallerThanStanding { duck_height: f64, height: f64 },

    #[error("slide move needs at least one bump and one clip plane")]
    NoSlideBudget,
}

//! Player movement system.
//!
//! Integrates one player box per tick against a [`CollisionWorld`].
//!
//! # Tick Order
//!
//! 1. Nudge the box out of shallow overlaps
//! 2. Categorize position (walkable ground within a couple of units below)
//! 3. First half of gravity
//! 4. Jump, friction and acceleration
//! 5. Walk move with stair stepping, or an airborne slide move
//! 6. Categorize again and apply the second half of gravity
//!
//! [`CollisionWorld`]: crate::collision::CollisionWorld

mod config;
mod controller;
mod error;
mod slide_move;
mod state;

pub use config::MovementConfig;
pub use controller::PlayerController;
pub use error::{ConfigError, MoveError};
pub use slide_move::{
    clip_velocity, slide_move, step_slide_move, SlideOutcome, StopReason, STOP_EPSILON,
};
pub use state::{MovementState, PlayerCommand};

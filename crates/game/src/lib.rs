//! Brushwalk Game Logic
//!
//! This crate wraps the movement engine in a small game layer:
//!
//! - Player state and input handling
//! - Level construction and spawn points
//! - The fixed-tick simulation loop and its configuration
//!
//! # Architecture
//!
//! The simulation is deterministic. All state updates are driven by player
//! inputs and a fixed timestep.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      Game Simulation                        │
//! │  ┌─────────┐    ┌───────────┐    ┌───────────────────────┐  │
//! │  │ Input   │───►│ Physics   │───►│ Game State            │  │
//! │  │ (keys,  │    │ (movement,│    │ (players, level)      │  │
//! │  │  mouse) │    │ collision)│    └───────────────────────┘  │
//! │  └─────────┘    └───────────┘                               │
//! └─────────────────────────────────────────────────────────────┘
//! ```

pub mod input;
pub mod level;
pub mod player;
pub mod simulation;

// Re-export main types
pub use input::{MovementInput, PlayerInput};
pub use level::{Level, SpawnPoint};
pub use player::{EntityId, Player, PlayerStatus};
pub use simulation::{Simulation, SimulationConfig, SimulationConfigError};

// Re-export physics types for convenience
pub use brushwalk_physics::{
    CollisionWorld, ContentFlags, MoveError, MovementConfig, MovementState, PlayerCommand,
    PlayerController, Trace,
};

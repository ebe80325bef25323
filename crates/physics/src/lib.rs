//! Brushwalk Physics Engine
//!
//! Classic Quake/Half-Life player movement against static convex brushes.
//! Every solid in the world is a set of bounding planes, and the player is an
//! axis-aligned box swept through them.
//!
//! # Architecture
//!
//! The engine is split into two systems:
//!
//! - **Collision**: Derives plane sets from geometry, clips swept boxes
//!   against them, and folds the result over every solid in the world
//! - **Movement**: Uses collision traces to integrate gravity, friction,
//!   acceleration, sliding and stair stepping once per tick
//!
//! Data only flows one way. Plane sets are built once when a solid is added
//! and are read-only afterwards; the only mutable state is the player's
//! [`MovementState`], borrowed exclusively for the duration of a tick.

pub mod collision;
pub mod movement;

// Re-export commonly used types
pub use collision::{
    box_trace, clip_box_to_planes, player_trace, CollisionWorld, ContentFlags, ConvexSolid,
    GeometryError, Plane, SolidGeometry, Trace,
};
pub use movement::{
    ConfigError, MoveError, MovementConfig, MovementState, PlayerCommand, PlayerController,
    SlideOutcome, StopReason,
};

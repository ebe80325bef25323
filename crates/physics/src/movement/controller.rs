//! Player movement controller.
//!
//! This is the main entry point for player movement. It takes input commands
//! and updates the movement state through the collision world.

use glam::DVec3;

use crate::collision::{CollisionWorld, ContentFlags, Trace};

use super::config::MovementConfig;
use super::error::MoveError;
use super::slide_move::{slide_move, step_slide_move, SlideOutcome};
use super::state::{MovementState, PlayerCommand};

/// How far below a spawn point to look for the floor.
const SPAWN_DROP_DISTANCE: f64 = 256.0;

/// Player movement controller.
///
/// Handles all player movement physics including:
/// - Recovery from small overlaps with solid geometry
/// - Ground detection
/// - Gravity, split into two half steps around the move
/// - Jumping, friction, ground and air acceleration
/// - Collision response and stair stepping
///
/// # Example
///
/// ```ignore
/// let controller = PlayerController::new(MovementConfig::default());
/// let mut state = MovementState::default();
/// controller.spawn_at(&mut state, spawn_position, &world)?;
///
/// // Each tick:
/// controller.update(&mut state, &command, &world, delta_time)?;
/// ```
#[derive(Debug, Clone)]
pub struct PlayerController {
    /// Movement configuration.
    pub config: MovementConfig,
}

impl PlayerController {
    /// Create a new player controller with the given configuration.
    pub fn new(config: MovementConfig) -> Self {
        Self { config }
    }

    /// Create a controller with default configuration.
    pub fn with_default_config() -> Self {
        Self::new(MovementConfig::default())
    }

    /// Initialize a player's state at a spawn point.
    ///
    /// Resets the state, pushes the player out of any small overlap, then
    /// drops them onto the floor below if one is within reach. With no floor
    /// in reach the player stays at the spawn point, airborne.
    pub fn spawn_at(
        &self,
        state: &mut MovementState,
        spawn_pos: DVec3,
        world: &CollisionWorld,
    ) -> Result<(), MoveError> {
        *state = MovementState::new(spawn_pos);
        self.unstick(state, world)?;

        let trace = self.trace(
            world,
            state.position,
            state.position - DVec3::new(0.0, SPAWN_DROP_DISTANCE, 0.0),
        );
        if trace.hit_something() && !trace.start_solid {
            state.position = trace.end_position;
        }

        self.categorize_position(state, world);
        log::debug!(
            "spawned at {} (requested {}), on_ground={}",
            state.position,
            spawn_pos,
            state.on_ground
        );
        Ok(())
    }

    /// Update player movement for one tick.
    ///
    /// # Arguments
    ///
    /// * `state` - The player's movement state (will be modified)
    /// * `command` - The player's input command for this tick
    /// * `world` - The collision world
    /// * `delta_time` - Time step in seconds
    ///
    /// # Errors
    ///
    /// [`MoveError::Stuck`] when the player is inside solid geometry and can't
    /// be nudged out. The state is left untouched so it can be reported. The
    /// other variants reject non-finite input before anything is integrated.
    pub fn update(
        &self,
        state: &mut MovementState,
        command: &PlayerCommand,
        world: &CollisionWorld,
        delta_time: f64,
    ) -> Result<(), MoveError> {
        if !delta_time.is_finite() || delta_time < 0.0 {
            return Err(MoveError::InvalidTimeStep(delta_time));
        }
        if !command.wish_direction.is_finite() {
            return Err(MoveError::InvalidCommand(command.wish_direction));
        }
        if !state.is_finite() {
            return Err(MoveError::NonFiniteState {
                position: state.position,
                velocity: state.velocity,
            });
        }
        if delta_time == 0.0 {
            return Ok(());
        }

        // Long frames are integrated as if they were shorter
        let delta_time = delta_time.min(self.config.max_delta_time);

        self.unstick(state, world)?;
        self.categorize_position(state, world);

        self.add_half_gravity(state, delta_time);

        if state.on_ground && command.jump {
            self.jump(state);
            self.add_half_gravity(state, delta_time);
        }

        if state.on_ground {
            state.velocity.y = 0.0;
            self.apply_friction(state, delta_time);
        }

        let (wish_direction, wish_magnitude) = command.wish();
        let wish_speed = self.config.move_speed * wish_magnitude;

        let outcome = if state.on_ground {
            self.accelerate(state, wish_direction, wish_speed, delta_time);
            self.walk_move(state, world, delta_time)
        } else {
            self.air_accelerate(state, wish_direction, wish_speed, delta_time);
            self.air_move(state, world, delta_time)
        };

        // Velocity is already zeroed; the rest of the tick is skipped
        if outcome == SlideOutcome::Trapped {
            log::warn!("slide move trapped in solid at {}", state.position);
            return Ok(());
        }

        self.categorize_position(state, world);
        self.add_half_gravity(state, delta_time);

        if state.on_ground {
            state.velocity.y = 0.0;
        }

        Ok(())
    }

    // ========================================================================
    // Stuck Recovery
    // ========================================================================

    /// Move the player to the first clear spot on a 3x3x3 grid around them.
    ///
    /// The vertical offset is the outermost loop, and every axis tries zero
    /// first, then the negative step, then the positive one.
    fn unstick(&self, state: &mut MovementState, world: &CollisionWorld) -> Result<(), MoveError> {
        if self.is_clear(world, state.position) {
            return Ok(());
        }

        let step = self.config.nudge_distance;
        let offsets = [0.0, -step, step];

        for dy in offsets {
            for dx in offsets {
                for dz in offsets {
                    let candidate = state.position + DVec3::new(dx, dy, dz);
                    if self.is_clear(world, candidate) {
                        log::debug!("nudged out of solid: {} -> {}", state.position, candidate);
                        state.position = candidate;
                        return Ok(());
                    }
                }
            }
        }

        Err(MoveError::Stuck {
            position: state.position,
            velocity: state.velocity,
            last_trace: state.last_trace,
        })
    }

    // ========================================================================
    // Ground Detection
    // ========================================================================

    fn categorize_position(&self, state: &mut MovementState, world: &CollisionWorld) {
        // Moving up fast enough means we just jumped or got launched
        if state.velocity.y > self.config.max_ground_launch_speed {
            state.on_ground = false;
            return;
        }

        let probe = DVec3::new(0.0, self.config.ground_probe_distance, 0.0);
        let trace = self.trace(world, state.position, state.position - probe);
        state.last_trace = Some(trace);

        state.on_ground = trace
            .plane
            .is_some_and(|p| p.normal.y >= self.config.min_walk_normal);

        if state.on_ground && !trace.start_solid {
            state.position = trace.end_position;
        }
    }

    // ========================================================================
    // Gravity and Jumping
    // ========================================================================

    fn add_half_gravity(&self, state: &mut MovementState, delta_time: f64) {
        state.velocity.y -= self.config.gravity * 0.5 * delta_time;
    }

    fn jump(&self, state: &mut MovementState) {
        state.on_ground = false;
        state.velocity.y += self.config.jump_velocity;
    }

    // ========================================================================
    // Ground Movement
    // ========================================================================

    fn apply_friction(&self, state: &mut MovementState, delta_time: f64) {
        let speed = state.velocity.length();
        if speed < 0.1 {
            return;
        }

        let control = speed.max(self.config.stop_speed);
        let drop = control * self.config.friction * delta_time;

        let new_speed = (speed - drop).max(0.0);
        state.velocity *= new_speed / speed;
    }

    fn accelerate(
        &self,
        state: &mut MovementState,
        wish_direction: DVec3,
        wish_speed: f64,
        delta_time: f64,
    ) {
        let current_speed = state.velocity.dot(wish_direction);
        let add_speed = wish_speed - current_speed;
        if add_speed <= 0.0 {
            return;
        }

        let accel_speed = (self.config.acceleration * wish_speed * delta_time).min(add_speed);
        state.velocity += wish_direction * accel_speed;
    }

    /// Try the horizontal move directly and fall back to stair stepping.
    fn walk_move(
        &self,
        state: &mut MovementState,
        world: &CollisionWorld,
        delta_time: f64,
    ) -> SlideOutcome {
        let displacement = DVec3::new(state.velocity.x, 0.0, state.velocity.z) * delta_time;
        if displacement == DVec3::ZERO {
            return SlideOutcome::Completed;
        }

        let trace = self.trace(world, state.position, state.position + displacement);
        state.last_trace = Some(trace);

        if trace.fraction == 1.0 {
            state.position = trace.end_position;
            return SlideOutcome::Completed;
        }

        step_slide_move(world, state, delta_time, &self.config)
    }

    // ========================================================================
    // Air Movement
    // ========================================================================

    /// Like [`accelerate`](Self::accelerate), but the speed the player can
    /// reach along the wish direction is capped at `air_speed_cap`. The
    /// acceleration rate still scales with the uncapped wish speed, which is
    /// what makes air strafing work.
    fn air_accelerate(
        &self,
        state: &mut MovementState,
        wish_direction: DVec3,
        wish_speed: f64,
        delta_time: f64,
    ) {
        let capped_speed = wish_speed.min(self.config.air_speed_cap);
        let current_speed = state.velocity.dot(wish_direction);
        let add_speed = capped_speed - current_speed;
        if add_speed <= 0.0 {
            return;
        }

        let accel_speed = (self.config.air_acceleration * wish_speed * delta_time).min(add_speed);
        state.velocity += wish_direction * accel_speed;
    }

    fn air_move(
        &self,
        state: &mut MovementState,
        world: &CollisionWorld,
        delta_time: f64,
    ) -> SlideOutcome {
        slide_move(world, state, delta_time, &self.config)
    }

    // ========================================================================
    // Utility
    // ========================================================================

    fn trace(&self, world: &CollisionWorld, start: DVec3, end: DVec3) -> Trace {
        world.trace(
            start,
            end,
            self.config.mins,
            self.config.maxs,
            ContentFlags::MASK_PLAYER_SOLID,
        )
    }

    fn is_clear(&self, world: &CollisionWorld, position: DVec3) -> bool {
        world.position_is_clear(
            position,
            self.config.mins,
            self.config.maxs,
            ContentFlags::MASK_PLAYER_SOLID,
        )
    }
}

// ============================================================================
// Tests
// ============================================================================

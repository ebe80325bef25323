//! Game simulation - the main game loop.
//!
//! This module contains the deterministic fixed-tick simulation. Players are
//! integrated one after another against the level's collision world; a player
//! whose movement fails is halted and the others keep going.

use std::path::Path;

use brushwalk_physics::{ConfigError, GeometryError, MoveError, MovementConfig, PlayerController};
use glam::DVec3;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::input::PlayerInput;
use crate::level::Level;
use crate::player::{EntityId, Player, PlayerStatus};

/// Errors from loading or validating a [`SimulationConfig`].
#[derive(Debug, Error)]
pub enum SimulationConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid movement config: {0}")]
    Movement(#[from] ConfigError),

    #[error("tick rate must be positive")]
    InvalidTickRate,
}

/// Game simulation configuration.
///
/// Missing fields in JSON fall back to their defaults, including individual
/// fields of `movement`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Simulation tick rate (ticks per second).
    pub tick_rate: u32,

    /// Movement physics configuration.
    pub movement: MovementConfig,

    /// Mouse sensitivity.
    pub mouse_sensitivity: f64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            tick_rate: 60,
            movement: MovementConfig::default(),
            mouse_sensitivity: 2.0,
        }
    }
}

impl SimulationConfig {
    /// Parse and validate a config from JSON.
    pub fn from_json(json: &str) -> Result<Self, SimulationConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SimulationConfigError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn validate(&self) -> Result<(), SimulationConfigError> {
        if self.tick_rate == 0 {
            return Err(SimulationConfigError::InvalidTickRate);
        }
        self.movement.validate()?;
        Ok(())
    }

    /// Get the time step per tick in seconds.
    pub fn delta_time(&self) -> f64 {
        1.0 / self.tick_rate as f64
    }
}

/// The main game simulation.
///
/// This contains all game state and advances it deterministically based on
/// player inputs. Running it twice with the same inputs gives bit-identical
/// results.
#[derive(Debug)]
pub struct Simulation {
    /// Current frame/tick number.
    pub frame: u64,

    /// Simulation configuration.
    pub config: SimulationConfig,

    /// Current level.
    pub level: Level,

    /// All players in the game.
    pub players: Vec<Player>,

    /// Movement physics controller.
    movement_controller: PlayerController,

    /// Next entity ID to assign.
    next_entity_id: EntityId,
}

impl Simulation {
    /// Create a new simulation with the given configuration and level.
    pub fn new(config: SimulationConfig, level: Level) -> Result<Self, SimulationConfigError> {
        config.validate()?;
        let movement_controller = PlayerController::new(config.movement.clone());

        Ok(Self {
            frame: 0,
            config,
            level,
            players: Vec::new(),
            movement_controller,
            next_entity_id: 1,
        })
    }

    /// Create a simulation with default configuration and test arena.
    pub fn test() -> Result<Self, GeometryError> {
        Ok(Self {
            frame: 0,
            config: SimulationConfig::default(),
            level: Level::test_arena()?,
            players: Vec::new(),
            movement_controller: PlayerController::with_default_config(),
            next_entity_id: 1,
        })
    }

    /// Add a player to the simulation at the next spawn point.
    ///
    /// Returns the player's ID.
    pub fn add_player(&mut self, name: &str) -> Result<EntityId, MoveError> {
        let spawn_index = self.players.len() % self.level.player_spawn_count().max(1);
        let spawn = self.level.get_player_spawn(spawn_index).copied();

        let position = spawn.map(|s| s.position).unwrap_or(DVec3::ZERO);
        let facing = spawn.map(|s| s.facing).unwrap_or(0.0);

        let mut player = Player::new(self.next_entity_id, name.to_string(), position, facing);
        self.movement_controller
            .spawn_at(&mut player.movement, position, &self.level.collision)?;

        let id = self.next_entity_id;
        self.next_entity_id += 1;
        log::info!("player {} ({}) joined at {}", id, name, player.position());

        self.players.push(player);
        Ok(id)
    }

    /// Remove a player from the simulation.
    pub fn remove_player(&mut self, player_id: EntityId) {
        self.players.retain(|p| p.id != player_id);
    }

    /// Get a player by ID.
    pub fn get_player(&self, player_id: EntityId) -> Option<&Player> {
        self.players.iter().find(|p| p.id == player_id)
    }

    /// Get a mutable reference to a player by ID.
    pub fn get_player_mut(&mut self, player_id: EntityId) -> Option<&mut Player> {
        self.players.iter_mut().find(|p| p.id == player_id)
    }

    /// Put a player back at their spawn point and make them active again.
    ///
    /// Returns `Ok(false)` if there is no such player.
    pub fn respawn_player(&mut self, player_id: EntityId) -> Result<bool, MoveError> {
        let Some(index) = self.players.iter().position(|p| p.id == player_id) else {
            return Ok(false);
        };

        let spawn_index = index % self.level.player_spawn_count().max(1);
        let spawn = self.level.get_player_spawn(spawn_index).copied();
        let position = spawn.map(|s| s.position).unwrap_or(DVec3::ZERO);
        let facing = spawn.map(|s| s.facing).unwrap_or(0.0);

        let player = &mut self.players[index];
        player.respawn(position, facing);
        self.movement_controller
            .spawn_at(&mut player.movement, position, &self.level.collision)?;
        Ok(true)
    }

    /// Advance the simulation by one tick.
    ///
    /// # Arguments
    ///
    /// * `inputs` - Player inputs indexed by player position in the `players` array
    pub fn tick(&mut self, inputs: &[PlayerInput]) {
        let delta_time = self.config.delta_time();

        for (i, player) in self.players.iter_mut().enumerate() {
            if !player.is_active() {
                continue;
            }

            // Get input for this player (default if not provided)
            let input = inputs.get(i).cloned().unwrap_or_default();

            let (delta_pitch, delta_yaw) = input.view_delta(self.config.mouse_sensitivity);
            player.turn(delta_pitch, delta_yaw);

            let command = input.to_command(player.yaw);

            if let Err(e) = self.movement_controller.update(
                &mut player.movement,
                &command,
                &self.level.collision,
                delta_time,
            ) {
                log::error!("player {} halted on frame {}: {}", player.id, self.frame, e);
                player.halt(e);
            }
        }

        self.frame += 1;
    }

    /// Number of players still being integrated.
    pub fn active_player_count(&self) -> usize {
        self.players.iter().filter(|p| p.is_active()).count()
    }

    /// First halted player and the error that stopped them.
    pub fn first_halted(&self) -> Option<(&Player, &MoveError)> {
        self.players.iter().find_map(|p| match &p.status {
            PlayerStatus::Halted(e) => Some((p, e)),
            PlayerStatus::Active => None,
        })
    }

    /// Get the delta time for this simulation.
    pub fn delta_time(&self) -> f64 {
        self.config.delta_time()
    }
}

// ============================================================================
// Tests
// ============================================================================

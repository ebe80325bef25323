//! Movement configuration constants.
//!
//! All movement parameters are grouped here for easy tuning. Units are Quake
//! map units (one unit is roughly an inch) and seconds.

use glam::DVec3;
use serde::{Deserialize, Serialize};

use super::error::ConfigError;

/// Configuration for player movement physics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MovementConfig {
    // ========================================================================
    // Player Dimensions
    // ========================================================================
    /// Box minimum corner relative to the player origin (feet).
    pub mins: DVec3,

    /// Box maximum corner relative to the player origin.
    pub maxs: DVec3,

    /// Eye height above the origin when standing.
    pub eye_height: f64,

    /// Box height when ducking.
    pub duck_height: f64,

    /// Eye height above the origin when ducking.
    pub duck_eye_height: f64,

    // ========================================================================
    // Movement Speeds
    // ========================================================================
    /// Wish speed for full input (units/second).
    pub move_speed: f64,

    /// Vertical impulse added by a jump (units/second).
    pub jump_velocity: f64,

    /// Wish speed cap applied while airborne (units/second).
    pub air_speed_cap: f64,

    // ========================================================================
    // Physics
    // ========================================================================
    /// Gravity acceleration (units/second²).
    pub gravity: f64,

    /// Ground friction coefficient.
    pub friction: f64,

    /// Below this speed friction acts as if the player moved this fast.
    pub stop_speed: f64,

    /// Ground acceleration factor.
    pub acceleration: f64,

    /// Air acceleration factor.
    pub air_acceleration: f64,

    // ========================================================================
    // Stairs and Ground
    // ========================================================================
    /// Maximum step height the player climbs without jumping.
    pub step_size: f64,

    /// Minimum plane normal Y that counts as ground (cos of max slope).
    /// 0.7 ≈ 45 degrees
    pub min_walk_normal: f64,

    /// How far below the feet the ground probe reaches.
    pub ground_probe_distance: f64,

    /// Upward speed above which the player can't be on the ground.
    pub max_ground_launch_speed: f64,

    // ========================================================================
    // Collision
    // ========================================================================
    /// Trace-and-clip passes per slide move.
    pub max_bumps: usize,

    /// Touched planes tracked per slide move.
    pub max_clip_planes: usize,

    /// Step of the stuck-recovery search grid.
    pub nudge_distance: f64,

    /// Longest frame time integrated in one update (seconds).
    pub max_delta_time: f64,
}

impl Default for MovementConfig {
    fn default() -> Self {
        Self {
            // Player dimensions
            mins: DVec3::new(-16.0, 0.0, -16.0),
            maxs: DVec3::new(16.0, 72.0, 16.0),
            eye_height: 64.0,
            duck_height: 36.0,
            duck_eye_height: 30.0,

            // Movement speeds
            move_speed: 400.0,
            jump_velocity: 295.0,
            air_speed_cap: 30.0,

            // Physics
            gravity: 800.0,
            friction: 4.0,
            stop_speed: 100.0,
            acceleration: 10.0,
            air_acceleration: 10.0,

            // Stairs and ground
            step_size: 18.0,
            min_walk_normal: 0.7,
            ground_probe_distance: 2.0,
            max_ground_launch_speed: 180.0,

            // Collision
            max_bumps: 4,
            max_clip_planes: 5,
            nudge_distance: 0.125,
            max_delta_time: 0.25,
        }
    }
}

impl MovementConfig {
    /// Quake 1 player tuning: shorter box, slower run, lower jump.
    pub fn quake() -> Self {
        Self {
            maxs: DVec3::new(16.0, 56.0, 16.0),
            eye_height: 46.0,
            duck_height: 32.0,
            duck_eye_height: 26.0,
            move_speed: 320.0,
            jump_velocity: 270.0,
            ..Default::default()
        }
    }

    /// Standing box height.
    #[inline]
    pub fn height(&self) -> f64 {
        self.maxs.y - self.mins.y
    }

    /// Eye height for the given stance.
    pub fn view_height(&self, ducking: bool) -> f64 {
        if ducking {
            self.duck_eye_height
        } else {
            self.eye_height
        }
    }

    /// Check the values the integrator relies on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.mins.is_finite() || !self.maxs.is_finite() || self.mins.cmpge(self.maxs).any() {
            return Err(ConfigError::InvertedBounds {
                mins: self.mins,
                maxs: self.maxs,
            });
        }

        let positive = [
            ("move_speed", self.move_speed),
            ("gravity", self.gravity),
            ("friction", self.friction),
            ("stop_speed", self.stop_speed),
            ("acceleration", self.acceleration),
            ("air_acceleration", self.air_acceleration),
            ("max_delta_time", self.max_delta_time),
            ("nudge_distance", self.nudge_distance),
            ("ground_probe_distance", self.ground_probe_distance),
        ];
        let non_negative = [
            ("jump_velocity", self.jump_velocity),
            ("air_speed_cap", self.air_speed_cap),
            ("step_size", self.step_size),
        ];

        for (field, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::OutOfRange { field, value });
            }
        }
        for (field, value) in non_negative {
            if !(value.is_finite() && value >= 0.0) {
                return Err(ConfigError::OutOfRange { field, value });
            }
        }

        if !(0.0..=1.0).contains(&self.min_walk_normal) {
            return Err(ConfigError::OutOfRange {
                field: "min_walk_normal",
                value: self.min_walk_normal,
            });
        }

        if self.duck_height > self.height() {
            return Err(ConfigError::DuckTallerThanStanding {
                duck_height: self.duck_height,
                height: self.height(),
            });
        }

        if self.max_bumps == 0 || self.max_clip_planes == 0 {
            return Err(ConfigError::NoSlideBudget);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = MovementConfig::default();
        assert_eq!(config.height(), 72.0);
        assert_eq!(config.eye_height, config.height() - 8.0);
        assert_eq!(config.duck_eye_height, config.duck_height - 6.0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_quake_preset() {
        let config = MovementConfig::quake();
        assert_eq!(config.height(), 56.0);
        assert_eq!(config.move_speed, 320.0);
        assert_eq!(config.gravity, MovementConfig::default().gravity);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_view_height() {
        let config = MovementConfig::default();
        assert_eq!(config.view_height(false), 64.0);
        assert_eq!(config.view_height(true), 30.0);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let config = MovementConfig {
            gravity: -800.0,
            ..Default::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::OutOfRange {
                field: "gravity",
                value: -800.0
            })
        );

        let config = MovementConfig {
            maxs: DVec3::new(16.0, -1.0, 16.0),
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::InvertedBounds { .. })));

        let config = MovementConfig {
            duck_height: 80.0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::DuckTallerThanStanding { .. })
        ));

        let config = MovementConfig {
            max_bumps: 0,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::NoSlideBudget));
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let config: MovementConfig = serde_json::from_str(r#"{ "gravity": 600.0 }"#).unwrap();
        assert_eq!(config.gravity, 600.0);
        assert_eq!(config.move_speed, 400.0);
    }
}

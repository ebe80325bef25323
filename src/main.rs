//! Brushwalk - Headless Movement Driver
//!
//! Runs the test arena for a fixed number of ticks with scripted input and
//! logs a HUD line (eye position, view direction, horizontal speed, ground
//! state) as it goes.
//!
//! ```text
//! RUST_LOG=info brushwalk --ticks 600 --jump-every 45 --strafe 6
//! ```

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use brushwalk_game::{Level, PlayerInput, Simulation, SimulationConfig};
use brushwalk_physics::MovementConfig;
use clap::Parser;

#[derive(Debug, Parser)]
#[command(name = "brushwalk", version, about)]
struct Args {
    /// JSON simulation config; defaults are used for missing fields.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Use the Quake 1 movement tuning instead of the default one.
    #[arg(long, conflicts_with = "config")]
    quake: bool,

    /// Number of ticks to simulate.
    #[arg(long, default_value_t = 600)]
    ticks: u64,

    /// Log a HUD line every N ticks.
    #[arg(long, default_value_t = 60)]
    log_every: u64,

    /// Press jump every N ticks (0 never jumps).
    #[arg(long, default_value_t = 0)]
    jump_every: u64,

    /// Horizontal mouse motion per tick, in pixels.
    #[arg(long, default_value_t = 0.0)]
    strafe: f64,
}

/// Scripted input: run forward, sweep the mouse, and jump on a beat.
fn scripted_input(args: &Args, frame: u64) -> PlayerInput {
    let mut input = PlayerInput {
        mouse_delta: (args.strafe, 0.0),
        jump: args.jump_every > 0 && frame % args.jump_every == 0,
        ..Default::default()
    };
    input.movement.forward = true;
    input.movement.right = args.strafe > 0.0;
    input.movement.left = args.strafe < 0.0;
    input
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => SimulationConfig::load(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None if args.quake => SimulationConfig {
            movement: MovementConfig::quake(),
            ..Default::default()
        },
        None => SimulationConfig::default(),
    };

    let level = Level::test_arena().context("building test arena")?;
    log::info!(
        "{}: {} solids, {} Hz",
        level.name,
        level.collision.solid_count(),
        config.tick_rate
    );

    let mut simulation = Simulation::new(config, level)?;
    let player_id = simulation
        .add_player("Player1")
        .context("spawning player")?;

    for _ in 0..args.ticks {
        let input = scripted_input(&args, simulation.frame);
        simulation.tick(&[input]);

        if let Some((player, error)) = simulation.first_halted() {
            bail!("player {} halted on frame {}: {}", player.id, simulation.frame, error);
        }

        if args.log_every > 0 && simulation.frame % args.log_every == 0 {
            if let Some(player) = simulation.get_player(player_id) {
                let eye = player.eye_position(&simulation.config.movement);
                let look = player.look_direction();
                log::info!(
                    "frame {:>5}  eye ({:8.2}, {:7.2}, {:8.2})  look ({:5.2}, {:5.2})  speed {:6.1} ups  {}",
                    simulation.frame,
                    eye.x,
                    eye.y,
                    eye.z,
                    look.x,
                    look.z,
                    player.horizontal_speed(),
                    if player.on_ground() { "ground" } else { "air" }
                );
            }
        }
    }

    if let Some(player) = simulation.get_player(player_id) {
        println!(
            "{} frames: final position {}, speed {:.1}",
            simulation.frame,
            player.position(),
            player.horizontal_speed()
        );
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quake_preset_without_config() {
        let args = Args::try_parse_from(["brushwalk", "--quake"]).unwrap();
        assert!(args.quake);
        assert!(args.config.is_none());
    }

    #[test]
    fn test_quake_conflicts_with_config_file() {
        let err = Args::try_parse_from(["brushwalk", "--quake", "--config", "sim.json"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::ArgumentConflict);
    }

    #[test]
    fn test_scripted_input_jumps_on_beat() {
        let args = Args::try_parse_from(["brushwalk", "--jump-every", "30", "--strafe=-2"]).unwrap();

        let input = scripted_input(&args, 60);
        assert!(input.jump);
        assert!(input.movement.forward && input.movement.left);
        assert!(!scripted_input(&args, 61).jump);
    }
}

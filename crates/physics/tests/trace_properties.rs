//! Property tests for swept-box traces and the movement integrator.

use brushwalk_physics::collision::box_planes;
use brushwalk_physics::{
    clip_box_to_planes, CollisionWorld, ContentFlags, MovementConfig, MovementState,
    PlayerCommand, PlayerController, Trace,
};
use glam::DVec3;
use proptest::prelude::*;

const MINS: DVec3 = DVec3::new(-16.0, 0.0, -16.0);
const MAXS: DVec3 = DVec3::new(16.0, 72.0, 16.0);

fn create_test_world() -> CollisionWorld {
    let mut world = CollisionWorld::new();
    world.add_box(
        DVec3::new(0.0, -8.0, 0.0),
        DVec3::new(1024.0, 8.0, 1024.0),
        ContentFlags::SOLID,
    );
    world.add_box(
        DVec3::new(200.0, 64.0, 0.0),
        DVec3::new(32.0, 64.0, 32.0),
        ContentFlags::SOLID,
    );
    world.add_box(
        DVec3::new(-150.0, 8.0, 120.0),
        DVec3::new(40.0, 8.0, 40.0),
        ContentFlags::SOLID,
    );
    world
}

fn point() -> impl Strategy<Value = DVec3> {
    (-400.0..400.0f64, -40.0..200.0f64, -400.0..400.0f64).prop_map(|(x, y, z)| DVec3::new(x, y, z))
}

fn direction() -> impl Strategy<Value = DVec3> {
    (-1.0..1.0f64, -1.0..1.0f64)
        .prop_map(|(x, z)| DVec3::new(x, 0.0, z))
        .prop_filter("non-zero wish", |d| d.length_squared() > 1e-6)
}

proptest! {
    #[test]
    fn fraction_stays_in_unit_range(start in point(), end in point()) {
        let world = create_test_world();
        let trace = world.trace(start, end, MINS, MAXS, ContentFlags::MASK_PLAYER_SOLID);

        prop_assert!((0.0..=1.0).contains(&trace.fraction));
        if trace.all_solid {
            prop_assert!(trace.start_solid);
        }
        if trace.start_solid {
            prop_assert_eq!(trace.fraction, 0.0);
            prop_assert_eq!(trace.end_position, start);
        }
    }

    #[test]
    fn end_position_follows_fraction(start in point(), end in point()) {
        let world = create_test_world();
        let trace = world.box_trace(start, end, MINS, MAXS, ContentFlags::MASK_PLAYER_SOLID);

        if trace.fraction == 1.0 {
            prop_assert_eq!(trace.end_position, end);
            prop_assert!(trace.plane.is_none());
        } else {
            let expected = start + (end - start) * trace.fraction;
            prop_assert!(trace.end_position.abs_diff_eq(expected, 1e-9));
        }
    }

    #[test]
    fn blocked_end_is_clear(start in point(), end in point()) {
        let world = create_test_world();
        let trace = world.trace(start, end, MINS, MAXS, ContentFlags::MASK_PLAYER_SOLID);

        if !trace.start_solid {
            prop_assert!(world.position_is_clear(
                trace.end_position,
                MINS,
                MAXS,
                ContentFlags::MASK_PLAYER_SOLID,
            ));
        }
    }

    #[test]
    fn prior_fraction_only_tightens(
        start in point(),
        end in point(),
        prior_fraction in 0.0..=1.0f64,
    ) {
        let planes = box_planes(DVec3::new(-64.0, -64.0, -64.0), DVec3::new(64.0, 64.0, 64.0));
        let prior = Trace {
            fraction: prior_fraction,
            ..Trace::default()
        };

        let trace = clip_box_to_planes(MINS, MAXS, start, end, &planes, prior);

        prop_assert!(trace.fraction <= prior_fraction);
        if trace.fraction < prior_fraction {
            prop_assert!(trace.plane.is_some());
        }
    }

    #[test]
    fn air_acceleration_respects_cap(
        wish in direction(),
        initial in (-600.0..600.0f64, -600.0..600.0f64),
        delta_time in 0.001..0.25f64,
    ) {
        let world = CollisionWorld::new();
        let controller = PlayerController::with_default_config();
        let cap = controller.config.air_speed_cap;

        let mut state = MovementState::new(DVec3::new(0.0, 10_000.0, 0.0));
        state.velocity = DVec3::new(initial.0, 0.0, initial.1);
        let before = state.velocity.dot(wish.normalize());

        controller
            .update(&mut state, &PlayerCommand::new(wish, false), &world, delta_time)
            .unwrap();

        let after = state.velocity.dot(wish.normalize());
        prop_assert!(after <= before.max(cap) + 1e-9);
    }

    #[test]
    fn grounded_players_have_no_vertical_velocity(
        wish in direction(),
        jump_tick in 0usize..40,
        ticks in 1usize..80,
    ) {
        let world = create_test_world();
        let controller = PlayerController::new(MovementConfig::default());
        let mut state = MovementState::default();
        controller.spawn_at(&mut state, DVec3::new(0.0, 4.0, -100.0), &world).unwrap();

        for tick in 0..ticks {
            let command = PlayerCommand::new(wish, tick == jump_tick);
            controller.update(&mut state, &command, &world, 1.0 / 60.0).unwrap();
            if state.on_ground {
                prop_assert_eq!(state.velocity.y, 0.0);
            }
            prop_assert!(state.position.is_finite());
        }
    }
}

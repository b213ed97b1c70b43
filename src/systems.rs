//! Core controller systems.
//!
//! These systems are backend-agnostic. Backends build a [`RayCaster`] from
//! their own world state and call [`advance_controller`] for every body;
//! everything else here runs unchanged for any backend.

use bevy::prelude::*;

use crate::backend::RayCaster;
use crate::camera::{follow_step, FollowCamera};
use crate::config::ControllerConfig;
use crate::controller::{BodyBounds, PlatformerController};
use crate::intent::PlatformerIntent;
use crate::state::{Airborne, Grounded, OnSlope, TouchingCeiling, TouchingWall};

/// Fixed timestep delta, with fallback for testing scenarios.
pub fn fixed_delta(time: &Time<Fixed>) -> f32 {
    Some(time.delta_secs())
        .filter(|&d| d > 0.0)
        .unwrap_or(1.0 / 60.0)
}

/// Run one controller step for a body and commit the movement to its
/// `Transform`. Returns the applied movement.
///
/// Latched jump edges on the intent are consumed; a missing intent means
/// no input.
pub fn advance_controller(
    controller: &mut PlatformerController,
    config: &ControllerConfig,
    bounds: &BodyBounds,
    transform: &mut Transform,
    intent: Option<&mut PlatformerIntent>,
    dt: f32,
    caster: &impl RayCaster,
) -> Vec2 {
    let input = intent
        .map(PlatformerIntent::take_frame_input)
        .unwrap_or_default();

    let mut position = transform.translation.xy();
    let movement = controller.step(config, bounds, &mut position, input, dt, caster);
    transform.translation.x = position.x;
    transform.translation.y = position.y;
    movement
}

/// Rebuild newly added controllers from their config.
///
/// Jump kinematics are derived here once. A controller whose config does
/// not validate is removed so it never runs.
pub fn prepare_controllers(
    mut commands: Commands,
    mut q_controllers: Query<
        (Entity, &ControllerConfig, &mut PlatformerController),
        Added<PlatformerController>,
    >,
) {
    for (entity, config, mut controller) in &mut q_controllers {
        match PlatformerController::new(config) {
            Ok(fresh) => *controller = fresh,
            Err(err) => {
                error!("{entity}: {err}; controller disabled");
                commands.entity(entity).remove::<PlatformerController>();
            }
        }
    }
}

/// Sync state marker components with the last controller step.
pub fn sync_state_markers(
    mut commands: Commands,
    q_controllers: Query<(
        Entity,
        &PlatformerController,
        Has<Grounded>,
        Has<Airborne>,
        Has<OnSlope>,
        Option<&TouchingWall>,
        Has<TouchingCeiling>,
    )>,
) {
    for (entity, controller, has_grounded, has_airborne, has_slope, wall, has_ceiling) in
        &q_controllers
    {
        let motion = controller.motion();
        let mut entity_commands = commands.entity(entity);

        // Sync Grounded/Airborne
        if motion.grounded && !has_grounded {
            debug!("{entity} grounded");
            entity_commands.insert(Grounded).remove::<Airborne>();
        } else if !motion.grounded && (has_grounded || !has_airborne) {
            if has_grounded {
                debug!("{entity} airborne, {} jumps used", controller.jumps_used());
            }
            entity_commands.insert(Airborne).remove::<Grounded>();
        }

        if motion.on_slope && !has_slope {
            entity_commands.insert(OnSlope);
        } else if !motion.on_slope && has_slope {
            entity_commands.remove::<OnSlope>();
        }

        let wall_direction = Vec2::new(motion.wall_direction, 0.0);
        match (motion.wall_bumped, wall) {
            (true, Some(wall)) if wall.direction == wall_direction => {}
            (true, _) => {
                entity_commands.insert(TouchingWall::new(wall_direction));
            }
            (false, Some(_)) => {
                entity_commands.remove::<TouchingWall>();
            }
            (false, None) => {}
        }

        if motion.ceiling_bumped && !has_ceiling {
            entity_commands.insert(TouchingCeiling);
        } else if !motion.ceiling_bumped && has_ceiling {
            entity_commands.remove::<TouchingCeiling>();
        }
    }
}

/// Move [`FollowCamera`] entities towards their targets.
pub fn follow_cameras(
    time: Res<Time>,
    q_targets: Query<&GlobalTransform, Without<FollowCamera>>,
    mut q_followers: Query<(&FollowCamera, &mut Transform)>,
) {
    let dt = time.delta_secs();
    for (follow, mut transform) in &mut q_followers {
        let Ok(target) = q_targets.get(follow.target) else {
            continue;
        };
        let next = follow_step(
            transform.translation.xy(),
            target.translation().xy(),
            follow.offset,
            follow.lag,
            dt,
        );
        transform.translation.x = next.x;
        transform.translation.y = next.y;
    }
}

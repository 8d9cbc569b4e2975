use bevy::prelude::*;
use bevy::window::PrimaryWindow;

use super::components::{Boost, Diver, DiverInput, Facing, SwimState, SWIM_SPEED_THRESHOLD};
use crate::camera::CameraFollow;
use crate::config::DiverConfig;
use crate::physics::{Collider, Velocity};
use crate::world::WorldBounds;

/// Swim direction from WASD or the arrow keys, normalized.
pub fn movement_axis(keyboard_input: &ButtonInput<KeyCode>) -> Vec2 {
    let mut direction = Vec2::ZERO;

    if keyboard_input.any_pressed([KeyCode::KeyW, KeyCode::ArrowUp]) {
        direction.y += 1.0;
    }
    if keyboard_input.any_pressed([KeyCode::KeyS, KeyCode::ArrowDown]) {
        direction.y -= 1.0;
    }
    if keyboard_input.any_pressed([KeyCode::KeyA, KeyCode::ArrowLeft]) {
        direction.x -= 1.0;
    }
    if keyboard_input.any_pressed([KeyCode::KeyD, KeyCode::ArrowRight]) {
        direction.x += 1.0;
    }

    direction.normalize_or_zero()
}

pub fn read_input(
    keyboard_input: Res<ButtonInput<KeyCode>>,
    mouse_input: Res<ButtonInput<MouseButton>>,
    windows: Query<&Window, With<PrimaryWindow>>,
    cameras: Query<(&Camera, &GlobalTransform), With<CameraFollow>>,
    mut query: Query<&mut DiverInput, With<Diver>>,
) {
    let Ok(mut input) = query.get_single_mut() else {
        return;
    };

    input.movement = movement_axis(&keyboard_input);
    input.fire = mouse_input.pressed(MouseButton::Left) || keyboard_input.pressed(KeyCode::Space);
    if keyboard_input.any_just_pressed([KeyCode::ShiftLeft, KeyCode::ShiftRight]) {
        input.boost_requested = true;
    }

    let (Ok(window), Ok((camera, camera_transform))) = (windows.get_single(), cameras.get_single())
    else {
        return;
    };

    // Cursor outside the window keeps the last aim
    if let Some(cursor) = window.cursor_position() {
        if let Ok(world_position) = camera.viewport_to_world_2d(camera_transform, cursor) {
            input.aim_target = Some(world_position);
        }
    }
}

/// Move `current` toward `target` by at most `max_delta`.
pub fn steer(current: Vec2, target: Vec2, max_delta: f32) -> Vec2 {
    let delta = target - current;
    let distance = delta.length();
    if distance <= max_delta || distance <= f32::EPSILON {
        target
    } else {
        current + delta / distance * max_delta
    }
}

pub fn swim(
    time: Res<Time>,
    config: Res<DiverConfig>,
    mut query: Query<(&mut DiverInput, &mut Boost, &mut Velocity, &Facing), With<Diver>>,
) {
    let dt = time.delta_secs();
    let movement = &config.movement;

    for (mut input, mut boost, mut velocity, facing) in query.iter_mut() {
        boost.tick(dt, movement.boost_cooldown);

        if input.boost_requested {
            input.boost_requested = false;
            if boost.try_start(movement.boost_duration) {
                debug!("Boost started");
            }
        }

        if boost.is_active() {
            // A boost with no input dashes the way the diver faces
            let direction = if input.movement == Vec2::ZERO {
                Vec2::X * facing.sign()
            } else {
                input.movement
            };
            let target = direction * movement.max_speed * movement.boost_multiplier;
            velocity.0 = steer(
                velocity.0,
                target,
                movement.acceleration * movement.boost_multiplier * dt,
            );
        } else if input.movement != Vec2::ZERO {
            let target = input.movement * movement.max_speed;
            velocity.0 = steer(velocity.0, target, movement.acceleration * dt);
        } else {
            velocity.0.y += movement.buoyancy * dt;
        }
    }
}

/// Clamp `position` so a circle of `radius` stays inside `bounds`.
/// Returns the clamped position and which axes were clamped.
pub fn clamp_inside(position: Vec2, radius: f32, bounds: Rect) -> (Vec2, BVec2) {
    let inset = bounds.inflate(-radius);
    let clamped = position.clamp(inset.min, inset.max);
    (clamped, BVec2::new(clamped.x != position.x, clamped.y != position.y))
}

pub fn clamp_to_bounds(
    bounds: Res<WorldBounds>,
    mut query: Query<(&mut Transform, &mut Velocity, &Collider), With<Diver>>,
) {
    for (mut transform, mut velocity, collider) in query.iter_mut() {
        let (clamped, hit) = clamp_inside(
            transform.translation.truncate(),
            collider.bounding_radius(),
            bounds.0,
        );
        if hit.x {
            velocity.0.x = 0.0;
        }
        if hit.y {
            velocity.0.y = 0.0;
        }
        transform.translation.x = clamped.x;
        transform.translation.y = clamped.y;
    }
}

pub fn update_swim_state(mut query: Query<(&Boost, &Velocity, &mut SwimState), With<Diver>>) {
    for (boost, velocity, mut state) in query.iter_mut() {
        let next = if boost.is_active() {
            SwimState::Boosting
        } else if velocity.0.length() > SWIM_SPEED_THRESHOLD {
            SwimState::Swimming
        } else {
            SwimState::Idle
        };

        // Only write on change so change detection stays meaningful
        if *state != next {
            *state = next;
        }
    }
}

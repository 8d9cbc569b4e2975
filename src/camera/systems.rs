use bevy::prelude::*;

use super::components::{CameraBounds, CameraFollow, CameraSnap};

/// Fraction of the remaining distance to close this frame.
pub fn smoothing_factor(smoothing: f32, dt: f32) -> f32 {
    if smoothing <= 0.0 {
        1.0
    } else {
        1.0 - (-smoothing * dt).exp()
    }
}

/// Clamp a camera `center` so a view of `half_view` stays inside `bounds`.
/// On an axis where the view is wider than the bounds, center on the bounds.
pub fn clamp_camera_center(center: Vec2, half_view: Vec2, bounds: Rect) -> Vec2 {
    let axis = |value: f32, half: f32, min: f32, max: f32| {
        if max - min <= half * 2.0 {
            (min + max) / 2.0
        } else {
            value.clamp(min + half, max - half)
        }
    };

    Vec2::new(
        axis(center.x, half_view.x, bounds.min.x, bounds.max.x),
        axis(center.y, half_view.y, bounds.min.y, bounds.max.y),
    )
}

fn half_view(projection: Option<&OrthographicProjection>) -> Vec2 {
    projection.map_or(Vec2::ZERO, |projection| projection.area.half_size())
}

/// Runs after gameplay moved the target, before transforms propagate.
pub fn follow_target(
    time: Res<Time>,
    targets: Query<&Transform, Without<CameraFollow>>,
    mut cameras: Query<
        (
            &mut Transform,
            &CameraFollow,
            Option<&CameraBounds>,
            Option<&OrthographicProjection>,
        ),
        Without<CameraSnap>,
    >,
) {
    for (mut transform, follow, bounds, projection) in cameras.iter_mut() {
        let Ok(target) = targets.get(follow.target) else {
            continue;
        };

        let desired = target.translation.truncate() + follow.offset;
        let current = transform.translation.truncate();
        let t = smoothing_factor(follow.smoothing, time.delta_secs());
        let mut next = current.lerp(desired, t);

        if let Some(bounds) = bounds {
            next = clamp_camera_center(next, half_view(projection), bounds.0);
        }

        transform.translation.x = next.x;
        transform.translation.y = next.y;
    }
}

/// Puts the camera straight on its target so play does not start with a pan.
/// The view is only sized by the renderer during the first frames, so this
/// repeats until the camera reports a viewport.
pub fn snap_camera_to_target(
    mut commands: Commands,
    targets: Query<&Transform, Without<CameraFollow>>,
    mut cameras: Query<
        (
            Entity,
            &mut Transform,
            &CameraFollow,
            Option<&CameraBounds>,
            Option<&OrthographicProjection>,
            Option<&Camera>,
        ),
        With<CameraSnap>,
    >,
) {
    for (entity, mut transform, follow, bounds, projection, camera) in cameras.iter_mut() {
        let Ok(target) = targets.get(follow.target) else {
            continue;
        };

        let mut next = target.translation.truncate() + follow.offset;
        if let Some(bounds) = bounds {
            next = clamp_camera_center(next, half_view(projection), bounds.0);
        }
        transform.translation.x = next.x;
        transform.translation.y = next.y;

        let sized = camera.map_or(true, |camera| camera.logical_viewport_size().is_some());
        if sized {
            commands.entity(entity).remove::<CameraSnap>();
        }
    }
}

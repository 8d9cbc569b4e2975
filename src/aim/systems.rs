use std::f32::consts::{PI, TAU};

use bevy::prelude::*;

use super::components::{AimDirection, Arm, FacingSprite, MirrorWithFacing};
use crate::config::DiverConfig;
use crate::player::{Diver, DiverInput, Facing};

/// Facing implied by `aim`. Inside the deadzone the current facing is kept
/// so a near-vertical aim does not flicker.
pub fn resolve_facing(aim: Vec2, current: Facing, deadzone: f32) -> Facing {
    if aim.x > deadzone {
        Facing::Right
    } else if aim.x < -deadzone {
        Facing::Left
    } else {
        current
    }
}

/// Local arm rotation for `aim`. A left-facing arm sprite is flipped, so its
/// rotation is offset by half a turn to keep it pointing along the aim.
pub fn arm_angle(aim: Vec2, facing: Facing) -> f32 {
    let angle = aim.y.atan2(aim.x);
    match facing {
        Facing::Right => angle,
        Facing::Left => {
            let offset = angle - PI;
            if offset < -PI {
                offset + TAU
            } else {
                offset
            }
        }
    }
}

/// `base` as seen by a diver with `facing`.
pub fn mirror_offset(base: Vec2, facing: Facing) -> Vec2 {
    Vec2::new(base.x * facing.sign(), base.y)
}

/// Launch direction of a fire point with world `rotation` on a diver with `facing`.
pub fn muzzle_direction(rotation: Quat, facing: Facing) -> Vec2 {
    (rotation * Vec3::X).truncate().normalize_or_zero() * facing.sign()
}

pub fn update_aim_direction(
    config: Res<DiverConfig>,
    mut query: Query<(&Transform, &Facing, &DiverInput, &mut AimDirection), With<Diver>>,
) {
    let pivot_offset = Vec2::from(config.aim.arm_pivot);

    for (transform, facing, input, mut aim) in query.iter_mut() {
        let Some(target) = input.aim_target else {
            continue;
        };

        let pivot = transform.translation.truncate() + mirror_offset(pivot_offset, *facing);
        let direction = (target - pivot).normalize_or_zero();
        if direction != Vec2::ZERO && aim.0 != direction {
            aim.0 = direction;
        }
    }
}

pub fn update_facing(
    config: Res<DiverConfig>,
    mut query: Query<(&AimDirection, &mut Facing), With<Diver>>,
) {
    for (aim, mut facing) in query.iter_mut() {
        let next = resolve_facing(aim.0, *facing, config.aim.flip_deadzone);
        if *facing != next {
            debug!("Diver now facing {:?}", next);
            *facing = next;
        }
    }
}

pub fn sync_facing_sprites(
    owners: Query<&Facing>,
    mut sprites: Query<(&FacingSprite, &mut Sprite)>,
) {
    for (facing_sprite, mut sprite) in sprites.iter_mut() {
        let Ok(facing) = owners.get(facing_sprite.owner) else {
            continue;
        };
        let flip = facing.is_left();
        if sprite.flip_x != flip {
            sprite.flip_x = flip;
        }
    }
}

pub fn sync_mirrored_offsets(
    owners: Query<&Facing>,
    mut mirrored: Query<(&MirrorWithFacing, &mut Transform)>,
) {
    for (mirror, mut transform) in mirrored.iter_mut() {
        let Ok(facing) = owners.get(mirror.owner) else {
            continue;
        };
        let offset = mirror_offset(mirror.base_offset, *facing);
        transform.translation.x = offset.x;
        transform.translation.y = offset.y;
    }
}

pub fn sync_arm_rotation(
    owners: Query<(&Facing, &AimDirection)>,
    mut arms: Query<(&Arm, &mut Transform)>,
) {
    for (arm, mut transform) in arms.iter_mut() {
        let Ok((facing, aim)) = owners.get(arm.owner) else {
            continue;
        };
        transform.rotation = Quat::from_rotation_z(arm_angle(aim.0, *facing));
    }
}

//! Aiming and facing.
//!
//! The diver's `Facing` is resolved once per frame from the aim direction and
//! then pushed to everything that mirrors with it: flipped sprites, the arm's
//! rotation offset, the fire point and the helmet bubble vent.

pub mod components;
pub mod systems;

use bevy::prelude::*;

pub use components::{AimDirection, Arm, FacingSprite, FirePoint, MirrorWithFacing};

use crate::game_state::GameSet;
use systems::{
    sync_arm_rotation, sync_facing_sprites, sync_mirrored_offsets, update_aim_direction,
    update_facing,
};

pub struct AimPlugin;

impl Plugin for AimPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            (
                update_aim_direction,
                update_facing,
                sync_facing_sprites,
                sync_mirrored_offsets,
                sync_arm_rotation,
            )
                .chain()
                .in_set(GameSet::Aim),
        );
    }
}

pub mod components;
pub mod systems;

use bevy::prelude::*;

pub use components::{Health, ProjectileFired, ProjectileHit, Target, TargetDestroyed, Weapon};

use crate::game_state::GameSet;
use systems::{destroy_dead_targets, expire_projectiles, fire_weapon, handle_projectile_hits};

pub struct WeaponPlugin;

impl Plugin for WeaponPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<ProjectileFired>()
            .add_event::<ProjectileHit>()
            .add_event::<TargetDestroyed>()
            .add_systems(
                Update,
                (
                    fire_weapon,
                    handle_projectile_hits,
                    destroy_dead_targets,
                    expire_projectiles,
                )
                    .chain()
                    .in_set(GameSet::Act),
            );
    }
}

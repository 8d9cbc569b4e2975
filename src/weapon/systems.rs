use std::collections::HashSet;

use bevy::prelude::*;
use bevy::transform::helper::TransformHelper;

use super::components::{
    Health, Projectile, ProjectileFired, ProjectileHit, Target, TargetDestroyed, Weapon,
};
use crate::aim::{systems::muzzle_direction, FirePoint};
use crate::config::{DiverConfig, WeaponConfig};
use crate::physics::{Collider, CollisionIgnore, Sensor, TriggerEntered, Velocity};
use crate::player::{Diver, DiverInput, Facing};
use crate::world::WorldBounds;

const PROJECTILE_Z: f32 = 5.0;
const PROJECTILE_COLOR: Color = Color::srgb(0.95, 0.85, 0.3);

/// Components of a freshly fired projectile.
pub fn projectile_bundle(
    shooter: Entity,
    position: Vec2,
    velocity: Vec2,
    weapon: &WeaponConfig,
) -> impl Bundle {
    (
        Projectile {
            shooter,
            damage: weapon.projectile_damage,
            age: 0.0,
            lifetime: weapon.projectile_lifetime,
        },
        Sprite::from_color(PROJECTILE_COLOR, Vec2::splat(weapon.projectile_radius * 2.0)),
        Transform::from_translation(position.extend(PROJECTILE_Z)),
        Velocity(velocity),
        Collider::circle(weapon.projectile_radius),
        Sensor,
        // Spawned inside the shooter's collider, so skip it for a moment
        CollisionIgnore::with(shooter, weapon.shooter_ignore_secs),
    )
}

pub fn fire_weapon(
    mut commands: Commands,
    time: Res<Time>,
    config: Res<DiverConfig>,
    transform_helper: TransformHelper,
    mut divers: Query<(Entity, &DiverInput, &Facing, &Velocity, &mut Weapon), With<Diver>>,
    fire_points: Query<(Entity, &FirePoint)>,
    mut fired: EventWriter<ProjectileFired>,
) {
    let weapon_config = &config.weapon;

    for (shooter, input, facing, shooter_velocity, mut weapon) in divers.iter_mut() {
        weapon.cooldown = (weapon.cooldown - time.delta_secs()).max(0.0);
        if !input.fire || weapon.cooldown > 0.0 {
            continue;
        }

        let Some((fire_point, _)) = fire_points.iter().find(|(_, fp)| fp.owner == shooter) else {
            continue;
        };
        let Ok(muzzle) = transform_helper.compute_global_transform(fire_point) else {
            warn!("Fire point {:?} has a broken hierarchy", fire_point);
            continue;
        };

        let (_, rotation, translation) = muzzle.to_scale_rotation_translation();
        let direction = muzzle_direction(rotation, *facing);
        if direction == Vec2::ZERO {
            continue;
        }

        let mut velocity = direction * weapon_config.projectile_speed;
        if weapon_config.inherit_shooter_velocity {
            velocity += shooter_velocity.0;
        }

        let position = translation.truncate();
        let projectile = commands
            .spawn(projectile_bundle(shooter, position, velocity, weapon_config))
            .id();
        weapon.cooldown = weapon_config.fire_interval;

        debug!("Fired {:?} from {:?} toward {:?}", projectile, position, direction);
        fired.send(ProjectileFired {
            projectile,
            shooter,
            position,
        });
    }
}

pub fn expire_projectiles(
    mut commands: Commands,
    time: Res<Time>,
    bounds: Res<WorldBounds>,
    mut query: Query<(Entity, &mut Projectile, &Transform)>,
) {
    for (entity, mut projectile, transform) in query.iter_mut() {
        projectile.age += time.delta_secs();
        let outside = !bounds.0.contains(transform.translation.truncate());

        if projectile.age >= projectile.lifetime || outside {
            commands.entity(entity).despawn_recursive();
        }
    }
}

pub fn handle_projectile_hits(
    mut commands: Commands,
    mut triggers: EventReader<TriggerEntered>,
    projectiles: Query<(&Projectile, &Transform)>,
    solids: Query<(), (With<Collider>, Without<Sensor>)>,
    mut healths: Query<&mut Health>,
    mut hits: EventWriter<ProjectileHit>,
) {
    let mut spent = HashSet::new();

    for trigger in triggers.read() {
        if spent.contains(&trigger.sensor) {
            continue;
        }
        let Ok((projectile, transform)) = projectiles.get(trigger.sensor) else {
            continue;
        };
        if solids.get(trigger.other).is_err() {
            continue;
        }

        if let Ok(mut health) = healths.get_mut(trigger.other) {
            health.0 -= projectile.damage;
        }

        spent.insert(trigger.sensor);
        commands.entity(trigger.sensor).despawn_recursive();
        hits.send(ProjectileHit {
            projectile: trigger.sensor,
            target: trigger.other,
            position: transform.translation.truncate(),
        });
    }
}

pub fn destroy_dead_targets(
    mut commands: Commands,
    targets: Query<(Entity, &Health, &Transform), (With<Target>, Changed<Health>)>,
    mut destroyed: EventWriter<TargetDestroyed>,
) {
    for (entity, health, transform) in targets.iter() {
        if health.0 > 0.0 {
            continue;
        }

        info!("Target {:?} destroyed", entity);
        commands.entity(entity).despawn_recursive();
        destroyed.send(TargetDestroyed {
            target: entity,
            position: transform.translation.truncate(),
        });
    }
}

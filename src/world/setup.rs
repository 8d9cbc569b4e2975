use bevy::prelude::*;

use super::WorldBounds;
use crate::aim::{AimDirection, Arm, FacingSprite, FirePoint, MirrorWithFacing};
use crate::bubbles::{BreathCycle, BubbleEmitter, TrailEmitter};
use crate::camera::{CameraBounds, CameraFollow, CameraSnap};
use crate::config::DiverConfig;
use crate::physics::{Collider, StaticBody, Velocity, WaterDrag};
use crate::player::{Boost, Diver, DiverInput, Facing, SwimState};
use crate::weapon::{Health, Target, Weapon};

const BACKDROP_Z: f32 = -10.0;
const TARGET_Z: f32 = 0.0;
const DIVER_Z: f32 = 10.0;

/// Behind the diver's hips, for a right-facing diver.
const TRAIL_OFFSET: Vec2 = Vec2::new(-16.0, -6.0);
const SEABED_HEIGHT: f32 = 40.0;

pub fn setup_world(mut commands: Commands, config: Res<DiverConfig>) {
    let bounds = config.world.bounds();
    commands.insert_resource(WorldBounds(bounds));

    // Surface line and seabed strip
    commands.spawn((
        Sprite::from_color(Color::srgba(0.7, 0.9, 1.0, 0.5), Vec2::new(bounds.width(), 4.0)),
        Transform::from_xyz(bounds.center().x, bounds.max.y, BACKDROP_Z),
    ));
    commands.spawn((
        Sprite::from_color(
            Color::srgb(0.35, 0.3, 0.22),
            Vec2::new(bounds.width(), SEABED_HEIGHT),
        ),
        Transform::from_xyz(
            bounds.center().x,
            bounds.min.y + SEABED_HEIGHT / 2.0,
            BACKDROP_Z,
        ),
    ));

    for target in &config.world.targets {
        let size = Vec2::from(target.size);
        commands.spawn((
            Target,
            Health(target.health),
            Collider::rect(size),
            StaticBody,
            Sprite::from_color(Color::srgb(0.55, 0.25, 0.3), size),
            Transform::from_translation(Vec2::from(target.position).extend(TARGET_Z)),
        ));
    }

    let diver = spawn_diver(&mut commands, &config);

    commands.spawn((
        Camera2d,
        CameraFollow {
            target: diver,
            smoothing: config.camera.smoothing,
            offset: Vec2::from(config.camera.offset),
        },
        CameraBounds(bounds),
        CameraSnap,
    ));

    info!(
        "World ready: bounds {:?}, {} targets",
        bounds,
        config.world.targets.len()
    );
}

/// The diver root plus its body, arm, fire point and bubble vents.
fn spawn_diver(commands: &mut Commands, config: &DiverConfig) -> Entity {
    let movement = &config.movement;
    let bubbles = &config.bubbles;
    let radius = movement.collider_radius;

    let diver = commands
        .spawn((
            Diver,
            Facing::default(),
            DiverInput::default(),
            Boost::default(),
            SwimState::default(),
            AimDirection::default(),
            Weapon::default(),
            Velocity::default(),
            WaterDrag(movement.water_drag),
            Collider::circle(radius),
            Transform::from_translation(Vec2::from(config.world.spawn).extend(DIVER_Z)),
            Visibility::default(),
        ))
        .id();

    let body = commands
        .spawn((
            FacingSprite { owner: diver },
            Sprite::from_color(
                Color::srgb(0.95, 0.6, 0.2),
                Vec2::new(radius * 2.4, radius * 1.4),
            ),
            Transform::default(),
        ))
        .id();

    let arm_pivot = Vec2::from(config.aim.arm_pivot);
    let arm_length = config.aim.arm_length;
    let arm = commands
        .spawn((
            Arm { owner: diver },
            FacingSprite { owner: diver },
            MirrorWithFacing {
                owner: diver,
                base_offset: arm_pivot,
            },
            // Sprite reaches from the pivot to the muzzle
            Sprite {
                anchor: bevy::sprite::Anchor::CenterLeft,
                ..Sprite::from_color(Color::srgb(0.3, 0.3, 0.35), Vec2::new(arm_length, 5.0))
            },
            Transform::from_translation(arm_pivot.extend(1.0)),
        ))
        .id();

    let muzzle = Vec2::new(arm_length, 0.0);
    let fire_point = commands
        .spawn((
            FirePoint { owner: diver },
            MirrorWithFacing {
                owner: diver,
                base_offset: muzzle,
            },
            Transform::from_translation(muzzle.extend(0.0)),
            Visibility::default(),
        ))
        .id();

    let helmet = Vec2::from(bubbles.helmet_offset);
    let vent = commands
        .spawn((
            MirrorWithFacing {
                owner: diver,
                base_offset: helmet,
            },
            BreathCycle::starting_in(bubbles.breath_interval * 0.5),
            Transform::from_translation(helmet.extend(0.0)),
            Visibility::default(),
        ))
        .id();

    let trail = commands
        .spawn((
            MirrorWithFacing {
                owner: diver,
                base_offset: TRAIL_OFFSET,
            },
            TrailEmitter { owner: diver },
            BubbleEmitter::off(bubbles.boost_spread, bubbles.boost_speed),
            Transform::from_translation(TRAIL_OFFSET.extend(0.0)),
            Visibility::default(),
        ))
        .id();

    commands.entity(arm).add_child(fire_point);
    commands
        .entity(diver)
        .add_children(&[body, arm, vent, trail]);

    diver
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::run;

    fn built_world() -> (World, DiverConfig) {
        let config = DiverConfig::default();
        let mut world = World::new();
        world.insert_resource(config.clone());
        run(&mut world, setup_world);
        (world, config)
    }

    fn diver(world: &mut World) -> Entity {
        world.query_filtered::<Entity, With<Diver>>().single(world)
    }

    #[test]
    fn inserts_bounds_and_targets() {
        let (mut world, config) = built_world();

        assert_eq!(world.resource::<WorldBounds>().0, config.world.bounds());

        let mut targets = world.query_filtered::<&Health, (With<Target>, With<StaticBody>, With<Collider>)>();
        let healths: Vec<f32> = targets.iter(&world).map(|health| health.0).collect();
        assert_eq!(healths.len(), config.world.targets.len());
        for target in &config.world.targets {
            assert!(healths.contains(&target.health));
        }
    }

    #[test]
    fn fire_point_hangs_off_the_arm() {
        let (mut world, config) = built_world();
        let diver = diver(&mut world);

        let mut fire_points = world.query::<(&FirePoint, &Parent, &MirrorWithFacing)>();
        let (fire_point, parent, mirror) = fire_points.single(&world);
        assert_eq!(fire_point.owner, diver);
        assert_eq!(mirror.base_offset, Vec2::new(config.aim.arm_length, 0.0));

        let arm = world.get::<Arm>(parent.get()).unwrap();
        assert_eq!(arm.owner, diver);
        let arm_parent = world.get::<Parent>(parent.get()).unwrap();
        assert_eq!(arm_parent.get(), diver);
    }

    #[test]
    fn vents_mirror_with_the_diver() {
        let (mut world, config) = built_world();
        let diver = diver(&mut world);

        let mut vents = world.query_filtered::<(&MirrorWithFacing, &Parent), With<BreathCycle>>();
        let (mirror, parent) = vents.single(&world);
        assert_eq!(mirror.owner, diver);
        assert_eq!(parent.get(), diver);
        assert_eq!(mirror.base_offset, Vec2::from(config.bubbles.helmet_offset));

        let mut trails = world.query::<(&TrailEmitter, &MirrorWithFacing, &BubbleEmitter, &Parent)>();
        let (trail, mirror, emitter, parent) = trails.single(&world);
        assert_eq!(trail.owner, diver);
        assert_eq!(mirror.base_offset, TRAIL_OFFSET);
        assert_eq!(emitter.rate, 0.0);
        assert_eq!(parent.get(), diver);
    }

    #[test]
    fn camera_follows_the_diver() {
        let (mut world, config) = built_world();
        let diver = diver(&mut world);

        let mut cameras = world.query_filtered::<(&CameraFollow, &CameraBounds), With<CameraSnap>>();
        let (follow, bounds) = cameras.single(&world);
        assert_eq!(follow.target, diver);
        assert_eq!(follow.offset, Vec2::from(config.camera.offset));
        assert_eq!(bounds.0, config.world.bounds());
    }
}

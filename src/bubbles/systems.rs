use std::f32::consts::TAU;

use bevy::prelude::*;
use bevy::transform::helper::TransformHelper;
use rand::Rng;

use super::components::{BreathCycle, Bubble, BubbleEmitter, BubbleRng, TrailEmitter};
use crate::config::{BubbleConfig, DiverConfig};
use crate::physics::{CollisionStarted, Velocity};
use crate::player::{Diver, Facing, SwimState, SWIM_SPEED_THRESHOLD};
use crate::weapon::{ProjectileFired, ProjectileHit, TargetDestroyed};
use crate::world::WorldBounds;

const BUBBLE_Z: f32 = 8.0;
const BUBBLE_COLOR: Color = Color::srgba(0.8, 0.93, 1.0, 0.75);

const MUZZLE_BUBBLES: u32 = 2;
const HIT_BUBBLES: u32 = 5;
const DESTROYED_BUBBLES: u32 = 14;
const BUMP_BUBBLES: u32 = 3;
const BURST_SPEED: f32 = 80.0;

/// Trail direction: straight back along the velocity, or behind the diver
/// when it is barely moving.
pub fn trail_direction(velocity: Vec2, facing: Facing) -> Vec2 {
    if velocity.length() > SWIM_SPEED_THRESHOLD {
        -velocity.normalize()
    } else {
        Vec2::NEG_X * facing.sign()
    }
}

fn trail_rate(state: SwimState, config: &BubbleConfig) -> f32 {
    match state {
        SwimState::Idle => 0.0,
        SwimState::Swimming => config.swim_rate,
        SwimState::Boosting => config.boost_rate,
    }
}

pub fn spawn_bubble(
    commands: &mut Commands,
    rng: &mut impl Rng,
    config: &BubbleConfig,
    position: Vec2,
    velocity: Vec2,
) -> Entity {
    let size = config.size * rng.gen_range(0.6..=1.3);
    commands
        .spawn((
            Bubble {
                velocity,
                age: 0.0,
                lifetime: config.lifetime * rng.gen_range(0.7..=1.0),
                phase: rng.gen_range(0.0..TAU),
            },
            Sprite::from_color(BUBBLE_COLOR, Vec2::splat(size)),
            Transform::from_translation(position.extend(BUBBLE_Z)),
        ))
        .id()
}

/// Radial puff of `count` bubbles, used for shots and impacts.
pub fn spawn_burst(
    commands: &mut Commands,
    rng: &mut impl Rng,
    config: &BubbleConfig,
    position: Vec2,
    count: u32,
) {
    for _ in 0..count {
        let direction = Vec2::from_angle(rng.gen_range(0.0..TAU));
        let speed = BURST_SPEED * rng.gen_range(0.4..=1.0);
        spawn_bubble(commands, rng, config, position, direction * speed);
    }
}

pub fn sync_trail_emitters(
    config: Res<DiverConfig>,
    divers: Query<(&SwimState, &Velocity, &Facing)>,
    mut emitters: Query<(&TrailEmitter, &mut BubbleEmitter)>,
) {
    for (trail, mut emitter) in emitters.iter_mut() {
        let Ok((state, velocity, facing)) = divers.get(trail.owner) else {
            emitter.rate = 0.0;
            continue;
        };

        emitter.rate = trail_rate(*state, &config.bubbles);
        emitter.direction = trail_direction(velocity.0, *facing);
    }
}

pub fn emit_bubbles(
    mut commands: Commands,
    time: Res<Time>,
    config: Res<DiverConfig>,
    mut rng: ResMut<BubbleRng>,
    transform_helper: TransformHelper,
    mut emitters: Query<(Entity, &mut BubbleEmitter)>,
) {
    for (entity, mut emitter) in emitters.iter_mut() {
        let due = emitter.take_due(time.delta_secs());
        if due == 0 {
            continue;
        }
        let Ok(origin) = transform_helper.compute_global_transform(entity) else {
            continue;
        };
        let position = origin.translation().truncate();

        for _ in 0..due {
            let jitter = rng.0.gen_range(-emitter.spread..=emitter.spread);
            let speed = emitter.speed * rng.0.gen_range(0.6..=1.0);
            let velocity = Vec2::from_angle(jitter).rotate(emitter.direction) * speed;
            spawn_bubble(&mut commands, &mut rng.0, &config.bubbles, position, velocity);
        }
    }
}

pub fn drive_breath_cycles(
    mut commands: Commands,
    time: Res<Time>,
    config: Res<DiverConfig>,
    mut rng: ResMut<BubbleRng>,
    transform_helper: TransformHelper,
    mut cycles: Query<(Entity, &mut BreathCycle)>,
) {
    let bubbles = &config.bubbles;

    for (entity, mut cycle) in cycles.iter_mut() {
        let released = cycle.tick(
            time.delta_secs(),
            bubbles.breath_interval,
            bubbles.breath_burst,
            bubbles.breath_spacing,
        );
        if released == 0 {
            continue;
        }
        let Ok(vent) = transform_helper.compute_global_transform(entity) else {
            continue;
        };
        let position = vent.translation().truncate();

        for _ in 0..released {
            // Exhaled bubbles leave with a small sideways kick
            let velocity = Vec2::new(rng.0.gen_range(-12.0..=12.0), bubbles.rise_speed * 0.5);
            spawn_bubble(&mut commands, &mut rng.0, bubbles, position, velocity);
        }
    }
}

pub fn spawn_event_bursts(
    mut commands: Commands,
    config: Res<DiverConfig>,
    mut rng: ResMut<BubbleRng>,
    mut fired: EventReader<ProjectileFired>,
    mut hits: EventReader<ProjectileHit>,
    mut destroyed: EventReader<TargetDestroyed>,
    mut bumps: EventReader<CollisionStarted>,
    divers: Query<&Transform, With<Diver>>,
) {
    let bubbles = &config.bubbles;

    for event in fired.read() {
        spawn_burst(&mut commands, &mut rng.0, bubbles, event.position, MUZZLE_BUBBLES);
    }
    for event in hits.read() {
        spawn_burst(&mut commands, &mut rng.0, bubbles, event.position, HIT_BUBBLES);
    }
    for event in destroyed.read() {
        spawn_burst(&mut commands, &mut rng.0, bubbles, event.position, DESTROYED_BUBBLES);
    }
    for event in bumps.read() {
        let Ok(diver) = divers.get(event.a).or_else(|_| divers.get(event.b)) else {
            continue;
        };
        let position = diver.translation.truncate();
        spawn_burst(&mut commands, &mut rng.0, bubbles, position, BUMP_BUBBLES);
    }
}

pub fn update_bubbles(
    mut commands: Commands,
    time: Res<Time>,
    config: Res<DiverConfig>,
    bounds: Res<WorldBounds>,
    mut bubbles: Query<(Entity, &mut Bubble, &mut Transform, &mut Sprite)>,
) {
    let dt = time.delta_secs();
    let settings = &config.bubbles;
    let rise = Vec2::new(0.0, settings.rise_speed);
    let angular = settings.wobble_frequency * TAU;
    // Initial push fades into a steady rise
    let settle = 1.0 - (-2.0 * dt).exp();

    for (entity, mut bubble, mut transform, mut sprite) in bubbles.iter_mut() {
        let previous_age = bubble.age;
        bubble.age += dt;

        if bubble.age >= bubble.lifetime || transform.translation.y >= bounds.surface_y() {
            commands.entity(entity).despawn();
            continue;
        }

        bubble.velocity = bubble.velocity.lerp(rise, settle);
        let sway = settings.wobble_amplitude
            * ((bubble.phase + bubble.age * angular).sin()
                - (bubble.phase + previous_age * angular).sin());

        transform.translation.x += bubble.velocity.x * dt + sway;
        transform.translation.y += bubble.velocity.y * dt;

        let life = bubble.age / bubble.lifetime;
        transform.scale = Vec3::splat(1.0 + 0.5 * life);
        sprite.color = BUBBLE_COLOR.with_alpha(BUBBLE_COLOR.alpha() * (1.0 - life));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{advance_time, run, time_world};

    fn bubble_world() -> World {
        let mut world = time_world();
        world.insert_resource(DiverConfig::default());
        world.insert_resource(WorldBounds(Rect::new(-1000.0, -1000.0, 1000.0, 300.0)));
        world.init_resource::<BubbleRng>();
        world.init_resource::<Events<ProjectileFired>>();
        world.init_resource::<Events<ProjectileHit>>();
        world.init_resource::<Events<TargetDestroyed>>();
        world.init_resource::<Events<CollisionStarted>>();
        world
    }

    fn bubble_count(world: &mut World) -> usize {
        world.query::<&Bubble>().iter(world).count()
    }

    fn spawn_diver(world: &mut World, state: SwimState, velocity: Vec2, facing: Facing) -> Entity {
        world.spawn((state, Velocity(velocity), facing)).id()
    }

    #[test]
    fn trail_points_against_motion() {
        let direction = trail_direction(Vec2::new(100.0, 0.0), Facing::Right);
        assert_eq!(direction, Vec2::NEG_X);

        let direction = trail_direction(Vec2::new(0.0, -50.0), Facing::Left);
        assert_eq!(direction, Vec2::Y);
    }

    #[test]
    fn still_diver_trails_behind_its_back() {
        assert_eq!(trail_direction(Vec2::ZERO, Facing::Right), Vec2::NEG_X);
        assert_eq!(trail_direction(Vec2::new(1.0, 0.0), Facing::Left), Vec2::X);
    }

    #[test]
    fn trail_rate_follows_swim_state() {
        let mut world = bubble_world();
        let config = DiverConfig::default();
        let diver = spawn_diver(&mut world, SwimState::Boosting, Vec2::new(-300.0, 0.0), Facing::Left);
        let emitter = world
            .spawn((
                TrailEmitter { owner: diver },
                BubbleEmitter::off(0.3, 90.0),
                Transform::default(),
            ))
            .id();

        run(&mut world, sync_trail_emitters);
        let state = world.get::<BubbleEmitter>(emitter).unwrap();
        assert_eq!(state.rate, config.bubbles.boost_rate);
        assert_eq!(state.direction, Vec2::X);

        world.entity_mut(diver).insert(SwimState::Idle);
        run(&mut world, sync_trail_emitters);
        assert_eq!(world.get::<BubbleEmitter>(emitter).unwrap().rate, 0.0);

        world.despawn(diver);
        world.get_mut::<BubbleEmitter>(emitter).unwrap().rate = 5.0;
        run(&mut world, sync_trail_emitters);
        assert_eq!(world.get::<BubbleEmitter>(emitter).unwrap().rate, 0.0);
    }

    #[test]
    fn emitter_spawns_at_its_position() {
        let mut world = bubble_world();
        advance_time(&mut world, 0.5);
        let mut emitter = BubbleEmitter::off(0.0, 50.0);
        emitter.rate = 8.0;
        emitter.direction = Vec2::NEG_X;
        world.spawn((emitter, Transform::from_xyz(40.0, -20.0, 0.0)));

        run(&mut world, emit_bubbles);

        let mut query = world.query::<(&Bubble, &Transform)>();
        let bubbles: Vec<_> = query.iter(&world).collect();
        assert_eq!(bubbles.len(), 4);
        for (bubble, transform) in bubbles {
            assert_eq!(transform.translation.truncate(), Vec2::new(40.0, -20.0));
            assert!(bubble.velocity.x < 0.0);
            assert!(bubble.velocity.y.abs() < 1e-3);
        }
    }

    #[test]
    fn breath_cycle_spawns_from_vent() {
        let mut world = bubble_world();
        advance_time(&mut world, 0.1);
        world.spawn((BreathCycle::starting_in(0.05), Transform::from_xyz(-10.0, 20.0, 0.0)));

        run(&mut world, drive_breath_cycles);

        // First bubble of the breath leaves right away, the rest are spaced out
        assert_eq!(bubble_count(&mut world), 1);
        let mut query = world.query::<(&Bubble, &Transform)>();
        let (bubble, transform) = query.single(&world);
        assert_eq!(transform.translation.truncate(), Vec2::new(-10.0, 20.0));
        assert!(bubble.velocity.y > 0.0);
    }

    #[test]
    fn events_spawn_bursts() {
        let mut world = bubble_world();
        let entity = world.spawn_empty().id();
        world.send_event(ProjectileHit {
            projectile: entity,
            target: entity,
            position: Vec2::ZERO,
        });
        world.send_event(TargetDestroyed {
            target: entity,
            position: Vec2::ZERO,
        });

        run(&mut world, spawn_event_bursts);

        assert_eq!(bubble_count(&mut world), (HIT_BUBBLES + DESTROYED_BUBBLES) as usize);
    }

    #[test]
    fn diver_bump_puffs_bubbles() {
        let mut world = bubble_world();
        let diver = world.spawn((Diver, Transform::from_xyz(30.0, -40.0, 0.0))).id();
        let rock = world.spawn(Transform::default()).id();
        let other = world.spawn(Transform::default()).id();
        world.send_event(CollisionStarted { a: rock, b: diver });
        world.send_event(CollisionStarted { a: rock, b: other });

        run(&mut world, spawn_event_bursts);

        // Only the bump involving the diver counts, centered on the diver
        let mut query = world.query::<(&Bubble, &Transform)>();
        let positions: Vec<Vec2> = query
            .iter(&world)
            .map(|(_, transform)| transform.translation.truncate())
            .collect();
        assert_eq!(positions.len(), BUMP_BUBBLES as usize);
        assert!(positions.iter().all(|p| *p == Vec2::new(30.0, -40.0)));
    }

    #[test]
    fn bubbles_rise_fade_and_pop() {
        let mut world = bubble_world();
        advance_time(&mut world, 0.1);
        let rising = world
            .spawn((
                Bubble {
                    velocity: Vec2::ZERO,
                    age: 0.0,
                    lifetime: 2.0,
                    phase: 0.0,
                },
                Sprite::from_color(BUBBLE_COLOR, Vec2::splat(4.0)),
                Transform::default(),
            ))
            .id();
        let old = world
            .spawn((
                Bubble {
                    velocity: Vec2::ZERO,
                    age: 1.95,
                    lifetime: 2.0,
                    phase: 0.0,
                },
                Sprite::default(),
                Transform::default(),
            ))
            .id();
        let surfaced = world
            .spawn((
                Bubble {
                    velocity: Vec2::ZERO,
                    age: 0.0,
                    lifetime: 2.0,
                    phase: 0.0,
                },
                Sprite::default(),
                Transform::from_xyz(0.0, 300.0, 0.0),
            ))
            .id();

        run(&mut world, update_bubbles);

        assert!(world.get_entity(old).is_err());
        assert!(world.get_entity(surfaced).is_err());
        assert!(world.get::<Transform>(rising).unwrap().translation.y > 0.0);
        let alpha = world.get::<Sprite>(rising).unwrap().color.alpha();
        assert!(alpha < BUBBLE_COLOR.alpha());
    }

    #[test]
    fn seeded_rng_is_reproducible() {
        let mut a = bubble_world();
        let mut b = bubble_world();
        let first: f32 = a.resource_mut::<BubbleRng>().0.gen();
        let second: f32 = b.resource_mut::<BubbleRng>().0.gen();
        assert_eq!(first, second);
    }
}

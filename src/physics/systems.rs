use std::collections::HashSet;

use bevy::ecs::entity::Entities;
use bevy::prelude::*;

use super::components::{
    Collider, ColliderShape, CollisionIgnore, CollisionStarted, Penetration, Sensor, StaticBody,
    TriggerEntered, Velocity, WaterDrag,
};

/// Unordered pairs of entities that overlapped during the last physics step.
#[derive(Resource, Default, Debug)]
pub struct Contacts {
    pairs: HashSet<(Entity, Entity)>,
}

#[cfg(test)]
impl Contacts {
    pub fn contains(&self, a: Entity, b: Entity) -> bool {
        self.pairs.contains(&pair_key(a, b))
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }
}

fn pair_key(a: Entity, b: Entity) -> (Entity, Entity) {
    if a < b {
        (a, b)
    } else {
        (b, a)
    }
}

pub fn integrate_velocity(
    time: Res<Time>,
    mut query: Query<(&mut Transform, &mut Velocity, Option<&WaterDrag>), Without<StaticBody>>,
) {
    let dt = time.delta_secs();

    for (mut transform, mut velocity, drag) in query.iter_mut() {
        transform.translation += (velocity.0 * dt).extend(0.0);

        if let Some(drag) = drag {
            velocity.0 *= (-drag.0 * dt).exp();
        }
    }
}

pub fn tick_collision_ignores(
    mut commands: Commands,
    time: Res<Time>,
    entities: &Entities,
    mut query: Query<(Entity, &mut CollisionIgnore)>,
) {
    for (entity, mut ignore) in query.iter_mut() {
        ignore.tick(time.delta(), |other| entities.contains(other));
        if ignore.is_empty() {
            commands.entity(entity).remove::<CollisionIgnore>();
        }
    }
}

/// Pushes dynamic solid bodies out of static ones.
pub fn resolve_static_overlaps(
    mut dynamic: Query<
        (&mut Transform, &Collider, Option<&mut Velocity>),
        (Without<StaticBody>, Without<Sensor>),
    >,
    statics: Query<(&Transform, &Collider), (With<StaticBody>, Without<Sensor>)>,
) {
    for (mut transform, collider, mut velocity) in dynamic.iter_mut() {
        for (static_transform, static_collider) in statics.iter() {
            let Some(penetration) = overlap(
                transform.translation.truncate(),
                collider.shape,
                static_transform.translation.truncate(),
                static_collider.shape,
            ) else {
                continue;
            };

            transform.translation += (penetration.normal * penetration.depth).extend(0.0);

            if let Some(velocity) = velocity.as_mut() {
                let into = velocity.0.dot(penetration.normal);
                if into < 0.0 {
                    velocity.0 -= penetration.normal * into;
                }
            }
        }
    }
}

/// Finds overlapping collider pairs and reports the ones that just started.
pub fn detect_overlaps(
    mut contacts: ResMut<Contacts>,
    colliders: Query<(
        Entity,
        &Transform,
        &Collider,
        Has<Sensor>,
        Has<StaticBody>,
        Option<&CollisionIgnore>,
    )>,
    mut collisions: EventWriter<CollisionStarted>,
    mut triggers: EventWriter<TriggerEntered>,
) {
    let mut current = HashSet::with_capacity(contacts.pairs.len());

    for [a, b] in colliders.iter_combinations() {
        let (a_entity, a_transform, a_collider, a_sensor, a_static, a_ignore) = a;
        let (b_entity, b_transform, b_collider, b_sensor, b_static, b_ignore) = b;

        if (a_static && b_static) || (a_sensor && b_sensor) {
            continue;
        }

        let ignored = a_ignore.is_some_and(|ignore| ignore.ignores(b_entity))
            || b_ignore.is_some_and(|ignore| ignore.ignores(a_entity));
        if ignored {
            continue;
        }

        if overlap(
            a_transform.translation.truncate(),
            a_collider.shape,
            b_transform.translation.truncate(),
            b_collider.shape,
        )
        .is_none()
        {
            continue;
        }

        let key = pair_key(a_entity, b_entity);
        current.insert(key);
        if contacts.pairs.contains(&key) {
            continue;
        }

        match (a_sensor, b_sensor) {
            (true, false) => {
                triggers.send(TriggerEntered {
                    sensor: a_entity,
                    other: b_entity,
                });
            }
            (false, true) => {
                triggers.send(TriggerEntered {
                    sensor: b_entity,
                    other: a_entity,
                });
            }
            _ => {
                collisions.send(CollisionStarted {
                    a: a_entity,
                    b: b_entity,
                });
            }
        }
    }

    contacts.pairs = current;
}

/// Overlap test between two shapes centered at `a` and `b`.
pub fn overlap(a: Vec2, a_shape: ColliderShape, b: Vec2, b_shape: ColliderShape) -> Option<Penetration> {
    match (a_shape, b_shape) {
        (ColliderShape::Circle(ra), ColliderShape::Circle(rb)) => circle_circle(a, ra, b, rb),
        (ColliderShape::Circle(ra), ColliderShape::Rect(hb)) => circle_rect(a, ra, b, hb),
        (ColliderShape::Rect(ha), ColliderShape::Circle(rb)) => {
            circle_rect(b, rb, a, ha).map(|p| Penetration {
                normal: -p.normal,
                depth: p.depth,
            })
        }
        (ColliderShape::Rect(ha), ColliderShape::Rect(hb)) => rect_rect(a, ha, b, hb),
    }
}

fn circle_circle(a: Vec2, ra: f32, b: Vec2, rb: f32) -> Option<Penetration> {
    let delta = a - b;
    let distance = delta.length();
    let reach = ra + rb;
    if distance >= reach {
        return None;
    }

    let normal = if distance > f32::EPSILON {
        delta / distance
    } else {
        Vec2::Y
    };
    Some(Penetration {
        normal,
        depth: reach - distance,
    })
}

fn circle_rect(center: Vec2, radius: f32, rect_center: Vec2, half: Vec2) -> Option<Penetration> {
    let local = center - rect_center;
    let closest = local.clamp(-half, half);
    let delta = local - closest;
    let distance_sq = delta.length_squared();

    if distance_sq > f32::EPSILON {
        if distance_sq >= radius * radius {
            return None;
        }
        let distance = distance_sq.sqrt();
        return Some(Penetration {
            normal: delta / distance,
            depth: radius - distance,
        });
    }

    // Center inside the rectangle: leave through the nearest edge.
    let to_edge = half - local.abs();
    if to_edge.x < to_edge.y {
        Some(Penetration {
            normal: Vec2::new(local.x.signum(), 0.0),
            depth: to_edge.x + radius,
        })
    } else {
        Some(Penetration {
            normal: Vec2::new(0.0, local.y.signum()),
            depth: to_edge.y + radius,
        })
    }
}

fn rect_rect(a: Vec2, ha: Vec2, b: Vec2, hb: Vec2) -> Option<Penetration> {
    let delta = a - b;
    let overlap = ha + hb - delta.abs();
    if overlap.x <= 0.0 || overlap.y <= 0.0 {
        return None;
    }

    if overlap.x < overlap.y {
        Some(Penetration {
            normal: Vec2::new(delta.x.signum(), 0.0),
            depth: overlap.x,
        })
    } else {
        Some(Penetration {
            normal: Vec2::new(0.0, delta.y.signum()),
            depth: overlap.y,
        })
    }
}

use std::time::Duration;

use bevy::prelude::*;

/// Linear velocity in pixels per second.
#[derive(Component, Default, Debug, Clone, Copy, PartialEq)]
pub struct Velocity(pub Vec2);

/// Exponential velocity decay per second.
#[derive(Component, Debug, Clone, Copy)]
pub struct WaterDrag(pub f32);

/// Axis-aligned collision shape centered on the entity's translation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ColliderShape {
    Circle(f32),
    /// Half extents.
    Rect(Vec2),
}

#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct Collider {
    pub shape: ColliderShape,
}

impl Collider {
    pub fn circle(radius: f32) -> Self {
        Self {
            shape: ColliderShape::Circle(radius),
        }
    }

    /// A rectangle of the given full `size`.
    pub fn rect(size: Vec2) -> Self {
        Self {
            shape: ColliderShape::Rect(size / 2.0),
        }
    }

    /// Largest distance from the center to the shape's edge along an axis.
    pub fn bounding_radius(&self) -> f32 {
        match self.shape {
            ColliderShape::Circle(radius) => radius,
            ColliderShape::Rect(half) => half.max_element(),
        }
    }
}

/// Overlaps report `TriggerEntered` and are never pushed apart.
#[derive(Component, Debug, Default)]
pub struct Sensor;

/// Never moved by the physics step.
#[derive(Component, Debug, Default)]
pub struct StaticBody;

#[derive(Debug, Clone)]
pub struct IgnoreEntry {
    pub other: Entity,
    pub timer: Timer,
}

/// Entities this collider does not collide with or trigger against,
/// each for a limited time.
#[derive(Component, Debug, Clone, Default)]
pub struct CollisionIgnore {
    entries: Vec<IgnoreEntry>,
}

impl CollisionIgnore {
    pub fn with(other: Entity, secs: f32) -> Self {
        let mut ignore = Self::default();
        ignore.add(other, secs);
        ignore
    }

    /// Ignore `other` for `secs`. Re-adding an entity restarts its window.
    pub fn add(&mut self, other: Entity, secs: f32) {
        let timer = Timer::from_seconds(secs, TimerMode::Once);
        match self.entries.iter_mut().find(|entry| entry.other == other) {
            Some(entry) => entry.timer = timer,
            None => self.entries.push(IgnoreEntry { other, timer }),
        }
    }

    pub fn ignores(&self, other: Entity) -> bool {
        self.entries
            .iter()
            .any(|entry| entry.other == other && entry.timer.remaining_secs() > 0.0)
    }

    /// Advance every window by `delta`, dropping expired entries and
    /// entries whose entity is gone.
    pub fn tick(&mut self, delta: Duration, is_alive: impl Fn(Entity) -> bool) {
        self.entries.retain_mut(|entry| {
            entry.timer.tick(delta);
            entry.timer.remaining_secs() > 0.0 && is_alive(entry.other)
        });
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

/// Two solid colliders started overlapping.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct CollisionStarted {
    pub a: Entity,
    pub b: Entity,
}

/// A solid collider started overlapping a sensor.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct TriggerEntered {
    pub sensor: Entity,
    pub other: Entity,
}

/// How far and along which axis `a` must move to stop overlapping `b`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Penetration {
    /// Unit vector pointing from `b` toward `a`.
    pub normal: Vec2,
    pub depth: f32,
}

use bevy::prelude::*;

/// Fires while the owner's trigger is held, once per `fire_interval`.
#[derive(Component, Debug, Default)]
pub struct Weapon {
    /// Seconds until the next shot is allowed.
    pub cooldown: f32,
}

#[derive(Component, Debug, Clone, Copy)]
pub struct Projectile {
    pub shooter: Entity,
    pub damage: f32,
    pub age: f32,
    pub lifetime: f32,
}

#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct Health(pub f32);

/// Marker for destructible scenery.
#[derive(Component)]
pub struct Target;

#[derive(Event, Debug, Clone, Copy)]
pub struct ProjectileFired {
    pub projectile: Entity,
    pub shooter: Entity,
    pub position: Vec2,
}

#[derive(Event, Debug, Clone, Copy)]
pub struct ProjectileHit {
    pub projectile: Entity,
    pub target: Entity,
    pub position: Vec2,
}

#[derive(Event, Debug, Clone, Copy)]
pub struct TargetDestroyed {
    pub target: Entity,
    pub position: Vec2,
}

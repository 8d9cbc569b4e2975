pub mod components;
pub mod systems;

use bevy::prelude::*;

pub use components::{
    Collider, CollisionIgnore, CollisionStarted, Sensor, StaticBody, TriggerEntered, Velocity,
    WaterDrag,
};

use crate::game_state::AppState;
use systems::{
    detect_overlaps, integrate_velocity, resolve_static_overlaps, tick_collision_ignores, Contacts,
};

/// Ordering of the fixed-step systems.
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PhysicsSet {
    /// Gameplay code that sets velocities for this step.
    Steer,
    Integrate,
    /// Runs before push-out so a body pressing into a wall keeps its contact.
    Detect,
    Resolve,
}

pub struct PhysicsPlugin;

impl Plugin for PhysicsPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<Contacts>()
            .add_event::<CollisionStarted>()
            .add_event::<TriggerEntered>()
            .configure_sets(
                FixedUpdate,
                (
                    PhysicsSet::Steer,
                    PhysicsSet::Integrate,
                    PhysicsSet::Detect,
                    PhysicsSet::Resolve,
                )
                    .chain()
                    .run_if(in_state(AppState::Playing)),
            )
            .add_systems(
                FixedUpdate,
                (
                    integrate_velocity.in_set(PhysicsSet::Integrate),
                    (tick_collision_ignores, detect_overlaps)
                        .chain()
                        .in_set(PhysicsSet::Detect),
                    resolve_static_overlaps.in_set(PhysicsSet::Resolve),
                ),
            );
    }
}

//! Helpers for running systems against a bare `World`.
use std::time::Duration;

use bevy::ecs::system::RunSystemOnce;
use bevy::prelude::*;

/// A world with a `Time` resource that only moves when told to.
pub fn time_world() -> World {
    let mut world = World::new();
    world.insert_resource(Time::<()>::default());
    world
}

/// Advance `Time` so the next system run sees a delta of `secs`.
pub fn advance_time(world: &mut World, secs: f32) {
    world
        .resource_mut::<Time>()
        .advance_by(Duration::from_secs_f32(secs));
}

/// Run `system` once and apply its commands.
pub fn run<M>(world: &mut World, system: impl IntoSystem<(), (), M>) {
    world.run_system_once(system).expect("system should run");
}

pub mod components;
pub mod systems;

use bevy::prelude::*;

pub use components::{Boost, Diver, DiverInput, Facing, SwimState, SWIM_SPEED_THRESHOLD};

use crate::game_state::GameSet;
use crate::physics::{systems::resolve_static_overlaps, PhysicsSet};
use systems::{clamp_to_bounds, read_input, swim, update_swim_state};

pub struct PlayerPlugin;

impl Plugin for PlayerPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Update, read_input.in_set(GameSet::Input))
            .add_systems(
                FixedUpdate,
                (
                    swim.in_set(PhysicsSet::Steer),
                    (clamp_to_bounds, update_swim_state)
                        .chain()
                        .in_set(PhysicsSet::Resolve)
                        .after(resolve_static_overlaps),
                ),
            );
    }
}

//! Decorative bubbles: helmet breaths, the swim trail and puffs on shots and
//! impacts. Nothing here feeds back into gameplay.

pub mod components;
pub mod systems;

use bevy::prelude::*;

pub use components::{BreathCycle, BubbleEmitter, BubbleRng, TrailEmitter};

use crate::game_state::GameSet;
use systems::{drive_breath_cycles, emit_bubbles, spawn_event_bursts, sync_trail_emitters, update_bubbles};

pub struct BubblesPlugin;

impl Plugin for BubblesPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<BubbleRng>().add_systems(
            Update,
            (
                sync_trail_emitters,
                emit_bubbles,
                drive_breath_cycles,
                spawn_event_bursts,
                update_bubbles,
            )
                .chain()
                .in_set(GameSet::Effects),
        );
    }
}

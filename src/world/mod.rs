pub mod crosshair;
pub mod setup;

use bevy::prelude::*;

use crate::game_state::{AppState, GameSet};
use crosshair::{hide_cursor, setup_crosshair, show_cursor, update_crosshair};
use setup::setup_world;

/// Playable area. The top edge is the water surface.
#[derive(Resource, Debug, Clone, Copy)]
pub struct WorldBounds(pub Rect);

impl WorldBounds {
    pub fn surface_y(&self) -> f32 {
        self.0.max.y
    }
}

pub struct WorldPlugin;

impl Plugin for WorldPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, (setup_world, setup_crosshair))
            .add_systems(OnEnter(AppState::Playing), hide_cursor)
            .add_systems(OnExit(AppState::Playing), show_cursor)
            .add_systems(Update, update_crosshair.in_set(GameSet::Effects));
    }
}

pub mod components;
pub mod systems;

use bevy::prelude::*;
use bevy::transform::TransformSystem;

pub use components::{CameraBounds, CameraFollow, CameraSnap};

use crate::game_state::AppState;
use systems::{follow_target, snap_camera_to_target};

pub struct CameraPlugin;

impl Plugin for CameraPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            PostUpdate,
            (snap_camera_to_target, follow_target)
                .chain()
                .before(TransformSystem::TransformPropagate)
                .run_if(in_state(AppState::Playing)),
        );
    }
}

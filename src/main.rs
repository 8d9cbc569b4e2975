mod aim;
mod bubbles;
mod camera;
mod config;
mod game_state;
mod physics;
mod player;
mod weapon;
mod world;

#[cfg(test)]
pub(crate) mod test_utils;

use bevy::{
    diagnostic::{FrameTimeDiagnosticsPlugin, LogDiagnosticsPlugin},
    prelude::*,
    window::PresentMode,
};

use aim::AimPlugin;
use bubbles::BubblesPlugin;
use camera::CameraPlugin;
use config::ConfigPlugin;
use game_state::GameStatePlugin;
use physics::PhysicsPlugin;
use player::PlayerPlugin;
use weapon::WeaponPlugin;
use world::WorldPlugin;

fn main() {
    App::new()
        .add_plugins(
            DefaultPlugins.set(WindowPlugin {
                primary_window: Some(Window {
                    title: "Deepdive".to_string(),
                    present_mode: PresentMode::AutoNoVsync,
                    ..default()
                }),
                ..default()
            }),
        )
        .add_plugins((
            FrameTimeDiagnosticsPlugin::default(),
            LogDiagnosticsPlugin::default(),
        ))
        .insert_resource(ClearColor(Color::srgb(0.04, 0.22, 0.36)))
        .add_plugins((ConfigPlugin, GameStatePlugin, PhysicsPlugin))
        .add_plugins((
            WorldPlugin,
            PlayerPlugin,
            AimPlugin,
            WeaponPlugin,
            BubblesPlugin,
            CameraPlugin,
        ))
        .run();
}

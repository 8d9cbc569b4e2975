use bevy::prelude::*;
use bevy::window::PrimaryWindow;

use crate::player::{Diver, DiverInput};

/// Marker for the aim reticle.
#[derive(Component)]
pub struct Crosshair;

const CROSSHAIR_Z: f32 = 50.0;

pub fn setup_crosshair(mut commands: Commands) {
    commands
        .spawn((
            Crosshair,
            Transform::from_xyz(0.0, 0.0, CROSSHAIR_Z),
            Visibility::Hidden,
        ))
        .with_children(|parent| {
            // Horizontal and vertical bars
            for size in [Vec2::new(14.0, 2.0), Vec2::new(2.0, 14.0)] {
                parent.spawn(Sprite::from_color(Color::srgba(1.0, 1.0, 1.0, 0.7), size));
            }
        });
}

pub fn update_crosshair(
    divers: Query<&DiverInput, With<Diver>>,
    mut crosshair: Query<(&mut Transform, &mut Visibility), With<Crosshair>>,
) {
    let (Ok(input), Ok((mut transform, mut visibility))) =
        (divers.get_single(), crosshair.get_single_mut())
    else {
        return;
    };

    match input.aim_target {
        Some(target) => {
            transform.translation = target.extend(CROSSHAIR_Z);
            *visibility = Visibility::Visible;
        }
        None => *visibility = Visibility::Hidden,
    }
}

pub fn hide_cursor(mut windows: Query<&mut Window, With<PrimaryWindow>>) {
    if let Ok(mut window) = windows.get_single_mut() {
        window.cursor_options.visible = false;
    }
}

pub fn show_cursor(mut windows: Query<&mut Window, With<PrimaryWindow>>) {
    if let Ok(mut window) = windows.get_single_mut() {
        window.cursor_options.visible = true;
    }
}

use bevy::prelude::*;

/// Main application states controlling game flow.
#[derive(States, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AppState {
    #[default]
    Playing,
    Paused,
}

/// Ordering of the per-frame gameplay systems.
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameSet {
    /// Keyboard and mouse sampling.
    Input,
    /// Aim direction and facing synchronization.
    Aim,
    /// Firing, hits and anything else that acts on the world.
    Act,
    /// Bubbles and other purely visual follow-ups.
    Effects,
}

pub struct GameStatePlugin;

impl Plugin for GameStatePlugin {
    fn build(&self, app: &mut App) {
        app.init_state::<AppState>()
            .configure_sets(
                Update,
                (GameSet::Input, GameSet::Aim, GameSet::Act, GameSet::Effects)
                    .chain()
                    .run_if(in_state(AppState::Playing)),
            )
            .add_systems(Update, toggle_pause);
    }
}

pub fn toggle_pause(
    keyboard_input: Res<ButtonInput<KeyCode>>,
    state: Res<State<AppState>>,
    mut next_state: ResMut<NextState<AppState>>,
) {
    if !keyboard_input.just_pressed(KeyCode::Escape) {
        return;
    }

    let next = match state.get() {
        AppState::Playing => AppState::Paused,
        AppState::Paused => AppState::Playing,
    };
    info!("Game state: {:?} -> {:?}", state.get(), next);
    next_state.set(next);
}

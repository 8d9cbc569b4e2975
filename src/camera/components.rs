use bevy::prelude::*;

/// Keeps the camera on `target`, trailing it by `smoothing`.
#[derive(Component, Debug, Clone, Copy)]
pub struct CameraFollow {
    pub target: Entity,
    /// Follow stiffness per second. Zero or less snaps.
    pub smoothing: f32,
    pub offset: Vec2,
}

/// The camera's view never leaves this rectangle.
#[derive(Component, Debug, Clone, Copy)]
pub struct CameraBounds(pub Rect);

/// Camera jumps straight onto its target, without smoothing, until the
/// renderer has sized its view. Removed once the clamp can use the real size.
#[derive(Component, Debug, Default)]
pub struct CameraSnap;

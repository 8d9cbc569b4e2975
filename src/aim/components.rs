use bevy::prelude::*;

/// Unit vector from the diver's shoulder toward the aim target.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct AimDirection(pub Vec2);

impl Default for AimDirection {
    fn default() -> Self {
        Self(Vec2::X)
    }
}

/// Rotates toward the owner's aim. Lives on the arm entity, whose children
/// (the fire point) ride along.
#[derive(Component, Debug, Clone, Copy)]
pub struct Arm {
    pub owner: Entity,
}

/// Where projectiles spawn. Its own offset is mirrored through
/// `MirrorWithFacing`, its rotation comes from the arm above it.
#[derive(Component, Debug, Clone, Copy)]
pub struct FirePoint {
    pub owner: Entity,
}

/// Local translation whose x is mirrored with the owner's facing.
/// `base_offset` is the right-facing position.
#[derive(Component, Debug, Clone, Copy)]
pub struct MirrorWithFacing {
    pub owner: Entity,
    pub base_offset: Vec2,
}

/// Sprite flipped horizontally while the owner faces left.
#[derive(Component, Debug, Clone, Copy)]
pub struct FacingSprite {
    pub owner: Entity,
}

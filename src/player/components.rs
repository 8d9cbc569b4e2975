use bevy::prelude::*;

/// Marker component for the diver entity.
#[derive(Component)]
pub struct Diver;

/// Which way the diver is facing. Every mirrored visual reads this.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Facing {
    Left,
    #[default]
    Right,
}

impl Facing {
    /// +1 facing right, -1 facing left.
    pub fn sign(self) -> f32 {
        match self {
            Facing::Left => -1.0,
            Facing::Right => 1.0,
        }
    }

    pub fn is_left(self) -> bool {
        self == Facing::Left
    }
}

/// Input sampled once per frame and consumed by the fixed step.
#[derive(Component, Debug, Default)]
pub struct DiverInput {
    /// Normalized swim direction, zero when no key is held.
    pub movement: Vec2,
    /// Cursor position in world space, kept when the cursor leaves the window.
    pub aim_target: Option<Vec2>,
    pub fire: bool,
    /// Set on the frame Shift is pressed, cleared when the fixed step reads it.
    pub boost_requested: bool,
}

/// Short speed burst followed by a cooldown.
#[derive(Component, Debug, Default)]
pub struct Boost {
    pub remaining: f32,
    pub cooldown: f32,
}

impl Boost {
    pub fn is_active(&self) -> bool {
        self.remaining > 0.0
    }

    pub fn is_ready(&self) -> bool {
        self.remaining <= 0.0 && self.cooldown <= 0.0
    }

    /// Start a boost lasting `duration` if one is not running or cooling down.
    pub fn try_start(&mut self, duration: f32) -> bool {
        if !self.is_ready() {
            return false;
        }
        self.remaining = duration;
        true
    }

    /// Advance by `dt`. The cooldown starts when the boost runs out.
    pub fn tick(&mut self, dt: f32, cooldown: f32) {
        if self.remaining > 0.0 {
            self.remaining = (self.remaining - dt).max(0.0);
            if self.remaining == 0.0 {
                self.cooldown = cooldown;
            }
        } else if self.cooldown > 0.0 {
            self.cooldown = (self.cooldown - dt).max(0.0);
        }
    }
}

/// Movement state that drives the bubble trail.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SwimState {
    #[default]
    Idle,
    Swimming,
    Boosting,
}

/// Speed above which a diver counts as swimming.
pub const SWIM_SPEED_THRESHOLD: f32 = 12.0;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn facing_sign() {
        assert_eq!(Facing::Right.sign(), 1.0);
        assert_eq!(Facing::Left.sign(), -1.0);
        assert_eq!(Facing::default(), Facing::Right);
    }

    #[test]
    fn boost_runs_then_cools_down() {
        let mut boost = Boost::default();
        assert!(boost.try_start(0.5));
        assert!(boost.is_active());
        assert!(!boost.try_start(0.5));

        boost.tick(0.3, 1.0);
        assert!(boost.is_active());
        boost.tick(0.3, 1.0);
        assert!(!boost.is_active());
        assert_eq!(boost.cooldown, 1.0);
        assert!(!boost.try_start(0.5));

        boost.tick(0.6, 1.0);
        assert!(!boost.is_ready());
        boost.tick(0.6, 1.0);
        assert!(boost.is_ready());
        assert!(boost.try_start(0.5));
    }
}

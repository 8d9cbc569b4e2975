use bevy::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::config::DiverConfig;

/// Continuous bubble source. Emits `rate` bubbles per second along
/// `direction`, jittered by up to `spread` radians. A zero rate is off.
#[derive(Component, Debug, Clone)]
pub struct BubbleEmitter {
    pub rate: f32,
    pub accumulator: f32,
    pub direction: Vec2,
    pub spread: f32,
    pub speed: f32,
}

impl BubbleEmitter {
    pub fn off(spread: f32, speed: f32) -> Self {
        Self {
            rate: 0.0,
            accumulator: 0.0,
            direction: Vec2::NEG_X,
            spread,
            speed,
        }
    }

    /// Whole bubbles due after `dt`. The fractional remainder carries over.
    pub fn take_due(&mut self, dt: f32) -> u32 {
        if self.rate <= 0.0 {
            self.accumulator = 0.0;
            return 0;
        }
        self.accumulator += self.rate * dt;
        let due = self.accumulator.floor();
        self.accumulator -= due;
        due as u32
    }
}

/// The trail behind a swimming diver. Its rate and direction follow the
/// owner's movement.
#[derive(Component, Debug, Clone, Copy)]
pub struct TrailEmitter {
    pub owner: Entity,
}

/// Periodic breath from the helmet vent: every interval a burst of bubbles
/// is released one at a time.
#[derive(Component, Debug, Clone, Default)]
pub struct BreathCycle {
    pub until_breath: f32,
    pub until_bubble: f32,
    pub pending: u32,
}

impl BreathCycle {
    pub fn starting_in(secs: f32) -> Self {
        Self {
            until_breath: secs,
            ..default()
        }
    }

    /// Advance by `dt` and return how many bubbles to release now.
    pub fn tick(&mut self, dt: f32, interval: f32, burst: u32, spacing: f32) -> u32 {
        self.until_breath -= dt;
        if self.until_breath <= 0.0 {
            self.until_breath += interval;
            // Leftovers from a breath that outlasted the interval are dropped
            self.pending = burst;
            self.until_bubble = 0.0;
        } else {
            self.until_bubble -= dt;
        }

        let mut released = 0;
        while self.pending > 0 && self.until_bubble <= 0.0 {
            self.pending -= 1;
            released += 1;
            if spacing > 0.0 {
                self.until_bubble += spacing;
            }
        }
        released
    }
}

#[derive(Component, Debug, Clone)]
pub struct Bubble {
    pub velocity: Vec2,
    pub age: f32,
    pub lifetime: f32,
    /// Wobble phase offset so neighbors do not sway in lockstep.
    pub phase: f32,
}

/// Seeded so bubble patterns are reproducible.
#[derive(Resource)]
pub struct BubbleRng(pub StdRng);

impl FromWorld for BubbleRng {
    fn from_world(world: &mut World) -> Self {
        let seed = world
            .get_resource::<DiverConfig>()
            .map_or_else(|| DiverConfig::default().bubbles.seed, |config| config.bubbles.seed);
        Self(StdRng::seed_from_u64(seed))
    }
}

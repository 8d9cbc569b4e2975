//! Tuning values for the diver, its weapon, the camera and the bubble effects.
//!
//! Values are read from `assets/config/diver.json` at startup. Every section
//! is `#[serde(default)]`, so a file only needs the fields it overrides.

pub mod loader;

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

pub use loader::{config_path, load_or_default, ConfigError};

/// Loads `DiverConfig` unless one was inserted already. Add it after
/// `DefaultPlugins` so load warnings reach the log.
pub struct ConfigPlugin;

impl Plugin for ConfigPlugin {
    fn build(&self, app: &mut App) {
        if !app.world().contains_resource::<DiverConfig>() {
            app.insert_resource(load_or_default(config_path()));
        }
    }
}

#[derive(Resource, Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DiverConfig {
    pub movement: MovementConfig,
    pub aim: AimConfig,
    pub weapon: WeaponConfig,
    pub camera: CameraConfig,
    pub bubbles: BubbleConfig,
    pub world: WorldConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MovementConfig {
    /// Top swim speed in pixels per second.
    pub max_speed: f32,
    /// How fast velocity steers toward the input direction.
    pub acceleration: f32,
    /// Exponential velocity decay per second.
    pub water_drag: f32,
    /// Upward drift applied when there is no vertical input.
    pub buoyancy: f32,
    pub boost_multiplier: f32,
    pub boost_duration: f32,
    pub boost_cooldown: f32,
    pub collider_radius: f32,
}

impl Default for MovementConfig {
    fn default() -> Self {
        Self {
            max_speed: 220.0,
            acceleration: 900.0,
            water_drag: 2.5,
            buoyancy: 25.0,
            boost_multiplier: 1.9,
            boost_duration: 0.6,
            boost_cooldown: 1.5,
            collider_radius: 18.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AimConfig {
    /// Distance from the shoulder to the fire point.
    pub arm_length: f32,
    /// Shoulder position relative to the diver root.
    pub arm_pivot: [f32; 2],
    /// Horizontal aim component below which facing does not change.
    pub flip_deadzone: f32,
}

impl Default for AimConfig {
    fn default() -> Self {
        Self {
            arm_length: 26.0,
            arm_pivot: [2.0, 6.0],
            flip_deadzone: 0.05,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WeaponConfig {
    /// Seconds between shots while the trigger is held.
    pub fire_interval: f32,
    pub projectile_speed: f32,
    pub projectile_lifetime: f32,
    pub projectile_radius: f32,
    pub projectile_damage: f32,
    /// How long a fresh projectile ignores the diver that fired it.
    pub shooter_ignore_secs: f32,
    /// Add the shooter's velocity to the launch velocity.
    pub inherit_shooter_velocity: bool,
}

impl Default for WeaponConfig {
    fn default() -> Self {
        Self {
            fire_interval: 0.25,
            projectile_speed: 620.0,
            projectile_lifetime: 1.8,
            projectile_radius: 4.0,
            projectile_damage: 1.0,
            shooter_ignore_secs: 0.2,
            inherit_shooter_velocity: false,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Follow stiffness. Zero or less snaps to the target every frame.
    pub smoothing: f32,
    pub offset: [f32; 2],
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            smoothing: 6.0,
            offset: [0.0, 40.0],
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BubbleConfig {
    /// Helmet vent position relative to the diver root, for a right-facing diver.
    pub helmet_offset: [f32; 2],
    /// Seconds between breaths.
    pub breath_interval: f32,
    /// Bubbles released per breath.
    pub breath_burst: u32,
    /// Seconds between bubbles within one breath.
    pub breath_spacing: f32,
    /// Bubbles per second behind a boosting diver.
    pub boost_rate: f32,
    /// Bubbles per second behind a swimming diver.
    pub swim_rate: f32,
    /// Half-angle in radians of the boost trail cone.
    pub boost_spread: f32,
    pub boost_speed: f32,
    pub lifetime: f32,
    pub rise_speed: f32,
    pub wobble_amplitude: f32,
    pub wobble_frequency: f32,
    pub size: f32,
    pub seed: u64,
}

impl Default for BubbleConfig {
    fn default() -> Self {
        Self {
            helmet_offset: [10.0, 20.0],
            breath_interval: 2.5,
            breath_burst: 4,
            breath_spacing: 0.08,
            boost_rate: 40.0,
            swim_rate: 4.0,
            boost_spread: 0.35,
            boost_speed: 90.0,
            lifetime: 2.2,
            rise_speed: 70.0,
            wobble_amplitude: 14.0,
            wobble_frequency: 3.0,
            size: 5.0,
            seed: 0x5eed_b0b1,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    pub bounds_min: [f32; 2],
    /// `bounds_max[1]` is the water surface.
    pub bounds_max: [f32; 2],
    pub spawn: [f32; 2],
    pub targets: Vec<TargetConfig>,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            bounds_min: [-1600.0, -900.0],
            bounds_max: [1600.0, 300.0],
            spawn: [-400.0, 0.0],
            targets: vec![
                TargetConfig {
                    position: [200.0, -120.0],
                    size: [60.0, 60.0],
                    health: 3.0,
                },
                TargetConfig {
                    position: [650.0, -420.0],
                    size: [120.0, 40.0],
                    health: 5.0,
                },
                TargetConfig {
                    position: [-900.0, -600.0],
                    size: [80.0, 160.0],
                    health: 8.0,
                },
            ],
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TargetConfig {
    pub position: [f32; 2],
    pub size: [f32; 2],
    pub health: f32,
}

impl WorldConfig {
    pub fn bounds(&self) -> Rect {
        Rect::from_corners(Vec2::from(self.bounds_min), Vec2::from(self.bounds_max))
    }
}

impl DiverConfig {
    /// Rejects values the gameplay systems cannot work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("movement.max_speed", self.movement.max_speed),
            ("movement.acceleration", self.movement.acceleration),
            ("movement.boost_multiplier", self.movement.boost_multiplier),
            ("movement.boost_duration", self.movement.boost_duration),
            ("movement.collider_radius", self.movement.collider_radius),
            ("aim.arm_length", self.aim.arm_length),
            ("weapon.fire_interval", self.weapon.fire_interval),
            ("weapon.projectile_speed", self.weapon.projectile_speed),
            ("weapon.projectile_lifetime", self.weapon.projectile_lifetime),
            ("weapon.projectile_radius", self.weapon.projectile_radius),
            ("bubbles.breath_interval", self.bubbles.breath_interval),
            ("bubbles.lifetime", self.bubbles.lifetime),
            ("bubbles.size", self.bubbles.size),
        ];
        for (name, value) in positive {
            if !(value > 0.0) {
                return Err(ConfigError::Invalid(format!(
                    "{name} must be positive, got {value}"
                )));
            }
        }

        let non_negative = [
            ("movement.water_drag", self.movement.water_drag),
            ("movement.boost_cooldown", self.movement.boost_cooldown),
            ("aim.flip_deadzone", self.aim.flip_deadzone),
            ("weapon.shooter_ignore_secs", self.weapon.shooter_ignore_secs),
            ("bubbles.breath_spacing", self.bubbles.breath_spacing),
            ("bubbles.boost_rate", self.bubbles.boost_rate),
            ("bubbles.swim_rate", self.bubbles.swim_rate),
            ("bubbles.boost_spread", self.bubbles.boost_spread),
            ("bubbles.boost_speed", self.bubbles.boost_speed),
        ];
        for (name, value) in non_negative {
            if !(value >= 0.0) {
                return Err(ConfigError::Invalid(format!(
                    "{name} must not be negative, got {value}"
                )));
            }
        }

        let [min_x, min_y] = self.world.bounds_min;
        let [max_x, max_y] = self.world.bounds_max;
        if min_x >= max_x || min_y >= max_y {
            return Err(ConfigError::Invalid(format!(
                "world bounds are inverted: min {:?}, max {:?}",
                self.world.bounds_min, self.world.bounds_max
            )));
        }

        // The diver has to fit inside with its whole collider
        let diameter = self.movement.collider_radius * 2.0;
        if max_x - min_x < diameter || max_y - min_y < diameter {
            return Err(ConfigError::Invalid(format!(
                "world bounds are smaller than the diver ({diameter} across)"
            )));
        }

        for (i, target) in self.world.targets.iter().enumerate() {
            if target.size[0] <= 0.0 || target.size[1] <= 0.0 || target.health <= 0.0 {
                return Err(ConfigError::Invalid(format!(
                    "world.targets[{i}] needs a positive size and health"
                )));
            }
        }

        Ok(())
    }
}

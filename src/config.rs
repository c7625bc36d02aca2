//! Tuning values for a run.
//!
//! Defaults reproduce the original island: 100 fish, 50 lives, a monument at
//! the origin and a 100 x 100 ground slab.

use glam::Vec3;

use crate::error::ConfigError;

/// Highest tick rate the fixed-rate loop accepts.
pub const MAX_TICK_HZ: u32 = 240;

#[derive(Clone, Debug, PartialEq)]
pub struct GameConfig {
    pub starting_health: u32,
    pub enemy_count: usize,

    // ── World ────────────────────────────────────────────────────────────────
    /// Half the side length of the square ground slab.
    pub arena_half_extent: f32,
    /// Height of the ground's top face; the player stands on it.
    pub ground_top: f32,
    pub ground_half_extents: Vec3,
    pub monument_position: Vec3,
    pub monument_half_extents: Vec3,

    // ── Enemy ────────────────────────────────────────────────────────────────
    pub enemy_height: f32,
    pub enemy_speed: f32,
    /// Planar distance to the target inside which an enemy stops advancing.
    pub enemy_stop_radius: f32,
    pub enemy_half_extents: Vec3,

    // ── Player ───────────────────────────────────────────────────────────────
    pub player_start: Vec3,
    pub player_base_speed: f32,
    pub sprint_multiplier: f32,
    pub eye_height: f32,
    /// Radians per second.
    pub turn_rate: f32,
    /// Radians per second.
    pub look_rate: f32,
    pub max_pitch: f32,

    // ── Weapon ───────────────────────────────────────────────────────────────
    pub weapon_cooldown: f64,
    pub swing_duration: f64,
    /// Distance in front of the eye at which projectiles appear.
    pub muzzle_offset: f32,

    // ── Projectile ───────────────────────────────────────────────────────────
    pub projectile_speed: f32,
    pub projectile_lifetime: f64,
    pub projectile_half_extents: Vec3,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            starting_health: 50,
            enemy_count: 100,

            arena_half_extent: 50.0,
            ground_top: 0.5,
            ground_half_extents: Vec3::new(50.0, 0.5, 50.0),
            monument_position: Vec3::new(0.0, 0.5, 0.0),
            monument_half_extents: Vec3::new(3.5, 3.5, 3.5),

            enemy_height: 2.5,
            enemy_speed: 0.67,
            enemy_stop_radius: 1.0,
            enemy_half_extents: Vec3::splat(1.0),

            player_start: Vec3::new(10.0, 0.5, 0.0),
            player_base_speed: 15.0,
            sprint_multiplier: 1.75,
            eye_height: 2.0,
            turn_rate: std::f32::consts::PI,
            look_rate: std::f32::consts::FRAC_PI_2,
            max_pitch: std::f32::consts::FRAC_PI_4,

            weapon_cooldown: 0.1,
            swing_duration: 0.15,
            muzzle_offset: 1.0,

            projectile_speed: 100.0,
            projectile_lifetime: 3.0,
            projectile_half_extents: Vec3::splat(0.05),
        }
    }
}

impl GameConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.starting_health == 0 {
            return Err(ConfigError::ZeroStartingHealth);
        }

        let positive: [(&'static str, f32); 9] = [
            ("arena_half_extent", self.arena_half_extent),
            ("enemy_speed", self.enemy_speed),
            ("enemy_stop_radius", self.enemy_stop_radius),
            ("player_base_speed", self.player_base_speed),
            ("eye_height", self.eye_height),
            ("muzzle_offset", self.muzzle_offset),
            ("projectile_speed", self.projectile_speed),
            ("weapon_cooldown", self.weapon_cooldown as f32),
            ("swing_duration", self.swing_duration as f32),
        ];
        for (field, value) in positive {
            if !value.is_finite() {
                return Err(ConfigError::NonFinite { field });
            }
            if value <= 0.0 {
                return Err(ConfigError::NonPositive { field, value });
            }
        }

        if !self.projectile_lifetime.is_finite() {
            return Err(ConfigError::NonFinite {
                field: "projectile_lifetime",
            });
        }
        if self.projectile_lifetime <= 0.0 {
            return Err(ConfigError::NonPositive {
                field: "projectile_lifetime",
                value: self.projectile_lifetime as f32,
            });
        }

        if !self.sprint_multiplier.is_finite() {
            return Err(ConfigError::NonFinite {
                field: "sprint_multiplier",
            });
        }
        if self.sprint_multiplier < 1.0 {
            return Err(ConfigError::SprintSlowerThanWalk {
                multiplier: self.sprint_multiplier,
            });
        }

        Ok(())
    }
}

pub fn validate_tick_rate(hz: u32) -> Result<(), ConfigError> {
    if hz == 0 || hz > MAX_TICK_HZ {
        return Err(ConfigError::TickRateOutOfRange {
            hz,
            max: MAX_TICK_HZ,
        });
    }
    Ok(())
}

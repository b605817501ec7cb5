//! Gameplay tuning and runtime settings.

use std::{env, path::PathBuf, time::Duration};

use crate::entities::{Size, Vec2};
use crate::error::ConfigError;

/// Gameplay tuning for one session.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WorldConfig {
    /// Playfield width in world units.
    pub width: f64,

    /// Playfield height in world units. Enemies spawn on this edge.
    pub height: f64,

    /// Size used for player, enemies and explosions.
    pub entity_size: Size,

    pub player_start: Vec2,

    /// Horizontal player speed in units per second.
    pub player_speed: f64,

    /// Seconds between shots while fire is held.
    pub fire_interval: f64,

    /// Bullet spawn point relative to the player's position.
    pub muzzle_offset: Vec2,

    pub bullet_size: Size,
    pub bullet_speed: f64,

    /// Seconds between enemy spawns.
    pub spawn_interval: f64,

    /// Inclusive range enemy speeds are drawn from.
    pub enemy_speed_min: f64,
    pub enemy_speed_max: f64,

    pub explosion_lifetime: f64,

    /// Where the score overlay is anchored.
    pub score_anchor: Vec2,
}

impl Default for WorldConfig {
    fn default() -> Self {
        let width = 800.0;
        let height = 600.0;
        Self {
            width,
            height,
            entity_size: Size::new(50.0, 50.0),
            player_start: Vec2::new(400.0, 0.0),
            player_speed: 300.0,
            fire_interval: 0.1,
            muzzle_offset: Vec2::new(20.0, 50.0),
            bullet_size: Size::new(9.0, 37.0),
            bullet_speed: 200.0,
            spawn_interval: 1.0,
            enemy_speed_min: 100.0,
            enemy_speed_max: 200.0,
            explosion_lifetime: 0.1,
            score_anchor: Vec2::new(10.0, height - 50.0),
        }
    }
}

// Runtime/front-end constants (not gameplay tuning).

pub const FRAME: Duration = Duration::from_millis(33); // ≈30 FPS

/// A key counts as held if its last press/repeat arrived within this many
/// frames. Only used on terminals that never report key releases.
pub const HOLD_WINDOW: u64 = 4;

/// RNG seed from `SHOOTER_SEED`; `None` means seed from entropy.
pub fn seed() -> Result<Option<u64>, ConfigError> {
    match env::var("SHOOTER_SEED") {
        Ok(value) => {
            let parsed = value.trim().parse::<u64>();
            match parsed {
                Ok(seed) => Ok(Some(seed)),
                Err(_) => Err(ConfigError {
                    var: "SHOOTER_SEED",
                    value,
                }),
            }
        }
        Err(_) => Ok(None),
    }
}

/// Sprite directory from `SHOOTER_ASSETS`; `None` means builtin glyphs.
pub fn assets_dir() -> Option<PathBuf> {
    env::var_os("SHOOTER_ASSETS").map(PathBuf::from)
}

pub fn log_file() -> PathBuf {
    env::var_os("SHOOTER_LOG_FILE")
        .map(PathBuf::from)
        .unwrap_or_else(|| env::temp_dir().join("arcade_shooter.log"))
}

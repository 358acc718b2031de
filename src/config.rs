/// Tunable game parameters.
///
/// Every section derives `Default` and is marked `#[serde(default)]`, so a
/// JSON file only needs to mention the values it overrides.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::entities::Difficulty;
use crate::error::{GameError, Result};

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub playfield: PlayfieldConfig,
    pub player: PlayerConfig,
    pub enemy: EnemyConfig,
    pub boss: BossConfig,
    pub power_up: PowerUpConfig,
    pub wave: WaveConfig,
    pub explosion: ExplosionConfig,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayfieldConfig {
    pub width: f32,
    pub height: f32,
}

impl Default for PlayfieldConfig {
    fn default() -> Self {
        PlayfieldConfig {
            width: 800.0,
            height: 600.0,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    pub size: f32,
    pub speed: f32,
    pub max_health: u32,
    pub hit_damage: u32,
    pub heal_amount: u32,
    /// Frames of damage immunity after a hit.
    pub invincibility_frames: u32,
    /// Frames between shots with the basic weapon.
    pub fire_interval: u32,
    /// Frames removed from the fire interval per weapon upgrade.
    pub fire_interval_step: u32,
    pub bullet_width: f32,
    pub bullet_height: f32,
    pub bullet_speed: f32,
    /// Horizontal speed of the outer bullets of the spread shot.
    pub spread_vx: f32,
    /// Frames an upgraded weapon lasts before reverting.
    pub boost_frames: u32,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        PlayerConfig {
            size: 50.0,
            speed: 6.0,
            max_health: 100,
            hit_damage: 10,
            heal_amount: 10,
            invincibility_frames: 60,
            fire_interval: 15,
            fire_interval_step: 4,
            bullet_width: 6.0,
            bullet_height: 15.0,
            bullet_speed: 8.0,
            spread_vx: 2.0,
            boost_frames: 600,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnemyConfig {
    pub size: f32,
    pub elite_size: f32,
    pub base_speed: f32,
    /// Upper bound of the random speed bonus, multiplied by the level.
    pub speed_jitter: f32,
    pub elite_speed_factor: f32,
    pub base_spawn_interval: u64,
    pub spawn_level_factor: u64,
    pub min_spawn_interval: u64,
    pub base_capacity: usize,
    pub capacity_per_level: usize,
    pub max_capacity: usize,
    pub elite_chance: f64,
    pub elite_health: u32,
    pub shoot_interval: u32,
    pub elite_shoot_interval: u32,
    pub bullet_size: f32,
    pub bullet_speed: f32,
}

impl Default for EnemyConfig {
    fn default() -> Self {
        EnemyConfig {
            size: 40.0,
            elite_size: 50.0,
            base_speed: 1.0,
            speed_jitter: 0.5,
            elite_speed_factor: 0.8,
            base_spawn_interval: 60,
            spawn_level_factor: 5,
            min_spawn_interval: 15,
            base_capacity: 4,
            capacity_per_level: 2,
            max_capacity: 12,
            elite_chance: 0.1,
            elite_health: 3,
            shoot_interval: 150,
            elite_shoot_interval: 75,
            bullet_size: 8.0,
            bullet_speed: 4.0,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BossConfig {
    pub width: f32,
    pub height: f32,
    pub base_health: u32,
    pub health_per_level: u32,
    pub entry_speed: f32,
    /// The boss stops descending once its top edge reaches this row.
    pub entry_y: f32,
    pub lateral_speed: f32,
    pub lateral_frames: u32,
    pub zigzag_frames: u32,
    pub ring_bullets: u32,
    pub ring_interval: u32,
    pub ring_speed: f32,
    pub aimed_interval: u32,
    pub aimed_speed: f32,
    pub zigzag_amplitude: f32,
    pub zigzag_frequency: f32,
    pub bullet_size: f32,
    pub invincibility_frames: u32,
    /// Score bonus per level for a defeated boss.
    pub defeat_bonus: u32,
}

impl Default for BossConfig {
    fn default() -> Self {
        BossConfig {
            width: 120.0,
            height: 80.0,
            base_health: 20,
            health_per_level: 10,
            entry_speed: 2.0,
            entry_y: 60.0,
            lateral_speed: 3.0,
            lateral_frames: 180,
            zigzag_frames: 120,
            ring_bullets: 12,
            ring_interval: 45,
            ring_speed: 3.0,
            aimed_interval: 20,
            aimed_speed: 5.0,
            zigzag_amplitude: 30.0,
            zigzag_frequency: 0.1,
            bullet_size: 10.0,
            invincibility_frames: 5,
            defeat_bonus: 500,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PowerUpConfig {
    pub drop_chance: f64,
    pub radius: f32,
    pub fall_speed: f32,
}

impl Default for PowerUpConfig {
    fn default() -> Self {
        PowerUpConfig {
            drop_chance: 0.1,
            radius: 12.0,
            fall_speed: 2.0,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WaveConfig {
    pub base_enemies: u32,
    pub enemies_per_level: u32,
    pub max_level: u32,
    /// Frames between a boss defeat and the next level starting.
    pub level_clear_frames: u32,
}

impl Default for WaveConfig {
    fn default() -> Self {
        WaveConfig {
            base_enemies: 10,
            enemies_per_level: 5,
            max_level: 5,
            level_clear_frames: 120,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExplosionConfig {
    pub kill_radius: f32,
    pub hit_radius: f32,
    pub growth: f32,
    pub fade: f32,
}

impl Default for ExplosionConfig {
    fn default() -> Self {
        ExplosionConfig {
            kill_radius: 20.0,
            hit_radius: 8.0,
            growth: 1.0,
            fade: 0.05,
        }
    }
}

impl GameConfig {
    /// Read a JSON config file and validate it.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let config: GameConfig = serde_json::from_str(&text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.playfield.width <= 0.0 || self.playfield.height <= 0.0 {
            return Err(GameError::Config(format!(
                "playfield must be non-empty, got {}x{}",
                self.playfield.width, self.playfield.height
            )));
        }
        if self.player.max_health == 0 {
            return Err(GameError::Config("player.max_health must be > 0".into()));
        }
        if self.enemy.elite_health == 0 {
            return Err(GameError::Config("enemy.elite_health must be > 0".into()));
        }
        if self.boss.base_health == 0 {
            return Err(GameError::Config("boss.base_health must be > 0".into()));
        }
        if self.boss.ring_bullets == 0 {
            return Err(GameError::Config("boss.ring_bullets must be > 0".into()));
        }
        if self.wave.max_level == 0 {
            return Err(GameError::Config("wave.max_level must be > 0".into()));
        }
        for (name, p) in [
            ("enemy.elite_chance", self.enemy.elite_chance),
            ("power_up.drop_chance", self.power_up.drop_chance),
        ] {
            if !(0.0..=1.0).contains(&p) {
                return Err(GameError::Config(format!("{name} must be in [0, 1], got {p}")));
            }
        }
        Ok(())
    }

    /// Copy of this config adjusted for the chosen difficulty.
    pub fn tuned_for(&self, difficulty: &Difficulty) -> GameConfig {
        let mut tuned = self.clone();
        let (interval_factor, health_factor) = match difficulty {
            Difficulty::Easy => (1.5, 1.5),
            Difficulty::Medium => (1.0, 1.0),
            Difficulty::Hard => (0.6, 0.7),
        };
        let scale = |frames: u64| ((frames as f64) * interval_factor).round() as u64;
        tuned.enemy.base_spawn_interval = scale(self.enemy.base_spawn_interval);
        tuned.enemy.min_spawn_interval = scale(self.enemy.min_spawn_interval);
        tuned.player.max_health =
            ((self.player.max_health as f64 * health_factor).round() as u32).max(1);
        tuned
    }
}

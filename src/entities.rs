/// All game entity types: pure data, no logic beyond small accessors.

use crate::config::{BossConfig, GameConfig};
use crate::geometry::Rect;

#[derive(Clone, Debug, PartialEq)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

#[derive(Clone, Debug, PartialEq)]
pub enum GameStatus {
    Playing,
    GameOver,
    /// The boss of the final level is down.
    MissionComplete,
}

impl GameStatus {
    /// Terminal statuses stop the tick loop until a restart.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, GameStatus::Playing)
    }
}

// ── Weapons ───────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum WeaponKind {
    Single,
    Double,
    /// Three bullets fanning out left, straight and right.
    Spread,
}

impl WeaponKind {
    pub fn level(&self) -> u32 {
        match self {
            WeaponKind::Single => 1,
            WeaponKind::Double => 2,
            WeaponKind::Spread => 3,
        }
    }

    pub fn upgraded(&self) -> WeaponKind {
        match self {
            WeaponKind::Single => WeaponKind::Double,
            WeaponKind::Double | WeaponKind::Spread => WeaponKind::Spread,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            WeaponKind::Single => "Single",
            WeaponKind::Double => "Double",
            WeaponKind::Spread => "Spread",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Weapon {
    pub kind: WeaponKind,
    /// Frames until the next shot is allowed.
    pub cooldown: u32,
    /// Frames until an upgraded weapon reverts to `Single`; 0 when not boosted.
    pub boost_timer: u32,
}

impl Weapon {
    pub fn basic() -> Self {
        Weapon {
            kind: WeaponKind::Single,
            cooldown: 0,
            boost_timer: 0,
        }
    }

    pub fn can_shoot(&self) -> bool {
        self.cooldown == 0
    }
}

// ── Player ────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct Player {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
    pub speed: f32,
    pub health: u32,
    pub max_health: u32,
    pub weapon: Weapon,
    /// Remaining frames of damage immunity.
    pub invincible_timer: u32,
}

impl Player {
    pub fn bounds(&self) -> Rect {
        Rect::new(self.x, self.y, self.w, self.h)
    }

    pub fn is_invincible(&self) -> bool {
        self.invincible_timer > 0
    }
}

// ── Enemies ───────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum EnemyKind {
    Normal,
    /// Tougher, slower, shoots more often and is worth more.
    Elite,
}

impl EnemyKind {
    pub fn points(&self) -> u32 {
        match self {
            EnemyKind::Normal => 20,
            EnemyKind::Elite => 50,
        }
    }
}

#[derive(Clone, Debug)]
pub struct Enemy {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
    pub speed: f32,
    pub health: u32,
    pub max_health: u32,
    pub kind: EnemyKind,
    pub shoot_cooldown: u32,
    pub shoot_interval: u32,
}

impl Enemy {
    pub fn bounds(&self) -> Rect {
        Rect::new(self.x, self.y, self.w, self.h)
    }
}

// ── Boss ──────────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum BossPhase {
    /// Descending into view.
    Entering,
    /// Sweeping sideways, firing radial rings.
    Lateral,
    /// Diagonal sweep with a sinusoidal bob, firing aimed shots.
    Zigzag,
    Defeated,
}

#[derive(Clone, Debug)]
pub struct Boss {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
    pub health: u32,
    pub max_health: u32,
    pub phase: BossPhase,
    /// Frames left in the current timed phase.
    pub phase_timer: u32,
    /// Frames spent in the current phase; drives the zigzag bob.
    pub phase_ticks: u32,
    pub shoot_cooldown: u32,
    /// Signed horizontal speed; the sign flips at the playfield edges.
    pub vx: f32,
    /// Row the zigzag bob oscillates around.
    pub anchor_y: f32,
    pub invincible_timer: u32,
}

impl Boss {
    /// A fresh boss for `level`, centred above the visible top.
    pub fn spawn(level: u32, cfg: &BossConfig, field_width: f32) -> Self {
        let health = cfg.base_health + cfg.health_per_level * level;
        Boss {
            x: (field_width - cfg.width) / 2.0,
            y: -cfg.height,
            w: cfg.width,
            h: cfg.height,
            health,
            max_health: health,
            phase: BossPhase::Entering,
            phase_timer: 0,
            phase_ticks: 0,
            shoot_cooldown: 0,
            vx: cfg.lateral_speed,
            anchor_y: cfg.entry_y,
            invincible_timer: 0,
        }
    }

    pub fn bounds(&self) -> Rect {
        Rect::new(self.x, self.y, self.w, self.h)
    }

    pub fn is_invincible(&self) -> bool {
        self.invincible_timer > 0
    }
}

// ── Projectiles ───────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct Bullet {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
    /// Per-frame velocity; radial and aimed shots use both axes.
    pub vx: f32,
    pub vy: f32,
    pub damage: u32,
}

impl Bullet {
    pub fn bounds(&self) -> Rect {
        Rect::new(self.x, self.y, self.w, self.h)
    }
}

/// Cosmetic blast that grows while it fades out.
#[derive(Clone, Debug)]
pub struct Explosion {
    pub x: f32,
    pub y: f32,
    pub radius: f32,
    /// 1.0 when created; removed once it reaches 0.
    pub alpha: f32,
}

// ── Power-ups ─────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PowerUpKind {
    /// Restores health, capped at the maximum.
    Life,
    /// Upgrades the weapon and clears the current shot cooldown.
    WeaponBoost,
}

#[derive(Clone, Debug)]
pub struct PowerUp {
    /// Centre of the pickup circle.
    pub x: f32,
    pub y: f32,
    pub radius: f32,
    pub kind: PowerUpKind,
}

// ── Wave bookkeeping ──────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Wave {
    pub level: u32,
    pub enemies_in_wave: u32,
    pub enemies_killed: u32,
    pub boss_spawned: bool,
    pub last_spawn_frame: u64,
    /// Countdown to the next level after the boss falls.
    pub level_clear_timer: Option<u32>,
}

impl Wave {
    pub fn for_level(level: u32, cfg: &GameConfig, frame: u64) -> Self {
        Wave {
            level,
            enemies_in_wave: cfg.wave.base_enemies + cfg.wave.enemies_per_level * level.saturating_sub(1),
            enemies_killed: 0,
            boss_spawned: false,
            last_spawn_frame: frame,
            level_clear_timer: None,
        }
    }

    pub fn quota_met(&self) -> bool {
        self.enemies_killed >= self.enemies_in_wave
    }

    pub fn enemies_remaining(&self) -> u32 {
        self.enemies_in_wave.saturating_sub(self.enemies_killed)
    }
}

// ── Events ────────────────────────────────────────────────────────────────────

/// Things that happened during a single tick, for audio and logging.
#[derive(Clone, Debug, PartialEq)]
pub enum GameEvent {
    Shoot,
    EnemyHit,
    EnemyKilled { kind: EnemyKind, x: f32, y: f32 },
    PlayerHit { health: u32 },
    BossSpawn { level: u32 },
    BossHit { health: u32 },
    BossDefeated { level: u32 },
    PowerUpCollected(PowerUpKind),
    WeaponReverted,
    LevelUp { level: u32 },
    GameOver,
    MissionComplete,
}

// ── Master game state ─────────────────────────────────────────────────────────

/// The entire session.  Cloneable so `tick` can return a new copy
/// without mutating the original.
#[derive(Clone, Debug)]
pub struct GameState {
    pub player: Player,
    pub enemies: Vec<Enemy>,
    /// Present only between the wave quota being met and its defeat.
    pub boss: Option<Boss>,
    pub bullets: Vec<Bullet>,
    pub enemy_bullets: Vec<Bullet>,
    pub explosions: Vec<Explosion>,
    pub power_ups: Vec<PowerUp>,
    pub wave: Wave,
    pub score: u32,
    /// The highest score seen so far (updated live during play).
    pub high_score: u32,
    pub difficulty: Difficulty,
    pub status: GameStatus,
    pub frame: u64,
    /// Events raised by the most recent tick.
    pub events: Vec<GameEvent>,
    pub config: GameConfig,
}

impl GameState {
    pub fn width(&self) -> f32 {
        self.config.playfield.width
    }

    pub fn height(&self) -> f32 {
        self.config.playfield.height
    }
}

/// Enemy, boss and power-up creation.

use rand::Rng;

use crate::config::GameConfig;
use crate::entities::{Boss, Enemy, EnemyKind, GameEvent, GameState, PowerUp, PowerUpKind};

// ── Difficulty curves ────────────────────────────────────────────────────────

/// Frames that must pass between enemy spawns at `level`.
pub fn spawn_interval(config: &GameConfig, level: u32) -> u64 {
    let cfg = &config.enemy;
    cfg.base_spawn_interval
        .saturating_sub(level as u64 * cfg.spawn_level_factor)
        .max(cfg.min_spawn_interval)
}

/// Maximum number of live enemies at `level`.
pub fn capacity(config: &GameConfig, level: u32) -> usize {
    let cfg = &config.enemy;
    (cfg.base_capacity + cfg.capacity_per_level * level as usize).min(cfg.max_capacity)
}

// ── Enemies ──────────────────────────────────────────────────────────────────

/// Spawn at most one enemy this frame, if the wave still needs kills and
/// both the spawn interval and the capacity allow it.
pub fn spawn_enemies(state: &mut GameState, rng: &mut impl Rng) {
    let wave = &state.wave;
    if wave.quota_met() || wave.boss_spawned || wave.level_clear_timer.is_some() {
        return;
    }
    let level = wave.level;
    let elapsed = state.frame.saturating_sub(wave.last_spawn_frame);
    if elapsed <= spawn_interval(&state.config, level)
        || state.enemies.len() >= capacity(&state.config, level)
    {
        return;
    }

    let enemy = random_enemy(&state.config, level, rng);
    if enemy.kind == EnemyKind::Elite {
        tracing::debug!(x = enemy.x, level, "elite enemy spawned");
    }
    state.enemies.push(enemy);
    state.wave.last_spawn_frame = state.frame;
}

/// A new enemy just above the visible top at a random column.
pub fn random_enemy(config: &GameConfig, level: u32, rng: &mut impl Rng) -> Enemy {
    let cfg = &config.enemy;
    let kind = if rng.gen_bool(cfg.elite_chance) {
        EnemyKind::Elite
    } else {
        EnemyKind::Normal
    };
    let (size, health, interval, speed_factor) = match kind {
        EnemyKind::Normal => (cfg.size, 1, cfg.shoot_interval, 1.0),
        EnemyKind::Elite => (
            cfg.elite_size,
            cfg.elite_health,
            cfg.elite_shoot_interval,
            cfg.elite_speed_factor,
        ),
    };
    let max_x = (config.playfield.width - size).max(0.0);
    let jitter: f32 = rng.gen::<f32>() * cfg.speed_jitter * level as f32;
    let interval = interval.max(1);

    Enemy {
        x: rng.gen::<f32>() * max_x,
        y: -size,
        w: size,
        h: size,
        speed: (cfg.base_speed + jitter) * speed_factor,
        health,
        max_health: health,
        kind,
        // Desynchronize volleys across the wave
        shoot_cooldown: rng.gen_range(1..=interval),
        shoot_interval: interval,
    }
}

// ── Boss ─────────────────────────────────────────────────────────────────────

/// Spawn the level's boss the first time the wave quota is met and the
/// field is clear of regular enemies.
pub fn spawn_boss_if_due(state: &mut GameState) {
    let wave = &state.wave;
    if wave.boss_spawned || !wave.quota_met() || !state.enemies.is_empty() {
        return;
    }
    let level = wave.level;
    let boss = Boss::spawn(level, &state.config.boss, state.width());
    tracing::info!(level, health = boss.health, "boss spawned");
    state.boss = Some(boss);
    state.wave.boss_spawned = true;
    state.events.push(GameEvent::BossSpawn { level });
}

// ── Power-ups ────────────────────────────────────────────────────────────────

/// Roll the drop chance for an enemy killed at `(x, y)`.
pub fn roll_power_up_drop(config: &GameConfig, x: f32, y: f32, rng: &mut impl Rng) -> Option<PowerUp> {
    if !rng.gen_bool(config.power_up.drop_chance) {
        return None;
    }
    let kind = if rng.gen_bool(0.5) {
        PowerUpKind::Life
    } else {
        PowerUpKind::WeaponBoost
    };
    Some(PowerUp {
        x,
        y,
        radius: config.power_up.radius,
        kind,
    })
}

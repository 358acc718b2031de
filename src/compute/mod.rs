/// Game-logic functions.
///
/// `tick` takes an immutable reference to the current `GameState` (plus
/// the frame's input and an RNG handle) and returns a brand-new
/// `GameState`.  The phases it runs mutate that private copy in place.
/// Side effects are limited to the injected RNG.

pub mod boss;
pub mod collision;
pub mod spawn;
pub mod update;

use rand::Rng;

use crate::config::GameConfig;
use crate::entities::{
    Bullet, Difficulty, GameEvent, GameState, GameStatus, Player, Wave, Weapon, WeaponKind,
};
use crate::input::InputState;

// ── Constructors ─────────────────────────────────────────────────────────────

/// Build the initial game state for a difficulty.  `high_score` is the best
/// score persisted so far.
pub fn init_state(difficulty: Difficulty, base: &GameConfig, high_score: u32) -> GameState {
    let config = base.tuned_for(&difficulty);
    new_session(difficulty, config, high_score)
}

/// Reinitialize every mutable field, keeping difficulty, the already tuned
/// config and the best score seen.
pub fn restart(state: &GameState) -> GameState {
    new_session(
        state.difficulty.clone(),
        state.config.clone(),
        state.high_score.max(state.score),
    )
}

fn new_session(difficulty: Difficulty, config: GameConfig, high_score: u32) -> GameState {
    let size = config.player.size;
    let player = Player {
        x: config.playfield.width / 2.0 - size / 2.0,
        y: config.playfield.height - size - 30.0,
        w: size,
        h: size,
        speed: config.player.speed,
        health: config.player.max_health,
        max_health: config.player.max_health,
        weapon: Weapon::basic(),
        invincible_timer: 0,
    };

    GameState {
        player,
        enemies: Vec::new(),
        boss: None,
        bullets: Vec::new(),
        enemy_bullets: Vec::new(),
        explosions: Vec::new(),
        power_ups: Vec::new(),
        wave: Wave::for_level(1, &config, 0),
        score: 0,
        high_score,
        difficulty,
        status: GameStatus::Playing,
        frame: 0,
        events: Vec::new(),
        config,
    }
}

// ── Input-driven transitions ─────────────────────────────────────────────────

/// Apply one frame of input: move the player (clamped to the playfield)
/// and fire if the weapon is ready.
pub fn apply_input(state: &mut GameState, input: &InputState) {
    let p = &mut state.player;
    let mut dx = 0.0;
    let mut dy = 0.0;
    if input.left {
        dx -= p.speed;
    }
    if input.right {
        dx += p.speed;
    }
    if input.up {
        dy -= p.speed;
    }
    if input.down {
        dy += p.speed;
    }
    p.x = (p.x + dx).clamp(0.0, (state.config.playfield.width - p.w).max(0.0));
    p.y = (p.y + dy).clamp(0.0, (state.config.playfield.height - p.h).max(0.0));

    if input.fire {
        fire_weapon(state);
    }
}

/// Fire the current weapon if its cooldown has elapsed.
pub fn fire_weapon(state: &mut GameState) {
    if !state.player.weapon.can_shoot() {
        return;
    }
    let cfg = &state.config.player;
    let p = &state.player;
    let bw = cfg.bullet_width;
    let mk = |x: f32, vx: f32| Bullet {
        x,
        y: p.y - cfg.bullet_height,
        w: bw,
        h: cfg.bullet_height,
        vx,
        vy: -cfg.bullet_speed,
        damage: 1,
    };
    let centre = p.x + p.w / 2.0 - bw / 2.0;

    match p.weapon.kind {
        WeaponKind::Single => state.bullets.push(mk(centre, 0.0)),
        WeaponKind::Double => {
            state.bullets.push(mk(centre - p.w / 4.0, 0.0));
            state.bullets.push(mk(centre + p.w / 4.0, 0.0));
        }
        WeaponKind::Spread => {
            state.bullets.push(mk(centre, -cfg.spread_vx));
            state.bullets.push(mk(centre, 0.0));
            state.bullets.push(mk(centre, cfg.spread_vx));
        }
    }

    state.player.weapon.cooldown = fire_interval(&state.config, state.player.weapon.kind);
    state.events.push(GameEvent::Shoot);
}

/// Frames between shots for a weapon kind.
pub fn fire_interval(config: &GameConfig, kind: WeaponKind) -> u32 {
    let steps = kind.level() - 1;
    config
        .player
        .fire_interval
        .saturating_sub(config.player.fire_interval_step * steps)
        .max(1)
}

// ── Per-frame tick ────────────────────────────────────────────────────────────

/// Advance the simulation by one frame.  All randomness comes through `rng`
/// so callers control determinism (useful for tests with a seeded RNG).
///
/// A state in a terminal status is returned unchanged.
pub fn tick(state: &GameState, input: &InputState, rng: &mut impl Rng) -> GameState {
    if state.status.is_terminal() {
        return state.clone();
    }

    let mut next = state.clone();
    next.frame += 1;
    next.events.clear();

    // ── 1. Input ─────────────────────────────────────────────────────────────
    apply_input(&mut next, input);

    // ── 2. Movement, timers, culling ─────────────────────────────────────────
    update::step_entities(&mut next);

    // ── 3. Enemy spawns ──────────────────────────────────────────────────────
    spawn::spawn_enemies(&mut next, rng);

    // ── 4. Collisions ────────────────────────────────────────────────────────
    collision::resolve_collisions(&mut next, rng);

    // ── 5. Wave progression and terminal conditions ──────────────────────────
    spawn::spawn_boss_if_due(&mut next);
    evaluate_progress(&mut next);

    next.high_score = next.high_score.max(next.score);
    next
}

/// Level advance after a boss defeat, game over, mission complete.
fn evaluate_progress(state: &mut GameState) {
    if state.player.health == 0 {
        state.status = GameStatus::GameOver;
        state.events.push(GameEvent::GameOver);
        tracing::info!(
            score = state.score,
            level = state.wave.level,
            frame = state.frame,
            "game over"
        );
        return;
    }

    match state.wave.level_clear_timer {
        Some(0) => advance_level(state),
        Some(t) => state.wave.level_clear_timer = Some(t - 1),
        None => {}
    }
}

fn advance_level(state: &mut GameState) {
    let level = state.wave.level;
    if level >= state.config.wave.max_level {
        state.wave.level_clear_timer = None;
        state.status = GameStatus::MissionComplete;
        state.events.push(GameEvent::MissionComplete);
        tracing::info!(score = state.score, level, "mission complete");
        return;
    }

    let next_level = level + 1;
    state.wave = Wave::for_level(next_level, &state.config, state.frame);
    state.enemy_bullets.clear();
    state.events.push(GameEvent::LevelUp { level: next_level });
    tracing::info!(
        level = next_level,
        quota = state.wave.enemies_in_wave,
        "level advanced"
    );
}
